//! Report pipeline services

pub mod aggregator;
pub mod dates;
pub mod formula;
pub mod layout;
