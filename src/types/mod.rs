//! Type definitions for costsheet

mod error;
mod report;

pub use error::*;
pub use report::*;
