//! JSON-file-backed cost-diff source
//!
//! Serves `fetch` from a document of the shape:
//!
//! ```json
//! {
//!   "accounts": [{ "id": "111111111111", "label": "Production" }],
//!   "costs": {
//!     "day":   { "111111111111": { "EC2": [{ "date": "...", "cost": 1.0 }] } },
//!     "month": { "111111111111": { "EC2": [...] } }
//!   }
//! }
//! ```
//!
//! keyed by granularity, then account id, then product. Range filtering
//! is the backend's concern: points outside the bucket list are never
//! looked up, so extra keys are harmless.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::CostDiffSource;
use crate::types::{Account, DateRange, RawPricePoint, ReportError, Result};

type GranularityCosts = HashMap<String, HashMap<String, Vec<RawPricePoint>>>;

#[derive(Debug, Deserialize)]
struct CostDocument {
    accounts: Vec<Account>,
    #[serde(default)]
    costs: HashMap<String, GranularityCosts>,
}

/// Cost-diff source reading a local JSON document
#[derive(Debug)]
pub struct JsonCostSource {
    document: CostDocument,
}

impl JsonCostSource {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let document: CostDocument = serde_json::from_str(&raw)
            .map_err(|e| ReportError::Input(format!("{}: {}", path.display(), e)))?;
        Ok(Self { document })
    }

    /// Accounts declared by the input document
    pub fn accounts(&self) -> &[Account] {
        &self.document.accounts
    }
}

impl CostDiffSource for JsonCostSource {
    fn fetch(
        &self,
        account: &Account,
        _range: &DateRange,
        granularity: &str,
    ) -> Result<HashMap<String, Vec<RawPricePoint>>> {
        Ok(self
            .document
            .costs
            .get(granularity)
            .and_then(|by_account| by_account.get(&account.id))
            .cloned()
            .unwrap_or_default())
    }
}
