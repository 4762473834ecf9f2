use crate::model::ReferenceRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A table of fallback reference ranges keyed by canonical parameter name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub parameters: Vec<ParameterRangeDef>,
}

/// Default range and unit for one parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRangeDef {
    /// Canonical name, matched exactly against report keys.
    pub name: String,
    pub min: Decimal,
    pub max: Decimal,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl ParameterRangeDef {
    pub fn range(&self) -> ReferenceRange {
        ReferenceRange {
            min: self.min,
            max: self.max,
        }
    }
}

impl CatalogDef {
    /// Exact-name lookup. Absence means no fallback range is available.
    pub fn lookup(&self, name: &str) -> Option<&ParameterRangeDef> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
