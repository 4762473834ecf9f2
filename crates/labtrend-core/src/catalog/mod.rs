pub mod builtin;
pub mod schema;

use crate::error::LabtrendError;
use schema::CatalogDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a reference-range catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<CatalogDef, LabtrendError> {
    let content = std::fs::read_to_string(path).map_err(|e| LabtrendError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let catalog: CatalogDef =
        serde_json::from_str(&content).map_err(|e| LabtrendError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<CatalogDef, LabtrendError> {
    let catalog: CatalogDef = serde_json::from_str(json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &CatalogDef) -> Result<(), LabtrendError> {
    if catalog.parameters.is_empty() {
        return Err(LabtrendError::CatalogInvalid(
            "parameters must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for param in &catalog.parameters {
        if param.name.trim().is_empty() {
            return Err(LabtrendError::CatalogInvalid(
                "parameter name must not be empty".into(),
            ));
        }

        if !seen.insert(param.name.as_str()) {
            return Err(LabtrendError::CatalogInvalid(format!(
                "parameter '{}' is listed more than once",
                param.name
            )));
        }

        if param.min > param.max {
            return Err(LabtrendError::CatalogInvalid(format!(
                "parameter '{}' has min {} above max {}",
                param.name, param.min, param.max
            )));
        }
    }

    Ok(())
}
