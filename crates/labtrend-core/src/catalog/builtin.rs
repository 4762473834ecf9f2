use crate::catalog::schema::CatalogDef;
use crate::error::LabtrendError;
use std::sync::LazyLock;

const DEFAULT_CATALOG_JSON: &str = include_str!("../../catalogs/default.json");

/// Available built-in catalogs.
pub const PRESETS: &[&str] = &["default"];

static DEFAULT_CATALOG: LazyLock<Result<CatalogDef, String>> = LazyLock::new(|| {
    serde_json::from_str::<CatalogDef>(DEFAULT_CATALOG_JSON).map_err(|e| e.to_string())
});

/// Load a built-in catalog by name.
pub fn load_preset(name: &str) -> Result<CatalogDef, LabtrendError> {
    match name {
        "default" => default_catalog().cloned(),
        _ => Err(LabtrendError::CatalogInvalid(format!(
            "unknown catalog '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The built-in catalog of common adult lab markers, parsed once.
pub fn default_catalog() -> Result<&'static CatalogDef, LabtrendError> {
    DEFAULT_CATALOG
        .as_ref()
        .map_err(|reason| LabtrendError::CatalogInvalid(format!("built-in catalog: {reason}")))
}
