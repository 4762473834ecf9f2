pub mod bmi;
pub mod catalog;
pub mod overview;
pub mod score;
pub mod series;

use labtrend_core::catalog::builtin;
use labtrend_core::catalog::schema::CatalogDef;
use labtrend_core::error::LabtrendError;
use std::path::Path;

/// The catalog given on the command line, or the built-in one.
fn resolve_catalog(path: Option<&Path>) -> Result<CatalogDef, LabtrendError> {
    match path {
        Some(p) => labtrend_core::catalog::load_catalog(p),
        None => builtin::load_preset("default"),
    }
}
