use labtrend_core::catalog::builtin;
use labtrend_core::error::LabtrendError;
use std::path::Path;

pub fn list() -> Result<(), LabtrendError> {
    for name in builtin::PRESETS {
        let catalog = builtin::load_preset(name)?;
        println!("{} (v{})", catalog.name, catalog.version);
        if let Some(ref desc) = catalog.description {
            println!("{}", desc);
        }
        println!();

        let max_name_len = catalog
            .parameters
            .iter()
            .map(|p| p.name.len())
            .max()
            .unwrap_or(20);

        println!(
            "  {:<width$}  {:<10}  {:<10}  Unit",
            "Parameter",
            "Min",
            "Max",
            width = max_name_len
        );
        println!("  {}", "-".repeat(max_name_len + 34));

        for param in &catalog.parameters {
            println!(
                "  {:<width$}  {:<10}  {:<10}  {}",
                param.name,
                param.min,
                param.max,
                param.unit.as_deref().unwrap_or("-"),
                width = max_name_len
            );
        }
        println!();
    }
    Ok(())
}

pub fn schema() -> Result<(), LabtrendError> {
    print!(
        r#"JSON Catalog Schema
===================

A catalog lists fallback reference ranges. A report value is compared
against the range stated in the report itself; when the report gives no
usable range, the catalog entry with exactly the same parameter name is
used instead.

Top-level fields:
  name          (string, required)  Human-readable name of the catalog
  description   (string, optional)  What this catalog is for
  version       (string, required)  Version identifier (e.g., "2025.1")
  parameters    (array, required)   List of parameter ranges (see below)

Each entry in the "parameters" array:
  name          (string, required)  Parameter name, matched exactly and
                                    case-sensitively against report keys.
                                    Synonyms (e.g. "SGPT" and "ALT") need
                                    one entry each.
  min           (string, required)  Lower bound, inclusive
  max           (string, required)  Upper bound, inclusive, >= min
  unit          (string, optional)  Unit used when reports omit one
  note          (string, optional)  Free-form remark

Example:
{{
  "name": "Clinic ranges",
  "version": "1.0",
  "parameters": [
    {{ "name": "Ferritin", "min": "30", "max": "400", "unit": "ng/mL" }},
    {{ "name": "Hemoglobin", "min": "13", "max": "17", "unit": "g/dL",
      "note": "Adult male" }}
  ]
}}

Note: bounds must be quoted strings, not bare numbers, to keep exact
decimal precision (e.g., "5.6" not 5.6).
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), LabtrendError> {
    let catalog = labtrend_core::catalog::load_catalog(file)?;

    println!("Catalog '{}' (v{}) is valid.", catalog.name, catalog.version);
    println!("  Parameters: {}", catalog.parameters.len());

    // Warnings, not errors
    let mut warnings = Vec::new();
    for param in &catalog.parameters {
        if param.unit.is_none() {
            warnings.push(format!("parameter '{}' has no unit", param.name));
        }
        if param.name != param.name.trim() {
            warnings.push(format!(
                "parameter '{}' has surrounding whitespace and will only match keys that do too",
                param.name
            ));
        }
        if param.min == param.max {
            warnings.push(format!(
                "parameter '{}' has a single-value range ({})",
                param.name, param.min
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
