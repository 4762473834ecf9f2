use labtrend_core::error::LabtrendError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), LabtrendError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
