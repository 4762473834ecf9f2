pub mod normalize;
pub mod range;
pub mod values;

pub use normalize::normalize_value;
pub use range::parse_range;
pub use values::{parse_decimal, parse_measurement};
