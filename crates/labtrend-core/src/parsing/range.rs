use crate::model::ReferenceRange;
use crate::parsing::values::numeric_tokens;

/// Parse a free-text reference range such as "12-17" or "70 - 100 mg/dL".
///
/// Takes the first two numeric tokens as min and max. Returns `None` when
/// fewer than two numbers are present or when they are in descending order.
pub fn parse_range(text: &str) -> Option<ReferenceRange> {
    let mut tokens = numeric_tokens(text).into_iter();
    let min = tokens.next()?;
    let max = tokens.next()?;
    if min > max {
        return None;
    }
    Some(ReferenceRange { min, max })
}
