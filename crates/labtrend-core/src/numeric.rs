use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero to one decimal place, always keeping one
/// fractional digit so `31` renders as `31.0`.
pub fn round1(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded
}
