pub mod store;

use crate::error::LabtrendError;
use crate::numeric::round1;
use crate::parsing::parse_decimal;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

const UNDERWEIGHT_BELOW: Decimal = dec!(18.5);
const OVERWEIGHT_FROM: Decimal = dec!(25);
const OBESE_FROM: Decimal = dec!(30);
const HEALTHY_BMI_MIN: Decimal = dec!(18.5);
const HEALTHY_BMI_MAX: Decimal = dec!(24.9);
// Decimal's maximum scale.
const MAX_BAND_DP: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Lower bounds are inclusive: 25.0 is already Overweight.
    pub fn from_bmi(bmi: Decimal) -> BmiCategory {
        if bmi < UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < OVERWEIGHT_FROM {
            BmiCategory::NormalWeight
        } else if bmi < OBESE_FROM {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn health_tip(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Consider a nutrient-rich diet.",
            BmiCategory::NormalWeight => "Great job! Keep maintaining your healthy lifestyle.",
            BmiCategory::Overweight => "Regular exercise can help improve your health.",
            BmiCategory::Obese => "Consult a healthcare professional for guidance.",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::NormalWeight => write!(f, "Normal weight"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obese => write!(f, "Obese"),
        }
    }
}

/// Healthy weight band for a height, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min_kg: Decimal,
    pub max_kg: Decimal,
}

impl fmt::Display for WeightRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} kg", self.min_kg, self.max_kg)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiResult {
    pub height_cm: Decimal,
    pub weight_kg: Decimal,
    pub bmi: Decimal,
    pub category: BmiCategory,
    pub recommended_range: WeightRange,
    pub health_tip: &'static str,
}

/// A stored BMI calculation. Created once per successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRecord {
    pub user_id: String,
    pub height_cm: Decimal,
    pub weight_kg: Decimal,
    pub bmi: Decimal,
    pub category: BmiCategory,
    pub recommended_range: WeightRange,
    pub created_at: DateTime<Utc>,
}

impl BmiRecord {
    pub fn new(user_id: impl Into<String>, result: &BmiResult, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            height_cm: result.height_cm,
            weight_kg: result.weight_kg,
            bmi: result.bmi,
            category: result.category,
            recommended_range: result.recommended_range,
            created_at,
        }
    }
}

/// Compute BMI, its category and the healthy weight band for the height.
///
/// Both inputs must be positive. `bmi = weight / (height_m)^2`, rounded
/// to one decimal.
pub fn calculate_bmi(height_cm: Decimal, weight_kg: Decimal) -> Result<BmiResult, LabtrendError> {
    if height_cm <= Decimal::ZERO {
        return Err(LabtrendError::Validation(format!(
            "height must be greater than 0 cm, got {height_cm}"
        )));
    }
    if weight_kg <= Decimal::ZERO {
        return Err(LabtrendError::Validation(format!(
            "weight must be greater than 0 kg, got {weight_kg}"
        )));
    }

    let out_of_range = || {
        LabtrendError::Validation(format!(
            "height {height_cm} cm and weight {weight_kg} kg are out of range"
        ))
    };

    let height_m = height_cm
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or_else(out_of_range)?;
    let height_sq = height_m.checked_mul(height_m).ok_or_else(out_of_range)?;
    let raw_bmi = weight_kg.checked_div(height_sq).ok_or_else(out_of_range)?;
    let bmi = round1(raw_bmi);
    if bmi <= Decimal::ZERO {
        return Err(out_of_range());
    }

    let recommended_range = healthy_band(height_sq).ok_or_else(out_of_range)?;

    let category = BmiCategory::from_bmi(bmi);
    Ok(BmiResult {
        height_cm,
        weight_kg,
        bmi,
        category,
        recommended_range,
        health_tip: category.health_tip(),
    })
}

/// Weight band whose ends both calculate back to Normal weight.
///
/// The low end rounds up and the high end rounds down, so rounding never
/// pushes an end outside 18.5..25. One decimal is used unless the height is
/// so small that one decimal cannot hold such a band.
fn healthy_band(height_sq: Decimal) -> Option<WeightRange> {
    let low = HEALTHY_BMI_MIN.checked_mul(height_sq)?;
    let high = HEALTHY_BMI_MAX.checked_mul(height_sq)?;
    let is_normal = |kg: Decimal| {
        kg > Decimal::ZERO
            && kg
                .checked_div(height_sq)
                .map(|bmi| BmiCategory::from_bmi(round1(bmi)) == BmiCategory::NormalWeight)
                .unwrap_or(false)
    };

    (1..=MAX_BAND_DP).find_map(|dp| {
        let mut min_kg = low.round_dp_with_strategy(dp, RoundingStrategy::AwayFromZero);
        let mut max_kg = high.round_dp_with_strategy(dp, RoundingStrategy::ToZero);
        min_kg.rescale(dp);
        max_kg.rescale(dp);
        (is_normal(min_kg) && is_normal(max_kg)).then_some(WeightRange { min_kg, max_kg })
    })
}

/// Same as [`calculate_bmi`] for raw text input; non-numeric input is a
/// validation error.
pub fn calculate_bmi_str(height_cm: &str, weight_kg: &str) -> Result<BmiResult, LabtrendError> {
    let height = parse_decimal(height_cm).map_err(|_| {
        LabtrendError::Validation(format!("height '{}' is not a number", height_cm.trim()))
    })?;
    let weight = parse_decimal(weight_kg).map_err(|_| {
        LabtrendError::Validation(format!("weight '{}' is not a number", weight_kg.trim()))
    })?;
    calculate_bmi(height, weight)
}

/// The user's most recent record by `created_at`. Later entries win ties.
pub fn latest_bmi<'a>(records: &'a [BmiRecord], user_id: &str) -> Option<&'a BmiRecord> {
    records
        .iter()
        .filter(|r| r.user_id == user_id)
        .max_by_key(|r| r.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normal_weight() {
        let r = calculate_bmi(dec!(175), dec!(70)).unwrap();
        assert_eq!(r.bmi, dec!(22.9));
        assert_eq!(r.category, BmiCategory::NormalWeight);
        assert_eq!(r.category.to_string(), "Normal weight");
    }

    #[test]
    fn test_obese() {
        let r = calculate_bmi(dec!(175), dec!(95)).unwrap();
        assert_eq!(r.bmi, dec!(31.0));
        assert_eq!(r.bmi.to_string(), "31.0");
        assert_eq!(r.category, BmiCategory::Obese);
        assert_eq!(r.health_tip, "Consult a healthcare professional for guidance.");
    }

    #[test]
    fn test_recommended_range() {
        let r = calculate_bmi(dec!(175), dec!(70)).unwrap();
        // 18.5 * 3.0625 = 56.65625 up, 24.9 * 3.0625 = 76.25625 down
        assert_eq!(r.recommended_range.min_kg, dec!(56.7));
        assert_eq!(r.recommended_range.max_kg, dec!(76.2));
        assert_eq!(r.recommended_range.to_string(), "56.7 - 76.2 kg");
    }

    #[test]
    fn test_recommended_band_ends_are_normal_weight() {
        let heights = (1..=2500)
            .map(|tenths| Decimal::new(tenths, 1))
            .chain([dec!(91.3), dec!(92.6), dec!(93.9), dec!(95.8)])
            .chain([dec!(0.01), dec!(0.5), dec!(3.3), dec!(4.5), dec!(6.3)]);
        for height in heights {
            let band = calculate_bmi(height, dec!(70)).unwrap().recommended_range;
            assert!(band.min_kg <= band.max_kg, "height {height} cm");
            let at_max = calculate_bmi(height, band.max_kg).unwrap();
            assert_eq!(at_max.category, BmiCategory::NormalWeight, "max at {height} cm");
            let at_min = calculate_bmi(height, band.min_kg).unwrap();
            assert_eq!(at_min.category, BmiCategory::NormalWeight, "min at {height} cm");
        }
    }

    #[test]
    fn test_band_at_95_8_cm_rounds_down() {
        // 24.9 * 0.917764 = 22.8523.. would round up to 22.9 and BMI 25.0
        let band = calculate_bmi(dec!(95.8), dec!(20)).unwrap().recommended_range;
        assert_eq!(band.max_kg, dec!(22.8));
        assert_eq!(calculate_bmi(dec!(95.8), band.max_kg).unwrap().bmi, dec!(24.8));
    }

    #[test]
    fn test_tiny_height_band_uses_more_decimals() {
        // one decimal cannot fit 18.5..25 at 4 cm: 0.1 kg is already BMI 62.5
        let band = calculate_bmi(dec!(4), dec!(0.1)).unwrap().recommended_range;
        assert_eq!(band.max_kg.scale(), 2);
        // 0.0296 up and 0.03984 down both land on 0.03 (BMI 18.8)
        assert_eq!(band.to_string(), "0.03 - 0.03 kg");
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(dec!(18.4)), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(dec!(18.5)), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(dec!(24.9)), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(dec!(25.0)), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(dec!(29.9)), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(dec!(30.0)), BmiCategory::Obese);
    }

    #[test]
    fn test_underweight_and_overweight() {
        let under = calculate_bmi(dec!(180), dec!(55)).unwrap();
        assert_eq!(under.bmi, dec!(17.0));
        assert_eq!(under.category, BmiCategory::Underweight);
        let over = calculate_bmi(dec!(170), dec!(80)).unwrap();
        assert_eq!(over.bmi, dec!(27.7));
        assert_eq!(over.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_non_positive_inputs_rejected() {
        assert!(matches!(
            calculate_bmi(dec!(0), dec!(70)),
            Err(LabtrendError::Validation(_))
        ));
        assert!(matches!(
            calculate_bmi(dec!(175), dec!(-1)),
            Err(LabtrendError::Validation(_))
        ));
    }

    #[test]
    fn test_bmi_rounding_to_zero_rejected() {
        assert!(matches!(
            calculate_bmi(dec!(100000), dec!(1)),
            Err(LabtrendError::Validation(_))
        ));
    }

    #[test]
    fn test_text_input() {
        let r = calculate_bmi_str(" 175 ", "70").unwrap();
        assert_eq!(r.bmi, dec!(22.9));
        assert!(matches!(
            calculate_bmi_str("tall", "70"),
            Err(LabtrendError::Validation(_))
        ));
        assert!(matches!(
            calculate_bmi_str("175", ""),
            Err(LabtrendError::Validation(_))
        ));
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&BmiCategory::NormalWeight).unwrap();
        assert_eq!(json, r#""Normal weight""#);
    }

    #[test]
    fn test_latest_bmi_by_created_at() {
        let result = calculate_bmi(dec!(175), dec!(70)).unwrap();
        let day = |d| Utc.with_ymd_and_hms(2024, 6, d, 9, 0, 0).unwrap();
        let records = vec![
            BmiRecord::new("u1", &result, day(10)),
            BmiRecord::new("u1", &result, day(3)),
            BmiRecord::new("u2", &result, day(20)),
        ];
        assert_eq!(latest_bmi(&records, "u1").unwrap().created_at, day(10));
        assert_eq!(latest_bmi(&records, "u2").unwrap().created_at, day(20));
        assert!(latest_bmi(&records, "u3").is_none());
    }
}
