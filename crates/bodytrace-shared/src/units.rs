//! Conversion of raw device values into display units
//!
//! Scales report weight in grams and blood pressure monitors report
//! hundredths of a mmHg.

pub const GRAMS_PER_POUND: f64 = 453.592;
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;
pub const CENTI_MMHG_PER_MMHG: f64 = 100.0;

/// Shown instead of a value that is missing or zero
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum WeightUnit {
    #[default]
    #[strum(to_string = "lbs")]
    Pounds,
    #[strum(to_string = "kg")]
    Kilograms,
}

impl WeightUnit {
    fn grams_per_unit(&self) -> f64 {
        match self {
            WeightUnit::Pounds => GRAMS_PER_POUND,
            WeightUnit::Kilograms => GRAMS_PER_KILOGRAM,
        }
    }

    pub fn from_grams(&self, grams: f64) -> f64 {
        grams / self.grams_per_unit()
    }

    pub fn to_grams(&self, value: f64) -> f64 {
        value * self.grams_per_unit()
    }

    /// Two decimal places or [`NOT_AVAILABLE`]
    pub fn format_grams(&self, grams: Option<f64>) -> String {
        match non_zero(grams) {
            Some(grams) => format!("{:.2}", self.from_grams(grams)),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

pub fn mmhg_from_centi(centi_mmhg: f64) -> f64 {
    centi_mmhg / CENTI_MMHG_PER_MMHG
}

/// Whole mmHg or [`NOT_AVAILABLE`]
pub fn format_centi_mmhg(centi_mmhg: Option<f64>) -> String {
    match non_zero(centi_mmhg) {
        Some(value) => format!("{:.0}", mmhg_from_centi(value)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Zero means the device did not measure the value
pub fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|x| *x != 0.0 && x.is_finite())
}
