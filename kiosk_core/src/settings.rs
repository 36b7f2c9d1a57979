//! # Design Settings
//!
//! Compiled-in engineering constants: safety limits, the cost model and the
//! retrofit count ranges. The defaults are the reference values; a design
//! session may carry overrides and persists them with the rest of its data.
//!
//! ```rust
//! use kiosk_core::settings::DesignSettings;
//!
//! let settings = DesignSettings::default();
//! assert_eq!(settings.safety_limits.wind_speed_max_kmh, 150.0);
//! assert_eq!(settings.cost_model.optimization_threshold, 70);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{KioskError, KioskResult};

/// All tunable constants for one design session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignSettings {
    /// Hard structural bounds checked after derivation
    pub safety_limits: SafetyLimits,

    /// Unit prices and the cost-optimization discount
    pub cost_model: CostModel,

    /// Allowed count ranges for counted retrofits
    pub retrofit_limits: RetrofitLimits,
}

impl DesignSettings {
    /// Check that the settings are internally consistent.
    pub fn validate(&self) -> KioskResult<()> {
        self.safety_limits.validate()?;
        self.cost_model.validate()?;
        self.retrofit_limits.validate()
    }
}

/// Safety limits enforced at the validation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyLimits {
    /// Maximum design wind speed (km/h)
    pub wind_speed_max_kmh: f64,
    /// Minimum tube diameter (mm)
    pub tube_diameter_min_mm: f64,
    /// Maximum tube diameter (mm)
    pub tube_diameter_max_mm: f64,
    /// Minimum anchor depth (mm)
    pub anchor_depth_min_mm: f64,
    /// Minimum number of uprights
    pub upright_count_min: u32,
    /// Maximum number of uprights
    pub upright_count_max: u32,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        SafetyLimits {
            wind_speed_max_kmh: 150.0,
            tube_diameter_min_mm: 30.0,
            tube_diameter_max_mm: 200.0,
            anchor_depth_min_mm: 600.0,
            upright_count_min: 4,
            upright_count_max: 12,
        }
    }
}

impl SafetyLimits {
    fn validate(&self) -> KioskResult<()> {
        if self.tube_diameter_min_mm > self.tube_diameter_max_mm {
            return Err(KioskError::invalid_parameter(
                "safety_limits.tube_diameter_min_mm",
                self.tube_diameter_min_mm.to_string(),
                "Minimum tube diameter exceeds the maximum",
            ));
        }
        if self.upright_count_min > self.upright_count_max {
            return Err(KioskError::invalid_parameter(
                "safety_limits.upright_count_min",
                self.upright_count_min.to_string(),
                "Minimum upright count exceeds the maximum",
            ));
        }
        if self.wind_speed_max_kmh.is_nan() || self.wind_speed_max_kmh < 0.0 {
            return Err(KioskError::invalid_parameter(
                "safety_limits.wind_speed_max_kmh",
                self.wind_speed_max_kmh.to_string(),
                "Wind speed limit must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Cost heuristic constants.
///
/// The optimization threshold is strict: a weight of exactly 70 gets no discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Cost-optimization weight above which the discount applies (0-100)
    pub optimization_threshold: u8,
    /// Steel multiplier when optimizing
    pub steel_discount: f64,
    /// Concrete multiplier when optimizing
    pub concrete_discount: f64,
    /// Currency units per kg of steel
    pub steel_unit_price: f64,
    /// Currency units per tonne of concrete
    pub concrete_unit_price: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            optimization_threshold: 70,
            steel_discount: 0.85,
            concrete_discount: 0.8,
            steel_unit_price: 2.0,
            concrete_unit_price: 50.0,
        }
    }
}

impl CostModel {
    fn validate(&self) -> KioskResult<()> {
        if self.optimization_threshold > 100 {
            return Err(KioskError::invalid_parameter(
                "cost_model.optimization_threshold",
                self.optimization_threshold.to_string(),
                "Threshold must be between 0 and 100",
            ));
        }
        for (field, value) in [
            ("cost_model.steel_discount", self.steel_discount),
            ("cost_model.concrete_discount", self.concrete_discount),
            ("cost_model.steel_unit_price", self.steel_unit_price),
            ("cost_model.concrete_unit_price", self.concrete_unit_price),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(KioskError::invalid_parameter(
                    field,
                    value.to_string(),
                    "Must be a finite non-negative number",
                ));
            }
        }
        Ok(())
    }
}

/// Inclusive count range for a counted retrofit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        CountRange { min, max }
    }

    pub fn contains(&self, count: u32) -> bool {
        (self.min..=self.max).contains(&count)
    }

    pub fn clamp(&self, count: u32) -> u32 {
        count.clamp(self.min, self.max)
    }
}

impl std::fmt::Display for CountRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Count ranges for doors and open petals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrofitLimits {
    /// Sliding doors between petals
    pub door_count: CountRange,
    /// Petals opened for the stand layout
    pub open_petal_count: CountRange,
}

impl Default for RetrofitLimits {
    fn default() -> Self {
        RetrofitLimits {
            door_count: CountRange::new(1, 4),
            open_petal_count: CountRange::new(1, 4),
        }
    }
}

impl RetrofitLimits {
    fn validate(&self) -> KioskResult<()> {
        for (field, range) in [
            ("retrofit_limits.door_count", self.door_count),
            ("retrofit_limits.open_petal_count", self.open_petal_count),
        ] {
            if range.min > range.max {
                return Err(KioskError::invalid_parameter(field, range.to_string(), "Empty count range"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DesignSettings::default().validate().is_ok());
    }

    #[test]
    fn test_count_range() {
        let range = CountRange::new(1, 4);
        assert!(range.contains(1));
        assert!(range.contains(4));
        assert!(!range.contains(0));
        assert!(!range.contains(5));
        assert_eq!(range.clamp(7), 4);
        assert_eq!(range.clamp(0), 1);
        assert_eq!(range.to_string(), "1-4");
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let mut settings = DesignSettings::default();
        settings.safety_limits.upright_count_min = 20;
        assert!(settings.validate().is_err());

        let mut settings = DesignSettings::default();
        settings.retrofit_limits.door_count = CountRange::new(5, 2);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_serialization() {
        let settings = DesignSettings::default();
        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("optimization_threshold"));
        let roundtrip: DesignSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, settings);
    }
}
