//! # Parameter Engine
//!
//! Derivations from the primary design parameters. Each calculation follows
//! the pattern:
//!
//! - `*Input` / [`PrimaryParameters`] - Input parameters (JSON-serializable)
//! - `*Parameters` / `*Estimate` / `*Report` - Results (JSON-serializable)
//! - a pure function from one to the other returning `KioskResult`
//!
//! Nothing here chains calls or holds state: applying a preset, deriving the
//! secondary parameters and estimating costs are separate steps sequenced by
//! the caller (see [`crate::session::DesignSession`]).
//!
//! ## Available Calculations
//!
//! - [`secondary`] - Ring, uprights, tubes and anchoring
//! - [`cost`] - Steel, concrete and price estimate
//! - [`safety`] - Safety-limit checks (warnings, never corrections)
//! - [`advice`] - Quick sizing advice for wind and material

pub mod advice;
pub mod cost;
pub mod safety;
pub mod secondary;

use serde::{Deserialize, Serialize};

use crate::errors::{KioskError, KioskResult};
use crate::materials::StructuralMaterial;

// Re-export commonly used types
pub use advice::{sizing_advice, SizingAdvice};
pub use cost::{estimate_costs, estimate_costs_with, CostEstimate, CostInput};
pub use safety::{check_safety_limits, SafetyReport};
pub use secondary::{derive_secondary_parameters, SecondaryParameters};

/// Upper bound of the petal radius input domain (mm); keeps the upright count
/// in the low thousands
pub const RADIUS_INPUT_MAX_MM: f64 = 100_000.0;

/// Upper bound of the wind speed input domain (km/h)
pub const WIND_SPEED_INPUT_MAX_KMH: f64 = 300.0;

/// Safety factor input domain
pub const SAFETY_FACTOR_MIN: f64 = 1.0;
pub const SAFETY_FACTOR_MAX: f64 = 3.0;

/// Caller-supplied primary design parameters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "radius_mm": 2200.0,
///   "upright_height_mm": 2200.0,
///   "spacing_mm": 1000.0,
///   "dome_height_mm": 3500.0,
///   "material": "steel_galvanized",
///   "wind_speed_kmh": 100.0,
///   "safety_factor": 1.25
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryParameters {
    /// Petal radius in millimeters
    pub radius_mm: f64,

    /// Upright (montant) height in millimeters
    pub upright_height_mm: f64,

    /// Spacing between petals in millimeters
    pub spacing_mm: f64,

    /// Dome height in millimeters
    pub dome_height_mm: f64,

    /// Frame material
    pub material: StructuralMaterial,

    /// Design wind speed in km/h
    pub wind_speed_kmh: f64,

    /// Safety factor (1.25 is the baseline)
    pub safety_factor: f64,
}

impl Default for PrimaryParameters {
    fn default() -> Self {
        PrimaryParameters {
            radius_mm: 2200.0,
            upright_height_mm: 2200.0,
            spacing_mm: 1000.0,
            dome_height_mm: 3500.0,
            material: StructuralMaterial::SteelGalvanized,
            wind_speed_kmh: 100.0,
            safety_factor: 1.25,
        }
    }
}

impl PrimaryParameters {
    /// Validate input parameters.
    ///
    /// Dimensions must be finite and positive (radius at most 100 m), wind
    /// speed within 0-300 km/h and the safety factor within 1.0-3.0.
    pub fn validate(&self) -> KioskResult<()> {
        validate_positive("radius_mm", self.radius_mm)?;
        if self.radius_mm > RADIUS_INPUT_MAX_MM {
            return Err(KioskError::invalid_parameter(
                "radius_mm",
                self.radius_mm.to_string(),
                "Radius must not exceed 100000 mm",
            ));
        }
        validate_positive("upright_height_mm", self.upright_height_mm)?;
        validate_positive("spacing_mm", self.spacing_mm)?;
        validate_positive("dome_height_mm", self.dome_height_mm)?;

        if !self.wind_speed_kmh.is_finite()
            || self.wind_speed_kmh < 0.0
            || self.wind_speed_kmh > WIND_SPEED_INPUT_MAX_KMH
        {
            return Err(KioskError::invalid_parameter(
                "wind_speed_kmh",
                self.wind_speed_kmh.to_string(),
                "Wind speed must be between 0 and 300 km/h",
            ));
        }
        if !self.safety_factor.is_finite()
            || self.safety_factor < SAFETY_FACTOR_MIN
            || self.safety_factor > SAFETY_FACTOR_MAX
        {
            return Err(KioskError::invalid_parameter(
                "safety_factor",
                self.safety_factor.to_string(),
                "Safety factor must be between 1.0 and 3.0",
            ));
        }
        Ok(())
    }
}

/// Reject NaN, infinities, zero and negatives.
pub(crate) fn validate_positive(field: &str, value: f64) -> KioskResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(KioskError::invalid_parameter(
            field,
            value.to_string(),
            "Must be a finite positive number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(PrimaryParameters::default().validate().is_ok());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let params = PrimaryParameters {
            radius_mm: -10.0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        match err {
            KioskError::InvalidParameter { field, .. } => assert_eq!(field, "radius_mm"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let params = PrimaryParameters {
            dome_height_mm: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = PrimaryParameters {
            spacing_mm: f64::INFINITY,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_huge_radius_rejected() {
        let at_limit = PrimaryParameters {
            radius_mm: RADIUS_INPUT_MAX_MM,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        for radius_mm in [RADIUS_INPUT_MAX_MM + 1.0, 1e8, 1e12] {
            let params = PrimaryParameters {
                radius_mm,
                ..Default::default()
            };
            let err = params.validate().unwrap_err();
            assert_eq!(err.error_code(), "INVALID_PARAMETER");
        }
    }

    #[test]
    fn test_wind_and_safety_domains() {
        let zero_wind = PrimaryParameters {
            wind_speed_kmh: 0.0,
            ..Default::default()
        };
        assert!(zero_wind.validate().is_ok());

        let negative_wind = PrimaryParameters {
            wind_speed_kmh: -1.0,
            ..Default::default()
        };
        assert!(negative_wind.validate().is_err());

        let low_sf = PrimaryParameters {
            safety_factor: 0.9,
            ..Default::default()
        };
        assert!(low_sf.validate().is_err());

        let high_sf = PrimaryParameters {
            safety_factor: 3.5,
            ..Default::default()
        };
        assert!(high_sf.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let params = PrimaryParameters::default();
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"material\":\"steel_galvanized\""));
        let roundtrip: PrimaryParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, params);
    }
}
