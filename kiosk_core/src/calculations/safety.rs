//! # Safety Limits
//!
//! Checks the primary inputs and the derived parameters against the hard
//! safety bounds. Violations are reported as warnings; values are never
//! corrected here.
//!
//! ```rust
//! use kiosk_core::calculations::{check_safety_limits, derive_secondary_parameters, PrimaryParameters};
//! use kiosk_core::settings::SafetyLimits;
//!
//! let params = PrimaryParameters { wind_speed_kmh: 160.0, ..Default::default() };
//! let secondary = derive_secondary_parameters(&params).unwrap();
//! let report = check_safety_limits(&params, &secondary, &SafetyLimits::default());
//! assert!(!report.is_clear());
//! ```

use serde::{Deserialize, Serialize};

use super::{PrimaryParameters, SecondaryParameters};
use crate::errors::{KioskError, KioskResult};
use crate::settings::SafetyLimits;

/// Outcome of a safety check: zero or more `SafetyLimitExceeded` warnings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SafetyReport {
    pub warnings: Vec<KioskError>,
}

impl SafetyReport {
    /// No limit exceeded
    pub fn is_clear(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Names of the limits that were exceeded
    pub fn exceeded_limits(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                KioskError::SafetyLimitExceeded { limit, .. } => Some(limit.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Turn the report into a hard failure for callers that want to abort.
    ///
    /// Returns the first warning as the error.
    pub fn into_result(self) -> KioskResult<()> {
        match self.warnings.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }
}

/// Check inputs and derived values against the safety limits.
pub fn check_safety_limits(
    params: &PrimaryParameters,
    secondary: &SecondaryParameters,
    limits: &SafetyLimits,
) -> SafetyReport {
    let mut warnings = Vec::new();

    if params.wind_speed_kmh > limits.wind_speed_max_kmh {
        warnings.push(KioskError::safety_limit(
            "wind_speed_kmh",
            params.wind_speed_kmh.to_string(),
            format!("<= {}", limits.wind_speed_max_kmh),
        ));
    }

    if secondary.tube_diameter_mm < limits.tube_diameter_min_mm
        || secondary.tube_diameter_mm > limits.tube_diameter_max_mm
    {
        warnings.push(KioskError::safety_limit(
            "tube_diameter_mm",
            secondary.tube_diameter_mm.to_string(),
            format!("{}..={}", limits.tube_diameter_min_mm, limits.tube_diameter_max_mm),
        ));
    }

    if secondary.anchor_depth_mm < limits.anchor_depth_min_mm {
        warnings.push(KioskError::safety_limit(
            "anchor_depth_mm",
            secondary.anchor_depth_mm.to_string(),
            format!(">= {}", limits.anchor_depth_min_mm),
        ));
    }

    if secondary.upright_count < limits.upright_count_min || secondary.upright_count > limits.upright_count_max {
        warnings.push(KioskError::safety_limit(
            "upright_count",
            secondary.upright_count.to_string(),
            format!("{}..={}", limits.upright_count_min, limits.upright_count_max),
        ));
    }

    SafetyReport { warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::derive_secondary_parameters;

    /// Small kiosk that stays inside every limit: 6 uprights, 800 mm anchors
    fn compliant_params() -> PrimaryParameters {
        PrimaryParameters {
            radius_mm: 400.0,
            upright_height_mm: 1000.0,
            ..Default::default()
        }
    }

    fn check(params: &PrimaryParameters) -> SafetyReport {
        let secondary = derive_secondary_parameters(params).unwrap();
        check_safety_limits(params, &secondary, &SafetyLimits::default())
    }

    #[test]
    fn test_compliant_design_is_clear() {
        let report = check(&compliant_params());
        assert!(report.is_clear(), "unexpected warnings: {:?}", report.warnings);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_wind_limit() {
        let report = check(&PrimaryParameters {
            wind_speed_kmh: 151.0,
            ..compliant_params()
        });
        assert_eq!(report.exceeded_limits(), vec!["wind_speed_kmh"]);

        let at_limit = check(&PrimaryParameters {
            wind_speed_kmh: 150.0,
            ..compliant_params()
        });
        assert!(at_limit.is_clear());
    }

    #[test]
    fn test_shallow_anchor() {
        // 0.8 * 700 = 560 < 600
        let report = check(&PrimaryParameters {
            upright_height_mm: 700.0,
            ..compliant_params()
        });
        assert_eq!(report.exceeded_limits(), vec!["anchor_depth_mm"]);
    }

    #[test]
    fn test_too_many_uprights() {
        // Reference geometry derives 34 uprights
        let report = check(&PrimaryParameters::default());
        assert!(report.exceeded_limits().contains(&"upright_count"));
    }

    #[test]
    fn test_oversized_tube() {
        // 60 * 2.0 * 3.0/1.25 = 288 mm
        let report = check(&PrimaryParameters {
            material: crate::materials::StructuralMaterial::Bamboo,
            wind_speed_kmh: 300.0,
            safety_factor: 3.0,
            ..compliant_params()
        });
        let limits = report.exceeded_limits();
        assert!(limits.contains(&"tube_diameter_mm"));
        assert!(limits.contains(&"wind_speed_kmh"));
    }

    #[test]
    fn test_warnings_do_not_alter_values() {
        let params = PrimaryParameters {
            wind_speed_kmh: 200.0,
            ..compliant_params()
        };
        let secondary = derive_secondary_parameters(&params).unwrap();
        let before = secondary.clone();
        let report = check_safety_limits(&params, &secondary, &SafetyLimits::default());
        assert!(!report.is_clear());
        assert_eq!(secondary, before);
        let err = report.into_result().unwrap_err();
        assert!(err.is_warning());
    }
}
