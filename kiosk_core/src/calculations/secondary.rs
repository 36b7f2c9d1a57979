//! # Secondary Parameters
//!
//! Derives the structural members of the kiosk from its primary dimensions:
//! central ring, uprights, tube size and anchoring.
//!
//! Millimeter values are rounded to one decimal place. The anchoring mode is
//! never set directly; it follows from the computed anchor spacing.
//!
//! ## Example
//!
//! ```rust
//! use kiosk_core::calculations::{derive_secondary_parameters, PrimaryParameters};
//! use kiosk_core::materials::AnchorType;
//!
//! let params = PrimaryParameters::default();
//! let secondary = derive_secondary_parameters(&params).unwrap();
//!
//! assert_eq!(secondary.ring_diameter_mm, 1000.0);
//! assert_eq!(secondary.upright_count, 34);
//! assert_eq!(secondary.tube_diameter_mm, 50.0);
//! assert_eq!(secondary.anchor_depth_mm, 1760.0);
//! assert_eq!(secondary.anchor_mode, AnchorType::IsolatedPlots);
//! ```

use serde::{Deserialize, Serialize};

use super::PrimaryParameters;
use crate::equations::{self, round_to};
use crate::errors::KioskResult;
use crate::materials::AnchorType;

/// Derived structural parameters.
///
/// Recomputed on every call; never persisted or mutated in place.
///
/// ## JSON Example
///
/// ```json
/// {
///   "ring_diameter_mm": 1000.0,
///   "upright_count": 34,
///   "tube_diameter_mm": 50.0,
///   "anchor_depth_mm": 1760.0,
///   "anchor_spacing_mm": 499.0,
///   "anchor_mode": "isolated_plots"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryParameters {
    /// Central ring (keystone) diameter, within [200, 1000] mm
    pub ring_diameter_mm: f64,

    /// Number of uprights (at least 4)
    pub upright_count: u32,

    /// Frame tube diameter in millimeters
    pub tube_diameter_mm: f64,

    /// Anchor embedment depth in millimeters
    pub anchor_depth_mm: f64,

    /// Spacing between consecutive anchors in millimeters
    pub anchor_spacing_mm: f64,

    /// Anchoring mode implied by the spacing
    pub anchor_mode: AnchorType,
}

/// Derive the secondary parameters from validated primary parameters.
///
/// # Arguments
///
/// * `params` - Primary design parameters
///
/// # Returns
///
/// * `Ok(SecondaryParameters)` - Derived members
/// * `Err(KioskError::InvalidParameter)` - If a primary input is out of domain
pub fn derive_secondary_parameters(params: &PrimaryParameters) -> KioskResult<SecondaryParameters> {
    params.validate()?;

    let ring_diameter = equations::ring_diameter_mm(params.radius_mm, params.dome_height_mm);
    let upright_count = equations::upright_count(params.radius_mm);
    let tube_diameter = equations::tube_diameter_mm(
        params.material.tube_base_mm(),
        params.wind_speed_kmh,
        params.safety_factor,
    );
    let anchor_depth = equations::anchor_depth_mm(params.upright_height_mm);
    let anchor_spacing = equations::anchor_spacing_mm(params.radius_mm, upright_count);
    let anchor_mode = AnchorType::from_spacing_mm(anchor_spacing);

    tracing::debug!(
        radius_mm = params.radius_mm,
        upright_count,
        tube_diameter_mm = tube_diameter,
        anchor_mode = anchor_mode.code(),
        "derived secondary parameters"
    );

    Ok(SecondaryParameters {
        ring_diameter_mm: round_to(ring_diameter, 1),
        upright_count,
        tube_diameter_mm: round_to(tube_diameter, 1),
        anchor_depth_mm: round_to(anchor_depth, 1),
        anchor_spacing_mm: round_to(anchor_spacing, 1),
        anchor_mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::StructuralMaterial;

    fn reference_params() -> PrimaryParameters {
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

    #[test]
    fn test_reference_scenario() {
        let result = derive_secondary_parameters(&reference_params()).unwrap();
        assert_eq!(result.ring_diameter_mm, 1000.0);
        assert_eq!(result.upright_count, 34);
        assert_eq!(result.tube_diameter_mm, 50.0);
        assert_eq!(result.anchor_depth_mm, 1760.0);
        // 2π*2700/34 = 498.96
        assert!((result.anchor_spacing_mm - 499.0).abs() < 0.05);
        assert_eq!(result.anchor_mode, AnchorType::IsolatedPlots);
    }

    #[test]
    fn test_ring_diameter_always_clamped() {
        let mut radius = 1.0;
        while radius <= 10_000.0 {
            let params = PrimaryParameters {
                radius_mm: radius,
                dome_height_mm: 10.0,
                ..reference_params()
            };
            let result = derive_secondary_parameters(&params).unwrap();
            assert!(
                (200.0..=1000.0).contains(&result.ring_diameter_mm),
                "radius {} gave ring {}",
                radius,
                result.ring_diameter_mm
            );
            assert!(result.upright_count >= 4);
            radius += 97.0;
        }
    }

    #[test]
    fn test_small_radius_uses_minimum_uprights() {
        let params = PrimaryParameters {
            radius_mm: 50.0,
            ..reference_params()
        };
        let result = derive_secondary_parameters(&params).unwrap();
        assert_eq!(result.upright_count, 4);
        assert_eq!(result.ring_diameter_mm, 720.0);
    }

    #[test]
    fn test_derivation_is_repeatable() {
        let params = reference_params();
        let first = derive_secondary_parameters(&params).unwrap();
        let second = derive_secondary_parameters(&params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tube_diameter_monotonic_in_wind() {
        let mut previous = 0.0;
        for wind in (0..=300).step_by(10) {
            let params = PrimaryParameters {
                wind_speed_kmh: f64::from(wind),
                ..reference_params()
            };
            let tube = derive_secondary_parameters(&params).unwrap().tube_diameter_mm;
            assert!(tube >= previous, "wind {} decreased tube to {}", wind, tube);
            if wind <= 100 {
                assert_eq!(tube, 50.0);
            }
            previous = tube;
        }
    }

    #[test]
    fn test_bamboo_tube_and_safety_scaling() {
        let params = PrimaryParameters {
            material: StructuralMaterial::Bamboo,
            wind_speed_kmh: 80.0,
            safety_factor: 1.5,
            ..reference_params()
        };
        let result = derive_secondary_parameters(&params).unwrap();
        // 60 * 1.0 * 1.5/1.25 = 72
        assert_eq!(result.tube_diameter_mm, 72.0);
    }

    #[test]
    fn test_anchor_mode_follows_spacing() {
        // With n = max(4, floor(2πR/400)) the derived spacing 2π(R+500)/n always
        // stays above 400 mm, so only isolated plots come out of the derivation.
        // The continuous branch is exercised through AnchorType::from_spacing_mm.
        for radius_mm in [1.0, 50.0, 400.0, 2200.0, 50_000.0] {
            let params = PrimaryParameters {
                radius_mm,
                ..reference_params()
            };
            let result = derive_secondary_parameters(&params).unwrap();
            assert!(result.anchor_spacing_mm > 400.0, "radius {}", radius_mm);
            assert_eq!(result.anchor_mode, AnchorType::IsolatedPlots);
            assert_eq!(
                result.anchor_mode,
                AnchorType::from_spacing_mm(result.anchor_spacing_mm)
            );
        }
    }

    #[test]
    fn test_invalid_input_rejected() {
        let params = PrimaryParameters {
            upright_height_mm: 0.0,
            ..reference_params()
        };
        let err = derive_secondary_parameters(&params).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }
}
