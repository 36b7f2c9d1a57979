//! # Presets
//!
//! Named configurations that seed the material, wind speed and safety factor
//! of a design. The catalog is fixed at compile time and referenced by name.
//!
//! Applying a preset does not recompute anything: the caller seeds the
//! primary parameters and then derives the secondary parameters again.
//!
//! ## Example
//!
//! ```rust
//! use kiosk_core::calculations::PrimaryParameters;
//! use kiosk_core::materials::StructuralMaterial;
//! use kiosk_core::presets::apply_preset;
//!
//! let preset = apply_preset("Temporaire (Bambou)").unwrap();
//! let params = preset.seed(&PrimaryParameters::default());
//! assert_eq!(params.material, StructuralMaterial::Bamboo);
//! assert_eq!(params.safety_factor, 1.5);
//!
//! assert!(apply_preset("Hybride").is_err());
//! ```

use serde::Serialize;

use crate::calculations::PrimaryParameters;
use crate::errors::{KioskError, KioskResult};
use crate::materials::{AnchorType, StructuralMaterial};

/// Immutable named design preset.
///
/// Serialize-only: presets are referenced by name in saved sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    /// Catalog name (e.g., "Permanent (Acier)")
    pub name: &'static str,

    /// Frame material
    pub material: StructuralMaterial,

    /// Safety factor (>= 1.0)
    pub safety_factor: f64,

    /// Design wind speed in km/h
    pub wind_speed_kmh: f64,

    /// Intended anchoring strategy
    pub anchor_type: AnchorType,

    /// Cost-optimization weight, 0-100
    pub cost_optimization: u8,

    /// Free-text description
    pub description: &'static str,
}

impl Preset {
    /// Return primary parameters carrying this preset's material, wind speed
    /// and safety factor. Geometry is left untouched.
    pub fn seed(&self, params: &PrimaryParameters) -> PrimaryParameters {
        PrimaryParameters {
            material: self.material,
            wind_speed_kmh: self.wind_speed_kmh,
            safety_factor: self.safety_factor,
            ..params.clone()
        }
    }
}

/// Permanent structure: galvanized steel, robust isolated plots.
pub const PERMANENT_STEEL: Preset = Preset {
    name: "Permanent (Acier)",
    material: StructuralMaterial::SteelGalvanized,
    safety_factor: 1.25,
    wind_speed_kmh: 100.0,
    anchor_type: AnchorType::IsolatedPlots,
    cost_optimization: 50,
    description: "Permanent structure, galvanized steel, robust anchoring",
};

/// Temporary structure: bamboo, economical continuous anchoring.
pub const TEMPORARY_BAMBOO: Preset = Preset {
    name: "Temporaire (Bambou)",
    material: StructuralMaterial::Bamboo,
    safety_factor: 1.5,
    wind_speed_kmh: 80.0,
    anchor_type: AnchorType::ContinuousSemicircle,
    cost_optimization: 70,
    description: "Lightweight structure, bamboo, economical anchoring",
};

static PRESETS: [Preset; 2] = [PERMANENT_STEEL, TEMPORARY_BAMBOO];

/// All presets in catalog order.
pub fn list_presets() -> &'static [Preset] {
    &PRESETS
}

/// Look up a preset by its exact catalog name.
///
/// # Returns
///
/// * `Ok(&Preset)` - The immutable preset record
/// * `Err(KioskError::UnknownPreset)` - Name not in the catalog
pub fn apply_preset(name: &str) -> KioskResult<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| KioskError::unknown_preset(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let names: Vec<_> = list_presets().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Permanent (Acier)", "Temporaire (Bambou)"]);
    }

    #[test]
    fn test_permanent_preset() {
        let preset = apply_preset("Permanent (Acier)").unwrap();
        assert_eq!(preset.material, StructuralMaterial::SteelGalvanized);
        assert_eq!(preset.safety_factor, 1.25);
        assert_eq!(preset.wind_speed_kmh, 100.0);
        assert_eq!(preset.anchor_type, AnchorType::IsolatedPlots);
        assert_eq!(preset.cost_optimization, 50);
    }

    #[test]
    fn test_unknown_preset() {
        let err = apply_preset("permanent (acier)").unwrap_err();
        assert_eq!(err, KioskError::unknown_preset("permanent (acier)"));
    }

    #[test]
    fn test_seed_keeps_geometry() {
        let params = PrimaryParameters {
            radius_mm: 3000.0,
            dome_height_mm: 2800.0,
            ..Default::default()
        };
        let seeded = TEMPORARY_BAMBOO.seed(&params);
        assert_eq!(seeded.radius_mm, 3000.0);
        assert_eq!(seeded.dome_height_mm, 2800.0);
        assert_eq!(seeded.wind_speed_kmh, 80.0);
        assert_eq!(seeded.material, StructuralMaterial::Bamboo);
    }

    #[test]
    fn test_presets_are_valid_inputs() {
        for preset in list_presets() {
            assert!(preset.safety_factor >= 1.0);
            assert!(preset.cost_optimization <= 100);
            assert!(preset.seed(&PrimaryParameters::default()).validate().is_ok());
        }
    }

    #[test]
    fn test_preset_serialization() {
        let json = serde_json::to_string(&PERMANENT_STEEL).unwrap();
        assert!(json.contains("\"anchor_type\":\"isolated_plots\""));
    }
}
