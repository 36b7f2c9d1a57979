//! # Materials
//!
//! Structural materials for the kiosk frame and the anchoring strategies for
//! its foundations.
//!
//! ## Material Types
//!
//! - **Galvanized steel**: permanent structures, baseline tube size
//! - **Bamboo**: temporary structures, thicker tubes but far less steel and concrete
//!
//! ## Example
//!
//! ```rust
//! use kiosk_core::materials::{AnchorType, StructuralMaterial};
//!
//! let mat = StructuralMaterial::from_str_flexible("Bambou (temporaire)").unwrap();
//! assert_eq!(mat, StructuralMaterial::Bamboo);
//! assert_eq!(mat.tube_base_mm(), 60.0);
//!
//! assert_eq!(AnchorType::from_spacing_mm(150.0), AnchorType::ContinuousSemicircle);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{KioskError, KioskResult};

/// Anchor spacing below which isolated plots merge into a continuous footing (mm)
pub const CONTINUOUS_ANCHOR_SPACING_MM: f64 = 200.0;

/// Frame material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralMaterial {
    /// Hot-dip galvanized steel tube
    SteelGalvanized,
    /// Bamboo culms
    Bamboo,
}

impl StructuralMaterial {
    /// All material variants for UI selection
    pub const ALL: [StructuralMaterial; 2] = [StructuralMaterial::SteelGalvanized, StructuralMaterial::Bamboo];

    /// Stable identifier (matches the JSON form)
    pub fn code(&self) -> &'static str {
        match self {
            StructuralMaterial::SteelGalvanized => "steel_galvanized",
            StructuralMaterial::Bamboo => "bamboo",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StructuralMaterial::SteelGalvanized => "Galvanized steel",
            StructuralMaterial::Bamboo => "Bamboo",
        }
    }

    /// Parse from codes or host dialog labels.
    ///
    /// Accepts "steel_galvanized", "Acier galvanisé", "Acier galvanisé (permanent)",
    /// "bamboo", "Bambou (temporaire)" and similar spellings.
    pub fn from_str_flexible(s: &str) -> KioskResult<Self> {
        // Dialog labels carry a "(permanent)" / "(temporaire)" suffix
        let head = s.split('(').next().unwrap_or(s);
        let normalized = head.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "steel_galvanized" | "galvanized_steel" | "steel" | "acier_galvanisé" | "acier_galvanise"
            | "acier" => Ok(StructuralMaterial::SteelGalvanized),
            "bamboo" | "bambou" => Ok(StructuralMaterial::Bamboo),
            _ => Err(KioskError::invalid_parameter(
                "material",
                s,
                "Supported materials are steel_galvanized and bamboo",
            )),
        }
    }

    /// Base tube diameter before wind and safety scaling (mm).
    ///
    /// Bamboo culms are thicker than steel tube for the same duty.
    pub fn tube_base_mm(&self) -> f64 {
        match self {
            StructuralMaterial::SteelGalvanized => 50.0,
            StructuralMaterial::Bamboo => 60.0,
        }
    }

    /// Multiplier on the base steel mass estimate
    pub fn steel_factor(&self) -> f64 {
        match self {
            StructuralMaterial::SteelGalvanized => 1.0,
            StructuralMaterial::Bamboo => 0.3,
        }
    }

    /// Multiplier on the base concrete estimate
    pub fn concrete_factor(&self) -> f64 {
        match self {
            StructuralMaterial::SteelGalvanized => 1.0,
            StructuralMaterial::Bamboo => 0.7,
        }
    }

    /// Lowest safety factor recommended for this material
    pub fn recommended_min_safety_factor(&self) -> f64 {
        match self {
            StructuralMaterial::SteelGalvanized => 1.25,
            StructuralMaterial::Bamboo => 1.5,
        }
    }

    /// Short usage note shown with sizing advice
    pub fn usage_note(&self) -> &'static str {
        match self {
            StructuralMaterial::SteelGalvanized => {
                "Galvanized steel suits permanent use; a moderate safety factor is acceptable."
            }
            StructuralMaterial::Bamboo => {
                "Bamboo is a temporary solution; use a higher safety factor and inspect regularly."
            }
        }
    }
}

impl std::fmt::Display for StructuralMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Foundation strategy for the uprights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorType {
    /// One concrete plot per upright
    IsolatedPlots,
    /// Continuous semicircular footing under each petal
    ContinuousSemicircle,
}

impl AnchorType {
    /// All anchor variants for UI selection
    pub const ALL: [AnchorType; 2] = [AnchorType::IsolatedPlots, AnchorType::ContinuousSemicircle];

    /// Anchoring mode implied by the spacing between consecutive anchors.
    ///
    /// Plots closer than 200 mm are merged into a continuous footing.
    pub fn from_spacing_mm(spacing_mm: f64) -> Self {
        if spacing_mm < CONTINUOUS_ANCHOR_SPACING_MM {
            AnchorType::ContinuousSemicircle
        } else {
            AnchorType::IsolatedPlots
        }
    }

    /// Stable identifier (matches the JSON form)
    pub fn code(&self) -> &'static str {
        match self {
            AnchorType::IsolatedPlots => "isolated_plots",
            AnchorType::ContinuousSemicircle => "continuous_semicircle",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            AnchorType::IsolatedPlots => "Isolated plots",
            AnchorType::ContinuousSemicircle => "Continuous semicircle",
        }
    }
}

impl std::fmt::Display for AnchorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_parsing() {
        assert_eq!(
            StructuralMaterial::from_str_flexible("steel_galvanized").unwrap(),
            StructuralMaterial::SteelGalvanized
        );
        assert_eq!(
            StructuralMaterial::from_str_flexible("Acier galvanisé (permanent)").unwrap(),
            StructuralMaterial::SteelGalvanized
        );
        assert_eq!(
            StructuralMaterial::from_str_flexible("Bambou").unwrap(),
            StructuralMaterial::Bamboo
        );
        assert_eq!(
            StructuralMaterial::from_str_flexible("  BAMBOO ").unwrap(),
            StructuralMaterial::Bamboo
        );
    }

    #[test]
    fn test_unknown_material_rejected() {
        let err = StructuralMaterial::from_str_flexible("aluminium").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_bamboo_factors() {
        let bamboo = StructuralMaterial::Bamboo;
        assert_eq!(bamboo.tube_base_mm(), 60.0);
        assert_eq!(bamboo.steel_factor(), 0.3);
        assert_eq!(bamboo.concrete_factor(), 0.7);
        assert_eq!(StructuralMaterial::SteelGalvanized.tube_base_mm(), 50.0);
    }

    #[test]
    fn test_anchor_from_spacing() {
        assert_eq!(AnchorType::from_spacing_mm(199.9), AnchorType::ContinuousSemicircle);
        assert_eq!(AnchorType::from_spacing_mm(200.0), AnchorType::IsolatedPlots);
        assert_eq!(AnchorType::from_spacing_mm(1000.0), AnchorType::IsolatedPlots);
    }

    #[test]
    fn test_serialization_names() {
        assert_eq!(
            serde_json::to_string(&StructuralMaterial::SteelGalvanized).unwrap(),
            "\"steel_galvanized\""
        );
        assert_eq!(
            serde_json::to_string(&AnchorType::ContinuousSemicircle).unwrap(),
            "\"continuous_semicircle\""
        );
        let parsed: StructuralMaterial = serde_json::from_str("\"bamboo\"").unwrap();
        assert_eq!(parsed, StructuralMaterial::Bamboo);
    }
}
