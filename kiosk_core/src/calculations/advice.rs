//! # Sizing Advice
//!
//! Quick, non-normative guidance for the anchoring plots and the safety factor
//! given the wind speed and the material. It complements, and never replaces,
//! a code-based structural check for the actual site.

use serde::{Deserialize, Serialize};

use super::PrimaryParameters;
use crate::equations;
use crate::errors::KioskResult;

/// Wind speed above which deeper, heavier anchors are advised (km/h)
pub const HIGH_WIND_ADVICE_KMH: f64 = 120.0;

/// Advice derived from wind, material and safety factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingAdvice {
    /// Wind amplification applied to tube sizing
    pub wind_factor: f64,

    /// Suggested increase of the anchoring plot size, in percent, rounded to
    /// the nearest whole percent (130 km/h gives 15, not 14)
    pub plot_increase_pct: u32,

    /// Safety factor recommended for the material (never below the input)
    pub recommended_safety_factor: f64,

    /// Material usage note
    pub material_note: String,

    /// Practical suggestions, most specific first
    pub suggestions: Vec<String>,
}

/// Build sizing advice for validated primary parameters.
pub fn sizing_advice(params: &PrimaryParameters) -> KioskResult<SizingAdvice> {
    params.validate()?;

    let wind_factor = equations::wind_factor(params.wind_speed_kmh);
    let plot_increase_pct = ((wind_factor - 1.0) * 100.0).round() as u32;
    let recommended_safety_factor = params
        .safety_factor
        .max(params.material.recommended_min_safety_factor());

    let mut suggestions = Vec::new();
    if params.wind_speed_kmh > HIGH_WIND_ADVICE_KMH {
        suggestions.push(
            "Above 120 km/h, increase embedment depth and concrete volume (x1.3 to x2.0).".to_string(),
        );
    }
    if params.material == crate::materials::StructuralMaterial::Bamboo {
        suggestions.push("For bamboo, add extra anchors and inspect after every storm.".to_string());
    }
    suggestions.push("Verify the structure with code-based calculations for the actual site.".to_string());

    Ok(SizingAdvice {
        wind_factor,
        plot_increase_pct,
        recommended_safety_factor,
        material_note: params.material.usage_note().to_string(),
        suggestions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::StructuralMaterial;

    #[test]
    fn test_baseline_wind_needs_no_increase() {
        let advice = sizing_advice(&PrimaryParameters::default()).unwrap();
        assert_eq!(advice.wind_factor, 1.0);
        assert_eq!(advice.plot_increase_pct, 0);
        assert_eq!(advice.recommended_safety_factor, 1.25);
        assert_eq!(advice.suggestions.len(), 1);
    }

    #[test]
    fn test_high_wind_advice() {
        let advice = sizing_advice(&PrimaryParameters {
            wind_speed_kmh: 130.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(advice.plot_increase_pct, 15);
        assert!(advice.suggestions[0].contains("120 km/h"));
    }

    #[test]
    fn test_plot_increase_rounds_to_nearest_percent() {
        for (wind_speed_kmh, expected) in [(102.0, 1), (130.0, 15), (190.0, 45), (300.0, 100)] {
            let advice = sizing_advice(&PrimaryParameters {
                wind_speed_kmh,
                ..Default::default()
            })
            .unwrap();
            assert_eq!(advice.plot_increase_pct, expected, "wind {}", wind_speed_kmh);
        }
    }

    #[test]
    fn test_bamboo_raises_safety_factor() {
        let advice = sizing_advice(&PrimaryParameters {
            material: StructuralMaterial::Bamboo,
            safety_factor: 1.3,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(advice.recommended_safety_factor, 1.5);
        assert!(advice.material_note.contains("temporary"));
        assert!(advice.suggestions.iter().any(|s| s.contains("bamboo")));
    }

    #[test]
    fn test_higher_input_safety_factor_kept() {
        let advice = sizing_advice(&PrimaryParameters {
            safety_factor: 2.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(advice.recommended_safety_factor, 2.0);
    }
}
