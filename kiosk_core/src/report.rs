//! # Design Report
//!
//! Plain-text summary of the derived parameters, the cost estimate and the
//! selected retrofits.
//!
//! ## Architecture
//!
//! - The layout is an embedded template with `{{PLACEHOLDER}}` markers
//! - Values are formatted with fixed precision before substitution
//! - No timestamps and no map iteration: identical inputs give byte-identical text
//!
//! ## Example
//!
//! ```rust
//! use kiosk_core::calculations::{derive_secondary_parameters, estimate_costs, CostInput, PrimaryParameters};
//! use kiosk_core::report::generate_report;
//! use kiosk_core::retrofits::{RetrofitId, RetrofitSelection};
//!
//! let params = PrimaryParameters::default();
//! let secondary = derive_secondary_parameters(&params).unwrap();
//! let costs = estimate_costs(&CostInput {
//!     radius_mm: params.radius_mm,
//!     upright_height_mm: params.upright_height_mm,
//!     material: params.material,
//!     anchor_type: secondary.anchor_mode,
//!     cost_optimization: 50,
//! })
//! .unwrap();
//!
//! let retrofits = vec![RetrofitSelection::with_defaults(RetrofitId::DomeCladding)];
//! let text = generate_report(&secondary, &costs, &retrofits);
//! assert!(text.contains("Dome cladding (Linen-hemp)"));
//! ```

use crate::calculations::{CostEstimate, SecondaryParameters};
use crate::retrofits::{apply_cost_multiplier, RetrofitId, RetrofitSelection};

const RULE: &str = "============================================================";

/// Report layout
const REPORT_TEMPLATE: &str = r#"{{RULE}}
KIOSK DESIGN REPORT
{{RULE}}

SECONDARY PARAMETERS (derived)
  - Central ring:    {{RING_DIAMETER}} mm
  - Uprights:        {{UPRIGHT_COUNT}} pieces
  - Tubes:           {{TUBE_DIAMETER}} mm diameter
  - Anchor depth:    {{ANCHOR_DEPTH}} mm
  - Anchor spacing:  {{ANCHOR_SPACING}} mm
  - Anchoring mode:  {{ANCHOR_MODE}}

COST ESTIMATE
  - Steel:           {{STEEL_KG}} kg
  - Concrete:        {{CONCRETE_T}} t
  - Estimated cost:  {{COST}}
{{RETROFITS}}
SAFETY: check every parameter against the applicable standards and site conditions.
"#;

/// Render the report.
///
/// One line per selected retrofit, in the order given, followed by the cost
/// adjusted by their multipliers. The retrofit block is omitted when nothing
/// is selected.
pub fn generate_report(
    secondary: &SecondaryParameters,
    costs: &CostEstimate,
    retrofits: &[RetrofitSelection],
) -> String {
    REPORT_TEMPLATE
        .replace("{{RULE}}", RULE)
        .replace("{{RING_DIAMETER}}", &format!("{:.1}", secondary.ring_diameter_mm))
        .replace("{{UPRIGHT_COUNT}}", &secondary.upright_count.to_string())
        .replace("{{TUBE_DIAMETER}}", &format!("{:.1}", secondary.tube_diameter_mm))
        .replace("{{ANCHOR_DEPTH}}", &format!("{:.1}", secondary.anchor_depth_mm))
        .replace("{{ANCHOR_SPACING}}", &format!("{:.1}", secondary.anchor_spacing_mm))
        .replace("{{ANCHOR_MODE}}", secondary.anchor_mode.code())
        .replace("{{STEEL_KG}}", &format!("{:.1}", costs.steel_kg))
        .replace("{{CONCRETE_T}}", &format!("{:.2}", costs.concrete_tonnes))
        .replace("{{COST}}", &format!("{:.0}", costs.estimated_cost))
        .replace("{{RETROFITS}}", &retrofit_block(costs, retrofits))
}

fn retrofit_block(costs: &CostEstimate, retrofits: &[RetrofitSelection]) -> String {
    if retrofits.is_empty() {
        return String::new();
    }

    let mut block = String::from("\nRETROFITS\n");
    for selection in retrofits {
        block.push_str(&format!("  + {}\n", selection.label()));
    }

    let ids: Vec<RetrofitId> = retrofits.iter().map(|s| s.id).collect();
    let adjusted = apply_cost_multiplier(costs.estimated_cost, &ids);
    block.push_str(&format!("  - Adjusted cost:   {:.0}\n", adjusted.round()));
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::AnchorType;

    fn secondary() -> SecondaryParameters {
        SecondaryParameters {
            ring_diameter_mm: 1000.0,
            upright_count: 34,
            tube_diameter_mm: 50.0,
            anchor_depth_mm: 1760.0,
            anchor_spacing_mm: 499.0,
            anchor_mode: AnchorType::IsolatedPlots,
        }
    }

    fn costs() -> CostEstimate {
        CostEstimate {
            steel_kg: 48.4,
            concrete_tonnes: 1100.0,
            estimated_cost: 55097.0,
        }
    }

    #[test]
    fn test_golden_report_without_retrofits() {
        let expected = "\
============================================================
KIOSK DESIGN REPORT
============================================================

SECONDARY PARAMETERS (derived)
  - Central ring:    1000.0 mm
  - Uprights:        34 pieces
  - Tubes:           50.0 mm diameter
  - Anchor depth:    1760.0 mm
  - Anchor spacing:  499.0 mm
  - Anchoring mode:  isolated_plots

COST ESTIMATE
  - Steel:           48.4 kg
  - Concrete:        1100.00 t
  - Estimated cost:  55097

SAFETY: check every parameter against the applicable standards and site conditions.
";
        assert_eq!(generate_report(&secondary(), &costs(), &[]), expected);
    }

    #[test]
    fn test_retrofit_lines_and_adjusted_cost() {
        let retrofits = vec![
            RetrofitSelection::with_defaults(RetrofitId::SlidingPanels),
            RetrofitSelection::with_defaults(RetrofitId::DomeCladding),
        ];
        let text = generate_report(&secondary(), &costs(), &retrofits);
        assert!(text.contains("\nRETROFITS\n"));
        assert!(text.contains("  + Circular sliding panels (Composite)\n"));
        assert!(text.contains("  + Dome cladding (Linen-hemp)\n"));
        // 55097 * 1.2 * 1.15 = 76033.86
        assert!(text.contains("  - Adjusted cost:   76034\n"));
        // Retrofit lines keep the caller's order
        let panels = text.find("Circular sliding panels").unwrap();
        let cladding = text.find("Dome cladding").unwrap();
        assert!(panels < cladding);
    }

    #[test]
    fn test_report_is_deterministic() {
        let retrofits = vec![RetrofitSelection::with_defaults(RetrofitId::OpenStand)];
        let first = generate_report(&secondary(), &costs(), &retrofits);
        let second = generate_report(&secondary(), &costs(), &retrofits);
        assert_eq!(first, second);
        assert!(!first.contains("{{"));
    }
}
