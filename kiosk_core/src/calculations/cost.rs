//! # Cost Estimate
//!
//! Rough steel, concrete and price estimate for the base structure, before
//! any retrofit.
//!
//! ## Example
//!
//! ```rust
//! use kiosk_core::calculations::cost::{estimate_costs, CostInput};
//! use kiosk_core::materials::{AnchorType, StructuralMaterial};
//!
//! let input = CostInput {
//!     radius_mm: 2200.0,
//!     upright_height_mm: 2200.0,
//!     material: StructuralMaterial::SteelGalvanized,
//!     anchor_type: AnchorType::IsolatedPlots,
//!     cost_optimization: 50,
//! };
//! let estimate = estimate_costs(&input).unwrap();
//! assert_eq!(estimate.steel_kg, 48.4);
//! assert_eq!(estimate.estimated_cost, 55097.0);
//! ```

use serde::{Deserialize, Serialize};

use super::validate_positive;
use crate::equations::{self, round_to};
use crate::errors::{KioskError, KioskResult};
use crate::materials::{AnchorType, StructuralMaterial};
use crate::settings::CostModel;

/// Input parameters for a cost estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInput {
    /// Petal radius in millimeters
    pub radius_mm: f64,

    /// Upright height in millimeters
    pub upright_height_mm: f64,

    /// Frame material
    pub material: StructuralMaterial,

    /// Anchoring strategy (carried for reporting; does not change the estimate)
    pub anchor_type: AnchorType,

    /// Cost-optimization weight, 0 (ignore cost) to 100 (minimize cost)
    pub cost_optimization: u8,
}

impl CostInput {
    /// Validate input parameters.
    pub fn validate(&self) -> KioskResult<()> {
        validate_positive("radius_mm", self.radius_mm)?;
        validate_positive("upright_height_mm", self.upright_height_mm)?;
        if self.cost_optimization > 100 {
            return Err(KioskError::invalid_parameter(
                "cost_optimization",
                self.cost_optimization.to_string(),
                "Cost optimization must be between 0 and 100",
            ));
        }
        Ok(())
    }
}

/// Estimated quantities and price.
///
/// ## JSON Example
///
/// ```json
/// {
///   "steel_kg": 48.4,
///   "concrete_tonnes": 1100.0,
///   "estimated_cost": 55097.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Steel mass in kg (one decimal)
    pub steel_kg: f64,

    /// Concrete in tonnes (two decimals)
    pub concrete_tonnes: f64,

    /// Estimated cost in currency units, rounded to a whole unit
    pub estimated_cost: f64,
}

/// Estimate costs with the reference cost model.
pub fn estimate_costs(input: &CostInput) -> KioskResult<CostEstimate> {
    estimate_costs_with(input, &CostModel::default())
}

/// Estimate costs with an explicit cost model.
///
/// The optimization discount applies only strictly above the model's
/// threshold. The price is computed from the unrounded quantities.
pub fn estimate_costs_with(input: &CostInput, model: &CostModel) -> KioskResult<CostEstimate> {
    input.validate()?;

    let mut steel_kg = equations::base_steel_kg(input.radius_mm, input.upright_height_mm);
    let mut concrete_tonnes = equations::base_concrete_tonnes(input.upright_height_mm);

    steel_kg *= input.material.steel_factor();
    concrete_tonnes *= input.material.concrete_factor();

    if input.cost_optimization > model.optimization_threshold {
        steel_kg *= model.steel_discount;
        concrete_tonnes *= model.concrete_discount;
    }

    let cost = equations::material_cost(
        steel_kg,
        concrete_tonnes,
        model.steel_unit_price,
        model.concrete_unit_price,
    );

    Ok(CostEstimate {
        steel_kg: round_to(steel_kg, 1),
        concrete_tonnes: round_to(concrete_tonnes, 2),
        estimated_cost: cost.round(),
    })
}
