//! # Kiosk Sizing Equations
//!
//! Every formula used by the parameter engine lives here as a small pure
//! function, so the derivation and the tests read against the same
//! definitions.
//!
//! ## Modules
//!
//! - [`structure`] - Ring, uprights, tubes and anchoring
//! - [`cost`] - Material quantity and price heuristics
//!
//! ## Units
//!
//! - **Lengths**: millimeters
//! - **Wind speed**: km/h
//! - **Steel**: kg, **concrete**: tonnes

pub mod cost;
pub mod structure;

pub use cost::{base_concrete_tonnes, base_steel_kg, material_cost};
pub use structure::{
    anchor_depth_mm, anchor_spacing_mm, ring_diameter_mm, tube_diameter_mm, upright_count, wind_factor,
};

/// Round to a fixed number of decimal places (half away from zero).
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1759.96, 1), 1760.0);
        assert_eq!(round_to(12.344, 2), 12.34);
        assert_eq!(round_to(1379.6, 0), 1380.0);
    }
}
