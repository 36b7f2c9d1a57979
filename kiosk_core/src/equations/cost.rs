//! # Cost Heuristics
//!
//! Rough quantity take-off for budgeting. These are not structural quantities;
//! they only rank design options against each other.

/// Base steel mass before material and optimization factors.
///
/// # Formula
/// - m = (R / 100) · (H / 1000)
#[inline]
pub fn base_steel_kg(radius_mm: f64, upright_height_mm: f64) -> f64 {
    radius_mm / 100.0 * upright_height_mm / 1000.0
}

/// Base concrete quantity before material and optimization factors.
///
/// # Formula
/// - c = 0.5 · H
#[inline]
pub fn base_concrete_tonnes(upright_height_mm: f64) -> f64 {
    upright_height_mm * 0.5
}

/// Priced material total (unrounded).
#[inline]
pub fn material_cost(steel_kg: f64, concrete_tonnes: f64, steel_unit_price: f64, concrete_unit_price: f64) -> f64 {
    steel_kg * steel_unit_price + concrete_tonnes * concrete_unit_price
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_quantities() {
        assert!((base_steel_kg(2200.0, 2200.0) - 48.4).abs() < 1e-9);
        assert_eq!(base_concrete_tonnes(2200.0), 1100.0);
    }

    #[test]
    fn test_material_cost() {
        assert_eq!(material_cost(10.0, 2.0, 2.0, 50.0), 120.0);
    }
}
