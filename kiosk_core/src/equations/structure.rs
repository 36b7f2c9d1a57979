//! # Structural Sizing Formulas
//!
//! Heuristic sizing of the four-petal frame from its primary dimensions.
//!
//! ## Notation
//!
//! - `R` = Petal radius (mm)
//! - `H` = Upright height (mm)
//! - `Hd` = Dome height (mm)
//! - `n` = Number of uprights
//! - `v` = Design wind speed (km/h)
//! - `SF` = Safety factor

use std::f64::consts::PI;

/// Central ring clamp range (mm)
pub const RING_DIAMETER_MIN_MM: f64 = 200.0;
pub const RING_DIAMETER_MAX_MM: f64 = 1000.0;

/// Circumference served by one upright (mm)
pub const CIRCUMFERENCE_PER_UPRIGHT_MM: f64 = 400.0;

/// Fewest uprights that keep the ring stable
pub const MIN_UPRIGHTS: u32 = 4;

/// Wind speed below which tubes are not upsized (km/h)
pub const BASELINE_WIND_KMH: f64 = 100.0;

/// Safety factor at which tube size is not adjusted
pub const BASELINE_SAFETY_FACTOR: f64 = 1.25;

/// Anchor depth as a fraction of upright height
pub const ANCHOR_DEPTH_RATIO: f64 = 0.8;

/// Anchor circle lies this far outside the petal radius (mm)
pub const ANCHOR_RING_OFFSET_MM: f64 = 500.0;

/// Central ring (keystone) diameter.
///
/// # Formula
/// - D = clamp(0.4·R + 0.2·Hd, 200, 1000)
#[inline]
pub fn ring_diameter_mm(radius_mm: f64, dome_height_mm: f64) -> f64 {
    (radius_mm * 0.4 + dome_height_mm * 0.2).clamp(RING_DIAMETER_MIN_MM, RING_DIAMETER_MAX_MM)
}

/// Number of uprights: one per ~400 mm of petal circumference, minimum 4.
///
/// # Formula
/// - n = max(4, ⌊2πR / 400⌋)
#[inline]
pub fn upright_count(radius_mm: f64) -> u32 {
    let per_circumference = (2.0 * PI * radius_mm / CIRCUMFERENCE_PER_UPRIGHT_MM).floor();
    // Validated radii stay far below u32::MAX uprights; the cast only saturates on unchecked input
    (per_circumference as u32).max(MIN_UPRIGHTS)
}

/// Wind amplification above the 100 km/h baseline.
///
/// # Formula
/// - k = 1 + max(0, (v - 100) / 200)
#[inline]
pub fn wind_factor(wind_speed_kmh: f64) -> f64 {
    1.0 + ((wind_speed_kmh - BASELINE_WIND_KMH) / 200.0).max(0.0)
}

/// Tube diameter scaled by wind and safety factor.
///
/// # Formula
/// - d = d_base · k · (SF / 1.25)
#[inline]
pub fn tube_diameter_mm(tube_base_mm: f64, wind_speed_kmh: f64, safety_factor: f64) -> f64 {
    tube_base_mm * wind_factor(wind_speed_kmh) * (safety_factor / BASELINE_SAFETY_FACTOR)
}

/// Anchor embedment depth.
///
/// # Formula
/// - h_a = 0.8·H
#[inline]
pub fn anchor_depth_mm(upright_height_mm: f64) -> f64 {
    upright_height_mm * ANCHOR_DEPTH_RATIO
}

/// Spacing between consecutive anchors on the anchor circle.
///
/// # Formula
/// - s = 2π(R + 500) / n
#[inline]
pub fn anchor_spacing_mm(radius_mm: f64, upright_count: u32) -> f64 {
    2.0 * PI * (radius_mm + ANCHOR_RING_OFFSET_MM) / f64::from(upright_count)
}
