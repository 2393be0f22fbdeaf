//! Conversion between zoom multipliers and device zoom levels.

use super::types::{MAX_ZOOM_LEVEL, MAX_ZOOM_MULTIPLIER, MIN_ZOOM_LEVEL, MIN_ZOOM_MULTIPLIER};

/// Direction of a stepped zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Convert a multiplier (1.0x to 30.0x) to a device level (0 to 16384).
///
/// Out-of-range multipliers are clamped; the result is truncated.
pub fn multiplier_to_level(multiplier: f64) -> u16 {
    let multiplier = multiplier.clamp(MIN_ZOOM_MULTIPLIER, MAX_ZOOM_MULTIPLIER);
    let level = ((multiplier / MAX_ZOOM_MULTIPLIER) * f64::from(MAX_ZOOM_LEVEL)).floor();
    level.clamp(f64::from(MIN_ZOOM_LEVEL), f64::from(MAX_ZOOM_LEVEL)) as u16
}

/// Convert a device level to a multiplier rounded to one decimal place.
///
/// Halfway values round to the even tenth. Never reports less than 1.0x, even at level 0.
pub fn level_to_multiplier(level: u16) -> f64 {
    let multiplier = (f64::from(level) / f64::from(MAX_ZOOM_LEVEL)) * MAX_ZOOM_MULTIPLIER;
    let multiplier = multiplier.max(MIN_ZOOM_MULTIPLIER);
    (multiplier * 10.0).round_ties_even() / 10.0
}

/// Move `current` one step in `direction`, staying inside the device range.
///
/// Stepping past a bound stops at the bound; stepping from a bound outward is a no-op.
pub fn step_level(current: u16, direction: ZoomDirection, step: u16) -> u16 {
    match direction {
        ZoomDirection::In if current < MAX_ZOOM_LEVEL => current.saturating_add(step).min(MAX_ZOOM_LEVEL),
        ZoomDirection::Out if current > MIN_ZOOM_LEVEL => current.saturating_sub(step).max(MIN_ZOOM_LEVEL),
        _ => current,
    }
}
