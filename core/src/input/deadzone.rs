//! Deadzone shaping for analog axis values
//!
//! Pure functions over explicit values; callers own the device state.
//! Two policies: hard cutoff (`axial`/`radial`) which passes values through
//! unchanged above the threshold, and `smooth` which linearly remaps the
//! live range `[deadzone, 1]` back onto `[0, 1]` so small movements just
//! past the threshold stay small.

use glam::Vec2;

/// Hard 1D cutoff: zero below the deadzone, unchanged above it.
///
/// Asymmetric on purpose: any value below the threshold is zeroed,
/// including legitimately negative ones. Use on unsigned axes.
pub fn axial(value: f32, deadzone: f32) -> f32 {
    debug_assert!((0.0..1.0).contains(&deadzone));
    if value < deadzone { 0.0 } else { value }
}

/// Componentwise [`axial`] over a 2D vector.
pub fn axial2(value: Vec2, deadzone: f32) -> Vec2 {
    Vec2::new(axial(value.x, deadzone), axial(value.y, deadzone))
}

/// Hard 2D cutoff: zero vector below magnitude `deadzone`, the vector
/// unchanged above it. No magnitude remap.
pub fn radial(value: Vec2, deadzone: f32) -> Vec2 {
    debug_assert!((0.0..1.0).contains(&deadzone));
    if value.length_squared() < deadzone * deadzone {
        Vec2::ZERO
    } else {
        value
    }
}

/// Smooth 1D remap: zero below the deadzone, then `[deadzone, 1]` scaled
/// linearly onto `[0, 1]`.
pub fn smooth(value: f32, deadzone: f32) -> f32 {
    debug_assert!((0.0..1.0).contains(&deadzone));
    if value < deadzone {
        0.0
    } else {
        (value - deadzone) / (1.0 - deadzone)
    }
}

/// Smooth 2D remap: zero vector below magnitude `deadzone`, otherwise the
/// magnitude is remapped like [`smooth`] while the direction is preserved.
pub fn smooth2(value: Vec2, deadzone: f32) -> Vec2 {
    debug_assert!((0.0..1.0).contains(&deadzone));
    let magnitude = value.length();
    if magnitude < deadzone {
        // Early out also guards the division below against zero magnitude
        return Vec2::ZERO;
    }
    let scaled = (magnitude - deadzone) / (1.0 - deadzone);
    value * (scaled / magnitude)
}
