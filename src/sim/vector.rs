//! 2D vector helpers
//!
//! The simulation uses glam's `Vec2` as a plain value type: `+`, `-` and
//! `*` cover add/subtract/scale and every call returns a new value, so
//! chains like `v.with_magnitude(3.0).clamp_magnitude(2.0)` read left to
//! right. The extension trait adds the two operations that need a guard
//! against zero length.

use glam::Vec2;

/// The simulation's vector type
pub type Vector2 = Vec2;

/// Magnitude operations that never produce non-finite components
pub trait Vector2Ext: Sized {
    /// Same direction, new length. A zero (or non-finite) vector has no
    /// direction and yields `Vec2::ZERO`.
    fn with_magnitude(self, magnitude: f32) -> Self;

    /// Shorten to `max` if longer; otherwise unchanged
    fn clamp_magnitude(self, max: f32) -> Self;
}

impl Vector2Ext for Vec2 {
    #[inline]
    fn with_magnitude(self, magnitude: f32) -> Self {
        self.normalize_or_zero() * magnitude
    }

    #[inline]
    fn clamp_magnitude(self, max: f32) -> Self {
        if self.length() > max {
            self.with_magnitude(max)
        } else {
            self
        }
    }
}
