//! Player input state
//!
//! The presentation layer translates raw pointer/touch events into calls on
//! [`InputState`]; the simulation only reads the resulting flags.

use serde::{Deserialize, Serialize};

use crate::consts::JOYSTICK_RADIUS;

/// Pointer/touch identifier as reported by the platform
pub type TouchId = i32;

/// Who is currently holding the joystick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoystickGrip {
    Touch(TouchId),
    Mouse,
}

/// Controls held by the player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Boost button held
    pub boosting: bool,
    /// Target facing (radians), meaningful only while `joystick` is `Some`
    pub joystick_angle: f32,
    pub joystick: Option<JoystickGrip>,
    /// Joystick pad offset from its rest position, clamped to `JOYSTICK_RADIUS`
    pub joystick_pad: (f32, f32),
    /// Touches on the open play field (not on a control)
    pub canvas_touches: Vec<TouchId>,
    /// Secondary mouse button held on the play field
    pub slow_motion_button: bool,
}

impl InputState {
    #[inline]
    pub fn joystick_active(&self) -> bool {
        self.joystick.is_some()
    }

    /// Slow motion: two free fingers, one free finger while steering or
    /// boosting, or the secondary mouse button
    pub fn slow_motion(&self) -> bool {
        let free = self.canvas_touches.len();
        self.slow_motion_button
            || free >= 2
            || (free >= 1 && (self.joystick_active() || self.boosting))
    }

    pub fn set_boost(&mut self, held: bool) {
        self.boosting = held;
    }

    /// Grab the joystick. Ignored if already held.
    pub fn joystick_begin(&mut self, grip: JoystickGrip) {
        if self.joystick.is_none() {
            self.joystick = Some(grip);
        }
    }

    /// Pointer moved to (`dx`, `dy`) relative to the joystick center
    pub fn joystick_move(&mut self, grip: JoystickGrip, dx: f32, dy: f32) {
        if self.joystick != Some(grip) {
            return;
        }
        let angle = dy.atan2(dx);
        let reach = (dx * dx + dy * dy).sqrt().min(JOYSTICK_RADIUS);
        self.joystick_angle = angle;
        self.joystick_pad = (angle.cos() * reach, angle.sin() * reach);
    }

    /// Release the joystick if `grip` is the one holding it
    pub fn joystick_end(&mut self, grip: JoystickGrip) {
        if self.joystick == Some(grip) {
            self.joystick = None;
            self.joystick_pad = (0.0, 0.0);
        }
    }

    pub fn canvas_touch_begin(&mut self, id: TouchId) {
        if !self.canvas_touches.contains(&id) {
            self.canvas_touches.push(id);
        }
    }

    pub fn canvas_touch_end(&mut self, id: TouchId) {
        self.canvas_touches.retain(|&t| t != id);
    }

    /// Drop every held control (new game)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_slow_motion_two_fingers() {
        let mut input = InputState::default();
        input.canvas_touch_begin(1);
        assert!(!input.slow_motion());
        input.canvas_touch_begin(2);
        assert!(input.slow_motion());
        input.canvas_touch_end(1);
        assert!(!input.slow_motion());
    }

    #[test]
    fn test_slow_motion_finger_plus_control() {
        let mut input = InputState::default();
        input.canvas_touch_begin(5);
        input.set_boost(true);
        assert!(input.slow_motion());
        input.set_boost(false);
        input.joystick_begin(JoystickGrip::Touch(9));
        assert!(input.slow_motion());
    }

    #[test]
    fn test_slow_motion_mouse_button() {
        let input = InputState {
            slow_motion_button: true,
            ..Default::default()
        };
        assert!(input.slow_motion());
    }

    #[test]
    fn test_joystick_angle_and_pad_clamp() {
        let mut input = InputState::default();
        input.joystick_begin(JoystickGrip::Touch(3));
        input.joystick_move(JoystickGrip::Touch(3), -100.0, 0.0);
        assert!((input.joystick_angle - PI).abs() < 1e-6);
        assert!((input.joystick_pad.0 + JOYSTICK_RADIUS).abs() < 1e-4);

        // Another finger cannot steer or release it
        input.joystick_move(JoystickGrip::Touch(4), 0.0, 10.0);
        assert!((input.joystick_angle - PI).abs() < 1e-6);
        input.joystick_end(JoystickGrip::Touch(4));
        assert!(input.joystick_active());

        input.joystick_end(JoystickGrip::Touch(3));
        assert!(!input.joystick_active());
        assert_eq!(input.joystick_pad, (0.0, 0.0));
    }

    #[test]
    fn test_duplicate_touch_ignored() {
        let mut input = InputState::default();
        input.canvas_touch_begin(1);
        input.canvas_touch_begin(1);
        assert_eq!(input.canvas_touches.len(), 1);
    }
}
