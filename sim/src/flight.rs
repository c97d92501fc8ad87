use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec2, Vec3};

use crate::config::{CornerTurn, FlightConfig};
use crate::input::InputState;

/// Tuning constants are expressed per frame at this rate.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Convert a measured frame delta into reference frames. Bad deltas count as zero.
pub fn frame_scale(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt * REFERENCE_FRAME_RATE
    } else {
        0.0
    }
}

/// Yaw is the outer rotation, pitch the inner one.
pub fn orientation_from_angles(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    /// Accumulated corner turn: x is extra yaw, y is extra pitch (radians).
    pub corner_offset: Vec2,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            corner_offset: Vec2::ZERO,
        }
    }
}

impl Ship {
    /// The ship flies along its local -Z axis.
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Recompute orientation from the pointer plus the accumulated corner turn.
    pub fn steer(&mut self, pointer: Vec2, config: &FlightConfig, scale: f32) {
        if let Some(corner) = config.corner_turn {
            self.corner_offset.x += corner_push(pointer.x, corner) * scale;
            self.corner_offset.y += corner_push(pointer.y, corner) * scale;
            self.corner_offset.x = wrap_angle(self.corner_offset.x);
            self.corner_offset.y = wrap_angle(self.corner_offset.y);
        }

        let yaw = pointer.x * config.max_yaw + self.corner_offset.x;
        let pitch = pointer.y * config.max_pitch + self.corner_offset.y;
        self.orientation = orientation_from_angles(yaw, pitch);
    }

    /// Apply thrust or coast-down, then clamp to max speed.
    pub fn thrust(&mut self, input: &InputState, config: &FlightConfig, scale: f32) {
        let push = self.forward() * (config.acceleration * scale);
        if input.forward {
            self.velocity += push;
        }
        if input.backward {
            self.velocity -= push;
        }

        if !input.forward && !input.backward {
            let speed = self.velocity.length();
            let slowed = speed - config.deceleration * scale;
            if slowed < config.deceleration {
                self.velocity = Vec3::ZERO;
            } else {
                self.velocity *= slowed / speed;
            }
        }

        self.velocity = self.velocity.clamp_length_max(config.max_speed);
    }

    pub fn advance(&mut self, scale: f32) {
        self.position += self.velocity * scale;
    }
}

/// Map an angle into [-PI, PI).
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

fn corner_push(axis: f32, corner: CornerTurn) -> f32 {
    let magnitude = axis.abs();
    if magnitude <= corner.threshold {
        return 0.0;
    }
    let overshoot = (magnitude - corner.threshold) / (1.0 - corner.threshold);
    axis.signum() * corner.rate * overshoot
}

/// Chase camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraRig {
    pub fn follow(ship: &Ship, offset: Vec3) -> Self {
        Self {
            position: ship.position + ship.orientation * offset,
            target: ship.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn no_corner() -> FlightConfig {
        FlightConfig {
            corner_turn: None,
            ..FlightConfig::default()
        }
    }

    const FORWARD: InputState = InputState {
        forward: true,
        backward: false,
        pointer: Vec2::ZERO,
    };

    #[test]
    fn frame_scale_guards_bad_deltas() {
        assert_eq!(frame_scale(f32::NAN), 0.0);
        assert_eq!(frame_scale(-0.1), 0.0);
        assert!((frame_scale(1.0 / 60.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn neutral_pointer_faces_negative_z() {
        let mut ship = Ship::default();
        ship.steer(Vec2::ZERO, &no_corner(), 1.0);
        assert!((ship.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn full_pointer_up_pitches_ninety_degrees() {
        let mut ship = Ship::default();
        ship.steer(Vec2::new(0.0, 1.0), &no_corner(), 1.0);
        assert!((ship.forward() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn yaw_is_applied_after_pitch() {
        let config = FlightConfig {
            max_yaw: FRAC_PI_2,
            ..no_corner()
        };
        let mut ship = Ship::default();
        ship.steer(Vec2::new(1.0, 0.5), &config, 1.0);
        let expected =
            Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(0.5 * config.max_pitch);
        assert!(ship.orientation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn steering_without_corner_turn_is_stateless() {
        let config = no_corner();
        let mut a = Ship::default();
        let mut b = Ship::default();
        for _ in 0..30 {
            a.steer(Vec2::new(0.95, -0.9), &config, 1.0);
        }
        b.steer(Vec2::new(0.95, -0.9), &config, 1.0);
        assert!(a.orientation.abs_diff_eq(b.orientation, 1e-6));
        assert_eq!(a.corner_offset, Vec2::ZERO);
    }

    #[test]
    fn corner_turn_accumulates_past_threshold() {
        let config = FlightConfig::default();
        let mut ship = Ship::default();
        ship.steer(Vec2::new(1.0, 0.0), &config, 1.0);
        ship.steer(Vec2::new(1.0, 0.0), &config, 1.0);
        assert!((ship.corner_offset.x - 0.04).abs() < 1e-6);
        assert_eq!(ship.corner_offset.y, 0.0);

        // Inside the threshold the offset holds.
        ship.steer(Vec2::new(0.5, 0.0), &config, 1.0);
        assert!((ship.corner_offset.x - 0.04).abs() < 1e-6);
    }

    #[test]
    fn corner_turn_scales_with_overshoot_and_sign() {
        let config = FlightConfig::default();
        let mut ship = Ship::default();
        ship.steer(Vec2::new(0.0, -0.9), &config, 1.0);
        assert!((ship.corner_offset.y + 0.01).abs() < 1e-6);
    }

    #[test]
    fn held_corner_turn_stays_bounded() {
        let config = FlightConfig::default();
        let mut ship = Ship::default();
        let frames = 1_000;
        for _ in 0..frames {
            ship.steer(Vec2::new(1.0, 1.0), &config, 1.0);
        }

        assert!(ship.corner_offset.x.abs() <= PI);
        assert!(ship.corner_offset.y.abs() <= PI);
        assert!(ship.orientation.is_normalized());

        // Same heading as if the offset had grown without limit.
        let turned = 0.02 * frames as f32;
        let unwrapped =
            orientation_from_angles(config.max_yaw + turned, config.max_pitch + turned);
        assert!((ship.forward() - unwrapped * Vec3::NEG_Z).length() < 1e-3);
    }

    #[test]
    fn wrap_angle_keeps_small_angles() {
        assert!((wrap_angle(0.3) - 0.3).abs() < 1e-6);
        assert!((wrap_angle(-0.01) + 0.01).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn thrust_from_rest_accumulates_until_max_speed() {
        let config = no_corner();
        for frames in [1usize, 5, 10, 24, 25, 26, 60] {
            let mut ship = Ship::default();
            for _ in 0..frames {
                ship.thrust(&FORWARD, &config, 1.0);
                ship.advance(1.0);
            }
            let expected = (frames as f32 * config.acceleration).min(config.max_speed);
            assert!(
                (ship.speed() - expected).abs() < 1e-4,
                "frames {frames}: speed {} expected {expected}",
                ship.speed()
            );
        }
    }

    #[test]
    fn speed_never_exceeds_max() {
        let config = no_corner();
        let mut ship = Ship {
            velocity: Vec3::new(3.0, -2.0, 1.0),
            ..Ship::default()
        };
        ship.thrust(&FORWARD, &config, 5.0);
        assert!(ship.speed() <= config.max_speed + 1e-6);
    }

    #[test]
    fn coasting_reaches_exact_zero() {
        let config = no_corner();
        let mut ship = Ship {
            velocity: Vec3::new(0.0, 0.0, -config.max_speed),
            ..Ship::default()
        };
        let bound = (config.max_speed / config.deceleration).ceil() as usize + 1;
        let mut last = ship.speed();
        let mut frames = 0;
        while ship.speed() > 0.0 {
            ship.thrust(&InputState::default(), &config, 1.0);
            assert!(ship.speed() <= last);
            last = ship.speed();
            frames += 1;
            assert!(frames <= bound, "did not stop within {bound} frames");
        }
        assert_eq!(ship.velocity, Vec3::ZERO);
    }

    #[test]
    fn coasting_at_rest_stays_finite() {
        let mut ship = Ship::default();
        ship.thrust(&InputState::default(), &no_corner(), 1.0);
        assert_eq!(ship.velocity, Vec3::ZERO);
        assert!(ship.position.is_finite());
    }

    #[test]
    fn opposing_thrust_cancels() {
        let config = no_corner();
        let mut ship = Ship {
            velocity: Vec3::new(0.0, 0.0, -0.2),
            ..Ship::default()
        };
        let both = InputState {
            forward: true,
            backward: true,
            pointer: Vec2::ZERO,
        };
        ship.thrust(&both, &config, 1.0);
        assert!((ship.speed() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn backward_thrust_moves_along_positive_z() {
        let config = no_corner();
        let mut ship = Ship::default();
        let back = InputState {
            forward: false,
            backward: true,
            pointer: Vec2::ZERO,
        };
        ship.thrust(&back, &config, 1.0);
        ship.advance(1.0);
        assert!(ship.position.z > 0.0);
    }

    #[test]
    fn camera_sits_behind_and_above_ship() {
        let ship = Ship {
            position: Vec3::new(10.0, 0.0, 0.0),
            ..Ship::default()
        };
        let rig = CameraRig::follow(&ship, Vec3::new(0.0, 5.0, 15.0));
        assert!((rig.position - Vec3::new(10.0, 5.0, 15.0)).length() < 1e-6);
        assert_eq!(rig.target, ship.position);
    }

    #[test]
    fn camera_offset_rotates_with_ship() {
        let ship = Ship {
            orientation: Quat::from_rotation_y(FRAC_PI_2),
            ..Ship::default()
        };
        let rig = CameraRig::follow(&ship, Vec3::new(0.0, 5.0, 15.0));
        assert!((rig.position - Vec3::new(15.0, 5.0, 0.0)).length() < 1e-4);
    }
}
