use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ControlsConfig;

/// Controls sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    /// Pointer position in [-1, 1] on both axes, +y up.
    pub pointer: Vec2,
}

/// Per-axis pointer inversion, toggled from the settings panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSettings {
    pub invert_x: bool,
    pub invert_y: bool,
}

impl From<&ControlsConfig> for PointerSettings {
    fn from(controls: &ControlsConfig) -> Self {
        Self {
            invert_x: controls.invert_x,
            invert_y: controls.invert_y,
        }
    }
}

impl PointerSettings {
    pub fn toggle_x(&mut self) {
        self.invert_x = !self.invert_x;
    }

    pub fn toggle_y(&mut self) {
        self.invert_y = !self.invert_y;
    }

    /// Map a cursor position in window pixels (origin top-left, y down) to
    /// the normalized pointer. Returns `None` for a degenerate viewport.
    pub fn normalize(&self, cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
        if !(viewport.x > 0.0 && viewport.y > 0.0) || !cursor.is_finite() {
            return None;
        }

        let sx = if self.invert_x { -1.0 } else { 1.0 };
        let sy = if self.invert_y { -1.0 } else { 1.0 };
        let x = (cursor.x / viewport.x * 2.0 - 1.0) * sx;
        let y = -(cursor.y / viewport.y * 2.0 - 1.0) * sy;

        Some(Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn center_maps_to_origin() {
        let p = PointerSettings::default()
            .normalize(Vec2::new(400.0, 300.0), VIEWPORT)
            .unwrap();
        assert!(p.length() < 1e-6);
    }

    #[test]
    fn top_right_is_positive_both_axes() {
        let p = PointerSettings::default()
            .normalize(Vec2::new(800.0, 0.0), VIEWPORT)
            .unwrap();
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inversion_flips_sign_per_axis() {
        let mut settings = PointerSettings::default();
        settings.toggle_x();
        let p = settings.normalize(Vec2::new(800.0, 0.0), VIEWPORT).unwrap();
        assert!((p.x + 1.0).abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);

        settings.toggle_x();
        settings.toggle_y();
        let p = settings.normalize(Vec2::new(800.0, 0.0), VIEWPORT).unwrap();
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn outside_window_is_clamped() {
        let p = PointerSettings::default()
            .normalize(Vec2::new(-400.0, 1200.0), VIEWPORT)
            .unwrap();
        assert_eq!(p, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn zero_viewport_rejected() {
        assert!(PointerSettings::default()
            .normalize(Vec2::new(1.0, 1.0), Vec2::ZERO)
            .is_none());
    }
}
