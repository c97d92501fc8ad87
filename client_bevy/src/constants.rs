use bevy::prelude::Vec3;

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 3000.0;

/// Longest frame the race clock will accept; a stalled tab resumes from here.
pub const MAX_FRAME_DELTA_SECS: f64 = 0.1;

pub const STAR_COUNT: usize = 2000;
pub const STAR_FIELD_HALF_EXTENT: f32 = 1000.0;
pub const STAR_RADIUS: f32 = 0.6;

pub const SUN_POSITION: Vec3 = Vec3::new(500.0, 200.0, -800.0);
pub const SUN_RADIUS: f32 = 100.0;
pub const SUN_GLOW_RADIUS: f32 = 110.0;
pub const SUN_GLOW_PULSE: f32 = 0.1;

pub const RING_MAJOR_RADIUS: f32 = 8.0;
pub const RING_MINOR_RADIUS: f32 = 0.4;

pub const PARTICLE_RADIUS: f32 = 0.1;
/// Smallest alpha change worth a material write; one 8-bit step.
pub const PARTICLE_ALPHA_STEP: f32 = 1.0 / 255.0;

/// Self-lit share of a planet's color so the night side is not pure black.
pub const PLANET_FILL_LIGHT: f32 = 0.25;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const DEEP_SPACE_BG: u32 = 0x000000;
    pub const STAR: u32 = 0xffffff;
    pub const SUN: u32 = 0xffff00;
    pub const SUN_GLOW: u32 = 0xffaa00;
    pub const SHIP: u32 = 0x00ff00;
    pub const COCKPIT: u32 = 0x88ccff;
    pub const ENGINE_GLOW: u32 = 0x00ffff;
    pub const TOGGLE_ON: u32 = 0x4caf50;
    pub const TOGGLE_OFF: u32 = 0x444444;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_parses_correctly() {
        let c = color_from_hex(0xFF8040);
        if let bevy::prelude::Color::Srgba(srgba) = c {
            assert!((srgba.red - 1.0).abs() < 1e-3);
            assert!((srgba.green - 0.502).abs() < 1e-2);
            assert!((srgba.blue - 0.251).abs() < 1e-2);
        } else {
            panic!("Expected Srgba color variant");
        }
    }

    #[test]
    fn sun_sits_inside_the_far_plane() {
        assert!(SUN_POSITION.length() + SUN_GLOW_RADIUS < CAMERA_FAR);
    }
}
