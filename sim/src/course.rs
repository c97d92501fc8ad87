use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;

use crate::config::CourseConfig;

pub const PLANET_MESSAGES: [&str; 5] = [
    "Welcome to Planet Alpha!",
    "Danger Zone: Planet Beta",
    "Mysterious Planet Gamma",
    "Ancient Planet Delta",
    "Frozen Planet Epsilon",
];

pub const RING_COLORS: [u32; 10] = [
    0xff0000, 0x00ff00, 0x0000ff, 0xffff00, 0xff00ff, 0x00ffff, 0xff8800, 0x8800ff, 0xff0088,
    0x88ff00,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub position: Vec3,
    pub radius: f32,
    pub message: String,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub position: Vec3,
    pub orientation: Quat,
    pub color: u32,
    collected: bool,
}

/// Where a point sits relative to a ring's opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPassage {
    pub distance_to_plane: f32,
    pub distance_in_plane: f32,
}

impl Ring {
    /// A ring whose opening (local +Z) faces the world origin.
    pub fn new(position: Vec3, color: u32) -> Self {
        Self {
            position,
            orientation: facing_origin(position),
            color,
            collected: false,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark the ring collected. Returns false if it already was.
    pub(crate) fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }

    pub fn passage(&self, point: Vec3) -> RingPassage {
        let offset = point - self.position;
        let distance = offset.length();
        let distance_to_plane = offset.dot(self.normal()).abs();
        let distance_in_plane = if distance < 1e-6 {
            0.0
        } else {
            (distance * distance - distance_to_plane * distance_to_plane)
                .max(0.0)
                .sqrt()
        };

        RingPassage {
            distance_to_plane,
            distance_in_plane,
        }
    }
}

fn facing_origin(position: Vec3) -> Quat {
    let to_origin = (-position).normalize_or_zero();
    if to_origin == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::Z, to_origin)
}

/// Planets and rings of one race.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Course {
    pub planets: Vec<Planet>,
    pub rings: Vec<Ring>,
}

impl Course {
    pub fn generate(config: &CourseConfig, rng: &mut impl Rng) -> Self {
        let planets = (0..config.planet_count)
            .map(|i| {
                let mut coord = || (rng.gen::<f32>() - 0.5) * config.planet_spread;
                let position = Vec3::new(coord(), coord(), coord());
                let radius = if config.planet_radius_max > config.planet_radius_min {
                    rng.gen_range(config.planet_radius_min..config.planet_radius_max)
                } else {
                    config.planet_radius_min
                };
                Planet {
                    position,
                    radius,
                    message: PLANET_MESSAGES[i % PLANET_MESSAGES.len()].to_string(),
                    color: rng.gen_range(0..0x1000000),
                }
            })
            .collect();

        let rings = ring_path(config)
            .into_iter()
            .enumerate()
            .map(|(i, position)| Ring::new(position, RING_COLORS[i % RING_COLORS.len()]))
            .collect();

        Self { planets, rings }
    }

    pub fn collected_count(&self) -> usize {
        self.rings.iter().filter(|r| r.collected).count()
    }

    pub fn rings_remaining(&self) -> usize {
        self.rings.len() - self.collected_count()
    }
}

/// Ring centers on a flattened loop around the origin.
pub fn ring_path(config: &CourseConfig) -> Vec<Vec3> {
    let n = config.ring_count;
    let r = config.ring_path_radius;
    (0..n)
        .map(|i| {
            let angle = i as f32 / n as f32 * TAU;
            Vec3::new(
                angle.cos() * r,
                angle.sin() * r * config.ring_path_flatten,
                angle.sin() * r,
            )
        })
        .collect()
}
