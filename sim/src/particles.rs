//! Ring pickup explosions.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::config::{EffectsConfig, ParticleLifetime, MAX_PARTICLES_PER_EXPLOSION};

pub const PARTICLE_PALETTE: [u32; 8] = [
    0x00ffff, 0xff00ff, 0xffff00, 0xff0000, 0x00ff00, 0x0000ff, 0xff8800, 0x8800ff,
];

/// Opacity of a particle at full life.
pub const BASE_OPACITY: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expiry {
    /// `life` drops by `rate` per second.
    Fade { rate: f32 },
    /// Removed once the race clock reaches `at`.
    Deadline { spawned_at: f64, at: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub position: Vec3,
    /// Per reference frame
    pub velocity: Vec3,
    /// Euler angles (XYZ, radians)
    pub rotation: Vec3,
    pub rotation_speed: Vec3,
    pub scale: f32,
    pub color: u32,
    /// Remaining life in [0, 1]
    pub life: f32,
    pub expiry: Expiry,
}

impl Particle {
    /// Advance one frame. Returns false once the particle has expired.
    pub fn tick(&mut self, scale: f32, dt: f32, now: f64, gravity: f32) -> bool {
        self.position += self.velocity * scale;
        self.velocity.y -= gravity * scale;
        self.rotation += self.rotation_speed * scale;

        match self.expiry {
            Expiry::Fade { rate } => {
                self.life -= rate * dt;
                self.life > 0.0
            }
            Expiry::Deadline { spawned_at, at } => {
                let span = at - spawned_at;
                self.life = ((at - now) / span).clamp(0.0, 1.0) as f32;
                now < at
            }
        }
    }

    pub fn opacity(&self) -> f32 {
        match self.expiry {
            Expiry::Fade { .. } => BASE_OPACITY * self.life.max(0.0),
            Expiry::Deadline { .. } => BASE_OPACITY,
        }
    }
}

/// Owns every live particle from spawn to removal.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    next_id: u64,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.particles.iter().any(|p| p.id == id)
    }

    /// Spawn one explosion at `origin`. Returns the number of particles added.
    pub fn spawn_explosion(
        &mut self,
        origin: Vec3,
        config: &EffectsConfig,
        now: f64,
        rng: &mut impl Rng,
    ) -> usize {
        let before = self.particles.len();
        self.particles
            .reserve(
                config
                    .bursts
                    .saturating_mul(config.particles_per_burst)
                    .min(MAX_PARTICLES_PER_EXPLOSION),
            );

        for _ in 0..config.bursts {
            let center = origin
                + Vec3::new(
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                ) * config.burst_jitter;

            for _ in 0..config.particles_per_burst {
                let angle = rng.gen::<f32>() * TAU;
                let radius = rng.gen::<f32>() * 0.8;
                let speed = 0.4 + rng.gen::<f32>() * 0.6;
                let velocity = Vec3::new(
                    angle.cos() * speed * radius,
                    angle.sin() * speed * radius,
                    (rng.gen::<f32>() - 0.5) * speed,
                );
                let rotation_speed = Vec3::new(
                    rng.gen::<f32>() * 0.4,
                    rng.gen::<f32>() * 0.4,
                    rng.gen::<f32>() * 0.4,
                );
                let expiry = match config.lifetime {
                    ParticleLifetime::Fade { min_rate, max_rate } => Expiry::Fade {
                        rate: if max_rate > min_rate {
                            rng.gen_range(min_rate..max_rate)
                        } else {
                            min_rate
                        },
                    },
                    ParticleLifetime::Timer { seconds } => Expiry::Deadline {
                        spawned_at: now,
                        at: now + seconds as f64,
                    },
                };

                self.particles.push(Particle {
                    id: self.next_id,
                    position: center,
                    velocity,
                    rotation: Vec3::ZERO,
                    rotation_speed,
                    scale: 0.3 + rng.gen::<f32>() * 0.7,
                    color: PARTICLE_PALETTE[rng.gen_range(0..PARTICLE_PALETTE.len())],
                    life: 1.0,
                    expiry,
                });
                self.next_id += 1;
            }
        }

        let spawned = self.particles.len() - before;
        tracing::debug!(spawned, live = self.particles.len(), "explosion spawned");
        spawned
    }

    /// Advance every particle and drop the expired ones. Returns how many were removed.
    pub fn update(&mut self, scale: f32, dt: f32, now: f64, gravity: f32) -> usize {
        let before = self.particles.len();
        self.particles
            .retain_mut(|p| p.tick(scale, dt, now, gravity));
        before - self.particles.len()
    }
}
