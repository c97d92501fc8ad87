use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use space_race_sim::particles::{Expiry, Particle};

use crate::constants::{color_from_hex, PARTICLE_ALPHA_STEP, PARTICLE_RADIUS};

use super::core::{RaceEntity, RaceState, SpawnRaceScene};
use super::UpdateSet;

pub struct ParticlesPlugin;

/// Particle id in the sim -> its entity.
#[derive(Resource, Default)]
struct ParticleEntities(HashMap<u64, Entity>);

#[derive(Resource)]
struct ParticleMesh(Handle<Mesh>);

#[derive(Component)]
struct ParticleVisual;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParticleEntities>()
            .add_systems(Startup, setup_particle_mesh)
            .add_systems(
                Update,
                (forget_particles_on_new_race, sync_particles)
                    .chain()
                    .in_set(UpdateSet::Visuals),
            );
    }
}

fn setup_particle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let mesh = meshes.add(Sphere::new(PARTICLE_RADIUS).mesh().uv(8, 6));
    commands.insert_resource(ParticleMesh(mesh));
}

/// Old particle entities are despawned with the rest of the race; only the
/// id map needs clearing since ids restart at zero.
fn forget_particles_on_new_race(
    mut requests: MessageReader<SpawnRaceScene>,
    mut entities: ResMut<ParticleEntities>,
) {
    if requests.read().last().is_some() {
        entities.0.clear();
    }
}

fn particle_transform(particle: &Particle) -> Transform {
    let r = particle.rotation;
    Transform::from_translation(particle.position)
        .with_rotation(Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z))
        .with_scale(Vec3::splat(particle.scale))
}

/// Alpha a fading particle should show; deadline particles never change.
fn fading_alpha(particle: &Particle) -> Option<f32> {
    match particle.expiry {
        Expiry::Fade { .. } => Some(particle.opacity()),
        Expiry::Deadline { .. } => None,
    }
}

fn alpha_needs_update(current: f32, wanted: f32) -> bool {
    (current - wanted).abs() >= PARTICLE_ALPHA_STEP
}

fn sync_particles(
    mut commands: Commands,
    race: Res<RaceState>,
    mesh: Res<ParticleMesh>,
    mut entities: ResMut<ParticleEntities>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut q_particles: Query<
        (&mut Transform, &MeshMaterial3d<StandardMaterial>),
        With<ParticleVisual>,
    >,
) {
    let live: HashSet<u64> = race.particles().iter().map(|p| p.id).collect();
    entities.0.retain(|id, entity| {
        if live.contains(id) {
            return true;
        }
        commands.entity(*entity).despawn();
        false
    });

    for particle in race.particles().iter() {
        if let Some(&entity) = entities.0.get(&particle.id) {
            let Ok((mut transform, material)) = q_particles.get_mut(entity) else {
                continue;
            };
            *transform = particle_transform(particle);
            let Some(alpha) = fading_alpha(particle) else {
                continue;
            };
            let stale = materials
                .get(&material.0)
                .is_some_and(|m| alpha_needs_update(m.base_color.alpha(), alpha));
            if stale {
                if let Some(material) = materials.get_mut(&material.0) {
                    material.base_color.set_alpha(alpha);
                }
            }
            continue;
        }

        let entity = commands
            .spawn((
                Mesh3d(mesh.0.clone()),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: color_from_hex(particle.color).with_alpha(particle.opacity()),
                    unlit: true,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                })),
                particle_transform(particle),
                ParticleVisual,
                RaceEntity,
            ))
            .id();
        entities.0.insert(particle.id, entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(expiry: Expiry, life: f32) -> Particle {
        Particle {
            id: 1,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
            rotation_speed: Vec3::ZERO,
            scale: 1.0,
            color: 0xffffff,
            life,
            expiry,
        }
    }

    #[test]
    fn deadline_particles_keep_their_spawn_alpha() {
        let p = particle(
            Expiry::Deadline {
                spawned_at: 0.0,
                at: 1.0,
            },
            1.0,
        );
        assert_eq!(fading_alpha(&p), None);
    }

    #[test]
    fn fading_particles_follow_opacity() {
        let p = particle(Expiry::Fade { rate: 0.5 }, 0.4);
        assert_eq!(fading_alpha(&p), Some(p.opacity()));
    }

    #[test]
    fn tiny_alpha_changes_are_skipped() {
        assert!(!alpha_needs_update(0.5, 0.5));
        assert!(!alpha_needs_update(0.5, 0.5 + PARTICLE_ALPHA_STEP * 0.5));
        assert!(alpha_needs_update(0.5, 0.5 - PARTICLE_ALPHA_STEP * 2.0));
    }

    #[test]
    fn transform_carries_position_scale_and_spin() {
        let particle = Particle {
            id: 3,
            position: Vec3::new(1.0, 2.0, 3.0),
            velocity: Vec3::ZERO,
            rotation: Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
            rotation_speed: Vec3::ZERO,
            scale: 0.7,
            color: 0xff00ff,
            life: 1.0,
            expiry: Expiry::Fade { rate: 0.5 },
        };

        let transform = particle_transform(&particle);
        assert_eq!(transform.translation, particle.position);
        assert!((transform.scale - Vec3::splat(0.7)).length() < 1e-6);
        assert!((transform.rotation * Vec3::X - Vec3::Y).length() < 1e-5);
    }
}
