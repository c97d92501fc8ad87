use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use space_race_sim::Variant;

use crate::constants::{
    color_from_hex, Colors, PLANET_FILL_LIGHT, RING_MAJOR_RADIUS, RING_MINOR_RADIUS, STAR_COUNT,
    STAR_FIELD_HALF_EXTENT, STAR_RADIUS, SUN_GLOW_PULSE, SUN_GLOW_RADIUS, SUN_POSITION, SUN_RADIUS,
};

use super::core::{RaceEntity, RaceState, SpawnRaceScene};
use super::UpdateSet;

pub struct CoursePlugin;

#[derive(Component)]
struct SunGlow;

#[derive(Component)]
struct RingVisual {
    index: usize,
}

impl Plugin for CoursePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_starfield, spawn_sun))
            .add_systems(
                Update,
                (spawn_course, sync_ring_visibility, pulse_sun_glow)
                    .chain()
                    .in_set(UpdateSet::Visuals),
            );
    }
}

/// Deterministic scatter in [-1, 1] so the sky is the same every run.
fn scatter(seed: f32) -> f32 {
    (seed.sin() * 43_758.547).rem_euclid(1.0) * 2.0 - 1.0
}

pub(crate) fn star_position(index: usize) -> Vec3 {
    let t = index as f32 + 1.0;
    Vec3::new(
        scatter(t * 12.989_8),
        scatter(t * 78.233),
        scatter(t * 37.719),
    ) * STAR_FIELD_HALF_EXTENT
}

fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(STAR_RADIUS).mesh().uv(6, 4));
    let material = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::STAR),
        unlit: true,
        ..default()
    });

    for i in 0..STAR_COUNT {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(star_position(i)),
        ));
    }
}

fn spawn_sun(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(32, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color_from_hex(Colors::SUN).with_alpha(0.8),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_translation(SUN_POSITION),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_GLOW_RADIUS).mesh().uv(32, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color_from_hex(Colors::SUN_GLOW).with_alpha(0.3),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_translation(SUN_POSITION),
        SunGlow,
    ));
}

fn spawn_course(
    mut commands: Commands,
    mut requests: MessageReader<SpawnRaceScene>,
    race: Res<RaceState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if requests.read().last().is_none() {
        return;
    }

    for planet in &race.course().planets {
        let color = color_from_hex(planet.color);
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(planet.radius).mesh().uv(32, 32))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: color.to_linear() * PLANET_FILL_LIGHT,
                perceptual_roughness: 0.7,
                ..default()
            })),
            Transform::from_translation(planet.position),
            RaceEntity,
        ));
    }

    let with_glow = race.config().variant == Variant::Deluxe;
    let ring_mesh = meshes.add(Torus {
        minor_radius: RING_MINOR_RADIUS,
        major_radius: RING_MAJOR_RADIUS,
    });
    let glow_mesh = meshes.add(Torus {
        minor_radius: RING_MINOR_RADIUS * 1.5,
        major_radius: RING_MAJOR_RADIUS + 0.2,
    });

    for (index, ring) in race.course().rings.iter().enumerate() {
        let color = color_from_hex(ring.color);
        // Bevy's torus lies in the XZ plane; tip it so its hole faces local +Z.
        let rotation = ring.orientation * Quat::from_rotation_x(FRAC_PI_2);

        let mut entity = commands.spawn((
            Mesh3d(ring_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: color.to_linear() * 0.5,
                ..default()
            })),
            Transform::from_translation(ring.position).with_rotation(rotation),
            Visibility::Visible,
            RingVisual { index },
            RaceEntity,
        ));

        if with_glow {
            entity.with_children(|parent| {
                parent.spawn((
                    Mesh3d(glow_mesh.clone()),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: color.with_alpha(0.3),
                        unlit: true,
                        alpha_mode: AlphaMode::Blend,
                        ..default()
                    })),
                    Transform::default(),
                ));
            });
        }
    }
}

fn sync_ring_visibility(race: Res<RaceState>, mut q_rings: Query<(&RingVisual, &mut Visibility)>) {
    for (ring, mut visibility) in &mut q_rings {
        let collected = race
            .course()
            .rings
            .get(ring.index)
            .is_some_and(|r| r.is_collected());
        let wanted = if collected {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

fn pulse_sun_glow(
    time: Res<Time>,
    race: Res<RaceState>,
    mut q_glow: Query<&mut Transform, With<SunGlow>>,
) {
    if race.session().is_over() {
        return;
    }
    let scale = 1.0 + time.elapsed_secs().sin() * SUN_GLOW_PULSE;
    for mut transform in &mut q_glow {
        transform.scale = Vec3::splat(scale);
    }
}
