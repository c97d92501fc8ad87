use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::constants::{color_from_hex, Colors};

use super::core::{RaceEntity, RaceState, SpawnRaceScene};
use super::UpdateSet;

pub struct ShipPlugin;

#[derive(Component)]
struct ShipVisual;

impl Plugin for ShipPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_ship, sync_ship_transform)
                .chain()
                .in_set(UpdateSet::Visuals),
        );
    }
}

/// Ship model: nose along -Z, so `Transform::rotation` matches the sim's
/// orientation without any correction.
fn spawn_ship(
    mut commands: Commands,
    mut requests: MessageReader<SpawnRaceScene>,
    race: Res<RaceState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if requests.read().last().is_none() {
        return;
    }

    let hull = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::SHIP),
        metallic: 0.5,
        perceptual_roughness: 0.5,
        ..default()
    });
    let cockpit = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::COCKPIT).with_alpha(0.7),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let engine = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::ENGINE_GLOW).with_alpha(0.5),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let body = meshes.add(Cylinder::new(0.2, 1.5));
    let cone = meshes.add(Cone::new(0.2, 0.8));
    let wing = meshes.add(Cuboid::new(1.2, 0.1, 0.4));
    let dome = meshes.add(Sphere::new(0.25).mesh().uv(16, 12));
    let glow = meshes.add(Sphere::new(0.15).mesh().uv(16, 12));

    let ship = race.ship();
    commands
        .spawn((
            Transform::from_translation(ship.position).with_rotation(ship.orientation),
            Visibility::Visible,
            ShipVisual,
            RaceEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(body),
                MeshMaterial3d(hull.clone()),
                Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            ));
            parent.spawn((
                Mesh3d(cone.clone()),
                MeshMaterial3d(hull.clone()),
                Transform::from_xyz(0.0, 0.0, -1.15)
                    .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ));
            parent.spawn((
                Mesh3d(cone),
                MeshMaterial3d(hull.clone()),
                Transform::from_xyz(0.0, 0.0, 1.15)
                    .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            ));
            for side in [-1.0_f32, 1.0] {
                parent.spawn((
                    Mesh3d(wing.clone()),
                    MeshMaterial3d(hull.clone()),
                    Transform::from_xyz(side * 0.6, 0.0, 0.0)
                        .with_rotation(Quat::from_rotation_z(side * 0.5)),
                ));
            }
            parent.spawn((
                Mesh3d(dome),
                MeshMaterial3d(cockpit),
                Transform::from_xyz(0.0, 0.2, -0.3),
            ));
            parent.spawn((
                Mesh3d(glow),
                MeshMaterial3d(engine),
                Transform::from_xyz(0.0, 0.0, 1.5),
            ));
        });
}

fn sync_ship_transform(race: Res<RaceState>, mut q_ship: Query<&mut Transform, With<ShipVisual>>) {
    let ship = race.ship();
    for mut transform in &mut q_ship {
        transform.translation = ship.position;
        transform.rotation = ship.orientation;
    }
}
