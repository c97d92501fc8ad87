use bevy::prelude::*;
use bevy::time::Virtual;
use bevy::window::{CursorOptions, PrimaryWindow};
use space_race_sim::{GameConfig, PointerSettings, Race};
use std::time::Duration;

use crate::config::{load_game_config, reseeded};
use crate::constants::{
    color_from_hex, Colors, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, MAX_FRAME_DELTA_SECS,
    SUN_POSITION,
};

use super::input::ControlState;

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Simulate,
    Visuals,
    Hud,
}

pub struct CorePlugin;

/// The running race. Everything the simulation knows lives here.
#[derive(Resource, Deref, DerefMut)]
pub(crate) struct RaceState(pub(crate) Race);

/// Asks the scene plugins to spawn visuals for the current race.
#[derive(Message)]
pub(crate) struct SpawnRaceScene;

/// Sent by input when the start key is pressed after game over.
#[derive(Message)]
pub(crate) struct RestartRace;

/// Everything tied to one race; despawned on restart.
#[derive(Component)]
pub(crate) struct RaceEntity;

#[derive(Component)]
pub(crate) struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SpawnRaceScene>()
            .add_message::<RestartRace>()
            .insert_resource(ClearColor(color_from_hex(Colors::DEEP_SPACE_BG)))
            .configure_sets(
                Update,
                (
                    UpdateSet::Input,
                    UpdateSet::Simulate,
                    UpdateSet::Visuals,
                    UpdateSet::Hud,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (
                    setup_race,
                    setup_camera,
                    setup_lights,
                    configure_virtual_time_catchup_cap,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (restart_race, step_race)
                    .chain()
                    .in_set(UpdateSet::Simulate),
            )
            .add_systems(
                Update,
                (follow_camera, update_cursor_visibility).in_set(UpdateSet::Visuals),
            );
    }
}

fn setup_race(mut commands: Commands, mut spawn_scene: MessageWriter<SpawnRaceScene>) {
    let config = load_game_config();
    commands.insert_resource(ControlState {
        settings: PointerSettings::from(&config.controls),
        ..default()
    });
    commands.insert_resource(RaceState(Race::new(config)));
    spawn_scene.write(SpawnRaceScene);
}

fn setup_camera(mut commands: Commands) {
    #[cfg(target_arch = "wasm32")]
    let msaa = Msaa::Off;
    #[cfg(not(target_arch = "wasm32"))]
    let msaa = Msaa::Sample4;

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_xyz(0.0, 5.0, 15.0).looking_at(Vec3::ZERO, Vec3::Y),
        msaa,
        MainCamera,
    ));
}

fn setup_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            color: color_from_hex(Colors::SUN),
            intensity: 4.0e9,
            range: 2_000.0,
            ..default()
        },
        Transform::from_translation(SUN_POSITION),
    ));
}

fn configure_virtual_time_catchup_cap(mut virtual_time: ResMut<Time<Virtual>>) {
    virtual_time.set_max_delta(Duration::from_secs_f64(MAX_FRAME_DELTA_SECS));
}

fn restart_race(
    mut commands: Commands,
    mut restarts: MessageReader<RestartRace>,
    mut race: ResMut<RaceState>,
    mut spawn_scene: MessageWriter<SpawnRaceScene>,
    q_race_entities: Query<Entity, With<RaceEntity>>,
) {
    if restarts.read().last().is_none() {
        return;
    }

    for entity in &q_race_entities {
        commands.entity(entity).despawn();
    }

    let config: GameConfig = reseeded(race.config());
    info!("restarting {} race", config.variant.as_str());
    race.0 = Race::new(config);
    spawn_scene.write(SpawnRaceScene);
}

fn step_race(time: Res<Time>, controls: Res<ControlState>, mut race: ResMut<RaceState>) {
    let report = race.step(&controls.input, time.delta_secs());
    if report.particles_removed > 0 {
        debug!("{} particles expired", report.particles_removed);
    }
}

fn follow_camera(race: Res<RaceState>, mut q_camera: Query<&mut Transform, With<MainCamera>>) {
    let rig = race.camera();
    for mut transform in &mut q_camera {
        *transform = Transform::from_translation(rig.position).looking_at(rig.target, Vec3::Y);
    }
}

fn update_cursor_visibility(
    race: Res<RaceState>,
    mut q_cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let visible = !race.session().is_running();
    for mut cursor in &mut q_cursor {
        if cursor.visible != visible {
            cursor.visible = visible;
        }
    }
}
