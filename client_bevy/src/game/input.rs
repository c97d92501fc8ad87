use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use space_race_sim::config::StartKey;
use space_race_sim::{InputState, PointerSettings};

use super::core::{RaceState, RestartRace};
use super::UpdateSet;

pub struct InputPlugin;

/// Controls for the next simulation step plus the player's pointer options.
#[derive(Resource, Default)]
pub(crate) struct ControlState {
    pub(crate) input: InputState,
    pub(crate) settings: PointerSettings,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (session_keys_system, thrust_system, pointer_system)
                .chain()
                .in_set(UpdateSet::Input),
        );
    }
}

pub(crate) fn start_key_code(key: StartKey) -> KeyCode {
    match key {
        StartKey::Space => KeyCode::Space,
        StartKey::W => KeyCode::KeyW,
    }
}

fn session_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut race: ResMut<RaceState>,
    mut restart: MessageWriter<RestartRace>,
) {
    let start = start_key_code(race.config().controls.start_key);

    if race.session().is_over() {
        if keys.just_pressed(start) {
            restart.write(RestartRace);
        }
        return;
    }

    if keys.just_pressed(KeyCode::Space) {
        race.dismiss_message();
    }
    if keys.just_pressed(start) {
        race.press_start();
    }
}

fn thrust_system(keys: Res<ButtonInput<KeyCode>>, mut controls: ResMut<ControlState>) {
    controls.input.forward = keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
    controls.input.backward = keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]);
}

fn pointer_system(
    q_window: Query<&Window, With<PrimaryWindow>>,
    race: Res<RaceState>,
    mut controls: ResMut<ControlState>,
) {
    if race.session().is_over() {
        return;
    }
    let Ok(window) = q_window.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let viewport = Vec2::new(window.width(), window.height());
    if let Some(pointer) = controls.settings.normalize(cursor, viewport) {
        controls.input.pointer = pointer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_keys_map_to_physical_keys() {
        assert_eq!(start_key_code(StartKey::Space), KeyCode::Space);
        assert_eq!(start_key_code(StartKey::W), KeyCode::KeyW);
    }
}
