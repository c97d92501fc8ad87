mod spawn;
mod systems;
mod types;

use bevy::prelude::*;

use types::HudUiState;

use super::UpdateSet;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudUiState>()
            .add_systems(Startup, spawn::spawn_hud)
            .add_systems(
                Update,
                (
                    systems::handle_button_interactions,
                    systems::update_status_ui,
                    systems::update_message_ui,
                    systems::update_settings_ui,
                )
                    .chain()
                    .in_set(UpdateSet::Hud),
            );
    }
}
