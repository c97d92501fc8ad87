use bevy::prelude::*;

use crate::game::core::RaceState;
use crate::game::input::ControlState;

use super::types::{
    toggle_color, HudMessageBox, HudMessageText, HudSettingsButton, HudSettingsPanel,
    HudStatusText, HudUiState, InvertToggle,
};

type ButtonInteractionQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Interaction,
        Option<&'static HudSettingsButton>,
        Option<&'static InvertToggle>,
    ),
    (Changed<Interaction>, With<Button>),
>;

pub(super) fn handle_button_interactions(
    mut q_buttons: ButtonInteractionQuery,
    mut hud_ui: ResMut<HudUiState>,
    mut controls: ResMut<ControlState>,
) {
    for (interaction, settings_button, toggle) in &mut q_buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }

        if settings_button.is_some() {
            hud_ui.settings_visible = !hud_ui.settings_visible;
        }
        match toggle {
            Some(InvertToggle::X) => controls.settings.toggle_x(),
            Some(InvertToggle::Y) => controls.settings.toggle_y(),
            None => {}
        }
    }
}

pub(super) fn update_status_ui(
    race: Res<RaceState>,
    mut q_status: Query<&mut Text, With<HudStatusText>>,
) {
    let line = race.status_line();
    if let Ok(mut text) = q_status.single_mut() {
        if text.0 != line {
            text.0 = line;
        }
    }
}

pub(super) fn update_message_ui(
    race: Res<RaceState>,
    mut q_box: Query<&mut Visibility, With<HudMessageBox>>,
    mut q_text: Query<&mut Text, With<HudMessageText>>,
) {
    let message = race.messages().text();

    if let Ok(mut visibility) = q_box.single_mut() {
        let wanted = if message.is_some() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }

    if let (Some(message), Ok(mut text)) = (message, q_text.single_mut()) {
        if text.0 != message {
            text.0 = message.to_string();
        }
    }
}

pub(super) fn update_settings_ui(
    hud_ui: Res<HudUiState>,
    controls: Res<ControlState>,
    mut q_panel: Query<&mut Visibility, With<HudSettingsPanel>>,
    mut q_toggles: Query<(&InvertToggle, &mut BackgroundColor)>,
) {
    if let Ok(mut visibility) = q_panel.single_mut() {
        *visibility = if hud_ui.settings_visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    for (toggle, mut background) in &mut q_toggles {
        let active = match toggle {
            InvertToggle::X => controls.settings.invert_x,
            InvertToggle::Y => controls.settings.invert_y,
        };
        background.0 = toggle_color(active);
    }
}
