use bevy::prelude::*;

use crate::constants::{color_from_hex, Colors};

pub(super) const EDGE: f32 = 20.0;
pub(super) const STATUS_INSET: f32 = 10.0;
pub(super) const MESSAGE_MAX_WIDTH: f32 = 300.0;
pub(super) const SETTINGS_BUTTON_SIZE: f32 = 32.0;
pub(super) const SETTINGS_PANEL_TOP: f32 = 60.0;

#[derive(Resource, Default)]
pub(crate) struct HudUiState {
    pub(crate) settings_visible: bool,
}

#[derive(Component)]
pub(super) struct HudStatusText;

#[derive(Component)]
pub(super) struct HudMessageBox;

#[derive(Component)]
pub(super) struct HudMessageText;

#[derive(Component)]
pub(super) struct HudSettingsButton;

#[derive(Component)]
pub(super) struct HudSettingsPanel;

/// Pointer axis flipped by a settings toggle.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum InvertToggle {
    X,
    Y,
}

impl InvertToggle {
    pub(super) fn label(self) -> &'static str {
        match self {
            InvertToggle::X => "Invert X",
            InvertToggle::Y => "Invert Y",
        }
    }
}

pub(super) fn panel_bg(alpha: f32) -> Color {
    Color::srgba(0.0, 0.0, 0.0, alpha)
}

pub(super) fn toggle_color(active: bool) -> Color {
    if active {
        color_from_hex(Colors::TOGGLE_ON)
    } else {
        color_from_hex(Colors::TOGGLE_OFF)
    }
}
