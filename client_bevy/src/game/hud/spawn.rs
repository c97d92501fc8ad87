use bevy::prelude::*;

use super::types::{
    panel_bg, toggle_color, HudMessageBox, HudMessageText, HudSettingsButton, HudSettingsPanel,
    HudStatusText, InvertToggle, EDGE, MESSAGE_MAX_WIDTH, SETTINGS_BUTTON_SIZE,
    SETTINGS_PANEL_TOP, STATUS_INSET,
};

pub(super) fn spawn_hud(mut commands: Commands) {
    let body = TextFont::from_font_size(16.0);

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(STATUS_INSET),
            top: Val::Px(STATUS_INSET),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        BackgroundColor(panel_bg(0.5)),
        BorderRadius::all(Val::Px(5.0)),
        Text::new(""),
        TextFont::from_font_size(20.0),
        TextColor(Color::WHITE),
        HudStatusText,
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(EDGE),
                bottom: Val::Px(EDGE),
                max_width: Val::Px(MESSAGE_MAX_WIDTH),
                padding: UiRect::all(Val::Px(EDGE)),
                ..default()
            },
            BackgroundColor(panel_bg(0.7)),
            BorderRadius::all(Val::Px(10.0)),
            Visibility::Hidden,
            HudMessageBox,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                body.clone(),
                TextColor(Color::WHITE),
                HudMessageText,
            ));
        });

    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(EDGE),
                top: Val::Px(EDGE),
                width: Val::Px(SETTINGS_BUTTON_SIZE),
                height: Val::Px(SETTINGS_BUTTON_SIZE),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(panel_bg(0.5)),
            BorderRadius::MAX,
            HudSettingsButton,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("*"),
                TextFont::from_font_size(22.0),
                TextColor(Color::WHITE),
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(EDGE),
                top: Val::Px(SETTINGS_PANEL_TOP),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(EDGE)),
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(panel_bg(0.8)),
            BorderRadius::all(Val::Px(10.0)),
            Visibility::Hidden,
            HudSettingsPanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Settings"),
                TextFont::from_font_size(18.0),
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new("Cursor Orientation"),
                body.clone(),
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
            ));
            parent
                .spawn(Node {
                    column_gap: Val::Px(10.0),
                    ..default()
                })
                .with_children(|row| {
                    for toggle in [InvertToggle::X, InvertToggle::Y] {
                        row.spawn((
                            Button,
                            Node {
                                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                                ..default()
                            },
                            BackgroundColor(toggle_color(false)),
                            BorderRadius::all(Val::Px(5.0)),
                            toggle,
                        ))
                        .with_children(|button| {
                            button.spawn((
                                Text::new(toggle.label()),
                                body.clone(),
                                TextColor(Color::WHITE),
                            ));
                        });
                    }
                });
        });
}
