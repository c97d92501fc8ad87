mod config;
mod constants;
mod game;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use game::{CorePlugin, CoursePlugin, HudPlugin, InputPlugin, ParticlesPlugin, ShipPlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Space Race".to_string(),
                resolution: WindowResolution::new(1280, 720),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CorePlugin)
        .add_plugins(InputPlugin)
        .add_plugins(CoursePlugin)
        .add_plugins(ShipPlugin)
        .add_plugins(ParticlesPlugin)
        .add_plugins(HudPlugin)
        .run();
}
