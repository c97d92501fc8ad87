//! Simulation core of Space Race.
//!
//! Everything here is headless: the client drives [`race::Race::step`] once
//! per rendered frame and mirrors the resulting state into its scene.

pub mod collision;
pub mod config;
pub mod course;
pub mod flight;
pub mod hud;
pub mod input;
pub mod messages;
pub mod particles;
pub mod race;
pub mod session;

pub use config::{ConfigError, GameConfig, Variant};
pub use input::{InputState, PointerSettings};
pub use race::{FrameReport, Race, RaceEvent};
