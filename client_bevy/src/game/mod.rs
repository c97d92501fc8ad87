pub(crate) mod core;
mod course;
mod hud;
pub(crate) mod input;
mod particles;
mod ship;

pub use core::CorePlugin;
pub(crate) use core::UpdateSet;
pub use course::CoursePlugin;
pub use hud::HudPlugin;
pub use input::InputPlugin;
pub use particles::ParticlesPlugin;
pub use ship::ShipPlugin;
