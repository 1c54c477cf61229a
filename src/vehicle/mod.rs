pub mod lander;
pub mod presets;

pub use lander::{Lander, LanderBuilder};
