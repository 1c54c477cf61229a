pub mod physics;
pub mod dynamics;
pub mod vehicle;
mod gnc_mod;
pub mod sim;
pub mod io;

// The gnc module: expose gnc_mod as `gnc` publicly
pub mod gnc {
    pub use crate::gnc_mod::*;
}

pub mod prelude {
    pub use crate::dynamics::state::{SimConfig, State};
    pub use crate::gnc::{Controller, MissionSequencer, Phase, PhaseKind};
    pub use crate::physics::{Pad, World};
    pub use crate::sim::{rk4_step, simulate, simulate_with, Flight};
    pub use crate::vehicle::{presets, Lander, LanderBuilder};
}
