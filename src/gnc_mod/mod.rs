pub mod angle;
pub mod attitude;
pub mod controller;
pub mod error;
pub mod kinematics;
pub mod sequencer;

pub use angle::{angle_diff, wrap_angle, AngleDiff};
pub use attitude::{OrientationController, RotationState, RotationStatus};
pub use controller::Controller;
pub use error::PilotError;
pub use kinematics::{burn_ticks, burn_time, fall_time, vertical_braking, Braking};
pub use sequencer::{MissionSequencer, Phase, PhaseKind, UPRIGHT, UPRIGHT_TOLERANCE};
