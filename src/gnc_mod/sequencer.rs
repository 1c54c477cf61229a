use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::mem;

use super::angle::{angle_diff, wrap_angle};
use super::attitude::{OrientationController, RotationStatus};
use super::error::PilotError;
use super::kinematics::{burn_ticks, burn_time, fall_time, vertical_braking};
use crate::dynamics::state::SimConfig;
use crate::physics::World;
use crate::vehicle::Lander;

/// Orientation with the thrust axis pointing straight up (screen -y).
pub const UPRIGHT: f64 = 3.0 * FRAC_PI_2;

/// Largest attitude error accepted before a vertical burn without uprighting.
pub const UPRIGHT_TOLERANCE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Mission phases
// ---------------------------------------------------------------------------

/// Phase identity without per-phase data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Begin,
    Rotation1,
    InitiateXBurn1,
    XBurn1,
    Rotation2,
    InitiateXBurn2,
    XBurn2,
    Rotation3,
    BeforeYBurn,
    YBurn,
    AfterYBurn,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Begin => "BEGIN",
            PhaseKind::Rotation1 => "ROTATION1",
            PhaseKind::InitiateXBurn1 => "INITIATE_X_BURN1",
            PhaseKind::XBurn1 => "X_BURN1",
            PhaseKind::Rotation2 => "ROTATION2",
            PhaseKind::InitiateXBurn2 => "INITIATE_X_BURN2",
            PhaseKind::XBurn2 => "X_BURN2",
            PhaseKind::Rotation3 => "ROTATION3",
            PhaseKind::BeforeYBurn => "BEFORE_Y_BURN",
            PhaseKind::YBurn => "Y_BURN",
            PhaseKind::AfterYBurn => "AFTER_Y_BURN",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mission phase with the data it carries forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Begin,
    /// Face the pad: thrust axis towards it.
    Rotation1 { target: f64 },
    InitiateXBurn1 { flip_target: f64 },
    XBurn1 { stop_tick: u64, flip_target: f64 },
    /// Flip by pi to brake the closing velocity.
    Rotation2 { target: f64 },
    InitiateXBurn2,
    XBurn2 { stop_tick: u64 },
    Rotation3,
    /// Waiting for the vertical burn trigger; `uprighting` while the thrust
    /// axis is still being brought to [`UPRIGHT`].
    BeforeYBurn { uprighting: bool },
    YBurn { stop_tick: u64 },
    AfterYBurn,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Begin => PhaseKind::Begin,
            Phase::Rotation1 { .. } => PhaseKind::Rotation1,
            Phase::InitiateXBurn1 { .. } => PhaseKind::InitiateXBurn1,
            Phase::XBurn1 { .. } => PhaseKind::XBurn1,
            Phase::Rotation2 { .. } => PhaseKind::Rotation2,
            Phase::InitiateXBurn2 => PhaseKind::InitiateXBurn2,
            Phase::XBurn2 { .. } => PhaseKind::XBurn2,
            Phase::Rotation3 => PhaseKind::Rotation3,
            Phase::BeforeYBurn { .. } => PhaseKind::BeforeYBurn,
            Phase::YBurn { .. } => PhaseKind::YBurn,
            Phase::AfterYBurn => PhaseKind::AfterYBurn,
        }
    }
}

// ---------------------------------------------------------------------------
// Mission sequencer
// ---------------------------------------------------------------------------

/// Per-tick landing autopilot.
///
/// Drives the lander through align, horizontal brake, flip, vertical brake
/// and descent. Never declares success: the mission ends when the host
/// detects touchdown.
#[derive(Debug, Clone)]
pub struct MissionSequencer {
    phase: Phase,
    tick: u64,
    tick_duration: f64,
    flip_time: f64,
    attitude: OrientationController,
    last_error: Option<PilotError>,
}

impl MissionSequencer {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            phase: Phase::Begin,
            tick: 0,
            tick_duration: config.tick,
            flip_time: config.flip_time,
            attitude: OrientationController::new(),
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks elapsed since mission start.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn attitude(&self) -> &OrientationController {
        &self.attitude
    }

    /// Run one tick of the autopilot, writing the lander's actuator fields.
    pub fn advance(&mut self, lander: &mut Lander, world: &World) {
        lander.thrust = lander.max_thrust;

        let pad = world.landing_pad();
        let dist_to_pad = (pad.begin.y - lander.bottom_y()) / lander.pixels_per_meter;

        let next = match self.phase {
            Phase::Begin => self.plan_approach(lander, world, dist_to_pad),
            Phase::Rotation1 { target } => match self.attitude.rotate_to(lander, target) {
                RotationStatus::Done { .. } => {
                    self.attitude.reset();
                    Phase::InitiateXBurn1 { flip_target: wrap_angle(target - PI) }
                }
                RotationStatus::InProgress => self.phase,
            },
            Phase::InitiateXBurn1 { flip_target } => {
                let dx = (lander.reference_x() - pad.center()).abs() / lander.pixels_per_meter;
                let closing_speed = dx / self.flip_time;
                let delta_v = lander.vel.x.abs() + closing_speed;
                log::debug!("closing on pad: {dx:.1} m away, target speed {closing_speed:.2} m/s");
                let stop_tick = self.start_horizontal_burn(lander, delta_v);
                Phase::XBurn1 { stop_tick, flip_target }
            }
            Phase::XBurn1 { stop_tick, flip_target } => {
                if self.tick >= stop_tick {
                    lander.thrusting = false;
                    Phase::Rotation2 { target: flip_target }
                } else {
                    self.phase
                }
            }
            Phase::Rotation2 { target } => match self.attitude.rotate_to(lander, target) {
                RotationStatus::Done { .. } => {
                    self.attitude.reset();
                    Phase::InitiateXBurn2
                }
                RotationStatus::InProgress => self.phase,
            },
            Phase::InitiateXBurn2 => {
                let stop_tick = self.start_horizontal_burn(lander, lander.vel.x.abs());
                Phase::XBurn2 { stop_tick }
            }
            Phase::XBurn2 { stop_tick } => {
                if self.tick >= stop_tick {
                    lander.thrusting = false;
                    Phase::Rotation3
                } else {
                    self.phase
                }
            }
            Phase::Rotation3 => match self.attitude.rotate_to(lander, UPRIGHT) {
                RotationStatus::Done { .. } => {
                    self.attitude.reset();
                    before_y_burn(lander)
                }
                RotationStatus::InProgress => self.phase,
            },
            Phase::BeforeYBurn { uprighting: true } => {
                match self.attitude.rotate_to(lander, UPRIGHT) {
                    RotationStatus::Done { .. } => {
                        self.attitude.reset();
                        Phase::BeforeYBurn { uprighting: false }
                    }
                    RotationStatus::InProgress => self.phase,
                }
            }
            Phase::BeforeYBurn { uprighting: false } => self.arm_vertical_burn(lander, world, dist_to_pad),
            Phase::YBurn { stop_tick } => {
                if self.tick >= stop_tick {
                    lander.thrusting = false;
                    Phase::AfterYBurn
                } else {
                    self.phase
                }
            }
            Phase::AfterYBurn => Phase::AfterYBurn,
        };

        if next.kind() != self.phase.kind() {
            log::info!("tick {}: {} -> {}", self.tick, self.phase.kind(), next.kind());
        }
        self.phase = next;
        self.tick += 1;
    }

    /// Predict where a gravity-only fall lands and pick the approach.
    fn plan_approach(&mut self, lander: &Lander, world: &World, dist_to_pad: f64) -> Phase {
        let pad = world.landing_pad();
        let fall_t = match fall_time(lander.vel.y, dist_to_pad, world.gravity) {
            Ok(t) => t,
            Err(e) => {
                self.absorb(e);
                return before_y_burn(lander);
            }
        };
        let x_pred = lander.reference_x() + lander.vel.x * fall_t * lander.pixels_per_meter;
        log::debug!("fall time {fall_t:.2} s, projected touchdown x {x_pred:.1} px");

        if x_pred < pad.begin.x {
            Phase::Rotation1 { target: 0.0 }
        } else if x_pred > pad.right() {
            Phase::Rotation1 { target: PI }
        } else {
            before_y_burn(lander)
        }
    }

    /// Light the engine for a horizontal speed change; returns the stop tick.
    fn start_horizontal_burn(&mut self, lander: &mut Lander, delta_v: f64) -> u64 {
        match burn_time(delta_v, lander.thrust, lander.orientation, lander.total_mass()) {
            Ok(duration) => {
                let ticks = burn_ticks(duration, self.tick_duration);
                log::info!("burn for {duration:.3} s = {ticks} ticks");
                warn_if_short_on_fuel(lander, duration);
                lander.thrusting = ticks > 0;
                self.tick + ticks
            }
            Err(e) => {
                self.absorb(e);
                lander.thrusting = false;
                self.tick
            }
        }
    }

    /// Arm the vertical burn once the stopping distance reaches the pad.
    fn arm_vertical_burn(&mut self, lander: &mut Lander, world: &World, dist_to_pad: f64) -> Phase {
        let braking = match vertical_braking(
            lander.vel.y,
            world.gravity,
            lander.thrust,
            lander.orientation,
            lander.total_mass(),
        ) {
            Ok(b) => b,
            Err(e) => {
                self.absorb(e);
                return self.phase;
            }
        };

        if braking.distance >= dist_to_pad {
            let ticks = burn_ticks(braking.time, self.tick_duration);
            log::info!(
                "vertical burn at {:.1} m: {:.3} s = {} ticks, decel {:.2} m/s^2",
                dist_to_pad,
                braking.time,
                ticks,
                -braking.accel
            );
            warn_if_short_on_fuel(lander, braking.time);
            lander.thrusting = true;
            Phase::YBurn { stop_tick: self.tick + ticks }
        } else {
            self.phase
        }
    }

    /// Degenerate numerics are logged once per kind and otherwise ignored.
    /// Returns whether this error was reported.
    fn absorb(&mut self, err: PilotError) -> bool {
        let repeated = self
            .last_error
            .is_some_and(|last| mem::discriminant(&last) == mem::discriminant(&err));
        if !repeated {
            log::warn!("tick {}: {err}; falling back", self.tick);
        }
        self.last_error = Some(err);
        !repeated
    }

    #[cfg(test)]
    pub(crate) fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }
}

fn before_y_burn(lander: &Lander) -> Phase {
    let error = angle_diff(lander.orientation, UPRIGHT).magnitude();
    Phase::BeforeYBurn { uprighting: error > UPRIGHT_TOLERANCE }
}

fn warn_if_short_on_fuel(lander: &Lander, duration: f64) -> bool {
    let needed = lander.mass_flow() * duration;
    let short = needed > lander.fuel;
    if short {
        log::warn!(
            "{}: burn needs {:.1} kg of propellant, {:.1} kg left",
            lander.name,
            needed,
            lander.fuel
        );
    }
    short
}

impl super::Controller for MissionSequencer {
    fn control(&mut self, lander: &mut Lander, world: &World) {
        self.advance(lander, world);
    }

    fn reset(&mut self) {
        self.phase = Phase::Begin;
        self.tick = 0;
        self.attitude.reset();
        self.last_error = None;
    }

    fn name(&self) -> &str {
        "MissionSequencer"
    }

    fn mode(&self) -> &str {
        self.phase.kind().as_str()
    }
}
