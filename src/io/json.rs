use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::gnc::{angle_diff, UPRIGHT};
use crate::physics::World;
use crate::sim::{EventKind, Flight};
use crate::vehicle::Lander;

/// How a flight ended, computed from its record.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub vehicle: String,
    pub touched_down: bool,
    pub duration_s: f64,
    pub touchdown_vx: f64,
    pub touchdown_vy: f64,
    /// Attitude error from upright at the end of the flight.
    pub orientation_error_deg: f64,
    pub fuel_used_kg: f64,
    /// Signed lateral offset of the reference point from the pad centre, m.
    pub pad_offset_m: f64,
    pub on_pad: bool,
    pub phases: Vec<String>,
}

impl FlightSummary {
    /// `lander` is the vehicle as it started the flight.
    pub fn from_flight(lander: &Lander, world: &World, flight: &Flight) -> Self {
        let last = flight.final_state();
        let pad = world.landing_pad();
        let reference_x = last.pos.x + lander.rotation_center.x;

        FlightSummary {
            vehicle: lander.name.clone(),
            touched_down: flight.touched_down,
            duration_s: last.time,
            touchdown_vx: last.vel.x,
            touchdown_vy: last.vel.y,
            orientation_error_deg: angle_diff(UPRIGHT, last.orientation).magnitude().to_degrees(),
            fuel_used_kg: lander.fuel - last.fuel,
            pad_offset_m: (reference_x - pad.center()) / lander.pixels_per_meter,
            on_pad: flight.touched_down && pad.contains_x(reference_x),
            phases: flight
                .events
                .iter()
                .filter_map(|e| match &e.kind {
                    EventKind::ModeChange { to, .. } => Some(to.clone()),
                    _ => None,
                })
                .collect(),
        }
    }

    pub fn touchdown_speed(&self) -> f64 {
        self.touchdown_vx.hypot(self.touchdown_vy)
    }
}

/// Write flight summary as pretty-printed JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &FlightSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &FlightSummary) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_summary(&mut file, summary)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Pad;
    use crate::sim::SimEvent;
    use crate::vehicle::LanderBuilder;
    use approx::assert_abs_diff_eq;

    fn flight(lander: &Lander) -> Flight {
        let start = lander.snapshot(0, 0.0);
        let mut end = lander.snapshot(600, 10.0);
        end.pos.x = 1020.0;
        end.pos.y = 1000.0;
        end.vel.y = 1.5;
        end.orientation = UPRIGHT + 0.01;
        end.fuel = 380.0;
        Flight {
            trajectory: vec![start.clone(), end.clone()],
            events: vec![
                SimEvent {
                    time: 0.0,
                    kind: EventKind::ModeChange { from: "BEGIN".into(), to: "BEFORE_Y_BURN".into() },
                    state: start,
                },
                SimEvent { time: 10.0, kind: EventKind::Touchdown, state: end },
            ],
            touched_down: true,
        }
    }

    #[test]
    fn summary_measures_touchdown() {
        let lander = LanderBuilder::new("Test").pos(1000.0, 200.0).build();
        let world = World::new(9.8, Pad::flat(900.0, 1000.0, 200.0));
        let s = FlightSummary::from_flight(&lander, &world, &flight(&lander));

        assert!(s.on_pad);
        assert_abs_diff_eq!(s.duration_s, 10.0);
        assert_abs_diff_eq!(s.pad_offset_m, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.fuel_used_kg, 120.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.orientation_error_deg, 0.01_f64.to_degrees(), epsilon = 1e-6);
        assert_abs_diff_eq!(s.touchdown_speed(), 1.5, epsilon = 1e-12);
        assert_eq!(s.phases, vec!["BEFORE_Y_BURN".to_string()]);
    }

    #[test]
    fn json_output_is_valid() {
        let lander = LanderBuilder::new("Test").build();
        let world = World::new(9.8, Pad::flat(900.0, 1000.0, 200.0));
        let summary = FlightSummary::from_flight(&lander, &world, &flight(&lander));

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["vehicle"], "Test");
        assert_eq!(value["touched_down"], true);
        assert_eq!(value["phases"][0], "BEFORE_Y_BURN");
    }
}
