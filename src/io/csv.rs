use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::dynamics::state::State;

/// Write trajectory data to CSV format.
///
/// Columns: tick, time, pos_x, pos_y, vel_x, vel_y, orientation_deg,
///          omega, fuel, thrusting, torque
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[State]) -> io::Result<()> {
    writeln!(
        writer,
        "tick,time,pos_x,pos_y,vel_x,vel_y,orientation_deg,omega,fuel,thrusting,torque"
    )?;

    for s in trajectory {
        writeln!(
            writer,
            "{},{:.4},{:.3},{:.3},{:.4},{:.4},{:.3},{:.5},{:.3},{},{:.1}",
            s.tick,
            s.time,
            s.pos.x, s.pos.y,
            s.vel.x, s.vel.y,
            s.orientation.to_degrees(),
            s.omega,
            s.fuel,
            u8::from(s.thrusting),
            s.torque,
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, trajectory: &[State]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}
