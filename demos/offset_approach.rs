use lander_sim::gnc::{MissionSequencer, PhaseKind};
use lander_sim::io::{csv, json::FlightSummary, Scenario};
use lander_sim::sim::rk4_step;

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Drive the sequencer by hand to show the host side of the contract.
    let scenario = Scenario::demo();
    let mut lander = scenario.lander.clone();
    let mut pilot = MissionSequencer::new(&scenario.config);
    let mut last = pilot.phase().kind();

    println!("{:>6}  {:<17} {:>8} {:>8} {:>8}", "t (s)", "phase", "x (px)", "vx", "vy");
    while pilot.phase().kind() != PhaseKind::AfterYBurn {
        pilot.advance(&mut lander, &scenario.world);
        rk4_step(&mut lander, &scenario.world, scenario.config.tick);

        let kind = pilot.phase().kind();
        if kind != last {
            let t = pilot.tick() as f64 * scenario.config.tick;
            println!(
                "{:>6.2}  {:<17} {:>8.1} {:>8.2} {:>8.2}",
                t, kind.as_str(), lander.pos.x, lander.vel.x, lander.vel.y
            );
            last = kind;
        }
        if pilot.tick() as f64 * scenario.config.tick > scenario.config.max_time {
            break;
        }
    }

    // The same flight through the runner, with touchdown detection.
    let flight = lander_sim::sim::simulate(&scenario.lander, &scenario.world, &scenario.config);
    let summary = FlightSummary::from_flight(&scenario.lander, &scenario.world, &flight);
    println!();
    println!(
        "touchdown {:.2} m/s, pad offset {:.1} m, fuel used {:.1} kg",
        summary.touchdown_speed(),
        summary.pad_offset_m,
        summary.fuel_used_kg
    );

    if let Some(path) = std::env::args().nth(1) {
        csv::write_trajectory_file(&path, &flight.trajectory)?;
        println!("trajectory written to {path}");
    }
    Ok(())
}
