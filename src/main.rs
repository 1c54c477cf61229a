use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use lander_sim::gnc::{angle_diff, UPRIGHT};
use lander_sim::io::{csv, json, Scenario};
use lander_sim::sim::{self, EventKind};
use lander_sim::vehicle::presets;

#[derive(Parser)]
#[command(version, about = "Fly the landing autopilot against a planar lander", long_about = None)]
struct Cli {
    /// Scenario json file path; the built-in lunar demo when omitted
    #[arg(value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Replace the scenario's vehicle with a preset (eagle, hopper), keeping its position
    #[arg(long)]
    preset: Option<String>,

    /// Write the per-tick trajectory as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write the touchdown summary as JSON
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("lander_sim=info"))
        .init();
    let cli = Cli::parse();

    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::demo(),
    };
    if let Some(name) = &cli.preset {
        let mut lander = presets::by_name(name).ok_or_else(|| anyhow!("unknown preset '{name}'"))?;
        lander.pos = scenario.lander.pos;
        lander.vel = scenario.lander.vel;
        lander.orientation = scenario.lander.orientation;
        scenario.lander = lander;
        scenario.validate()?;
    }
    let Scenario { name, lander, world, config } = &scenario;

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let flight = sim::simulate(lander, world, config);
    let summary = json::FlightSummary::from_flight(lander, world, &flight);

    if let Some(path) = &cli.csv {
        csv::write_trajectory_file(path, &flight.trajectory)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &cli.summary {
        json::write_summary_file(path, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    let pad = world.landing_pad();
    println!();
    println!("====================================================================");
    println!("  LANDING SIMULATION — {} ({})", name, lander.name);
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Dry mass:      {:>8.1} kg    Fuel:         {:>8.1} kg",
        lander.dry_mass, lander.fuel
    );
    println!(
        "  Total mass:    {:>8.1} kg    TWR:          {:>8.2}",
        lander.total_mass(),
        lander.twr(world.gravity)
    );
    println!(
        "  Thrust:        {:>8.0} N     Isp:          {:>8.0} s",
        lander.max_thrust, lander.isp
    );
    println!(
        "  Torque:        {:>8.0} N·m   Delta-v:      {:>8.0} m/s",
        lander.max_torque,
        lander.delta_v()
    );
    println!(
        "  Gravity:       {:>8.2} m/s^2 Pad:      {:>6.0}..{:<6.0} px",
        world.gravity,
        pad.begin.x,
        pad.right()
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &flight.events {
        let label = match &e.kind {
            EventKind::ModeChange { to, .. } => to.clone(),
            EventKind::Ignition => "ignition".into(),
            EventKind::Cutoff => "cutoff".into(),
            EventKind::FuelExhausted => "FUEL EXHAUSTED".into(),
            EventKind::Touchdown => "TOUCHDOWN".into(),
        };
        println!(
            "  {:<17} t={:>6.2}s   x={:>7.1}px   y={:>7.1}px   v=({:>6.1}, {:>6.1}) m/s",
            label, e.time, e.state.pos.x, e.state.pos.y, e.state.vel.x, e.state.vel.y
        );
    }
    println!();

    println!("  Touchdown Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    if summary.touched_down {
        println!(
            "  Velocity:      ({:.2}, {:.2}) m/s   |v| = {:.2} m/s",
            summary.touchdown_vx,
            summary.touchdown_vy,
            summary.touchdown_speed()
        );
        println!("  Tilt:          {:>8.2} deg", summary.orientation_error_deg);
        println!(
            "  Pad offset:    {:>8.1} m    {}",
            summary.pad_offset_m,
            if summary.on_pad { "(on pad)" } else { "(missed pad)" }
        );
    } else {
        println!("  No touchdown within {:.0} s", config.max_time);
    }
    println!("  Fuel used:     {:>8.1} kg", summary.fuel_used_kg);
    println!("  Flight time:   {:>8.1} s", summary.duration_s);
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>8}  {:>8}  {:>7}  {:>7}  {:>7}  {:>7}  {:>4}",
        "t (s)", "x (px)", "alt (m)", "vx", "vy", "att(°)", "fuel", "eng"
    );
    println!("  {}", "─".repeat(66));

    let sample_interval = (flight.trajectory.len() / 30).max(1);
    let last = flight.trajectory.len() - 1;
    for (i, s) in flight.trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != last {
            continue;
        }
        let altitude = (pad.begin.y - (s.pos.y + lander.collision_height)) / lander.pixels_per_meter;
        let tilt = angle_diff(UPRIGHT, s.orientation).delta.to_degrees();
        println!(
            "  {:>7.2}  {:>8.1}  {:>8.1}  {:>7.2}  {:>7.2}  {:>7.1}  {:>7.1}  {:>4}",
            s.time,
            s.pos.x,
            altitude,
            s.vel.x,
            s.vel.y,
            tilt,
            s.fuel,
            if s.thrusting { "ON" } else { "" }
        );
    }

    println!();
    println!("  Simulation: {} ticks, tick={:.4} s", last, config.tick);
    println!("====================================================================");
    println!();
    Ok(())
}
