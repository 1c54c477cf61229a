use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use lander_sim::dynamics::state::State;
use lander_sim::io::{json::FlightSummary, Scenario};
use lander_sim::physics::World;
use lander_sim::sim;
use lander_sim::vehicle::Lander;

fn main() -> eframe::Result {
    env_logger::init();
    let scenario = match std::env::args().nth(1) {
        Some(path) => match Scenario::from_file(&path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("{e}; flying the demo instead");
                Scenario::demo()
            }
        },
        None => Scenario::demo(),
    };
    let flight = sim::simulate(&scenario.lander, &scenario.world, &scenario.config);
    let summary = FlightSummary::from_flight(&scenario.lander, &scenario.world, &flight);

    let app = LandingViz {
        trajectory: flight.trajectory,
        summary,
        lander: scenario.lander,
        world: scenario.world,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Lander Autopilot", options, Box::new(|_| Ok(Box::new(app))))
}

struct LandingViz {
    trajectory: Vec<State>,
    summary: FlightSummary,
    lander: Lander,
    world: World,
}

impl LandingViz {
    /// Height of the touchdown point above the pad, m.
    fn altitude(&self, s: &State) -> f64 {
        (self.world.pad.begin.y - (s.pos.y + self.lander.collision_height)) / self.lander.pixels_per_meter
    }
}

impl eframe::App for LandingViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.trajectory.len() / 2000).max(1);
        let sampled: Vec<&State> = self.trajectory.iter().step_by(step).collect();
        let ppm = self.lander.pixels_per_meter;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Vehicle: {}", self.summary.vehicle));
            ui.label(format!(
                "Touchdown: {:.2} m/s  |  Tilt: {:.1}°  |  Pad offset: {:.1} m  |  Fuel used: {:.0} kg  |  Flight: {:.0} s",
                self.summary.touchdown_speed(),
                self.summary.orientation_error_deg,
                self.summary.pad_offset_m,
                self.summary.fuel_used_kg,
                self.summary.duration_s,
            ));
            ui.label(self.summary.phases.join(" → "));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Altitude above pad (m)");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [s.time, self.altitude(s)])
                        .collect();
                    Plot::new("altitude")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Altitude", points));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Velocity (m/s, + down / right)");
                    let vy: PlotPoints = sampled.iter().map(|s| [s.time, s.vel.y]).collect();
                    let vx: PlotPoints = sampled.iter().map(|s| [s.time, s.vel.x]).collect();
                    Plot::new("velocity")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Vertical", vy));
                            plot_ui.line(Line::new("Horizontal", vx));
                        });
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Orientation (deg)");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [s.time, s.orientation.to_degrees()])
                        .collect();
                    Plot::new("orientation")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Orientation", points));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Approach Profile (m)");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [(s.pos.x + self.lander.rotation_center.x) / ppm, self.altitude(s)])
                        .collect();
                    let pad = &self.world.pad;
                    let pad_line: PlotPoints =
                        vec![[pad.begin.x / ppm, 0.0], [pad.right() / ppm, 0.0]].into();
                    Plot::new("profile")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("x (m)")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Trajectory", points));
                            plot_ui.line(Line::new("Pad", pad_line).width(4.0));
                        });
                });
            });
        });
    }
}
