use lander_sim::dynamics::state::SimConfig;
use lander_sim::gnc::{vertical_braking, Controller, UPRIGHT};
use lander_sim::physics::{Pad, World};
use lander_sim::sim;
use lander_sim::vehicle::{Lander, LanderBuilder};

/// Single-burn hover-slam: falls upright, lights the engine once the stopping
/// distance reaches the pad and cuts it when the descent stops.
struct HoverSlam {
    burning: bool,
}

impl Controller for HoverSlam {
    fn control(&mut self, lander: &mut Lander, world: &World) {
        lander.thrust = lander.max_thrust;
        let gap = (world.pad.begin.y - lander.bottom_y()) / lander.pixels_per_meter;

        if !self.burning {
            if let Ok(b) = vertical_braking(
                lander.vel.y,
                world.gravity,
                lander.thrust,
                lander.orientation,
                lander.total_mass(),
            ) {
                self.burning = b.distance >= gap;
            }
        } else if lander.vel.y <= 0.0 {
            self.burning = false;
        }
        lander.thrusting = self.burning;
    }

    fn reset(&mut self) {
        self.burning = false;
    }

    fn name(&self) -> &str {
        "HoverSlam"
    }

    fn mode(&self) -> &str {
        if self.burning { "BURN" } else { "COAST" }
    }
}

fn main() {
    let lander = LanderBuilder::new("Slammer")
        .pos(500.0, 100.0)
        .orientation(UPRIGHT)
        .collision_height(10.0)
        .build();
    let world = World::new(3.71, Pad::flat(400.0, 1500.0, 200.0));
    let config = SimConfig::default();

    let mut controller = HoverSlam { burning: false };
    println!("Simulating with {} controller...", controller.name());
    let flight = sim::simulate_with(&lander, &world, &config, &mut controller);

    let last = flight.final_state();
    println!("Modes: {}", flight.modes().join(" -> "));
    println!("Touchdown: {}", flight.touched_down);
    println!("Final velocity: ({:.2}, {:.2}) m/s", last.vel.x, last.vel.y);
    println!("Fuel used: {:.1} kg", lander.fuel - last.fuel);
    println!("Flight time: {:.1} s", flight.duration());
}
