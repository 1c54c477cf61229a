use super::lander::{Lander, LanderBuilder};

// ---------------------------------------------------------------------------
// Preset landers
// ---------------------------------------------------------------------------

/// Crewed-size lander: TWR ~2 at Earth gravity, pi flip in ~5 s.
pub fn eagle() -> Lander {
    LanderBuilder::new("Eagle")
        .dry_mass(1000.0)
        .fuel(500.0)
        .max_thrust(30_000.0)
        .max_torque(1000.0)
        .inertia(2000.0)
        .isp(300.0)
        .pixels_per_meter(2.0)
        .rotation_center(8.0, 8.0)
        .collision_height(16.0)
        .build()
}

/// Light test article with a fast attitude response.
pub fn hopper() -> Lander {
    LanderBuilder::new("Hopper")
        .dry_mass(80.0)
        .fuel(40.0)
        .max_thrust(3000.0)
        .max_torque(400.0)
        .inertia(100.0)
        .isp(220.0)
        .pixels_per_meter(4.0)
        .collision_height(6.0)
        .build()
}

pub fn by_name(name: &str) -> Option<Lander> {
    match name.to_ascii_lowercase().as_str() {
        "eagle" => Some(eagle()),
        "hopper" => Some(hopper()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::G0;

    #[test]
    fn presets_can_hover() {
        for l in [eagle(), hopper()] {
            assert!(l.twr(G0) > 1.0, "{} cannot hover", l.name);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(by_name("EAGLE").map(|l| l.name), Some("Eagle".to_string()));
        assert!(by_name("saturn").is_none());
    }
}
