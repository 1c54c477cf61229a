use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dynamics::state::SimConfig;
use crate::physics::{Pad, World};
use crate::vehicle::{presets, Lander};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("cannot read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

/// A complete landing setup: vehicle, environment and timing.
///
/// Every lander and config field is optional in JSON; missing ones take the
/// builder and [`SimConfig`] defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub lander: Lander,
    pub world: World,
    #[serde(default)]
    pub config: SimConfig,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded scenario from {}", path.display());
        Self::from_json(&text)
    }

    /// Reject setups the plant or pilot cannot fly.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let l = &self.lander;
        let positive = [
            ("lander.dry_mass", l.dry_mass),
            ("lander.max_thrust", l.max_thrust),
            ("lander.max_torque", l.max_torque),
            ("lander.inertia", l.inertia),
            ("lander.isp", l.isp),
            ("lander.pixels_per_meter", l.pixels_per_meter),
            ("world.gravity", self.world.gravity),
            ("config.tick", self.config.tick),
            ("config.flip_time", self.config.flip_time),
            ("config.max_time", self.config.max_time),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ScenarioError::Invalid(format!("{field} must be positive, got {value}")));
            }
        }
        if !(l.fuel >= 0.0) {
            return Err(ScenarioError::Invalid(format!("lander.fuel must not be negative, got {}", l.fuel)));
        }
        let pad = &self.world.pad;
        if pad.end.x < pad.begin.x {
            return Err(ScenarioError::Invalid(format!(
                "pad ends at x={} before it begins at x={}",
                pad.end.x, pad.begin.x
            )));
        }
        Ok(())
    }

    /// Lunar approach from short of the pad; exercises every phase.
    pub fn demo() -> Self {
        let mut lander = presets::eagle();
        lander.pos.x = 700.0;
        lander.pos.y = 200.0;
        Scenario {
            name: "Offset lunar approach".into(),
            lander,
            world: World::new(1.62, Pad::flat(900.0, 1000.0, 200.0)),
            config: SimConfig::default(),
        }
    }
}
