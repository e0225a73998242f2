//! Scenario configuration
//!
//! A scenario describes one agent, its route, the target's path and the
//! occluders in the world.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Path given on the command line
//! 2. Environment variable: `STALKER_SCENARIO=path/to/scenario.toml`
//! 3. The built-in courtyard scenario
//!
//! `STALKER_TICKS` and `STALKER_DT` override the run length and step of
//! whichever scenario was loaded.

use crate::error::{Result, SimError};
use crate::navigator::NavigatorSettings;
use crate::occluders::Occluder;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use stalker_ai::config::AgentConfig;
use stalker_ai::navigation::Pose;
use stalker_ai::patrol::Waypoint;
use std::path::Path;

const BUILTIN: &str = include_str!("../scenarios/courtyard.toml");

/// Run length and step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum number of ticks
    pub ticks: u32,
    /// Seconds per tick
    pub dt: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 3000,
            dt: 0.02,
        }
    }
}

/// Where the agent starts (and returns after each round)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

impl HomeConfig {
    /// Pose for this home
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, Quat::from_rotation_y(self.yaw_degrees.to_radians()))
    }
}

/// One route stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaypointConfig {
    pub position: Vec3,
    /// Scan here for this many seconds
    #[serde(default)]
    pub wait: Option<f32>,
}

impl WaypointConfig {
    /// Build the runtime waypoint
    pub fn to_waypoint(&self) -> Waypoint {
        let waypoint = Waypoint::at(self.position);
        match self.wait {
            Some(seconds) => waypoint.with_wait(seconds),
            None => waypoint,
        }
    }
}

/// Scripted target path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub path: Vec<Vec3>,
    #[serde(default = "default_target_speed")]
    pub speed: f32,
    #[serde(default)]
    pub looped: bool,
}

fn default_target_speed() -> f32 {
    1.0
}

/// Complete scenario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    pub run: RunConfig,
    pub home: HomeConfig,
    pub agent: AgentConfig,
    pub navigator: NavigatorSettings,
    pub waypoints: Vec<WaypointConfig>,
    pub target: Option<TargetConfig>,
    pub occluders: Vec<Occluder>,
    /// Where the scenario was loaded from
    #[serde(skip)]
    pub source: Option<String>,
}

impl ScenarioConfig {
    /// Load a scenario from all sources
    pub fn load(path: Option<&str>) -> Result<Self> {
        let env_path = std::env::var("STALKER_SCENARIO").ok().filter(|p| !p.is_empty());

        let mut scenario = match path.map(str::to_string).or(env_path) {
            Some(path) => {
                let loaded = Self::load_from_file(&path)?;
                log::info!("Loaded scenario '{}' from {}", loaded.name, path);
                loaded
            }
            None => {
                log::info!("No scenario given, using built-in courtyard");
                Self::builtin()?
            }
        };

        scenario.apply_env_overrides();
        scenario.validate()?;
        Ok(scenario)
    }

    /// The built-in courtyard scenario
    pub fn builtin() -> Result<Self> {
        let mut scenario = Self::from_toml_str(BUILTIN)?;
        scenario.source = Some("builtin".to_string());
        Ok(scenario)
    }

    /// Load a scenario from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut scenario = Self::from_toml_str(&content)?;
        scenario.source = Some(path.display().to_string());
        if scenario.name.is_empty() {
            scenario.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(scenario)
    }

    /// Parse a scenario from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `STALKER_TICKS` / `STALKER_DT`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(ticks) = std::env::var("STALKER_TICKS") {
            match ticks.parse() {
                Ok(ticks) => {
                    self.run.ticks = ticks;
                    log::info!("Tick limit from env: {}", ticks);
                }
                Err(_) => log::warn!("Ignoring STALKER_TICKS={:?}", ticks),
            }
        }

        if let Ok(dt) = std::env::var("STALKER_DT") {
            match dt.parse() {
                Ok(dt) => {
                    self.run.dt = dt;
                    log::info!("Tick step from env: {}", dt);
                }
                Err(_) => log::warn!("Ignoring STALKER_DT={:?}", dt),
            }
        }
    }

    /// Check run parameters and the agent configuration
    pub fn validate(&self) -> Result<()> {
        if !self.run.dt.is_finite() || self.run.dt <= 0.0 {
            return Err(SimError::InvalidScenario(format!(
                "tick step must be positive, got {}",
                self.run.dt
            )));
        }
        if let Some(target) = &self.target {
            if !target.speed.is_finite() || target.speed < 0.0 {
                return Err(SimError::InvalidScenario(format!(
                    "target speed must be non-negative, got {}",
                    target.speed
                )));
            }
        }
        self.agent.validate()?;
        Ok(())
    }

    /// Runtime waypoints for the agent
    pub fn build_waypoints(&self) -> Vec<Waypoint> {
        self.waypoints.iter().map(WaypointConfig::to_waypoint).collect()
    }
}
