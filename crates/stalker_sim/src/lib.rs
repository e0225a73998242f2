//! Headless world for running a stalker agent end to end.
//!
//! Provides a kinematic navigator, analytic occluders, a scripted target and
//! a fixed-step runner, all configured from a TOML scenario.

pub mod error;
pub mod navigator;
pub mod occluders;
pub mod runner;
pub mod scenario;
pub mod target;

pub use error::{Result, SimError};
pub use navigator::{KinematicNavigator, NavBounds, NavigatorSettings};
pub use occluders::{Occluder, OccluderField};
pub use runner::{Recording, RunSummary, Simulation, Transition};
pub use scenario::{HomeConfig, RunConfig, ScenarioConfig, TargetConfig, WaypointConfig};
pub use target::TargetPath;
