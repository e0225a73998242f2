//! Stalker AI - patrol, perception and pursuit for a stalking enemy
//!
//! This crate drives one enemy agent that:
//!
//! - Patrols a fixed route, resting between rounds and scanning at waypoints
//! - Watches for a tracked target with a vision cone and an occlusion ray
//! - Commits to pursuit for good once the target is seen
//! - Ends the game exactly once when it catches the target
//!
//! Pathfinding, raycasting and presentation stay outside the crate behind the
//! [`Navigator`], [`LineOfSight`] and [`PresentationSink`] traits.
//!
//! # Example
//!
//! ```ignore
//! use stalker_ai::prelude::*;
//!
//! let mut agent = StalkerAgent::builder(my_navigator)
//!     .config(AgentConfig::default().with_loop(false))
//!     .waypoint(Waypoint::at(Vec3::new(0.0, 0.0, 10.0)))
//!     .waypoint(Waypoint::at(Vec3::new(10.0, 0.0, 10.0)).with_wait(3.0))
//!     .target(player_position.clone())
//!     .line_of_sight(physics_raycaster)
//!     .presenter(hud)
//!     .build()?;
//!
//! // Each frame
//! agent.advance(delta_time);
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod heading;
pub mod layers;
pub mod locomotion;
pub mod navigation;
pub mod patrol;
pub mod perception;
pub mod presentation;
pub mod pursuit;

pub mod prelude {
    pub use crate::agent::{AgentBuilder, AgentState, AgentTelemetry, StalkerAgent};
    pub use crate::config::AgentConfig;
    pub use crate::error::{AgentWarning, Result, StalkerError};
    pub use crate::layers::{LayerMask, SurfaceLayer};
    pub use crate::locomotion::{Drive, LocomotionEmitter};
    pub use crate::navigation::{
        shared_position, FnLocator, Locator, Navigator, Pose, SharedPosition,
    };
    pub use crate::patrol::{PatrolCycle, PatrolPhase, Waypoint};
    pub use crate::perception::{LineOfSight, OpenSight, Perception, SightConfig, SightResult};
    pub use crate::presentation::{LocomotionSignals, NullPresenter, PresentationSink};
    pub use crate::pursuit::{CaptureMonitor, Pursuit};
    pub use glam::{Quat, Vec3};
}

pub use prelude::*;
