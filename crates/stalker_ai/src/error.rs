//! Error and warning types for the agent controller

use thiserror::Error;

/// Errors raised while building an agent
#[derive(Debug, Error)]
pub enum StalkerError {
    /// A configuration value is out of range
    #[error("Invalid agent configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed
    #[error("Failed to parse agent configuration: {0}")]
    ConfigParse(String),
}

impl From<serde_json::Error> for StalkerError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, StalkerError>;

/// Non-fatal configuration problems.
///
/// Each warning is logged once per agent; the agent keeps running in a
/// degraded (idle or inert) mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AgentWarning {
    /// The route has no waypoints at all
    #[error("no waypoints assigned; agent will stay at rest")]
    NoWaypoints,

    /// A round was due but no waypoint anchor resolved to a position
    #[error("no waypoint resolves to a position; patrol round postponed")]
    NoResolvableWaypoint,

    /// No target locator was supplied or it did not resolve at startup
    #[error("target is unresolved; perception and pursuit are inert until it resolves")]
    UnresolvedTarget,
}
