//! Error types for the simulation harness

use thiserror::Error;

/// Harness errors
#[derive(Debug, Error)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(#[from] toml::de::Error),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Agent error: {0}")]
    Agent(#[from] stalker_ai::StalkerError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, SimError>;
