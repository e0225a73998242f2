//! Output side of the agent: animation signals and game-over effects

use serde::{Deserialize, Serialize};

/// Normalized locomotion parameters for an animation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocomotionSignals {
    /// Forward speed, 1.0 = full configured speed
    pub forward: f32,
    /// Sideways speed, positive to the right
    pub strafe: f32,
    /// Turn intensity in [-1, 1], positive to the right
    pub turn: f32,
    /// Whether the body is on the ground
    pub grounded: bool,
}

/// Receives everything the agent shows to the player
pub trait PresentationSink {
    /// Called once per tick with the damped locomotion signals
    fn set_locomotion_signals(&mut self, signals: &LocomotionSignals);

    /// Called exactly once, when the agent catches the target
    fn on_captured(&mut self);

    /// Called after `on_captured` when the agent is configured to freeze the
    /// world on capture
    fn halt_simulation_clock(&mut self) {}
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl PresentationSink for NullPresenter {
    fn set_locomotion_signals(&mut self, _signals: &LocomotionSignals) {}

    fn on_captured(&mut self) {}
}
