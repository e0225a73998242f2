//! Agent configuration

use crate::error::{Result, StalkerError};
use crate::layers::LayerMask;
use serde::{Deserialize, Serialize};

/// Tunables for a stalker agent. Read-only once the agent is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Extra slack (on top of the navigator's stopping distance) for
    /// counting a waypoint as reached
    pub waypoint_threshold: f32,

    /// Wrap back to the first waypoint instead of ending the round
    pub loop_route: bool,

    /// Seconds spent resting between patrol rounds
    pub patrol_interval: f32,

    /// Navigator speed while patrolling
    pub walk_speed: f32,

    /// Navigator speed while pursuing
    pub run_speed: f32,

    /// Turn rate while scanning at a waypoint (degrees per second)
    pub turn_speed: f32,

    /// Full width of the vision cone (degrees)
    pub field_of_view: f32,

    /// Height of the eyes above the agent origin
    pub eye_height: f32,

    /// Seconds between line-of-sight checks
    pub los_check_interval: f32,

    /// Surface layers the target can hide behind
    pub hideable_layers: LayerMask,

    /// Planar distance at which the target is caught
    pub capture_distance: f32,

    /// Ask the host to halt its simulation clock on capture
    pub freeze_time_on_capture: bool,

    /// Damping time for locomotion signals (seconds, 0 = no smoothing)
    pub animation_damping: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            waypoint_threshold: 0.5,
            loop_route: true,
            patrol_interval: 5.0,
            walk_speed: 1.5,
            run_speed: 4.5,
            turn_speed: 720.0,
            field_of_view: 90.0,
            eye_height: 1.6,
            los_check_interval: 0.2,
            hideable_layers: LayerMask::default(),
            capture_distance: 1.2,
            freeze_time_on_capture: true,
            animation_damping: 0.1,
        }
    }
}

impl AgentConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the loop flag
    pub fn with_loop(mut self, loop_route: bool) -> Self {
        self.loop_route = loop_route;
        self
    }

    /// Set the rest time between rounds
    pub fn with_patrol_interval(mut self, seconds: f32) -> Self {
        self.patrol_interval = seconds;
        self
    }

    /// Set walk and run speeds
    pub fn with_speeds(mut self, walk: f32, run: f32) -> Self {
        self.walk_speed = walk;
        self.run_speed = run;
        self
    }

    /// Set the vision cone width (degrees)
    pub fn with_field_of_view(mut self, degrees: f32) -> Self {
        self.field_of_view = degrees;
        self
    }

    /// Set the line-of-sight cadence
    pub fn with_los_check_interval(mut self, seconds: f32) -> Self {
        self.los_check_interval = seconds;
        self
    }

    /// Set the capture distance
    pub fn with_capture_distance(mut self, distance: f32) -> Self {
        self.capture_distance = distance;
        self
    }

    /// Set the hideable layers
    pub fn with_hideable_layers(mut self, layers: LayerMask) -> Self {
        self.hideable_layers = layers;
        self
    }

    /// Set the scanning turn rate (degrees per second)
    pub fn with_turn_speed(mut self, degrees_per_second: f32) -> Self {
        self.turn_speed = degrees_per_second;
        self
    }

    /// Set locomotion damping time
    pub fn with_animation_damping(mut self, seconds: f32) -> Self {
        self.animation_damping = seconds;
        self
    }

    /// Half of the vision cone in radians
    pub fn half_fov_radians(&self) -> f32 {
        (self.field_of_view * 0.5).to_radians()
    }

    /// Turn rate in radians per second
    pub fn turn_speed_radians(&self) -> f32 {
        self.turn_speed.to_radians()
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("waypoint_threshold", self.waypoint_threshold),
            ("patrol_interval", self.patrol_interval),
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("turn_speed", self.turn_speed),
            ("eye_height", self.eye_height),
            ("los_check_interval", self.los_check_interval),
            ("capture_distance", self.capture_distance),
            ("animation_damping", self.animation_damping),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(StalkerError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !(self.field_of_view > 0.0 && self.field_of_view <= 360.0) {
            return Err(StalkerError::InvalidConfig(format!(
                "field_of_view must be in (0, 360] degrees, got {}",
                self.field_of_view
            )));
        }

        Ok(())
    }
}
