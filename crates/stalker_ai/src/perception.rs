//! Line-of-sight perception.
//!
//! Vision is a forward cone plus an occlusion ray. The ray collects every
//! surface between the eye and the target: a single hideable surface anywhere
//! along it hides the target, even when some other surface is struck first.
//!
//! Checks run on their own cadence (`los_check_interval`) by accumulating
//! tick time, which bounds raycast cost independently of the frame rate. Once
//! the target is spotted the module latches and never checks again.

use crate::config::AgentConfig;
use crate::heading::angle_between;
use crate::layers::{LayerMask, SurfaceLayer};
use crate::navigation::Pose;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Closer than this the direction to the target is meaningless
const MIN_SIGHT_DISTANCE: f32 = 0.001;

/// Raycast backend used for occlusion tests
pub trait LineOfSight {
    /// Cast a ray and report the layer of every surface it crosses within
    /// `max_distance`, nearest first. `direction` is normalized.
    fn cast_ray_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<SurfaceLayer>;
}

/// Line of sight through empty space
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSight;

impl LineOfSight for OpenSight {
    fn cast_ray_all(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Vec<SurfaceLayer> {
        Vec::new()
    }
}

/// Vision parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SightConfig {
    /// Half of the vision cone (radians)
    pub half_fov: f32,
    /// Eye height above the agent origin
    pub eye_height: f32,
    /// Seconds between checks
    pub check_interval: f32,
    /// Layers that hide the target
    pub hideable: LayerMask,
}

impl From<&AgentConfig> for SightConfig {
    fn from(config: &AgentConfig) -> Self {
        Self {
            half_fov: config.half_fov_radians(),
            eye_height: config.eye_height,
            check_interval: config.los_check_interval,
            hideable: config.hideable_layers,
        }
    }
}

/// Outcome of a single sight evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SightResult {
    /// Target is in the cone and nothing hides it
    Visible,
    /// Target overlaps the eye
    TooClose,
    /// Target is outside the vision cone
    OutsideCone,
    /// A hideable surface lies on the ray
    Occluded,
}

/// Perception state for one agent
#[derive(Debug, Clone)]
pub struct Perception {
    sight: SightConfig,
    spotted: bool,
    since_last_check: f32,
    checks_run: u32,
}

impl Perception {
    /// Create a perception module that has not seen anything yet
    pub fn new(sight: SightConfig) -> Self {
        Self {
            sight,
            spotted: false,
            since_last_check: 0.0,
            checks_run: 0,
        }
    }

    /// Whether the target has ever been seen (never resets)
    pub fn has_spotted(&self) -> bool {
        self.spotted
    }

    /// Time accumulated toward the next check
    pub fn since_last_check(&self) -> f32 {
        self.since_last_check
    }

    /// Number of sight evaluations performed
    pub fn checks_run(&self) -> u32 {
        self.checks_run
    }

    /// Eye position for a body pose
    pub fn eye_position(&self, pose: &Pose) -> Vec3 {
        pose.position + Vec3::Y * self.sight.eye_height
    }

    /// Advance the check timer and, when a check is due, look for the target.
    ///
    /// Returns true only on the tick the target is first spotted. An
    /// unresolved target consumes the check without detecting anything.
    pub fn update(
        &mut self,
        delta_time: f32,
        pose: &Pose,
        target: Option<Vec3>,
        line_of_sight: &dyn LineOfSight,
    ) -> bool {
        if self.spotted {
            return false;
        }

        self.since_last_check += delta_time;
        if self.since_last_check < self.sight.check_interval {
            return false;
        }
        self.since_last_check = 0.0;

        let Some(target) = target else {
            log::trace!("Sight check skipped: target unresolved");
            return false;
        };

        self.checks_run += 1;
        let result = self.evaluate(pose, target, line_of_sight);
        log::trace!("Sight check #{}: {:?}", self.checks_run, result);

        if result == SightResult::Visible {
            self.spotted = true;
            return true;
        }
        false
    }

    /// Evaluate visibility of `target` from `pose` without touching state
    pub fn evaluate(&self, pose: &Pose, target: Vec3, line_of_sight: &dyn LineOfSight) -> SightResult {
        let eye = self.eye_position(pose);
        let to_target = target - eye;
        let distance = to_target.length();

        if distance < MIN_SIGHT_DISTANCE {
            return SightResult::TooClose;
        }

        let direction = to_target / distance;
        if angle_between(pose.forward(), direction) > self.sight.half_fov {
            return SightResult::OutsideCone;
        }

        let hits = line_of_sight.cast_ray_all(eye, direction, distance);
        if self.sight.hideable.intersects_any(&hits) {
            return SightResult::Occluded;
        }

        SightResult::Visible
    }
}
