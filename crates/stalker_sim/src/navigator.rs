//! Straight-line kinematic navigator.
//!
//! No obstacle avoidance: the body slides toward its destination on the XZ
//! plane at the configured speed and turns toward its direction of travel.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use stalker_ai::heading::{look_rotation, planar_distance, rotate_towards};
use stalker_ai::navigation::{Navigator, Pose};

/// Rectangular navigable area on the XZ plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl NavBounds {
    /// Whether a point lies on the area (height ignored)
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.z >= self.min_z && point.z <= self.max_z
    }

    /// Clamp a point onto the area
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y,
            point.z.clamp(self.min_z, self.max_z),
        )
    }
}

/// Navigator tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorSettings {
    /// The body halts this far from its destination
    pub stopping_distance: f32,
    /// Ticks a fresh path request stays pending
    pub path_latency_ticks: u32,
    /// Turn rate toward the direction of travel (degrees per second)
    pub angular_speed: f32,
    /// Navigable area; unbounded when absent
    pub bounds: Option<NavBounds>,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            stopping_distance: 0.0,
            path_latency_ticks: 1,
            angular_speed: 360.0,
            bounds: None,
        }
    }
}

/// Kinematic [`Navigator`] integrated by the host once per tick
#[derive(Debug, Clone)]
pub struct KinematicNavigator {
    settings: NavigatorSettings,
    pose: Pose,
    destination: Option<Vec3>,
    pending_ticks: u32,
    velocity: Vec3,
    speed: f32,
    destination_requests: u32,
}

impl KinematicNavigator {
    /// Create a navigator standing at `pose`
    pub fn new(pose: Pose, settings: NavigatorSettings) -> Self {
        Self {
            settings,
            pose,
            destination: None,
            pending_ticks: 0,
            velocity: Vec3::ZERO,
            speed: 0.0,
            destination_requests: 0,
        }
    }

    /// Navigator tunables
    pub fn settings(&self) -> &NavigatorSettings {
        &self.settings
    }

    /// Number of `set_destination` calls received
    pub fn destination_requests(&self) -> u32 {
        self.destination_requests
    }

    /// Move the body for one tick
    pub fn integrate(&mut self, delta_time: f32) {
        if self.pending_ticks > 0 {
            self.pending_ticks -= 1;
            self.velocity = Vec3::ZERO;
            return;
        }

        let Some(destination) = self.destination else {
            self.velocity = Vec3::ZERO;
            return;
        };

        let distance = planar_distance(self.pose.position, destination);
        let travel = distance - self.settings.stopping_distance;
        if travel <= 0.0 || delta_time <= 0.0 {
            self.velocity = Vec3::ZERO;
            return;
        }

        let to = Vec3::new(
            destination.x - self.pose.position.x,
            0.0,
            destination.z - self.pose.position.z,
        );
        let direction = to / distance;
        let step = (self.speed * delta_time).min(travel);

        let mut next = self.pose.position + direction * step;
        if let Some(bounds) = &self.settings.bounds {
            next = bounds.clamp(next);
        }

        self.velocity = (next - self.pose.position) / delta_time;
        self.pose.position = next;

        if let Some(goal) = look_rotation(direction) {
            let max_turn = self.settings.angular_speed.to_radians() * delta_time;
            self.pose.rotation = rotate_towards(self.pose.rotation, goal, max_turn);
        }
    }
}

impl Navigator for KinematicNavigator {
    fn set_destination(&mut self, destination: Vec3) {
        // Only a fresh request waits on planning; retargeting a live path is immediate
        if self.destination.is_none() {
            self.pending_ticks = self.settings.path_latency_ticks;
        }
        self.destination = Some(destination);
        self.destination_requests += 1;
    }

    fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    fn stop(&mut self) {
        self.destination = None;
        self.pending_ticks = 0;
        self.velocity = Vec3::ZERO;
    }

    fn warp(&mut self, position: Vec3) -> bool {
        let on_surface = self.settings.bounds.map_or(true, |b| b.contains(position));
        if !on_surface {
            log::debug!("Warp to {:?} rejected: off the navigable area", position);
            return false;
        }
        self.stop();
        self.pose.position = position;
        true
    }

    fn place(&mut self, position: Vec3) {
        self.pose.position = position;
    }

    fn has_path(&self) -> bool {
        self.destination.is_some() && self.pending_ticks == 0
    }

    fn path_pending(&self) -> bool {
        self.pending_ticks > 0
    }

    fn remaining_distance(&self) -> f32 {
        if self.pending_ticks > 0 {
            return f32::INFINITY;
        }
        self.destination
            .map_or(0.0, |d| planar_distance(self.pose.position, d))
    }

    fn stopping_distance(&self) -> f32 {
        self.settings.stopping_distance
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn is_on_navigable_surface(&self) -> bool {
        self.settings
            .bounds
            .map_or(true, |b| b.contains(self.pose.position))
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.pose.rotation = rotation;
    }
}
