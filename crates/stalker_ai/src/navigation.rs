//! Navigator interface and position locators.
//!
//! The agent never plans paths itself. It hands destinations to a
//! [`Navigator`] (a navmesh agent, a kinematic mover, a test double) and reads
//! back the navigator's progress at tick boundaries.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Position and orientation of the agent body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// Create a new pose
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create an unrotated pose at a position
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Forward direction of this pose
    pub fn forward(&self) -> Vec3 {
        crate::heading::forward(self.rotation)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Pathfinding / locomotion service driving the agent body
pub trait Navigator {
    /// Request a path to `destination`
    fn set_destination(&mut self, destination: Vec3);

    /// Destination of the current path request, if any
    fn destination(&self) -> Option<Vec3>;

    /// Clear the path and halt
    fn stop(&mut self);

    /// Teleport along the navigation surface. Returns false if the position
    /// could not be mapped onto the surface.
    fn warp(&mut self, position: Vec3) -> bool;

    /// Write the body position directly, bypassing the navigation surface
    fn place(&mut self, position: Vec3);

    /// Whether a path is currently assigned
    fn has_path(&self) -> bool;

    /// Whether a requested path is still being computed
    fn path_pending(&self) -> bool;

    /// Distance left along the current path
    fn remaining_distance(&self) -> f32;

    /// Distance from the destination at which the navigator stops on its own
    fn stopping_distance(&self) -> f32;

    /// Current world-space velocity
    fn velocity(&self) -> Vec3;

    /// Configured travel speed
    fn speed(&self) -> f32;

    /// Change the travel speed
    fn set_speed(&mut self, speed: f32);

    /// Whether the body currently stands on the navigation surface
    fn is_on_navigable_surface(&self) -> bool;

    /// Current body pose
    fn pose(&self) -> Pose;

    /// Write the body orientation
    fn set_rotation(&mut self, rotation: Quat);
}

/// Move the body to `pose` without pathing.
///
/// Warps when the body is on the navigation surface, otherwise writes the
/// position directly. Orientation is always written directly.
pub fn reset_pose<N: Navigator + ?Sized>(navigator: &mut N, pose: Pose) {
    navigator.stop();

    let warped = navigator.is_on_navigable_surface() && navigator.warp(pose.position);
    if !warped {
        log::debug!("Placing agent at {:?} without navigation surface", pose.position);
        navigator.place(pose.position);
    }

    navigator.set_rotation(pose.rotation);
}

/// Resolves a live world position, or `None` while unresolved
pub trait Locator {
    fn locate(&self) -> Option<Vec3>;
}

impl Locator for Vec3 {
    fn locate(&self) -> Option<Vec3> {
        Some(*self)
    }
}

impl Locator for Option<Vec3> {
    fn locate(&self) -> Option<Vec3> {
        *self
    }
}

impl Locator for Cell<Option<Vec3>> {
    fn locate(&self) -> Option<Vec3> {
        self.get()
    }
}

impl<L: Locator + ?Sized> Locator for Rc<L> {
    fn locate(&self) -> Option<Vec3> {
        (**self).locate()
    }
}

impl<L: Locator + ?Sized> Locator for Box<L> {
    fn locate(&self) -> Option<Vec3> {
        (**self).locate()
    }
}

/// Locator backed by a closure
pub struct FnLocator<F>(pub F);

impl<F> Locator for FnLocator<F>
where
    F: Fn() -> Option<Vec3>,
{
    fn locate(&self) -> Option<Vec3> {
        (self.0)()
    }
}

/// A shared, externally updated position
pub type SharedPosition = Rc<Cell<Option<Vec3>>>;

/// Create a shared position slot
pub fn shared_position(initial: Option<Vec3>) -> SharedPosition {
    Rc::new(Cell::new(initial))
}
