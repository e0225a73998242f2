//! Locomotion signals for the animation layer

use crate::heading::signed_yaw_angle;
use crate::navigation::Navigator;
use crate::presentation::LocomotionSignals;
use glam::Vec3;

/// Below this speed setting velocity is not normalized
const MIN_SPEED: f32 = 0.01;

/// Turn angle (radians) that maps to full turn intensity
const FULL_TURN_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

/// Which controller is steering this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    /// Patrol: signals follow the navigator
    Patrol,
    /// Pursuit: forced full-speed run
    Pursuit,
}

/// Emits exponentially damped locomotion signals
#[derive(Debug, Clone)]
pub struct LocomotionEmitter {
    damping: f32,
    current: LocomotionSignals,
}

impl LocomotionEmitter {
    /// Create an emitter at rest
    pub fn new(damping: f32) -> Self {
        Self {
            damping,
            current: LocomotionSignals {
                grounded: true,
                ..Default::default()
            },
        }
    }

    /// Last emitted signals
    pub fn current(&self) -> &LocomotionSignals {
        &self.current
    }

    /// Undamped signals for the current tick
    pub fn raw_signals<N: Navigator + ?Sized>(
        drive: Drive,
        navigator: &N,
        facing_target: Option<Vec3>,
    ) -> LocomotionSignals {
        if drive == Drive::Pursuit {
            return LocomotionSignals {
                forward: 1.0,
                strafe: 0.0,
                turn: 0.0,
                grounded: true,
            };
        }

        let pose = navigator.pose();
        let local = pose.rotation.inverse() * navigator.velocity();
        let speed = navigator.speed();
        let (forward, strafe) = if speed > MIN_SPEED {
            (local.z / speed, local.x / speed)
        } else {
            (0.0, 0.0)
        };

        // Stationary with a nonzero turn plays turn-in-place
        let turn = facing_target
            .map(|t| Vec3::new(t.x - pose.position.x, 0.0, t.z - pose.position.z))
            .filter(|to| to.length_squared() > 0.001)
            .map_or(0.0, |to| {
                (signed_yaw_angle(pose.forward(), to) / FULL_TURN_ANGLE).clamp(-1.0, 1.0)
            });

        LocomotionSignals {
            forward,
            strafe,
            turn,
            grounded: true,
        }
    }

    /// Compute, damp and store this tick's signals
    pub fn update<N: Navigator + ?Sized>(
        &mut self,
        delta_time: f32,
        drive: Drive,
        navigator: &N,
        facing_target: Option<Vec3>,
    ) -> LocomotionSignals {
        let raw = Self::raw_signals(drive, navigator, facing_target);
        let blend = self.blend_factor(delta_time);

        self.current = LocomotionSignals {
            forward: damp(self.current.forward, raw.forward, blend),
            strafe: damp(self.current.strafe, raw.strafe, blend),
            turn: damp(self.current.turn, raw.turn, blend),
            grounded: raw.grounded,
        };
        self.current
    }

    fn blend_factor(&self, delta_time: f32) -> f32 {
        if self.damping <= 0.0 {
            return 1.0;
        }
        1.0 - (-delta_time.max(0.0) / self.damping).exp()
    }
}

#[inline]
fn damp(current: f32, target: f32, blend: f32) -> f32 {
    current + (target - current) * blend
}
