//! Pursuit latch and capture monitor.
//!
//! Both are one-way: pursuit never disengages and capture fires once.

use crate::heading::planar_distance;
use crate::navigation::Navigator;
use crate::presentation::PresentationSink;
use glam::Vec3;

/// Chase controller. Once engaged it owns the navigator for good.
#[derive(Debug, Clone)]
pub struct Pursuit {
    run_speed: f32,
    engaged: bool,
    ticks: u64,
}

impl Pursuit {
    /// Create a disengaged pursuit controller
    pub fn new(run_speed: f32) -> Self {
        Self {
            run_speed,
            engaged: false,
            ticks: 0,
        }
    }

    /// Whether the chase is on
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Number of ticks spent chasing
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Start the chase. Returns true the first time only.
    pub fn engage(&mut self) -> bool {
        if self.engaged {
            return false;
        }
        self.engaged = true;
        true
    }

    /// Drive the navigator toward the live target position.
    ///
    /// The destination is refreshed every tick since the target keeps moving.
    /// An unresolved target leaves the previous destination in place.
    pub fn drive<N: Navigator + ?Sized>(&mut self, navigator: &mut N, target: Option<Vec3>) {
        if !self.engaged {
            return;
        }
        self.ticks += 1;
        navigator.set_speed(self.run_speed);

        match target {
            Some(position) => navigator.set_destination(position),
            None => log::trace!("Pursuit target unresolved this tick"),
        }
    }
}

/// Terminal proximity check
#[derive(Debug, Clone)]
pub struct CaptureMonitor {
    capture_distance: f32,
    freeze_time: bool,
    triggered: bool,
}

impl CaptureMonitor {
    /// Create a monitor that has not fired
    pub fn new(capture_distance: f32, freeze_time: bool) -> Self {
        Self {
            capture_distance,
            freeze_time,
            triggered: false,
        }
    }

    /// Whether capture already happened
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Whether the target would be caught right now
    pub fn in_reach<N: Navigator + ?Sized>(&self, navigator: &N, target: Vec3) -> bool {
        !navigator.path_pending()
            && planar_distance(navigator.pose().position, target) <= self.capture_distance
    }

    /// Check for capture and fire the side effects once.
    ///
    /// Returns true on the tick capture fires.
    pub fn update<N: Navigator + ?Sized>(
        &mut self,
        navigator: &mut N,
        target: Option<Vec3>,
        presenter: &mut dyn PresentationSink,
    ) -> bool {
        if self.triggered {
            return false;
        }
        let Some(target) = target else {
            return false;
        };
        if !self.in_reach(navigator, target) {
            return false;
        }

        self.triggered = true;
        navigator.stop();
        log::info!(
            "Target captured at planar distance {:.2}",
            planar_distance(navigator.pose().position, target)
        );

        presenter.on_captured();
        if self.freeze_time {
            presenter.halt_simulation_clock();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Pose;
    use crate::presentation::LocomotionSignals;
    use glam::Quat;

    #[derive(Default)]
    struct Recorder {
        destinations: Vec<Vec3>,
        speed: f32,
        pending: bool,
        stops: u32,
        position: Vec3,
    }

    impl Navigator for Recorder {
        fn set_destination(&mut self, destination: Vec3) {
            self.destinations.push(destination);
        }
        fn destination(&self) -> Option<Vec3> {
            self.destinations.last().copied()
        }
        fn stop(&mut self) {
            self.stops += 1;
        }
        fn warp(&mut self, _position: Vec3) -> bool {
            true
        }
        fn place(&mut self, _position: Vec3) {}
        fn has_path(&self) -> bool {
            !self.destinations.is_empty()
        }
        fn path_pending(&self) -> bool {
            self.pending
        }
        fn remaining_distance(&self) -> f32 {
            0.0
        }
        fn stopping_distance(&self) -> f32 {
            0.0
        }
        fn velocity(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn speed(&self) -> f32 {
            self.speed
        }
        fn set_speed(&mut self, speed: f32) {
            self.speed = speed;
        }
        fn is_on_navigable_surface(&self) -> bool {
            true
        }
        fn pose(&self) -> Pose {
            Pose::new(self.position, Quat::IDENTITY)
        }
        fn set_rotation(&mut self, _rotation: Quat) {}
    }

    #[derive(Default)]
    struct Screen {
        captured: u32,
        halted: u32,
    }

    impl PresentationSink for Screen {
        fn set_locomotion_signals(&mut self, _signals: &LocomotionSignals) {}
        fn on_captured(&mut self) {
            self.captured += 1;
        }
        fn halt_simulation_clock(&mut self) {
            self.halted += 1;
        }
    }

    #[test]
    fn test_engage_once() {
        let mut pursuit = Pursuit::new(5.0);
        assert!(pursuit.engage());
        assert!(!pursuit.engage());
        assert!(pursuit.is_engaged());
    }

    #[test]
    fn test_drive_reissues_every_tick() {
        let mut pursuit = Pursuit::new(5.0);
        let mut nav = Recorder::default();
        let target = Vec3::new(0.0, 0.0, 4.0);

        pursuit.drive(&mut nav, Some(target));
        assert!(nav.destinations.is_empty(), "disengaged pursuit must not drive");

        pursuit.engage();
        for _ in 0..3 {
            pursuit.drive(&mut nav, Some(target));
        }
        assert_eq!(nav.destinations.len(), 3);
        assert_eq!(nav.speed, 5.0);
        assert_eq!(pursuit.ticks(), 3);

        pursuit.drive(&mut nav, None);
        assert_eq!(nav.destinations.len(), 3);
    }

    #[test]
    fn test_capture_uses_planar_distance() {
        let monitor = CaptureMonitor::new(1.0, false);
        let nav = Recorder::default();
        // 1.0 away horizontally, 3.0 above
        assert!(monitor.in_reach(&nav, Vec3::new(1.0, 3.0, 0.0)));
        assert!(!monitor.in_reach(&nav, Vec3::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn test_capture_waits_for_path() {
        let mut monitor = CaptureMonitor::new(1.0, false);
        let mut nav = Recorder {
            pending: true,
            ..Default::default()
        };
        let mut screen = Screen::default();

        assert!(!monitor.update(&mut nav, Some(Vec3::ZERO), &mut screen));
        nav.pending = false;
        assert!(monitor.update(&mut nav, Some(Vec3::ZERO), &mut screen));
        assert_eq!(screen.captured, 1);
        assert_eq!(screen.halted, 0);
    }

    #[test]
    fn test_capture_fires_once() {
        let mut monitor = CaptureMonitor::new(1.0, true);
        let mut nav = Recorder::default();
        let mut screen = Screen::default();

        assert!(monitor.update(&mut nav, Some(Vec3::new(1.0, 0.0, 0.0)), &mut screen));
        assert!(!monitor.update(&mut nav, Some(Vec3::new(0.5, 0.0, 0.0)), &mut screen));
        assert_eq!(screen.captured, 1);
        assert_eq!(screen.halted, 1);
        assert_eq!(nav.stops, 1);
        assert!(monitor.is_triggered());
    }

    #[test]
    fn test_unresolved_target_cannot_be_captured() {
        let mut monitor = CaptureMonitor::new(10.0, false);
        let mut nav = Recorder::default();
        let mut screen = Screen::default();
        assert!(!monitor.update(&mut nav, None, &mut screen));
        assert!(!monitor.is_triggered());
    }
}
