//! Patrol cycle state machine.
//!
//! ```text
//! Resting ──interval──▶ Walking ──arrive──▶ Waiting ──timeout──┐
//!    ▲                    ▲  │                                  │
//!    │                    │  └──arrive (no wait)──┐             │
//!    │                    └───────── next index ◀─┴─────────────┘
//!    │                                  │ last waypoint, no loop
//!    └──────── reset to home ◀── RoundComplete
//! ```

use crate::config::AgentConfig;
use crate::error::AgentWarning;
use crate::heading::{look_rotation, rotate_towards};
use crate::navigation::{reset_pose, Locator, Navigator, Pose};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Destinations closer than this count as unchanged
const DESTINATION_EPSILON: f32 = 1e-3;

/// Slack on wait boundaries so fixed steps summing to them land on time
const WAIT_EPSILON: f32 = 1e-4;

/// A stop on the patrol route
pub struct Waypoint {
    anchor: Box<dyn Locator>,
    /// Stop and scan at this waypoint
    pub wait_here: bool,
    /// How long to scan (seconds)
    pub wait_duration: f32,
}

impl Waypoint {
    /// Waypoint following an external anchor
    pub fn new(anchor: impl Locator + 'static) -> Self {
        Self {
            anchor: Box::new(anchor),
            wait_here: false,
            wait_duration: 0.0,
        }
    }

    /// Waypoint at a fixed position
    pub fn at(position: Vec3) -> Self {
        Self::new(position)
    }

    /// Waypoint whose anchor never resolves
    pub fn unresolved() -> Self {
        Self::new(None::<Vec3>)
    }

    /// Stop here for `seconds`
    pub fn with_wait(mut self, seconds: f32) -> Self {
        self.wait_here = true;
        self.wait_duration = seconds;
        self
    }

    /// Current anchor position
    pub fn position(&self) -> Option<Vec3> {
        self.anchor.locate()
    }

    /// Whether arriving here starts a wait
    pub fn should_wait(&self) -> bool {
        self.wait_here && self.wait_duration > 0.0
    }
}

impl fmt::Debug for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Waypoint")
            .field("position", &self.position())
            .field("wait_here", &self.wait_here)
            .field("wait_duration", &self.wait_duration)
            .finish()
    }
}

/// Phase of the patrol cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatrolPhase {
    /// Idle between rounds
    Resting,
    /// Heading to the current waypoint
    Walking,
    /// Scanning at the current waypoint
    Waiting,
    /// Last waypoint reached; returning home next tick
    RoundComplete,
}

impl PatrolPhase {
    /// Short name for telemetry
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resting => "Resting",
            Self::Walking => "Walking",
            Self::Waiting => "Waiting",
            Self::RoundComplete => "RoundComplete",
        }
    }
}

impl fmt::Display for PatrolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Patrol tunables taken from [`AgentConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolSettings {
    pub waypoint_threshold: f32,
    pub loop_route: bool,
    pub patrol_interval: f32,
    pub walk_speed: f32,
    /// Scanning turn rate (radians per second)
    pub turn_rate: f32,
}

impl From<&AgentConfig> for PatrolSettings {
    fn from(config: &AgentConfig) -> Self {
        Self {
            waypoint_threshold: config.waypoint_threshold,
            loop_route: config.loop_route,
            patrol_interval: config.patrol_interval,
            walk_speed: config.walk_speed,
            turn_rate: config.turn_speed_radians(),
        }
    }
}

/// The patrol state machine
#[derive(Debug)]
pub struct PatrolCycle {
    waypoints: Vec<Waypoint>,
    settings: PatrolSettings,
    phase: PatrolPhase,
    previous: Option<PatrolPhase>,
    current_index: usize,
    wait_elapsed: f32,
    inter_round_elapsed: f32,
    rounds_completed: u32,
}

impl PatrolCycle {
    /// Create a cycle resting before its first round
    pub fn new(waypoints: Vec<Waypoint>, settings: PatrolSettings) -> Self {
        Self {
            waypoints,
            settings,
            phase: PatrolPhase::Resting,
            previous: None,
            current_index: 0,
            wait_elapsed: 0.0,
            inter_round_elapsed: 0.0,
            rounds_completed: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> PatrolPhase {
        self.phase
    }

    /// Previous phase
    pub fn previous(&self) -> Option<PatrolPhase> {
        self.previous
    }

    /// Whether a round is under way (walking or waiting)
    pub fn round_active(&self) -> bool {
        matches!(self.phase, PatrolPhase::Walking | PatrolPhase::Waiting)
    }

    /// Whether the last waypoint was reached and the reset is pending
    pub fn round_finished(&self) -> bool {
        self.phase == PatrolPhase::RoundComplete
    }

    /// Whether the agent is scanning at a waypoint
    pub fn is_waiting(&self) -> bool {
        self.phase == PatrolPhase::Waiting
    }

    /// Index of the current waypoint, clamped into the route
    pub fn current_index(&self) -> usize {
        self.current_index.min(self.waypoints.len().saturating_sub(1))
    }

    /// Seconds spent at the current waypoint
    pub fn wait_elapsed(&self) -> f32 {
        self.wait_elapsed
    }

    /// Seconds spent resting since the last round
    pub fn inter_round_elapsed(&self) -> f32 {
        self.inter_round_elapsed
    }

    /// Number of rounds that ended with a return home
    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    /// The route
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Whether any waypoint currently resolves to a position
    pub fn has_resolvable_waypoint(&self) -> bool {
        self.waypoints.iter().any(|w| w.position().is_some())
    }

    /// Position of the current waypoint
    pub fn current_waypoint_position(&self) -> Option<Vec3> {
        self.waypoints.get(self.current_index())?.position()
    }

    /// Position of the waypoint after the current one. Wraps to the first
    /// waypoint only when looping.
    pub fn next_waypoint_position(&self) -> Option<Vec3> {
        let next = self.current_index() + 1;
        if next < self.waypoints.len() {
            self.waypoints[next].position()
        } else if self.settings.loop_route {
            self.waypoints.first()?.position()
        } else {
            None
        }
    }

    /// Line segments between consecutive resolvable waypoints, closing back
    /// to the start only when looping
    pub fn route_segments(&self) -> Vec<(Vec3, Vec3)> {
        let len = self.waypoints.len();
        let mut segments = Vec::new();

        for i in 0..len {
            let Some(from) = self.waypoints[i].position() else {
                continue;
            };
            if !self.settings.loop_route && i == len - 1 {
                break;
            }
            let next = (i + 1) % len;
            if next == i {
                break;
            }
            if let Some(to) = self.waypoints[next].position() {
                segments.push((from, to));
            }
        }

        segments
    }

    /// Drop any scan in progress. Used when pursuit takes over.
    pub fn abandon_wait(&mut self) {
        self.wait_elapsed = 0.0;
        if self.phase == PatrolPhase::Waiting {
            self.transition(PatrolPhase::Walking);
        }
    }

    /// Step the cycle by `delta_time` seconds.
    ///
    /// `target` is the tracked target's position if resolved; it is only used
    /// to face the target while scanning. Returns a warning when a round was
    /// due but could not start.
    pub fn update<N: Navigator + ?Sized>(
        &mut self,
        delta_time: f32,
        navigator: &mut N,
        target: Option<Vec3>,
        home: &Pose,
    ) -> Option<AgentWarning> {
        match self.phase {
            PatrolPhase::Resting => return self.rest(delta_time, navigator),
            PatrolPhase::Walking => self.walk(navigator),
            PatrolPhase::Waiting => self.wait(delta_time, navigator, target),
            PatrolPhase::RoundComplete => self.finish_round(navigator, home),
        }
        None
    }

    fn rest<N: Navigator + ?Sized>(&mut self, delta_time: f32, navigator: &mut N) -> Option<AgentWarning> {
        self.inter_round_elapsed += delta_time;
        if self.inter_round_elapsed < self.settings.patrol_interval {
            return None;
        }

        if self.waypoints.is_empty() {
            return Some(AgentWarning::NoWaypoints);
        }
        if !self.has_resolvable_waypoint() {
            return Some(AgentWarning::NoResolvableWaypoint);
        }

        log::debug!("Starting patrol round over {} waypoints", self.waypoints.len());
        self.current_index = 0;
        self.wait_elapsed = 0.0;
        navigator.set_speed(self.settings.walk_speed);
        self.transition(PatrolPhase::Walking);
        self.walk(navigator);
        None
    }

    fn walk<N: Navigator + ?Sized>(&mut self, navigator: &mut N) {
        let Some(position) = self.current_waypoint_position() else {
            log::trace!("Waypoint {} unresolved, holding", self.current_index());
            return;
        };

        let stale = navigator
            .destination()
            .map_or(true, |d| d.distance(position) > DESTINATION_EPSILON);
        if stale {
            navigator.set_destination(position);
        }

        if navigator.path_pending() {
            return;
        }

        let reach = self.settings.waypoint_threshold + navigator.stopping_distance();
        if navigator.remaining_distance() <= reach {
            self.arrive(navigator);
        }
    }

    fn arrive<N: Navigator + ?Sized>(&mut self, navigator: &mut N) {
        let index = self.current_index();
        log::debug!("Reached waypoint {}", index);

        if self.waypoints[index].should_wait() {
            navigator.stop();
            self.wait_elapsed = 0.0;
            self.transition(PatrolPhase::Waiting);
        } else {
            self.advance_index(navigator);
        }
    }

    fn wait<N: Navigator + ?Sized>(&mut self, delta_time: f32, navigator: &mut N, target: Option<Vec3>) {
        self.wait_elapsed += delta_time;

        let duration = self
            .waypoints
            .get(self.current_index())
            .map_or(0.0, |w| w.wait_duration);

        // First half of the wait scans toward the target, second half looks
        // down the route.
        let focus = if self.wait_elapsed <= duration * 0.5 + WAIT_EPSILON {
            target
        } else {
            self.next_waypoint_position()
        };

        if let Some(focus) = focus {
            let pose = navigator.pose();
            if let Some(goal) = look_rotation(focus - pose.position) {
                let step = self.settings.turn_rate * delta_time;
                navigator.set_rotation(rotate_towards(pose.rotation, goal, step));
            }
        }

        if self.wait_elapsed >= duration - WAIT_EPSILON {
            self.wait_elapsed = 0.0;
            self.advance_index(navigator);
        }
    }

    fn advance_index<N: Navigator + ?Sized>(&mut self, navigator: &mut N) {
        let next = self.current_index() + 1;

        if next < self.waypoints.len() {
            self.current_index = next;
            self.transition(PatrolPhase::Walking);
        } else if self.settings.loop_route {
            log::debug!("Route finished, looping to first waypoint");
            self.current_index = 0;
            self.transition(PatrolPhase::Walking);
        } else {
            navigator.stop();
            self.transition(PatrolPhase::RoundComplete);
        }
    }

    fn finish_round<N: Navigator + ?Sized>(&mut self, navigator: &mut N, home: &Pose) {
        reset_pose(navigator, *home);
        self.inter_round_elapsed = 0.0;
        self.wait_elapsed = 0.0;
        self.current_index = 0;
        self.rounds_completed += 1;
        log::debug!("Round {} complete, returned home", self.rounds_completed);
        self.transition(PatrolPhase::Resting);
    }

    fn transition(&mut self, to: PatrolPhase) {
        if self.phase == to {
            return;
        }
        log::debug!("Patrol {} -> {}", self.phase, to);
        self.previous = Some(self.phase);
        self.phase = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    /// Navigator that teleports onto its destination once told to
    #[derive(Default)]
    struct Teleporter {
        pose: Pose,
        destination: Option<Vec3>,
        pending_ticks: u32,
        set_calls: u32,
        stops: u32,
        speed: f32,
    }

    impl Teleporter {
        fn arrive(&mut self) {
            if let Some(d) = self.destination {
                self.pose.position = d;
            }
        }
    }

    impl Navigator for Teleporter {
        fn set_destination(&mut self, destination: Vec3) {
            self.destination = Some(destination);
            self.set_calls += 1;
        }
        fn destination(&self) -> Option<Vec3> {
            self.destination
        }
        fn stop(&mut self) {
            self.destination = None;
            self.stops += 1;
        }
        fn warp(&mut self, position: Vec3) -> bool {
            self.pose.position = position;
            true
        }
        fn place(&mut self, position: Vec3) {
            self.pose.position = position;
        }
        fn has_path(&self) -> bool {
            self.destination.is_some()
        }
        fn path_pending(&self) -> bool {
            self.pending_ticks > 0
        }
        fn remaining_distance(&self) -> f32 {
            self.destination
                .map_or(0.0, |d| d.distance(self.pose.position))
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
            self.pose
        }
        fn set_rotation(&mut self, rotation: Quat) {
            self.pose.rotation = rotation;
        }
    }

    fn settings(loop_route: bool) -> PatrolSettings {
        PatrolSettings {
            waypoint_threshold: 0.5,
            loop_route,
            patrol_interval: 1.0,
            walk_speed: 2.0,
            turn_rate: std::f32::consts::TAU,
        }
    }

    /// Let the navigator pick up the current waypoint, reach it, and report back
    fn reach_current(patrol: &mut PatrolCycle, nav: &mut Teleporter, home: &Pose) {
        patrol.update(0.1, nav, None, home);
        nav.arrive();
        patrol.update(0.1, nav, None, home);
    }

    fn route() -> Vec<Waypoint> {
        vec![
            Waypoint::at(Vec3::new(0.0, 0.0, 5.0)),
            Waypoint::at(Vec3::new(5.0, 0.0, 5.0)),
            Waypoint::at(Vec3::new(5.0, 0.0, 0.0)),
        ]
    }

    #[test]
    fn test_rests_until_interval() {
        let mut patrol = PatrolCycle::new(route(), settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        patrol.update(0.5, &mut nav, None, &home);
        assert_eq!(patrol.phase(), PatrolPhase::Resting);
        assert_eq!(nav.set_calls, 0);

        patrol.update(0.5, &mut nav, None, &home);
        assert_eq!(patrol.phase(), PatrolPhase::Walking);
        assert_eq!(nav.destination, Some(Vec3::new(0.0, 0.0, 5.0)));
        assert_eq!(nav.speed, 2.0);
        assert!(patrol.round_active());
    }

    #[test]
    fn test_destination_not_reissued() {
        let mut patrol = PatrolCycle::new(route(), settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        patrol.update(1.0, &mut nav, None, &home);
        for _ in 0..5 {
            patrol.update(0.1, &mut nav, None, &home);
        }
        assert_eq!(nav.set_calls, 1);
    }

    #[test]
    fn test_moving_anchor_reissues_destination() {
        let anchor = crate::navigation::shared_position(Some(Vec3::new(0.0, 0.0, 5.0)));
        let mut patrol = PatrolCycle::new(vec![Waypoint::new(anchor.clone())], settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        patrol.update(1.0, &mut nav, None, &home);
        anchor.set(Some(Vec3::new(0.0, 0.0, 8.0)));
        patrol.update(0.1, &mut nav, None, &home);

        assert_eq!(nav.set_calls, 2);
        assert_eq!(nav.destination, Some(Vec3::new(0.0, 0.0, 8.0)));
    }

    #[test]
    fn test_no_arrival_while_pending() {
        let mut patrol = PatrolCycle::new(route(), settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        patrol.update(1.0, &mut nav, None, &home);
        nav.arrive();
        nav.pending_ticks = 1;
        patrol.update(0.1, &mut nav, None, &home);
        assert_eq!(patrol.current_index(), 0);

        nav.pending_ticks = 0;
        patrol.update(0.1, &mut nav, None, &home);
        assert_eq!(patrol.current_index(), 1);
    }

    #[test]
    fn test_full_round_returns_home() {
        let mut patrol = PatrolCycle::new(route(), settings(false));
        let home = Pose::new(Vec3::new(1.0, 0.0, -1.0), Quat::from_rotation_y(0.3));
        let mut nav = Teleporter {
            pose: home,
            ..Default::default()
        };

        patrol.update(1.0, &mut nav, None, &home);
        for expected in 1..3 {
            reach_current(&mut patrol, &mut nav, &home);
            assert_eq!(patrol.current_index(), expected);
        }
        reach_current(&mut patrol, &mut nav, &home);
        assert_eq!(patrol.phase(), PatrolPhase::RoundComplete);
        assert!(patrol.round_finished());

        patrol.update(0.1, &mut nav, None, &home);
        assert_eq!(patrol.phase(), PatrolPhase::Resting);
        assert_eq!(patrol.previous(), Some(PatrolPhase::RoundComplete));
        assert_eq!(nav.pose, home);
        assert_eq!(patrol.current_index(), 0);
        assert_eq!(patrol.inter_round_elapsed(), 0.0);
        assert_eq!(patrol.rounds_completed(), 1);
    }

    #[test]
    fn test_loop_wraps_without_going_home() {
        let mut patrol = PatrolCycle::new(route(), settings(true));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        patrol.update(1.0, &mut nav, None, &home);
        for _ in 0..3 {
            reach_current(&mut patrol, &mut nav, &home);
        }
        assert_eq!(patrol.phase(), PatrolPhase::Walking);
        assert_eq!(patrol.current_index(), 0);
        assert_eq!(patrol.rounds_completed(), 0);
    }

    #[test]
    fn test_wait_then_resume() {
        let waypoints = vec![
            Waypoint::at(Vec3::new(0.0, 0.0, 5.0)).with_wait(2.0),
            Waypoint::at(Vec3::new(5.0, 0.0, 5.0)),
        ];
        let mut patrol = PatrolCycle::new(waypoints, settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        patrol.update(1.0, &mut nav, None, &home);
        nav.arrive();
        patrol.update(0.1, &mut nav, None, &home);
        assert!(patrol.is_waiting());
        assert_eq!(nav.destination, None);

        for _ in 0..7 {
            patrol.update(0.25, &mut nav, None, &home);
            assert!(patrol.is_waiting());
        }
        patrol.update(0.25, &mut nav, None, &home);
        assert_eq!(patrol.phase(), PatrolPhase::Walking);
        assert_eq!(patrol.current_index(), 1);
    }

    #[test]
    fn test_wait_halves_hold_under_tenth_second_steps() {
        let waypoints = vec![
            Waypoint::at(Vec3::ZERO).with_wait(2.0),
            Waypoint::at(Vec3::new(5.0, 0.0, 0.0)),
        ];
        let mut patrol = PatrolCycle::new(waypoints, settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();
        let target = Some(Vec3::new(-5.0, 0.0, 0.0));

        patrol.update(1.0, &mut nav, None, &home);
        nav.arrive();
        patrol.update(0.1, &mut nav, None, &home);
        assert!(patrol.is_waiting());

        let facing = |nav: &Teleporter| nav.pose.rotation * Vec3::Z;

        // Ten steps of 0.1 sum to just over 1.0 in f32 and still count as
        // the first half
        for _ in 0..10 {
            patrol.update(0.1, &mut nav, target, &home);
        }
        assert!(facing(&nav).dot(Vec3::NEG_X) > 0.99);

        patrol.update(0.1, &mut nav, target, &home);
        assert!(facing(&nav).dot(Vec3::NEG_X) < 0.99);

        for _ in 0..8 {
            patrol.update(0.1, &mut nav, target, &home);
        }
        assert!(patrol.is_waiting());

        // Twenty steps end a two second wait
        patrol.update(0.1, &mut nav, target, &home);
        assert_eq!(patrol.phase(), PatrolPhase::Walking);
        assert_eq!(patrol.current_index(), 1);
    }

    #[test]
    fn test_zero_duration_wait_is_skipped() {
        let waypoints = vec![
            Waypoint::at(Vec3::new(0.0, 0.0, 5.0)).with_wait(0.0),
            Waypoint::at(Vec3::new(5.0, 0.0, 5.0)),
        ];
        let mut patrol = PatrolCycle::new(waypoints, settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        patrol.update(1.0, &mut nav, None, &home);
        nav.arrive();
        patrol.update(0.1, &mut nav, None, &home);
        assert_eq!(patrol.phase(), PatrolPhase::Walking);
        assert_eq!(patrol.current_index(), 1);
    }

    #[test]
    fn test_empty_route_never_starts() {
        let mut patrol = PatrolCycle::new(Vec::new(), settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        let warning = patrol.update(5.0, &mut nav, None, &home);
        assert_eq!(warning, Some(AgentWarning::NoWaypoints));
        assert_eq!(patrol.phase(), PatrolPhase::Resting);
        assert_eq!(patrol.current_index(), 0);
    }

    #[test]
    fn test_unresolved_route_never_starts() {
        let waypoints = vec![Waypoint::unresolved(), Waypoint::unresolved()];
        let mut patrol = PatrolCycle::new(waypoints, settings(false));
        let mut nav = Teleporter::default();

        let warning = patrol.update(5.0, &mut nav, None, &Pose::default());
        assert_eq!(warning, Some(AgentWarning::NoResolvableWaypoint));
        assert_eq!(patrol.phase(), PatrolPhase::Resting);
        assert_eq!(nav.set_calls, 0);
    }

    #[test]
    fn test_unresolved_current_waypoint_holds() {
        let anchor = crate::navigation::shared_position(None);
        let waypoints = vec![Waypoint::new(anchor.clone()), Waypoint::at(Vec3::X)];
        let mut patrol = PatrolCycle::new(waypoints, settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        patrol.update(1.0, &mut nav, None, &home);
        patrol.update(0.1, &mut nav, None, &home);
        assert_eq!(patrol.phase(), PatrolPhase::Walking);
        assert_eq!(patrol.current_index(), 0);
        assert_eq!(nav.set_calls, 0);

        anchor.set(Some(Vec3::new(0.0, 0.0, 3.0)));
        patrol.update(0.1, &mut nav, None, &home);
        assert_eq!(nav.destination, Some(Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_next_waypoint_wraps_only_when_looping() {
        let looping = PatrolCycle::new(vec![Waypoint::at(Vec3::X)], settings(true));
        assert_eq!(looping.next_waypoint_position(), Some(Vec3::X));

        let open = PatrolCycle::new(vec![Waypoint::at(Vec3::X)], settings(false));
        assert_eq!(open.next_waypoint_position(), None);
    }

    #[test]
    fn test_route_segments() {
        let open = PatrolCycle::new(route(), settings(false));
        assert_eq!(open.route_segments().len(), 2);

        let closed = PatrolCycle::new(route(), settings(true));
        let segments = closed.route_segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2], (Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 5.0)));

        let gap = vec![Waypoint::at(Vec3::X), Waypoint::unresolved(), Waypoint::at(Vec3::Z)];
        let gapped = PatrolCycle::new(gap, settings(false));
        assert!(gapped.route_segments().is_empty());
    }

    #[test]
    fn test_abandon_wait() {
        let waypoints = vec![Waypoint::at(Vec3::Z).with_wait(3.0)];
        let mut patrol = PatrolCycle::new(waypoints, settings(false));
        let mut nav = Teleporter::default();
        let home = Pose::default();

        patrol.update(1.0, &mut nav, None, &home);
        nav.arrive();
        patrol.update(0.1, &mut nav, None, &home);
        patrol.update(0.5, &mut nav, None, &home);
        assert!(patrol.is_waiting());

        patrol.abandon_wait();
        assert!(!patrol.is_waiting());
        assert_eq!(patrol.wait_elapsed(), 0.0);
        assert!(patrol.round_active());
    }
}
