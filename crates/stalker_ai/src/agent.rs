//! Agent runtime: the composition root driving every controller once per tick.
//!
//! Tick order:
//!
//! 1. perception (only mid-round and only until the target is first seen)
//! 2. pursuit + capture when the chase is on, otherwise the patrol cycle
//! 3. locomotion signals, reading whichever controller was active

use crate::config::AgentConfig;
use crate::error::{AgentWarning, Result, StalkerError};
use crate::locomotion::{Drive, LocomotionEmitter};
use crate::navigation::{Locator, Navigator, Pose};
use crate::patrol::{PatrolCycle, PatrolPhase, PatrolSettings, Waypoint};
use crate::perception::{LineOfSight, OpenSight, Perception, SightConfig};
use crate::presentation::{LocomotionSignals, NullPresenter, PresentationSink};
use crate::pursuit::{CaptureMonitor, Pursuit};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Externally visible state of the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    Resting,
    Walking,
    Waiting,
    RoundComplete,
    Pursuing,
    Captured,
}

impl AgentState {
    /// State name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resting => "Resting",
            Self::Walking => "Walking",
            Self::Waiting => "Waiting",
            Self::RoundComplete => "RoundComplete",
            Self::Pursuing => "Pursuing",
            Self::Captured => "Captured",
        }
    }
}

impl From<PatrolPhase> for AgentState {
    fn from(phase: PatrolPhase) -> Self {
        match phase {
            PatrolPhase::Resting => Self::Resting,
            PatrolPhase::Walking => Self::Walking,
            PatrolPhase::Waiting => Self::Waiting,
            PatrolPhase::RoundComplete => Self::RoundComplete,
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only snapshot for diagnostics and UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentTelemetry {
    pub state: AgentState,
    pub spotted: bool,
    pub pursuing: bool,
    pub captured: bool,
    pub waypoint_index: usize,
    pub rounds_completed: u32,
}

/// Builder for [`StalkerAgent`]
pub struct AgentBuilder<N: Navigator> {
    navigator: N,
    config: AgentConfig,
    waypoints: Vec<Waypoint>,
    target: Option<Box<dyn Locator>>,
    line_of_sight: Box<dyn LineOfSight>,
    presenter: Box<dyn PresentationSink>,
}

impl<N: Navigator> AgentBuilder<N> {
    fn new(navigator: N) -> Self {
        Self {
            navigator,
            config: AgentConfig::default(),
            waypoints: Vec::new(),
            target: None,
            line_of_sight: Box::new(OpenSight),
            presenter: Box::new(NullPresenter),
        }
    }

    /// Set the configuration
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the whole route
    pub fn waypoints(mut self, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Append one waypoint
    pub fn waypoint(mut self, waypoint: Waypoint) -> Self {
        self.waypoints.push(waypoint);
        self
    }

    /// Set the tracked target
    pub fn target(mut self, target: impl Locator + 'static) -> Self {
        self.target = Some(Box::new(target));
        self
    }

    /// Set the raycast backend
    pub fn line_of_sight(mut self, line_of_sight: impl LineOfSight + 'static) -> Self {
        self.line_of_sight = Box::new(line_of_sight);
        self
    }

    /// Set the presentation sink
    pub fn presenter(mut self, presenter: impl PresentationSink + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    /// Validate and build. The navigator's current pose becomes the home pose.
    pub fn build(self) -> Result<StalkerAgent<N>> {
        self.config.validate()?;

        for (index, waypoint) in self.waypoints.iter().enumerate() {
            if !waypoint.wait_duration.is_finite() || waypoint.wait_duration < 0.0 {
                return Err(StalkerError::InvalidConfig(format!(
                    "waypoint {} has invalid wait duration {}",
                    index, waypoint.wait_duration
                )));
            }
        }

        let mut navigator = self.navigator;
        let home = navigator.pose();
        navigator.stop();
        navigator.set_speed(self.config.walk_speed);

        let mut agent = StalkerAgent {
            patrol: PatrolCycle::new(self.waypoints, PatrolSettings::from(&self.config)),
            perception: Perception::new(SightConfig::from(&self.config)),
            pursuit: Pursuit::new(self.config.run_speed),
            capture: CaptureMonitor::new(
                self.config.capture_distance,
                self.config.freeze_time_on_capture,
            ),
            locomotion: LocomotionEmitter::new(self.config.animation_damping),
            config: self.config,
            navigator,
            target: self.target,
            line_of_sight: self.line_of_sight,
            presenter: self.presenter,
            home,
            state: AgentState::Resting,
            warnings: Vec::new(),
        };

        if agent.patrol.waypoints().is_empty() {
            agent.warn_once(AgentWarning::NoWaypoints);
        }
        if agent.locate_target().is_none() {
            agent.warn_once(AgentWarning::UnresolvedTarget);
        }

        log::debug!(
            "Agent ready at {:?} with {} waypoints",
            home.position,
            agent.patrol.waypoints().len()
        );
        Ok(agent)
    }
}

/// A patrolling, stalking agent
pub struct StalkerAgent<N: Navigator> {
    config: AgentConfig,
    navigator: N,
    target: Option<Box<dyn Locator>>,
    line_of_sight: Box<dyn LineOfSight>,
    presenter: Box<dyn PresentationSink>,
    home: Pose,
    patrol: PatrolCycle,
    perception: Perception,
    pursuit: Pursuit,
    capture: CaptureMonitor,
    locomotion: LocomotionEmitter,
    state: AgentState,
    warnings: Vec<AgentWarning>,
}

impl<N: Navigator> StalkerAgent<N> {
    /// Start building an agent around a navigator
    pub fn builder(navigator: N) -> AgentBuilder<N> {
        AgentBuilder::new(navigator)
    }

    /// Step the agent by `delta_time` seconds.
    ///
    /// Zero, negative and non-finite steps are ignored, as is every step
    /// after capture.
    pub fn advance(&mut self, delta_time: f32) {
        if self.capture.is_triggered() {
            return;
        }
        if !delta_time.is_finite() || delta_time <= 0.0 {
            return;
        }

        let target = self.locate_target();

        if self.patrol.round_active() && !self.perception.has_spotted() {
            let pose = self.navigator.pose();
            if self
                .perception
                .update(delta_time, &pose, target, self.line_of_sight.as_ref())
            {
                log::info!("Target spotted from {:?}; pursuit engaged", pose.position);
                self.patrol.abandon_wait();
                self.pursuit.engage();
            }
        }

        let pursuing = self.is_pursuing();
        if pursuing {
            self.pursuit.drive(&mut self.navigator, target);
            self.capture
                .update(&mut self.navigator, target, self.presenter.as_mut());
        } else if let Some(warning) =
            self.patrol
                .update(delta_time, &mut self.navigator, target, &self.home)
        {
            self.warn_once(warning);
        }

        let drive = if pursuing { Drive::Pursuit } else { Drive::Patrol };
        let facing = self.patrol.current_waypoint_position();
        let signals = self
            .locomotion
            .update(delta_time, drive, &self.navigator, facing);
        self.presenter.set_locomotion_signals(&signals);

        self.refresh_state();
    }

    /// Current externally visible state
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Snapshot of the agent for diagnostics
    pub fn telemetry(&self) -> AgentTelemetry {
        AgentTelemetry {
            state: self.state,
            spotted: self.has_spotted_target(),
            pursuing: self.is_pursuing(),
            captured: self.is_captured(),
            waypoint_index: self.patrol.current_index(),
            rounds_completed: self.patrol.rounds_completed(),
        }
    }

    /// Whether the target was ever seen
    pub fn has_spotted_target(&self) -> bool {
        self.perception.has_spotted()
    }

    /// Whether the chase is on
    pub fn is_pursuing(&self) -> bool {
        self.perception.has_spotted() || self.pursuit.is_engaged()
    }

    /// Whether the target was caught
    pub fn is_captured(&self) -> bool {
        self.capture.is_triggered()
    }

    /// Index of the current waypoint
    pub fn current_waypoint_index(&self) -> usize {
        self.patrol.current_index()
    }

    /// Pose captured at construction
    pub fn home_pose(&self) -> Pose {
        self.home
    }

    /// Configuration the agent was built with
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Configuration warnings raised so far (each appears once)
    pub fn warnings(&self) -> &[AgentWarning] {
        &self.warnings
    }

    /// Patrol state machine
    pub fn patrol(&self) -> &PatrolCycle {
        &self.patrol
    }

    /// Perception state
    pub fn perception(&self) -> &Perception {
        &self.perception
    }

    /// Pursuit latch
    pub fn pursuit(&self) -> &Pursuit {
        &self.pursuit
    }

    /// Last emitted locomotion signals
    pub fn locomotion(&self) -> &LocomotionSignals {
        self.locomotion.current()
    }

    /// Route line segments for debug drawing
    pub fn route_segments(&self) -> Vec<(Vec3, Vec3)> {
        self.patrol.route_segments()
    }

    /// The navigator
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Mutable access to the navigator, for hosts that integrate it
    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    fn locate_target(&self) -> Option<Vec3> {
        self.target.as_ref().and_then(|t| t.locate())
    }

    fn warn_once(&mut self, warning: AgentWarning) {
        if self.warnings.contains(&warning) {
            return;
        }
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn refresh_state(&mut self) {
        let state = if self.is_captured() {
            AgentState::Captured
        } else if self.is_pursuing() {
            AgentState::Pursuing
        } else {
            AgentState::from(self.patrol.phase())
        };

        if state != self.state {
            log::debug!("Agent {} -> {}", self.state, state);
            self.state = state;
        }
    }
}
