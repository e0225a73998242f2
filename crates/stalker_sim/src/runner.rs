//! Fixed-step simulation loop.
//!
//! Each tick the target moves, the agent advances, then the navigator
//! integrates the agent's commands. A capture that asks for the clock to halt
//! sets the time scale to zero; the loop ends on capture either way.

use crate::error::Result;
use crate::navigator::KinematicNavigator;
use crate::occluders::OccluderField;
use crate::scenario::ScenarioConfig;
use crate::target::TargetPath;
use glam::Vec3;
use serde::Serialize;
use stalker_ai::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// What the presentation sink observed
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub frames: u32,
    pub captures: u32,
    pub clock_halted: bool,
    pub last_signals: LocomotionSignals,
}

#[derive(Clone, Default)]
struct RecordingSink(Rc<RefCell<Recording>>);

impl PresentationSink for RecordingSink {
    fn set_locomotion_signals(&mut self, signals: &LocomotionSignals) {
        let mut recording = self.0.borrow_mut();
        recording.frames += 1;
        recording.last_signals = *signals;
    }

    fn on_captured(&mut self) {
        self.0.borrow_mut().captures += 1;
    }

    fn halt_simulation_clock(&mut self) {
        self.0.borrow_mut().clock_halted = true;
    }
}

/// A state change observed during the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub time: f32,
    pub from: AgentState,
    pub to: AgentState,
}

/// Outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub ticks: u32,
    pub elapsed: f32,
    pub spotted_at: Option<f32>,
    pub captured_at: Option<f32>,
    pub rounds_completed: u32,
    pub final_state: AgentTelemetry,
    pub final_position: Vec3,
    pub transitions: Vec<Transition>,
    pub warnings: Vec<String>,
}

/// One agent in a scripted world
pub struct Simulation {
    name: String,
    agent: StalkerAgent<KinematicNavigator>,
    target: Option<TargetPath>,
    recording: Rc<RefCell<Recording>>,
    dt: f32,
    time_scale: f32,
    elapsed: f32,
    ticks: u32,
    spotted_at: Option<f32>,
    captured_at: Option<f32>,
    transitions: Vec<Transition>,
}

impl Simulation {
    /// Build the world described by a scenario
    pub fn from_scenario(scenario: &ScenarioConfig) -> Result<Self> {
        scenario.validate()?;

        let navigator = KinematicNavigator::new(scenario.home.pose(), scenario.navigator.clone());
        let target = scenario
            .target
            .as_ref()
            .map(|t| TargetPath::new(t.path.clone(), t.speed, t.looped));
        let recording = Rc::new(RefCell::new(Recording::default()));

        let mut builder = StalkerAgent::builder(navigator)
            .config(scenario.agent.clone())
            .waypoints(scenario.build_waypoints())
            .line_of_sight(OccluderField::new(scenario.occluders.clone()))
            .presenter(RecordingSink(recording.clone()));
        if let Some(target) = &target {
            builder = builder.target(target.locator());
        }
        let agent = builder.build()?;

        log::info!(
            "Simulation '{}': {} waypoints, {} occluders, dt {}",
            scenario.name,
            scenario.waypoints.len(),
            scenario.occluders.len(),
            scenario.run.dt
        );

        Ok(Self {
            name: scenario.name.clone(),
            agent,
            target,
            recording,
            dt: scenario.run.dt,
            time_scale: 1.0,
            elapsed: 0.0,
            ticks: 0,
            spotted_at: None,
            captured_at: None,
            transitions: Vec::new(),
        })
    }

    /// The agent
    pub fn agent(&self) -> &StalkerAgent<KinematicNavigator> {
        &self.agent
    }

    /// The scripted target, if any
    pub fn target(&self) -> Option<&TargetPath> {
        self.target.as_ref()
    }

    /// What the presentation sink saw so far
    pub fn recording(&self) -> Recording {
        self.recording.borrow().clone()
    }

    /// Current time scale (0 once the clock is halted)
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Simulated seconds so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// State changes so far
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Run one tick
    pub fn step(&mut self) {
        self.ticks += 1;
        let dt = self.dt * self.time_scale;
        let before = self.agent.state();

        if dt > 0.0 {
            if let Some(target) = &mut self.target {
                target.advance(dt);
            }
            self.agent.advance(dt);
            self.agent.navigator_mut().integrate(dt);
            self.elapsed += dt;
        }

        let after = self.agent.state();
        if after != before {
            self.transitions.push(Transition {
                time: self.elapsed,
                from: before,
                to: after,
            });
        }

        if self.spotted_at.is_none() && self.agent.has_spotted_target() {
            self.spotted_at = Some(self.elapsed);
        }
        if self.captured_at.is_none() && self.agent.is_captured() {
            self.captured_at = Some(self.elapsed);
            log::info!("Captured after {:.2}s ({} ticks)", self.elapsed, self.ticks);
        }

        if self.recording.borrow().clock_halted && self.time_scale != 0.0 {
            log::info!("Simulation clock halted");
            self.time_scale = 0.0;
        }
    }

    /// Run until capture or `max_ticks`
    pub fn run(&mut self, max_ticks: u32) -> RunSummary {
        while self.ticks < max_ticks && !self.agent.is_captured() {
            self.step();
        }
        self.summary()
    }

    /// Summarize the run so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            scenario: self.name.clone(),
            ticks: self.ticks,
            elapsed: self.elapsed,
            spotted_at: self.spotted_at,
            captured_at: self.captured_at,
            rounds_completed: self.agent.patrol().rounds_completed(),
            final_state: self.agent.telemetry(),
            final_position: self.agent.navigator().pose().position,
            transitions: self.transitions.clone(),
            warnings: self.agent.warnings().iter().map(|w| w.to_string()).collect(),
        }
    }
}
