//! Simulation driver
//!
//! Owns the state and the run status, and composes controller, integrator
//! and boundary events into scheduled ticks.
//!
//! ```text
//!          start            pause
//!   Idle ─────────> Running ─────> Idle
//!    ^                 │
//!    │ reset           │ |θ| > π/2
//!    └──── Fallen <────┘
//! ```
//!
//! `reset` returns to `Idle` from any status. `start` is ignored while
//! `Fallen`.

use log::{debug, info, trace};

use crate::controller::PidController;
use crate::dynamics::CartPole;
use crate::error::ConfigError;
use crate::events::{FallCondition, TrackLimit};
use crate::host::{ManualScheduler, Renderer, Scheduler};
use crate::integrator::Integrator;
use crate::settings::{ControllerGains, SimulationConfig};
use crate::state::SimulationState;

/// Run status of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    /// Not advancing
    #[default]
    Idle,
    /// Advancing on every scheduled tick
    Running,
    /// Pole has fallen; nothing advances until reset
    Fallen,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Fallen => "fallen",
        }
    }
}

/// Counters accumulated since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    /// Completed ticks
    pub ticks: u64,
    /// Physics steps taken
    pub steps: u64,
    /// Steps where the controller output was saturated
    pub saturated_steps: u64,
    /// Ticks that ended with the cart against a wall
    pub wall_hits: u64,
    /// Largest |theta| seen at the end of a tick
    pub peak_theta: f64,
}

/// Cart-pole simulation driver
pub struct Simulation<S: Scheduler = ManualScheduler> {
    integrator: Integrator,
    controller: PidController,
    walls: TrackLimit,
    fall: FallCondition,
    scheduler: S,

    state: SimulationState,
    status: RunStatus,
    last_force: f64,
    stats: RunStats,

    initial_angle_deg: f64,
    substeps: usize,
}

impl<S: Scheduler> Simulation<S> {
    /// Create a driver in the `Idle` status with state at initial conditions
    pub fn new(config: SimulationConfig, scheduler: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let initial_angle = config.initial_angle_deg.to_radians();
        Ok(Self {
            integrator: Integrator::new(CartPole::new(config.params)),
            controller: PidController::new(config.gains),
            walls: TrackLimit::new(config.track_limit),
            fall: FallCondition::default(),
            scheduler,
            state: SimulationState::at_angle(initial_angle),
            status: RunStatus::Idle,
            last_force: 0.0,
            stats: RunStats::default(),
            initial_angle_deg: config.initial_angle_deg,
            substeps: config.substeps,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Force applied during the most recent physics step
    pub fn last_force(&self) -> f64 {
        self.last_force
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn model(&self) -> &CartPole {
        self.integrator.model()
    }

    pub fn gains(&self) -> ControllerGains {
        self.controller.gains()
    }

    pub fn initial_angle_deg(&self) -> f64 {
        self.initial_angle_deg
    }

    pub fn substeps(&self) -> usize {
        self.substeps
    }

    /// Time at which the pole fell, if it has
    pub fn fall_time(&self) -> Option<f64> {
        self.fall.event_time()
    }

    /// Total mechanical energy of the current state
    pub fn energy(&self) -> f64 {
        self.model().energy(&self.state)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// `Idle -> Running`
    pub fn start(&mut self) {
        match self.status {
            RunStatus::Idle => {
                info!(
                    "Starting at t={:.3}s, theta={:.2}°",
                    self.state.time,
                    self.state.theta.to_degrees()
                );
                self.status = RunStatus::Running;
                self.scheduler.request_frame();
            }
            RunStatus::Running => {}
            RunStatus::Fallen => debug!("Start ignored: pendulum has fallen, reset first"),
        }
    }

    /// `Running -> Idle`, keeping the current state
    pub fn pause(&mut self) {
        if self.status == RunStatus::Running {
            info!("Paused at t={:.3}s", self.state.time);
            self.status = RunStatus::Idle;
            self.scheduler.cancel_frame();
        }
    }

    /// Back to `Idle` with the state at initial conditions
    pub fn reset(&mut self) {
        info!("Reset to theta={:.2}°", self.initial_angle_deg);
        self.scheduler.cancel_frame();
        self.status = RunStatus::Idle;
        self.state = SimulationState::at_angle(self.initial_angle_deg.to_radians());
        self.last_force = 0.0;
        self.stats = RunStats::default();
        self.fall.reset();
    }

    /// Replace the controller gains; used from the next control evaluation on
    pub fn set_gains(&mut self, kp: f64, ki: f64, kd: f64) {
        debug!("Gains set to kp={}, ki={}, kd={}", kp, ki, kd);
        self.controller.set_gains(ControllerGains::new(kp, ki, kd));
    }

    /// Initial angle used by the next reset
    pub fn set_initial_angle(&mut self, degrees: f64) {
        debug!("Initial angle set to {}°", degrees);
        self.initial_angle_deg = degrees;
    }

    /// Physics steps per tick, at least one
    pub fn set_substeps(&mut self, substeps: usize) {
        self.substeps = substeps.max(1);
    }

    /// Advance one scheduled frame
    ///
    /// While `Running`: take `substeps` fixed steps, clamp the cart to the
    /// track, check for a fall, then hand the state to `renderer`. Does
    /// nothing in any other status. Returns the status after the tick.
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> RunStatus {
        if self.status != RunStatus::Running {
            return self.status;
        }

        for _ in 0..self.substeps {
            let control = self.controller.compute(&self.state);
            self.state = self.integrator.step(&self.state, control.force);
            self.last_force = control.force;

            self.stats.steps += 1;
            if control.saturated {
                self.stats.saturated_steps += 1;
            }
        }

        let (state, hit_wall) = self.walls.apply(&self.state);
        self.state = state;
        if hit_wall {
            debug!("Cart hit the wall at x={:.2}", self.state.x);
            self.stats.wall_hits += 1;
        }

        self.stats.ticks += 1;
        self.stats.peak_theta = self.stats.peak_theta.max(self.state.theta.abs());

        let fell = self.fall.detect(&self.state);
        if fell {
            info!(
                "Pendulum fell at t={:.3}s (theta={:.1}°)",
                self.state.time,
                self.state.theta.to_degrees()
            );
            self.status = RunStatus::Fallen;
            self.scheduler.cancel_frame();
        }

        trace!(
            "t={:.3} x={:.4} theta={:.4} u={:.3}",
            self.state.time,
            self.state.x,
            self.state.theta,
            self.last_force
        );
        renderer.render(&self.state, self.last_force);

        if fell {
            renderer.fallen(&self.state);
        } else {
            self.scheduler.request_frame();
        }

        self.status
    }
}

impl Simulation<ManualScheduler> {
    /// Driver with a [`ManualScheduler`]
    pub fn headless(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::new(config, ManualScheduler::new())
    }

    /// Fire pending frames until none is requested or `max_frames` ran.
    /// Returns the number of frames fired.
    pub fn run_frames<R: Renderer + ?Sized>(&mut self, renderer: &mut R, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.scheduler.take_frame() {
            self.tick(renderer);
            frames += 1;
        }
        frames
    }
}
