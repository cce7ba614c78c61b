//! cartpole-sim - PID-stabilised inverted pendulum on a cart
//!
//! A host-independent simulation core: the nonlinear cart-pole equations of
//! motion are integrated with fixed-step RK4 under a saturated PID force,
//! and a small state machine drives the stepping from host frame callbacks.
//!
//! # Architecture
//!
//! - [`controller`]: saturated PID law on the pendulum angle
//! - [`dynamics`]: equations of motion and energy
//! - [`solvers`] / [`integrator`]: RK4 step of the mechanical state, Euler
//!   accumulation of the integral term
//! - [`driver`]: `Idle` / `Running` / `Fallen` state machine, sub-stepping,
//!   track walls and fall detection
//! - [`host`]: [`Renderer`] and [`Scheduler`] seams to the embedding UI
//!
//! # Example
//!
//! ```rust,ignore
//! use cartpole_sim::prelude::*;
//!
//! let mut sim = Simulation::headless(SimulationConfig::default())?;
//! let mut recorder = Recorder::new(1000);
//!
//! sim.set_gains(50.0, 0.0, 20.0);
//! sim.start();
//! sim.run_frames(&mut recorder, 250);
//!
//! assert_eq!(sim.status(), RunStatus::Running);
//! ```

pub mod controller;
pub mod driver;
pub mod dynamics;
pub mod error;
pub mod events;
pub mod host;
pub mod integrator;
pub mod recorder;
pub mod settings;
pub mod solvers;
pub mod state;
pub mod utils;

pub use controller::{ControlOutput, PidController, Saturation};
pub use driver::{RunStats, RunStatus, Simulation};
pub use dynamics::CartPole;
pub use error::{ConfigError, ExportError};
pub use host::{ManualScheduler, NullRenderer, Renderer, Scheduler};
pub use integrator::Integrator;
pub use recorder::{Recorder, Sample};
pub use settings::{ControllerGains, PhysicalParameters, SimulationConfig};
pub use state::{MechanicalState, SimulationState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::controller::{ControlOutput, PidController, Saturation};
    pub use crate::driver::{RunStats, RunStatus, Simulation};
    pub use crate::dynamics::CartPole;
    pub use crate::host::{ManualScheduler, NullRenderer, Renderer, Scheduler};
    pub use crate::integrator::Integrator;
    pub use crate::recorder::{Recorder, Sample};
    pub use crate::settings::{ControllerGains, PhysicalParameters, SimulationConfig};
    pub use crate::state::{MechanicalState, SimulationState};
}
