//! Fixed-step state integrator
//!
//! The mechanical state `[x, ẋ, θ, θ̇]` is advanced with RK4 under a force
//! held constant over the step. The controller's integral term is advanced
//! separately with forward Euler using the angle at the start of the step,
//! and is never part of the RK4 vector: the tuned gains depend on this
//! exact accumulation.

use crate::dynamics::CartPole;
use crate::solvers::{ExplicitSolver, Solver, RK4};
use crate::state::SimulationState;

/// Advances a [`SimulationState`] by one fixed step
#[derive(Debug, Clone)]
pub struct Integrator {
    model: CartPole,
    solver: RK4,
}

impl Integrator {
    pub fn new(model: CartPole) -> Self {
        Self {
            model,
            solver: RK4::default(),
        }
    }

    pub fn model(&self) -> &CartPole {
        &self.model
    }

    /// Fixed step size
    #[inline]
    pub fn dt(&self) -> f64 {
        self.model.params().dt
    }

    /// Next state after one step of `dt` under constant force `u`
    pub fn step(&mut self, state: &SimulationState, u: f64) -> SimulationState {
        let dt = self.dt();
        let model = self.model;

        self.solver.set_state(state.mechanical());
        let y = *self.solver.advance(|y, _t| model.derivatives(y, u), dt);

        SimulationState {
            integral: state.integral + state.theta * dt,
            time: state.time + dt,
            ..state.with_mechanical(&y)
        }
    }
}
