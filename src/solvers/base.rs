//! Base solver traits and types

use crate::state::MechanicalState;

/// Result of a solver stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStepResult {
    /// True once the last stage of the step has been applied
    pub complete: bool,
}

/// Core solver trait for fixed-step numerical integration
pub trait Solver {
    /// Get current state vector
    fn state(&self) -> &MechanicalState;

    /// Set state vector
    fn set_state(&mut self, state: MechanicalState);

    /// Snapshot the current state as the start of the next step
    fn buffer(&mut self, dt: f64);

    /// Number of stages
    fn stages(&self) -> usize;
}

/// Explicit solver trait
pub trait ExplicitSolver: Solver {
    /// Evaluate one stage with the given right-hand side `f(y, t_offset)`
    fn step<F>(&mut self, f: F, dt: f64) -> SolverStepResult
    where
        F: FnMut(&MechanicalState, f64) -> MechanicalState;

    /// Buffer and run all stages of one full step
    fn advance<F>(&mut self, mut f: F, dt: f64) -> &MechanicalState
    where
        F: FnMut(&MechanicalState, f64) -> MechanicalState,
    {
        self.buffer(dt);
        for _ in 0..self.stages() {
            self.step(&mut f, dt);
        }
        self.state()
    }
}
