//! Classic 4th-order Runge-Kutta solver (RK4)

use crate::state::MechanicalState;

use super::{ExplicitSolver, Solver, SolverStepResult};

// RK4 Butcher tableau
// c = [0, 1/2, 1/2, 1]
// a = [[],
//      [1/2],
//      [0, 1/2],
//      [0, 0, 1]]
// b = [1/6, 1/3, 1/3, 1/6]
const C: [f64; 4] = [0.0, 0.5, 0.5, 1.0];
const B: [f64; 4] = [1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0];

/// Classic 4th-order Runge-Kutta solver
///
/// Four-stage explicit method with fixed timestep. Each call to
/// [`ExplicitSolver::step`] evaluates one stage; the fourth call combines
/// the slopes with weights `1, 2, 2, 1` scaled by `dt/6`.
///
/// # Characteristics
/// - Order: 4
/// - Stages: 4
/// - Explicit, fixed timestep
/// - Not A-stable
///
/// # References
/// - Kutta, W. (1901). "Beitrag zur näherungsweisen Integration totaler
///   Differentialgleichungen". Zeitschrift für Mathematik und Physik, 46, 435-453.
/// - Butcher, J. C. (2016). "Numerical Methods for Ordinary Differential
///   Equations". John Wiley & Sons, 3rd Edition.
#[derive(Debug, Clone)]
pub struct RK4 {
    state: MechanicalState,
    /// State at the start of the current step
    x0: MechanicalState,
    slopes: [MechanicalState; 4],
    stage: usize,
}

impl RK4 {
    /// Create a new RK4 solver with the given initial state
    pub fn new(initial: MechanicalState) -> Self {
        Self {
            state: initial,
            x0: initial,
            slopes: [MechanicalState::zeros(); 4],
            stage: 0,
        }
    }

    /// One full RK4 step of `f` from `y`, without keeping solver state around
    pub fn integrate<F>(y: &MechanicalState, f: F, dt: f64) -> MechanicalState
    where
        F: FnMut(&MechanicalState, f64) -> MechanicalState,
    {
        *RK4::new(*y).advance(f, dt)
    }
}

impl Default for RK4 {
    fn default() -> Self {
        Self::new(MechanicalState::zeros())
    }
}

impl Solver for RK4 {
    fn state(&self) -> &MechanicalState {
        &self.state
    }

    fn set_state(&mut self, state: MechanicalState) {
        self.state = state;
        self.stage = 0;
    }

    fn buffer(&mut self, _dt: f64) {
        self.x0 = self.state;
        self.stage = 0;
    }

    fn stages(&self) -> usize {
        4
    }
}

impl ExplicitSolver for RK4 {
    fn step<F>(&mut self, mut f: F, dt: f64) -> SolverStepResult
    where
        F: FnMut(&MechanicalState, f64) -> MechanicalState,
    {
        // Evaluate slope at current stage
        self.slopes[self.stage] = f(&self.state, C[self.stage] * dt);

        if self.stage < 3 {
            // Next stage is evaluated at x0 advanced along the latest slope
            self.state = self.x0 + self.slopes[self.stage] * (C[self.stage + 1] * dt);
            self.stage += 1;

            SolverStepResult::default()
        } else {
            self.state = self.x0
                + (self.slopes[0] * B[0]
                    + self.slopes[1] * B[1]
                    + self.slopes[2] * B[2]
                    + self.slopes[3] * B[3])
                    * dt;
            self.stage = 0;

            SolverStepResult { complete: true }
        }
    }
}
