//! Cart-pole state

use nalgebra::Vector4;

/// Mechanical part of the state, integrated by RK4: `[x, x_dot, theta, theta_dot]`
pub type MechanicalState = Vector4<f64>;

/// Full simulation state
///
/// `theta` is measured from the upright position, positive when the pole
/// leans towards +x. The value is replaced wholesale every physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationState {
    /// Cart position (m)
    pub x: f64,
    /// Cart velocity (m/s)
    pub x_dot: f64,
    /// Pendulum angle from upright (rad)
    pub theta: f64,
    /// Pendulum angular velocity (rad/s)
    pub theta_dot: f64,
    /// Accumulated angle error for the integral term
    pub integral: f64,
    /// Elapsed simulation time (s)
    pub time: f64,
}

impl SimulationState {
    /// State at rest with the pole tilted by `theta` radians
    pub fn at_angle(theta: f64) -> Self {
        Self {
            theta,
            ..Self::default()
        }
    }

    /// Pack the integrated components into a vector
    #[inline]
    pub fn mechanical(&self) -> MechanicalState {
        Vector4::new(self.x, self.x_dot, self.theta, self.theta_dot)
    }

    /// Copy of `self` with the integrated components replaced
    #[inline]
    pub fn with_mechanical(&self, y: &MechanicalState) -> Self {
        Self {
            x: y[0],
            x_dot: y[1],
            theta: y[2],
            theta_dot: y[3],
            ..*self
        }
    }
}
