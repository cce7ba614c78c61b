//! Cart-pole equations of motion
//!
//! Point-mass pendulum of mass `m` at distance `l` from the pivot, mounted on
//! a cart of mass `M` with viscous friction. With `s = sin θ`, `c = cos θ`:
//!
//! ```text
//! denom = M + m - m c²
//! ẍ = (u - b ẋ + m l θ̇² s - m g s c) / denom
//! θ̈ = ((M + m) g s - c (u - b ẋ + m l θ̇² s)) / (l denom)
//! ```
//!
//! `denom ≥ M > 0` for any valid parameter set, so no guard is needed.

use nalgebra::Vector4;

use crate::settings::PhysicalParameters;
use crate::state::{MechanicalState, SimulationState};

/// Cart-pole model
#[derive(Debug, Clone, Copy)]
pub struct CartPole {
    params: PhysicalParameters,
}

impl CartPole {
    pub fn new(params: PhysicalParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PhysicalParameters {
        &self.params
    }

    /// Time derivative `[ẋ, ẍ, θ̇, θ̈]` of `y = [x, ẋ, θ, θ̇]` under force `u`
    pub fn derivatives(&self, y: &MechanicalState, u: f64) -> MechanicalState {
        let PhysicalParameters {
            cart_mass,
            pole_mass,
            half_length,
            gravity,
            friction,
            ..
        } = self.params;

        let x_dot = y[1];
        let theta = y[2];
        let theta_dot = y[3];

        let (s, c) = theta.sin_cos();
        let denom = cart_mass + pole_mass - pole_mass * c * c;

        // Net horizontal drive seen by both equations
        let drive = u - friction * x_dot + pole_mass * half_length * theta_dot * theta_dot * s;

        let x_ddot = (drive - pole_mass * gravity * s * c) / denom;
        let theta_ddot =
            ((cart_mass + pole_mass) * gravity * s - c * drive) / (half_length * denom);

        Vector4::new(x_dot, x_ddot, theta_dot, theta_ddot)
    }

    /// Total mechanical energy (kinetic + potential, pivot height as reference)
    pub fn energy(&self, state: &SimulationState) -> f64 {
        let p = &self.params;
        let c = state.theta.cos();

        let kinetic = 0.5 * p.total_mass() * state.x_dot * state.x_dot
            + p.pole_mass * p.half_length * c * state.x_dot * state.theta_dot
            + 0.5 * p.pole_mass * p.half_length * p.half_length * state.theta_dot * state.theta_dot;
        let potential = p.pole_mass * p.gravity * p.half_length * c;

        kinetic + potential
    }
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new(PhysicalParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_upright_equilibrium_is_fixed_point() {
        let model = CartPole::default();
        // Cart position does not enter the dynamics
        for x in [-2.0, 0.0, 1.3] {
            let dy = model.derivatives(&Vector4::new(x, 0.0, 0.0, 0.0), 0.0);
            assert_eq!(dy, Vector4::zeros());
        }
    }

    #[test]
    fn test_gravity_tips_pole_away_from_upright() {
        let model = CartPole::default();

        let dy = model.derivatives(&Vector4::new(0.0, 0.0, 0.1, 0.0), 0.0);
        assert!(dy[3] > 0.0);

        let dy = model.derivatives(&Vector4::new(0.0, 0.0, -0.1, 0.0), 0.0);
        assert!(dy[3] < 0.0);
    }

    #[test]
    fn test_positive_force_pushes_cart_and_rights_pole() {
        let model = CartPole::default();
        let dy = model.derivatives(&Vector4::zeros(), 10.0);

        // denom = M at θ = 0
        assert_relative_eq!(dy[1], 10.0 / 1.0, epsilon = 1e-12);
        assert_relative_eq!(dy[3], -10.0 / (0.5 * 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_friction_opposes_cart_velocity() {
        let model = CartPole::default();
        let dy = model.derivatives(&Vector4::new(0.0, 2.0, 0.0, 0.0), 0.0);

        assert_eq!(dy[0], 2.0);
        assert_relative_eq!(dy[1], -0.1 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matches_closed_form() {
        let params = PhysicalParameters::default();
        let model = CartPole::new(params);
        let (x_dot, theta, theta_dot, u) = (0.4, 0.7, -1.2, 3.0);

        let dy = model.derivatives(&Vector4::new(0.0, x_dot, theta, theta_dot), u);

        let (m_c, m_p, l, g, b) = (1.0, 0.1, 0.5, 9.81, 0.1);
        let (s, c) = (f64::sin(theta), f64::cos(theta));
        let denom = m_c + m_p - m_p * c * c;
        let x_ddot =
            (u - b * x_dot + m_p * l * theta_dot * theta_dot * s - m_p * g * s * c) / denom;
        let theta_ddot = ((m_c + m_p) * g * s
            - c * (u - b * x_dot + m_p * l * theta_dot * theta_dot * s))
            / (l * denom);

        assert_relative_eq!(dy[1], x_ddot, epsilon = 1e-12);
        assert_relative_eq!(dy[3], theta_ddot, epsilon = 1e-12);
    }

    #[test]
    fn test_energy_at_rest_is_potential() {
        let model = CartPole::default();
        let upright = SimulationState::default();
        let hanging = SimulationState::at_angle(std::f64::consts::PI);

        assert_relative_eq!(model.energy(&upright), 0.1 * 9.81 * 0.5, epsilon = 1e-12);
        assert_relative_eq!(model.energy(&hanging), -0.1 * 9.81 * 0.5, epsilon = 1e-12);
    }
}
