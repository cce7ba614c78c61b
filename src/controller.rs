//! Saturated PID controller acting on the pendulum angle

use crate::settings::ControllerGains;
use crate::state::SimulationState;
use crate::utils::constants::ACTUATOR_LIMIT;

/// Hard saturation to a fixed range
///
/// Values outside `[min, max]` are truncated to the nearest bound. NaN has
/// no nearest bound and maps to zero force, flagged as saturated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation {
    min: f64,
    max: f64,
}

impl Saturation {
    /// Create saturation with limits
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Symmetric range `[-limit, limit]`
    pub fn symmetric(limit: f64) -> Self {
        Self::new(-limit, limit)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp `value`, reporting whether it was out of range
    #[inline]
    pub fn apply(&self, value: f64) -> (f64, bool) {
        if value.is_nan() {
            return (0.0_f64.clamp(self.min, self.max), true);
        }
        let clamped = value.clamp(self.min, self.max);
        (clamped, value < self.min || value > self.max)
    }
}

impl Default for Saturation {
    fn default() -> Self {
        Self::symmetric(ACTUATOR_LIMIT)
    }
}

/// Output of one control evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlOutput {
    /// Force applied to the cart
    pub force: f64,
    /// True if the raw PID command exceeded the actuator range
    pub saturated: bool,
}

/// PID controller
///
/// # Control Law
///
/// u = clamp(Kp * θ + Ki * ∫θ + Kd * θ̇, -50, 50)
///
/// The angle itself is the error signal (setpoint is upright). The integral
/// is not kept here: it lives in [`SimulationState::integral`] and is
/// advanced by the integrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PidController {
    gains: ControllerGains,
    saturation: Saturation,
}

impl PidController {
    /// Create PID controller with gains and the default actuator limit
    pub fn new(gains: ControllerGains) -> Self {
        Self {
            gains,
            saturation: Saturation::default(),
        }
    }

    pub fn with_saturation(gains: ControllerGains, saturation: Saturation) -> Self {
        Self { gains, saturation }
    }

    pub fn gains(&self) -> ControllerGains {
        self.gains
    }

    /// Set PID gains
    pub fn set_gains(&mut self, gains: ControllerGains) {
        self.gains = gains;
    }

    pub fn saturation(&self) -> Saturation {
        self.saturation
    }

    /// Unsaturated command
    #[inline]
    pub fn raw(&self, state: &SimulationState) -> f64 {
        let ControllerGains { kp, ki, kd } = self.gains;
        kp * state.theta + ki * state.integral + kd * state.theta_dot
    }

    /// Saturated force for the current state
    pub fn compute(&self, state: &SimulationState) -> ControlOutput {
        let (force, saturated) = self.saturation.apply(self.raw(state));
        ControlOutput { force, saturated }
    }
}
