//! Simulation settings types.
//!
//! Physical parameters are fixed for the lifetime of a run. Gains, the
//! initial angle and the substep count are owned by the driver and may be
//! changed between ticks through its setters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::utils::constants::*;

/// Physical constants of the cart-pole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalParameters {
    /// Cart mass M (kg)
    pub cart_mass: f64,

    /// Pendulum mass m (kg)
    pub pole_mass: f64,

    /// Pendulum half-length l (m)
    pub half_length: f64,

    /// Gravitational acceleration g (m/s²)
    pub gravity: f64,

    /// Fixed physics time step (s)
    pub dt: f64,

    /// Viscous cart friction coefficient (N·s/m)
    pub friction: f64,
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            cart_mass: CART_MASS,
            pole_mass: POLE_MASS,
            half_length: POLE_HALF_LENGTH,
            gravity: GRAVITY,
            dt: SIM_TIMESTEP,
            friction: CART_FRICTION,
        }
    }
}

impl PhysicalParameters {
    /// Total moving mass M + m
    #[inline]
    pub fn total_mass(&self) -> f64 {
        self.cart_mass + self.pole_mass
    }

    /// Check that the parameters describe a physical system
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cart_mass", self.cart_mass)?;
        positive("pole_mass", self.pole_mass)?;
        positive("half_length", self.half_length)?;
        positive("gravity", self.gravity)?;
        positive("dt", self.dt)?;
        non_negative("friction", self.friction)?;
        Ok(())
    }
}

/// PID gains acting on the pendulum angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl ControllerGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

impl Default for ControllerGains {
    fn default() -> Self {
        Self::new(GAIN_P, GAIN_I, GAIN_D)
    }
}

/// Complete configuration of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Physical constants
    pub params: PhysicalParameters,

    /// Controller gains at startup
    pub gains: ControllerGains,

    /// Initial pendulum angle from upright, in degrees
    pub initial_angle_deg: f64,

    /// Physics steps per scheduled tick
    pub substeps: usize,

    /// Half-width of the cart track (m)
    pub track_limit: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            params: PhysicalParameters::default(),
            gains: ControllerGains::default(),
            initial_angle_deg: INITIAL_ANGLE_DEG,
            substeps: SIM_SUBSTEPS,
            track_limit: TRACK_LIMIT,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        finite("kp", self.gains.kp)?;
        finite("ki", self.gains.ki)?;
        finite("kd", self.gains.kd)?;
        finite("initial_angle_deg", self.initial_angle_deg)?;
        positive("track_limit", self.track_limit)?;
        if self.substeps == 0 {
            return Err(ConfigError::NoSubsteps);
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
