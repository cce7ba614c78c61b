//! Simulation constants and defaults

use std::f64::consts::FRAC_PI_2;

/// Actuator force limit; controller output is saturated to `[-ACTUATOR_LIMIT, ACTUATOR_LIMIT]`
pub const ACTUATOR_LIMIT: f64 = 50.0;

/// Half-width of the cart track in meters
pub const TRACK_LIMIT: f64 = 2.5;

/// Pendulum angle beyond which the run is considered failed
pub const FALL_ANGLE: f64 = FRAC_PI_2;

/// Default fixed physics step
pub const SIM_TIMESTEP: f64 = 0.01;

/// Default number of physics steps per scheduled tick
pub const SIM_SUBSTEPS: usize = 2;

/// Default initial pendulum angle in degrees
pub const INITIAL_ANGLE_DEG: f64 = 10.0;

/// Default cart mass (kg)
pub const CART_MASS: f64 = 1.0;

/// Default pendulum mass (kg)
pub const POLE_MASS: f64 = 0.1;

/// Default pendulum half-length (m)
pub const POLE_HALF_LENGTH: f64 = 0.5;

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Default viscous cart friction (N·s/m)
pub const CART_FRICTION: f64 = 0.1;

/// Default proportional gain
pub const GAIN_P: f64 = 50.0;

/// Default integral gain
pub const GAIN_I: f64 = 0.0;

/// Default derivative gain
pub const GAIN_D: f64 = 20.0;

/// Default number of ticks kept by a trajectory recorder
pub const RECORDER_CAPACITY: usize = 10_000;
