//! Boundary events checked after each tick
//!
//! - [`TrackLimit`]: inelastic walls at both ends of the track.
//! - [`FallCondition`]: one-shot detector for the pole passing horizontal.

use crate::state::SimulationState;
use crate::utils::constants::{FALL_ANGLE, TRACK_LIMIT};

/// Inelastic track walls at `±limit`
///
/// A cart beyond a wall is put back on it and its velocity is zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLimit {
    limit: f64,
}

impl TrackLimit {
    pub fn new(limit: f64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Clamp the cart onto the track. Returns the new state and whether a
    /// wall was hit.
    pub fn apply(&self, state: &SimulationState) -> (SimulationState, bool) {
        if state.x.abs() <= self.limit {
            return (*state, false);
        }

        let clamped = SimulationState {
            x: state.x.clamp(-self.limit, self.limit),
            x_dot: 0.0,
            ..*state
        };
        (clamped, true)
    }
}

impl Default for TrackLimit {
    fn default() -> Self {
        Self::new(TRACK_LIMIT)
    }
}

/// Fall detector
///
/// Fires once when `|theta|` exceeds the threshold, records the event time,
/// and deactivates until [`FallCondition::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct FallCondition {
    threshold: f64,
    time: Option<f64>,
}

impl FallCondition {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            time: None,
        }
    }

    /// Check the state; true only on the transition into the fallen region
    pub fn detect(&mut self, state: &SimulationState) -> bool {
        if !self.is_active() || state.theta.abs() <= self.threshold {
            return false;
        }
        self.time = Some(state.time);
        true
    }

    /// Time at which the fall was detected
    pub fn event_time(&self) -> Option<f64> {
        self.time
    }

    pub fn is_active(&self) -> bool {
        self.time.is_none()
    }

    /// Re-arm the detector
    pub fn reset(&mut self) {
        self.time = None;
    }
}

impl Default for FallCondition {
    fn default() -> Self {
        Self::new(FALL_ANGLE)
    }
}
