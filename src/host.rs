//! Seams to the host environment
//!
//! The simulation core never talks to a UI or event loop directly. The host
//! supplies a [`Scheduler`] (its per-frame callback mechanism) and a
//! [`Renderer`] that receives every completed tick.

use crate::state::SimulationState;

/// Receives simulation output
pub trait Renderer {
    /// Called once per completed tick with the new state and the last force applied
    fn render(&mut self, state: &SimulationState, force: f64);

    /// Called once when the pole falls
    fn fallen(&mut self, _state: &SimulationState) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, state: &SimulationState, force: f64) {
        (**self).render(state, force);
    }

    fn fallen(&mut self, state: &SimulationState) {
        (**self).fallen(state);
    }
}

/// Renderer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &SimulationState, _force: f64) {}
}

/// Host frame scheduling
///
/// The driver asks for a frame when it wants to be ticked again and cancels
/// the request when it stops running. The host calls
/// [`Simulation::tick`](crate::driver::Simulation::tick) when the frame fires.
pub trait Scheduler {
    fn request_frame(&mut self);

    fn cancel_frame(&mut self);
}

/// Deterministic scheduler for headless runs and tests
///
/// Holds at most one pending frame, like a browser's animation-frame queue
/// for a single callback.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: bool,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending frame, if any
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total frame requests received
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total cancellations received
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requested += 1;
    }

    fn cancel_frame(&mut self) {
        self.pending = false;
        self.cancelled += 1;
    }
}
