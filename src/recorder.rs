//! Trajectory recorder
//!
//! A [`Renderer`] that keeps the most recent ticks in a ring buffer and can
//! export them as CSV.

use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::host::Renderer;
use crate::state::SimulationState;
use crate::utils::constants::RECORDER_CAPACITY;

/// CSV column headers, in record order
pub const CSV_HEADER: [&str; 7] = [
    "time [s]",
    "x [m]",
    "x_dot [m/s]",
    "theta [rad]",
    "theta_dot [rad/s]",
    "integral [rad s]",
    "force [N]",
];

/// One rendered tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    pub state: SimulationState,
    pub force: f64,
}

impl Sample {
    fn record(&self) -> [String; 7] {
        let s = &self.state;
        [
            s.time.to_string(),
            s.x.to_string(),
            s.x_dot.to_string(),
            s.theta.to_string(),
            s.theta_dot.to_string(),
            s.integral.to_string(),
            self.force.to_string(),
        ]
    }
}

/// Ring-buffer recorder
///
/// Storage grows with the samples pushed, up to `capacity`. Once the buffer
/// is full, oldest samples are overwritten.
///
/// # Example
///
/// ```ignore
/// let mut recorder = Recorder::new(1000);
/// sim.start();
/// sim.run_frames(&mut recorder, 500);
/// recorder.save("run.csv")?;
/// ```
#[derive(Debug, Clone)]
pub struct Recorder {
    buffer: Vec<Sample>,
    capacity: usize,
    /// Current write position
    write_index: usize,
    fall_time: Option<f64>,
}

impl Recorder {
    /// Create recorder holding up to `capacity` samples (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Vec::new(),
            capacity,
            write_index: 0,
            fall_time: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get number of recorded samples
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    /// Time of the fall notification, if one was received
    pub fn fall_time(&self) -> Option<f64> {
        self.fall_time
    }

    /// Clear all recorded data
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.write_index = 0;
        self.fall_time = None;
    }

    /// Append a sample, overwriting the oldest one when full
    pub fn push(&mut self, sample: Sample) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(sample);
        } else {
            self.buffer[self.write_index] = sample;
        }
        self.write_index = (self.write_index + 1) % self.capacity;
    }

    /// Samples in chronological order (oldest to newest)
    pub fn samples(&self) -> impl Iterator<Item = &Sample> + '_ {
        // Until the buffer wraps, write_index == len and the split is a no-op
        let split = if self.is_full() { self.write_index } else { 0 };
        self.buffer[split..].iter().chain(self.buffer[..split].iter())
    }

    /// Get most recent sample
    pub fn last(&self) -> Option<&Sample> {
        // write_index is 0 only when empty or just wrapped onto the first slot
        let idx = self
            .write_index
            .checked_sub(1)
            .unwrap_or_else(|| self.buffer.len().saturating_sub(1));
        self.buffer.get(idx)
    }

    /// `(time, value)` series extracted from the recorded states
    pub fn series<F>(&self, f: F) -> Vec<(f64, f64)>
    where
        F: Fn(&Sample) -> f64,
    {
        self.samples().map(|s| (s.state.time, f(s))).collect()
    }

    /// Save recorded data to a CSV file
    ///
    /// # CSV Format
    ///
    /// ```csv
    /// time [s],x [m],x_dot [m/s],theta [rad],theta_dot [rad/s],integral [rad s],force [N]
    /// 0.02,0.0001,0.01,0.1746,0.004,0.0035,8.72
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let file = std::fs::File::create(path)?;
        self.save_to_writer(file)
    }

    /// Save recorded data to any writer
    pub fn save_to_writer<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        if self.is_empty() {
            return Err(ExportError::Empty);
        }

        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(CSV_HEADER)?;
        for sample in self.samples() {
            wtr.write_record(sample.record())?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(RECORDER_CAPACITY)
    }
}

impl Renderer for Recorder {
    fn render(&mut self, state: &SimulationState, force: f64) {
        self.push(Sample {
            state: *state,
            force,
        });
    }

    fn fallen(&mut self, state: &SimulationState) {
        self.fall_time = Some(state.time);
    }
}
