//! Driver lifecycle tests
//!
//! Exercises the Idle / Running / Fallen state machine through the host
//! seams: a custom frame queue standing in for a browser animation-frame
//! callback, a recording renderer, configuration files and CSV export.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use cartpole_sim::prelude::*;
use cartpole_sim::ConfigError;

/// Host frame queue shared between the host loop and the driver
#[derive(Clone, Default)]
struct FrameQueue {
    pending: Rc<RefCell<bool>>,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Scheduler for FrameQueue {
    fn request_frame(&mut self) {
        *self.pending.borrow_mut() = true;
        self.log.borrow_mut().push("request");
    }

    fn cancel_frame(&mut self) {
        *self.pending.borrow_mut() = false;
        self.log.borrow_mut().push("cancel");
    }
}

impl FrameQueue {
    /// Host side: fire the pending callback, if any
    fn fire<R: Renderer>(&self, sim: &mut Simulation<FrameQueue>, renderer: &mut R) -> bool {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        if pending {
            sim.tick(renderer);
        }
        pending
    }
}

#[derive(Default)]
struct CountingRenderer {
    frames: usize,
    falls: usize,
    last_force: f64,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, _state: &SimulationState, force: f64) {
        self.frames += 1;
        self.last_force = force;
    }

    fn fallen(&mut self, _state: &SimulationState) {
        self.falls += 1;
    }
}

#[test]
fn test_host_frame_loop() {
    let queue = FrameQueue::default();
    let mut sim = Simulation::new(SimulationConfig::default(), queue.clone()).unwrap();
    let mut renderer = CountingRenderer::default();

    // Nothing scheduled while idle
    assert!(!queue.fire(&mut sim, &mut renderer));

    sim.start();
    for _ in 0..20 {
        assert!(queue.fire(&mut sim, &mut renderer));
    }
    assert_eq!(renderer.frames, 20);
    assert_eq!(renderer.last_force, sim.last_force());

    sim.pause();
    assert!(!queue.fire(&mut sim, &mut renderer));
    assert_eq!(renderer.frames, 20);

    let log = queue.log.borrow();
    assert_eq!(log.first(), Some(&"request"));
    assert_eq!(log.last(), Some(&"cancel"));
    assert_eq!(log.iter().filter(|e| **e == "request").count(), 21);
}

#[test]
fn test_fallen_notification_is_one_time() {
    let cfg = SimulationConfig {
        initial_angle_deg: 89.0,
        gains: ControllerGains::new(0.0, 0.0, 0.0),
        ..SimulationConfig::default()
    };
    let queue = FrameQueue::default();
    let mut sim = Simulation::new(cfg, queue.clone()).unwrap();
    let mut renderer = CountingRenderer::default();

    sim.start();
    while queue.fire(&mut sim, &mut renderer) {}

    assert_eq!(sim.status(), RunStatus::Fallen);
    assert_eq!(renderer.falls, 1);

    // Ticks delivered anyway are ignored
    sim.tick(&mut renderer);
    sim.start();
    sim.tick(&mut renderer);
    assert_eq!(renderer.falls, 1);
    assert!(!*queue.pending.borrow());
}

#[test]
fn test_reset_restores_initial_conditions() {
    let mut sim = Simulation::headless(SimulationConfig {
        gains: ControllerGains::new(50.0, 3.0, 20.0),
        ..SimulationConfig::default()
    })
    .unwrap();

    sim.start();
    sim.run_frames(&mut NullRenderer, 40);
    let s = *sim.state();
    assert!(s.x != 0.0 && s.x_dot != 0.0 && s.integral != 0.0 && s.time > 0.0);

    sim.set_initial_angle(25.0);
    // Takes effect on reset only
    assert_eq!(*sim.state(), s);

    sim.reset();
    let r = sim.state();
    assert_eq!(sim.status(), RunStatus::Idle);
    assert_eq!(r.x, 0.0);
    assert_eq!(r.x_dot, 0.0);
    assert_eq!(r.theta_dot, 0.0);
    assert_eq!(r.integral, 0.0);
    assert_eq!(r.time, 0.0);
    assert_relative_eq!(r.theta, 25f64.to_radians(), epsilon = 1e-15);
    assert!(!sim.scheduler().is_pending());
}

#[test]
fn test_reset_while_running_stops() {
    let mut sim = Simulation::headless(SimulationConfig::default()).unwrap();
    sim.start();
    sim.run_frames(&mut NullRenderer, 5);

    sim.reset();
    assert_eq!(sim.status(), RunStatus::Idle);
    assert_eq!(sim.run_frames(&mut NullRenderer, 5), 0);
    assert_eq!(sim.state().time, 0.0);
}

#[test]
fn test_gain_change_applies_on_next_tick() {
    let mut sim = Simulation::headless(SimulationConfig::default()).unwrap();
    sim.start();
    sim.run_frames(&mut NullRenderer, 1);

    sim.set_gains(0.0, 0.0, 0.0);
    assert_eq!(sim.gains(), ControllerGains::new(0.0, 0.0, 0.0));

    sim.run_frames(&mut NullRenderer, 1);
    assert_eq!(sim.last_force(), 0.0);
}

#[test]
fn test_config_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let cfg = SimulationConfig {
        initial_angle_deg: 12.5,
        substeps: 3,
        ..SimulationConfig::default()
    };
    std::fs::write(&path, cfg.to_json_string().unwrap()).unwrap();

    let loaded = SimulationConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded, cfg);

    let sim = Simulation::headless(loaded).unwrap();
    assert_eq!(sim.substeps(), 3);
    assert_eq!(sim.initial_angle_deg(), 12.5);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SimulationConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_recorder_csv_export() {
    let mut sim = Simulation::headless(SimulationConfig::default()).unwrap();
    let mut recorder = Recorder::new(1000);

    sim.start();
    sim.run_frames(&mut recorder, 25);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.csv");
    recorder.save(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    // 1 header + 25 ticks
    assert_eq!(lines.len(), 26);
    assert!(lines[0].starts_with("time [s],x [m]"));

    let last: Vec<f64> = lines[25].split(',').map(|v| v.parse().unwrap()).collect();
    assert_eq!(last.len(), 7);
    assert_relative_eq!(last[0], sim.state().time, epsilon = 1e-12);
    assert_relative_eq!(last[3], sim.state().theta, epsilon = 1e-12);
    assert_relative_eq!(last[6], sim.last_force(), epsilon = 1e-12);
}

#[test]
fn test_bounded_recorder_keeps_latest_ticks() {
    let mut sim = Simulation::headless(SimulationConfig::default()).unwrap();
    let mut recorder = Recorder::new(10);

    sim.start();
    assert_eq!(sim.run_frames(&mut recorder, 50), 50);

    assert_eq!(recorder.len(), 10);
    assert!(recorder.is_full());
    let last = recorder.last().unwrap();
    assert_eq!(last.state, *sim.state());
    assert_eq!(last.force, sim.last_force());

    // Oldest retained tick is the 41st: 40 ticks of 2 x 0.01 s before it
    let first = recorder.samples().next().unwrap();
    assert_relative_eq!(first.state.time, 0.82, epsilon = 1e-9);

    let mut csv = Vec::new();
    recorder.save_to_writer(&mut csv).unwrap();
    assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 11);
}
