//! Thread-safe tracker facade and fixed-rate runner.
//!
//! [`Tracker`] owns the shared [`TargetRegistry`] and a [`ControlLoop`].
//! Feed operations (`add_target`, `update_target`, ...) may be called from
//! any thread and only take the registry lock. The runner thread started by
//! [`Tracker::start`] ticks the loop at `maxFPS`, timestamping every tick
//! with the tracker's [`Clock`].
//!
//! # Locking
//!
//! Two locks, always taken in the same order: loop state, then registry.
//! The running flag lives inside the loop state, so checking it and running
//! the tick body happen under one lock acquisition. [`Tracker::stop`] clears
//! the flag under that lock, which guarantees no tick body starts after it
//! returns.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::common::clock::{Clock, MonotonicClock};
use crate::common::rng::SimpleRng;
use crate::common::vector::Vec3;
use crate::registry::{EntityId, SharedRegistry, TargetRegistry};
use crate::reporter::{NoOpReporter, TickReporter};

use super::config::TrackerConfig;
use super::control_loop::{ControlLoop, TickOutcome};
use super::errors::ConfigError;
use super::stats::TrackerStats;

struct LoopState<P: TickReporter> {
    control: ControlLoop<P>,
    rng: SimpleRng,
    running: bool,
    /// Clock time of the previous tick
    last_tick: Option<f64>,
}

impl<P: TickReporter> LoopState<P> {
    fn tick_now(&mut self, now: f64, default_dt: f64) -> TickOutcome {
        let dt = self.last_tick.map_or(default_dt, |t| now - t);
        self.last_tick = Some(now);
        self.control.tick_at(now, dt, &mut self.rng)
    }
}

/// Target tracker with a background control loop.
///
/// # Example
///
/// ```no_run
/// use tracklock_rs::{Tracker, TrackerConfig, Vec3};
///
/// let tracker = Tracker::new(TrackerConfig::default()).unwrap();
/// let id = tracker.add_target(Vec3::new(10.0, 0.0, 0.0), 1, "head");
/// tracker.start().unwrap();
/// tracker.update_target(id, Vec3::new(10.5, 0.0, 0.0));
/// println!("{}", tracker.stats().to_json());
/// tracker.stop();
/// ```
pub struct Tracker<P: TickReporter + Send + 'static = NoOpReporter> {
    registry: SharedRegistry,
    state: Arc<Mutex<LoopState<P>>>,
    clock: Arc<dyn Clock>,
    runner: Mutex<Option<JoinHandle<()>>>,
    tick_interval: f64,
}

impl Tracker<NoOpReporter> {
    /// Validate `config` and build an idle tracker.
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        Self::with_reporter(config, NoOpReporter)
    }
}

impl<P: TickReporter + Send + 'static> Tracker<P> {
    /// Build an idle tracker reporting every tick to `reporter`.
    pub fn with_reporter(config: TrackerConfig, reporter: P) -> Result<Self, ConfigError> {
        let registry: SharedRegistry =
            Arc::new(Mutex::new(TargetRegistry::new(config.selection_params())));
        let rng = config
            .rng_seed
            .map_or_else(SimpleRng::from_entropy, SimpleRng::new);
        let tick_interval = config.tick_interval();
        let control = ControlLoop::with_reporter(config, registry.clone(), reporter)?;

        Ok(Self {
            registry,
            state: Arc::new(Mutex::new(LoopState {
                control,
                rng,
                running: false,
                last_tick: None,
            })),
            clock: Arc::new(MonotonicClock::new()),
            runner: Mutex::new(None),
            tick_interval,
        })
    }

    /// Replace the time source. Call before any target is added.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ------------------------------------------------------------------
    // Feed
    // ------------------------------------------------------------------

    /// Register an entity seen now.
    pub fn add_target(&self, position: Vec3, priority: u32, category: impl Into<String>) -> EntityId {
        let now = self.clock.now();
        self.registry.lock().add(position, priority, category, now)
    }

    /// Report a new position for `id`. Unknown ids are ignored.
    pub fn update_target(&self, id: EntityId, position: Vec3) {
        let now = self.clock.now();
        self.registry.lock().update(id, position, now);
    }

    /// Returns whether `id` was registered.
    pub fn remove_target(&self, id: EntityId) -> bool {
        self.registry.lock().remove(id).is_some()
    }

    pub fn set_visibility(&self, id: EntityId, visible: bool) {
        self.registry.lock().set_visibility(id, visible);
    }

    pub fn set_health(&self, id: EntityId, health: f64) {
        self.registry.lock().set_health(id, health);
    }

    /// Forward an external offset to the loop's compensation hook.
    pub fn apply_compensation(&self, offset: Vec3) {
        self.state.lock().control.apply_compensation(offset);
    }

    // ------------------------------------------------------------------
    // Runner
    // ------------------------------------------------------------------

    /// Spawn the control thread. No-op when already running.
    pub fn start(&self) -> io::Result<()> {
        let mut runner = self.runner.lock();
        {
            let mut state = self.state.lock();
            if state.running {
                return Ok(());
            }
            state.running = true;
            state.last_tick = None;
        }
        // A previous runner has already observed the cleared flag
        if let Some(handle) = runner.take() {
            join_runner(handle);
        }

        let state = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);
        let interval = self.tick_interval;
        let spawned = thread::Builder::new()
            .name("tracklock-loop".to_string())
            .spawn(move || run(state, clock, interval));

        match spawned {
            Ok(handle) => {
                log::info!("Control loop started at {:.1} Hz", 1.0 / interval);
                *runner = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.state.lock().running = false;
                Err(e)
            }
        }
    }

    /// Stop the control thread and wait for it. Idempotent.
    ///
    /// No tick body starts after this returns.
    pub fn stop(&self) {
        let mut runner = self.runner.lock();
        let was_running = {
            let mut state = self.state.lock();
            std::mem::replace(&mut state.running, false)
        };
        if let Some(handle) = runner.take() {
            join_runner(handle);
        }
        if was_running {
            log::info!("Control loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Run one tick on the caller's thread at the clock's current time.
    ///
    /// `dt` is the elapsed time since the previous tick.
    pub fn step(&self, dt: f64) -> TickOutcome {
        let now = self.clock.now();
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.last_tick = Some(now);
        state.control.tick_at(now, dt, &mut state.rng)
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn stats(&self) -> TrackerStats {
        self.state.lock().control.stats()
    }

    /// Current observer position
    pub fn observer(&self) -> Vec3 {
        self.state.lock().control.observer()
    }

    /// Place the observer
    pub fn set_observer(&self, position: Vec3) {
        self.state.lock().control.set_observer(position);
    }

    /// Borrow the reporter under the loop lock.
    pub fn inspect_reporter<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(self.state.lock().control.reporter())
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

impl<P: TickReporter + Send + 'static> Drop for Tracker<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<P: TickReporter>(state: Arc<Mutex<LoopState<P>>>, clock: Arc<dyn Clock>, interval: f64) {
    let period = Duration::from_secs_f64(interval);
    let mut deadline = Instant::now();
    loop {
        {
            let mut guard = state.lock();
            if !guard.running {
                break;
            }
            guard.tick_now(clock.now(), interval);
        }

        deadline += period;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        } else {
            // Overran: drop the backlog rather than bursting
            deadline = now;
        }
    }
}

fn join_runner(handle: JoinHandle<()>) {
    if handle.join().is_err() {
        log::warn!("Control loop thread panicked");
    }
}
