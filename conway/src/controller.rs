// controller.rs - Run/pause gate and tick pacing around a Grid

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::error::{GridError, Result};
use crate::grid::{CellState, Grid, clock_seed};
use crate::patterns::{self, Pattern};

/// Number of recent generations remembered for cycle detection.
const HISTORY_LEN: usize = 10;

/// Startup settings for a [`Controller`].
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub interval: Duration,
    pub alive_probability: f64,
    /// Seed for the randomize generator; `None` seeds from the wall clock.
    pub seed: Option<u64>,
    /// Pause as soon as a generation repeats one of the last few.
    pub stop_on_cycle: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(30),
            alive_probability: 0.25,
            seed: None,
            stop_on_cycle: false,
        }
    }
}

/// How a generation is computed.
pub enum Stepper {
    Serial,
    #[cfg(feature = "coro")]
    Coroutines(tokio::runtime::Runtime),
}

/// Ring of recent generation fingerprints.
#[derive(Debug, Default)]
struct CycleDetector {
    history: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    /// Records `fingerprint`; true if it was already in the ring.
    fn observe(&mut self, fingerprint: u64) -> bool {
        let seen = self.count.min(HISTORY_LEN);
        if self.history[..seen].contains(&fingerprint) {
            return true;
        }
        self.history[self.count % HISTORY_LEN] = fingerprint;
        self.count += 1;
        false
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

/// Owns a [`Grid`] and decides when it advances.
///
/// The grid itself always advances when asked; the controller holds the
/// running flag and the last tick time. While paused no generation change
/// happens, but cell edits, clear and randomize still apply.
pub struct Controller {
    grid: Grid,
    running: bool,
    interval: Duration,
    last_tick: Option<Instant>,
    generation: u64,
    alive_probability: f64,
    rng: StdRng,
    stop_on_cycle: bool,
    cycles: CycleDetector,
    stepper: Stepper,
}

impl Controller {
    /// Wraps `grid`; the controller starts paused.
    pub fn new(grid: Grid, config: ControllerConfig) -> Result<Self> {
        check_probability(config.alive_probability)?;
        let seed = config.seed.unwrap_or_else(clock_seed);
        debug!("randomize generator seeded with {seed}");

        Ok(Self {
            grid,
            running: false,
            interval: config.interval,
            last_tick: None,
            generation: 0,
            alive_probability: config.alive_probability,
            rng: StdRng::seed_from_u64(seed),
            stop_on_cycle: config.stop_on_cycle,
            cycles: CycleDetector::default(),
            stepper: Stepper::Serial,
        })
    }

    /// Switches to computing generations with one coroutine per row.
    #[cfg(feature = "coro")]
    pub fn with_coroutines(mut self) -> Result<Self> {
        self.stepper = Stepper::Coroutines(tokio::runtime::Runtime::new()?);
        Ok(self)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn alive_probability(&self) -> f64 {
        self.alive_probability
    }

    pub fn set_alive_probability(&mut self, probability: f64) -> Result<()> {
        check_probability(probability)?;
        self.alive_probability = probability;
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.set_running(!self.running);
    }

    pub fn set_running(&mut self, running: bool) {
        if running == self.running {
            return;
        }
        self.running = running;
        self.last_tick = None;
        info!("{} at generation {}", if running { "resumed" } else { "paused" }, self.generation);
    }

    /// Advances once if running and at least one interval has passed since
    /// the previous advance. Returns whether a generation was computed.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.interval {
                return Ok(false);
            }
        }
        self.last_tick = Some(now);
        self.step()?;
        Ok(true)
    }

    /// Time left before [`tick`](Self::tick) would advance, or `None` while paused.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        Some(match self.last_tick {
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        })
    }

    /// Advances one generation regardless of the running flag.
    pub fn step(&mut self) -> Result<()> {
        match &self.stepper {
            Stepper::Serial => self.grid.advance(),
            #[cfg(feature = "coro")]
            Stepper::Coroutines(runtime) => runtime.block_on(crate::coro::advance(&mut self.grid))?,
        }
        self.generation += 1;

        if self.cycles.observe(self.grid.fingerprint()) && self.stop_on_cycle && self.running {
            info!("generation {} repeats a recent one, pausing", self.generation);
            self.set_running(false);
        }
        Ok(())
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<CellState> {
        self.grid.toggle(x, y)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        self.grid.set(x, y, state)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.restart();
        info!("cleared grid");
    }

    /// Randomizes from the controller's generator, which keeps advancing
    /// between calls.
    pub fn randomize(&mut self) -> Result<()> {
        self.grid.randomize(self.alive_probability, &mut self.rng)?;
        self.restart();
        info!("randomized grid, {} alive", self.grid.live_count());
        Ok(())
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        debug!("randomize generator reseeded with {seed}");
    }

    /// Clears the grid and centres `pattern` on it.
    pub fn load_pattern(&mut self, pattern: &Pattern) -> Result<()> {
        patterns::load_centered(&mut self.grid, pattern)?;
        self.restart();
        info!("loaded {}", pattern.name);
        Ok(())
    }

    fn restart(&mut self) {
        self.generation = 0;
        self.cycles.reset();
    }
}

fn check_probability(probability: f64) -> Result<()> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(GridError::InvalidProbability(probability))
    }
}
