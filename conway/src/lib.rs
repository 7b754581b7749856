//! Conway's Game of Life on a fixed toroidal grid.
//!
//! [`Grid`] is the simulation engine: a pure state machine that is advanced
//! one synchronous generation at a time and edited cell by cell. It knows
//! nothing about windows, pixels or clocks. [`Controller`] layers the
//! run/pause gate and tick pacing on top of it for interactive front ends.

pub mod controller;
#[cfg(feature = "coro")]
pub mod coro;
pub mod error;
pub mod grid;
pub mod patterns;

pub use controller::{Controller, ControllerConfig, Stepper};
pub use error::{GridError, Result};
pub use grid::{CellState, Grid, next_state};
pub use patterns::{PATTERNS, Pattern};
