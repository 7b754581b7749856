// error.rs - Errors raised by the grid engine

use thiserror::Error;

/// Contract violations reported by [`Grid`](crate::Grid) and friends.
///
/// None of these are expected at runtime; they mean a caller handed the
/// engine a value it promised never to pass.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("alive probability must lie in 0.0..=1.0, got {0}")]
    InvalidProbability(f64),

    #[cfg(feature = "coro")]
    #[error("row coroutine failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[cfg(feature = "coro")]
    #[error("could not start coroutine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
