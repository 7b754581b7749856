// coro.rs - Generation advance with one cooperative coroutine per row

use std::sync::Arc;

use log::trace;

use crate::error::Result;
use crate::grid::{CellState, Grid};

/// Computes row `y` of the next generation from a snapshot of the current one.
async fn process_row(y: usize, current: Arc<Grid>) -> (usize, Vec<CellState>) {
    let mut row = Vec::with_capacity(current.width());
    for x in 0..current.width() {
        row.push(current.successor_unchecked(x, y));
        tokio::task::yield_now().await; // Cooperative yielding
    }
    (y, row) // Return (row_id, completed_row)
}

/// Advances `grid` by one generation, spawning a task for every row.
///
/// All rows read the same frozen snapshot and are only written back once
/// every task has finished, so the result is identical to
/// [`Grid::advance`]. If any task fails the grid is left untouched.
pub async fn advance(grid: &mut Grid) -> Result<()> {
    let snapshot = Arc::new(grid.clone());

    let handles: Vec<_> = (0..grid.height())
        .map(|y| tokio::spawn(process_row(y, Arc::clone(&snapshot))))
        .collect();

    let mut rows = Vec::with_capacity(handles.len());
    for handle in handles {
        rows.push(handle.await?);
    }

    for (y, row) in rows {
        grid.next_row_mut(y).copy_from_slice(&row);
    }
    grid.swap_generations();
    trace!("advanced {} row coroutines", grid.height());
    Ok(())
}
