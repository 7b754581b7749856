// grid.rs - Toroidal cell grid for Conway's Game of Life

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::{GridError, Result};
use crate::patterns::Pattern;

/// State of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

/// Conway's B3/S23 rule for one cell.
pub fn next_state(current: CellState, live_neighbors: u8) -> CellState {
    match (current, live_neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive, // Survival
        (CellState::Dead, 3) => CellState::Alive,                          // Birth
        _ => CellState::Dead,                                              // Death or stays dead
    }
}

/// Fixed-size toroidal grid of cells.
///
/// Cells are addressed by `(x, y)` with `x < width` and `y < height`. Every
/// accessor that takes coordinates is bounds-checked and returns
/// [`GridError::OutOfBounds`] instead of wrapping; only neighbour counting
/// wraps around the edges.
///
/// Two buffers are kept: the visible generation and a scratch buffer that
/// [`advance`](Grid::advance) fills before swapping it in, so no cell of the
/// next generation is ever computed from another cell's new state.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    next: Vec<CellState>,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Grid {
    /// Creates an all-dead grid of `width x height` cells.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = match width.checked_mul(height) {
            Some(len) if len > 0 => len,
            _ => return Err(GridError::InvalidDimension { width, height }),
        };

        Ok(Self {
            width,
            height,
            cells: vec![CellState::Dead; len],
            next: vec![CellState::Dead; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(y * self.width + x)
        } else {
            Err(GridError::OutOfBounds { x, y, width: self.width, height: self.height })
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        let i = self.index(x, y)?;
        self.cells[i] = state;
        Ok(())
    }

    /// Flips one cell and returns its new state.
    ///
    /// The engine does no debouncing: callers invoke this once per press edge.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<CellState> {
        let i = self.index(x, y)?;
        self.cells[i] = self.cells[i].toggled();
        Ok(self.cells[i])
    }

    /// Number of live cells among the 8 neighbours of `(x, y)`, wrapping
    /// around both axes.
    ///
    /// On a grid one cell wide (or tall) the wrapped neighbours are the cell
    /// itself and are counted as such.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> Result<u8> {
        self.index(x, y)?;
        Ok(self.neighbors_unchecked(x, y))
    }

    fn neighbors_unchecked(&self, x: usize, y: usize) -> u8 {
        // -1, 0, +1 expressed as additions modulo the extent.
        let dxs = [self.width - 1, 0, 1];
        let dys = [self.height - 1, 0, 1];

        let mut count = 0;
        for (j, dy) in dys.iter().enumerate() {
            let ny = (y + dy) % self.height;
            for (i, dx) in dxs.iter().enumerate() {
                if i == 1 && j == 1 {
                    continue;
                }
                let nx = (x + dx) % self.width;
                if self.cells[ny * self.width + nx].is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Successor state of `(x, y)` computed from the current generation.
    /// Coordinates must already be in range.
    pub(crate) fn successor_unchecked(&self, x: usize, y: usize) -> CellState {
        next_state(self.cells[y * self.width + x], self.neighbors_unchecked(x, y))
    }

    /// Advances the whole grid by one generation.
    pub fn advance(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.next[y * self.width + x] = self.successor_unchecked(x, y);
            }
        }
        self.swap_generations();
        trace!("advanced {}x{} grid, {} alive", self.width, self.height, self.live_count());
    }

    /// Mutable view of row `y` in the scratch buffer.
    pub(crate) fn next_row_mut(&mut self, y: usize) -> &mut [CellState] {
        let start = y * self.width;
        &mut self.next[start..start + self.width]
    }

    pub(crate) fn swap_generations(&mut self) {
        std::mem::swap(&mut self.cells, &mut self.next);
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    /// Sets every cell alive with probability `probability`, drawing from `rng`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) -> Result<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GridError::InvalidProbability(probability));
        }
        for cell in self.cells.iter_mut() {
            *cell = CellState::from(rng.random_bool(probability));
        }
        Ok(())
    }

    /// Randomizes from a fresh generator. Without a seed one is taken from
    /// the wall clock. Returns the seed that was used.
    pub fn randomize_seeded(&mut self, probability: f64, seed: Option<u64>) -> Result<u64> {
        let seed = seed.unwrap_or_else(clock_seed);
        let mut rng = StdRng::seed_from_u64(seed);
        self.randomize(probability, &mut rng)?;
        debug!("randomized grid with p={probability} seed={seed}");
        Ok(seed)
    }

    /// Sets the cells of `pattern` alive with its top-left corner at `origin`.
    /// Nothing is written unless every cell fits.
    pub fn stamp(&mut self, pattern: &Pattern, origin: (usize, usize)) -> Result<()> {
        let (ox, oy) = origin;
        let mut indices = Vec::with_capacity(pattern.cells.len());
        for &(dx, dy) in pattern.cells {
            let (x, y) = (ox.saturating_add(dx), oy.saturating_add(dy));
            indices.push(self.index(x, y)?);
        }
        for i in indices {
            self.cells[i] = CellState::Alive;
        }
        debug!("stamped {} at ({ox}, {oy})", pattern.name);
        Ok(())
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of every live cell in row-major order.
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Hash of the visible generation.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

/// Seed derived from the wall clock.
pub(crate) fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;

    fn grid_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(x, y) in alive {
            grid.set(x, y, CellState::Alive).unwrap();
        }
        grid
    }

    fn live(grid: &Grid) -> Vec<(usize, usize)> {
        grid.iter_live().collect()
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(Grid::new(0, 5), Err(GridError::InvalidDimension { width: 0, height: 5 })));
        assert!(matches!(Grid::new(5, 0), Err(GridError::InvalidDimension { .. })));
        assert!(matches!(Grid::new(usize::MAX, 2), Err(GridError::InvalidDimension { .. })));
    }

    #[test]
    fn out_of_bounds_is_reported_not_wrapped() {
        let mut grid = Grid::new(4, 3).unwrap();
        assert!(matches!(grid.get(4, 0), Err(GridError::OutOfBounds { x: 4, y: 0, width: 4, height: 3 })));
        assert!(matches!(grid.get(0, 3), Err(GridError::OutOfBounds { .. })));
        assert!(grid.set(9, 9, CellState::Alive).is_err());
        assert!(grid.toggle(4, 3).is_err());
        assert!(grid.count_live_neighbors(0, 3).is_err());
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            let survive = n == 2 || n == 3;
            assert_eq!(next_state(CellState::Alive, n).is_alive(), survive, "alive with {n}");
            assert_eq!(next_state(CellState::Dead, n).is_alive(), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn corner_wraps_to_opposite_corners() {
        let grid = grid_with(6, 5, &[(0, 0)]);
        assert_eq!(grid.count_live_neighbors(5, 4).unwrap(), 1);
        assert_eq!(grid.count_live_neighbors(5, 0).unwrap(), 1);
        assert_eq!(grid.count_live_neighbors(0, 4).unwrap(), 1);
        assert_eq!(grid.count_live_neighbors(0, 0).unwrap(), 0);
        assert_eq!(grid.count_live_neighbors(3, 2).unwrap(), 0);
    }

    #[test]
    fn single_column_counts_itself() {
        let grid = grid_with(1, 4, &[(0, 1)]);
        // Left and right neighbours of (0, 1) are (0, 1) itself.
        assert_eq!(grid.count_live_neighbors(0, 1).unwrap(), 2);
        assert_eq!(grid.count_live_neighbors(0, 0).unwrap(), 3);
    }

    #[test]
    fn block_is_still_life() {
        let block = [(4, 4), (5, 4), (4, 5), (5, 5)];
        let mut grid = grid_with(10, 10, &block);
        grid.advance();
        assert_eq!(live(&grid), block.to_vec());
    }

    #[test]
    fn blinker_has_period_two() {
        let horizontal = vec![(4, 5), (5, 5), (6, 5)];
        let vertical = vec![(5, 4), (5, 5), (5, 6)];
        let mut grid = grid_with(10, 10, &horizontal);

        grid.advance();
        assert_eq!(live(&grid), vertical);
        grid.advance();
        assert_eq!(live(&grid), horizontal);
    }

    #[test]
    fn glider_step_is_synchronous() {
        // .X.
        // ..X
        // XXX
        let mut grid = grid_with(5, 5, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
        grid.advance();
        // X.X
        // .XX
        // .X.   (shifted down one row)
        assert_eq!(live(&grid), vec![(0, 1), (2, 1), (1, 2), (2, 2), (1, 3)]);
    }

    #[test]
    fn glider_crosses_the_seam() {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.stamp(&patterns::GLIDER, (0, 0)).unwrap();
        let start = live(&grid);
        // A glider moves one cell diagonally every 4 generations.
        for _ in 0..4 * 8 {
            grid.advance();
        }
        assert_eq!(live(&grid), start);
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.toggle(1, 2).unwrap(), CellState::Alive);
        assert_eq!(grid.get(1, 2).unwrap(), CellState::Alive);
        assert_eq!(grid.toggle(1, 2).unwrap(), CellState::Dead);
    }

    #[test]
    fn clear_kills_everything() {
        let mut grid = grid_with(4, 4, &[(0, 0), (3, 3), (1, 2)]);
        grid.clear();
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn randomize_extremes_and_validation() {
        let mut grid = Grid::new(7, 3).unwrap();
        grid.randomize_seeded(1.0, Some(3)).unwrap();
        assert_eq!(grid.live_count(), 21);
        grid.randomize_seeded(0.0, Some(3)).unwrap();
        assert_eq!(grid.live_count(), 0);
        assert!(matches!(grid.randomize_seeded(1.5, None), Err(GridError::InvalidProbability(_))));
        assert!(grid.randomize_seeded(f64::NAN, None).is_err());
    }

    #[test]
    fn stamp_is_all_or_nothing() {
        let mut grid = Grid::new(4, 4).unwrap();
        assert!(grid.stamp(&patterns::BLINKER, (2, 0)).is_err());
        assert_eq!(grid.live_count(), 0);
        grid.stamp(&patterns::BLINKER, (1, 3)).unwrap();
        assert_eq!(live(&grid), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn equality_ignores_scratch_buffer() {
        let mut a = grid_with(5, 5, &[(1, 1)]);
        let b = a.clone();
        a.advance();
        a.set(1, 1, CellState::Alive).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
