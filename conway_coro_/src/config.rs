// config.rs - Startup configuration from the command line

use std::time::Duration;

use clap::Parser;
use conway::{Controller, ControllerConfig, Grid};

/// Interactive Conway's Game of Life on a wrap-around grid.
///
/// Keys: Space start/pause, C clear, R randomize, Esc quit.
/// Left click toggles the cell under the pointer.
#[derive(Debug, Clone, Parser)]
#[command(name = "conway_coro", version)]
pub struct Config {
    /// Grid width in pixels.
    #[arg(long, default_value_t = 1920)]
    pub width: u32,

    /// Grid height in pixels.
    #[arg(long, default_value_t = 1080)]
    pub height: u32,

    /// Edge length of one cell in pixels.
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u32).range(1..))]
    pub cell_size: u32,

    /// Minimum time between generations, in milliseconds.
    #[arg(long, default_value_t = 30)]
    pub tick_ms: u64,

    /// Chance that randomize makes a cell alive.
    #[arg(long, default_value_t = 0.25)]
    pub alive_probability: f64,

    /// Seed for randomize; taken from the clock when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Open the window fullscreen.
    #[arg(long)]
    pub fullscreen: bool,

    /// Compute each generation with one coroutine per row.
    #[arg(long)]
    pub coro: bool,

    /// Pause when a generation repeats one of the last ten.
    #[arg(long)]
    pub stop_on_cycle: bool,
}

impl Config {
    /// Grid size in cells; partial cells at the right and bottom are dropped.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        (
            (self.width / self.cell_size) as usize,
            (self.height / self.cell_size) as usize,
        )
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            interval: Duration::from_millis(self.tick_ms),
            alive_probability: self.alive_probability,
            seed: self.seed,
            stop_on_cycle: self.stop_on_cycle,
        }
    }

    pub fn build_controller(&self) -> conway::Result<Controller> {
        let (cols, rows) = self.grid_dimensions();
        let controller = Controller::new(Grid::new(cols, rows)?, self.controller_config())?;
        if self.coro {
            controller.with_coroutines()
        } else {
            Ok(controller)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conway::GridError;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("conway_coro").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_reference_setup() {
        let config = parse(&[]);
        assert_eq!(config.grid_dimensions(), (48, 27));
        assert_eq!(config.controller_config().interval, Duration::from_millis(30));
        assert_eq!(config.alive_probability, 0.25);
        assert!(!config.coro);
    }

    #[test]
    fn dimensions_truncate() {
        let config = parse(&["--width", "105", "--height", "99", "--cell-size", "10"]);
        assert_eq!(config.grid_dimensions(), (10, 9));
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        assert!(Config::try_parse_from(["conway_coro", "--cell-size", "0"]).is_err());
    }

    #[test]
    fn area_smaller_than_a_cell_is_rejected() {
        let config = parse(&["--width", "30", "--cell-size", "40"]);
        assert!(matches!(
            config.build_controller(),
            Err(GridError::InvalidDimension { width: 0, height: 27 })
        ));
    }

    #[test]
    fn bad_probability_is_rejected() {
        let config = parse(&["--alive-probability", "1.5"]);
        assert!(matches!(config.build_controller(), Err(GridError::InvalidProbability(_))));
    }

    #[test]
    fn builds_coroutine_controller() {
        let config = parse(&["--coro", "--seed", "5", "--width", "200", "--height", "100"]);
        let mut controller = config.build_controller().unwrap();
        controller.randomize().unwrap();
        controller.step().unwrap();
        assert_eq!(controller.grid().width(), 5);
        assert_eq!(controller.generation(), 1);
    }
}
