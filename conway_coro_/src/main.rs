// main.rs - Conway's Game of Life desktop front end

use anyhow::{Context, anyhow};
use clap::Parser;
use eframe::egui;
use log::info;

mod config; // Command line configuration
mod input;  // Pointer and keyboard adapter
mod ui;     // Rendering and scheduling

use config::Config;
use ui::GameOfLifeApp;

/// Room for the control strip above the grid.
const CONTROLS_HEIGHT: f32 = 70.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let controller = config.build_controller().context("cannot set up the grid")?;
    let (cols, rows) = config.grid_dimensions();
    info!(
        "{cols}x{rows} grid of {}px cells, one generation per {}ms{}",
        config.cell_size,
        config.tick_ms,
        if config.coro { " using row coroutines" } else { "" }
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width as f32, config.height as f32 + CONTROLS_HEIGHT])
            .with_fullscreen(config.fullscreen),
        ..Default::default()
    };

    let app = GameOfLifeApp::new(controller, &config);
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow!("window closed with an error: {err}"))
}
