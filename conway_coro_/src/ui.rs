// ui.rs - eframe front end: draws the grid, feeds it input and ticks

use std::time::{Duration, Instant};

use conway::{Controller, patterns};
use eframe::egui;
use egui::{Color32, Rect, Sense, Vec2};
use log::error;

use crate::config::Config;
use crate::input::{self, Command, PressEdge};

pub struct GameOfLifeApp {
    controller: Controller,
    cell_size: f32,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    press: PressEdge,
}

impl GameOfLifeApp {
    pub fn new(controller: Controller, config: &Config) -> Self {
        Self {
            controller,
            cell_size: config.cell_size as f32,
            live_color: Color32::WHITE,
            dead_color: Color32::BLACK,
            selected_pattern: 0,
            press: PressEdge::default(),
        }
    }

    fn run(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::TogglePause => self.controller.toggle_pause(),
            Command::Clear => self.controller.clear(),
            Command::Randomize => {
                if let Err(err) = self.controller.randomize() {
                    error!("randomize failed: {err}");
                }
            }
            Command::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn controls(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.controller.is_running() { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.run(ctx, Command::TogglePause);
            }

            if ui.button("⏭ Step").clicked() {
                if let Err(err) = self.controller.step() {
                    error!("step failed: {err}");
                }
            }

            if ui.button("⏹ Clear").clicked() {
                self.run(ctx, Command::Clear);
            }

            if ui.button("🎲 Random").clicked() {
                self.run(ctx, Command::Randomize);
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                let pattern = &patterns::PATTERNS[self.selected_pattern];
                if let Err(err) = self.controller.load_pattern(pattern) {
                    error!("cannot place {}: {err}", pattern.name);
                }
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.controller.generation()));
        });

        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut speed = 1000.0 / self.controller.interval().as_millis().max(1) as f32;
            if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                self.controller.set_interval(Duration::from_millis((1000.0 / speed) as u64));
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);

            ui.separator();

            let grid = self.controller.grid();
            let total = grid.width() * grid.height();
            let live = grid.live_count();
            ui.label(format!("Live cells: {live}"));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
        });
    }

    /// Draws the grid and turns a fresh left press over it into a toggle.
    fn board(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let cols = self.controller.grid().width();
        let rows = self.controller.grid().height();
        let size = Vec2::new(cols as f32, rows as f32) * self.cell_size;

        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let origin = response.rect.min;

        let (down, pointer) = ctx.input(|i| (i.pointer.primary_down(), i.pointer.interact_pos()));
        if self.press.rising(down) && response.hovered() {
            if let Some((x, y)) = pointer.and_then(|pos| input::cell_at(pos - origin, self.cell_size, (cols, rows))) {
                if let Err(err) = self.controller.toggle_cell(x, y) {
                    error!("toggle failed: {err}");
                }
            }
        }

        painter.rect_filled(response.rect, 0.0, self.dead_color);

        let side = (self.cell_size - 1.0).max(1.0);
        for (x, y) in self.controller.grid().iter_live() {
            let min = origin + Vec2::new(x as f32, y as f32) * self.cell_size;
            painter.rect_filled(Rect::from_min_size(min, Vec2::splat(side)), 0.0, self.live_color);
        }
    }
}

impl eframe::App for GameOfLifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for command in ctx.input(input::key_commands) {
            self.run(ctx, command);
        }

        let now = Instant::now();
        if let Err(err) = self.controller.tick(now) {
            error!("generation {} failed: {err}", self.controller.generation());
            self.controller.set_running(false);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ctx, ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.board(ctx, ui);
            });
        });

        // Wake up again in time for the next generation
        if let Some(wait) = self.controller.until_next_tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
