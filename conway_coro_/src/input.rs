// input.rs - Maps raw pointer and keyboard input onto grid commands

use egui::{Key, Vec2};

/// Something the user asked the simulation to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Clear,
    Randomize,
    Quit,
}

/// Key bindings, checked in this order each frame.
const BINDINGS: [(Key, Command); 4] = [
    (Key::Space, Command::TogglePause),
    (Key::C, Command::Clear),
    (Key::R, Command::Randomize),
    (Key::Escape, Command::Quit),
];

/// Commands for the keys pressed this frame.
pub fn key_commands(input: &egui::InputState) -> Vec<Command> {
    BINDINGS
        .iter()
        .filter(|(key, _)| input.key_pressed(*key))
        .map(|&(_, command)| command)
        .collect()
}

/// Turns a held/released button level into press edges.
#[derive(Debug, Default)]
pub struct PressEdge {
    was_down: bool,
}

impl PressEdge {
    /// True only on the frame the button goes from up to down.
    pub fn rising(&mut self, down: bool) -> bool {
        let rising = down && !self.was_down;
        self.was_down = down;
        rising
    }
}

/// Cell under a pointer given its offset from the grid's top-left corner.
///
/// Returns `None` for positions outside the drawn grid.
pub fn cell_at(offset: Vec2, cell_size: f32, (cols, rows): (usize, usize)) -> Option<(usize, usize)> {
    if offset.x < 0.0 || offset.y < 0.0 || cell_size <= 0.0 {
        return None;
    }
    let x = (offset.x / cell_size) as usize;
    let y = (offset.y / cell_size) as usize;
    (x < cols && y < rows).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn maps_pixels_to_cells() {
        let grid = (48, 27);
        assert_eq!(cell_at(vec2(0.0, 0.0), 40.0, grid), Some((0, 0)));
        assert_eq!(cell_at(vec2(39.9, 39.9), 40.0, grid), Some((0, 0)));
        assert_eq!(cell_at(vec2(40.0, 81.0), 40.0, grid), Some((1, 2)));
        assert_eq!(cell_at(vec2(1919.0, 1079.0), 40.0, grid), Some((47, 26)));
    }

    #[test]
    fn ignores_positions_off_the_grid() {
        let grid = (48, 27);
        assert_eq!(cell_at(vec2(-0.5, 10.0), 40.0, grid), None);
        assert_eq!(cell_at(vec2(10.0, -3.0), 40.0, grid), None);
        assert_eq!(cell_at(vec2(1920.0, 10.0), 40.0, grid), None);
        assert_eq!(cell_at(vec2(10.0, 1080.0), 40.0, grid), None);
    }

    #[test]
    fn press_edge_fires_once_per_press() {
        let mut edge = PressEdge::default();
        let frames = [false, true, true, true, false, false, true, false];
        let fired: Vec<bool> = frames.iter().map(|&down| edge.rising(down)).collect();
        assert_eq!(fired, [false, true, false, false, false, false, true, false]);
    }
}
