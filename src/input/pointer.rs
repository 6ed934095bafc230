use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position as CellPosition, Rect};

use super::joystick::Joystick;
use crate::game::Direction;

/// Pointer units per terminal column
pub const UNITS_PER_COLUMN: f32 = 10.0;
/// Pointer units per terminal row (cells are roughly twice as tall as wide)
pub const UNITS_PER_ROW: f32 = 20.0;

/// Where the on-screen controls were last drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlLayout {
    pub joystick: Rect,
    pub buttons: [(Direction, Rect); 4],
}

/// Turns mouse press, drag and release events into direction intents
pub struct PointerInput {
    joystick: Joystick,
    layout: Option<ControlLayout>,
}

impl PointerInput {
    pub fn new(joystick: Joystick) -> Self {
        Self {
            joystick,
            layout: None,
        }
    }

    /// Record where the renderer placed the controls; `None` hides them
    pub fn set_layout(&mut self, layout: Option<ControlLayout>) {
        if layout.is_none() {
            self.joystick.release();
        }
        self.layout = layout;
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        let layout = self.layout?;
        let cell = CellPosition::new(event.column, event.row);
        let pointer = to_units(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.joystick.contains(cell) {
                    self.joystick.press(rect_center(layout.joystick));
                    return None;
                }

                layout
                    .buttons
                    .iter()
                    .find(|(_, area)| area.contains(cell))
                    .map(|(direction, _)| *direction)
            }
            MouseEventKind::Drag(MouseButton::Left) => self.joystick.drag_to(pointer),
            MouseEventKind::Up(MouseButton::Left) => {
                self.joystick.release();
                None
            }
            _ => None,
        }
    }
}

fn to_units(column: u16, row: u16) -> (f32, f32) {
    (
        (column as f32 + 0.5) * UNITS_PER_COLUMN,
        (row as f32 + 0.5) * UNITS_PER_ROW,
    )
}

fn rect_center(area: Rect) -> (f32, f32) {
    (
        (area.x as f32 + area.width as f32 / 2.0) * UNITS_PER_COLUMN,
        (area.y as f32 + area.height as f32 / 2.0) * UNITS_PER_ROW,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn layout() -> ControlLayout {
        ControlLayout {
            // Centre at column 10, row 5
            joystick: Rect::new(5, 3, 10, 4),
            buttons: [
                (Direction::Up, Rect::new(30, 2, 3, 1)),
                (Direction::Left, Rect::new(27, 3, 3, 1)),
                (Direction::Right, Rect::new(33, 3, 3, 1)),
                (Direction::Down, Rect::new(30, 4, 3, 1)),
            ],
        }
    }

    fn input() -> PointerInput {
        let mut input = PointerInput::new(Joystick::new(20.0, 40.0));
        input.set_layout(Some(layout()));
        input
    }

    #[test]
    fn test_button_click() {
        let mut input = input();

        let up = mouse(MouseEventKind::Down(MouseButton::Left), 31, 2);
        assert_eq!(input.handle_mouse_event(up), Some(Direction::Up));

        let left = mouse(MouseEventKind::Down(MouseButton::Left), 27, 3);
        assert_eq!(input.handle_mouse_event(left), Some(Direction::Left));

        let miss = mouse(MouseEventKind::Down(MouseButton::Left), 50, 10);
        assert_eq!(input.handle_mouse_event(miss), None);
    }

    #[test]
    fn test_joystick_drag() {
        let mut input = input();

        let press = mouse(MouseEventKind::Down(MouseButton::Left), 10, 5);
        assert_eq!(input.handle_mouse_event(press), None);
        assert!(input.joystick().is_dragging());

        // Pointer cell centre sits just off the pad centre, inside the deadzone
        let small = mouse(MouseEventKind::Drag(MouseButton::Left), 10, 5);
        assert_eq!(input.handle_mouse_event(small), None);

        let right = mouse(MouseEventKind::Drag(MouseButton::Left), 14, 5);
        assert_eq!(input.handle_mouse_event(right), Some(Direction::Right));

        let up = mouse(MouseEventKind::Drag(MouseButton::Left), 10, 3);
        assert_eq!(input.handle_mouse_event(up), Some(Direction::Up));

        let release = mouse(MouseEventKind::Up(MouseButton::Left), 10, 3);
        assert_eq!(input.handle_mouse_event(release), None);
        assert!(!input.joystick().is_dragging());
    }

    #[test]
    fn test_hidden_controls_ignore_pointer() {
        let mut input = input();
        input.set_layout(None);

        let up = mouse(MouseEventKind::Down(MouseButton::Left), 31, 2);
        assert_eq!(input.handle_mouse_event(up), None);
    }
}
