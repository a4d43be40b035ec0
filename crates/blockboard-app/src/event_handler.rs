//! Translates window input into board operations.

use blockboard_core::{Board, KeyValueStorage, Modifiers, PointerTarget, WheelEvent};
use kurbo::{Point, Vec2};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::ModifiersState;

/// Pixels scrolled per wheel notch for line-based deltas.
pub const LINE_SCROLL_PIXELS: f64 = 20.0;

/// Tracks pointer and modifier state between window events.
///
/// Positions are kept in logical pixels, the unit the board works in.
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    cursor: Point,
    modifiers: Modifiers,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position in logical pixels.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Record a `ModifiersChanged` event.
    pub fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = modifiers_from_winit(state);
    }

    /// Record a `CursorMoved` event and continue any pan in progress.
    ///
    /// Returns true if the viewport moved.
    pub fn cursor_moved<S: KeyValueStorage>(
        &mut self,
        board: &mut Board<S>,
        position: PhysicalPosition<f64>,
        scale_factor: f64,
    ) -> bool {
        self.cursor = to_logical(position, scale_factor);
        board.pointer_move(self.cursor)
    }

    /// Handle a `MouseInput` event. Only the primary button pans.
    pub fn mouse_input<S: KeyValueStorage>(
        &mut self,
        board: &mut Board<S>,
        state: ElementState,
        button: MouseButton,
        target: PointerTarget,
    ) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => {
                if board.pointer_down(self.cursor, target) {
                    log::debug!("Pan started at {:?}", self.cursor);
                }
            }
            ElementState::Released => board.pointer_up(),
        }
    }

    /// Handle a `MouseWheel` event. Returns true if the viewport changed.
    pub fn mouse_wheel<S: KeyValueStorage>(
        &mut self,
        board: &mut Board<S>,
        delta: MouseScrollDelta,
        scale_factor: f64,
    ) -> bool {
        board.wheel(self.wheel_event(delta, scale_factor))
    }

    /// Convert a winit wheel delta into a board wheel event.
    ///
    /// winit reports positive y for scrolling up; the board expects positive
    /// y for scrolling down, in logical pixels.
    pub fn wheel_event(&self, delta: MouseScrollDelta, scale_factor: f64) -> WheelEvent {
        let delta = match delta {
            MouseScrollDelta::LineDelta(x, y) => {
                Vec2::new(x as f64, y as f64) * LINE_SCROLL_PIXELS
            }
            MouseScrollDelta::PixelDelta(pos) => Vec2::new(pos.x, pos.y) / scale_factor,
        };
        WheelEvent::new(-delta, self.modifiers)
    }
}

/// Map winit modifier state onto board modifiers.
pub fn modifiers_from_winit(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Map egui modifier state onto board modifiers.
pub fn modifiers_from_egui(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.shift,
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        meta: modifiers.mac_cmd,
    }
}

fn to_logical(position: PhysicalPosition<f64>, scale_factor: f64) -> Point {
    let logical = position.to_logical::<f64>(scale_factor);
    Point::new(logical.x, logical.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockboard_core::storage::MemoryStorage;
    use std::sync::Arc;

    fn board() -> Board<MemoryStorage> {
        Board::open(Arc::new(MemoryStorage::new()), false)
    }

    #[test]
    fn test_cursor_is_logical() {
        let mut handler = EventHandler::new();
        let mut board = board();
        handler.cursor_moved(&mut board, PhysicalPosition::new(200.0, 100.0), 2.0);
        assert!((handler.cursor().x - 100.0).abs() < f64::EPSILON);
        assert!((handler.cursor().y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_delta_is_scaled_and_flipped() {
        let handler = EventHandler::new();
        let event = handler.wheel_event(MouseScrollDelta::LineDelta(0.0, 1.0), 1.0);
        assert!((event.delta.y + LINE_SCROLL_PIXELS).abs() < f64::EPSILON);
        assert!(event.delta.x.abs() < f64::EPSILON);
    }

    #[test]
    fn test_pixel_delta_is_logical() {
        let handler = EventHandler::new();
        let event = handler.wheel_event(
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(10.0, -40.0)),
            2.0,
        );
        assert!((event.delta.x + 5.0).abs() < f64::EPSILON);
        assert!((event.delta.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drag_on_canvas_pans() {
        let mut handler = EventHandler::new();
        let mut board = board();
        handler.cursor_moved(&mut board, PhysicalPosition::new(10.0, 10.0), 1.0);
        handler.mouse_input(
            &mut board,
            ElementState::Pressed,
            MouseButton::Left,
            PointerTarget::Canvas,
        );
        assert!(handler.cursor_moved(&mut board, PhysicalPosition::new(40.0, 30.0), 1.0));
        assert!((board.viewport().offset.x - 30.0).abs() < 1e-10);
        assert!((board.viewport().offset.y - 20.0).abs() < 1e-10);

        handler.mouse_input(
            &mut board,
            ElementState::Released,
            MouseButton::Left,
            PointerTarget::Canvas,
        );
        assert!(!handler.cursor_moved(&mut board, PhysicalPosition::new(90.0, 90.0), 1.0));
    }

    #[test]
    fn test_press_on_block_does_not_pan() {
        let mut handler = EventHandler::new();
        let mut board = board();
        handler.mouse_input(
            &mut board,
            ElementState::Pressed,
            MouseButton::Left,
            PointerTarget::Block,
        );
        assert!(!board.is_panning());

        handler.mouse_input(
            &mut board,
            ElementState::Pressed,
            MouseButton::Right,
            PointerTarget::Canvas,
        );
        assert!(!board.is_panning());
    }

    #[test]
    fn test_ctrl_wheel_zooms() {
        let mut handler = EventHandler::new();
        let mut board = board();
        handler.set_modifiers(ModifiersState::CONTROL);
        assert!(handler.modifiers().zooms());

        // One notch up zooms in.
        assert!(handler.mouse_wheel(&mut board, MouseScrollDelta::LineDelta(0.0, 1.0), 1.0));
        assert!(board.viewport().scale() > 1.0);
    }

    #[test]
    fn test_modifier_mapping() {
        let modifiers = modifiers_from_winit(ModifiersState::SHIFT | ModifiersState::ALT);
        assert!(modifiers.snaps());
        assert!(modifiers.duplicates());
        assert!(!modifiers.zooms());

        let modifiers = modifiers_from_egui(egui::Modifiers {
            mac_cmd: true,
            ..Default::default()
        });
        assert!(modifiers.zooms());
    }
}
