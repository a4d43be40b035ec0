//! Per-block drag and resize gestures.

use crate::block::BlockId;
use crate::input::Modifiers;
use crate::snap::{SNAP_GRID_SIZE, constrain_position, snap_within};
use kurbo::{Point, Rect, Size, Vec2};

/// Smallest size a resize can produce, in canvas pixels.
pub const MIN_BLOCK_SIZE: Size = Size::new(60.0, 40.0);

/// How a drag gesture started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragStart {
    /// The block follows the pointer.
    Move,
    /// The block was duplicated; the original stays put for this gesture.
    Duplicated(BlockId),
    /// No block with that id exists.
    Missing,
}

/// An in-progress move of a single block.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub block: BlockId,
    start: Point,
    travelled: Vec2,
    bounds: Rect,
    duplicating: bool,
}

impl DragGesture {
    /// Start a drag at `start`, keeping the block inside `bounds`.
    pub fn new(block: BlockId, start: Point, bounds: Rect, duplicating: bool) -> Self {
        Self {
            block,
            start,
            travelled: Vec2::ZERO,
            bounds,
            duplicating,
        }
    }

    /// Whether this gesture was turned into a duplicate at start.
    pub fn is_duplicating(&self) -> bool {
        self.duplicating
    }

    /// Accumulate a canvas-space pointer delta and return the raw position.
    pub fn advance(&mut self, canvas_delta: Vec2) -> Point {
        self.travelled += canvas_delta;
        self.raw_position()
    }

    /// Start position plus everything travelled so far.
    pub fn raw_position(&self) -> Point {
        self.start + self.travelled
    }

    /// Position to commit for a block of `size` kept inside the gesture bounds.
    ///
    /// Snaps to the grid when the event carries shift.
    pub fn position(&self, size: Size, modifiers: Modifiers) -> Point {
        let raw = self.raw_position();
        if modifiers.snaps() {
            snap_within(raw, size, self.bounds, SNAP_GRID_SIZE)
        } else {
            constrain_position(raw, size, self.bounds)
        }
    }
}

/// Which edge or corner a resize is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::Left | ResizeHandle::TopLeft | ResizeHandle::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::Right | ResizeHandle::TopRight | ResizeHandle::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::Top | ResizeHandle::TopLeft | ResizeHandle::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::Bottom | ResizeHandle::BottomLeft | ResizeHandle::BottomRight
        )
    }

    /// Whether this handle sits on a corner.
    pub fn is_corner(self) -> bool {
        (self.moves_left() || self.moves_right()) && (self.moves_top() || self.moves_bottom())
    }
}

/// Resize `start` by dragging `handle` by `delta`.
///
/// The opposite edges stay fixed. Moving edges stop at `bounds` and never
/// bring the rect below `min`.
pub fn resize_rect(
    start: Rect,
    handle: ResizeHandle,
    delta: Vec2,
    min: Size,
    bounds: Rect,
) -> Rect {
    let mut rect = start;
    if handle.moves_left() {
        rect.x0 = (start.x0 + delta.x).max(bounds.x0).min(start.x1 - min.width);
    }
    if handle.moves_right() {
        rect.x1 = (start.x1 + delta.x).min(bounds.x1).max(start.x0 + min.width);
    }
    if handle.moves_top() {
        rect.y0 = (start.y0 + delta.y).max(bounds.y0).min(start.y1 - min.height);
    }
    if handle.moves_bottom() {
        rect.y1 = (start.y1 + delta.y).min(bounds.y1).max(start.y0 + min.height);
    }
    rect
}

/// An in-progress resize of a single block.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    pub block: BlockId,
    pub handle: ResizeHandle,
    start: Rect,
    travelled: Vec2,
    bounds: Rect,
}

impl ResizeGesture {
    pub fn new(block: BlockId, handle: ResizeHandle, start: Rect, bounds: Rect) -> Self {
        Self {
            block,
            handle,
            start,
            travelled: Vec2::ZERO,
            bounds,
        }
    }

    /// Accumulate a canvas-space pointer delta and return the resized rect.
    pub fn advance(&mut self, canvas_delta: Vec2) -> Rect {
        self.travelled += canvas_delta;
        resize_rect(
            self.start,
            self.handle,
            self.travelled,
            MIN_BLOCK_SIZE,
            self.bounds,
        )
    }
}

/// The block gesture currently in progress, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockGesture {
    Drag(DragGesture),
    Resize(ResizeGesture),
}

impl BlockGesture {
    pub fn block(&self) -> &BlockId {
        match self {
            BlockGesture::Drag(drag) => &drag.block,
            BlockGesture::Resize(resize) => &resize.block,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(-2500.0, -2500.0, 2500.0, 2500.0)
    }

    #[test]
    fn test_drag_passes_raw_position_through() {
        let mut drag =
            DragGesture::new(BlockId::from("a"), Point::new(10.0, 10.0), bounds(), false);
        drag.advance(Vec2::new(3.3, 4.4));
        drag.advance(Vec2::new(1.0, 1.0));

        let pos = drag.position(Size::new(300.0, 200.0), Modifiers::NONE);
        assert!((pos.x - 14.3).abs() < 1e-10);
        assert!((pos.y - 15.4).abs() < 1e-10);
    }

    #[test]
    fn test_drag_snaps_with_shift() {
        let mut drag =
            DragGesture::new(BlockId::from("a"), Point::new(10.0, 10.0), bounds(), false);
        drag.advance(Vec2::new(3.3, 7.4));

        let pos = drag.position(Size::new(300.0, 200.0), Modifiers::SHIFT);
        assert_eq!(pos, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_drag_stays_in_bounds() {
        let mut drag = DragGesture::new(BlockId::from("a"), Point::ZERO, bounds(), false);
        drag.advance(Vec2::new(10_000.0, -10_000.0));

        let pos = drag.position(Size::new(300.0, 200.0), Modifiers::NONE);
        assert_eq!(pos, Point::new(2200.0, -2500.0));
    }

    #[test]
    fn test_resize_bottom_right() {
        let start = Rect::new(0.0, 0.0, 300.0, 200.0);
        let rect = resize_rect(
            start,
            ResizeHandle::BottomRight,
            Vec2::new(50.0, -20.0),
            MIN_BLOCK_SIZE,
            bounds(),
        );
        assert_eq!(rect, Rect::new(0.0, 0.0, 350.0, 180.0));
    }

    #[test]
    fn test_resize_top_left_keeps_opposite_corner() {
        let start = Rect::new(0.0, 0.0, 300.0, 200.0);
        let rect = resize_rect(
            start,
            ResizeHandle::TopLeft,
            Vec2::new(-40.0, 30.0),
            MIN_BLOCK_SIZE,
            bounds(),
        );
        assert_eq!(rect, Rect::new(-40.0, 30.0, 300.0, 200.0));
    }

    #[test]
    fn test_resize_enforces_minimum() {
        let start = Rect::new(0.0, 0.0, 300.0, 200.0);
        let rect = resize_rect(
            start,
            ResizeHandle::Left,
            Vec2::new(1000.0, 0.0),
            MIN_BLOCK_SIZE,
            bounds(),
        );
        assert!((rect.width() - MIN_BLOCK_SIZE.width).abs() < f64::EPSILON);
        assert!((rect.x1 - 300.0).abs() < f64::EPSILON);

        let rect = resize_rect(
            start,
            ResizeHandle::Top,
            Vec2::new(0.0, 1000.0),
            MIN_BLOCK_SIZE,
            bounds(),
        );
        assert!((rect.height() - MIN_BLOCK_SIZE.height).abs() < f64::EPSILON);
    }

    #[test]
    fn test_edge_handles_move_one_axis() {
        let start = Rect::new(0.0, 0.0, 300.0, 200.0);
        let rect = resize_rect(
            start,
            ResizeHandle::Right,
            Vec2::new(25.0, 90.0),
            MIN_BLOCK_SIZE,
            bounds(),
        );
        assert_eq!(rect, Rect::new(0.0, 0.0, 325.0, 200.0));
        assert!(!ResizeHandle::Right.is_corner());
        assert!(ResizeHandle::BottomLeft.is_corner());
    }

    #[test]
    fn test_resize_gesture_accumulates() {
        let mut resize = ResizeGesture::new(
            BlockId::from("a"),
            ResizeHandle::Bottom,
            Rect::new(0.0, 0.0, 300.0, 200.0),
            bounds(),
        );
        resize.advance(Vec2::new(0.0, 10.0));
        let rect = resize.advance(Vec2::new(0.0, 15.0));
        assert_eq!(rect, Rect::new(0.0, 0.0, 300.0, 225.0));
    }
}
