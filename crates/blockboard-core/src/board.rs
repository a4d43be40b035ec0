//! The board: viewport pan/zoom plus block orchestration over the store.

use crate::block::{Block, BlockId};
use crate::gesture::{BlockGesture, DragGesture, DragStart, ResizeGesture, ResizeHandle};
use crate::grid::Grid;
use crate::input::{Modifiers, PointerTarget, WheelEvent};
use crate::storage::{KeyValueStorage, PlatformStorage};
use crate::store::{THEME_KEY, Store};
use crate::theme::{ThemePreference, ThemeSwitcher};
use crate::toolbar::{ToolbarAction, ToolbarState};
use crate::viewport::{DEFAULT_SCALE, Viewport, WHEEL_ZOOM_SENSITIVITY, ZOOM_STEP};
use kurbo::{Point, Rect, Size, Vec2};
use std::sync::Arc;

/// Screen padding kept around content by zoom-to-fit.
pub const FIT_PADDING: f64 = 48.0;

/// Board over the platform's default storage.
pub type PlatformBoard = Board<PlatformStorage>;

/// An in-progress pan of the empty canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanGesture {
    /// Pointer position minus offset at pointer-down.
    grab: Vec2,
}

/// Runtime board state.
///
/// The viewport is transient; blocks, the theme preference, and the
/// zoom-lock flag live in the [`Store`].
pub struct Board<S: KeyValueStorage> {
    viewport: Viewport,
    viewport_size: Size,
    grid: Grid,
    store: Store<S>,
    theme: ThemeSwitcher,
    pan: Option<PanGesture>,
    gesture: Option<BlockGesture>,
}

impl<S: KeyValueStorage> Board<S> {
    /// Create a board over an opened store.
    pub fn new(store: Store<S>, os_dark: bool) -> Self {
        let theme = ThemeSwitcher::new(store.theme(), os_dark);
        Self {
            viewport: Viewport::new(),
            viewport_size: Size::new(800.0, 600.0),
            grid: Grid::default(),
            store,
            theme,
            pan: None,
            gesture: None,
        }
    }

    /// Open the store over `storage` and create a board on it.
    pub fn open(storage: Arc<S>, os_dark: bool) -> Self {
        Self::new(Store::open(storage), os_dark)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Set the viewport size in screen pixels.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Canvas region blocks are kept inside.
    pub fn bounds(&self) -> Rect {
        self.grid.bounds()
    }

    /// Region a gesture on `block` may move it within.
    ///
    /// A block already outside the grid keeps its reach so it does not
    /// jump back inside on the first move.
    fn gesture_bounds(&self, block: &Block) -> Rect {
        self.bounds().union(block.rect())
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    // --- Pan ---

    /// Handle a primary-button press. Returns true if a pan started.
    pub fn pointer_down(&mut self, position: Point, target: PointerTarget) -> bool {
        if target != PointerTarget::Canvas {
            return false;
        }
        self.pan = Some(PanGesture {
            grab: position.to_vec2() - self.viewport.offset,
        });
        true
    }

    /// Handle pointer motion. Returns true if the viewport moved.
    pub fn pointer_move(&mut self, position: Point) -> bool {
        let Some(pan) = self.pan else {
            return false;
        };
        self.viewport.offset = position.to_vec2() - pan.grab;
        true
    }

    /// Handle a primary-button release.
    pub fn pointer_up(&mut self) {
        self.pan = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    // --- Zoom ---

    /// Handle a wheel event. Returns true if the viewport changed.
    ///
    /// With ctrl or cmd held the wheel zooms, unless zoom is locked, in which
    /// case it scrolls like an unmodified wheel.
    pub fn wheel(&mut self, event: WheelEvent) -> bool {
        if !event.delta.is_finite() {
            log::debug!("Ignoring non-finite wheel delta {:?}", event.delta);
            return false;
        }
        if event.modifiers.zooms() && !self.store.zoom_locked() {
            let before = self.viewport.scale();
            self.viewport.zoom_by(-event.delta.y * WHEEL_ZOOM_SENSITIVITY);
            return self.viewport.scale() != before;
        }
        let delta = event.scroll_delta();
        if delta == Vec2::ZERO {
            return false;
        }
        self.viewport.pan(-delta);
        true
    }

    /// Set the scale if zoom is not locked. Returns true if it was applied.
    pub fn request_zoom(&mut self, scale: f64) -> bool {
        if self.store.zoom_locked() {
            log::debug!("Zoom request ignored while locked");
            return false;
        }
        self.viewport.set_scale(scale);
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.request_zoom(self.viewport.scale() + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.request_zoom(self.viewport.scale() - ZOOM_STEP)
    }

    /// Reset the scale to 100%. The pan offset is kept.
    pub fn reset_zoom(&mut self) -> bool {
        self.request_zoom(DEFAULT_SCALE)
    }

    /// Fit all blocks into the viewport. Resets the zoom when there are none.
    pub fn zoom_to_fit(&mut self) -> bool {
        if self.store.zoom_locked() {
            log::debug!("Fit ignored while locked");
            return false;
        }
        match self.content_bounds() {
            Some(bounds) => {
                self.viewport
                    .fit_to_bounds(bounds, self.viewport_size, FIT_PADDING);
                true
            }
            None => self.reset_zoom(),
        }
    }

    pub fn zoom_locked(&self) -> bool {
        self.store.zoom_locked()
    }

    pub fn set_zoom_locked(&mut self, locked: bool) {
        self.store.set_zoom_locked(locked);
    }

    pub fn toggle_zoom_lock(&mut self) {
        let locked = !self.store.zoom_locked();
        self.store.set_zoom_locked(locked);
    }

    /// Snapshot for rendering the toolbar.
    pub fn toolbar_state(&self) -> ToolbarState {
        ToolbarState {
            scale: self.viewport.scale(),
            zoom_locked: self.store.zoom_locked(),
        }
    }

    /// Apply a toolbar action. Returns true if anything changed.
    pub fn apply(&mut self, action: ToolbarAction) -> bool {
        match action {
            ToolbarAction::ZoomIn => self.zoom_in(),
            ToolbarAction::ZoomOut => self.zoom_out(),
            ToolbarAction::ZoomReset => self.reset_zoom(),
            ToolbarAction::ZoomToFit => self.zoom_to_fit(),
            ToolbarAction::ToggleZoomLock => {
                self.toggle_zoom_lock();
                true
            }
            ToolbarAction::AddBlock => {
                self.add_block();
                true
            }
        }
    }

    // --- Blocks ---

    /// Blocks in rendering order.
    pub fn blocks(&self) -> &[Block] {
        self.store.blocks()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.store.block(id)
    }

    /// Insert a text block centred in the current view.
    pub fn add_block(&mut self) -> BlockId {
        let center = self.viewport.visible_center(self.viewport_size);
        let block = Block::centered_at(center);
        let id = block.id.clone();
        log::debug!("Adding block {id} at {:?}", block.position);
        self.store.push_block(block);
        id
    }

    /// Replace a block's position and size. Returns false if it does not exist.
    pub fn update_block(&mut self, id: &BlockId, position: Point, size: Size) -> bool {
        let updated = self
            .store
            .update_block(id, |block| {
                block.position = position;
                block.size = size;
            })
            .is_some();
        if !updated {
            log::debug!("Update for unknown block {id}");
        }
        updated
    }

    /// Append a copy of a block offset by (20, 20). Returns the copy's id.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Option<BlockId> {
        let Some(source) = self.store.block(id) else {
            log::debug!("Duplicate of unknown block {id}");
            return None;
        };
        let copy = source.duplicate();
        let copy_id = copy.id.clone();
        self.store.push_block(copy);
        Some(copy_id)
    }

    /// Replace a block's content. Returns false if it does not exist.
    pub fn set_block_content(&mut self, id: &BlockId, content: impl Into<String>) -> bool {
        let content = content.into();
        let updated = self
            .store
            .update_block(id, |block| block.content = content)
            .is_some();
        if !updated {
            log::debug!("Content for unknown block {id}");
        }
        updated
    }

    /// Union of all block rects.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.store
            .blocks()
            .iter()
            .map(Block::rect)
            .reduce(|acc, rect| acc.union(rect))
    }

    // --- Block gestures ---

    /// The block gesture in progress, if any.
    pub fn active_gesture(&self) -> Option<&BlockGesture> {
        self.gesture.as_ref()
    }

    /// Start dragging a block.
    ///
    /// With alt held the block is duplicated once and the original is not
    /// moved for the rest of the gesture.
    pub fn begin_block_drag(&mut self, id: &BlockId, modifiers: Modifiers) -> DragStart {
        let Some(block) = self.store.block(id) else {
            log::debug!("Drag of unknown block {id}");
            return DragStart::Missing;
        };
        let duplicating = modifiers.duplicates();
        let bounds = self.gesture_bounds(block);
        self.gesture = Some(BlockGesture::Drag(DragGesture::new(
            id.clone(),
            block.position,
            bounds,
            duplicating,
        )));

        if duplicating {
            match self.duplicate_block(id) {
                Some(copy) => DragStart::Duplicated(copy),
                None => DragStart::Missing,
            }
        } else {
            DragStart::Move
        }
    }

    /// Continue a drag by a screen-pixel pointer delta.
    ///
    /// Returns the committed position, or `None` when there is no move in
    /// progress (including duplicate gestures).
    pub fn drag_block(&mut self, screen_delta: Vec2, modifiers: Modifiers) -> Option<Point> {
        let canvas_delta = self.viewport.screen_delta_to_canvas(screen_delta);
        let Some(BlockGesture::Drag(drag)) = self.gesture.as_mut() else {
            return None;
        };
        drag.advance(canvas_delta);
        if drag.is_duplicating() {
            return None;
        }

        let id = drag.block.clone();
        let size = self.store.block(&id)?.size;
        let position = drag.position(size, modifiers);
        self.update_block(&id, position, size).then_some(position)
    }

    /// Start resizing a block from `handle`. Returns false if it does not exist.
    pub fn begin_block_resize(&mut self, id: &BlockId, handle: ResizeHandle) -> bool {
        let Some(block) = self.store.block(id) else {
            log::debug!("Resize of unknown block {id}");
            return false;
        };
        let bounds = self.gesture_bounds(block);
        self.gesture = Some(BlockGesture::Resize(ResizeGesture::new(
            id.clone(),
            handle,
            block.rect(),
            bounds,
        )));
        true
    }

    /// Continue a resize by a screen-pixel pointer delta. Returns the new rect.
    pub fn resize_block(&mut self, screen_delta: Vec2) -> Option<Rect> {
        let canvas_delta = self.viewport.screen_delta_to_canvas(screen_delta);
        let Some(BlockGesture::Resize(resize)) = self.gesture.as_mut() else {
            return None;
        };
        let rect = resize.advance(canvas_delta);
        let id = resize.block.clone();
        self.update_block(&id, rect.origin(), rect.size())
            .then_some(rect)
    }

    /// Finish the current block gesture.
    pub fn end_block_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            log::debug!("Finished gesture on block {}", gesture.block());
        }
    }

    // --- Theme ---

    pub fn theme(&self) -> &ThemeSwitcher {
        &self.theme
    }

    pub fn dark_mode(&self) -> bool {
        self.theme.dark_mode()
    }

    /// Select and persist a theme preference.
    pub fn select_theme(&mut self, preference: ThemePreference, os_dark_now: bool) {
        self.theme.select(preference, os_dark_now);
        self.store.set_theme(preference);
    }

    /// Apply an OS theme change. Returns true if the effective mode changed.
    pub fn os_theme_changed(&mut self, dark: bool) -> bool {
        self.theme.os_theme_changed(dark)
    }

    // --- Persistence ---

    /// Re-read a store entry changed outside this board.
    pub fn rehydrate(&mut self, key: &str) -> bool {
        if !self.store.rehydrate(key) {
            return false;
        }
        if key == THEME_KEY {
            let os_dark = self.theme.os_dark();
            self.theme.select(self.store.theme(), os_dark);
        }
        // A gesture on a block that no longer exists stops committing.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::store::BLOCKS_KEY;
    use crate::viewport::{MAX_SCALE, MIN_SCALE};

    fn board() -> Board<MemoryStorage> {
        Board::open(Arc::new(MemoryStorage::new()), false)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pan_on_canvas() {
        let mut board = board();
        assert!(board.pointer_down(Point::new(100.0, 100.0), PointerTarget::Canvas));
        assert!(board.pointer_move(Point::new(130.0, 80.0)));
        board.pointer_up();

        assert_eq!(board.viewport().offset, Vec2::new(30.0, -20.0));
        assert!(!board.pointer_move(Point::new(500.0, 500.0)));
        assert_eq!(board.viewport().offset, Vec2::new(30.0, -20.0));
    }

    #[test]
    fn test_no_pan_on_block_or_chrome() {
        let mut board = board();
        assert!(!board.pointer_down(Point::ZERO, PointerTarget::Block));
        assert!(!board.pointer_down(Point::ZERO, PointerTarget::Chrome));
        assert!(!board.pointer_move(Point::new(50.0, 50.0)));
        assert_eq!(board.viewport().offset, Vec2::ZERO);
    }

    #[test]
    fn test_wheel_zoom_with_modifier() {
        let mut board = board();
        assert!(board.wheel(WheelEvent::new(Vec2::new(0.0, -100.0), Modifiers::CTRL)));
        assert!(approx(board.viewport().scale(), 1.1));

        board.wheel(WheelEvent::new(Vec2::new(0.0, 1e6), Modifiers::CTRL));
        assert!(approx(board.viewport().scale(), MIN_SCALE));

        board.wheel(WheelEvent::new(Vec2::new(0.0, -1e6), Modifiers::CTRL));
        assert!(approx(board.viewport().scale(), MAX_SCALE));
    }

    #[test]
    fn test_non_finite_wheel_keeps_viewport() {
        let mut board = board();
        board.zoom_in();
        board.viewport.offset = Vec2::new(5.0, 5.0);

        assert!(!board.wheel(WheelEvent::new(Vec2::new(0.0, f64::NAN), Modifiers::CTRL)));
        assert!(!board.wheel(WheelEvent::new(Vec2::new(f64::INFINITY, 0.0), Modifiers::NONE)));
        assert!(approx(board.viewport().scale(), 1.1));
        assert_eq!(board.viewport().offset, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_wheel_scrolls_without_modifier() {
        let mut board = board();
        board.wheel(WheelEvent::new(Vec2::new(0.0, 40.0), Modifiers::NONE));
        assert_eq!(board.viewport().offset, Vec2::new(0.0, -40.0));

        board.wheel(WheelEvent::new(Vec2::new(0.0, 40.0), Modifiers::SHIFT));
        assert_eq!(board.viewport().offset, Vec2::new(-40.0, -40.0));
        assert!(approx(board.viewport().scale(), 1.0));
    }

    #[test]
    fn test_zoom_lock_freezes_scale() {
        let mut board = board();
        board.set_zoom_locked(true);

        assert!(!board.zoom_in());
        assert!(!board.zoom_out());
        assert!(!board.reset_zoom());
        assert!(!board.zoom_to_fit());
        board.wheel(WheelEvent::new(Vec2::new(0.0, -500.0), Modifiers::CTRL));
        assert!(approx(board.viewport().scale(), 1.0));

        board.toggle_zoom_lock();
        assert!(board.zoom_in());
        assert!(approx(board.viewport().scale(), 1.1));
    }

    #[test]
    fn test_toolbar_steps_and_reset() {
        let mut board = board();
        board.apply(ToolbarAction::ZoomIn);
        board.apply(ToolbarAction::ZoomIn);
        assert_eq!(board.toolbar_state().zoom_label(), "120%");

        board.viewport.offset = Vec2::new(12.0, 34.0);
        board.apply(ToolbarAction::ZoomReset);
        assert!(approx(board.viewport().scale(), 1.0));
        assert_eq!(board.viewport().offset, Vec2::new(12.0, 34.0));

        for _ in 0..100 {
            board.apply(ToolbarAction::ZoomOut);
        }
        assert!(approx(board.viewport().scale(), MIN_SCALE));
    }

    #[test]
    fn test_add_block_centered_in_view() {
        let mut board = board();
        board.set_viewport_size(Size::new(1000.0, 800.0));
        board.viewport.offset = Vec2::new(100.0, -60.0);
        board.viewport.set_scale(2.0);

        let id = board.add_block();
        let block = board.block(&id).unwrap();
        let center = block.center();
        assert!(approx(center.x, (-100.0 + 500.0) / 2.0));
        assert!(approx(center.y, (60.0 + 400.0) / 2.0));
        assert_eq!(block.size, Size::new(300.0, 200.0));
    }

    #[test]
    fn test_update_missing_block_is_noop() {
        let mut board = board();
        let id = board.add_block();
        let before = board.blocks().to_vec();

        assert!(!board.update_block(&BlockId::from("missing"), Point::ZERO, Size::new(1.0, 1.0)));
        assert!(board.duplicate_block(&BlockId::from("missing")).is_none());
        assert!(!board.set_block_content(&BlockId::from("missing"), "x"));
        assert_eq!(board.blocks(), before.as_slice());
        assert!(board.block(&id).is_some());
    }

    #[test]
    fn test_duplicate_block() {
        let mut board = board();
        let id = board.add_block();
        board.set_block_content(&id, "notes");
        let original = board.block(&id).unwrap().clone();

        let copy_id = board.duplicate_block(&id).unwrap();
        assert_ne!(copy_id, id);
        assert_eq!(board.blocks().len(), 2);
        assert_eq!(board.blocks()[1].id, copy_id);

        let copy = board.block(&copy_id).unwrap();
        assert_eq!(copy.content, "notes");
        assert_eq!(copy.kind, original.kind);
        assert_eq!(copy.size, original.size);
        assert_eq!(copy.position, original.position + Vec2::new(20.0, 20.0));
        assert_eq!(board.block(&id).unwrap(), &original);
    }

    #[test]
    fn test_drag_moves_by_canvas_delta() {
        let mut board = board();
        let id = board.add_block();
        board.update_block(&id, Point::new(0.0, 0.0), Size::new(300.0, 200.0));
        board.viewport.set_scale(2.0);

        assert_eq!(board.begin_block_drag(&id, Modifiers::NONE), DragStart::Move);
        let pos = board
            .drag_block(Vec2::new(33.0, 15.0), Modifiers::NONE)
            .unwrap();
        board.end_block_gesture();

        assert!(approx(pos.x, 16.5));
        assert!(approx(pos.y, 7.5));
        assert_eq!(board.block(&id).unwrap().position, pos);
        assert!(board.active_gesture().is_none());
    }

    #[test]
    fn test_drag_snaps_with_shift() {
        let mut board = board();
        let id = board.add_block();
        board.update_block(&id, Point::new(0.0, 0.0), Size::new(300.0, 200.0));

        board.begin_block_drag(&id, Modifiers::NONE);
        let pos = board
            .drag_block(Vec2::new(14.0, 26.0), Modifiers::SHIFT)
            .unwrap();
        assert_eq!(pos, Point::new(10.0, 30.0));

        // Snapping applies per event; the raw position keeps accumulating.
        let pos = board.drag_block(Vec2::new(0.3, 0.0), Modifiers::NONE).unwrap();
        assert!(approx(pos.x, 14.3));
        assert!(approx(pos.y, 26.0));
    }

    #[test]
    fn test_alt_drag_duplicates_once() {
        let mut board = board();
        let id = board.add_block();
        let original = board.block(&id).unwrap().clone();

        let copy_id = match board.begin_block_drag(&id, Modifiers::ALT) {
            DragStart::Duplicated(copy_id) => copy_id,
            other => panic!("expected duplicate, got {other:?}"),
        };
        assert!(board.drag_block(Vec2::new(50.0, 50.0), Modifiers::ALT).is_none());
        assert!(board.drag_block(Vec2::new(50.0, 50.0), Modifiers::NONE).is_none());
        board.end_block_gesture();

        assert_eq!(board.blocks().len(), 2);
        assert_eq!(board.block(&id).unwrap(), &original);
        assert!(board.block(&copy_id).is_some());
    }

    #[test]
    fn test_drag_unknown_block() {
        let mut board = board();
        assert_eq!(
            board.begin_block_drag(&BlockId::from("nope"), Modifiers::NONE),
            DragStart::Missing
        );
        assert!(board.drag_block(Vec2::new(1.0, 1.0), Modifiers::NONE).is_none());
    }

    #[test]
    fn test_resize_commits_position_and_size() {
        let mut board = board();
        let id = board.add_block();
        board.update_block(&id, Point::new(0.0, 0.0), Size::new(300.0, 200.0));

        assert!(board.begin_block_resize(&id, ResizeHandle::TopLeft));
        let rect = board.resize_block(Vec2::new(-20.0, -10.0)).unwrap();
        board.end_block_gesture();

        assert_eq!(rect, Rect::new(-20.0, -10.0, 300.0, 200.0));
        let block = board.block(&id).unwrap();
        assert_eq!(block.position, Point::new(-20.0, -10.0));
        assert_eq!(block.size, Size::new(320.0, 210.0));
    }

    fn far_off_grid_block(board: &mut Board<MemoryStorage>) -> BlockId {
        board.set_viewport_size(Size::new(800.0, 600.0));
        board.viewport.offset = Vec2::new(-10_000.0, -10_000.0);
        let id = board.add_block();
        assert_eq!(board.block(&id).unwrap().position, Point::new(10_250.0, 10_200.0));
        id
    }

    #[test]
    fn test_drag_outside_grid_does_not_jump() {
        let mut board = board();
        let id = far_off_grid_block(&mut board);

        board.begin_block_drag(&id, Modifiers::NONE);
        let pos = board.drag_block(Vec2::new(1.0, 1.0), Modifiers::NONE).unwrap();
        assert_eq!(pos, Point::new(10_250.0, 10_200.0));

        let pos = board.drag_block(Vec2::new(-11.0, -6.0), Modifiers::NONE).unwrap();
        assert_eq!(pos, Point::new(10_240.0, 10_195.0));

        let pos = board.drag_block(Vec2::ZERO, Modifiers::SHIFT).unwrap();
        assert_eq!(pos, Point::new(10_240.0, 10_200.0));
    }

    #[test]
    fn test_resize_outside_grid_does_not_jump() {
        let mut board = board();
        let id = far_off_grid_block(&mut board);

        board.begin_block_resize(&id, ResizeHandle::BottomRight);
        let rect = board.resize_block(Vec2::new(-10.0, -20.0)).unwrap();
        assert_eq!(rect, Rect::new(10_250.0, 10_200.0, 10_540.0, 10_380.0));
    }

    #[test]
    fn test_duplicate_past_grid_edge_drags_smoothly() {
        let mut board = board();
        let id = board.add_block();
        board.update_block(&id, Point::new(2195.0, 0.0), Size::new(300.0, 200.0));
        let copy = board.duplicate_block(&id).unwrap();
        assert_eq!(board.block(&copy).unwrap().position.x, 2215.0);

        board.begin_block_drag(&copy, Modifiers::NONE);
        let pos = board.drag_block(Vec2::new(0.5, 0.0), Modifiers::NONE).unwrap();
        assert_eq!(pos, Point::new(2215.0, 20.0));
        let pos = board.drag_block(Vec2::new(-1.0, 0.0), Modifiers::NONE).unwrap();
        assert_eq!(pos, Point::new(2214.5, 20.0));
    }

    #[test]
    fn test_fit_to_content() {
        let mut board = board();
        board.set_viewport_size(Size::new(800.0, 600.0));
        let a = board.add_block();
        let b = board.add_block();
        board.update_block(&a, Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        board.update_block(&b, Point::new(300.0, 400.0), Size::new(100.0, 100.0));

        assert!(board.zoom_to_fit());
        let bounds = board.content_bounds().unwrap();
        let screen = board.viewport().canvas_rect_to_screen(bounds);
        assert!(screen.x0 >= FIT_PADDING - 1e-9);
        assert!(screen.y0 >= FIT_PADDING - 1e-9);
        assert!(screen.x1 <= 800.0 - FIT_PADDING + 1e-9);
        assert!(screen.y1 <= 600.0 - FIT_PADDING + 1e-9);
    }

    #[test]
    fn test_fit_without_blocks_resets() {
        let mut board = board();
        board.apply(ToolbarAction::ZoomIn);
        assert!(board.zoom_to_fit());
        assert!(approx(board.viewport().scale(), 1.0));
    }

    #[test]
    fn test_theme_selection_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut board = Board::open(storage.clone(), true);
        assert!(board.dark_mode());

        board.select_theme(ThemePreference::Light, true);
        assert!(!board.dark_mode());
        assert!(!board.os_theme_changed(false));

        let reopened = Board::open(storage, true);
        assert_eq!(reopened.theme().preference(), ThemePreference::Light);
        assert!(!reopened.dark_mode());
    }

    #[test]
    fn test_rehydrate_theme_from_other_writer() {
        let storage = Arc::new(MemoryStorage::new());
        let mut board = Board::open(storage.clone(), false);

        let mut other = Store::open(storage);
        other.set_theme(ThemePreference::Dark);

        assert!(board.rehydrate(THEME_KEY));
        assert!(board.dark_mode());
    }

    #[test]
    fn test_rehydrate_removes_block_mid_drag() {
        let storage = Arc::new(MemoryStorage::new());
        let mut board = Board::open(storage.clone(), false);
        let id = board.add_block();
        board.begin_block_drag(&id, Modifiers::NONE);
        assert!(board.drag_block(Vec2::new(5.0, 5.0), Modifiers::NONE).is_some());

        // Another tab clears the board.
        storage.set(BLOCKS_KEY, "[]").unwrap();

        assert!(board.rehydrate(BLOCKS_KEY));
        assert!(board.blocks().is_empty());
        assert!(board.drag_block(Vec2::new(5.0, 5.0), Modifiers::NONE).is_none());
        board.end_block_gesture();
        assert!(board.blocks().is_empty());
    }
}
