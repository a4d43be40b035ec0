//! UI components using egui.
//!
//! Everything above the vello canvas is drawn here: the zoom toolbar, the
//! theme switcher, the shortcuts modal, and one egui area per block. The UI
//! never touches the board directly. It reads a [`UiState`] snapshot and
//! reports [`UiAction`]s for the app to apply.

use blockboard_core::{
    Block, BlockId, Board, KeyValueStorage, Modifiers, ResizeHandle, ThemePreference,
    ToolbarAction, ToolbarState, Viewport,
};
use egui::{
    Align2, Color32, Context, CornerRadius, CursorIcon, FontId, Frame, Id, LayerId, Margin,
    Order, Pos2, Rect, Sense, Vec2, vec2,
};

use blockboard_widgets::{
    IconButton, IconButtonStyle, Palette, card_frame, panel_frame, section_label,
    toolbar_frame, vertical_separator,
};

use crate::event_handler::modifiers_from_egui;

/// Height of a block's drag strip, in canvas pixels.
const HEADER_HEIGHT: f32 = 18.0;
/// Body text size, in canvas pixels.
const BODY_FONT_SIZE: f32 = 14.0;
/// Body padding, in canvas pixels.
const BODY_PADDING: f32 = 12.0;
/// Thickness of edge resize handles, in screen pixels.
const EDGE_HANDLE: f32 = 6.0;
/// Side length of corner resize handles, in screen pixels.
const CORNER_HANDLE: f32 = 12.0;

/// A block as the UI draws it this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCard {
    pub id: BlockId,
    /// Screen rect in logical pixels.
    pub rect: Rect,
    pub content: String,
}

impl BlockCard {
    pub fn new(block: &Block, viewport: &Viewport) -> Self {
        let screen = viewport.canvas_rect_to_screen(block.rect());
        Self {
            id: block.id.clone(),
            rect: Rect::from_min_max(
                Pos2::new(screen.x0 as f32, screen.y0 as f32),
                Pos2::new(screen.x1 as f32, screen.y1 as f32),
            ),
            content: block.content.clone(),
        }
    }
}

/// UI state: a per-frame snapshot of the board plus UI-only flags.
#[derive(Debug, Clone)]
pub struct UiState {
    pub toolbar: ToolbarState,
    pub theme: ThemePreference,
    pub dark_mode: bool,
    /// Current scale, for sizing block text.
    pub zoom: f32,
    /// Blocks in rendering order; the last is on top.
    pub cards: Vec<BlockCard>,
    /// Block under an in-progress drag or resize.
    pub active_block: Option<BlockId>,
    /// Block under the pointer after the last UI pass.
    pub hovered_block: Option<BlockId>,
    pub shortcuts_modal_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            toolbar: ToolbarState {
                scale: 1.0,
                zoom_locked: false,
            },
            theme: ThemePreference::default(),
            dark_mode: false,
            zoom: 1.0,
            cards: Vec::new(),
            active_block: None,
            hovered_block: None,
            shortcuts_modal_open: false,
        }
    }
}

impl UiState {
    /// Refresh the snapshot from the board.
    pub fn sync<S: KeyValueStorage>(&mut self, board: &Board<S>) {
        let viewport = board.viewport();
        self.toolbar = board.toolbar_state();
        self.theme = board.theme().preference();
        self.dark_mode = board.dark_mode();
        self.zoom = viewport.scale() as f32;
        self.cards = board
            .blocks()
            .iter()
            .map(|block| BlockCard::new(block, viewport))
            .collect();
        self.active_block = board.active_gesture().map(|g| g.block().clone());
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.dark_mode)
    }
}

/// Actions that can be triggered from the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Toolbar(ToolbarAction),
    SelectTheme(ThemePreference),
    BeginDrag {
        block: BlockId,
        modifiers: Modifiers,
    },
    /// Continue the current drag by a screen-space delta.
    Drag {
        delta: kurbo::Vec2,
        modifiers: Modifiers,
    },
    BeginResize {
        block: BlockId,
        handle: ResizeHandle,
    },
    /// Continue the current resize by a screen-space delta.
    Resize {
        delta: kurbo::Vec2,
    },
    /// Finish the current drag or resize.
    EndGesture,
    SetContent {
        block: BlockId,
        content: String,
    },
}

/// Render all UI and return the triggered actions in order.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let palette = ui_state.palette();

    ui_state.hovered_block = render_blocks(ctx, ui_state, &palette, &mut actions);
    render_toolbar(ctx, ui_state, &palette, &mut actions);
    render_theme_switcher(ctx, ui_state, &palette, &mut actions);

    if ui_state.shortcuts_modal_open {
        render_shortcuts_modal(ctx, ui_state, &palette);
    }

    actions
}

/// Render the zoom toolbar at the top centre.
fn render_toolbar(
    ctx: &Context,
    ui_state: &mut UiState,
    palette: &Palette,
    actions: &mut Vec<UiAction>,
) {
    let toolbar = ui_state.toolbar;
    let button = |ui: &mut egui::Ui, glyph: &str, action: ToolbarAction, shortcut: &str| {
        let is_lock = action == ToolbarAction::ToggleZoomLock;
        let style = if is_lock {
            IconButtonStyle::solid()
        } else {
            IconButtonStyle::default()
        };
        IconButton::new(glyph, action.label())
            .palette(*palette)
            .style(style)
            .shortcut(shortcut)
            .selected(is_lock && toolbar.zoom_locked)
            .enabled(toolbar.is_enabled(action))
            .show(ui)
            .then_some(UiAction::Toolbar(action))
    };

    egui::Area::new(Id::new("toolbar"))
        .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 16.0))
        .order(Order::Foreground)
        .show(ctx, |ui| {
            toolbar_frame(palette).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(2.0, 0.0);

                    actions.extend(button(ui, "➖", ToolbarAction::ZoomOut, "Ctrl+-"));
                    let label = egui::RichText::new(toolbar.zoom_label())
                        .size(12.0)
                        .color(palette.text);
                    let reset = ui
                        .add_enabled(
                            toolbar.zoom_controls_enabled(),
                            egui::Button::new(label)
                                .frame(false)
                                .min_size(vec2(48.0, 32.0)),
                        )
                        .on_hover_text(ToolbarAction::ZoomReset.label());
                    if reset.clicked() {
                        actions.push(UiAction::Toolbar(ToolbarAction::ZoomReset));
                    }
                    actions.extend(button(ui, "➕", ToolbarAction::ZoomIn, "Ctrl+="));
                    actions.extend(button(ui, "⛶", ToolbarAction::ZoomToFit, "Ctrl+1"));

                    vertical_separator(ui, palette);

                    let lock = if toolbar.zoom_locked { "🔒" } else { "🔓" };
                    actions.extend(button(ui, lock, ToolbarAction::ToggleZoomLock, "Ctrl+L"));

                    vertical_separator(ui, palette);

                    actions.extend(button(ui, "📝", ToolbarAction::AddBlock, "Ctrl+B"));
                });
            });
        });

    egui::Area::new(Id::new("help_button"))
        .anchor(Align2::LEFT_BOTTOM, Vec2::new(16.0, -16.0))
        .order(Order::Foreground)
        .show(ctx, |ui| {
            toolbar_frame(palette).show(ui, |ui| {
                if IconButton::new("?", "Keyboard shortcuts")
                    .palette(*palette)
                    .selected(ui_state.shortcuts_modal_open)
                    .style(IconButtonStyle::small())
                    .show(ui)
                {
                    ui_state.shortcuts_modal_open = !ui_state.shortcuts_modal_open;
                }
            });
        });
}

fn theme_glyph(preference: ThemePreference) -> &'static str {
    match preference {
        ThemePreference::Light => "☀",
        ThemePreference::Dark => "🌙",
        ThemePreference::System => "🖥",
    }
}

/// Render the three-way theme switcher at the top right.
fn render_theme_switcher(
    ctx: &Context,
    ui_state: &UiState,
    palette: &Palette,
    actions: &mut Vec<UiAction>,
) {
    egui::Area::new(Id::new("theme_switcher"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-16.0, 16.0))
        .order(Order::Foreground)
        .show(ctx, |ui| {
            toolbar_frame(palette).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);
                    for preference in ThemePreference::ALL {
                        let selected = ui_state.theme == preference;
                        let tooltip = format!("{} theme", preference.name());
                        if IconButton::new(theme_glyph(preference), &tooltip)
                            .palette(*palette)
                            .selected(selected)
                            .show(ui)
                            && !selected
                        {
                            actions.push(UiAction::SelectTheme(preference));
                        }
                    }
                });
            });
        });
}

/// Render every block card. Returns the block under the pointer.
fn render_blocks(
    ctx: &Context,
    ui_state: &UiState,
    palette: &Palette,
    actions: &mut Vec<UiAction>,
) -> Option<BlockId> {
    let mut hovered = None;
    let mut layers = Vec::with_capacity(ui_state.cards.len());

    for card in &ui_state.cards {
        let active = ui_state.active_block.as_ref() == Some(&card.id);
        let area_id = Id::new(("block", card.id.as_str()));
        layers.push(LayerId::new(Order::Middle, area_id));

        egui::Area::new(area_id)
            .fixed_pos(card.rect.min)
            .order(Order::Middle)
            .movable(false)
            .constrain(false)
            .show(ctx, |ui| {
                render_block_card(ui, card, ui_state.zoom, palette, active, actions);
                if ui.rect_contains_pointer(card.rect.expand(EDGE_HANDLE / 2.0)) {
                    hovered = Some(card.id.clone());
                }
            });
    }

    // Later blocks stack above earlier ones.
    for layer in layers {
        ctx.move_to_top(layer);
    }
    hovered
}

fn render_block_card(
    ui: &mut egui::Ui,
    card: &BlockCard,
    zoom: f32,
    palette: &Palette,
    active: bool,
    actions: &mut Vec<UiAction>,
) {
    let size = card.rect.size();
    let header_height = (HEADER_HEIGHT * zoom).max(6.0).min(size.y);
    let padding = (BODY_PADDING * zoom).round().clamp(0.0, 127.0) as i8;
    let modifiers = modifiers_from_egui(ui.ctx().input(|i| i.modifiers));

    card_frame(palette, zoom, active).show(ui, |ui| {
        ui.set_min_size(size);
        ui.set_max_size(size);
        ui.spacing_mut().item_spacing = Vec2::ZERO;

        let (header_rect, header) =
            ui.allocate_exact_size(vec2(size.x, header_height), Sense::drag());
        let radius = card_frame(palette, zoom, active).corner_radius;
        ui.painter().rect_filled(
            header_rect,
            CornerRadius {
                nw: radius.nw,
                ne: radius.ne,
                sw: 0,
                se: 0,
            },
            palette.card_header,
        );
        paint_grip(ui, header_rect, palette.text_muted);

        if header.drag_started() {
            actions.push(UiAction::BeginDrag {
                block: card.id.clone(),
                modifiers,
            });
        }
        if header.dragged() {
            let delta = header.drag_delta();
            if delta != Vec2::ZERO {
                actions.push(UiAction::Drag {
                    delta: to_kurbo(delta),
                    modifiers,
                });
            }
        }
        if header.drag_stopped() {
            actions.push(UiAction::EndGesture);
        }
        let cursor = if header.dragged() {
            CursorIcon::Grabbing
        } else {
            CursorIcon::Grab
        };
        header.on_hover_cursor(cursor);

        let body_size = vec2(size.x, (size.y - header_height).max(0.0));
        ui.allocate_ui(body_size, |ui| {
            egui::ScrollArea::vertical()
                .id_salt(("block_scroll", card.id.as_str()))
                .auto_shrink([false, false])
                .max_height(body_size.y)
                .show(ui, |ui| {
                    Frame::new()
                        .inner_margin(Margin::same(padding))
                        .show(ui, |ui| {
                            let mut text = card.content.clone();
                            let response = ui.add(
                                egui::TextEdit::multiline(&mut text)
                                    .id(Id::new(("block_text", card.id.as_str())))
                                    .font(FontId::proportional(BODY_FONT_SIZE * zoom))
                                    .text_color(palette.text)
                                    .frame(false)
                                    .desired_width(f32::INFINITY)
                                    .hint_text("Type something…"),
                            );
                            if response.changed() {
                                actions.push(UiAction::SetContent {
                                    block: card.id.clone(),
                                    content: text,
                                });
                            }
                        });
                });
        });
    });

    for handle in ResizeHandle::ALL {
        let id = Id::new(("block_resize", card.id.as_str(), handle_name(handle)));
        let response = ui.interact(handle_rect(card.rect, handle), id, Sense::drag());
        if response.drag_started() {
            actions.push(UiAction::BeginResize {
                block: card.id.clone(),
                handle,
            });
        }
        if response.dragged() {
            let delta = response.drag_delta();
            if delta != Vec2::ZERO {
                actions.push(UiAction::Resize {
                    delta: to_kurbo(delta),
                });
            }
        }
        if response.drag_stopped() {
            actions.push(UiAction::EndGesture);
        }
        response.on_hover_cursor(cursor_for(handle));
    }
}

fn paint_grip(ui: &egui::Ui, rect: Rect, color: Color32) {
    let radius = (rect.height() * 0.08).clamp(1.0, 2.5);
    let spacing = radius * 3.0;
    let center = rect.center();
    for i in -1..=1 {
        let pos = Pos2::new(center.x + i as f32 * spacing, center.y);
        ui.painter().circle_filled(pos, radius, color);
    }
}

fn to_kurbo(delta: Vec2) -> kurbo::Vec2 {
    kurbo::Vec2::new(delta.x as f64, delta.y as f64)
}

fn handle_name(handle: ResizeHandle) -> &'static str {
    match handle {
        ResizeHandle::Top => "top",
        ResizeHandle::Bottom => "bottom",
        ResizeHandle::Left => "left",
        ResizeHandle::Right => "right",
        ResizeHandle::TopLeft => "top_left",
        ResizeHandle::TopRight => "top_right",
        ResizeHandle::BottomLeft => "bottom_left",
        ResizeHandle::BottomRight => "bottom_right",
    }
}

/// Hit rect of a resize handle, straddling the card's edge.
fn handle_rect(card: Rect, handle: ResizeHandle) -> Rect {
    let e = EDGE_HANDLE / 2.0;
    let c = CORNER_HANDLE / 2.0;
    let corner = |p: Pos2| Rect::from_center_size(p, Vec2::splat(CORNER_HANDLE));
    match handle {
        ResizeHandle::Top => Rect::from_min_max(
            Pos2::new(card.left() + c, card.top() - e),
            Pos2::new(card.right() - c, card.top() + e),
        ),
        ResizeHandle::Bottom => Rect::from_min_max(
            Pos2::new(card.left() + c, card.bottom() - e),
            Pos2::new(card.right() - c, card.bottom() + e),
        ),
        ResizeHandle::Left => Rect::from_min_max(
            Pos2::new(card.left() - e, card.top() + c),
            Pos2::new(card.left() + e, card.bottom() - c),
        ),
        ResizeHandle::Right => Rect::from_min_max(
            Pos2::new(card.right() - e, card.top() + c),
            Pos2::new(card.right() + e, card.bottom() - c),
        ),
        ResizeHandle::TopLeft => corner(card.left_top()),
        ResizeHandle::TopRight => corner(card.right_top()),
        ResizeHandle::BottomLeft => corner(card.left_bottom()),
        ResizeHandle::BottomRight => corner(card.right_bottom()),
    }
}

fn cursor_for(handle: ResizeHandle) -> CursorIcon {
    match handle {
        ResizeHandle::Top | ResizeHandle::Bottom => CursorIcon::ResizeVertical,
        ResizeHandle::Left | ResizeHandle::Right => CursorIcon::ResizeHorizontal,
        ResizeHandle::TopLeft | ResizeHandle::BottomRight => CursorIcon::ResizeNwSe,
        ResizeHandle::TopRight | ResizeHandle::BottomLeft => CursorIcon::ResizeNeSw,
    }
}

/// Render the keyboard shortcuts modal.
fn render_shortcuts_modal(ctx: &Context, ui_state: &mut UiState, palette: &Palette) {
    use crate::shortcuts::ShortcutRegistry;

    // Backdrop
    egui::Area::new(Id::new("shortcuts_backdrop"))
        .fixed_pos(Pos2::ZERO)
        .order(Order::Foreground)
        .show(ctx, |ui| {
            let screen_rect = ctx.input(|i| i.content_rect());
            let response = ui.allocate_rect(screen_rect, Sense::click());
            ui.painter()
                .rect_filled(screen_rect, 0.0, Color32::from_black_alpha(80));
            if response.clicked() {
                ui_state.shortcuts_modal_open = false;
            }
        });

    // Modal window
    egui::Area::new(Id::new("shortcuts_modal"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(Order::Tooltip)
        .show(ctx, |ui| {
            panel_frame(palette).show(ui, |ui| {
                ui.set_width(360.0);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new("Keyboard Shortcuts")
                                .size(16.0)
                                .strong()
                                .color(palette.text),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if IconButton::new("✕", "Close")
                                .palette(*palette)
                                .style(IconButtonStyle::small())
                                .show(ui)
                            {
                                ui_state.shortcuts_modal_open = false;
                            }
                        });
                    });

                    ui.add_space(8.0);
                    section_label(ui, "CANVAS", palette);
                    ui.add_space(4.0);

                    for shortcut in ShortcutRegistry::all() {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(shortcut.format())
                                    .size(12.0)
                                    .family(egui::FontFamily::Monospace)
                                    .color(palette.text_muted),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.label(
                                        egui::RichText::new(shortcut.description)
                                            .size(12.0)
                                            .color(palette.text),
                                    );
                                },
                            );
                        });
                        ui.add_space(4.0);
                    }
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockboard_core::storage::MemoryStorage;
    use std::sync::Arc;

    fn run_frame(ctx: &Context, state: &mut UiState) -> Vec<UiAction> {
        let mut actions = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = render_ui(ctx, state);
        });
        actions
    }

    #[test]
    fn test_sync_maps_blocks_to_screen() {
        let mut board = Board::open(Arc::new(MemoryStorage::new()), true);
        let id = board.add_block();
        assert!(board.request_zoom(2.0));

        let mut state = UiState::default();
        state.sync(&board);

        assert!(state.dark_mode);
        assert_eq!(state.toolbar.zoom_label(), "200%");
        assert_eq!(state.cards.len(), 1);
        assert_eq!(state.cards[0].id, id);

        let block = board.block(&id).expect("block was added");
        let expected = board.viewport().canvas_rect_to_screen(block.rect());
        assert!((state.cards[0].rect.width() - expected.width() as f32).abs() < 1e-3);
        assert!((state.cards[0].rect.min.x - expected.x0 as f32).abs() < 1e-3);
    }

    #[test]
    fn test_idle_frame_emits_nothing() {
        let ctx = Context::default();
        let mut board = Board::open(Arc::new(MemoryStorage::new()), false);
        board.add_block();

        let mut state = UiState::default();
        state.sync(&board);
        let actions = run_frame(&ctx, &mut state);
        assert!(actions.is_empty());
        assert_eq!(state.hovered_block, None);
    }

    #[test]
    fn test_handle_rects_straddle_edges() {
        let card = Rect::from_min_size(Pos2::new(100.0, 100.0), vec2(300.0, 200.0));

        let top = handle_rect(card, ResizeHandle::Top);
        assert!(top.contains(Pos2::new(250.0, 100.0)));
        assert!(!top.contains(card.left_top()));

        let corner = handle_rect(card, ResizeHandle::BottomRight);
        assert!(corner.contains(card.right_bottom()));

        // Edge handles never overlap the corners.
        for handle in [ResizeHandle::Top, ResizeHandle::Left] {
            let edge = handle_rect(card, handle);
            assert!(!edge.intersects(handle_rect(card, ResizeHandle::TopLeft).shrink(0.5)));
        }
    }

    #[test]
    fn test_resize_cursors() {
        assert_eq!(cursor_for(ResizeHandle::Left), CursorIcon::ResizeHorizontal);
        assert_eq!(cursor_for(ResizeHandle::Bottom), CursorIcon::ResizeVertical);
        assert_eq!(cursor_for(ResizeHandle::TopLeft), CursorIcon::ResizeNwSe);
        assert_eq!(cursor_for(ResizeHandle::BottomLeft), CursorIcon::ResizeNeSw);
    }
}
