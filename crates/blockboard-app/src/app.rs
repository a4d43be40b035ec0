//! Core application state and lifecycle.

use blockboard_core::{DragStart, PlatformBoard, PointerTarget, open_platform_storage};
use blockboard_render::{
    CanvasColors, RenderContext, Renderer, VelloRenderer, acquire_surface_texture,
    create_gpu_renderer, render_scene,
};
use kurbo::Size;
use std::sync::Arc;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams};
use winit::application::ApplicationHandler;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Theme, Window, WindowId};

use crate::event_handler::EventHandler;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{UiAction, UiState, render_ui};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub show_grid: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Blockboard".to_string(),
            width: 1280,
            height: 800,
            show_grid: true,
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    canvas_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion (needed for WebGPU/WASM)
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,
    /// Dark mode the egui visuals were last set to.
    applied_dark: Option<bool>,

    // State
    board: PlatformBoard,
    config: AppConfig,

    // Event handling
    event_handler: EventHandler,
}

impl AppState {
    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    /// Current OS theme as reported by the window.
    fn os_dark(&self) -> bool {
        self.window.theme() == Some(Theme::Dark)
    }

    /// Match the egui visuals to the board's effective theme.
    fn sync_theme(&mut self) {
        let dark = self.board.dark_mode();
        if self.applied_dark == Some(dark) {
            return;
        }
        self.egui_ctx.set_theme(if dark {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });
        self.applied_dark = Some(dark);
        log::debug!("Applied {} theme", if dark { "dark" } else { "light" });
    }

    /// Where a primary press would land.
    fn pointer_target(&self, egui_wants_input: bool) -> PointerTarget {
        if self.ui_state.hovered_block.is_some() {
            PointerTarget::Block
        } else if egui_wants_input {
            PointerTarget::Chrome
        } else {
            PointerTarget::Canvas
        }
    }

    fn apply_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::Toolbar(action) => {
                if !self.board.apply(action) {
                    log::debug!("{:?} had no effect", action);
                }
            }
            UiAction::SelectTheme(preference) => {
                let os_dark = self.os_dark();
                self.board.select_theme(preference, os_dark);
            }
            UiAction::BeginDrag { block, modifiers } => {
                if let DragStart::Duplicated(copy) = self.board.begin_block_drag(&block, modifiers)
                {
                    log::debug!("Duplicated block {block} as {copy}");
                }
            }
            UiAction::Drag { delta, modifiers } => {
                self.board.drag_block(delta, modifiers);
            }
            UiAction::BeginResize { block, handle } => {
                self.board.begin_block_resize(&block, handle);
            }
            UiAction::Resize { delta } => {
                self.board.resize_block(delta);
            }
            UiAction::EndGesture => self.board.end_block_gesture(),
            UiAction::SetContent { block, content } => {
                self.board.set_block_content(&block, content);
            }
        }
    }

    /// Handle a key press outside text editing. Returns true if it was used.
    fn handle_key(&mut self, key: &Key) -> bool {
        if let Key::Named(NamedKey::Escape) = key {
            if self.ui_state.shortcuts_modal_open {
                self.ui_state.shortcuts_modal_open = false;
                return true;
            }
            return false;
        }

        if !self.event_handler.modifiers().zooms() {
            return false;
        }
        let Key::Character(c) = key else {
            return false;
        };
        match ShortcutRegistry::lookup(c.as_str(), true) {
            Some(action) => {
                log::debug!("Shortcut {c} -> {:?}", action);
                self.board.apply(action);
                true
            }
            None => false,
        }
    }

    /// Build the canvas scene and present it with the egui overlay on top.
    fn render(&mut self, render_cx: &vello::util::RenderContext) {
        // Apply storage changes made by other tabs
        #[cfg(target_arch = "wasm32")]
        for key in crate::web::take_pending_storage_keys() {
            if self.board.rehydrate(&key) {
                log::info!("Reloaded {key} after an outside change");
            }
        }

        self.sync_theme();
        self.ui_state.sync(&self.board);

        // Run egui and collect actions
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut actions = Vec::new();
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            actions = render_ui(ctx, &mut self.ui_state);
        });
        for action in actions {
            self.apply_ui_action(action);
        }

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        // Build the canvas scene
        let colors = CanvasColors::for_theme(self.board.dark_mode());
        let ctx = RenderContext::new(
            self.board.viewport(),
            self.board.grid(),
            self.board.viewport_size(),
        )
        .with_scale_factor(self.window.scale_factor())
        .with_colors(colors)
        .with_grid(self.config.show_grid);
        self.canvas_renderer.build_scene(&ctx);
        let base_color = self.canvas_renderer.background_color(&ctx);
        let scene = self.canvas_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match acquire_surface_texture(&self.surface.surface) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("{e}");
                return;
            }
        };

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a StorageBinding texture, which WebGPU
        // only allows for Rgba8Unorm. Render there, then blit to the surface.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) = render_scene(
            &mut self.vello_renderer,
            device,
            queue,
            &scene,
            &render_texture_view,
            &params,
        ) {
            log::error!("{e}");
            return;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter.copy(
                device,
                &mut blit_encoder,
                &render_texture_view,
                &surface_view,
            );
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });

            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        load: vello::wgpu::LoadOp::Load, // Keep Vello content
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Window waiting for async surface creation (WASM only)
    pending_window: Option<Arc<Window>>,
    /// Flag to indicate async init is in progress
    #[cfg(target_arch = "wasm32")]
    init_in_progress: std::cell::Cell<bool>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            pending_window: None,
            #[cfg(target_arch = "wasm32")]
            init_in_progress: std::cell::Cell::new(false),
        }
    }

    /// Run the application.
    pub async fn run() {
        let event_loop = EventLoop::new().expect("Failed to create event loop");
        let app = App::new();

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            event_loop.run_app(&mut app).expect("Event loop error");
        }
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let render_cx = self
            .render_cx
            .as_ref()
            .expect("RenderContext not initialized");
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer =
            create_gpu_renderer(device).expect("Failed to create Vello renderer");

        let texture_blitter =
            vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        // Initialize egui
        let egui_ctx = egui::Context::default();
        // Ctrl/Cmd +/-/0 zoom the canvas, not the UI.
        egui_ctx.options_mut(|options| options.zoom_with_keyboard = false);
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let os_dark = window.theme() == Some(Theme::Dark);
        let storage = open_platform_storage();
        if !storage.is_persistent() {
            log::warn!("Board state will not persist across restarts");
        }
        let mut board = PlatformBoard::open(storage, os_dark);
        let logical = window.inner_size().to_logical::<f64>(window.scale_factor());
        board.set_viewport_size(Size::new(logical.width, logical.height));

        log::info!(
            "Blockboard initialized - {}x{} ({} blocks)",
            surface.config.width,
            surface.config.height,
            board.blocks().len()
        );

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            canvas_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            applied_dark: None,
            board,
            config: self.config.clone(),
            event_handler: EventHandler::new(),
        });

        self.pending_window = None;

        // Request initial redraw
        window.request_redraw();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.pending_window.is_some() {
            return;
        }

        log::info!("Creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        // On WASM, attach canvas to DOM and use full viewport
        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let web_window = web_sys::window().expect("No window");
            let document = web_window.document().expect("No document");

            let viewport_width = web_window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.config.width as f64);
            let viewport_height = web_window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.config.height as f64);

            if let Some(loading) = document.get_element_by_id("loading") {
                loading.remove();
            }

            let canvas = document
                .get_element_by_id("blockboard-canvas")
                .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
                .or_else(|| {
                    let app_div = document.get_element_by_id("app")?;
                    let canvas = document.create_element("canvas").ok()?;
                    canvas.set_id("blockboard-canvas");
                    app_div.append_child(&canvas).ok()?;
                    canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok()
                })
                .expect("Failed to create canvas");

            let dpr = web_window.device_pixel_ratio();
            let physical_width = (viewport_width * dpr) as u32;
            let physical_height = (viewport_height * dpr) as u32;

            canvas.set_width(physical_width);
            canvas.set_height(physical_height);
            let style = canvas.style();
            let _ = style.set_property("width", "100%");
            let _ = style.set_property("height", "100%");
            let _ = style.set_property("display", "block");
            let _ = style.set_property("position", "fixed");
            let _ = style.set_property("top", "0");
            let _ = style.set_property("left", "0");

            log::info!(
                "Canvas created: {}x{} (physical: {}x{}, dpr: {})",
                viewport_width,
                viewport_height,
                physical_width,
                physical_height,
                dpr
            );

            Window::default_attributes()
                .with_title(&self.config.title)
                .with_canvas(Some(canvas))
        };

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Window created, surface size: {}x{}", width, height);

        // On native, block on async surface creation
        #[cfg(not(target_arch = "wasm32"))]
        {
            let render_cx = self
                .render_cx
                .get_or_insert_with(vello::util::RenderContext::new);

            let surface = pollster::block_on(render_cx.create_surface(
                window.clone(),
                width,
                height,
                PresentMode::AutoVsync,
            ))
            .expect("Failed to create surface");

            // SAFETY: the surface holds an Arc of the window, and App owns both.
            let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };
            self.finish_init(window, surface);
        }

        // On WASM, store window for later async initialization
        #[cfg(target_arch = "wasm32")]
        {
            self.pending_window = Some(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // On WASM, handle async initialization
        #[cfg(target_arch = "wasm32")]
        if self.state.is_none() {
            if let Some(window) = self.pending_window.clone() {
                if !self.init_in_progress.get() {
                    self.init_in_progress.set(true);

                    let web_window = web_sys::window().expect("No window");
                    let dpr = web_window.device_pixel_ratio();
                    let viewport_width = web_window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(self.config.width as f64);
                    let viewport_height = web_window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(self.config.height as f64);

                    let width = (viewport_width * dpr) as u32;
                    let height = (viewport_height * dpr) as u32;

                    let self_ptr = self as *mut Self;
                    let window_clone = window.clone();

                    wasm_bindgen_futures::spawn_local(async move {
                        log::info!("Creating surface asynchronously...");

                        let mut render_cx = vello::util::RenderContext::new();

                        match render_cx
                            .create_surface(
                                window_clone.clone(),
                                width,
                                height,
                                PresentMode::AutoVsync,
                            )
                            .await
                        {
                            Ok(surface) => {
                                let surface: RenderSurface<'static> =
                                    unsafe { std::mem::transmute(surface) };

                                // SAFETY: WASM is single-threaded and the event
                                // loop keeps the App alive.
                                let app = unsafe { &mut *self_ptr };
                                app.render_cx = Some(render_cx);
                                app.finish_init(window_clone, surface);
                            }
                            Err(e) => {
                                log::error!("Failed to create surface: {:?}", e);
                                let app = unsafe { &mut *self_ptr };
                                app.init_in_progress.set(false);
                            }
                        }
                    });
                }

                // Keep the event loop running until the surface exists
                window.request_redraw();
            }
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);

        // Block cards are egui areas too, so hovering one counts here.
        let egui_wants_input = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                let logical = size.to_logical::<f64>(state.scale_factor());
                state
                    .board
                    .set_viewport_size(Size::new(logical.width, logical.height));

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::ThemeChanged(theme) => {
                if state.board.os_theme_changed(theme == Theme::Dark) {
                    log::info!("Following OS theme: {:?}", theme);
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                state.render(render_cx);
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let scale_factor = state.scale_factor();
                state
                    .event_handler
                    .cursor_moved(&mut state.board, position, scale_factor);
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                let target = state.pointer_target(egui_wants_input);
                state
                    .event_handler
                    .mouse_input(&mut state.board, btn_state, button, target);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Zoom gestures reach the canvas even over a block; plain
                // scrolling over a block scrolls its text.
                let zooming = state.event_handler.modifiers().zooms();
                let over_chrome = egui_wants_input && state.ui_state.hovered_block.is_none();
                if over_chrome || (egui_wants_input && !zooming) {
                    return;
                }
                let scale_factor = state.scale_factor();
                state
                    .event_handler
                    .mouse_wheel(&mut state.board, delta, scale_factor);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                // Typing into a block goes to egui only
                if state.egui_ctx.wants_keyboard_input() || event.state != ElementState::Pressed
                {
                    return;
                }
                state.handle_key(&event.logical_key);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.event_handler.set_modifiers(modifiers.state());
            }

            _ => {}
        }
    }
}
