use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::command::apply_all;
use crate::config::ViewerConfig;
use crate::core::{FpsCounter, RenderLoop, TickScheduler};
use crate::panel::ControlPanel;
use crate::renderer::{GpuBuffer, SceneRenderer, SurfaceErrorAction};
use crate::scene::SceneStore;

const FPS_UPDATE_INTERVAL: f32 = 1.0;
/// Ticks that may queue up while no redraw is delivered (occluded window).
const MAX_PENDING_TICKS: u32 = 4;

/// Adds `due` ticks to the backlog, dropping what exceeds the cap.
fn queue_ticks(pending: u32, due: u32) -> u32 {
    let queued = pending.saturating_add(due);
    if queued > MAX_PENDING_TICKS {
        log::debug!("dropping {} late ticks", queued - MAX_PENDING_TICKS);
    }
    queued.min(MAX_PENDING_TICKS)
}

/// Window, GPU backend and scene wired to the winit event loop.
pub struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    scene: SceneStore,
    render_loop: RenderLoop<GpuBuffer>,
    panel: ControlPanel,
    scheduler: TickScheduler,
    pending_ticks: u32,
    last_frame_time: Instant,
    fps: FpsCounter,
    startup_error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        let mut scene = SceneStore::new().with_camera(config.camera);
        let mut panel = ControlPanel::new();

        for kind in &config.figures {
            if let Err(e) = scene.append(kind) {
                log::warn!("skipping initial figure: {}", e);
            }
        }
        for event in scene.drain_events() {
            panel.on_event(event);
        }

        let now = Instant::now();
        Self {
            render_loop: RenderLoop::new().with_clear_color(config.background),
            scheduler: TickScheduler::new(config.tick_interval(), now),
            config,
            window: None,
            renderer: None,
            scene,
            panel,
            pending_ticks: 0,
            last_frame_time: now,
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
            startup_error: None,
        }
    }

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    /// Result of the run once the event loop has returned. A failed startup
    /// is reported here so the process exits with an error.
    pub fn finish(self) -> Result<()> {
        match self.startup_error {
            Some(e) => Err(e.context("failed to start renderer")),
            None => Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("Scene Viewer")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window_width,
                        self.config.window_height,
                    )),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);

        let renderer = pollster::block_on(SceneRenderer::new(window.clone(), self.config.show_ui))?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.render_loop.start();
        self.scheduler = TickScheduler::new(self.config.tick_interval(), Instant::now());
        Ok(())
    }

    fn fail_startup(&mut self, err: anyhow::Error) {
        log::error!("startup failed: {:#}", err);
        self.startup_error = Some(err);
    }

    /// Runs one tick and presents it. Returns false when no further ticks
    /// should run in this redraw.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let Some(renderer) = &mut self.renderer else {
            return false;
        };

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        if let Some(fps) = self.fps.tick(delta) {
            log::debug!("{:.1} fps, {} figures", fps, self.scene.len());
        }

        if let Err(e) = self.render_loop.tick(&self.scene, renderer) {
            log::error!("tick failed: {}", e);
            return false;
        }

        let scene = &self.scene;
        let panel = &mut self.panel;
        let show_ui = self.config.show_ui;
        let result = renderer.finish_frame(|ctx| {
            if show_ui {
                panel.show(ctx, scene);
            }
        });

        if let Err(err) = result {
            log::warn!("surface error: {:?}", err);
            if renderer.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
                return false;
            }
        }

        // Mutations land between ticks.
        apply_all(&mut self.scene, self.panel.take_commands());
        for event in self.scene.drain_events() {
            self.panel.on_event(event);
        }
        true
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail_startup(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(renderer) = &mut self.renderer {
            if renderer.handle_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => {
                for _ in 0..std::mem::take(&mut self.pending_ticks) {
                    if !self.redraw(event_loop) {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };

        let due = self.scheduler.poll_due(Instant::now());
        if due > 0 {
            self.pending_ticks = queue_ticks(self.pending_ticks, due);
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.scheduler.next_deadline()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = &mut self.renderer {
            self.render_loop.release(renderer);
            log::info!("released GPU buffers, {} left", renderer.buffer_count());
        }
    }
}
