use glam::Mat4;

use crate::error::{Result, ViewerError};
use crate::math::camera_matrix;
use crate::scene::SceneStore;

use super::geometry::GeometryCache;
use super::render_target::{RenderTarget, Uniform};

/// Background color used to clear every frame.
pub const BACKGROUND: [f32; 4] = [0.2, 0.227, 0.271, 1.0];

/// Render loop lifecycle. There is no way back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Summary of one executed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub frame_index: u64,
    pub draw_calls: u32,
    /// The camera could not be computed this tick and the last good matrix
    /// (if any) was reused.
    pub camera_stale: bool,
}

/// Drives one full scene submission per tick.
pub struct RenderLoop<B> {
    state: LoopState,
    geometry: GeometryCache<B>,
    last_camera: Option<Mat4>,
    camera_failing: bool,
    frame_index: u64,
    clear_color: [f32; 4],
}

impl<B> RenderLoop<B> {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            geometry: GeometryCache::new(),
            last_camera: None,
            camera_failing: false,
            frame_index: 0,
            clear_color: BACKGROUND,
        }
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn geometry(&self) -> &GeometryCache<B> {
        &self.geometry
    }

    /// Camera matrix uploaded by the most recent successful tick.
    pub fn last_camera(&self) -> Option<Mat4> {
        self.last_camera
    }

    /// Enters `Running`. Call once the GPU context and shaders are ready.
    pub fn start(&mut self) {
        match self.state {
            LoopState::Idle => {
                log::info!("render loop started");
                self.state = LoopState::Running;
            }
            LoopState::Running => log::warn!("render loop already running"),
        }
    }

    /// Executes one tick against `target`.
    ///
    /// Scene mutations made between ticks are picked up here; nothing in the
    /// scene changes while a tick runs.
    pub fn tick<T>(&mut self, scene: &SceneStore, target: &mut T) -> Result<TickReport>
    where
        T: RenderTarget<Buffer = B>,
    {
        if self.state != LoopState::Running {
            return Err(ViewerError::NotRunning);
        }

        target.clear(self.clear_color);
        target.enable_depth_test();

        let camera_stale = self.upload_camera(scene, target);

        self.geometry.evict(target, &scene.ids());

        let mut draw_calls = 0;
        for figure in scene.figures() {
            if figure.vertices().is_empty() || figure.indices().is_empty() {
                continue;
            }

            let index_count = self.geometry.bind(target, figure);

            target.set_uniform(Uniform::Transform, &figure.placement_matrix().to_cols_array());
            target.set_uniform(Uniform::DefaultTranslate, &figure.default_translate);
            target.set_uniform(Uniform::Rotate, &figure.rotation_matrix().to_cols_array());

            target.draw_indexed(index_count);
            draw_calls += 1;
        }

        let report = TickReport {
            frame_index: self.frame_index,
            draw_calls,
            camera_stale,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        Ok(report)
    }

    /// Releases all cached geometry.
    pub fn release<T>(&mut self, target: &mut T)
    where
        T: RenderTarget<Buffer = B>,
    {
        self.geometry.clear(target);
    }

    /// Uploads the camera matrix; returns true if a stale one had to be used.
    fn upload_camera<T>(&mut self, scene: &SceneStore, target: &mut T) -> bool
    where
        T: RenderTarget<Buffer = B>,
    {
        match camera_matrix(scene.camera()) {
            Ok(matrix) => {
                if self.camera_failing {
                    log::info!("frame {}: camera valid again", self.frame_index);
                    self.camera_failing = false;
                }
                self.last_camera = Some(matrix);
                target.set_uniform(Uniform::Mvp, &matrix.to_cols_array());
                false
            }
            Err(err) => {
                // Warn once per failure streak, not every frame.
                if !self.camera_failing {
                    log::warn!("frame {}: keeping previous camera: {}", self.frame_index, err);
                    self.camera_failing = true;
                }
                if let Some(matrix) = self.last_camera {
                    target.set_uniform(Uniform::Mvp, &matrix.to_cols_array());
                }
                true
            }
        }
    }
}

impl<B> Default for RenderLoop<B> {
    fn default() -> Self {
        Self::new()
    }
}
