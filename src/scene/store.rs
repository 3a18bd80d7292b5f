use std::collections::VecDeque;

use crate::camera::{CameraParameter, CameraParameters};
use crate::error::{Result, ViewerError};
use crate::shapes::{BuiltinShapes, GeometrySource};

use super::figure::{Axis, Figure, FigureId, FigureKind};

/// Change notifications for UI collaborators that mirror the figure list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    FigureAdded { index: usize, id: FigureId },
    FigureRemoved { index: usize, id: FigureId },
}

/// Undrained events kept before the oldest are discarded.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Ordered figures plus camera parameters.
///
/// Figures are appended and removed at the tail only. Every mutation either
/// succeeds completely or leaves the store untouched.
///
/// Add and remove notifications queue up until [`SceneStore::drain_events`]
/// is called. Owners that mirror the figure list should drain after every
/// batch of mutations; at most [`MAX_PENDING_EVENTS`] are retained.
pub struct SceneStore {
    figures: Vec<Figure>,
    camera: CameraParameters,
    source: Box<dyn GeometrySource>,
    next_id: u64,
    events: VecDeque<SceneEvent>,
}

impl SceneStore {
    /// Empty scene backed by the built-in shape tables.
    pub fn new() -> Self {
        Self::with_source(Box::new(BuiltinShapes))
    }

    pub fn with_source(source: Box<dyn GeometrySource>) -> Self {
        Self {
            figures: Vec::new(),
            camera: CameraParameters::default(),
            source,
            next_id: 0,
            events: VecDeque::new(),
        }
    }

    pub fn with_camera(mut self, camera: CameraParameters) -> Self {
        self.camera = camera;
        self
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn figure(&self, index: usize) -> Option<&Figure> {
        self.figures.get(index)
    }

    pub fn camera(&self) -> &CameraParameters {
        &self.camera
    }

    /// Figure identities in render order.
    pub fn ids(&self) -> Vec<FigureId> {
        self.figures.iter().map(Figure::id).collect()
    }

    /// Selector labels in render order: "Object 0", "Object 1", ...
    pub fn labels(&self) -> Vec<String> {
        (0..self.figures.len()).map(|i| format!("Object {}", i)).collect()
    }

    /// Takes the notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        self.events.drain(..).collect()
    }

    /// Number of events waiting for [`SceneStore::drain_events`].
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn push_event(&mut self, event: SceneEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            if let Some(dropped) = self.events.pop_front() {
                log::debug!("scene events not drained; dropping {:?}", dropped);
            }
        }
        self.events.push_back(event);
    }

    /// Builds a figure of the named kind and appends it.
    pub fn append(&mut self, kind: &str) -> Result<FigureId> {
        let kind: FigureKind = kind.parse()?;
        Ok(self.append_kind(kind))
    }

    pub fn append_kind(&mut self, kind: FigureKind) -> FigureId {
        let id = FigureId(self.next_id);
        self.next_id += 1;

        let figure = Figure::new(id, kind, self.source.geometry(kind));
        self.figures.push(figure);

        let index = self.figures.len() - 1;
        log::info!("added {} {} as Object {}", kind, id, index);
        self.push_event(SceneEvent::FigureAdded { index, id });
        id
    }

    /// Drops the last figure. Does nothing on an empty scene.
    pub fn remove_last(&mut self) -> Option<Figure> {
        let figure = self.figures.pop()?;
        let index = self.figures.len();
        log::info!("removed {} {} (Object {})", figure.kind(), figure.id(), index);
        self.push_event(SceneEvent::FigureRemoved {
            index,
            id: figure.id(),
        });
        Some(figure)
    }

    pub fn set_rotation(&mut self, index: usize, axis: Axis, angle: f32) -> Result<()> {
        self.figure_mut(index)?.set_rotation(axis, angle);
        Ok(())
    }

    pub fn set_translation(&mut self, index: usize, axis: Axis, value: f32) -> Result<()> {
        self.figure_mut(index)?.set_translation(axis, value);
        Ok(())
    }

    pub fn set_scale(&mut self, index: usize, value: f32) -> Result<()> {
        self.figure_mut(index)?.scale = value;
        Ok(())
    }

    /// Sets one camera field by name. Values are not range-checked here;
    /// an unusable camera is reported by the render loop.
    pub fn set_camera_parameter(&mut self, name: &str, value: f32) -> Result<()> {
        let param: CameraParameter = name.parse()?;
        self.camera.set(param, value);
        Ok(())
    }

    fn figure_mut(&mut self, index: usize) -> Result<&mut Figure> {
        let len = self.figures.len();
        self.figures
            .get_mut(index)
            .ok_or(ViewerError::IndexOutOfRange { index, len })
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}
