//! Scene state: figures and the camera they are viewed through.

mod figure;
mod store;

pub use figure::{Axis, Figure, FigureId, FigureKind, Geometry};
pub use store::{SceneEvent, SceneStore, MAX_PENDING_EVENTS};
