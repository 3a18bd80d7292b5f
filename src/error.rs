//! Error types for scene and matrix operations.

use thiserror::Error;

/// Result type for scene, matrix and render-loop operations.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Caller and configuration errors.
///
/// All of these are detected synchronously at the call that violates a
/// precondition. None of them is raised halfway through a render tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewerError {
    /// Perspective parameters cannot form a projection.
    #[error("invalid projection: {0}")]
    InvalidProjection(String),

    /// Eye position cannot form a look-at view towards the origin.
    #[error("degenerate view from eye ({x}, {y}, {z})")]
    DegenerateView { x: f32, y: f32, z: f32 },

    /// Figure kind not provided by the geometry source.
    #[error("unknown figure kind: {0:?}")]
    UnknownKind(String),

    /// Figure index outside the scene.
    #[error("figure index {index} out of range (scene has {len} figures)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Camera parameter name not recognized.
    #[error("unknown camera parameter: {0:?}")]
    UnknownParameter(String),

    /// Axis name other than x, y or z.
    #[error("unknown axis: {0:?}")]
    UnknownAxis(String),

    /// Render loop ticked before it was started.
    #[error("render loop is not running")]
    NotRunning,
}
