pub mod app;
pub mod camera;
pub mod cli;
pub mod command;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod math;
pub mod panel;
pub mod renderer;
pub mod scene;
pub mod shapes;
pub mod types;

pub use camera::{CameraParameter, CameraParameters};
pub use command::SceneCommand;
pub use error::{Result, ViewerError};
pub use scene::{Axis, Figure, FigureId, FigureKind, SceneEvent, SceneStore};
