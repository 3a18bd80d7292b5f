//! Render pipeline core: the GPU seam, geometry cache, tick scheduling and
//! the per-frame submission loop.

pub mod geometry;
pub mod render_loop;
pub mod render_target;
pub mod timer;

pub use geometry::{GeometryBuffers, GeometryCache};
pub use render_loop::{LoopState, RenderLoop, TickReport, BACKGROUND};
pub use render_target::{
    Attribute, AttributeLayout, BufferKind, RenderTarget, Uniform, VEC3_F32_LAYOUT,
};
pub use timer::{FpsCounter, TickScheduler, DEFAULT_TICK_INTERVAL};
