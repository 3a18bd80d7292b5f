//! Built-in geometry tables for the solids a user can add.

mod cone;
mod cube;
mod palette;
mod pyramid;

use crate::scene::{FigureKind, Geometry};

pub use cone::{cone, CONE_SEGMENTS};
pub use cube::cube;
pub use pyramid::pyramid;

/// Maps a figure kind to its static geometry.
pub trait GeometrySource {
    fn geometry(&self, kind: FigureKind) -> Geometry;
}

/// Cube, pyramid and cone tables compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinShapes;

impl GeometrySource for BuiltinShapes {
    fn geometry(&self, kind: FigureKind) -> Geometry {
        match kind {
            FigureKind::Cube => cube(),
            FigureKind::Pyramid => pyramid(),
            FigureKind::Cone => cone(),
        }
    }
}
