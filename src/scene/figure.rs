use std::fmt;
use std::str::FromStr;

use glam::{Mat4, Vec3};

use crate::error::ViewerError;
use crate::math::{default_translate, placement_matrix, rotation_matrix};

/// Stable identity of a figure for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FigureId(pub u64);

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Solid kinds offered by the geometry source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureKind {
    Cube,
    Pyramid,
    Cone,
}

impl FigureKind {
    pub const ALL: [FigureKind; 3] = [FigureKind::Cube, FigureKind::Pyramid, FigureKind::Cone];

    pub const fn name(self) -> &'static str {
        match self {
            FigureKind::Cube => "cube",
            FigureKind::Pyramid => "pyramid",
            FigureKind::Cone => "cone",
        }
    }
}

impl fmt::Display for FigureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FigureKind {
    type Err = ViewerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "cube" => Ok(FigureKind::Cube),
            "pyramid" => Ok(FigureKind::Pyramid),
            "cone" | "conus" => Ok(FigureKind::Cone),
            other => Err(ViewerError::UnknownKind(other.to_string())),
        }
    }
}

/// Rotation or translation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub const fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl FromStr for Axis {
    type Err = ViewerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            other => Err(ViewerError::UnknownAxis(other.to_string())),
        }
    }
}

/// Raw triangle-list geometry for one solid.
///
/// Preconditions (documented, not checked per frame): `colors` is
/// index-aligned with `vertices`, every index is `< vertices.len()`, the
/// index count is a multiple of 3, and there are at most 256 vertices since
/// indices are 8-bit.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u8>,
}

impl Geometry {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// One solid placed in the scene.
///
/// Geometry is fixed at creation; the transform fields are public and may be
/// set to any value, including a negative scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    id: FigureId,
    kind: FigureKind,
    geometry: Geometry,
    pub move_x: f32,
    pub move_y: f32,
    pub move_z: f32,
    pub scale: f32,
    /// Rotation angle in degrees.
    pub angle: f32,
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub rotate_z: f32,
    /// Column-major placement snapshot taken at creation.
    pub default_translate: [f32; 16],
}

impl Figure {
    pub fn new(id: FigureId, kind: FigureKind, geometry: Geometry) -> Self {
        Self {
            id,
            kind,
            geometry,
            move_x: 0.0,
            move_y: 0.0,
            move_z: 0.0,
            scale: 1.0,
            angle: 0.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            default_translate: default_translate(),
        }
    }

    pub fn id(&self) -> FigureId {
        self.id
    }

    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.geometry.vertices
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.geometry.colors
    }

    pub fn indices(&self) -> &[u8] {
        &self.geometry.indices
    }

    pub fn offset(&self) -> Vec3 {
        Vec3::new(self.move_x, self.move_y, self.move_z)
    }

    pub fn rotation_axis(&self) -> Vec3 {
        Vec3::new(self.rotate_x, self.rotate_y, self.rotate_z)
    }

    /// Selects `axis` as the only rotation axis and sets the angle.
    pub fn set_rotation(&mut self, axis: Axis, angle: f32) {
        let (x, y, z) = match axis {
            Axis::X => (1.0, 0.0, 0.0),
            Axis::Y => (0.0, 1.0, 0.0),
            Axis::Z => (0.0, 0.0, 1.0),
        };
        self.rotate_x = x;
        self.rotate_y = y;
        self.rotate_z = z;
        self.angle = angle;
    }

    pub fn set_translation(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.move_x = value,
            Axis::Y => self.move_y = value,
            Axis::Z => self.move_z = value,
        }
    }

    /// `u_Transform`: translate then uniform scale.
    pub fn placement_matrix(&self) -> Mat4 {
        placement_matrix(self.offset(), self.scale)
    }

    /// `u_Rotate`: rotation about the selected axis.
    pub fn rotation_matrix(&self) -> Mat4 {
        rotation_matrix(self.angle, self.rotation_axis())
    }

    /// `u_DefaultTranslate`.
    pub fn default_translate_matrix(&self) -> Mat4 {
        Mat4::from_cols_array(&self.default_translate)
    }
}
