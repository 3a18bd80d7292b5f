use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Point the camera always looks at.
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;
/// Fixed camera up vector.
pub const CAMERA_UP: Vec3 = Vec3::Y;

/// Perspective camera parameters, mutated in place by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParameters {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Eye position in world space.
    pub eye: [f32; 3],
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            fov_y: 45.0,
            aspect: 1.0,
            near: 1.0,
            far: 30.0,
            eye: [0.0, 3.0, 6.5],
        }
    }
}

impl CameraParameters {
    pub fn eye(&self) -> Vec3 {
        Vec3::from_array(self.eye)
    }

    pub fn get(&self, param: CameraParameter) -> f32 {
        match param {
            CameraParameter::Fov => self.fov_y,
            CameraParameter::Aspect => self.aspect,
            CameraParameter::Near => self.near,
            CameraParameter::Far => self.far,
            CameraParameter::EyeX => self.eye[0],
            CameraParameter::EyeY => self.eye[1],
            CameraParameter::EyeZ => self.eye[2],
        }
    }

    pub fn set(&mut self, param: CameraParameter, value: f32) {
        match param {
            CameraParameter::Fov => self.fov_y = value,
            CameraParameter::Aspect => self.aspect = value,
            CameraParameter::Near => self.near = value,
            CameraParameter::Far => self.far = value,
            CameraParameter::EyeX => self.eye[0] = value,
            CameraParameter::EyeY => self.eye[1] = value,
            CameraParameter::EyeZ => self.eye[2] = value,
        }
    }
}

/// One named field of [`CameraParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraParameter {
    Fov,
    Aspect,
    Near,
    Far,
    EyeX,
    EyeY,
    EyeZ,
}

impl CameraParameter {
    pub const ALL: [CameraParameter; 7] = [
        CameraParameter::Fov,
        CameraParameter::Aspect,
        CameraParameter::Near,
        CameraParameter::Far,
        CameraParameter::EyeX,
        CameraParameter::EyeY,
        CameraParameter::EyeZ,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CameraParameter::Fov => "fov",
            CameraParameter::Aspect => "aspect",
            CameraParameter::Near => "near",
            CameraParameter::Far => "far",
            CameraParameter::EyeX => "eye_x",
            CameraParameter::EyeY => "eye_y",
            CameraParameter::EyeZ => "eye_z",
        }
    }
}

impl FromStr for CameraParameter {
    type Err = ViewerError;

    /// Accepts the snake_case names plus the control ids of the old web viewer.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "fov" | "perspectiveFov" => Ok(CameraParameter::Fov),
            "aspect" | "perspectiveAspect" => Ok(CameraParameter::Aspect),
            "near" | "perspectiveNear" => Ok(CameraParameter::Near),
            "far" | "perspectiveFar" => Ok(CameraParameter::Far),
            "eye_x" | "cameraX" => Ok(CameraParameter::EyeX),
            "eye_y" | "cameraY" => Ok(CameraParameter::EyeY),
            "eye_z" | "cameraZ" => Ok(CameraParameter::EyeZ),
            other => Err(ViewerError::UnknownParameter(other.to_string())),
        }
    }
}
