//! Matrix builders for the per-frame transform pipeline.
//!
//! The vertex stage composes the uploaded matrices as
//! `mvp * default_translate * rotate * transform * position`.
//! Each factor is uploaded on its own; nothing here pre-multiplies them.

use glam::{Mat4, Vec3};

use crate::camera::{CameraParameters, CAMERA_TARGET, CAMERA_UP};
use crate::error::{Result, ViewerError};

/// Squared sine below which the view direction counts as parallel to up.
const PARALLEL_EPSILON: f32 = f32::EPSILON * f32::EPSILON;

/// Perspective projection composed with a look-at view of the origin.
///
/// The projection follows the GL clip convention (z in [-w, w]).
pub fn camera_matrix(camera: &CameraParameters) -> Result<Mat4> {
    Ok(projection_matrix(camera)? * view_matrix(camera.eye())?)
}

/// Right-handed perspective projection from a field of view in degrees.
pub fn projection_matrix(camera: &CameraParameters) -> Result<Mat4> {
    let CameraParameters {
        fov_y,
        aspect,
        near,
        far,
        ..
    } = *camera;

    if ![fov_y, aspect, near, far].iter().all(|v| v.is_finite()) {
        return Err(ViewerError::InvalidProjection(format!(
            "non-finite input (fov {fov_y}, aspect {aspect}, near {near}, far {far})"
        )));
    }
    if fov_y <= 0.0 || fov_y >= 180.0 {
        return Err(ViewerError::InvalidProjection(format!(
            "fov {fov_y} outside (0, 180)"
        )));
    }
    if aspect <= 0.0 {
        return Err(ViewerError::InvalidProjection(format!(
            "aspect {aspect} must be positive"
        )));
    }
    if near <= 0.0 {
        return Err(ViewerError::InvalidProjection(format!(
            "near {near} must be positive"
        )));
    }
    if far <= near {
        return Err(ViewerError::InvalidProjection(format!(
            "far {far} must exceed near {near}"
        )));
    }

    Ok(Mat4::perspective_rh_gl(fov_y.to_radians(), aspect, near, far))
}

/// Look-at view from `eye` towards the origin with +Y up.
pub fn view_matrix(eye: Vec3) -> Result<Mat4> {
    let degenerate = || ViewerError::DegenerateView {
        x: eye.x,
        y: eye.y,
        z: eye.z,
    };

    if !eye.is_finite() {
        return Err(degenerate());
    }

    // Zero when eye == target or the offset underflows.
    let direction = (CAMERA_TARGET - eye).normalize_or_zero();
    if direction.cross(CAMERA_UP).length_squared() <= PARALLEL_EPSILON {
        return Err(degenerate());
    }

    let view = Mat4::look_at_rh(eye, CAMERA_TARGET, CAMERA_UP);
    if view.is_finite() {
        Ok(view)
    } else {
        Err(degenerate())
    }
}

/// `Translate * Scale`: scaling happens in the local frame, then the
/// translation moves the object into place. Non-positive scale is allowed.
pub fn placement_matrix(offset: Vec3, scale: f32) -> Mat4 {
    Mat4::from_translation(offset) * Mat4::from_scale(Vec3::splat(scale))
}

/// Rotation of `angle_degrees` about `axis`. A zero axis yields identity.
pub fn rotation_matrix(angle_degrees: f32, axis: Vec3) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, angle_degrees.to_radians()),
        None => Mat4::IDENTITY,
    }
}

/// Identity placement snapshot taken when a figure enters the scene.
pub fn default_translate() -> [f32; 16] {
    Mat4::from_translation(Vec3::ZERO).to_cols_array()
}
