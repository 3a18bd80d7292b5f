use glam::{Mat4, Vec3, Vec4};
use scene_viewer::camera::CameraParameters;
use scene_viewer::math::{camera_matrix, placement_matrix, projection_matrix, rotation_matrix, view_matrix};
use scene_viewer::ViewerError;

#[cfg(test)]
mod matrix_tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn camera(fov_y: f32, aspect: f32, near: f32, far: f32) -> CameraParameters {
        CameraParameters {
            fov_y,
            aspect,
            near,
            far,
            ..CameraParameters::default()
        }
    }

    #[test]
    fn test_projection_last_row_copies_negated_z() {
        let p = projection_matrix(&camera(45.0, 1.0, 1.0, 30.0)).unwrap();
        assert_eq!(p.row(3), Vec4::new(0.0, 0.0, -1.0, 0.0));

        let clip = p * Vec4::new(0.3, -0.2, -7.0, 1.0);
        assert!((clip.w - 7.0).abs() < EPS);
    }

    #[test]
    fn test_projection_maps_near_and_far_to_clip_bounds() {
        let p = projection_matrix(&camera(60.0, 1.5, 1.0, 30.0)).unwrap();

        let near = p.project_point3(Vec3::new(0.0, 0.0, -1.0));
        let far = p.project_point3(Vec3::new(0.0, 0.0, -30.0));

        assert!((near.z + 1.0).abs() < EPS);
        assert!((far.z - 1.0).abs() < EPS);
    }

    #[test]
    fn test_projection_focal_length() {
        let p = projection_matrix(&camera(90.0, 2.0, 1.0, 30.0)).unwrap();
        assert!((p.y_axis.y - 1.0).abs() < EPS);
        assert!((p.x_axis.x - 0.5).abs() < EPS);
    }

    #[test]
    fn test_projection_rejects_bad_inputs() {
        let cases = [
            camera(0.0, 1.0, 1.0, 30.0),
            camera(180.0, 1.0, 1.0, 30.0),
            camera(45.0, 0.0, 1.0, 30.0),
            camera(45.0, 1.0, 0.0, 30.0),
            camera(45.0, 1.0, 5.0, 5.0),
            camera(45.0, 1.0, 1.0, f32::INFINITY),
            camera(f32::NAN, 1.0, 1.0, 30.0),
        ];

        for case in cases {
            let err = projection_matrix(&case).unwrap_err();
            assert!(
                matches!(err, ViewerError::InvalidProjection(_)),
                "{:?} gave {:?}",
                case,
                err
            );
        }
    }

    #[test]
    fn test_view_moves_eye_to_origin_and_looks_down_negative_z() {
        let eye = Vec3::new(0.0, 3.0, 6.5);
        let v = view_matrix(eye).unwrap();

        assert!(v.transform_point3(eye).abs_diff_eq(Vec3::ZERO, EPS));
        let target = v.transform_point3(Vec3::ZERO);
        assert!(target.x.abs() < EPS && target.y.abs() < EPS);
        assert!((target.z + eye.length()).abs() < 1e-4);
    }

    #[test]
    fn test_view_rejects_degenerate_eyes() {
        assert!(matches!(
            view_matrix(Vec3::ZERO),
            Err(ViewerError::DegenerateView { .. })
        ));
        assert!(matches!(
            view_matrix(Vec3::new(0.0, 5.0, 0.0)),
            Err(ViewerError::DegenerateView { .. })
        ));
        assert!(matches!(
            view_matrix(Vec3::new(0.0, f32::NAN, 1.0)),
            Err(ViewerError::DegenerateView { .. })
        ));
    }

    #[test]
    fn test_view_near_up_axis_is_not_degenerate() {
        let eye = Vec3::new(0.01, 20.0, 0.0);
        let v = view_matrix(eye).unwrap();

        let target = v.transform_point3(Vec3::ZERO);
        assert!(target.x.abs() < 1e-3 && target.y.abs() < 1e-3);
        assert!((target.z + eye.length()).abs() < 1e-3);

        let camera = CameraParameters {
            eye: eye.to_array(),
            ..CameraParameters::default()
        };
        assert!(camera_matrix(&camera).is_ok());
    }

    #[test]
    fn test_camera_matrix_is_projection_times_view() {
        let params = CameraParameters::default();
        let expected = projection_matrix(&params).unwrap() * view_matrix(params.eye()).unwrap();
        assert!(camera_matrix(&params).unwrap().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn test_origin_lands_in_front_of_default_camera() {
        let mvp = camera_matrix(&CameraParameters::default()).unwrap();
        let clip = mvp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;

        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < EPS && ndc.y.abs() < EPS);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_placement_and_rotation_identities() {
        assert!(placement_matrix(Vec3::ZERO, 1.0).abs_diff_eq(Mat4::IDENTITY, EPS));
        assert!(rotation_matrix(0.0, Vec3::Z).abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn test_rotation_quarter_turn_about_y() {
        let r = rotation_matrix(90.0, Vec3::Y);
        let p = r.transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS));
        assert!(r.w_axis.abs_diff_eq(Vec4::W, EPS));
    }
}
