mod common;

use common::{Call, MockTarget};
use glam::Mat4;
use scene_viewer::core::{Attribute, BufferKind, LoopState, RenderLoop, Uniform, BACKGROUND};
use scene_viewer::math::camera_matrix;
use scene_viewer::scene::Geometry;
use scene_viewer::shapes::{BuiltinShapes, GeometrySource};
use scene_viewer::{Axis, FigureKind, SceneStore, ViewerError};

#[cfg(test)]
mod render_loop_tests {
    use super::*;

    const IDENTITY: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ];

    fn running() -> RenderLoop<u32> {
        let mut render_loop = RenderLoop::new();
        render_loop.start();
        render_loop
    }

    #[test]
    fn test_tick_before_start_is_rejected() {
        let scene = SceneStore::new();
        let mut target = MockTarget::new();
        let mut render_loop: RenderLoop<u32> = RenderLoop::new();

        assert_eq!(render_loop.state(), LoopState::Idle);
        assert_eq!(
            render_loop.tick(&scene, &mut target).unwrap_err(),
            ViewerError::NotRunning
        );
        assert!(target.calls.is_empty());
    }

    #[test]
    fn test_start_twice_stays_running() {
        let mut render_loop = running();
        render_loop.start();
        assert_eq!(render_loop.state(), LoopState::Running);
    }

    #[test]
    fn test_cube_produces_one_draw_with_its_index_count() {
        let mut scene = SceneStore::new();
        scene.append("cube").unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        let report = render_loop.tick(&scene, &mut target).unwrap();

        assert_eq!(report.draw_calls, 1);
        assert!(!report.camera_stale);
        assert_eq!(target.draws(), vec![36]);
    }

    #[test]
    fn test_first_tick_call_order() {
        let mut scene = SceneStore::new();
        scene.append("cube").unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        render_loop.tick(&scene, &mut target).unwrap();

        let mvp = camera_matrix(scene.camera()).unwrap().to_cols_array();
        let figure = scene.figure(0).unwrap();
        assert_eq!(
            target.calls,
            vec![
                Call::Clear(BACKGROUND),
                Call::DepthTest,
                Call::Uniform(Uniform::Mvp, mvp),
                Call::Create(BufferKind::Vertex, 0),
                Call::Create(BufferKind::Vertex, 1),
                Call::Create(BufferKind::Index, 2),
                Call::Attribute(Attribute::Position, 0),
                Call::Attribute(Attribute::Color, 1),
                Call::Index(2),
                Call::Uniform(Uniform::Transform, figure.placement_matrix().to_cols_array()),
                Call::Uniform(Uniform::DefaultTranslate, IDENTITY),
                Call::Uniform(Uniform::Rotate, IDENTITY),
                Call::Draw(36),
            ]
        );
    }

    #[test]
    fn test_empty_scene_still_clears() {
        let scene = SceneStore::new();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        let report = render_loop.tick(&scene, &mut target).unwrap();

        assert_eq!(report.draw_calls, 0);
        assert_eq!(target.calls[0], Call::Clear(BACKGROUND));
        assert_eq!(target.calls[1], Call::DepthTest);
        assert!(target.draws().is_empty());
    }

    #[test]
    fn test_geometry_is_uploaded_once() {
        let mut scene = SceneStore::new();
        scene.append("pyramid").unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        for _ in 0..5 {
            render_loop.tick(&scene, &mut target).unwrap();
        }

        assert_eq!(target.creates(), 3);
        assert_eq!(render_loop.geometry().upload_count(), 1);
        assert_eq!(target.draws(), vec![18; 5]);
    }

    #[test]
    fn test_draws_follow_store_order() {
        let mut scene = SceneStore::new();
        scene.append("cube").unwrap();
        scene.append("pyramid").unwrap();
        scene.append("cone").unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        let report = render_loop.tick(&scene, &mut target).unwrap();

        assert_eq!(report.draw_calls, 3);
        assert_eq!(target.draws(), vec![36, 18, scene.figure(2).unwrap().geometry().index_count()]);
    }

    #[test]
    fn test_removed_figure_buffers_are_released() {
        let mut scene = SceneStore::new();
        scene.append("cube").unwrap();
        scene.append("pyramid").unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        render_loop.tick(&scene, &mut target).unwrap();
        assert_eq!(target.live_buffers(), 6);

        scene.remove_last();
        target.reset();
        render_loop.tick(&scene, &mut target).unwrap();

        assert_eq!(target.live_buffers(), 3);
        assert_eq!(target.draws(), vec![36]);
        assert_eq!(
            target.calls.iter().filter(|c| matches!(c, Call::Destroy(_))).count(),
            3
        );
        assert_eq!(render_loop.geometry().len(), 1);
    }

    #[test]
    fn test_release_destroys_everything() {
        let mut scene = SceneStore::new();
        scene.append("cone").unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        render_loop.tick(&scene, &mut target).unwrap();
        render_loop.release(&mut target);

        assert_eq!(target.live_buffers(), 0);
        assert!(render_loop.geometry().is_empty());
    }

    #[test]
    fn test_invalid_camera_reuses_last_matrix() {
        let mut scene = SceneStore::new();
        scene.append("cube").unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        render_loop.tick(&scene, &mut target).unwrap();
        let good = render_loop.last_camera().unwrap();

        scene.set_camera_parameter("fov", 0.0).unwrap();
        target.reset();
        let report = render_loop.tick(&scene, &mut target).unwrap();

        assert!(report.camera_stale);
        assert_eq!(report.draw_calls, 1);
        assert_eq!(target.uniforms(Uniform::Mvp), vec![good.to_cols_array()]);
    }

    #[test]
    fn test_invalid_camera_without_history_skips_upload() {
        let mut scene = SceneStore::new();
        scene.append("cube").unwrap();
        scene.set_camera_parameter("eye_y", 0.0).unwrap();
        scene.set_camera_parameter("eye_z", 0.0).unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        let report = render_loop.tick(&scene, &mut target).unwrap();

        assert!(report.camera_stale);
        assert!(render_loop.last_camera().is_none());
        assert!(target.uniforms(Uniform::Mvp).is_empty());
        assert_eq!(target.draws(), vec![36]);
    }

    #[test]
    fn test_camera_recovers_after_fix() {
        let mut scene = SceneStore::new();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        scene.set_camera_parameter("far", 0.5).unwrap();
        assert!(render_loop.tick(&scene, &mut target).unwrap().camera_stale);

        scene.set_camera_parameter("far", 30.0).unwrap();
        let report = render_loop.tick(&scene, &mut target).unwrap();

        assert!(!report.camera_stale);
        assert_eq!(
            render_loop.last_camera(),
            Some(camera_matrix(scene.camera()).unwrap())
        );
    }

    #[test]
    fn test_mutations_between_ticks_are_picked_up() {
        let mut scene = SceneStore::new();
        scene.append("cube").unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        render_loop.tick(&scene, &mut target).unwrap();
        scene.set_translation(0, Axis::X, 2.0).unwrap();
        target.reset();
        render_loop.tick(&scene, &mut target).unwrap();

        let transform = Mat4::from_cols_array(&target.uniforms(Uniform::Transform)[0]);
        assert_eq!(transform.w_axis.x, 2.0);
    }

    #[test]
    fn test_rotate_uniform_has_no_translation() {
        let mut scene = SceneStore::new();
        scene.append("cube").unwrap();
        scene.set_rotation(0, Axis::Y, 90.0).unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        render_loop.tick(&scene, &mut target).unwrap();

        let rotate = target.uniforms(Uniform::Rotate)[0];
        assert_eq!(&rotate[12..16], &[0.0, 0.0, 0.0, 1.0]);
    }

    /// Builtin shapes, except pyramids come back without geometry.
    struct HollowPyramids;

    impl GeometrySource for HollowPyramids {
        fn geometry(&self, kind: FigureKind) -> Geometry {
            match kind {
                FigureKind::Pyramid => Geometry {
                    vertices: Vec::new(),
                    colors: Vec::new(),
                    indices: Vec::new(),
                },
                other => BuiltinShapes.geometry(other),
            }
        }
    }

    #[test]
    fn test_empty_geometry_is_not_drawn() {
        let mut scene = SceneStore::with_source(Box::new(HollowPyramids));
        scene.append("pyramid").unwrap();
        scene.append("cube").unwrap();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        let report = render_loop.tick(&scene, &mut target).unwrap();

        assert_eq!(report.draw_calls, 1);
        assert_eq!(target.draws(), vec![36]);
        assert_eq!(target.creates(), 3);
        assert_eq!(render_loop.geometry().len(), 1);
    }

    #[test]
    fn test_frame_index_advances() {
        let scene = SceneStore::new();
        let mut target = MockTarget::new();
        let mut render_loop = running();

        let first = render_loop.tick(&scene, &mut target).unwrap();
        let second = render_loop.tick(&scene, &mut target).unwrap();

        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
    }
}
