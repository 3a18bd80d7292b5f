//! Scene mutations as values, so input collaborators can queue them and the
//! application can apply them between ticks.

use crate::camera::CameraParameter;
use crate::error::Result;
use crate::scene::{Axis, FigureKind, SceneStore};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    Append(String),
    RemoveLast,
    SetRotation { index: usize, axis: Axis, angle: f32 },
    SetTranslation { index: usize, axis: Axis, value: f32 },
    SetScale { index: usize, value: f32 },
    SetCamera { name: String, value: f32 },
}

impl SceneCommand {
    pub fn append(kind: FigureKind) -> Self {
        SceneCommand::Append(kind.name().to_string())
    }

    pub fn camera(param: CameraParameter, value: f32) -> Self {
        SceneCommand::SetCamera {
            name: param.name().to_string(),
            value,
        }
    }

    pub fn apply(&self, scene: &mut SceneStore) -> Result<()> {
        match self {
            SceneCommand::Append(kind) => scene.append(kind).map(|_| ()),
            SceneCommand::RemoveLast => {
                scene.remove_last();
                Ok(())
            }
            SceneCommand::SetRotation { index, axis, angle } => {
                scene.set_rotation(*index, *axis, *angle)
            }
            SceneCommand::SetTranslation { index, axis, value } => {
                scene.set_translation(*index, *axis, *value)
            }
            SceneCommand::SetScale { index, value } => scene.set_scale(*index, *value),
            SceneCommand::SetCamera { name, value } => scene.set_camera_parameter(name, *value),
        }
    }
}

/// Applies commands in order. Failures are logged and skipped so one bad
/// command does not drop the rest.
pub fn apply_all(scene: &mut SceneStore, commands: impl IntoIterator<Item = SceneCommand>) -> usize {
    commands
        .into_iter()
        .filter(|command| match command.apply(scene) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("ignoring {:?}: {}", command, err);
                false
            }
        })
        .count()
}
