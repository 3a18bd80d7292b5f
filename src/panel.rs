//! On-screen controls. Widgets never touch the scene directly; every change is
//! queued as a [`SceneCommand`] and applied after the frame is submitted.

use std::ops::RangeInclusive;

use crate::camera::CameraParameter;
use crate::command::SceneCommand;
use crate::scene::{Axis, Figure, FigureKind, SceneEvent, SceneStore};

const ROTATE_RANGE: RangeInclusive<f32> = -180.0..=180.0;
const MOVE_RANGE: RangeInclusive<f32> = -5.0..=5.0;
// Negative sizes mirror the figure.
const SIZE_RANGE: RangeInclusive<f32> = -3.0..=3.0;

fn camera_range(param: CameraParameter) -> RangeInclusive<f32> {
    match param {
        CameraParameter::Fov => 1.0..=179.0,
        CameraParameter::Aspect => 0.1..=4.0,
        CameraParameter::Near => 0.1..=10.0,
        CameraParameter::Far => 1.0..=100.0,
        CameraParameter::EyeX | CameraParameter::EyeY | CameraParameter::EyeZ => -20.0..=20.0,
    }
}

fn camera_label(param: CameraParameter) -> &'static str {
    match param {
        CameraParameter::Fov => "Field of view",
        CameraParameter::Aspect => "Aspect",
        CameraParameter::Near => "Near",
        CameraParameter::Far => "Far",
        CameraParameter::EyeX => "Camera X",
        CameraParameter::EyeY => "Camera Y",
        CameraParameter::EyeZ => "Camera Z",
    }
}

/// Control panel state that lives across frames.
#[derive(Debug, Default)]
pub struct ControlPanel {
    selected: Option<usize>,
    commands: Vec<SceneCommand>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the figure the transform sliders act on.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    /// Commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Keeps the selection in step with the figure list.
    pub fn on_event(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::FigureAdded { index, .. } => self.selected = Some(index),
            SceneEvent::FigureRemoved { index, .. } => {
                if self.selected.is_some_and(|selected| selected >= index) {
                    self.selected = index.checked_sub(1);
                }
            }
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, scene: &SceneStore) {
        egui::Window::new("Figures")
            .title_bar(true)
            .resizable(false)
            .default_pos(egui::pos2(10.0, 10.0))
            .default_width(240.0)
            .show(ctx, |ui| {
                self.figure_buttons(ui, scene);

                ui.add_space(5.0);
                ui.separator();
                ui.add_space(5.0);

                self.object_selector(ui, scene);

                let selected = self
                    .selected
                    .and_then(|index| scene.figure(index).map(|figure| (index, figure)));
                match selected {
                    Some((index, figure)) => self.transform_sliders(ui, index, figure),
                    None => {
                        ui.label(egui::RichText::new("No object selected").color(egui::Color32::GRAY));
                    }
                }
            });

        egui::Window::new("Camera")
            .title_bar(true)
            .resizable(false)
            .default_pos(egui::pos2(10.0, 420.0))
            .default_width(240.0)
            .show(ctx, |ui| {
                for param in CameraParameter::ALL {
                    let mut value = scene.camera().get(param);
                    let slider = egui::Slider::new(&mut value, camera_range(param))
                        .text(camera_label(param));
                    if ui.add(slider).changed() {
                        self.commands.push(SceneCommand::camera(param, value));
                    }
                }
            });
    }

    fn figure_buttons(&mut self, ui: &mut egui::Ui, scene: &SceneStore) {
        ui.horizontal(|ui| {
            for kind in FigureKind::ALL {
                if ui.button(format!("Add {}", kind)).clicked() {
                    self.commands.push(SceneCommand::append(kind));
                }
            }
        });

        let remove = ui.add_enabled(!scene.is_empty(), egui::Button::new("Remove last"));
        if remove.clicked() {
            self.commands.push(SceneCommand::RemoveLast);
        }
    }

    fn object_selector(&mut self, ui: &mut egui::Ui, scene: &SceneStore) {
        let labels = scene.labels();
        let current = self
            .selected
            .and_then(|index| labels.get(index))
            .map_or("-", String::as_str)
            .to_string();

        egui::ComboBox::from_label("Object")
            .selected_text(current)
            .show_ui(ui, |ui| {
                for (index, label) in labels.iter().enumerate() {
                    ui.selectable_value(&mut self.selected, Some(index), label.as_str());
                }
            });
    }

    fn transform_sliders(&mut self, ui: &mut egui::Ui, index: usize, figure: &Figure) {
        ui.label(format!("{} {}", figure.kind(), figure.id()));

        let active = [figure.rotate_x, figure.rotate_y, figure.rotate_z];
        for (axis, selector) in Axis::ALL.into_iter().zip(active) {
            let mut angle = if selector == 1.0 { figure.angle } else { 0.0 };
            let slider = egui::Slider::new(&mut angle, ROTATE_RANGE)
                .text(format!("Rotate {}", axis.name()));
            if ui.add(slider).changed() {
                self.commands.push(SceneCommand::SetRotation { index, axis, angle });
            }
        }

        let offset = [figure.move_x, figure.move_y, figure.move_z];
        for (axis, mut value) in Axis::ALL.into_iter().zip(offset) {
            let slider =
                egui::Slider::new(&mut value, MOVE_RANGE).text(format!("Move {}", axis.name()));
            if ui.add(slider).changed() {
                self.commands.push(SceneCommand::SetTranslation { index, axis, value });
            }
        }

        let mut scale = figure.scale;
        if ui
            .add(egui::Slider::new(&mut scale, SIZE_RANGE).text("Size"))
            .changed()
        {
            self.commands.push(SceneCommand::SetScale { index, value: scale });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::FigureId;

    #[test]
    fn test_selects_new_figure() {
        let mut panel = ControlPanel::new();
        panel.on_event(SceneEvent::FigureAdded { index: 0, id: FigureId(0) });
        panel.on_event(SceneEvent::FigureAdded { index: 1, id: FigureId(1) });
        assert_eq!(panel.selected(), Some(1));
    }

    #[test]
    fn test_removal_clamps_selection() {
        let mut panel = ControlPanel::new();
        panel.select(Some(1));
        panel.on_event(SceneEvent::FigureRemoved { index: 1, id: FigureId(1) });
        assert_eq!(panel.selected(), Some(0));

        panel.on_event(SceneEvent::FigureRemoved { index: 0, id: FigureId(0) });
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn test_removal_keeps_earlier_selection() {
        let mut panel = ControlPanel::new();
        panel.select(Some(0));
        panel.on_event(SceneEvent::FigureRemoved { index: 2, id: FigureId(2) });
        assert_eq!(panel.selected(), Some(0));
    }

    #[test]
    fn test_idle_frame_queues_nothing() {
        let mut scene = SceneStore::new();
        scene.append("cube").unwrap();

        let mut panel = ControlPanel::new();
        for event in scene.drain_events() {
            panel.on_event(event);
        }

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx, &scene));

        assert!(panel.take_commands().is_empty());
        assert_eq!(panel.selected(), Some(0));
    }
}
