use meshspin_common::MeshKind;
use meshspin_controls::{Action, ControlState, Speed};
use meshspin_scene::Scene;

/// egui overlay: a slider and numeric field per mesh at the top, visibility
/// toggles at the bottom.
///
/// The panel never mutates the viewport directly; it reports [`Action`]s
/// that the caller applies before the next tick.
pub struct ControlPanel {
    pub visible: bool,
    /// Numeric field contents. May hold text that failed validation until
    /// the field loses focus.
    speed_text: [String; 3],
}

impl ControlPanel {
    pub fn new(controls: &ControlState) -> Self {
        Self {
            visible: true,
            speed_text: MeshKind::ALL.map(|kind| controls.speed(kind).to_string()),
        }
    }

    pub fn speed_text(&self, kind: MeshKind) -> &str {
        &self.speed_text[kind.index()]
    }

    /// Only user moves to a new value become actions. egui snaps the bound
    /// value to the step grid on plain redraws.
    fn slider_moved(
        &mut self,
        kind: MeshKind,
        current: Speed,
        value: f32,
        by_user: bool,
    ) -> Option<Action> {
        if !by_user || value == current.get() {
            return None;
        }
        self.speed_text[kind.index()] = format!("{value:.3}");
        Some(Action::SetSpeed(kind, value))
    }

    fn text_edited(&self, kind: MeshKind) -> Action {
        Action::SetSpeedText(kind, self.speed_text[kind.index()].clone())
    }

    /// On blur, drop text the controls would not accept.
    fn text_blurred(&mut self, kind: MeshKind, controls: &ControlState) {
        let text = &mut self.speed_text[kind.index()];
        if text.parse::<Speed>().is_err() {
            *text = controls.speed(kind).to_string();
        }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        controls: &ControlState,
        scene: &Scene,
        actions: &mut Vec<Action>,
    ) {
        if !self.visible {
            return;
        }

        egui::Area::new(egui::Id::new("speed_controls"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 16.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    for kind in MeshKind::ALL {
                        ui.horizontal(|ui| {
                            ui.label(format!("{kind} Speed:"));

                            let current = controls.speed(kind);
                            let mut value = current.get();
                            let slider = ui.add(
                                egui::Slider::new(&mut value, Speed::MIN..=Speed::MAX)
                                    .step_by(Speed::STEP as f64)
                                    .show_value(false),
                            );
                            let by_user = slider.changed()
                                && (slider.dragged() || slider.clicked() || slider.has_focus());
                            if let Some(action) = self.slider_moved(kind, current, value, by_user)
                            {
                                actions.push(action);
                            }

                            let field = ui.add(
                                egui::TextEdit::singleline(&mut self.speed_text[kind.index()])
                                    .desired_width(56.0),
                            );
                            if field.changed() {
                                actions.push(self.text_edited(kind));
                            }
                            if field.lost_focus() {
                                self.text_blurred(kind, controls);
                            }
                        });
                    }
                });
            });

        egui::Area::new(egui::Id::new("visibility_toggles"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -16.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for kind in MeshKind::ALL {
                        let button = ui
                            .button(format!("Toggle {kind}"))
                            .on_hover_text(if scene.mesh(kind).visible {
                                "visible"
                            } else {
                                "hidden"
                            });
                        if button.clicked() {
                            actions.push(Action::ToggleVisibility(kind));
                        }
                    }
                });
            });
    }
}
