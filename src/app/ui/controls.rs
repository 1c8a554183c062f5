use eframe::egui::{self, Slider, Ui};

use crate::util::{display_label, format_relevance};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Layout");
        ui.add_space(4.0);

        let was_live = self.live_physics;
        ui.checkbox(&mut self.live_physics, "Live force layout");
        if self.live_physics != was_live {
            if self.live_physics {
                self.sim.restart();
            } else {
                self.sim.stop();
            }
        }

        if ui.button("Reset radial layout").clicked() {
            self.graph_dirty = true;
        }

        ui.add_space(6.0);
        ui.collapsing("Force tuning", |ui| {
            ui.add(Slider::new(&mut self.sim.repulsion, 200.0..=6000.0).text("repulsion"));
            ui.add(Slider::new(&mut self.sim.centering, 0.0..=0.2).text("centering"));
            ui.add(Slider::new(&mut self.sim.collision, 0.0..=1.5).text("collision"));
            ui.add(
                Slider::new(&mut self.sim.velocity_damping, 0.3..=0.95).text("velocity damping"),
            );
        });

        ui.separator();
        ui.heading("Highlight");
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.filter)
                    .hint_text("Filter entity labels")
                    .desired_width(180.0),
            );
            if !self.filter.is_empty() && ui.small_button("Clear").clicked() {
                self.filter.clear();
            }
        });

        ui.separator();
        ui.heading("Related entities");
        ui.add_space(4.0);
        ui.label(format!(
            "Root: {}",
            display_label(&self.graph.root().query)
        ));
        ui.add_space(2.0);

        let ranked = self.graph.ranked_by_relevance();
        if ranked.is_empty() {
            ui.label("The root entity has no related entities.");
            return;
        }

        let mut pending_selection = None;
        egui::ScrollArea::vertical()
            .id_salt("related_ranking")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for index in ranked {
                    let entity = &self.graph.entities()[index];
                    let label = format!(
                        "{}  ({})",
                        display_label(&entity.query),
                        format_relevance(entity.relevance)
                    );
                    if ui.link(label).on_hover_text(entity.query.as_str()).clicked() {
                        pending_selection = Some(entity.query.clone());
                    }
                }
            });

        if pending_selection.is_some() {
            self.set_selected(pending_selection);
        }
    }
}
