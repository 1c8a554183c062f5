use eframe::egui::{self, RichText, Ui};

use crate::util::{display_label, format_relevance};

use super::super::ViewModel;
use super::super::card::thumbnail_source;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Entity Details");
        ui.add_space(6.0);

        let Some(selected_query) = self.selected.clone() else {
            ui.label("Select an entity card in the graph.");
            return;
        };

        let Some(entity) = self.graph.entity(&selected_query) else {
            ui.label("The selected entity is not part of the current graph.");
            return;
        };

        let title = display_label(&entity.query);
        let relevance = entity.relevance;
        let card_size = entity.card_size;
        let comment = entity.comment.clone();
        let has_thumbnail = entity
            .thumbnail
            .as_deref()
            .is_some_and(|url| !url.is_empty());
        let image_source = thumbnail_source(entity).to_string();
        let root_query = self.graph.root().query.clone();
        let is_root = selected_query == root_query;

        ui.label(RichText::new(title).strong());
        ui.small(selected_query.as_str());
        ui.add_space(6.0);

        ui.label(format!("Relevance: {}", format_relevance(relevance)));
        ui.label(format!("Card size: {card_size:.0}"));

        let mut select_root = false;
        if is_root {
            ui.label("Root entity of this search.");
        } else {
            ui.horizontal(|ui| {
                ui.label("Related to:");
                if ui.link(display_label(&root_query)).clicked() {
                    select_root = true;
                }
            });
        }

        ui.separator();
        ui.label(RichText::new("Abstract").strong());
        if comment.is_empty() {
            ui.label("No abstract available for this entity.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("abstract_scroll")
                .max_height(260.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(comment);
                });
        }

        ui.separator();
        ui.label(RichText::new("Thumbnail").strong());
        if has_thumbnail {
            ui.hyperlink_to("Open thumbnail", image_source);
        } else {
            ui.label("No thumbnail for this entity.");
            ui.hyperlink_to("Placeholder image", image_source);
        }

        if select_root {
            self.set_selected(Some(root_query));
        }
    }
}
