use eframe::egui::{self, Align, Button, Context, Key, Layout, TextEdit, Vec2};

use crate::api::EntityGraph;

use super::super::physics::Simulation;
use super::super::{AppState, ExplorerApp, ViewModel};

impl ExplorerApp {
    /// Top bar with the search controls. Returns true when a new search was
    /// submitted; the trigger stays disabled while a fetch is in flight.
    pub(in crate::app) fn draw_top_bar(&mut self, ctx: &Context, is_loading: bool) -> bool {
        let graph_stats = match &self.state {
            AppState::Ready(model) => Some(format!(
                "entities: {} | edges: {}",
                model.graph.node_count(),
                model.graph.edge_count()
            )),
            _ => None,
        };

        let mut submitted = false;
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("DBpedia Visual Explorer");
                    ui.separator();

                    let edit = ui.add_enabled(
                        !is_loading,
                        TextEdit::singleline(&mut self.search)
                            .hint_text("Enter entity name")
                            .desired_width(240.0),
                    );
                    let enter_pressed =
                        edit.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));

                    let can_submit = !is_loading && !self.search.trim().is_empty();
                    let search_button = ui.add_enabled(
                        can_submit,
                        Button::new(if is_loading { "Searching..." } else { "Search" }),
                    );

                    if search_button.clicked() || (enter_pressed && can_submit) {
                        submitted = true;
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(stats) = &graph_stats {
                            ui.label(stats);
                        }
                    });
                });
            });

        submitted
    }
}

impl ViewModel {
    pub(in crate::app) fn new(graph: EntityGraph) -> Self {
        Self {
            graph,
            selected: None,
            filter: String::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            live_physics: false,
            sim: Simulation::default(),
            graph_dirty: true,
            graph_cache: None,
            dragged: None,
            visible_node_count: 0,
            visible_edge_count: 0,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, is_loading: bool) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Fetching entity graph...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        if self.selected != selected {
            self.selected = selected;
        }
    }
}
