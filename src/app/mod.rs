use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::api::{ApiClient, EntityGraph};

mod card;
mod graph;
mod layout;
mod physics;
mod render_utils;
mod ui;

use card::CardStyle;
use physics::Simulation;

pub struct ExplorerApp {
    client: Arc<ApiClient>,
    search: String,
    state: AppState,
    fetch_rx: Option<Receiver<FetchResult>>,
}

type FetchResult = Result<EntityGraph, String>;

enum AppState {
    Idle,
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: EntityGraph,
    selected: Option<String>,
    filter: String,
    pan: Vec2,
    zoom: f32,
    live_physics: bool,
    sim: Simulation,
    graph_dirty: bool,
    graph_cache: Option<RenderGraph>,
    dragged: Option<usize>,
    visible_node_count: usize,
    visible_edge_count: usize,
}

struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<(usize, usize)>,
    index_by_query: HashMap<String, usize>,
    root_index: usize,
    /// Lowest relevance first, so the most relevant cards paint on top.
    draw_order: Vec<usize>,
}

struct RenderNode {
    query: String,
    relevance: f32,
    world_pos: Vec2,
    velocity: Vec2,
    /// Drag pin; while set the simulation may not move this node.
    pinned: Option<Vec2>,
    collide_radius: f32,
    card: CardStyle,
    caption: String,
}

impl ExplorerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        api_base: String,
        initial_query: Option<String>,
    ) -> Self {
        let mut app = Self {
            client: Arc::new(ApiClient::new(api_base)),
            search: String::new(),
            state: AppState::Idle,
            fetch_rx: None,
        };

        if let Some(query) = initial_query {
            app.search = query;
            app.submit_search();
        }

        app
    }

    fn submit_search(&mut self) {
        if self.fetch_rx.is_some() {
            return;
        }

        // DBpedia resource names use underscores where titles have spaces.
        let query = self.search.trim().replace(' ', "_");
        if query.is_empty() {
            return;
        }

        log::info!("searching for {query:?}");
        self.fetch_rx = Some(Self::spawn_fetch(Arc::clone(&self.client), query));
    }

    fn spawn_fetch(client: Arc<ApiClient>, query: String) -> Receiver<FetchResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = client
                .fetch_entity_graph(&query)
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn poll_fetch(&mut self) {
        let Some(rx) = self.fetch_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(graph)) => {
                self.state = AppState::Ready(Box::new(ViewModel::new(graph)));
            }
            Ok(Err(message)) => {
                log::warn!("search failed: {message}");
                self.state = AppState::Error(message);
            }
            Err(TryRecvError::Empty) => {
                self.fetch_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                self.state = AppState::Error("Background fetch worker disconnected".to_owned());
            }
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_fetch();
        let is_loading = self.fetch_rx.is_some();

        if self.draw_top_bar(ctx, is_loading) {
            self.submit_search();
        }

        let mut resubmit = false;
        match &mut self.state {
            AppState::Idle => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        if is_loading {
                            ui.heading("Fetching entity graph...");
                            ui.add_space(8.0);
                            ui.spinner();
                        } else {
                            ui.heading("DBpedia Visual Explorer");
                            ui.add_space(8.0);
                            ui.label(
                                "Enter an entity name above to explore it and its related entities.",
                            );
                        }
                    });
                });
            }
            AppState::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    if is_loading {
                        ui.vertical_centered(|ui| {
                            ui.add_space(120.0);
                            ui.heading("Fetching entity graph...");
                            ui.add_space(8.0);
                            ui.spinner();
                        });
                        return;
                    }

                    ui.heading("Search failed");
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("Search again").clicked() {
                        resubmit = true;
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, is_loading);
            }
        }

        if resubmit {
            self.submit_search();
        }
    }
}
