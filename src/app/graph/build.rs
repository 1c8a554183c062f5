use std::collections::HashMap;

use eframe::egui::Vec2;

use super::super::card::{CardStyle, truncate_comment};
use super::super::layout::radial_layout;
use super::super::{RenderGraph, RenderNode, ViewModel};

impl ViewModel {
    /// Rebuilds every render node and edge from the current entity graph.
    /// Node and edge state never survives a data change: positions re-seed
    /// from the radial layout and the simulation restarts from full energy.
    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        let entities = self.graph.entities();
        let positions = radial_layout(entities);

        let nodes = entities
            .iter()
            .zip(positions)
            .map(|(entity, world_pos)| {
                let card = CardStyle::for_entity(entity);
                RenderNode {
                    query: entity.query.clone(),
                    relevance: entity.relevance,
                    world_pos,
                    velocity: Vec2::ZERO,
                    pinned: None,
                    collide_radius: entity.card_size * 0.75,
                    caption: truncate_comment(&entity.comment, card.max_comment_len),
                    card,
                }
            })
            .collect::<Vec<_>>();

        let mut index_by_query = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            index_by_query.insert(node.query.clone(), index);
        }

        let mut draw_order = (0..nodes.len()).collect::<Vec<_>>();
        draw_order.sort_by(|a, b| nodes[*a].relevance.total_cmp(&nodes[*b].relevance));

        let edges = self.graph.edges();
        self.visible_node_count = nodes.len();
        self.visible_edge_count = edges.len();
        self.graph_cache = Some(RenderGraph {
            nodes,
            edges,
            index_by_query,
            root_index: 0,
            draw_order,
        });
        self.dragged = None;
        self.sim.restart();
        self.graph_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::Vec2;
    use serde_json::json;

    use crate::api::EntityGraph;

    use super::super::super::ViewModel;

    fn paris_graph() -> EntityGraph {
        let payload = json!({
            "entities": [
                {"query": "Paris", "relevance": 1.0, "card_size": 80, "comment": "capital of France"},
                {"query": "Eiffel_Tower", "relevance": 0.8, "card_size": 60, "comment": "wrought-iron lattice tower on the Champ de Mars, one of the most recognised structures in the world and the most-visited paid monument anywhere"},
            ]
        });
        serde_json::from_value::<Vec<crate::api::Entity>>(payload["entities"].clone())
            .map(EntityGraph::new)
            .expect("sample payload deserializes")
            .expect("sample payload is a valid graph")
    }

    #[test]
    fn paris_search_builds_two_cards_and_one_edge() {
        let mut model = ViewModel::new(paris_graph());
        model.rebuild_render_graph();

        let cache = model.graph_cache.as_ref().expect("render graph built");
        assert_eq!(cache.nodes.len(), 2);
        assert_eq!(cache.edges, vec![(0, 1)]);
        assert_eq!(cache.root_index, 0);
        assert_eq!(cache.nodes[0].query, "Paris");
        assert_eq!(cache.nodes[0].world_pos, Vec2::ZERO);
        assert_eq!(cache.index_by_query["Eiffel_Tower"], 1);
    }

    #[test]
    fn captions_respect_the_card_comment_budget() {
        let mut model = ViewModel::new(paris_graph());
        model.rebuild_render_graph();

        let cache = model.graph_cache.as_ref().expect("render graph built");
        assert_eq!(cache.nodes[0].caption, "capital of France");

        let eiffel = &cache.nodes[1];
        assert_eq!(eiffel.card.max_comment_len, 90);
        assert_eq!(eiffel.caption.chars().count(), 93);
        assert!(eiffel.caption.ends_with("..."));
    }

    #[test]
    fn rebuild_discards_previous_node_state() {
        let mut model = ViewModel::new(paris_graph());
        model.rebuild_render_graph();

        {
            let cache = model.graph_cache.as_mut().expect("render graph built");
            cache.nodes[1].world_pos = Vec2::splat(999.0);
            cache.nodes[1].pinned = Some(Vec2::splat(999.0));
        }

        model.rebuild_render_graph();
        let cache = model.graph_cache.as_ref().expect("render graph rebuilt");
        assert_ne!(cache.nodes[1].world_pos, Vec2::splat(999.0));
        assert!(cache.nodes[1].pinned.is_none());
    }

    #[test]
    fn more_relevant_cards_draw_later() {
        let mut model = ViewModel::new(paris_graph());
        model.rebuild_render_graph();

        let cache = model.graph_cache.as_ref().expect("render graph built");
        assert_eq!(cache.draw_order, vec![1, 0]);
    }
}
