use std::collections::HashSet;

use eframe::egui::{
    self, Align2, Color32, FontId, Rect, Sense, Stroke, StrokeKind, Ui, Vec2, pos2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::util::{display_label, format_relevance};

use super::super::render_utils::{
    blend_color, dim_color, draw_background, relevance_color, world_to_screen,
};
use super::super::{RenderNode, ViewModel};

const SELECTED_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
const FILTER_MATCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);
const CARD_FILL: Color32 = Color32::from_rgb(32, 37, 46);

struct CardState {
    selected: bool,
    hovered: bool,
    filter_match: bool,
    dimmed: bool,
}

impl ViewModel {
    fn filter_matches(&self) -> Option<HashSet<usize>> {
        let query = self.filter.trim();
        if query.is_empty() {
            return None;
        }
        let cache = self.graph_cache.as_ref()?;

        let matcher = SkimMatcherV2::default();
        Some(
            cache
                .nodes
                .iter()
                .enumerate()
                .filter_map(|(index, node)| {
                    let label = display_label(&node.query);
                    matcher
                        .fuzzy_match(&label, query)
                        .or_else(|| {
                            matcher.fuzzy_match(
                                &label.to_ascii_lowercase(),
                                &query.to_ascii_lowercase(),
                            )
                        })
                        .map(|_score| index)
                })
                .collect(),
        )
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let mut physics_moving = false;
        if self.live_physics
            && let Some(cache) = self.graph_cache.as_mut()
        {
            physics_moving = self.sim.step(&mut cache.nodes);
        }

        let pan = self.pan;
        let zoom = self.zoom;
        let filter_matches = self.filter_matches();
        let selected = self.selected.clone();

        let Some(cache) = self.graph_cache.as_ref() else {
            return;
        };

        let mut screen_rects = Vec::with_capacity(cache.nodes.len());
        for node in &cache.nodes {
            let center = world_to_screen(rect, pan, zoom, node.world_pos);
            screen_rects.push(Rect::from_center_size(
                center,
                Vec2::splat(node.card.card_size * zoom),
            ));
        }
        self.visible_node_count = screen_rects
            .iter()
            .filter(|card_rect| rect.intersects(**card_rect))
            .count();

        let hovered = Self::hovered_card(ui, &cache.draw_order, &screen_rects);
        if hovered.is_some() || self.dragged.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = if self.dragged.is_some() {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::PointingHand
                };
            });
        }

        let selected_index = selected
            .as_deref()
            .and_then(|query| cache.index_by_query.get(query).copied());
        let zoom_sqrt = zoom.sqrt();
        let mut visible_edges = 0usize;
        for &(source, target) in &cache.edges {
            let start = screen_rects[source].center();
            let end = screen_rects[target].center();
            if !rect.intersects(Rect::from_two_pos(start, end)) {
                continue;
            }

            let edge_selected =
                selected_index.is_some_and(|index| index == source || index == target);
            let (width, color) = if edge_selected {
                (
                    (2.6 * zoom_sqrt).clamp(1.4, 4.6),
                    Color32::from_rgb(246, 206, 104),
                )
            } else {
                (
                    (1.2 * zoom_sqrt).clamp(0.6, 3.2),
                    Color32::from_rgba_unmultiplied(96, 102, 112, 170),
                )
            };
            painter.line_segment([start, end], Stroke::new(width, color));
            visible_edges += 1;
        }
        self.visible_edge_count = visible_edges;

        let filter_active = filter_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());
        for &index in &cache.draw_order {
            let card_rect = screen_rects[index];
            if !rect.intersects(card_rect) {
                continue;
            }

            let node = &cache.nodes[index];
            let is_match = filter_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));
            draw_entity_card(
                &painter,
                rect,
                node,
                card_rect,
                zoom,
                CardState {
                    selected: selected_index == Some(index),
                    hovered: hovered == Some(index),
                    filter_match: is_match,
                    dimmed: filter_active && !is_match,
                },
            );
        }

        if let Some(hover_index) = hovered {
            let node = &cache.nodes[hover_index];
            painter.text(
                rect.left_top() + egui::vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "{}  |  relevance {}  |  card {:.0}",
                    display_label(&node.query),
                    format_relevance(node.relevance),
                    node.card.card_size
                ),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        let pending_selection = if response.clicked_by(egui::PointerButton::Primary) {
            Some(hovered.map(|index| cache.nodes[index].query.clone()))
        } else {
            None
        };

        self.handle_node_drag(rect, &response, hovered);

        if physics_moving || response.dragged() {
            ui.ctx().request_repaint();
        }

        if let Some(selection) = pending_selection {
            self.set_selected(selection);
        }
    }
}

fn draw_entity_card(
    painter: &egui::Painter,
    viewport: Rect,
    node: &RenderNode,
    card_rect: Rect,
    zoom: f32,
    state: CardState,
) {
    let accent_base = relevance_color(node.relevance);
    let accent = if state.hovered {
        Color32::from_rgb(255, 164, 101)
    } else if state.selected {
        SELECTED_COLOR
    } else if state.filter_match {
        FILTER_MATCH_COLOR
    } else if state.dimmed {
        dim_color(accent_base, 0.45)
    } else {
        accent_base
    };
    let fill = if state.selected {
        blend_color(CARD_FILL, SELECTED_COLOR, 0.18)
    } else if state.dimmed {
        dim_color(CARD_FILL, 0.6)
    } else {
        CARD_FILL
    };

    let corner = (6.0 * zoom).clamp(1.0, 18.0);
    painter.rect_filled(card_rect, corner, fill);
    let stroke_width = if state.selected || state.hovered {
        2.0
    } else {
        1.2
    };
    painter.rect_stroke(
        card_rect,
        corner,
        Stroke::new(stroke_width, accent),
        StrokeKind::Inside,
    );
    if state.selected {
        painter.rect_stroke(
            card_rect.expand(3.0),
            corner + 3.0,
            Stroke::new(1.2, Color32::from_rgba_unmultiplied(245, 206, 93, 140)),
            StrokeKind::Outside,
        );
    }

    let clipped = painter.with_clip_rect(card_rect.intersect(viewport));
    let padding = (6.0 * zoom).clamp(1.0, 12.0);
    let text_color = if state.dimmed {
        Color32::from_gray(120)
    } else {
        Color32::from_gray(235)
    };

    // Thumbnails are remote URLs; the card shows a framed block with the
    // entity's initial, sized by the image formula.
    let image_side = (node.card.image_size * zoom)
        .min(card_rect.width() - padding * 2.0)
        .max(2.0);
    let image_rect = Rect::from_center_size(
        pos2(
            card_rect.center().x,
            card_rect.top() + padding + image_side * 0.5,
        ),
        Vec2::splat(image_side),
    );
    clipped.rect_filled(image_rect, corner * 0.6, Color32::from_rgb(45, 52, 64));
    clipped.rect_stroke(
        image_rect,
        corner * 0.6,
        Stroke::new(1.0, dim_color(accent, 0.8)),
        StrokeKind::Inside,
    );

    let label = display_label(&node.query);
    let initial = label
        .chars()
        .next()
        .map(|first| first.to_uppercase().to_string())
        .unwrap_or_default();
    clipped.text(
        image_rect.center(),
        Align2::CENTER_CENTER,
        initial,
        FontId::proportional((image_side * 0.42).max(4.0)),
        dim_color(text_color, 0.85),
    );

    let label_font = FontId::proportional((node.card.font_size * zoom).max(4.0));
    let label_rect = clipped.text(
        pos2(card_rect.center().x, image_rect.bottom() + 3.0 * zoom),
        Align2::CENTER_TOP,
        label,
        label_font,
        text_color,
    );

    if !node.caption.is_empty() {
        let caption_font = FontId::proportional((node.card.caption_font_size() * zoom).max(4.0));
        let caption_color = if state.dimmed {
            Color32::from_gray(96)
        } else {
            Color32::from_gray(188)
        };
        let galley = clipped.layout(
            node.caption.clone(),
            caption_font,
            caption_color,
            (card_rect.width() - padding * 2.0).max(4.0),
        );
        clipped.galley(
            pos2(card_rect.left() + padding, label_rect.bottom() + 2.0 * zoom),
            galley,
            caption_color,
        );
    }
}
