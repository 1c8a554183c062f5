use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::api::Entity;

/// World-space distance of a zero-relevance node from the root.
pub(super) const RADIAL_SPREAD: f32 = 300.0;

/// Deterministic radial placement. The root sits at the origin; node `i`
/// (1-indexed over the full entity list) sits at angle `i * 2π/(n-1)`, pulled
/// toward the root as its relevance rises. A lone root gets no ring, so the
/// `n - 1` divisor is never zero.
pub(super) fn radial_layout(entities: &[Entity]) -> Vec<Vec2> {
    let n = entities.len();
    let mut positions = Vec::with_capacity(n);
    if n == 0 {
        return positions;
    }

    positions.push(Vec2::ZERO);
    if n == 1 {
        return positions;
    }

    let angle_step = TAU / (n - 1) as f32;
    for (index, entity) in entities.iter().enumerate().skip(1) {
        let angle = index as f32 * angle_step;
        let radius = RADIAL_SPREAD * (1.0 - entity.relevance);
        positions.push(vec2(angle.cos(), angle.sin()) * radius);
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(query: &str, relevance: f32) -> Entity {
        Entity {
            query: query.to_string(),
            comment: String::new(),
            thumbnail: None,
            card_size: 60.0,
            relevance,
        }
    }

    fn angle_of(position: Vec2) -> f32 {
        position.y.atan2(position.x).rem_euclid(TAU)
    }

    #[test]
    fn root_is_centered_regardless_of_its_relevance() {
        for relevance in [0.0, 0.3, 1.0] {
            let positions = radial_layout(&[entity("Paris", relevance), entity("Seine", 0.5)]);
            assert_eq!(positions[0], Vec2::ZERO);
        }
    }

    #[test]
    fn lone_root_sits_at_the_center() {
        let positions = radial_layout(&[entity("Paris", 1.0)]);
        assert_eq!(positions, vec![Vec2::ZERO]);
    }

    #[test]
    fn consecutive_nodes_are_evenly_spaced() {
        let entities = vec![
            entity("Paris", 1.0),
            entity("a", 0.5),
            entity("b", 0.5),
            entity("c", 0.5),
            entity("d", 0.5),
        ];
        let positions = radial_layout(&entities);
        let expected_step = TAU / 4.0;

        for pair in positions[1..].windows(2) {
            let step = (angle_of(pair[1]) - angle_of(pair[0])).rem_euclid(TAU);
            assert!(
                (step - expected_step).abs() < 1e-4,
                "angular step {step} != {expected_step}"
            );
        }
    }

    #[test]
    fn radius_shrinks_as_relevance_rises() {
        let entities = vec![
            entity("Paris", 1.0),
            entity("near", 0.8),
            entity("far", 0.1),
        ];
        let positions = radial_layout(&entities);

        assert!((positions[1].length() - 60.0).abs() < 1e-3);
        assert!((positions[2].length() - 270.0).abs() < 1e-3);
    }

    #[test]
    fn full_relevance_lands_on_the_root() {
        let positions = radial_layout(&[entity("Paris", 1.0), entity("twin", 1.0)]);
        assert!(positions[1].length() < 1e-6);
    }
}
