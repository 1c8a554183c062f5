use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;

use super::RenderNode;

/// Simulation energy held while a node is being dragged, so neighbors keep
/// reacting to the pinned node.
pub(super) const DRAG_ALPHA_TARGET: f32 = 0.3;

/// Force-directed refinement of the radial seed layout: pairwise n-body
/// repulsion, a centering pull toward the origin, and radius-aware collision
/// resolution. Owned by the view model and stepped once per frame while
/// active; `step` reports whether another tick is needed so the frame loop
/// can stop repainting at convergence.
pub(super) struct Simulation {
    alpha: f32,
    alpha_min: f32,
    alpha_decay: f32,
    alpha_target: f32,
    pub(super) velocity_damping: f32,
    pub(super) repulsion: f32,
    pub(super) centering: f32,
    pub(super) collision: f32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            alpha_min: 0.001,
            alpha_decay: 0.0228,
            alpha_target: 0.0,
            velocity_damping: 0.6,
            repulsion: 1600.0,
            centering: 0.04,
            collision: 0.55,
        }
    }
}

impl Simulation {
    pub(super) fn is_active(&self) -> bool {
        self.alpha >= self.alpha_min || self.alpha_target > 0.0
    }

    pub(super) fn restart(&mut self) {
        self.alpha = 1.0;
    }

    pub(super) fn reheat(&mut self, target: f32) {
        self.alpha_target = target.clamp(0.0, 1.0);
        self.alpha = self.alpha.max(self.alpha_target);
    }

    pub(super) fn release(&mut self) {
        self.alpha_target = 0.0;
    }

    pub(super) fn stop(&mut self) {
        self.alpha = 0.0;
        self.alpha_target = 0.0;
    }

    /// One tick: accumulate forces, then integrate. Pinned nodes hold their
    /// pin and shed velocity.
    pub(super) fn step(&mut self, nodes: &mut [RenderNode]) -> bool {
        if !self.is_active() || nodes.is_empty() {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

        let n = nodes.len();
        let mut forces = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = nodes[i].world_pos - nodes[j].world_pos;
                let distance_sq = delta.length_sq();
                let direction = if distance_sq > 0.0001 {
                    delta / distance_sq.sqrt()
                } else {
                    separation_direction(&nodes[i].query)
                };

                let push = (self.repulsion * self.alpha) / distance_sq.max(80.0);
                forces[i] += direction * push;
                forces[j] -= direction * push;

                let min_distance = nodes[i].collide_radius + nodes[j].collide_radius;
                if distance_sq.sqrt() < min_distance {
                    let overlap_push = (min_distance - distance_sq.sqrt()) * self.collision;
                    forces[i] += direction * overlap_push;
                    forces[j] -= direction * overlap_push;
                }
            }
        }

        for (index, node) in nodes.iter().enumerate() {
            forces[index] -= node.world_pos * (self.centering * self.alpha);
        }

        for (node, force) in nodes.iter_mut().zip(forces) {
            if let Some(pin) = node.pinned {
                node.world_pos = pin;
                node.velocity = Vec2::ZERO;
                continue;
            }

            node.velocity = (node.velocity + force) * self.velocity_damping;
            node.world_pos += node.velocity;
        }

        self.is_active()
    }
}

/// Tie-break for exactly coincident nodes, stable per entity so repeated
/// ticks push the same pair apart along the same axis.
fn separation_direction(id: &str) -> Vec2 {
    let (x, y) = stable_pair(id);
    let direction = vec2(x, y);
    if direction.length_sq() > 0.0001 {
        direction.normalized()
    } else {
        vec2(1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::card::CardStyle;
    use super::*;

    fn node(query: &str, x: f32, y: f32) -> RenderNode {
        RenderNode {
            query: query.to_string(),
            relevance: 0.5,
            world_pos: vec2(x, y),
            velocity: Vec2::ZERO,
            pinned: None,
            collide_radius: 45.0,
            card: CardStyle {
                card_size: 60.0,
                font_size: 13.0,
                image_size: 60.0,
                max_comment_len: 90,
            },
            caption: String::new(),
        }
    }

    #[test]
    fn pinned_node_never_moves() {
        let mut sim = Simulation::default();
        let mut nodes = vec![node("Paris", 5.0, 5.0), node("Seine", 6.0, 5.0)];
        nodes[0].pinned = Some(vec2(5.0, 5.0));

        for _ in 0..50 {
            sim.step(&mut nodes);
        }

        assert_eq!(nodes[0].world_pos, vec2(5.0, 5.0));
        assert_eq!(nodes[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn overlapping_nodes_separate() {
        let mut sim = Simulation::default();
        let mut nodes = vec![node("Paris", 0.0, 0.0), node("Seine", 1.0, 0.0)];

        for _ in 0..120 {
            sim.step(&mut nodes);
        }

        let distance = (nodes[0].world_pos - nodes[1].world_pos).length();
        assert!(distance > 60.0, "nodes still overlap at distance {distance}");
    }

    #[test]
    fn coincident_nodes_still_separate() {
        let mut sim = Simulation::default();
        let mut nodes = vec![node("Paris", 0.0, 0.0), node("Twin", 0.0, 0.0)];

        for _ in 0..120 {
            sim.step(&mut nodes);
        }

        assert!((nodes[0].world_pos - nodes[1].world_pos).length() > 1.0);
    }

    #[test]
    fn simulation_converges_to_inactive() {
        let mut sim = Simulation::default();
        let mut nodes = vec![node("Paris", -200.0, 0.0), node("Seine", 200.0, 0.0)];

        let mut became_inactive = false;
        for _ in 0..2000 {
            if !sim.step(&mut nodes) {
                became_inactive = true;
                break;
            }
        }

        assert!(became_inactive, "simulation never converged");
        assert!(!sim.is_active());
    }

    #[test]
    fn stop_halts_immediately() {
        let mut sim = Simulation::default();
        let mut nodes = vec![node("Paris", 0.0, 0.0), node("Seine", 1.0, 0.0)];

        sim.stop();
        let before = (nodes[0].world_pos, nodes[1].world_pos);
        assert!(!sim.step(&mut nodes));
        assert_eq!((nodes[0].world_pos, nodes[1].world_pos), before);
    }

    #[test]
    fn reheat_keeps_a_converged_simulation_alive() {
        let mut sim = Simulation::default();
        let mut nodes = vec![node("Paris", -200.0, 0.0), node("Seine", 200.0, 0.0)];
        while sim.step(&mut nodes) {}

        sim.reheat(DRAG_ALPHA_TARGET);
        assert!(sim.is_active());
        for _ in 0..500 {
            assert!(sim.step(&mut nodes), "drag energy must keep ticking");
        }

        sim.release();
        let mut became_inactive = false;
        for _ in 0..2000 {
            if !sim.step(&mut nodes) {
                became_inactive = true;
                break;
            }
        }
        assert!(became_inactive, "release must let the simulation decay");
    }

    #[test]
    fn centering_pulls_the_cluster_toward_the_origin() {
        let mut sim = Simulation::default();
        let mut nodes = vec![node("Paris", 400.0, 260.0), node("Seine", 520.0, 300.0)];
        let initial = (nodes[0].world_pos + nodes[1].world_pos) / 2.0;

        for _ in 0..300 {
            sim.step(&mut nodes);
        }

        let centroid = (nodes[0].world_pos + nodes[1].world_pos) / 2.0;
        assert!(centroid.length() < initial.length());
    }
}
