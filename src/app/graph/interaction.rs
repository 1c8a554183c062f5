use eframe::egui::{self, Rect, Ui, Vec2};

use super::super::ViewModel;
use super::super::physics::DRAG_ALPHA_TARGET;
use super::super::render_utils::screen_to_world;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Topmost card under the pointer, honoring draw order.
    pub(in crate::app) fn hovered_card(
        ui: &Ui,
        draw_order: &[usize],
        screen_rects: &[Rect],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        draw_order
            .iter()
            .rev()
            .copied()
            .find(|&index| screen_rects[index].contains(pointer))
    }

    /// Primary-button drag pins the grabbed card to the pointer for the
    /// duration of the drag and raises the simulation energy so the rest of
    /// the graph reacts; dropping releases the pin.
    pub(in crate::app) fn handle_node_drag(
        &mut self,
        rect: Rect,
        response: &egui::Response,
        hovered: Option<usize>,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(index) = hovered
        {
            self.dragged = Some(index);
            if let Some(cache) = self.graph_cache.as_mut()
                && let Some(node) = cache.nodes.get_mut(index)
            {
                node.pinned = Some(node.world_pos);
            }
            self.sim.reheat(DRAG_ALPHA_TARGET);
        }

        let Some(index) = self.dragged else {
            return;
        };

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let world = screen_to_world(rect, self.pan, self.zoom, pointer);
            if let Some(cache) = self.graph_cache.as_mut()
                && let Some(node) = cache.nodes.get_mut(index)
            {
                node.pinned = Some(world);
                node.world_pos = world;
                node.velocity = Vec2::ZERO;
            }
        }

        if response.drag_stopped() {
            if let Some(cache) = self.graph_cache.as_mut()
                && let Some(node) = cache.nodes.get_mut(index)
            {
                node.pinned = None;
            }
            self.dragged = None;
            self.sim.release();
        }
    }
}
