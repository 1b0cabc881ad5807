use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GraphState;
use crate::ui::{EMPTY_SCENE_HINT, HUD_EDGE_PADDING, HUD_PANEL_GAP, PANEL_W};

pub fn hud_overlay(mut contexts: EguiContexts, st: Res<GraphState>) {
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();

    if st.scene.is_empty() && !st.session.loading_node {
        let content_x = screen.min.x + PANEL_W + (screen.width() - PANEL_W) * 0.5;
        egui::Area::new(egui::Id::new("empty_hint"))
            .order(egui::Order::Background)
            .anchor(
                egui::Align2::CENTER_CENTER,
                egui::vec2(content_x - screen.center().x, 0.0),
            )
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(EMPTY_SCENE_HINT).color(egui::Color32::GRAY));
            });
    }

    let x = screen.min.x + PANEL_W + HUD_PANEL_GAP;
    let y = screen.min.y + HUD_EDGE_PADDING;
    egui::Area::new(egui::Id::new("hud"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(x, y))
        .interactable(false)
        .show(ctx, |ui| {
            ui.group(|ui| {
                match st.scene.center() {
                    Some(center) => ui.label(format!("Focus: {}", center.label)),
                    None => ui.label("Focus: (none)"),
                };
                ui.label(format!(
                    "Visible: {} nodes / {} edges",
                    st.scene.nodes.len(),
                    st.scene.edges.len()
                ));
                if !st.highlight.is_empty() {
                    ui.label(format!("Path: {} nodes highlighted", st.session.path_ids().len()));
                }
                if st.session.loading_node || st.session.loading_path {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("loading");
                    });
                }
            });
        });
}
