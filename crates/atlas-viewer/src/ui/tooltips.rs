use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GraphState;
use crate::ui::TOOLTIP_OFFSET;

pub fn render_tooltip(
    ctx: &egui::Context,
    id: &str,
    pos: egui::Pos2,
    lines: impl IntoIterator<Item = String>,
) {
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Tooltip)
        .fixed_pos(pos)
        .interactable(false)
        .show(ctx, |ui| {
            ui.group(|ui| {
                for line in lines {
                    ui.label(line);
                }
            });
        });
}

pub fn hover_tooltip(mut contexts: EguiContexts, st: Res<GraphState>) {
    let Some(id) = st.ui.hovered.as_deref() else {
        return;
    };
    let ctx = contexts.ctx_mut();
    let Some(pointer) = ctx.input(|i| i.pointer.hover_pos()) else {
        return;
    };
    let pos = pointer + egui::vec2(TOOLTIP_OFFSET, TOOLTIP_OFFSET);
    render_tooltip(ctx, "node_tooltip", pos, st.node_tooltip_lines(id));
}
