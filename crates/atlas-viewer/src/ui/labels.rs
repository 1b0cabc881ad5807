use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GraphState;

const LABEL_LIFT: f32 = 0.15;

/// Node names painted under the egui panels, just above each sphere.
pub fn node_labels(
    mut contexts: EguiContexts,
    st: Res<GraphState>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
) {
    if !st.cfg.show_labels || st.scene.is_empty() {
        return;
    }
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };

    let painter = contexts.ctx_mut().layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("node_labels"),
    ));
    for node in &st.scene.nodes {
        let lift = st.node_radius(&node.id) + LABEL_LIFT;
        let anchor = Vec3::new(node.x, node.y + lift, node.z);
        let Some(screen) = camera.world_to_viewport(cam_tf, anchor) else {
            continue;
        };
        let color = if st.node_is_highlighted(&node.id) {
            egui::Color32::from_rgb(0xff, 0xd4, 0x3b)
        } else {
            egui::Color32::from_gray(0xdd)
        };
        painter.text(
            egui::pos2(screen.x, screen.y),
            egui::Align2::CENTER_BOTTOM,
            &node.label,
            egui::FontId::proportional(13.0),
            color,
        );
    }
}
