use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GraphState;

pub fn help_overlay(mut contexts: EguiContexts, mut st: ResMut<GraphState>) {
    if !st.ui.help_open {
        return;
    }

    let mut open = true;
    egui::Window::new("Help / Shortcuts")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.label("Left click: focus node (also sets path From)");
            ui.label("Right drag: orbit");
            ui.label("Middle drag: pan");
            ui.label("Wheel: zoom");
            ui.label("R: reset camera");
            ui.label("Enter in Focus field: load node");
            ui.label("Esc: close overlays");
            ui.label("?: toggle help");
            ui.separator();
            ui.label("Blue: focus node");
            ui.label("Orange: prerequisites (above)");
            ui.label("Green: unlocks (below)");
            ui.label("Yellow: current path");
        });
    if !open {
        st.ui.help_open = false;
    }
}
