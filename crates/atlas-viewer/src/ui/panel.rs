use atlas_core::label::SUMMARY_PLACEHOLDER;
use atlas_core::{path_text, EdgeHighlight};
use bevy::prelude::{Res, ResMut};
use bevy_egui::{egui, EguiContexts};

use crate::app::resources::RequestTx;
use crate::graph::GraphState;
use crate::ui::PANEL_W;
use crate::util::config;

pub fn ui_panel(mut contexts: EguiContexts, mut st: ResMut<GraphState>, tx: Res<RequestTx>) {
    egui::SidePanel::left("left")
        .exact_width(PANEL_W)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Atlas 3D Tech Map");
            ui.separator();

            ui.label("Focus node:");
            let loading_node = st.session.loading_node;
            let mut load = false;
            ui.horizontal(|ui| {
                let field = ui.text_edit_singleline(&mut st.session.center_id);
                if field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    load = true;
                }
                let text = if loading_node { "Loading..." } else { "Load Node" };
                if ui.add_enabled(!loading_node, egui::Button::new(text)).clicked() {
                    load = true;
                }
            });
            if load && !loading_node {
                if let Some(req) = st.load_center() {
                    tx.0.send(req);
                }
            }

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Path");
            egui::Grid::new("path_inputs").num_columns(2).show(ui, |ui| {
                ui.label("From:");
                ui.text_edit_singleline(&mut st.session.path_from);
                ui.end_row();
                ui.label("To:");
                ui.text_edit_singleline(&mut st.session.path_to);
                ui.end_row();
            });
            let loading_path = st.session.loading_path;
            let text = if loading_path { "Finding..." } else { "Find Path" };
            if ui.add_enabled(!loading_path, egui::Button::new(text)).clicked() {
                if let Some(req) = st.load_path() {
                    tx.0.send(req);
                }
            }

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Summary");
            if st.session.summary.is_empty() {
                ui.label(egui::RichText::new(SUMMARY_PLACEHOLDER).italics());
            } else {
                ui.label(st.session.summary.as_str());
            }
            if let Some(path) = st.session.last_path.as_ref() {
                ui.add_space(4.0);
                ui.label(path_text(path));
            }
            if let Some(err) = st.session.error.as_ref() {
                ui.add_space(4.0);
                ui.colored_label(egui::Color32::from_rgb(0xff, 0x6b, 0x6b), format!("Error: {err}"));
            }

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Display");
            let mut mode = st.cfg.edge_highlight;
            ui.horizontal(|ui| {
                ui.label("Path edges:");
                ui.selectable_value(&mut mode, EdgeHighlight::Traversed, "traversed");
                ui.selectable_value(&mut mode, EdgeHighlight::Membership, "membership");
            });
            st.set_edge_highlight(mode);
            ui.checkbox(&mut st.cfg.show_labels, "Labels");

            ui.add_space(8.0);
            if ui.button("Save settings").clicked() {
                match config::save(&st.cfg) {
                    Ok(path) => {
                        tracing::info!(path = %path.display(), "viewer config saved");
                        st.ui.status = Some(format!("Saved to {}", path.display()));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to save viewer config");
                        st.ui.status = Some(format!("Save failed: {e:#}"));
                    }
                }
            }
            if let Some(status) = st.ui.status.as_ref() {
                ui.small(status.as_str());
            }

            ui.add_space(8.0);
            ui.label("Press ? for controls.");
        });
}
