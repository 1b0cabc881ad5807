use atlas_core::Resolution;
use bevy::prelude::*;

use crate::app::events::Picked;
use crate::app::resources::{NetRx, RequestTx};
use crate::graph::GraphState;
use crate::render::CameraOrbit;
use crate::util::config::ViewerConfig;

pub mod events;
pub mod resources;

pub struct AtlasViewerPlugin {
    pub cfg: ViewerConfig,
}

impl Plugin for AtlasViewerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<Picked>()
            .insert_resource(GraphState::from_config(&self.cfg))
            .init_resource::<CameraOrbit>()
            .add_systems(
                Startup,
                (crate::render::setup_scene, activate_session).chain(),
            )
            .add_systems(
                Update,
                (
                    pump_network,
                    crate::ui::handle_shortcuts,
                    crate::ui::ui_panel,
                    crate::ui::hud_overlay,
                    crate::ui::help_overlay,
                    crate::render::camera_orbit,
                    crate::render::hover_detection,
                    crate::render::picking_focus,
                    apply_picked_focus,
                    crate::render::draw_scene,
                    crate::ui::node_labels,
                    crate::ui::hover_tooltip,
                )
                    .chain(),
            );
    }
}

fn activate_session(mut st: ResMut<GraphState>, tx: Res<RequestTx>) {
    if let Some(req) = st.activate() {
        tx.0.send(req);
    }
}

fn pump_network(mut st: ResMut<GraphState>, rx: Res<NetRx>) {
    for msg in rx.0.try_iter() {
        let generation = msg.generation();
        if st.apply(msg) == Resolution::Stale {
            tracing::debug!(generation, "outcome superseded by a newer request");
        }
    }
}

fn apply_picked_focus(
    mut st: ResMut<GraphState>,
    tx: Res<RequestTx>,
    mut ev: EventReader<Picked>,
) {
    for Picked(id) in ev.read() {
        tracing::info!(node_id = %id, "focus node selected");
        let req = st.select_node(id);
        tx.0.send(req);
    }
}
