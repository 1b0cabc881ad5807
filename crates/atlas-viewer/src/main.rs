mod app;
mod graph;
mod net;
mod render;
mod ui;
mod util;

use anyhow::{Context, Result};
use atlas_client::GraphApi;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use tracing_subscriber::EnvFilter;

use crate::app::resources::{NetRx, RequestTx};
use crate::app::AtlasViewerPlugin;
use crate::util::{args, config};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wgpu=warn,naga=warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let mut cfg = config::load_or_default();
    args::parse_args()?.apply(&mut cfg);
    let api = GraphApi::new(cfg.api_base.clone()).context("build HTTP client")?;
    tracing::info!(api_base = api.base(), node_id = %cfg.default_node, "starting viewer");
    let (out_tx, out_rx) = crossbeam_channel::unbounded();
    let worker = net::spawn_worker(api, out_tx)?;

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Atlas 3D Tech Map".into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_plugins(EguiPlugin)
        .insert_resource(NetRx(out_rx))
        .insert_resource(RequestTx(worker))
        .add_plugins(AtlasViewerPlugin { cfg })
        .run();

    Ok(())
}
