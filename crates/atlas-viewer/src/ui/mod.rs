pub mod help;
pub mod hud;
pub mod labels;
pub mod panel;
pub mod shortcuts;
pub mod tooltips;

pub use help::help_overlay;
pub use hud::hud_overlay;
pub use labels::node_labels;
pub use panel::ui_panel;
pub use shortcuts::handle_shortcuts;
pub use tooltips::hover_tooltip;

pub const PANEL_W: f32 = 320.0;
pub const HUD_EDGE_PADDING: f32 = 8.0;
pub const HUD_PANEL_GAP: f32 = 12.0;
pub const TOOLTIP_OFFSET: f32 = 14.0;

pub const EMPTY_SCENE_HINT: &str =
    "No data loaded yet. Choose a node ID and click \"Load Node\".";
