pub mod camera;
pub mod scene;

pub use camera::{camera_orbit, setup_scene, CameraOrbit};
pub use scene::{draw_scene, hover_detection, picking_focus};

pub const DEFAULT_CAMERA_DISTANCE: f32 = 10.0;
pub const MIN_CAMERA_DISTANCE: f32 = 2.0;
pub const MAX_CAMERA_DISTANCE: f32 = 60.0;

/// Screen-space distance (logical px) within which the cursor hits a node.
pub const PICK_RADIUS_PX: f32 = 14.0;
pub const HOVER_RADIUS_PX: f32 = 18.0;

pub mod palette {
    use bevy::prelude::Color;

    // #050816
    pub const BACKGROUND: Color = Color::srgb(0.020, 0.031, 0.086);
    // #4dabf7
    pub const CENTER: Color = Color::srgb(0.302, 0.671, 0.969);
    // #fab005
    pub const UPSTREAM: Color = Color::srgb(0.980, 0.690, 0.020);
    // #51cf66
    pub const DOWNSTREAM: Color = Color::srgb(0.318, 0.812, 0.400);
    // #ffd43b
    pub const HIGHLIGHT: Color = Color::srgb(1.0, 0.831, 0.231);
    // #888888
    pub const EDGE: Color = Color::srgb(0.533, 0.533, 0.533);

    pub const HIGHLIGHT_EMISSIVE: f32 = 0.5;
}
