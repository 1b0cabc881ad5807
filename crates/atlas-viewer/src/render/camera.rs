use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::render::scene::SceneAssets;
use crate::render::{palette, DEFAULT_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE, MIN_CAMERA_DISTANCE};

/// Camera orbit state. The default view sits on +Z looking at the origin.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraOrbit {
    /// Horizontal rotation (radians).
    pub yaw: f32,
    /// Vertical rotation (radians).
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: DEFAULT_CAMERA_DISTANCE,
            target: Vec3::ZERO,
        }
    }
}

impl CameraOrbit {
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }

    fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * 0.01;
        self.pitch = (self.pitch + delta.y * 0.01).clamp(-1.5, 1.5);
    }

    fn pan(&mut self, delta: Vec2) {
        let right = Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
        let scale = self.distance * 0.002;
        self.target -= right * delta.x * scale;
        self.target += Vec3::Y * delta.y * scale;
    }

    fn zoom(&mut self, lines: f32) {
        self.distance =
            (self.distance - lines).clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
    }
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    orbit: Res<CameraOrbit>,
) {
    commands.insert_resource(ClearColor(palette::BACKGROUND));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 2_000_000.0,
            range: 60.0,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 10.0, 10.0),
        ..default()
    });

    commands.spawn(Camera3dBundle {
        transform: orbit.transform(),
        ..default()
    });

    commands.insert_resource(SceneAssets::new(&mut meshes, &mut mats));
}

/// Right-drag orbits, middle-drag pans, the wheel zooms and R resets.
/// Pointer input over egui panels is left to egui.
pub fn camera_orbit(
    mut orbit: ResMut<CameraOrbit>,
    mut cam_q: Query<&mut Transform, With<Camera3d>>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
) {
    let ctx = contexts.ctx_mut();
    let pointer_free = !ctx.wants_pointer_input() && !ctx.is_pointer_over_area();
    let keyboard_free = !ctx.wants_keyboard_input();

    let delta: Vec2 = motion.read().map(|ev| ev.delta).sum();
    let lines: f32 = scroll.read().map(|ev| ev.y).sum();

    if pointer_free {
        if buttons.pressed(MouseButton::Right) {
            orbit.orbit(delta);
        } else if buttons.pressed(MouseButton::Middle) {
            orbit.pan(delta);
        }
        if lines != 0.0 {
            orbit.zoom(lines);
        }
    }

    if keyboard_free && keys.just_pressed(KeyCode::KeyR) {
        *orbit = CameraOrbit::default();
    }

    if !orbit.is_changed() {
        return;
    }
    if let Ok(mut tf) = cam_q.get_single_mut() {
        *tf = orbit.transform();
    }
}
