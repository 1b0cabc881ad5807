use atlas_core::NodeKind;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::sync::atomic::Ordering;

use crate::app::events::Picked;
use crate::graph::GraphState;
use crate::render::{palette, HOVER_RADIUS_PX, PICK_RADIUS_PX};

#[derive(Component)]
pub struct NodeMarker;

/// Mesh and materials shared by every node sphere.
#[derive(Resource)]
pub struct SceneAssets {
    pub sphere: Handle<Mesh>,
    pub center: Handle<StandardMaterial>,
    pub upstream: Handle<StandardMaterial>,
    pub downstream: Handle<StandardMaterial>,
    pub highlight: Handle<StandardMaterial>,
}

impl SceneAssets {
    pub fn new(meshes: &mut Assets<Mesh>, mats: &mut Assets<StandardMaterial>) -> Self {
        let plain = |mats: &mut Assets<StandardMaterial>, color: Color| {
            mats.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.6,
                ..default()
            })
        };
        let lin = palette::HIGHLIGHT.to_linear();
        let k = palette::HIGHLIGHT_EMISSIVE;
        let glow = LinearRgba::rgb(lin.red * k, lin.green * k, lin.blue * k);

        Self {
            sphere: meshes.add(Sphere::new(1.0).mesh().uv(32, 18)),
            center: plain(mats, palette::CENTER),
            upstream: plain(mats, palette::UPSTREAM),
            downstream: plain(mats, palette::DOWNSTREAM),
            highlight: mats.add(StandardMaterial {
                base_color: palette::HIGHLIGHT,
                emissive: glow,
                perceptual_roughness: 0.6,
                ..default()
            }),
        }
    }

    fn material(&self, kind: NodeKind, highlighted: bool) -> Handle<StandardMaterial> {
        if highlighted {
            return self.highlight.clone();
        }
        match kind {
            NodeKind::Center => self.center.clone(),
            NodeKind::Upstream => self.upstream.clone(),
            NodeKind::Downstream => self.downstream.clone(),
        }
    }
}

/// Nearest candidate to `cursor` no further than `max_px` away.
pub fn nearest_within<'a>(
    cursor: Vec2,
    candidates: impl IntoIterator<Item = (&'a str, Vec2)>,
    max_px: f32,
) -> Option<&'a str> {
    let mut best: Option<(f32, &str)> = None;
    for (id, screen) in candidates {
        let d = screen.distance(cursor);
        if d < max_px && best.map(|(bd, _)| d < bd).unwrap_or(true) {
            best = Some((d, id));
        }
    }
    best.map(|(_, id)| id)
}

fn node_under_cursor(
    st: &GraphState,
    camera: &Camera,
    cam_tf: &GlobalTransform,
    cursor: Vec2,
    max_px: f32,
) -> Option<String> {
    let screen = st.positions.iter().filter_map(|(id, pos)| {
        camera
            .world_to_viewport(cam_tf, *pos)
            .map(|p| (id.as_str(), p))
    });
    nearest_within(cursor, screen, max_px).map(str::to_string)
}

pub fn hover_detection(
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    mut st: ResMut<GraphState>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        st.ui.hovered = None;
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };
    if contexts.ctx_mut().is_pointer_over_area() {
        st.ui.hovered = None;
        return;
    }

    let hovered = node_under_cursor(&st, camera, cam_tf, cursor, HOVER_RADIUS_PX);
    if st.ui.hovered != hovered {
        st.ui.hovered = hovered;
    }
}

pub fn picking_focus(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    st: Res<GraphState>,
    mut out: EventWriter<Picked>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };

    if let Some(picked) = node_under_cursor(&st, camera, cam_tf, cursor, PICK_RADIUS_PX) {
        out.send(Picked(picked));
    }
}

pub fn draw_scene(
    mut commands: Commands,
    st: Res<GraphState>,
    assets: Res<SceneAssets>,
    query: Query<Entity, With<NodeMarker>>,
    mut gizmos: Gizmos,
) {
    if st.needs_redraw.swap(false, Ordering::Relaxed) {
        for e in query.iter() {
            commands.entity(e).despawn_recursive();
        }

        for node in &st.scene.nodes {
            let highlighted = st.node_is_highlighted(&node.id);
            commands.spawn((
                PbrBundle {
                    mesh: assets.sphere.clone(),
                    material: assets.material(node.kind, highlighted),
                    transform: Transform::from_xyz(node.x, node.y, node.z)
                        .with_scale(Vec3::splat(st.node_radius(&node.id))),
                    ..default()
                },
                NodeMarker,
                Name::new(node.id.clone()),
            ));
        }
    }

    for edge in &st.scene.edges {
        let (Some(a), Some(b)) = (st.positions.get(&edge.from), st.positions.get(&edge.to)) else {
            continue;
        };
        if st.highlight.edge(edge) {
            // gizmo lines are one pixel wide; thicken with parallel copies
            let dir = (*b - *a).normalize_or_zero();
            let side = dir.any_orthonormal_vector() * 0.02;
            let up = dir.cross(side);
            for off in [Vec3::ZERO, side, -side, up, -up] {
                gizmos.line(*a + off, *b + off, palette::HIGHLIGHT);
            }
        } else {
            gizmos.line(*a, *b, palette::EDGE);
        }
    }
}
