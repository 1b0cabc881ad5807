use atlas_core::{
    EdgeHighlight, Layout, LayoutParams, NodeKind, PathHighlight, PositionedNode, Resolution,
    Session,
};
use bevy::prelude::{Resource, Vec3};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::net::{Outcome, Request};
use crate::util::config::ViewerConfig;

pub const NODE_RADIUS: f32 = 0.4;
pub const NODE_RADIUS_HIGHLIGHTED: f32 = 0.6;

#[derive(Default)]
pub struct UiState {
    pub hovered: Option<String>,
    pub help_open: bool,
    pub status: Option<String>,
}

/// Everything the viewer draws is derived from `session`; `scene`,
/// `positions` and `highlight` are rebuilt by `refresh` whenever it changes.
#[derive(Resource)]
pub struct GraphState {
    pub session: Session,
    pub cfg: ViewerConfig,
    pub ui: UiState,

    pub scene: Layout,
    pub positions: HashMap<String, Vec3>,
    pub highlight: PathHighlight,

    pub needs_redraw: AtomicBool,
}

impl Default for GraphState {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

impl GraphState {
    pub fn from_config(cfg: &ViewerConfig) -> Self {
        let mut st = Self {
            session: Session::new(cfg.session_defaults()),
            cfg: cfg.clone(),
            ui: UiState::default(),
            scene: Layout::default(),
            positions: HashMap::new(),
            highlight: PathHighlight::default(),
            needs_redraw: AtomicBool::new(true),
        };
        st.refresh();
        st
    }

    pub fn layout_params(&self) -> LayoutParams {
        self.cfg.layout_params()
    }

    fn refresh(&mut self) {
        self.scene = self.session.scene(&self.layout_params());
        self.positions = self
            .scene
            .nodes
            .iter()
            .map(|n| (n.id.clone(), Vec3::new(n.x, n.y, n.z)))
            .collect();
        self.highlight = self.session.highlight(self.cfg.edge_highlight);
        if self
            .ui
            .hovered
            .as_ref()
            .is_some_and(|id| !self.positions.contains_key(id))
        {
            self.ui.hovered = None;
        }
        self.needs_redraw.store(true, Ordering::Relaxed);
    }

    // ----- Transitions -----
    pub fn activate(&mut self) -> Option<Request> {
        let req = self.session.activate()?;
        self.refresh();
        Some(req.into())
    }

    pub fn load_center(&mut self) -> Option<Request> {
        if self.session.center_id.trim().is_empty() {
            return None;
        }
        let req = self.session.load_center();
        self.refresh();
        Some(req.into())
    }

    pub fn select_node(&mut self, id: &str) -> Request {
        let req = self.session.select_node(id);
        self.refresh();
        req.into()
    }

    pub fn load_path(&mut self) -> Option<Request> {
        if self.session.path_from.trim().is_empty() || self.session.path_to.trim().is_empty() {
            return None;
        }
        let req = self.session.load_current_path();
        Some(req.into())
    }

    pub fn apply(&mut self, outcome: Outcome) -> Resolution {
        let resolution = match outcome {
            Outcome::Node { generation, result } => self.session.resolve_node(generation, result),
            Outcome::Path { generation, result } => self.session.resolve_path(generation, result),
        };
        if resolution == Resolution::Applied {
            self.refresh();
        }
        resolution
    }

    pub fn set_edge_highlight(&mut self, mode: EdgeHighlight) {
        if self.cfg.edge_highlight == mode {
            return;
        }
        self.cfg.edge_highlight = mode;
        self.refresh();
    }

    // ----- Queries for the renderer -----
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.scene.node(id)
    }

    pub fn node_is_highlighted(&self, id: &str) -> bool {
        self.highlight.node(id)
    }

    pub fn node_radius(&self, id: &str) -> f32 {
        if self.node_is_highlighted(id) {
            NODE_RADIUS_HIGHLIGHTED
        } else {
            NODE_RADIUS
        }
    }

    pub fn node_tooltip_lines(&self, id: &str) -> Vec<String> {
        let Some(n) = self.node(id) else {
            return vec![id.to_string()];
        };
        let mut out = vec![
            n.label.clone(),
            format!("id: {}", n.id),
            format!("kind: {}", n.kind.as_str()),
        ];
        if self.node_is_highlighted(id) {
            out.push("on current path".to_string());
        }
        if n.kind != NodeKind::Center {
            out.push("click to focus".to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{
        BranchCounts, BranchStatsResponse, Neighbor, NeighborsResponse, NodeLoad, PathResponse,
    };

    fn fire_load() -> NodeLoad {
        NodeLoad {
            neighbors: NeighborsResponse {
                node_id: "fire".into(),
                label: Some("Fire".into()),
                upstream: vec![],
                downstream: vec![Neighbor {
                    id: "cooking".into(),
                    label: Some("Cooking".into()),
                    relation: None,
                }],
            },
            stats: BranchStatsResponse {
                node_id: "fire".into(),
                counts: BranchCounts {
                    ancestor_count: 0,
                    descendant_count: 1,
                    total_connected: 2,
                },
            },
        }
    }

    fn node_generation(req: Request) -> u64 {
        match req {
            Request::Node(r) => r.generation,
            Request::Path(_) => panic!("expected node request"),
        }
    }

    #[test]
    fn activation_requests_configured_default_node() {
        let cfg = ViewerConfig {
            default_node: "wheel".into(),
            ..ViewerConfig::default()
        };
        let mut st = GraphState::from_config(&cfg);
        match st.activate() {
            Some(Request::Node(r)) => assert_eq!(r.node_id, "wheel"),
            other => panic!("unexpected request: {other:?}"),
        }
        assert!(st.activate().is_none());
    }

    #[test]
    fn applied_node_load_rebuilds_scene() {
        let mut st = GraphState::default();
        st.session.center_id = "fire".into();
        let generation = node_generation(st.load_center().expect("request"));
        st.needs_redraw.store(false, Ordering::Relaxed);

        let res = st.apply(Outcome::Node {
            generation,
            result: Ok(fire_load()),
        });

        assert_eq!(res, Resolution::Applied);
        assert_eq!(st.scene.nodes.len(), 2);
        assert_eq!(st.positions.get("fire"), Some(&Vec3::ZERO));
        let cooking = st.positions.get("cooking").copied().expect("cooking");
        assert!((cooking - Vec3::new(4.0, -2.0, 0.0)).length() < 1e-5);
        assert!(st.needs_redraw.load(Ordering::Relaxed));
    }

    #[test]
    fn stale_outcome_leaves_scene_alone() {
        let mut st = GraphState::default();
        let old = node_generation(st.select_node("fire"));
        let _new = st.select_node("cooking");

        let res = st.apply(Outcome::Node {
            generation: old,
            result: Ok(fire_load()),
        });
        assert_eq!(res, Resolution::Stale);
        assert!(st.scene.is_empty());
        assert!(st.session.loading_node);
    }

    #[test]
    fn path_outcome_highlights_nodes_and_grows_them() {
        let mut st = GraphState::default();
        st.session.path_from = "fire".into();
        st.session.path_to = "cooking".into();
        let Some(Request::Path(req)) = st.load_path() else {
            panic!("expected path request");
        };

        st.apply(Outcome::Path {
            generation: req.generation,
            result: Ok(PathResponse {
                from: "fire".into(),
                to: "cooking".into(),
                found: true,
                ids: vec!["fire".into(), "cooking".into()],
                labels: vec!["Fire".into(), "Cooking".into()],
            }),
        });

        assert!(st.node_is_highlighted("cooking"));
        assert_eq!(st.node_radius("cooking"), NODE_RADIUS_HIGHLIGHTED);
        assert_eq!(st.node_radius("gps"), NODE_RADIUS);
    }

    #[test]
    fn blank_inputs_issue_nothing() {
        let mut st = GraphState::default();
        st.session.center_id = "   ".into();
        st.session.path_to.clear();
        assert!(st.load_center().is_none());
        assert!(st.load_path().is_none());
    }

    #[test]
    fn tooltip_describes_node_role() {
        let mut st = GraphState::default();
        let generation = node_generation(st.select_node("fire"));
        st.apply(Outcome::Node {
            generation,
            result: Ok(fire_load()),
        });

        let lines = st.node_tooltip_lines("cooking");
        assert_eq!(lines[0], "Cooking");
        assert_eq!(lines[1], "id: cooking");
        assert_eq!(lines[2], "kind: downstream");
        assert_eq!(st.node_tooltip_lines("fire")[2], "kind: center");
        assert_eq!(st.node_tooltip_lines("nope"), vec!["nope".to_string()]);
    }
}
