use crate::highlight::{EdgeHighlight, PathHighlight};
use crate::label::summary_text;
use crate::layout::{layout_with, Layout, LayoutParams};
use crate::model::{NeighborsResponse, NodeLoad, PathResponse};

pub const DEFAULT_NODE: &str = "steam_engine";
pub const DEFAULT_PATH_FROM: &str = "fire";
pub const DEFAULT_PATH_TO: &str = "gps";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeFlow {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFlow {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRequest {
    pub generation: u64,
    pub node_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRequest {
    pub generation: u64,
    pub from: String,
    pub to: String,
}

/// What happened to a resolution handed back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer request of the same flow was issued after this one.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionDefaults {
    pub center_id: String,
    pub path_from: String,
    pub path_to: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            center_id: DEFAULT_NODE.to_string(),
            path_from: DEFAULT_PATH_FROM.to_string(),
            path_to: DEFAULT_PATH_TO.to_string(),
        }
    }
}

/// Focus and path state driving the scene.
///
/// Every transition that starts work returns the request to issue; the
/// caller performs it and reports back through `resolve_node`/`resolve_path`
/// with the generation it was given. Only the most recently issued request
/// of each flow is ever applied.
#[derive(Debug, Clone)]
pub struct Session {
    pub center_id: String,
    pub path_from: String,
    pub path_to: String,
    pub last_neighbors: Option<NeighborsResponse>,
    pub last_path: Option<PathResponse>,
    pub summary: String,
    pub loading_node: bool,
    pub loading_path: bool,
    pub error: Option<String>,

    node_flow: NodeFlow,
    path_flow: PathFlow,
    node_generation: u64,
    path_generation: u64,
    activated: bool,
    default_node: String,
}

impl Session {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            default_node: defaults.center_id.clone(),
            center_id: defaults.center_id,
            path_from: defaults.path_from,
            path_to: defaults.path_to,
            last_neighbors: None,
            last_path: None,
            summary: String::new(),
            loading_node: false,
            loading_path: false,
            error: None,
            node_flow: NodeFlow::Idle,
            path_flow: PathFlow::Idle,
            node_generation: 0,
            path_generation: 0,
            activated: false,
        }
    }

    pub fn node_flow(&self) -> NodeFlow {
        self.node_flow
    }

    pub fn path_flow(&self) -> PathFlow {
        self.path_flow
    }

    /// Loads the default node the first time it is called, nothing after.
    pub fn activate(&mut self) -> Option<NodeRequest> {
        if self.activated {
            return None;
        }
        self.activated = true;
        let id = self.default_node.clone();
        Some(self.load_node(&id))
    }

    pub fn load_node(&mut self, node_id: &str) -> NodeRequest {
        self.error = None;
        self.last_path = None;
        self.loading_node = true;
        self.node_flow = NodeFlow::Loading;
        self.node_generation += 1;
        tracing::debug!(node_id, generation = self.node_generation, "node load issued");
        NodeRequest {
            generation: self.node_generation,
            node_id: node_id.to_string(),
        }
    }

    /// A click on a rendered node: focus it, make it the path origin and load it.
    pub fn select_node(&mut self, node_id: &str) -> NodeRequest {
        self.center_id = node_id.to_string();
        self.path_from = node_id.to_string();
        self.load_node(node_id)
    }

    /// Loads the node currently typed into `center_id`.
    pub fn load_center(&mut self) -> NodeRequest {
        let id = self.center_id.trim().to_string();
        self.load_node(&id)
    }

    pub fn load_path(&mut self, from: &str, to: &str) -> PathRequest {
        self.error = None;
        self.loading_path = true;
        self.path_flow = PathFlow::Loading;
        self.path_generation += 1;
        tracing::debug!(from, to, generation = self.path_generation, "path load issued");
        PathRequest {
            generation: self.path_generation,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Queries the path between the current `path_from`/`path_to` endpoints.
    pub fn load_current_path(&mut self) -> PathRequest {
        let from = self.path_from.trim().to_string();
        let to = self.path_to.trim().to_string();
        self.load_path(&from, &to)
    }

    pub fn resolve_node(&mut self, generation: u64, result: Result<NodeLoad, String>) -> Resolution {
        if generation != self.node_generation {
            tracing::warn!(
                generation,
                latest = self.node_generation,
                "discarding stale node load"
            );
            return Resolution::Stale;
        }
        self.loading_node = false;
        match result {
            Ok(load) => {
                tracing::info!(node_id = %load.neighbors.node_id, generation, "node loaded");
                self.summary = summary_text(&load.neighbors, &load.stats.counts);
                self.last_neighbors = Some(load.neighbors);
                self.node_flow = NodeFlow::Loaded;
            }
            Err(message) => {
                tracing::warn!(generation, error = %message, "node load failed");
                self.error = Some(message);
                self.node_flow = NodeFlow::Failed;
            }
        }
        Resolution::Applied
    }

    pub fn resolve_path(
        &mut self,
        generation: u64,
        result: Result<PathResponse, String>,
    ) -> Resolution {
        if generation != self.path_generation {
            tracing::warn!(
                generation,
                latest = self.path_generation,
                "discarding stale path load"
            );
            return Resolution::Stale;
        }
        self.loading_path = false;
        match result {
            Ok(path) => {
                tracing::info!(from = %path.from, to = %path.to, found = path.found, "path loaded");
                self.last_path = Some(path);
                self.path_flow = PathFlow::Loaded;
            }
            Err(message) => {
                tracing::warn!(generation, error = %message, "path load failed");
                self.error = Some(message);
                self.path_flow = PathFlow::Failed;
            }
        }
        Resolution::Applied
    }

    pub fn path_ids(&self) -> &[String] {
        self.last_path
            .as_ref()
            .map(PathResponse::highlighted_ids)
            .unwrap_or(&[])
    }

    pub fn scene(&self, params: &LayoutParams) -> Layout {
        layout_with(self.last_neighbors.as_ref(), params)
    }

    pub fn highlight(&self, mode: EdgeHighlight) -> PathHighlight {
        PathHighlight::new(self.path_ids(), mode)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BranchCounts, BranchStatsResponse, Neighbor};

    fn load(id: &str, up: usize, down: usize) -> NodeLoad {
        let nb = |i: usize| Neighbor {
            id: format!("{id}-{i}"),
            label: None,
            relation: None,
        };
        NodeLoad {
            neighbors: NeighborsResponse {
                node_id: id.to_string(),
                label: None,
                upstream: (0..up).map(nb).collect(),
                downstream: (up..up + down).map(nb).collect(),
            },
            stats: BranchStatsResponse {
                node_id: id.to_string(),
                counts: BranchCounts {
                    ancestor_count: 1,
                    descendant_count: 2,
                    total_connected: 4,
                },
            },
        }
    }

    fn found_path(ids: &[&str]) -> PathResponse {
        PathResponse {
            from: ids[0].to_string(),
            to: ids[ids.len() - 1].to_string(),
            found: true,
            ids: ids.iter().map(|s| s.to_string()).collect(),
            labels: ids.iter().map(|s| s.to_uppercase()).collect(),
        }
    }

    #[test]
    fn activation_loads_default_node_once() {
        let mut s = Session::default();
        let req = s.activate().expect("first activation");
        assert_eq!(req.node_id, DEFAULT_NODE);
        assert!(s.loading_node);
        assert_eq!(s.node_flow(), NodeFlow::Loading);
        assert!(s.activate().is_none());
    }

    #[test]
    fn successful_node_load_stores_neighbors_and_summary() {
        let mut s = Session::default();
        let req = s.load_node("x");
        assert_eq!(s.resolve_node(req.generation, Ok(load("x", 2, 1))), Resolution::Applied);

        assert!(!s.loading_node);
        assert_eq!(s.node_flow(), NodeFlow::Loaded);
        assert_eq!(s.last_neighbors.as_ref().map(|n| n.node_id.as_str()), Some("x"));
        assert_eq!(
            s.summary,
            "Node \"x\" has 1 ancestors and 2 descendants (total 4). \
             It has 2 direct prerequisites and 1 direct downstream technologies."
        );
        assert_eq!(s.scene(&LayoutParams::default()).nodes.len(), 4);
    }

    #[test]
    fn failed_node_load_keeps_previous_layout() {
        let mut s = Session::default();
        let first = s.load_node("a");
        s.resolve_node(first.generation, Ok(load("a", 1, 1)));
        let summary = s.summary.clone();

        let req = s.load_node("x");
        s.resolve_node(req.generation, Err("API /graph/neighbors failed: 500 Internal Server Error".into()));

        assert!(!s.loading_node);
        assert_eq!(s.node_flow(), NodeFlow::Failed);
        assert_eq!(s.last_neighbors.as_ref().map(|n| n.node_id.as_str()), Some("a"));
        assert_eq!(s.summary, summary);
        assert_eq!(
            s.error.as_deref(),
            Some("API /graph/neighbors failed: 500 Internal Server Error")
        );
    }

    #[test]
    fn loading_a_node_clears_path_and_error() {
        let mut s = Session::default();
        let p = s.load_path("a", "c");
        s.resolve_path(p.generation, Ok(found_path(&["a", "b", "c"])));
        s.error = Some("old".into());

        s.load_node("b");
        assert!(s.last_path.is_none());
        assert!(s.error.is_none());
        assert!(s.path_ids().is_empty());
    }

    #[test]
    fn select_node_sets_focus_and_path_origin() {
        let mut s = Session::default();
        let req = s.select_node("cooking");
        assert_eq!(req.node_id, "cooking");
        assert_eq!(s.center_id, "cooking");
        assert_eq!(s.path_from, "cooking");
        assert_eq!(s.path_to, DEFAULT_PATH_TO);
    }

    #[test]
    fn stale_node_resolution_is_discarded() {
        let mut s = Session::default();
        let slow = s.load_node("slow");
        let fast = s.load_node("fast");

        assert_eq!(s.resolve_node(fast.generation, Ok(load("fast", 0, 0))), Resolution::Applied);
        assert_eq!(s.resolve_node(slow.generation, Ok(load("slow", 3, 3))), Resolution::Stale);
        assert_eq!(s.last_neighbors.as_ref().map(|n| n.node_id.as_str()), Some("fast"));
    }

    #[test]
    fn stale_resolution_does_not_clear_loading() {
        let mut s = Session::default();
        let old = s.load_node("old");
        let _new = s.load_node("new");
        s.resolve_node(old.generation, Err("boom".into()));
        assert!(s.loading_node);
        assert!(s.error.is_none());
    }

    #[test]
    fn path_flow_is_independent_of_node_flow() {
        let mut s = Session::default();
        let node = s.load_node("a");
        let path = s.load_path("fire", "gps");
        assert!(s.loading_node && s.loading_path);

        s.resolve_path(path.generation, Ok(PathResponse::not_found("fire", "gps")));
        assert!(!s.loading_path);
        assert!(s.loading_node);
        assert_eq!(s.path_flow(), PathFlow::Loaded);
        assert!(s.path_ids().is_empty());

        s.resolve_node(node.generation, Ok(load("a", 0, 0)));
        assert_eq!(s.node_flow(), NodeFlow::Loaded);
    }

    #[test]
    fn failed_path_load_keeps_last_path() {
        let mut s = Session::default();
        let ok = s.load_path("a", "b");
        s.resolve_path(ok.generation, Ok(found_path(&["a", "b"])));

        let bad = s.load_current_path();
        s.resolve_path(bad.generation, Err("API /graph/path failed: 404 Not Found".into()));

        assert_eq!(s.path_flow(), PathFlow::Failed);
        assert!(!s.loading_path);
        assert_eq!(s.path_ids(), ["a".to_string(), "b".to_string()]);
        assert!(s.error.is_some());
    }

    #[test]
    fn highlight_follows_loaded_path() {
        let mut s = Session::default();
        let p = s.load_path("fire", "steam_engine");
        s.resolve_path(p.generation, Ok(found_path(&["fire", "cooking", "steam_engine"])));

        let hl = s.highlight(EdgeHighlight::Traversed);
        assert!(hl.node("cooking"));
        assert!(!hl.node("gps"));
    }

    #[test]
    fn load_center_trims_input() {
        let mut s = Session::default();
        s.center_id = "  fire ".into();
        assert_eq!(s.load_center().node_id, "fire");
    }
}
