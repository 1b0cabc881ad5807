use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::layout::Edge;

/// How edges are matched against a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeHighlight {
    /// Both endpoints lie somewhere on the path.
    Membership,
    /// The endpoints are adjacent on the path, in either order.
    #[default]
    Traversed,
}

impl EdgeHighlight {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "membership" => Some(Self::Membership),
            "traversed" => Some(Self::Traversed),
            _ => None,
        }
    }
}

pub fn is_node_highlighted(path_ids: &[String], node_id: &str) -> bool {
    path_ids.iter().any(|id| id == node_id)
}

pub fn is_edge_highlighted(path_ids: &[String], edge: &Edge) -> bool {
    !path_ids.is_empty()
        && is_node_highlighted(path_ids, &edge.from)
        && is_node_highlighted(path_ids, &edge.to)
}

pub fn is_edge_traversed(path_ids: &[String], edge: &Edge) -> bool {
    path_ids.windows(2).any(|w| {
        (w[0] == edge.from && w[1] == edge.to) || (w[0] == edge.to && w[1] == edge.from)
    })
}

/// Precomputed lookup for one path, queried once per node and edge each frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathHighlight {
    mode: EdgeHighlight,
    nodes: HashSet<String>,
    steps: HashSet<(String, String)>,
}

impl PathHighlight {
    pub fn new(path_ids: &[String], mode: EdgeHighlight) -> Self {
        let nodes = path_ids.iter().cloned().collect();
        let mut steps = HashSet::new();
        for w in path_ids.windows(2) {
            steps.insert((w[0].clone(), w[1].clone()));
            steps.insert((w[1].clone(), w[0].clone()));
        }
        Self { mode, nodes, steps }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn edge(&self, edge: &Edge) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        match self.mode {
            EdgeHighlight::Membership => self.node(&edge.from) && self.node(&edge.to),
            EdgeHighlight::Traversed => self
                .steps
                .contains(&(edge.from.clone(), edge.to.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PathResponse;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn nodes_on_path_are_highlighted() {
        let path = ids(&["fire", "cooking", "steam_engine"]);
        assert!(is_node_highlighted(&path, "cooking"));
        assert!(!is_node_highlighted(&path, "gps"));
    }

    #[test]
    fn empty_path_highlights_no_edge() {
        assert!(!is_edge_highlighted(&[], &Edge::new("a", "b")));
        assert!(!PathHighlight::new(&[], EdgeHighlight::Membership).edge(&Edge::new("a", "a")));
    }

    #[test]
    fn membership_requires_both_endpoints() {
        let path = ids(&["a", "b", "c"]);
        assert!(is_edge_highlighted(&path, &Edge::new("a", "c")));
        assert!(is_edge_highlighted(&path, &Edge::new("c", "a")));
        assert!(!is_edge_highlighted(&path, &Edge::new("a", "z")));
    }

    #[test]
    fn traversal_only_matches_adjacent_steps() {
        let path = ids(&["a", "b", "c"]);
        assert!(is_edge_traversed(&path, &Edge::new("a", "b")));
        assert!(is_edge_traversed(&path, &Edge::new("c", "b")));
        assert!(!is_edge_traversed(&path, &Edge::new("a", "c")));

        let hl = PathHighlight::new(&path, EdgeHighlight::Traversed);
        assert!(hl.edge(&Edge::new("b", "c")));
        assert!(!hl.edge(&Edge::new("a", "c")));

        let hl = PathHighlight::new(&path, EdgeHighlight::Membership);
        assert!(hl.edge(&Edge::new("a", "c")));
    }

    #[test]
    fn not_found_path_highlights_nothing() {
        let mut path = PathResponse::not_found("fire", "gps");
        path.ids = ids(&["fire", "gps"]);
        let hl = PathHighlight::new(path.highlighted_ids(), EdgeHighlight::Membership);
        assert!(hl.is_empty());
        assert!(!hl.node("fire"));
        assert!(!hl.edge(&Edge::new("fire", "gps")));
    }

    #[test]
    fn parse_modes() {
        assert_eq!(EdgeHighlight::parse("membership"), Some(EdgeHighlight::Membership));
        assert_eq!(EdgeHighlight::parse("traversed"), Some(EdgeHighlight::Traversed));
        assert_eq!(EdgeHighlight::parse("both"), None);
    }
}
