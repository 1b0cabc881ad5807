use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::label::display_label;
use crate::model::{Neighbor, NeighborsResponse};

pub const RING_RADIUS: f32 = 4.0;
pub const RING_HEIGHT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Center,
    Upstream,
    Downstream,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Upstream => "upstream",
            Self::Downstream => "downstream",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn center(&self) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Center)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub radius: f32,
    /// Upstream ring sits at `+height`, downstream ring at `-height`.
    pub height: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            radius: RING_RADIUS,
            height: RING_HEIGHT,
        }
    }
}

pub fn layout(data: Option<&NeighborsResponse>) -> Layout {
    layout_with(data, &LayoutParams::default())
}

/// Places the focus node at the origin, its prerequisites on a ring above it
/// and its dependents on a ring below it.
///
/// Every neighbor id appears at most once. An id listed as both upstream and
/// downstream (a 2-cycle) is placed on the downstream ring only, but keeps
/// both edges. Repeats within one list and neighbors naming the focus node
/// itself are dropped.
pub fn layout_with(data: Option<&NeighborsResponse>, params: &LayoutParams) -> Layout {
    let Some(data) = data else {
        return Layout::default();
    };

    let center_id = data.node_id.as_str();
    let mut out = Layout::default();
    out.nodes.push(PositionedNode {
        id: center_id.to_string(),
        label: display_label(data).to_string(),
        x: 0.0,
        y: 0.0,
        z: 0.0,
        kind: NodeKind::Center,
    });

    let downstream = distinct(&data.downstream, center_id);
    let downstream_ids: HashSet<&str> = downstream.iter().map(|n| n.id.as_str()).collect();
    let upstream = distinct(&data.upstream, center_id);

    let upstream_placed: Vec<&Neighbor> = upstream
        .iter()
        .copied()
        .filter(|n| !downstream_ids.contains(n.id.as_str()))
        .collect();

    place_ring(
        &mut out.nodes,
        &upstream_placed,
        params.radius,
        params.height,
        NodeKind::Upstream,
    );
    for n in &upstream {
        out.edges.push(Edge::new(n.id.as_str(), center_id));
    }

    place_ring(
        &mut out.nodes,
        &downstream,
        params.radius,
        -params.height,
        NodeKind::Downstream,
    );
    for n in &downstream {
        out.edges.push(Edge::new(center_id, n.id.as_str()));
    }

    out
}

fn distinct<'a>(items: &'a [Neighbor], center_id: &str) -> Vec<&'a Neighbor> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for n in items {
        if n.id != center_id && seen.insert(n.id.as_str()) {
            out.push(n);
        }
    }
    out
}

fn place_ring(out: &mut Vec<PositionedNode>, items: &[&Neighbor], r: f32, y: f32, kind: NodeKind) {
    let n = items.len().max(1) as f32;
    for (i, item) in items.iter().enumerate() {
        let t = (i as f32) / n * std::f32::consts::TAU;
        out.push(PositionedNode {
            id: item.id.clone(),
            label: display_label(*item).to_string(),
            x: r * t.cos(),
            y,
            z: r * t.sin(),
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nb(id: &str) -> Neighbor {
        Neighbor {
            id: id.to_string(),
            label: None,
            relation: None,
        }
    }

    fn response(up: &[&str], down: &[&str]) -> NeighborsResponse {
        NeighborsResponse {
            node_id: "center".into(),
            label: None,
            upstream: up.iter().map(|id| nb(id)).collect(),
            downstream: down.iter().map(|id| nb(id)).collect(),
        }
    }

    #[test]
    fn absent_data_yields_empty_layout() {
        assert_eq!(layout(None), Layout::default());
    }

    #[test]
    fn single_downstream_neighbor() {
        let data = NeighborsResponse {
            node_id: "fire".into(),
            label: Some("Fire".into()),
            upstream: vec![],
            downstream: vec![Neighbor {
                id: "cooking".into(),
                label: Some("Cooking".into()),
                relation: None,
            }],
        };
        let out = layout(Some(&data));

        assert_eq!(out.nodes.len(), 2);
        let fire = out.center().expect("center");
        assert_eq!((fire.id.as_str(), fire.label.as_str()), ("fire", "Fire"));
        assert_eq!((fire.x, fire.y, fire.z), (0.0, 0.0, 0.0));

        let cooking = out.node("cooking").expect("cooking");
        assert_eq!(cooking.kind, NodeKind::Downstream);
        assert_eq!(cooking.label, "Cooking");
        assert!((cooking.x - 4.0).abs() < 1e-5);
        assert_eq!(cooking.y, -2.0);
        assert!(cooking.z.abs() < 1e-5);

        assert_eq!(out.edges, vec![Edge::new("fire", "cooking")]);
    }

    #[test]
    fn counts_cover_every_distinct_neighbor() {
        let data = response(&["a", "b", "c"], &["d", "e"]);
        let out = layout(Some(&data));
        assert_eq!(out.nodes.len(), 1 + 3 + 2);
        assert_eq!(out.edges.len(), 3 + 2);
        assert!(out.edges.contains(&Edge::new("a", "center")));
        assert!(out.edges.contains(&Edge::new("center", "e")));
    }

    #[test]
    fn upstream_ring_geometry() {
        let ids = ["a", "b", "c", "d", "e"];
        let data = response(&ids, &[]);
        let out = layout(Some(&data));
        let ups: Vec<_> = out
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Upstream)
            .collect();
        assert_eq!(ups.len(), ids.len());

        for (i, n) in ups.iter().enumerate() {
            assert_eq!(n.id, ids[i]);
            assert_eq!(n.y, 2.0);
            assert!(((n.x * n.x + n.z * n.z).sqrt() - 4.0).abs() < 1e-4);

            let expected = std::f32::consts::TAU * i as f32 / ids.len() as f32;
            let actual = n.z.atan2(n.x).rem_euclid(std::f32::consts::TAU);
            let diff = (actual - expected).abs();
            assert!(
                diff < 1e-4 || (std::f32::consts::TAU - diff) < 1e-4,
                "node {i}: {actual} vs {expected}"
            );
        }
    }

    #[test]
    fn labels_fall_back_to_ids() {
        let out = layout(Some(&response(&["a"], &[])));
        assert_eq!(out.center().map(|n| n.label.as_str()), Some("center"));
        assert_eq!(out.node("a").map(|n| n.label.as_str()), Some("a"));
    }

    #[test]
    fn layout_is_repeatable() {
        let data = response(&["a", "b"], &["c", "d", "e"]);
        assert_eq!(layout(Some(&data)), layout(Some(&data)));
    }

    #[test]
    fn two_cycle_neighbor_is_placed_once_on_downstream_ring() {
        let data = response(&["a", "loop"], &["loop", "b"]);
        let out = layout(Some(&data));

        let looped: Vec<_> = out.nodes.iter().filter(|n| n.id == "loop").collect();
        assert_eq!(looped.len(), 1);
        assert_eq!(looped[0].kind, NodeKind::Downstream);

        // remaining upstream neighbor gets the whole ring
        let a = out.node("a").expect("a");
        assert!((a.x - 4.0).abs() < 1e-5);

        assert!(out.edges.contains(&Edge::new("loop", "center")));
        assert!(out.edges.contains(&Edge::new("center", "loop")));
        assert_eq!(out.nodes.len(), 4);
        assert_eq!(out.edges.len(), 4);
    }

    #[test]
    fn repeats_and_self_references_are_dropped() {
        let data = response(&["a", "a", "center"], &[]);
        let out = layout(Some(&data));
        assert_eq!(out.nodes.len(), 2);
        assert_eq!(out.edges, vec![Edge::new("a", "center")]);
    }

    #[test]
    fn params_scale_the_rings() {
        let params = LayoutParams {
            radius: 10.0,
            height: 5.0,
        };
        let out = layout_with(Some(&response(&["a"], &["b"])), &params);
        let a = out.node("a").expect("a");
        let b = out.node("b").expect("b");
        assert_eq!((a.y, b.y), (5.0, -5.0));
        assert!((a.x - 10.0).abs() < 1e-5);
    }
}
