use crate::model::{BranchCounts, Neighbor, NeighborsResponse, PathResponse};

pub const SUMMARY_PLACEHOLDER: &str = "Load a node to see its context in the tech tree.";
pub const PATH_NOT_FOUND: &str = "No path found between these nodes.";

/// Anything that carries an id and an optional human label.
pub trait Labelled {
    fn id(&self) -> &str;
    fn label(&self) -> Option<&str>;
}

impl Labelled for Neighbor {
    fn id(&self) -> &str {
        &self.id
    }
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Labelled for NeighborsResponse {
    fn id(&self) -> &str {
        &self.node_id
    }
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// The label when present, the id otherwise.
pub fn display_label<T: Labelled + ?Sized>(entity: &T) -> &str {
    entity.label().unwrap_or_else(|| entity.id())
}

pub fn summary_text(neighbors: &NeighborsResponse, counts: &BranchCounts) -> String {
    format!(
        "Node \"{}\" has {} ancestors and {} descendants (total {}). \
         It has {} direct prerequisites and {} direct downstream technologies.",
        display_label(neighbors),
        counts.ancestor_count,
        counts.descendant_count,
        counts.total_connected,
        neighbors.upstream.len(),
        neighbors.downstream.len(),
    )
}

pub fn path_text(path: &PathResponse) -> String {
    if !path.found {
        return PATH_NOT_FOUND.to_string();
    }
    format!(
        "Path ({} steps):\n{}",
        path.ids.len(),
        path.labels.join(" \u{2192} ")
    )
}
