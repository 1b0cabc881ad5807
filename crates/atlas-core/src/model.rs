use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

/// A focus node with its direct prerequisites (`upstream`) and direct
/// dependents (`downstream`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborsResponse {
    pub node_id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub upstream: Vec<Neighbor>,
    pub downstream: Vec<Neighbor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCounts {
    pub ancestor_count: u64,
    pub descendant_count: u64,
    pub total_connected: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchStatsResponse {
    pub node_id: String,
    #[serde(flatten)]
    pub counts: BranchCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResponse {
    pub from: String,
    pub to: String,
    pub found: bool,
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl PathResponse {
    pub fn not_found(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            found: false,
            ids: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Ids along the path, or nothing when no path was found.
    pub fn highlighted_ids(&self) -> &[String] {
        if self.found {
            &self.ids
        } else {
            &[]
        }
    }
}

/// Both halves of a node load, resolved together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLoad {
    pub neighbors: NeighborsResponse,
    pub stats: BranchStatsResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("empty node id")]
    EmptyNodeId,
    #[error("empty id in {list} list at index {index}")]
    EmptyNeighborId { list: &'static str, index: usize },
    #[error("path has {ids} ids but {labels} labels")]
    PathLengthMismatch { ids: usize, labels: usize },
    #[error("path marked found but carries no ids")]
    EmptyFoundPath,
    #[error("path endpoints {first}..{last} do not match requested {from}..{to}")]
    PathEndpointMismatch {
        first: String,
        last: String,
        from: String,
        to: String,
    },
}

impl NeighborsResponse {
    pub fn validate(&self) -> Result<(), ContractViolation> {
        if self.node_id.is_empty() {
            return Err(ContractViolation::EmptyNodeId);
        }
        for (list, items) in [("upstream", &self.upstream), ("downstream", &self.downstream)] {
            if let Some(index) = items.iter().position(|n| n.id.is_empty()) {
                return Err(ContractViolation::EmptyNeighborId { list, index });
            }
        }
        Ok(())
    }
}

impl BranchStatsResponse {
    pub fn validate(&self) -> Result<(), ContractViolation> {
        if self.node_id.is_empty() {
            return Err(ContractViolation::EmptyNodeId);
        }
        Ok(())
    }
}

impl PathResponse {
    /// Checks a reply to the `from`..`to` query against the found-path
    /// invariants and drops meaningless ids/labels from a not-found response.
    pub fn validated(mut self, from: &str, to: &str) -> Result<Self, ContractViolation> {
        if !self.found {
            self.ids.clear();
            self.labels.clear();
            return Ok(self);
        }
        if self.ids.len() != self.labels.len() {
            return Err(ContractViolation::PathLengthMismatch {
                ids: self.ids.len(),
                labels: self.labels.len(),
            });
        }
        let (Some(first), Some(last)) = (self.ids.first(), self.ids.last()) else {
            return Err(ContractViolation::EmptyFoundPath);
        };
        if first != from || last != to {
            return Err(ContractViolation::PathEndpointMismatch {
                first: first.clone(),
                last: last.clone(),
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(self)
    }
}
