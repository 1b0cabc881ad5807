use atlas_core::{BranchStatsResponse, NeighborsResponse, NodeLoad, PathResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::error::ApiError;

pub const DEFAULT_API_BASE: &str = "https://atlas-graph-api.onrender.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Neighbors,
    BranchStats,
    Path,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Neighbors => "/graph/neighbors",
            Self::BranchStats => "/graph/branch-stats",
            Self::Path => "/graph/path",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeBody<'a> {
    node_id: &'a str,
}

#[derive(Serialize)]
struct PathBody<'a> {
    from: &'a str,
    to: &'a str,
}

/// Client for the graph query service. Cheap to clone; clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct GraphApi {
    http: reqwest::Client,
    base: String,
}

impl GraphApi {
    pub fn new(base: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build().map_err(ApiError::Setup)?;
        Ok(Self::with_client(base, http))
    }

    pub fn with_client(base: impl Into<String>, http: reqwest::Client) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { http, base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub async fn neighbors(&self, node_id: &str) -> Result<NeighborsResponse, ApiError> {
        let endpoint = Endpoint::Neighbors;
        let res: NeighborsResponse = self.post(endpoint, &NodeBody { node_id }).await?;
        res.validate().map_err(|e| ApiError::Malformed {
            endpoint,
            detail: e.to_string(),
        })?;
        Ok(res)
    }

    pub async fn branch_stats(&self, node_id: &str) -> Result<BranchStatsResponse, ApiError> {
        let endpoint = Endpoint::BranchStats;
        let res: BranchStatsResponse = self.post(endpoint, &NodeBody { node_id }).await?;
        res.validate().map_err(|e| ApiError::Malformed {
            endpoint,
            detail: e.to_string(),
        })?;
        Ok(res)
    }

    pub async fn path(&self, from: &str, to: &str) -> Result<PathResponse, ApiError> {
        let endpoint = Endpoint::Path;
        let res: PathResponse = self.post(endpoint, &PathBody { from, to }).await?;
        res.validated(from, to).map_err(|e| ApiError::Malformed {
            endpoint,
            detail: e.to_string(),
        })
    }

    /// Issues the neighbors and branch-stats requests together and waits for
    /// both. The first error (neighbors before stats) fails the whole load.
    pub async fn load_node(&self, node_id: &str) -> Result<NodeLoad, ApiError> {
        let (neighbors, stats) = tokio::join!(self.neighbors(node_id), self.branch_stats(node_id));
        Ok(NodeLoad {
            neighbors: neighbors?,
            stats: stats?,
        })
    }

    async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base, endpoint.path());
        tracing::debug!(%url, "POST");

        let res = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Malformed {
            endpoint,
            detail: e.to_string(),
        })
    }
}
