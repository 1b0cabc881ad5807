use atlas_core::{NodeLoad, NodeRequest, PathRequest, PathResponse};

/// Work handed from the UI thread to the request worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Node(NodeRequest),
    Path(PathRequest),
}

impl From<NodeRequest> for Request {
    fn from(req: NodeRequest) -> Self {
        Self::Node(req)
    }
}

impl From<PathRequest> for Request {
    fn from(req: PathRequest) -> Self {
        Self::Path(req)
    }
}

/// A finished request, tagged with the generation it was issued under.
#[derive(Debug, Clone)]
pub enum Outcome {
    Node {
        generation: u64,
        result: Result<NodeLoad, String>,
    },
    Path {
        generation: u64,
        result: Result<PathResponse, String>,
    },
}

impl Outcome {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Node { generation, .. } | Self::Path { generation, .. } => *generation,
        }
    }
}
