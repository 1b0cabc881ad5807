pub mod highlight;
pub mod label;
pub mod layout;
pub mod model;
pub mod session;

pub use highlight::{
    is_edge_highlighted, is_edge_traversed, is_node_highlighted, EdgeHighlight, PathHighlight,
};
pub use label::{display_label, path_text, summary_text, Labelled};
pub use layout::{layout, layout_with, Edge, Layout, LayoutParams, NodeKind, PositionedNode};
pub use model::{
    BranchCounts, BranchStatsResponse, ContractViolation, Neighbor, NeighborsResponse, NodeLoad,
    PathResponse,
};
pub use session::{
    NodeFlow, NodeRequest, PathFlow, PathRequest, Resolution, Session, SessionDefaults,
};
