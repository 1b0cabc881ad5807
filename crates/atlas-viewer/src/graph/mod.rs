pub mod state;

pub use state::GraphState;
