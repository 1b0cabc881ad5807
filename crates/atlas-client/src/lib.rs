pub mod api;
pub mod error;

pub use api::{Endpoint, GraphApi, DEFAULT_API_BASE};
pub use error::ApiError;
pub use reqwest;
