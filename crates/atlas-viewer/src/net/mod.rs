pub mod protocol;
pub mod worker;

pub use protocol::{Outcome, Request};
pub use worker::{spawn_worker, WorkerHandle};
