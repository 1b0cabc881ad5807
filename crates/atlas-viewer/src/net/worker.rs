use anyhow::{Context, Result};
use atlas_client::{ApiError, GraphApi};
use crossbeam_channel::Sender;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::net::{Outcome, Request};

/// Sending side of the request worker. Dropping every handle stops it.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    tx: UnboundedSender<Request>,
}

impl WorkerHandle {
    pub fn send(&self, req: impl Into<Request>) {
        if self.tx.send(req.into()).is_err() {
            tracing::warn!("request worker has stopped; dropping request");
        }
    }
}

/// Runs requests on a dedicated thread with its own tokio runtime. Each
/// request gets its own task, so node and path loads overlap freely and a
/// slow request never blocks a newer one.
pub fn spawn_worker(api: GraphApi, out: Sender<Outcome>) -> Result<WorkerHandle> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("build tokio runtime for request worker")?;
    let (tx, rx) = unbounded_channel();

    std::thread::Builder::new()
        .name("atlas-requests".into())
        .spawn(move || rt.block_on(run(api, rx, out)))
        .context("spawn request worker thread")?;

    Ok(WorkerHandle { tx })
}

async fn run(api: GraphApi, mut rx: UnboundedReceiver<Request>, out: Sender<Outcome>) {
    while let Some(req) = rx.recv().await {
        let api = api.clone();
        let out = out.clone();
        tokio::spawn(async move {
            let outcome = execute(&api, req).await;
            // the viewer is shutting down if nobody is listening
            let _ = out.send(outcome);
        });
    }
    tracing::debug!("request worker finished");
}

pub async fn execute(api: &GraphApi, req: Request) -> Outcome {
    match req {
        Request::Node(r) => {
            tracing::debug!(node_id = %r.node_id, generation = r.generation, "loading node");
            let result = api.load_node(&r.node_id).await.map_err(report);
            Outcome::Node {
                generation: r.generation,
                result,
            }
        }
        Request::Path(r) => {
            tracing::debug!(from = %r.from, to = %r.to, generation = r.generation, "loading path");
            let result = api.path(&r.from, &r.to).await.map_err(report);
            Outcome::Path {
                generation: r.generation,
                result,
            }
        }
    }
}

fn report(e: ApiError) -> String {
    let endpoint = e.endpoint().map(|ep| ep.path()).unwrap_or("-");
    tracing::warn!(endpoint, network = e.is_network(), error = %e, "request failed");
    e.to_string()
}
