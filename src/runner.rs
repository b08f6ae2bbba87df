use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use hyper::StatusCode;
use tracing::debug;

use crate::args::Config;
use crate::client::HttpGet;
use crate::statistics::{mean, WorkerStats};

/// Fan out `config.processes` workers, wait for all of them, and
/// return the mean of their per-worker mean latencies in seconds.
///
/// A worker that fails (the client call itself returns an error, not
/// an error status) aborts the whole run.
pub(crate) async fn run<C>(config: Arc<Config>, client: C) -> Result<f64>
where
    C: HttpGet + Clone + Send + Sync + 'static,
{
    config.validate()?;
    let mut workers = Vec::with_capacity(config.processes as usize);
    for pid in 0..config.processes {
        workers.push(tokio::spawn(run_worker(
            pid,
            Arc::clone(&config),
            client.clone(),
        )));
    }
    let mut means = Vec::with_capacity(workers.len());
    for worker in workers {
        means.push(worker.await.context("Failed to join worker")??);
    }
    Ok(mean(&means))
}

/// `config.requests` strictly sequential GETs. Timing covers the full
/// request, and an error status still counts as a timed request.
async fn run_worker<C>(pid: u32, config: Arc<Config>, client: C) -> Result<f64>
where
    C: HttpGet + Send + Sync,
{
    debug!(pid, "worker starting");
    let mut stats = WorkerStats::new();
    for count in 0..config.requests {
        let start = Instant::now();
        let response = client.get(&config.url).await?;
        let elapsed = start.elapsed().as_secs_f64();
        if config.verbose && response.status == StatusCode::OK {
            println!("{}", String::from_utf8_lossy(&response.body));
        }
        println!("Process: {pid}, Request: {count}, Elapsed Time: {elapsed:.2}");
        stats.record(elapsed);
    }
    let average = stats.mean();
    println!("Process: {pid}, AVERAGE , Elapsed Time: {average:.2}");
    debug!(pid, average, "worker finished");
    Ok(average)
}
