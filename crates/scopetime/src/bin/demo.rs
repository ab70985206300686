//! Instruments a small workload and prints the timing report on exit.
//!
//! Report layout is read from `SCOPETIME_ORDER`, `SCOPETIME_OUTPUT` and
//! `SCOPETIME_PRECISION`; log verbosity from `RUST_LOG`.

use anyhow::{Context, anyhow, bail};
use scopetime::{ReportConfig, timed_fn, timed_scope};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const WORKERS: usize = 4;
const JOBS_PER_WORKER: u64 = 50;

fn fibonacci(n: u64) -> u64 {
    timed_fn!();
    if n < 2 { n } else { fibonacci(n - 1) + fibonacci(n - 2) }
}

fn checksum(data: &[u8]) -> anyhow::Result<u32> {
    timed_fn!();
    if data.is_empty() {
        bail!("refusing to checksum an empty buffer");
    }
    Ok(data.iter().fold(0u32, |acc, &b| acc.rotate_left(5) ^ u32::from(b)))
}

fn worker(id: usize) -> u64 {
    timed_fn!();
    (0..JOBS_PER_WORKER)
        .map(|job| {
            timed_scope!("worker_job");
            (job * id as u64).wrapping_mul(2_654_435_761) % 1_000_003
        })
        .sum()
}

/// Run `job` on `workers` threads and sum the results
fn run_workers<F>(workers: usize, job: F) -> anyhow::Result<u64>
where
    F: Fn(usize) -> u64 + Sync,
{
    let job = &job;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|id| scope.spawn(move || job(id)))
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(id, handle)| {
                handle
                    .join()
                    .map_err(|_| anyhow!("worker {id} panicked"))
            })
            .sum()
    })
}

fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout belongs to the report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let config = ReportConfig::from_env().context("invalid SCOPETIME_* settings")?;
    scopetime::profile_run!(config);

    tracing::info!("starting instrumented workload");

    {
        timed_scope!("recursion");
        tracing::info!(result = fibonacci(18), "fibonacci done");
    }

    let buffers: [&[u8]; 3] = [b"scopetime", b"", b"profiling"];
    for buffer in buffers {
        // Failing calls still show up in the report
        match checksum(buffer) {
            Ok(sum) => tracing::debug!(sum, "checksum"),
            Err(err) => tracing::warn!(error = %err, "checksum failed"),
        }
    }

    let total = run_workers(WORKERS, worker)?;
    tracing::info!(total, "workers finished");

    Ok(())
}
