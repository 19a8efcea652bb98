use std::io::{self, Read};

use anyhow::{Context, Result};
use log::info;

use numbench::bench::run_benchmark;
use numbench::config::{validate_config, IncomingConfig, RunOptions};

fn main() -> Result<()> {
    env_logger::init();

    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read run configuration from stdin")?;

    let runs = IncomingConfig::parse(&raw).context("invalid run configuration")?;
    for (index, run) in runs.iter().enumerate() {
        validate_config(run)
            .with_context(|| format!("run {} ({}) is invalid", index + 1, run.kernel.name()))?;
    }

    let options = RunOptions::from_env();
    let mut pool_builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = options.threads {
        pool_builder = pool_builder.num_threads(threads);
    }
    let pool = pool_builder
        .build()
        .context("failed to build worker pool")?;
    info!(
        "{} run(s), {} worker thread(s), warmup {}",
        runs.len(),
        pool.current_num_threads(),
        options.warmup
    );

    let total = runs.len();
    for (index, run) in runs.iter().enumerate() {
        let report = pool
            .install(|| run_benchmark(run, options))
            .with_context(|| format!("{} benchmark failed", run.kernel.name()))?;

        println!(
            "[{}/{}] {} x{} in {} ms (mean {} ms): {}",
            index + 1,
            total,
            report.kernel,
            report.timings.len(),
            report.fastest().as_millis(),
            report.mean().as_millis(),
            report.output
        );
    }

    Ok(())
}
