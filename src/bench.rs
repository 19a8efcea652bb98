use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::{validate_config, KernelConfig, RunConfig, RunOptions};
use crate::cpu::render_checksum_with;
use crate::error::{ConfigError, RenderError};
use crate::kernels::{fibonacci, mandelbrot, nbody, sieve};
use crate::render::RenderSettings;

/// Value a kernel returns, kept so the optimiser cannot drop the work and so
/// runs can be compared against recorded results.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KernelOutput {
    Count(u32),
    Single(f32),
    Double(f64),
}

impl fmt::Display for KernelOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(value) => write!(f, "{value}"),
            Self::Single(value) => write!(f, "{value}"),
            Self::Double(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub kernel: &'static str,
    pub output: KernelOutput,
    pub timings: Vec<Duration>,
}

impl RunReport {
    pub fn fastest(&self) -> Duration {
        self.timings.iter().copied().min().unwrap_or_default()
    }

    pub fn mean(&self) -> Duration {
        if self.timings.is_empty() {
            return Duration::ZERO;
        }
        self.timings.iter().sum::<Duration>() / self.timings.len() as u32
    }
}

pub fn execute(kernel: &KernelConfig) -> Result<KernelOutput, RenderError> {
    let output = match *kernel {
        KernelConfig::Pixar { .. } => {
            let settings =
                RenderSettings::from_kernel(kernel).ok_or(RenderError::InvalidArgument {
                    name: "kernel",
                    reason: "not a render kernel",
                })?;
            KernelOutput::Single(render_checksum_with(&settings)?)
        }
        KernelConfig::Fibonacci { number } => KernelOutput::Count(fibonacci(number)),
        KernelConfig::Mandelbrot {
            width,
            height,
            iterations,
        } => KernelOutput::Single(mandelbrot(width, height, iterations)),
        KernelConfig::NBody { advancements } => KernelOutput::Double(nbody(advancements)),
        KernelConfig::Sieve { iterations } => KernelOutput::Count(sieve(iterations)),
    };
    Ok(output)
}

/// Times `run.repetitions` executions of one kernel after validating the
/// run. Kernels are deterministic, so a repetition whose output differs from
/// the one before it is logged as a warning; the last output is reported.
pub fn run_benchmark(run: &RunConfig, options: RunOptions) -> Result<RunReport, ConfigError> {
    validate_config(run)?;

    let kernel = run.kernel.name();
    if options.warmup {
        debug!("warming up {kernel}");
        execute(&run.kernel)?;
    }

    let mut timings = Vec::with_capacity(run.repetitions as usize);
    let mut output = None;
    for repetition in 0..run.repetitions {
        let started = Instant::now();
        let current = execute(&run.kernel)?;
        let elapsed = started.elapsed();
        timings.push(elapsed);
        debug!(
            "{kernel} repetition {} took {} us",
            repetition + 1,
            elapsed.as_micros()
        );
        record_output(kernel, &mut output, current);
    }

    let output = output.ok_or(ConfigError::ZeroRepetitions)?;
    Ok(RunReport {
        kernel,
        output,
        timings,
    })
}

// Stores `current` as the latest output. Returns false when it differs from
// the previous repetition.
fn record_output(kernel: &str, latest: &mut Option<KernelOutput>, current: KernelOutput) -> bool {
    match latest.replace(current) {
        Some(previous) if previous != current => {
            warn!("{kernel} produced {current} after {previous}");
            false
        }
        _ => true,
    }
}
