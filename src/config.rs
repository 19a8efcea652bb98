use serde::Deserialize;

use crate::error::ConfigError;
use crate::render::{validate_settings, RenderMode, RenderSettings};

/// Largest argument whose `fibonacci` result still fits in a `u32`.
pub const MAX_FIBONACCI_NUMBER: u32 = 46;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(
    tag = "kernel",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum KernelConfig {
    Pixar {
        width: u32,
        height: u32,
        #[serde(default = "default_samples_per_pixel")]
        samples_per_pixel: u32,
        #[serde(default)]
        mode: RenderMode,
    },
    Fibonacci {
        number: u32,
    },
    Mandelbrot {
        width: u32,
        height: u32,
        iterations: u32,
    },
    NBody {
        advancements: u32,
    },
    Sieve {
        iterations: u32,
    },
}

impl KernelConfig {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pixar { .. } => "pixar",
            Self::Fibonacci { .. } => "fibonacci",
            Self::Mandelbrot { .. } => "mandelbrot",
            Self::NBody { .. } => "nBody",
            Self::Sieve { .. } => "sieve",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    #[serde(flatten)]
    pub kernel: KernelConfig,
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunBatchConfig {
    pub runs: Vec<RunConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncomingConfig {
    Single(RunConfig),
    Batch(RunBatchConfig),
}

impl IncomingConfig {
    pub fn parse(raw: &str) -> Result<Vec<RunConfig>, ConfigError> {
        let runs = match serde_json::from_str::<IncomingConfig>(raw)? {
            IncomingConfig::Single(run) => vec![run],
            IncomingConfig::Batch(batch) => batch.runs,
        };
        if runs.is_empty() {
            return Err(ConfigError::EmptyBatch);
        }
        Ok(runs)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    /// Run one untimed repetition before measuring.
    pub warmup: bool,
    /// Worker count for parallel renders; `None` keeps rayon's default.
    pub threads: Option<usize>,
}

impl RunOptions {
    pub fn from_env() -> Self {
        let warmup = std::env::var("NUMBENCH_WARMUP")
            .ok()
            .and_then(|raw| parse_bool(&raw))
            .unwrap_or(false);
        let threads = std::env::var("NUMBENCH_THREADS")
            .ok()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|&threads| threads > 0);

        Self { warmup, threads }
    }
}

const fn default_samples_per_pixel() -> u32 {
    1
}

const fn default_repetitions() -> u32 {
    1
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.repetitions == 0 {
        return Err(ConfigError::ZeroRepetitions);
    }

    match config.kernel {
        KernelConfig::Pixar {
            width,
            height,
            samples_per_pixel,
            mode,
        } => {
            let settings = RenderSettings::new(width, height, samples_per_pixel).with_mode(mode);
            validate_settings(&settings)?;
        }
        KernelConfig::Fibonacci { number } => {
            if number > MAX_FIBONACCI_NUMBER {
                return Err(ConfigError::InvalidParameters {
                    kernel: "fibonacci",
                    reason: format!(
                        "number {number} overflows u32; the largest supported is {MAX_FIBONACCI_NUMBER}"
                    ),
                });
            }
        }
        KernelConfig::Mandelbrot { width, height, .. } => {
            if width == 0 || height == 0 {
                return Err(ConfigError::InvalidParameters {
                    kernel: "mandelbrot",
                    reason: "width and height must be positive".into(),
                });
            }
        }
        KernelConfig::NBody { .. } | KernelConfig::Sieve { .. } => {}
    }

    Ok(())
}
