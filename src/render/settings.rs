use serde::Deserialize;

use crate::config::KernelConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// One generator stream, pixels in reference order.
    #[default]
    Sequential,
    /// Rows on the rayon pool, one generator stream per pixel.
    Parallel,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub mode: RenderMode,
}

impl RenderSettings {
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            mode: RenderMode::Sequential,
        }
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn from_kernel(kernel: &KernelConfig) -> Option<Self> {
        match *kernel {
            KernelConfig::Pixar {
                width,
                height,
                samples_per_pixel,
                mode,
            } => Some(Self::new(width, height, samples_per_pixel).with_mode(mode)),
            _ => None,
        }
    }
}
