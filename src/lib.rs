//! Numeric micro-benchmarks, centred on a small signed-distance-field path
//! tracer whose checksum doubles as a regression value.

pub mod bench;
pub mod config;
pub mod cpu;
pub mod error;
pub mod kernels;
pub mod march;
pub mod math;
pub mod render;
pub mod rng;
pub mod scene;
pub mod trace;

pub use cpu::{render_checksum, render_checksum_with};
