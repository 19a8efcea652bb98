use log::debug;
use rayon::prelude::*;

use crate::error::RenderError;
use crate::math::{Ray, Vec3};
use crate::render::{validate_settings, RenderMode, RenderSettings, View};
use crate::rng::Mwc;
use crate::scene::Scene;
use crate::trace::PathTracer;

/// Added to every averaged pixel before tone mapping.
pub const EXPOSURE_BIAS: f32 = 14.0 / 241.0;

/// Camera basis for the benchmark view.
///
/// `goal` is the normalised look-at point minus the eye, and `up` uses the
/// in-place [`Vec3::cross`]. Neither is a textbook pinhole setup; the
/// recorded checksums depend on this exact arithmetic.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub goal: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn new(view: View, width: u32) -> Self {
        let goal = view.look_at.normalize() - view.eye;
        let right = Vec3::new(goal.z, 0.0, goal.x).normalize() * (1.0 / width as f32);
        let up = goal.cross(right);
        Self {
            eye: view.eye,
            goal,
            right,
            up,
        }
    }

    pub fn get_ray(&self, column: f32, row: f32) -> Ray {
        let direction = (self.goal + (self.right * column) + (self.up * row)).normalize();
        Ray::new(self.eye, direction)
    }
}

struct Frame<'a> {
    camera: Camera,
    tracer: PathTracer<'a>,
    width: u32,
    height: u32,
    samples: u32,
}

impl Frame<'_> {
    /// Sum of `samples` jittered paths through pixel `(x, y)`. The column
    /// jitter is drawn before the row jitter, then the path's own draws.
    fn accumulate_pixel(&self, x: u32, y: u32, rng: &mut Mwc) -> Vec3 {
        let column = x as f32 - (self.width / 2) as f32;
        let row = y as f32 - (self.height / 2) as f32;
        let mut accumulated = Vec3::ZERO;
        for _ in 0..self.samples {
            let jitter_x = rng.next_float();
            let jitter_y = rng.next_float();
            let ray = self.camera.get_ray(column + jitter_x, row + jitter_y);
            accumulated = accumulated + self.tracer.trace(ray, rng);
        }
        accumulated
    }

    fn shade_pixel(&self, x: u32, y: u32, rng: &mut Mwc) -> Vec3 {
        let accumulated = self.accumulate_pixel(x, y, rng);
        let exposed = (accumulated * (1.0 / self.samples as f32)).add_scalar(EXPOSURE_BIAS);
        tone_map(exposed)
    }
}

/// Largest ratio the tone map lets through; `255 * ratio` stays below 255.
const MAX_TONE_RATIO: f32 = 1.0 - f32::EPSILON;

/// Reinhard curve per channel, scaled to `[0, 255)`.
pub fn tone_map(color: Vec3) -> Vec3 {
    Vec3::new(reinhard(color.x), reinhard(color.y), reinhard(color.z)) * 255.0
}

// c + 1 rounds to c from 2^24 up, so the ratio is capped below one.
fn reinhard(channel: f32) -> f32 {
    let ratio = channel / (channel + 1.0);
    if ratio >= MAX_TONE_RATIO {
        MAX_TONE_RATIO
    } else {
        ratio
    }
}

fn channel_sum(color: Vec3) -> f32 {
    color.x + color.y + color.z
}

/// Renders the benchmark scene with the sequential reference sampler and
/// returns the sum of all tone-mapped channels.
pub fn render_checksum(
    width: u32,
    height: u32,
    samples_per_pixel: u32,
) -> Result<f32, RenderError> {
    render_checksum_with(&RenderSettings::new(width, height, samples_per_pixel))
}

pub fn render_checksum_with(settings: &RenderSettings) -> Result<f32, RenderError> {
    validate_settings(settings)?;

    let scene = Scene::pixar();
    let frame = Frame {
        camera: Camera::new(View::pixar(), settings.width),
        tracer: PathTracer::new(&scene),
        width: settings.width,
        height: settings.height,
        samples: settings.samples_per_pixel,
    };
    debug!(
        "rendering {}x{} at {} spp ({}), camera goal {:?}",
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        settings.mode.as_str(),
        frame.camera.goal
    );

    let checksum = match settings.mode {
        RenderMode::Sequential => render_sequential(&frame),
        RenderMode::Parallel => render_parallel(&frame),
    };
    debug!("checksum {checksum}");
    Ok(checksum)
}

// Rows from `height` down to 1, columns from `width` down to 1, one stream
// reseeded per call.
fn render_sequential(frame: &Frame<'_>) -> f32 {
    let mut rng = Mwc::reference();
    let mut checksum = 0.0;
    for y in (1..=frame.height).rev() {
        for x in (1..=frame.width).rev() {
            checksum += channel_sum(frame.shade_pixel(x, y, &mut rng));
        }
    }
    checksum
}

// Each pixel gets its own stream, so the result is not the sequential
// reference checksum in general. It is the same for any thread count: pixels
// are folded in the sequential pixel order after the parallel pass.
fn render_parallel(frame: &Frame<'_>) -> f32 {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let mut color_buffer = vec![Vec3::ZERO; width * height];

    color_buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row_index, row)| {
            let y = frame.height - row_index as u32;
            for (column_index, color_slot) in row.iter_mut().enumerate() {
                let x = frame.width - column_index as u32;
                let mut rng = Mwc::for_pixel(x, y);
                *color_slot = frame.shade_pixel(x, y, &mut rng);
            }
        });

    color_buffer
        .iter()
        .fold(0.0, |checksum, &color| checksum + channel_sum(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Recorded from the sequential sampler. A change to the vector math, the
    // distance field, the camera or the sampler that moves these values is a
    // regression unless the change says why.
    const GOLDEN_64_64_8: f32 = 1_610_887.4;
    const GOLDEN_16_12_2: f32 = 75_512.984;

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(matches!(
            render_checksum(0, 8, 1),
            Err(RenderError::InvalidArgument { name: "width", .. })
        ));
        assert!(matches!(
            render_checksum(8, 0, 1),
            Err(RenderError::InvalidArgument { name: "height", .. })
        ));
        assert!(matches!(
            render_checksum(8, 8, 0),
            Err(RenderError::InvalidArgument {
                name: "samples_per_pixel",
                ..
            })
        ));
    }

    #[test]
    fn repeated_renders_are_identical() {
        let first = render_checksum(12, 9, 2).expect("valid settings");
        let second = render_checksum(12, 9, 2).expect("valid settings");
        assert_eq!(first.to_bits(), second.to_bits());
        assert!(first.is_finite());
    }

    #[test]
    fn small_render_matches_recorded_checksum() {
        let checksum = render_checksum(16, 12, 2).expect("valid settings");
        assert_relative_eq!(checksum, GOLDEN_16_12_2, max_relative = 1e-4);
    }

    #[test]
    fn reference_render_matches_recorded_checksum() {
        let checksum = render_checksum(64, 64, 8).expect("valid settings");
        assert_relative_eq!(checksum, GOLDEN_64_64_8, max_relative = 1e-4);
    }

    #[test]
    fn checksum_is_bounded_by_pixel_count() {
        let (width, height) = (10, 6);
        let checksum = render_checksum(width, height, 1).expect("valid settings");
        let pixels = (width * height) as f32;
        assert!(checksum > 0.0);
        assert!(checksum <= pixels * 3.0 * 255.0);
    }

    #[test]
    fn parallel_render_is_stable_across_pool_sizes() {
        let settings = RenderSettings::new(12, 8, 2).with_mode(RenderMode::Parallel);
        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .expect("thread pool")
            .install(|| render_checksum_with(&settings))
            .expect("valid settings");
        let several = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .expect("thread pool")
            .install(|| render_checksum_with(&settings))
            .expect("valid settings");
        assert_eq!(single.to_bits(), several.to_bits());
    }

    #[test]
    fn parallel_render_is_bounded_and_finite() {
        let settings = RenderSettings::new(12, 8, 2).with_mode(RenderMode::Parallel);
        let checksum = render_checksum_with(&settings).expect("valid settings");
        assert!(checksum.is_finite());
        assert!(checksum > 0.0);
        assert!(checksum <= (12 * 8) as f32 * 3.0 * 255.0);
    }

    #[test]
    fn every_pixel_lands_in_the_same_band() {
        // With the wide-range sampler, diffuse bounces leave the scene, so
        // each path keeps its initial color and every pixel maps alike.
        let unlit = tone_map(Vec3::ONE.add_scalar(EXPOSURE_BIAS));
        let per_pixel = channel_sum(unlit);
        let checksum = render_checksum(6, 5, 1).expect("valid settings");
        assert_relative_eq!(checksum, per_pixel * 30.0, max_relative = 1e-5);
    }

    #[test]
    fn tone_map_approaches_but_stays_below_full_scale() {
        assert_eq!(tone_map(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(tone_map(Vec3::ONE), Vec3::splat(127.5));

        let mut previous = 0.0;
        for exponent in 0..=20 {
            let c = 10f32.powi(exponent);
            let mapped = tone_map(Vec3::splat(c)).x;
            assert!(mapped < 255.0, "{c} mapped to {mapped}");
            assert!(mapped >= previous, "{c} mapped below a smaller input");
            previous = mapped;
        }
        assert!(previous > 254.99);
    }

    #[test]
    fn tone_map_stays_below_full_scale_past_f32_precision() {
        for c in [16_777_216.0, 2.0e7, 1.0e8, f32::MAX] {
            let mapped = tone_map(Vec3::new(c, c, c));
            assert!(mapped.x < 255.0, "{c} mapped to {}", mapped.x);
            assert_eq!(mapped.x, mapped.y);
            assert_eq!(mapped.y, mapped.z);
        }
    }

    #[test]
    fn camera_right_is_scaled_by_width() {
        let camera = Camera::new(View::pixar(), 64);
        assert_relative_eq!(camera.right.norm_squared().sqrt(), 1.0 / 64.0, epsilon = 1e-6);
        assert_eq!(camera.right.y, 0.0);
        assert_eq!(camera.up, camera.goal.cross(camera.right));
    }
}
