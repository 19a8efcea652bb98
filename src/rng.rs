use std::f64::consts::PI;

use crate::math::hash_u32;

pub const REFERENCE_SEED: (u32, u32) = (666, 999);

/// Two-lane multiply-with-carry generator.
///
/// Draws are not normalised to `[0, 1)`: the 32-bit lane sum plus one is
/// scaled by pi, so values range up to roughly 1.35e10. The tracer only uses
/// them as scalar jitter and angles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mwc {
    z: u32,
    w: u32,
}

impl Mwc {
    pub const fn new(z: u32, w: u32) -> Self {
        Self { z, w }
    }

    pub const fn reference() -> Self {
        Self::new(REFERENCE_SEED.0, REFERENCE_SEED.1)
    }

    /// Independent stream for one pixel of a parallel render.
    pub fn for_pixel(x: u32, y: u32) -> Self {
        let seed = x
            .wrapping_mul(1973)
            .wrapping_add(y.wrapping_mul(9277))
            ^ 0x68bc_21eb;
        let z = hash_u32(seed);
        let w = hash_u32(z ^ 0x2545_f491);
        // an all-zero lane never leaves zero
        Self::new(z.max(1), w.max(1))
    }

    pub fn state(&self) -> (u32, u32) {
        (self.z, self.w)
    }

    pub fn next_float(&mut self) -> f32 {
        self.z = 36969u32
            .wrapping_mul(self.z & 0xFFFF)
            .wrapping_add(self.z >> 16);
        self.w = 18000u32
            .wrapping_mul(self.w & 0xFFFF)
            .wrapping_add(self.w >> 16);
        let bits = (self.z << 16).wrapping_add(self.w);
        ((f64::from(bits) + 1.0) * PI) as f32
    }
}

impl Default for Mwc {
    fn default() -> Self {
        Self::reference()
    }
}
