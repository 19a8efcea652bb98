use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn add_scalar(self, s: f32) -> Self {
        Self::new(self.x + s, self.y + s, self.z + s)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        (self.x * rhs.x) + (self.y * rhs.y) + (self.z * rhs.z)
    }

    pub fn norm_squared(self) -> f32 {
        self.dot(self)
    }

    /// Scales the vector to unit length.
    ///
    /// The vector must be non-zero. A zero vector is a caller bug: debug
    /// builds panic, release builds produce non-finite components.
    pub fn normalize(self) -> Self {
        let norm_squared = self.norm_squared();
        debug_assert!(norm_squared != 0.0, "normalize called on a zero vector");
        self.scale(1.0 / norm_squared.sqrt())
    }

    /// Cross product as the renderer's camera expects it.
    ///
    /// Components are written in place, so `y` reads the new `x` and `z`
    /// reads the new `x` and `y`. This is not the determinant form; the
    /// scene's camera basis depends on exactly this arithmetic.
    pub fn cross(self, rhs: Self) -> Self {
        let mut out = self;
        out.x = (out.y * rhs.z) - (out.z * rhs.y);
        out.y = (out.z * rhs.x) - (out.x * rhs.z);
        out.z = (out.x * rhs.y) - (out.y * rhs.x);
        out
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(self, t: f32) -> Vec3 {
        self.origin + (self.direction * t)
    }
}

/// Mirrors `direction` about `normal`.
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction + (normal * (normal.dot(direction) * -2.0))
}

pub fn hash_u32(mut value: u32) -> u32 {
    value ^= value >> 16;
    value = value.wrapping_mul(0x7feb_352d);
    value ^= value >> 15;
    value = value.wrapping_mul(0x846c_a68b);
    value ^= value >> 16;
    value
}
