use crate::math::Vec3;

#[derive(Clone, Copy, Debug)]
pub struct View {
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl View {
    pub const fn pixar() -> Self {
        Self {
            eye: Vec3::new(-22.0, 5.0, 25.0),
            look_at: Vec3::new(-3.0, 4.0, 0.0),
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::pixar()
    }
}
