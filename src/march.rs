use crate::math::{Ray, Vec3};
use crate::scene::{HitType, Scene};

pub const MAX_MARCH_STEPS: u32 = 100;
pub const MAX_TRACE_DISTANCE: f32 = 100.0;
pub const HIT_EPSILON: f32 = 0.01;
pub const NORMAL_EPSILON: f32 = 0.01;

#[derive(Clone, Copy, Debug)]
pub struct MarchHit {
    pub hit_type: HitType,
    /// Scene distance at `position`. For a miss, the distance travelled.
    pub distance: f32,
    pub position: Vec3,
    pub normal: Vec3,
    pub steps: u32,
}

impl MarchHit {
    pub fn is_miss(&self) -> bool {
        self.hit_type == HitType::None
    }
}

/// Sphere-traces `ray` through `scene`.
///
/// Stops on the first sample closer than [`HIT_EPSILON`], or on the
/// [`MAX_MARCH_STEPS`]th sample, whichever comes first; both report the
/// sample's surface. Travelling past [`MAX_TRACE_DISTANCE`] is a miss.
pub fn ray_march(scene: &Scene, ray: Ray) -> MarchHit {
    let mut t = 0.0;
    let mut steps = 0;

    while t < MAX_TRACE_DISTANCE {
        let position = ray.at(t);
        let sample = scene.sample(position);
        steps += 1;

        if sample.distance < HIT_EPSILON || steps >= MAX_MARCH_STEPS {
            return MarchHit {
                hit_type: sample.hit_type,
                distance: sample.distance,
                position,
                normal: estimate_normal(scene, position, sample.distance),
                steps,
            };
        }

        t += sample.distance;
    }

    MarchHit {
        hit_type: HitType::None,
        distance: t,
        position: ray.at(t),
        normal: Vec3::ZERO,
        steps,
    }
}

/// Forward-difference gradient of the distance field at `p`, where the
/// field already evaluated to `distance`.
pub fn estimate_normal(scene: &Scene, p: Vec3, distance: f32) -> Vec3 {
    let e = NORMAL_EPSILON;
    Vec3::new(
        scene.distance(p + Vec3::new(e, 0.0, 0.0)) - distance,
        scene.distance(p + Vec3::new(0.0, e, 0.0)) - distance,
        scene.distance(p + Vec3::new(0.0, 0.0, e)) - distance,
    )
    .normalize()
}
