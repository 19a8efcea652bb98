use crate::march::{ray_march, MarchHit};
use crate::math::{reflect, Ray, Vec3};
use crate::rng::Mwc;
use crate::scene::{HitType, Scene};

pub const MAX_BOUNCES: u32 = 3;
const RAY_BIAS: f32 = 0.1;
const BOUNCE_ATTENUATION: f32 = 0.2;
const TWO_PI: f32 = 6.283185;
const SUN_COLOR: Vec3 = Vec3::new(50.0, 80.0, 100.0);
const DIRECT_LIGHT_COLOR: Vec3 = Vec3::new(500.0, 400.0, 100.0);

/// Where a path currently is and what it has gathered so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathState {
    pub origin: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
    pub attenuation: Vec3,
}

impl PathState {
    pub fn new(ray: Ray) -> Self {
        Self {
            origin: ray.origin,
            direction: ray.direction,
            color: Vec3::ONE,
            attenuation: Vec3::ONE,
        }
    }

    pub fn ray(&self) -> Ray {
        Ray::new(self.origin, self.direction)
    }
}

pub struct PathTracer<'a> {
    scene: &'a Scene,
    light_direction: Vec3,
}

impl<'a> PathTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            light_direction: Vec3::new(0.6, 0.6, 1.0).normalize(),
        }
    }

    pub fn light_direction(&self) -> Vec3 {
        self.light_direction
    }

    /// Follows one camera ray for up to [`MAX_BOUNCES`] surface
    /// interactions. A miss still spends its bounce; only the sun ends the
    /// path early.
    pub fn trace(&self, ray: Ray, rng: &mut Mwc) -> Vec3 {
        let mut path = PathState::new(ray);
        for _ in 0..MAX_BOUNCES {
            let hit = ray_march(self.scene, path.ray());
            if !self.scatter(&mut path, &hit, rng) {
                break;
            }
        }
        path.color
    }

    /// Applies one surface interaction to `path`. Returns `false` once the
    /// path has ended on the sun.
    pub fn scatter(&self, path: &mut PathState, hit: &MarchHit, rng: &mut Mwc) -> bool {
        match hit.hit_type {
            HitType::None => {}
            HitType::Letter => {
                path.direction = reflect(path.direction, hit.normal);
                path.origin = hit.position + (path.direction * RAY_BIAS);
                path.attenuation = path.attenuation * BOUNCE_ATTENUATION;
            }
            HitType::Wall => {
                let incidence = hit.normal.dot(self.light_direction);
                path.direction = diffuse_direction(hit.normal, rng);
                path.origin = hit.position + (path.direction * RAY_BIAS);
                path.attenuation = path.attenuation * BOUNCE_ATTENUATION;
                path.color = wall_light(path.color, path.attenuation, incidence, || {
                    self.sun_visible(hit.position + (hit.normal * RAY_BIAS))
                });
            }
            HitType::Sun => {
                path.color = (path.color + path.attenuation) * SUN_COLOR;
                return false;
            }
        }
        true
    }

    /// Shadow test: true when a ray from `origin` toward the light ends on
    /// the sun.
    pub fn sun_visible(&self, origin: Vec3) -> bool {
        ray_march(self.scene, Ray::new(origin, self.light_direction)).hit_type == HitType::Sun
    }
}

/// Adds direct sunlight at a wall hit. The shadow test only runs when the
/// surface faces the light.
pub fn wall_light(
    color: Vec3,
    attenuation: Vec3,
    incidence: f32,
    sun_visible: impl FnOnce() -> bool,
) -> Vec3 {
    if incidence > 0.0 && sun_visible() {
        color + direct_light(color, attenuation, incidence)
    } else {
        color
    }
}

pub fn direct_light(color: Vec3, attenuation: Vec3, incidence: f32) -> Vec3 {
    (color + attenuation) * DIRECT_LIGHT_COLOR * incidence
}

/// Cosine-weighted direction around `normal` from two draws, using an
/// orthonormal tangent frame that stays well defined when `normal.z` is
/// negative.
pub fn diffuse_direction(normal: Vec3, rng: &mut Mwc) -> Vec3 {
    let p = TWO_PI * rng.next_float();
    let c = rng.next_float();
    let s = (1.0 - c).sqrt();
    let g = if normal.z < 0.0 { -1.0 } else { 1.0 };
    let u = -1.0 / (g + normal.z);
    let v = normal.x * normal.y * u;

    let tangent = Vec3::new(v, g + (normal.y * normal.y * u), -normal.y);
    let bitangent = Vec3::new(1.0 + (g * normal.x * normal.x * u), g * v, -g * normal.x);
    (tangent * (p.cos() * s)) + (bitangent * (p.sin() * s)) + (normal * c.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor_hit(scene: &Scene) -> MarchHit {
        ray_march(
            scene,
            Ray::new(Vec3::new(25.0, 10.0, 25.0), Vec3::new(0.0, -1.0, 0.0)),
        )
    }

    #[test]
    fn ray_into_the_sun_returns_sun_color() {
        let scene = Scene::pixar();
        let tracer = PathTracer::new(&scene);
        let mut rng = Mwc::reference();
        let color = tracer.trace(
            Ray::new(Vec3::new(24.0, 10.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            &mut rng,
        );
        assert_eq!(color, Vec3::new(100.0, 160.0, 200.0));
        // no wall was hit, so nothing was drawn
        assert_eq!(rng, Mwc::reference());
    }

    #[test]
    fn miss_consumes_bounces_and_keeps_color() {
        let scene = Scene::pixar();
        let tracer = PathTracer::new(&scene);
        let mut rng = Mwc::reference();
        let color = tracer.trace(
            Ray::new(Vec3::splat(f32::NAN), Vec3::new(0.0, 1.0, 0.0)),
            &mut rng,
        );
        assert_eq!(color, Vec3::ONE);
    }

    #[test]
    fn floor_normal_faces_the_light() {
        let scene = Scene::pixar();
        let tracer = PathTracer::new(&scene);
        let hit = floor_hit(&scene);
        assert!(hit.normal.dot(tracer.light_direction()) > 0.0);
    }

    #[test]
    fn wall_facing_away_from_light_adds_no_direct_light() {
        // Ceiling plank undersides face -y; the light has +y, so incidence is
        // negative and the path cannot gain direct light there.
        let scene = Scene::pixar();
        let tracer = PathTracer::new(&scene);
        let hit = ray_march(
            &scene,
            Ray::new(Vec3::new(4.0, 10.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        );
        assert_eq!(hit.hit_type, HitType::Wall);
        assert!(hit.normal.dot(tracer.light_direction()) <= 0.0);

        let mut rng = Mwc::reference();
        let color = tracer.trace(
            Ray::new(Vec3::new(4.0, 10.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            &mut rng,
        );
        // the diffuse draw sends the path off with a non-finite direction,
        // so every later bounce misses and the color stays untouched
        assert_eq!(color, Vec3::ONE);
    }

    #[test]
    fn lit_floor_gains_direct_light() {
        let scene = Scene::pixar();
        let tracer = PathTracer::new(&scene);
        let mut rng = Mwc::reference();
        let color = tracer.trace(
            Ray::new(Vec3::new(-3.0, 5.0, -24.0), Vec3::new(0.0, -1.0, 0.0)),
            &mut rng,
        );
        // (1 + 0.2) * (500, 400, 100) * incidence, plus the initial color
        assert_relative_eq!(color.x, 275.497_44, max_relative = 1e-5);
        assert_relative_eq!(color.y, 220.597_98, max_relative = 1e-5);
        assert_relative_eq!(color.z, 55.899_494, max_relative = 1e-5);
    }

    #[test]
    fn letter_hit_mirrors_and_attenuates() {
        let scene = Scene::pixar();
        let tracer = PathTracer::new(&scene);
        let ray = Ray::new(Vec3::new(-13.0, 4.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = ray_march(&scene, ray);
        assert_eq!(hit.hit_type, HitType::Letter);

        let mut path = PathState::new(ray);
        let mut rng = Mwc::reference();
        assert!(tracer.scatter(&mut path, &hit, &mut rng));

        let mirrored = reflect(ray.direction, hit.normal);
        assert_eq!(path.direction, mirrored);
        assert!(path.direction.z > 0.9);
        assert_eq!(path.origin, hit.position + (mirrored * RAY_BIAS));
        assert_eq!(path.attenuation, Vec3::splat(BOUNCE_ATTENUATION));
        assert_eq!(path.color, Vec3::ONE);
        // mirrors draw nothing
        assert_eq!(rng, Mwc::reference());
    }

    #[test]
    fn sun_hit_ends_the_path() {
        let scene = Scene::pixar();
        let tracer = PathTracer::new(&scene);
        let ray = Ray::new(Vec3::new(24.0, 10.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let hit = ray_march(&scene, ray);
        let mut path = PathState::new(ray);
        assert!(!tracer.scatter(&mut path, &hit, &mut Mwc::reference()));
        assert_eq!(path.color, Vec3::new(100.0, 160.0, 200.0));
    }

    #[test]
    fn wall_light_needs_incidence_and_a_clear_sun() {
        let lit = wall_light(Vec3::ONE, Vec3::ONE, 0.5, || true);
        assert_eq!(lit, Vec3::new(501.0, 401.0, 101.0));
        assert_eq!(wall_light(Vec3::ONE, Vec3::ONE, 0.5, || false), Vec3::ONE);
        assert_eq!(wall_light(Vec3::ONE, Vec3::ONE, 0.0, || true), Vec3::ONE);
        assert_eq!(wall_light(Vec3::ONE, Vec3::ONE, -0.5, || true), Vec3::ONE);
    }

    #[test]
    fn wall_facing_away_skips_the_shadow_ray() {
        let color = wall_light(Vec3::ONE, Vec3::ONE, -0.25, || {
            panic!("shadow ray cast for a wall facing away from the light")
        });
        assert_eq!(color, Vec3::ONE);
    }

    #[test]
    fn direct_light_scales_with_incidence() {
        let half = direct_light(Vec3::ONE, Vec3::ONE, 0.5);
        assert_eq!(half, Vec3::new(500.0, 400.0, 100.0));
        assert_eq!(direct_light(Vec3::ONE, Vec3::ONE, 0.0), Vec3::ZERO);
    }

    #[test]
    fn diffuse_direction_draws_twice() {
        let mut rng = Mwc::reference();
        let _ = diffuse_direction(Vec3::new(0.0, 1.0, 0.0), &mut rng);
        let mut expected = Mwc::reference();
        expected.next_float();
        expected.next_float();
        assert_eq!(rng, expected);
    }
}
