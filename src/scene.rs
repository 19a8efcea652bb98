use crate::math::Vec3;

/// Surface classification returned with every distance sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitType {
    None,
    Letter,
    Wall,
    Sun,
}

#[derive(Clone, Copy, Debug)]
pub struct SdfSample {
    pub distance: f32,
    pub hit_type: HitType,
}

/// One straight glyph stroke in the z = 0 plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphSegment {
    pub begin: Vec3,
    pub extent: Vec3,
}

impl GlyphSegment {
    pub fn new(begin: Vec3, end: Vec3) -> Self {
        Self {
            begin,
            extent: end - begin,
        }
    }

    /// Decodes a stroke packed as four ASCII bytes `x0 y0 x1 y1`, each
    /// offset by 79 and in half-unit steps.
    pub fn from_stroke(stroke: [u8; 4]) -> Self {
        let coord = |byte: u8| (f32::from(byte) - 79.0) * 0.5;
        Self::new(
            Vec3::new(coord(stroke[0]), coord(stroke[1]), 0.0),
            Vec3::new(coord(stroke[2]), coord(stroke[3]), 0.0),
        )
    }

    pub fn end(&self) -> Vec3 {
        self.begin + self.extent
    }

    pub fn distance_squared(&self, flat: Vec3) -> f32 {
        let along = (self.begin - flat).dot(self.extent) / self.extent.dot(self.extent);
        let t = (-along.min(0.0)).min(1.0);
        let offset = flat - (self.begin + (self.extent * t));
        offset.dot(offset)
    }
}

/// Half ring closing the bowl of a glyph. Right of the anchor it is a
/// ring of `radius`; left of it, the distance to the ring's end points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphCurve {
    pub anchor: Vec3,
    pub radius: f32,
}

impl GlyphCurve {
    pub fn distance(&self, flat: Vec3) -> f32 {
        let mut offset = flat - self.anchor;
        if offset.x > 0.0 {
            (offset.dot(offset).sqrt() - self.radius).abs()
        } else {
            offset.y += if offset.y > 0.0 {
                -self.radius
            } else {
                self.radius
            };
            offset.dot(offset).sqrt()
        }
    }
}

pub const PIXAR_STROKES: [[u8; 4]; 15] = [
    // P
    *b"5O5_",
    *b"5W9W",
    *b"5_9_",
    // I
    *b"AOEO",
    *b"COC_",
    *b"A_E_",
    // X
    *b"IOQ_",
    *b"I_QO",
    // A
    *b"UOY_",
    *b"Y_]O",
    *b"WW[W",
    // R
    *b"aOa_",
    *b"aWeW",
    *b"a_e_",
    *b"cWiO",
];

#[derive(Clone, Debug, Default)]
pub struct GlyphSet {
    pub segments: Vec<GlyphSegment>,
    pub curves: Vec<GlyphCurve>,
}

impl GlyphSet {
    pub fn from_strokes(strokes: &[[u8; 4]], curves: Vec<GlyphCurve>) -> Self {
        Self {
            segments: strokes.iter().copied().map(GlyphSegment::from_stroke).collect(),
            curves,
        }
    }

    pub fn pixar() -> Self {
        Self::from_strokes(
            &PIXAR_STROKES,
            vec![
                GlyphCurve {
                    anchor: Vec3::new(-11.0, 6.0, 0.0),
                    radius: 2.0,
                },
                GlyphCurve {
                    anchor: Vec3::new(11.0, 6.0, 0.0),
                    radius: 2.0,
                },
            ],
        )
    }

    /// Planar distance from `point.xy` to the nearest stroke or curve.
    pub fn flat_distance(&self, point: Vec3) -> f32 {
        let flat = Vec3::new(point.x, point.y, 0.0);
        let nearest_squared = self
            .segments
            .iter()
            .fold(1e9_f32, |best, segment| best.min(segment.distance_squared(flat)));
        self.curves
            .iter()
            .fold(nearest_squared.sqrt(), |best, curve| best.min(curve.distance(flat)))
    }

    /// Extrudes the planar field along z with rounded, finite depth.
    pub fn distance(&self, point: Vec3) -> f32 {
        let flat = self.flat_distance(point);
        (flat.powf(8.0) + point.z.powf(8.0)).powf(0.125) - 0.5
    }
}

/// Negated distance to the faces of an axis-aligned box: positive inside,
/// negative outside.
fn box_interior(p: Vec3, lower_left: Vec3, upper_right: Vec3) -> f32 {
    let lower = p - lower_left;
    let upper = upper_right - p;
    -lower
        .x
        .min(upper.x)
        .min(lower.y.min(upper.y))
        .min(lower.z.min(upper.z))
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub glyphs: GlyphSet,
    pub sun_height: f32,
    pub plank_spacing: f32,
}

impl Scene {
    pub fn new(glyphs: GlyphSet) -> Self {
        Self {
            glyphs,
            sun_height: 19.9,
            plank_spacing: 8.0,
        }
    }

    pub fn pixar() -> Self {
        Self::new(GlyphSet::pixar())
    }

    pub fn room_distance(&self, p: Vec3) -> f32 {
        let lower_room = box_interior(
            p,
            Vec3::new(-30.0, -0.5, -30.0),
            Vec3::new(30.0, 18.0, 30.0),
        );
        let upper_room = box_interior(
            p,
            Vec3::new(-25.0, 17.0, -25.0),
            Vec3::new(25.0, 20.0, 25.0),
        );
        let planks = box_interior(
            Vec3::new(p.x.abs() % self.plank_spacing, p.y, p.z),
            Vec3::new(1.5, 18.5, -25.0),
            Vec3::new(6.5, 20.0, 25.0),
        );
        (-lower_room.min(upper_room)).min(planks)
    }

    pub fn sun_distance(&self, p: Vec3) -> f32 {
        self.sun_height - p.y
    }

    pub fn sample(&self, p: Vec3) -> SdfSample {
        let mut closest = SdfSample {
            distance: self.glyphs.distance(p),
            hit_type: HitType::Letter,
        };

        let room = self.room_distance(p);
        if room < closest.distance {
            closest = SdfSample {
                distance: room,
                hit_type: HitType::Wall,
            };
        }

        let sun = self.sun_distance(p);
        if sun < closest.distance {
            closest = SdfSample {
                distance: sun,
                hit_type: HitType::Sun,
            };
        }

        closest
    }

    pub fn distance(&self, p: Vec3) -> f32 {
        self.sample(p).distance
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::pixar()
    }
}
