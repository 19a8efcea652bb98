use std::f64::consts::PI;

use log::debug;

const SOLAR_MASS: f64 = 4.0 * PI * PI;
const DAYS_PER_YEAR: f64 = 365.24;
const TIME_STEP: f64 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub mass: f64,
}

impl Body {
    fn planet(position: [f64; 3], velocity: [f64; 3], mass: f64) -> Self {
        Self {
            x: position[0],
            y: position[1],
            z: position[2],
            vx: velocity[0] * DAYS_PER_YEAR,
            vy: velocity[1] * DAYS_PER_YEAR,
            vz: velocity[2] * DAYS_PER_YEAR,
            mass: mass * SOLAR_MASS,
        }
    }
}

/// The sun followed by the four gas giants.
#[derive(Clone, Debug)]
pub struct System {
    pub bodies: [Body; 5],
}

impl System {
    pub fn jovian() -> Self {
        let mut bodies = [
            Body::default(),
            // Jupiter
            Body::planet(
                [4.84143144246472090e+00, -1.16032004402742839e+00, -1.03622044471123109e-01],
                [1.66007664274403694e-03, 7.69901118419740425e-03, -6.90460016972063023e-05],
                9.54791938424326609e-04,
            ),
            // Saturn
            Body::planet(
                [8.34336671824457987e+00, 4.12479856412430479e+00, -4.03523417114321381e-01],
                [-2.76742510726862411e-03, 4.99852801234917238e-03, 2.30417297573763929e-05],
                2.85885980666130812e-04,
            ),
            // Uranus
            Body::planet(
                [1.28943695621391310e+01, -1.51111514016986312e+01, -2.23307578892655734e-01],
                [2.96460137564761618e-03, 2.37847173959480950e-03, -2.96589568540237556e-05],
                4.36624404335156298e-05,
            ),
            // Neptune
            Body::planet(
                [1.53796971148509165e+01, -2.59193146099879641e+01, 1.79258772950371181e-01],
                [2.68067772490389322e-03, 1.62824170038242295e-03, -9.51592254519715870e-05],
                5.15138902046611451e-05,
            ),
        ];
        offset_momentum(&mut bodies);
        Self { bodies }
    }

    pub fn energy(&self) -> f64 {
        let mut energy = 0.0;
        for (index, body) in self.bodies.iter().enumerate() {
            energy += 0.5
                * body.mass
                * ((body.vx * body.vx) + (body.vy * body.vy) + (body.vz * body.vz));
            for other in &self.bodies[index + 1..] {
                let dx = body.x - other.x;
                let dy = body.y - other.y;
                let dz = body.z - other.z;
                energy -= body.mass * other.mass / ((dx * dx) + (dy * dy) + (dz * dz)).sqrt();
            }
        }
        energy
    }

    /// One step: pairwise velocity kicks from the current positions, then
    /// each body drifts by its updated velocity.
    pub fn advance(&mut self, dt: f64) {
        let count = self.bodies.len();
        for index in 0..count - 1 {
            let (head, tail) = self.bodies.split_at_mut(index + 1);
            let body = &mut head[index];
            let (mut vx, mut vy, mut vz) = (body.vx, body.vy, body.vz);

            for other in tail.iter_mut() {
                let dx = other.x - body.x;
                let dy = other.y - body.y;
                let dz = other.z - body.z;
                let distance_squared = (dx * dx) + (dy * dy) + (dz * dz);
                let magnitude = dt / (distance_squared * distance_squared.sqrt());

                other.vx -= dx * body.mass * magnitude;
                other.vy -= dy * body.mass * magnitude;
                other.vz -= dz * body.mass * magnitude;
                vx += dx * other.mass * magnitude;
                vy += dy * other.mass * magnitude;
                vz += dz * other.mass * magnitude;
            }

            body.vx = vx;
            body.vy = vy;
            body.vz = vz;
            body.x += vx * dt;
            body.y += vy * dt;
            body.z += vz * dt;
        }

        let last = &mut self.bodies[count - 1];
        last.x += last.vx * dt;
        last.y += last.vy * dt;
        last.z += last.vz * dt;
    }
}

fn offset_momentum(bodies: &mut [Body; 5]) {
    let (mut px, mut py, mut pz) = (0.0, 0.0, 0.0);
    for planet in &bodies[1..] {
        px += planet.vx * planet.mass;
        py += planet.vy * planet.mass;
        pz += planet.vz * planet.mass;
    }

    let sun = &mut bodies[0];
    sun.mass = SOLAR_MASS;
    sun.vx = px / -SOLAR_MASS;
    sun.vy = py / -SOLAR_MASS;
    sun.vz = pz / -SOLAR_MASS;
}

/// Advances the Jovian system `advancements` steps of 0.01 years and
/// returns the sun's `x + y`.
pub fn nbody(advancements: u32) -> f64 {
    let mut system = System::jovian();
    let initial = system.energy();

    for _ in 0..advancements {
        system.advance(TIME_STEP);
    }

    debug!(
        "n-body energy {initial:.9} -> {:.9} after {advancements} steps",
        system.energy()
    );
    let sun = system.bodies[0];
    sun.x + sun.y
}
