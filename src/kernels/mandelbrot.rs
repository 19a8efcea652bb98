const LEFT: f32 = -2.1;
const RIGHT: f32 = 1.0;
const TOP: f32 = -1.3;
const BOTTOM: f32 = 1.3;
const MAX_ESCAPE_STEPS: u32 = 255;

/// Escape-time sweep over the `[-2.1, 1.0) x [-1.3, 1.3)` window, repeated
/// `iterations` times. Returns `x + y` of the last orbit point computed.
pub fn mandelbrot(width: u32, height: u32, iterations: u32) -> f32 {
    let mut data = 0.0;

    for _ in 0..iterations {
        let delta_x = (RIGHT - LEFT) / width as f32;
        let delta_y = (BOTTOM - TOP) / height as f32;
        let mut coordinate_x = LEFT;

        for _ in 0..width {
            let mut coordinate_y = TOP;

            for _ in 0..height {
                let mut work_x: f32 = 0.0;
                let mut work_y: f32 = 0.0;
                let mut counter = 0;

                while counter < MAX_ESCAPE_STEPS
                    && ((work_x * work_x) + (work_y * work_y)).sqrt() < 2.0
                {
                    counter += 1;
                    let next_x = (work_x * work_x) - (work_y * work_y) + coordinate_x;
                    work_y = (2.0 * work_x * work_y) + coordinate_y;
                    work_x = next_x;
                }

                data = work_x + work_y;
                coordinate_y += delta_y;
            }

            coordinate_x += delta_x;
        }
    }

    data
}
