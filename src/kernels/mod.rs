mod fibonacci;
mod mandelbrot;
mod nbody;
mod sieve;

pub use fibonacci::fibonacci;
pub use mandelbrot::mandelbrot;
pub use nbody::{nbody, Body, System};
pub use sieve::{sieve, SIEVE_SIZE};
