//! Core building blocks shared by every layer: vector math, the
//! deterministic RNG and console logging.

pub mod console;
pub mod rng;
pub mod vec2;

pub use vec2::Vec2;
