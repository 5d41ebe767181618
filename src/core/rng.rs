//! Deterministic xorshift32 random source.
//!
//! The whole RNG state is a single `u32` stored in the world, so stepping
//! the same world twice yields the same result.

/// Substituted for a zero seed (xorshift32 never leaves the zero state)
pub const FALLBACK_SEED: u32 = 12345;

/// Xorshift32 random number generator
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

#[inline]
pub fn seed_state(seed: u32) -> u32 {
    if seed == 0 { FALLBACK_SEED } else { seed }
}

/// Uniform float in [0, 1)
#[inline]
pub fn next_f32(state: &mut u32) -> f32 {
    (xorshift32(state) >> 8) as f32 / (1u32 << 24) as f32
}

/// Uniform float in [-0.5, 0.5)
#[inline]
pub fn next_centered(state: &mut u32) -> f32 {
    next_f32(state) - 0.5
}

/// Uniform index in 0..len (len must be non-zero)
#[inline]
pub fn next_index(state: &mut u32, len: usize) -> usize {
    ((xorshift32(state) as u64 * len as u64) >> 32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_replaced() {
        let mut s = seed_state(0);
        assert_ne!(xorshift32(&mut s), 0);
    }

    #[test]
    fn floats_stay_in_unit_range() {
        let mut s = seed_state(7);
        for _ in 0..10_000 {
            let v = next_f32(&mut s);
            assert!((0.0..1.0).contains(&v));
            let c = next_centered(&mut s);
            assert!((-0.5..0.5).contains(&c));
        }
    }

    #[test]
    fn index_stays_below_len() {
        let mut s = seed_state(99);
        for _ in 0..1000 {
            assert!(next_index(&mut s, 6) < 6);
        }
    }
}
