//! Random sources for pipe spawning and turning.
//!
//! Every draw goes through `rand(n) = n * uniform[0, 1)`, so swapping the
//! source swaps the whole procedural behavior: browser `Math.random` in
//! production, seeded xorshift for reproducible runs, a constant for tests.

use super::math::next_below;

pub trait RandomSource {
    /// Uniform float in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform float in `[0, n)` for `n > 0`
    #[inline]
    fn rand(&mut self, n: f32) -> f32 {
        let v = (n as f64 * self.next_unit()) as f32;
        // Narrowing to f32 can round up onto `n`
        if n > 0.0 && v >= n { next_below(n) } else { v }
    }

    /// Uniform float in `[base, base + range)` for `range > 0`
    #[inline]
    fn rand_range(&mut self, base: f32, range: f32) -> f32 {
        let v = base + self.rand(range);
        let end = base + range;
        if range > 0.0 && v >= end { next_below(end).max(base) } else { v }
    }
}

/// Random number generator (xorshift32)
#[derive(Clone, Debug)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub fn new(seed: u32) -> Self {
        // Zero is a fixed point of xorshift
        Self { state: if seed == 0 { 12345 } else { seed } }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl RandomSource for Xorshift32 {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// `Math.random()` from the host JS engine. Only callable on wasm32.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Always returns the same value. Values outside `[0, 1)` are clamped.
#[derive(Clone, Copy, Debug)]
pub struct ConstantRandom(f64);

impl ConstantRandom {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0 - f64::EPSILON))
    }
}

impl RandomSource for ConstantRandom {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xorshift_stays_in_unit_interval() {
        let mut rng = Xorshift32::new(7);
        for _ in 0..10_000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn xorshift_is_reproducible() {
        let mut a = Xorshift32::new(99);
        let mut b = Xorshift32::new(99);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = Xorshift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn rand_scales_by_n() {
        let mut rng = ConstantRandom::new(0.25);
        assert_eq!(rng.rand(100.0), 25.0);
        assert_eq!(rng.rand(4.0), 1.0);
    }

    #[test]
    fn constant_clamps_to_half_open_range() {
        let mut rng = ConstantRandom::new(1.0);
        assert!(rng.next_unit() < 1.0);
        let mut rng = ConstantRandom::new(-3.0);
        assert_eq!(rng.next_unit(), 0.0);
    }

    #[test]
    fn rand_never_reaches_its_upper_end() {
        let mut rng = ConstantRandom::new(1.0);
        assert!(rng.rand(800.0) < 800.0);
        assert!(rng.rand_range(100.0, 300.0) < 400.0);
        assert!(rng.rand_range(180.0, 60.0) < 240.0);
        assert!(rng.rand_range(180.0, 60.0) >= 180.0);
    }

    #[test]
    fn empty_range_returns_base() {
        let mut rng = ConstantRandom::new(0.9);
        assert_eq!(rng.rand(0.0), 0.0);
        assert_eq!(rng.rand_range(5.0, 0.0), 5.0);
    }
}
