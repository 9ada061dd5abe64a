//! Fast PRNG for bulk landing sampling — SplitMix64.
//!
//! A single u64 of state is enough for hit-rate estimation, where millions
//! of throws need nothing but a pair of uniform offsets each. One output
//! word yields both axes of a throw error.

/// SplitMix64 PRNG — single u64 state, excellent statistical quality.
#[derive(Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    #[inline(always)]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate next u64.
    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    /// Two independent uniform offsets in `[-range, range]` from a single
    /// PRNG call: one 32-bit half per axis. 32 bits of resolution per axis
    /// is far below the physical scale of a throw error.
    #[inline(always)]
    pub fn offset_pair(&mut self, range: f64) -> (f64, f64) {
        let r = self.next_u64();
        let a = (r as u32) as f64 / u32::MAX as f64;
        let b = ((r >> 32) as u32) as f64 / u32::MAX as f64;
        ((a * 2.0 - 1.0) * range, (b * 2.0 - 1.0) * range)
    }
}
