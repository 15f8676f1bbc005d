use serde::{Deserialize, Serialize};

// Simple pseudorandom number generator using xorshift algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoRandom {
    state: u64,
}

impl PseudoRandom {
    pub fn new(seed: u64) -> Self {
        // Ensure we don't start with 0 state as xorshift doesn't work with 0
        let state = if seed == 0 { 0x1234567890abcdef } else { seed };
        PseudoRandom { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        // xorshift64 algorithm
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform-ish value in `lo..=hi`. Returns `lo` when the range is empty.
    pub fn next_in_range(&mut self, lo: i16, hi: i16) -> i16 {
        if hi <= lo {
            return lo;
        }
        let span = (hi as i32 - lo as i32 + 1) as u32;
        lo + (self.next_u32() % span) as i16
    }

    /// Index into a collection of `len` items. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PseudoRandom::new(42);
        let mut b = PseudoRandom::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = PseudoRandom::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn next_in_range_stays_inclusive() {
        let mut rng = PseudoRandom::new(7);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..1000 {
            let v = rng.next_in_range(1, 4);
            assert!((1..=4).contains(&v), "value {} out of range", v);
            seen_lo |= v == 1;
            seen_hi |= v == 4;
        }
        assert!(seen_lo && seen_hi);
    }

    #[test]
    fn degenerate_range_returns_low_bound() {
        let mut rng = PseudoRandom::new(7);
        assert_eq!(rng.next_in_range(3, 3), 3);
        assert_eq!(rng.next_in_range(5, 2), 5);
    }
}
