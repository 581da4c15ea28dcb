//! Deterministic random number generation.
//!
//! The trigger draws its hit/miss outcome from any `rand::Rng`. For tests and
//! seeded runs the loop uses [`SimpleRng`], a xorshift64 generator that
//! yields the same sequence for the same seed on every platform.

/// Xorshift64 random number generator.
///
/// A seed of 0 is replaced by 1 to avoid the degenerate all-zero state.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new SimpleRng with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    #[inline]
    fn next_state(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform f64 in [0, 1)
    #[inline]
    pub fn rand(&mut self) -> f64 {
        (self.next_state() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl rand::RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_state() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_state()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_state().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
