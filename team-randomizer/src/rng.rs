use rand::{Error, RngCore};

/// Deterministic xorshift32 generator driving every random choice.
///
/// The stream is a pure function of the seed and the number of draws, so
/// the same seed reproduces the same teams on any platform. The seed is
/// truncated to its low 32 bits. A seed of 0 is accepted and yields an
/// all-zero stream.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: i64) -> Self {
        Self { state: seed as u32 }
    }

    /// Generator used for replacements in `round`: seeded with `seed + round`
    pub fn for_round(seed: i64, round: usize) -> Self {
        Self::new(seed.wrapping_add(round as i64))
    }

    fn step(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / 4_294_967_296.0
    }

    /// Index in `0..len`, drawn as `floor(next_f64() * len)`
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize
    }

    /// Fisher-Yates shuffle, swapping from the last index down to 1
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.step() as u64;
        let low = self.step() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
