use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::VecDeque;

/// A reproducible stream of non-negative integers.
///
/// Initialisation draws every random decision from one of these. Calling
/// [`RandomSequence::reseed`] with the same seed restarts the exact same stream.
pub trait RandomSequence {
    /// Restarts the sequence from `seed`.
    fn reseed(&mut self, seed: u64);

    /// Draws the next value. Values are always in `[0, 2^31)`.
    fn next_value(&mut self) -> u32;
}

/// The production sequence, backed by a seeded [`StdRng`].
pub struct SeededSequence {
    rng: StdRng,
}

impl SeededSequence {
    pub fn new(seed: u64) -> SeededSequence {
        SeededSequence {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSequence for SeededSequence {
    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn next_value(&mut self) -> u32 {
        // Drop the top bit so values look like a C `rand()` result
        self.rng.next_u32() >> 1
    }
}

/// A sequence that replays a fixed list of values, cycling when exhausted.
///
/// Reseeding rewinds to the first value and ignores the seed. Useful to force
/// robots onto known cells with known directions and colours.
pub struct ScriptedSequence {
    values: Vec<u32>,
    pending: VecDeque<u32>,
}

impl ScriptedSequence {
    pub fn new(values: Vec<u32>) -> ScriptedSequence {
        let pending = values.iter().copied().collect();
        ScriptedSequence { values, pending }
    }
}

impl RandomSequence for ScriptedSequence {
    fn reseed(&mut self, _seed: u64) {
        self.pending = self.values.iter().copied().collect();
    }

    fn next_value(&mut self) -> u32 {
        if self.pending.is_empty() {
            self.pending = self.values.iter().copied().collect();
        }
        self.pending.pop_front().unwrap_or(0) & 0x7fff_ffff
    }
}
