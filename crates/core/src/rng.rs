//! RNG module - seedable randomness for dealing and reshuffling
//!
//! The board never reaches for an ambient random source. It is handed a
//! [`Shuffler`] so the same seed always deals the same board.
//!
//! [`SimpleRng`] is a small LCG that is good enough for shuffling tiles and
//! fully reproducible across platforms.

/// Random source used by the board.
pub trait Shuffler {
    /// Uniform value in `[0, max)`. `max` is never zero.
    fn next_range(&mut self, max: u32) -> u32;

    /// Shuffle a slice in place using Fisher-Yates.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current state; feeding it back into [`SimpleRng::new`] resumes the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Shuffler for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of choices. Lets tests pin down exact shuffles.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    script: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(script: Vec<u32>) -> Self {
        Self { script, pos: 0 }
    }

    /// An RNG whose shuffle leaves every slice untouched.
    pub fn identity() -> Self {
        Self::new(Vec::new())
    }
}

impl Shuffler for ScriptedRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // Once the script runs out, always pick the last index (a no-op swap).
        let value = match self.script.get(self.pos) {
            Some(&v) => v % max,
            None => max - 1,
        };
        self.pos += 1;
        value
    }
}
