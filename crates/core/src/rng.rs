//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in Guideline Tetris.
//! Each bag contains one of each piece (I, J, L, O, S, T, Z), shuffled.
//! Draws from the bag until empty, then shuffles a fresh bag.
//!
//! Also provides a small seeded RNG so games are reproducible in tests.

use crate::types::PieceKind;

/// Simple seeded RNG
///
/// LCG state transition (Numerical Recipes constants) with a murmur3 finalizer on the
/// output, so low bits are usable for small ranges.
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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);

        let mut x = self.state;
        x ^= x >> 16;
        x = x.wrapping_mul(0x85eb_ca6b);
        x ^= x >> 13;
        x = x.wrapping_mul(0xc2b2_ae35);
        x ^ (x >> 16)
    }

    /// Generate an unbiased value in range [0, max)
    ///
    /// Rejects the low tail of the u32 range that would otherwise over-represent small results.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        let threshold = max.wrapping_neg() % max;
        loop {
            let r = self.next_u32();
            if r >= threshold {
                return r % max;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Source of upcoming piece kinds
pub trait Randomizer {
    /// Draw the next piece kind
    fn next(&mut self) -> PieceKind;

    /// The next `count` kinds, without consuming them
    fn peek(&self, count: usize) -> Vec<PieceKind>;

    /// Discard any partially drawn sequence and start fresh
    fn reset(&mut self);
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct SevenBag {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl SevenBag {
    /// Create a new bag generator with the given seed
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill_bag();
        bag
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl Randomizer for SevenBag {
    fn next(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    fn peek(&self, count: usize) -> Vec<PieceKind> {
        // Preview future bags on a copy of the RNG; because the copy starts from the
        // same state, the preview matches what `next()` will deal.
        let mut out: Vec<PieceKind> = self.remaining().iter().copied().take(count).collect();
        let mut preview_rng = self.rng.clone();

        while out.len() < count {
            let mut next_bag = PieceKind::ALL;
            preview_rng.shuffle(&mut next_bag);
            let missing = count - out.len();
            out.extend(next_bag.iter().copied().take(missing));
        }

        out
    }

    fn reset(&mut self) {
        self.refill_bag();
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Randomizer that deals a fixed list of kinds over and over
///
/// Used for scripted scenarios where the piece order must be known up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSequence {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl FixedSequence {
    /// An empty list deals `I` forever.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, index: 0 }
    }
}

impl Randomizer for FixedSequence {
    fn next(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = self.index.wrapping_add(1);
        kind
    }

    fn peek(&self, count: usize) -> Vec<PieceKind> {
        (0..count)
            .map(|i| self.kinds[(self.index + i) % self.kinds.len()])
            .collect()
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}
