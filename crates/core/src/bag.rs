//! Seeded piece generation: a small LCG feeding a 7-bag shuffle.
//!
//! Deterministic by construction so games and tests replay from a seed.

use gridfall_types::PieceKind;

/// Linear congruential generator using the Numerical Recipes constants.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would only ever produce the additive constant chain.
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator: each batch of seven draws contains every shape
/// exactly once, in shuffled order.
#[derive(Debug, Clone)]
pub struct PieceBag {
    seed: u32,
    bag: [PieceKind; 7],
    index: usize,
    rng: SimpleRng,
}

impl PieceBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            seed,
            bag: PieceKind::ALL,
            index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.index = 0;
    }

    /// Next kind without consuming it.
    pub fn peek(&self) -> PieceKind {
        self.bag[self.index]
    }

    /// Draw the next kind, refilling the bag when it runs dry.
    pub fn draw(&mut self) -> PieceKind {
        let kind = self.bag[self.index];
        self.index += 1;
        if self.index == self.bag.len() {
            self.refill();
        }
        kind
    }
}
