use rand::Rng;

/// Source of the random draws used to lay out mines.
///
/// The engine only ever asks for values in `[0, bound)` with `bound >= 1`, drawing the
/// row first and the column second for each candidate position. The same stream state
/// therefore always yields the same board.
pub trait SeedStream {
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<S: SeedStream + ?Sized> SeedStream for &mut S {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// 48-bit linear congruential stream.
///
/// Bit-compatible with the classic `drand48`-family generator that the stock difficulty
/// levels were laid out with, so a given seed reproduces the same boards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    fn next_bits(&mut self, bits: u32) -> i32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.state >> (48 - bits)) as i32
    }

    /// Next value over the whole `i32` range, handy for deriving seeds.
    pub fn next_i32(&mut self) -> i32 {
        self.next_bits(32)
    }
}

impl SeedStream for Lcg48 {
    fn next_below(&mut self, bound: u32) -> u32 {
        let bound = i64::from(bound.clamp(1, i32::MAX as u32));

        if bound & -bound == bound {
            return ((bound * i64::from(self.next_bits(31))) >> 31) as u32;
        }

        loop {
            let bits = i64::from(self.next_bits(31));
            let value = bits % bound;
            // retry draws from the last partial block so every value is equally likely
            if bits - value + (bound - 1) <= i64::from(i32::MAX) {
                return value as u32;
            }
        }
    }
}

/// Adapter feeding any `rand` generator to the engine.
#[derive(Clone, Debug)]
pub struct RngStream<R>(pub R);

impl<R: rand::RngCore> SeedStream for RngStream<R> {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.0.random_range(0..bound.max(1))
    }
}
