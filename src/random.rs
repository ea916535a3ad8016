use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::errors::*;

/// A source of uniformly distributed integers.
///
/// Maze generation draws all of its randomness through this trait so a caller can inject a
/// seeded generator for reproducible mazes, or a scripted one in tests.
pub trait RandomSource {
    /// A uniformly distributed integer in `[0, bound)`.
    ///
    /// A zero bound is an `InvalidBound` error. Sources that cannot produce a value report it
    /// as an error rather than panicking, and callers pass it on untouched.
    fn next_int(&mut self, bound: usize) -> Result<usize>;
}

impl<R: Rng> RandomSource for R {
    fn next_int(&mut self, bound: usize) -> Result<usize> {
        if bound == 0 {
            return Err(ErrorKind::InvalidBound(bound).into());
        }
        Ok(self.gen_range(0..bound))
    }
}

/// A fast deterministic generator for a given seed.
pub fn seeded_source(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// Draws directly from the operating system's entropy source.
///
/// Unlike the `Rng` based sources this one can fail, e.g. when the OS entropy pool is
/// unavailable, in which case the underlying `rand::Error` is returned.
#[derive(Debug, Default, Copy, Clone)]
pub struct EntropySource;

impl RandomSource for EntropySource {
    fn next_int(&mut self, bound: usize) -> Result<usize> {
        if bound == 0 {
            return Err(ErrorKind::InvalidBound(bound).into());
        }

        let bound = bound as u64;
        // Largest multiple of bound that fits, so the modulo below stays unbiased.
        let zone = u64::max_value() - (u64::max_value() % bound);
        loop {
            let mut bytes = [0u8; 8];
            OsRng.try_fill_bytes(&mut bytes)?;
            let value = u64::from_le_bytes(bytes);
            if value < zone {
                return Ok((value % bound) as usize);
            }
        }
    }
}
