//! Unbiased draws over `rand_core` generators.

use rand_core::RngCore;

/// Uniform value in `0..bound`. Returns 0 when `bound` is 0.
pub fn uniform<R: RngCore + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound <= 1 {
        return 0;
    }

    // Reject the top partial bucket so every residue is equally likely.
    let limit = u32::MAX - (u32::MAX % bound);
    loop {
        let value = rng.next_u32();
        if value < limit {
            return value % bound;
        }
    }
}

pub fn uniform_usize<R: RngCore + ?Sized>(rng: &mut R, bound: usize) -> usize {
    uniform(rng, bound.min(u32::MAX as usize) as u32) as usize
}
