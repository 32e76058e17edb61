use crate::ALPHABET_LEN;
use fastrand::Rng;

/// Draws two cipher letters independently. Returns `None` when they coincide; the
/// caller consumes the step without doing any work.
#[inline(always)]
pub fn draw_pair(rng: &mut Rng) -> Option<(usize, usize)> {
    let a = rng.usize(0..ALPHABET_LEN);
    let b = rng.usize(0..ALPHABET_LEN);
    if a == b {
        None
    } else {
        Some((a, b))
    }
}

/// Seed for restart `index` of a run seeded with `seed` (splitmix64 finalizer).
pub fn restart_seed(seed: u64, index: usize) -> u64 {
    let mut z = seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// One generator per restart: seeded runs are reproducible regardless of thread count.
pub fn restart_rng(seed: Option<u64>, index: usize) -> Rng {
    match seed {
        Some(s) => Rng::with_seed(restart_seed(s, index)),
        None => Rng::new(),
    }
}
