//! Random source construction.
//!
//! All stochastic components take `&mut R where R: Rng`, so callers can
//! inject any source. These helpers build the two sources the crate uses
//! itself: a seeded one for reproducible runs and tests, and an unseeded
//! one drawn from OS entropy for production.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Creates an RNG seeded from OS entropy.
pub fn entropy_rng() -> SmallRng {
    SmallRng::from_os_rng()
}

/// Creates an RNG from an optional seed, falling back to entropy.
pub fn rng_from(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => create_rng(s),
        None => entropy_rng(),
    }
}
