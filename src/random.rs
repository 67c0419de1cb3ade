use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when an agent is created without a `seed` argument, so that unseeded runs are
/// still reproducible.
pub const DEFAULT_SEED: u64 = 3819201;

/// Creates the generator an agent owns for its whole lifetime.
pub fn seeded_generator(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or(DEFAULT_SEED))
}

/// Removes a uniformly chosen element, keeping the order of the remaining ones.
pub fn take_random<T, R: Rng + ?Sized>(items: &mut Vec<T>, rng: &mut R) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.random_range(0..items.len());
    Some(items.remove(index))
}

/// Returns a uniformly chosen element.
pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.random_range(0..items.len()))
}
