//! Process-wide pseudorandom source.
//!
//! A single thread-local RNG backs every draw in the GA and SOM cores,
//! seeded from a shared, mutex-guarded generator so that a call to
//! [`set_seed`] makes the whole process deterministic (every thread's
//! thread-local stream derives from the same seed sequence). All methods are
//! mutually serialized by construction: each thread owns its own `RefCell`,
//! so there is no cross-thread lock contention on the hot path.

use evo_error::{Error, Result};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::cell::RefCell;
use std::ops::Range;
use std::sync::{Arc, LazyLock, Mutex};

static GLOBAL_RNG: LazyLock<Arc<Mutex<SmallRng>>> =
    LazyLock::new(|| Arc::new(Mutex::new(SmallRng::from_entropy())));

thread_local! {
    static TLS_RNG: RefCell<SmallRng> = RefCell::new({
        let mut global = GLOBAL_RNG.lock().unwrap();
        SmallRng::seed_from_u64(global.next_u64())
    });
}

/// Reseeds the shared generator. Threads that have already pulled a
/// thread-local stream keep their existing stream; only new threads (or a
/// call to [`scoped_seed`]) observe the new seed. Tests that need full
/// process determinism should call this once before spawning any worker
/// threads.
pub fn set_seed(seed: u64) {
    let mut global = GLOBAL_RNG.lock().unwrap();
    *global = SmallRng::seed_from_u64(seed);
}

/// Runs `f` with the calling thread's stream temporarily reseeded, restoring
/// the prior state afterward. Used by tests that need a reproducible draw
/// sequence without disturbing global state.
pub fn scoped_seed<R>(seed: u64, f: impl FnOnce() -> R) -> R {
    TLS_RNG.with(|cell| {
        let original = {
            let mut rng = cell.borrow_mut();
            let original = rng.clone();
            *rng = SmallRng::seed_from_u64(seed);
            original
        };

        let result = f();
        *cell.borrow_mut() = original;
        result
    })
}

fn with_rng<R>(f: impl FnOnce(&mut SmallRng) -> R) -> R {
    TLS_RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// `nextInt()` — a nonnegative `i64`.
pub fn next_int() -> i64 {
    with_rng(|rng| rng.gen_range(0..=i64::MAX))
}

/// `nextInt(max)` — uniform in `[0, max)`. Panics if `max == 0`.
pub fn next_int_max(max: i64) -> i64 {
    with_rng(|rng| rng.gen_range(0..max))
}

/// `nextInt(min, max)` — uniform in `[min, max)`.
pub fn next_int_range(min: i64, max: i64) -> i64 {
    with_rng(|rng| rng.gen_range(min..max))
}

/// `nextDouble()` — uniform in `[0.0, 1.0)`.
pub fn next_double() -> f64 {
    with_rng(|rng| rng.gen_range(0.0..1.0))
}

/// Generic uniform draw over any range the standard distribution covers.
pub fn range<T>(range: Range<T>) -> T
where
    T: rand::distributions::uniform::SampleUniform + PartialOrd,
{
    with_rng(|rng| rng.gen_range(range))
}

/// Fills `buf` with random bytes.
pub fn next_bytes(buf: &mut [u8]) {
    with_rng(|rng| rng.fill_bytes(buf));
}

/// `randomProb(p)` — `true` with probability `p`. Requires `0.0 <= p <= 1.0`.
pub fn random_prob(p: f64) -> Result<bool> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::out_of_range(format!(
            "probability {p} not in [0, 1]"
        )));
    }
    Ok(next_double() < p)
}

/// A cheap variant of [`random_prob`] for call sites that already know `p`
/// is valid (e.g. it came from a validated [`crate::population::PopulationSettings`]).
pub fn bool(p: f64) -> bool {
    next_double() < p
}

/// Chooses a random item from a non-empty slice.
pub fn choose<T>(items: &[T]) -> &T {
    with_rng(|rng| &items[rng.gen_range(0..items.len())])
}

/// Shuffles `items` in place.
pub fn shuffle<T>(items: &mut [T]) {
    with_rng(|rng| items.shuffle(rng));
}

/// A vector of `0..n` in random order.
pub fn shuffled_indices(n: usize) -> Vec<usize> {
    with_rng(|rng| {
        let mut v: Vec<usize> = (0..n).collect();
        v.shuffle(rng);
        v
    })
}

/// `nextExcept(max, excluded)` — a value in `[0, max) \ excluded`, uniform
/// over the `max - excluded.len()` allowed values.
///
/// Algorithm (per spec §4.1): draw `v` uniformly from
/// `[0, max - excluded.len())`, then for every excluded value `e` (sorted
/// ascending) with `e <= v`, bump `v` by one. This walks the "holes" left by
/// the excluded values from the bottom up, so the final `v` can never land on
/// an excluded slot.
pub fn next_except(max: i64, excluded: &[i64]) -> Result<i64> {
    let mut sorted: Vec<i64> = excluded.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != excluded.len() {
        return Err(Error::out_of_range(
            "excluded values passed to next_except must be distinct",
        ));
    }
    if max <= sorted.len() as i64 {
        return Err(Error::out_of_range(format!(
            "max {max} must exceed the number of excluded values ({})",
            sorted.len()
        )));
    }

    let span = max - sorted.len() as i64;
    let mut v = next_int_max(span);
    for e in sorted {
        if e <= v {
            v += 1;
        }
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_double_in_unit_interval() {
        for _ in 0..1000 {
            let v = next_double();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn next_except_avoids_excluded_values() {
        for _ in 0..10_000 {
            let v = next_except(10, &[2, 5, 7]).unwrap();
            assert!((0..10).contains(&v));
            assert!(![2, 5, 7].contains(&v));
        }
    }

    #[test]
    fn next_except_rejects_duplicate_excluded() {
        assert!(next_except(10, &[2, 2]).is_err());
    }

    #[test]
    fn next_except_rejects_impossible_range() {
        assert!(next_except(3, &[0, 1, 2]).is_err());
    }

    #[test]
    fn next_except_distribution_is_uniform() {
        // Chi-squared goodness-of-fit over the 7 allowed values out of 10,
        // excluding {1, 4, 8}, at a much smaller sample than the property's
        // 10^6 but still large enough to catch a biased implementation.
        let excluded = [1_i64, 4, 8];
        let allowed: Vec<i64> = (0..10).filter(|v| !excluded.contains(v)).collect();
        let mut counts = vec![0u64; allowed.len()];
        let draws = 140_000u64;

        scoped_seed(42, || {
            for _ in 0..draws {
                let v = next_except(10, &excluded).unwrap();
                let idx = allowed.iter().position(|&a| a == v).unwrap();
                counts[idx] += 1;
            }
        });

        let expected = draws as f64 / allowed.len() as f64;
        let chi_sq: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum();

        // 6 degrees of freedom; critical value at p=0.001 is ~22.46.
        assert!(chi_sq < 22.46, "chi-squared statistic too high: {chi_sq}");
    }

    #[test]
    fn random_prob_rejects_out_of_range() {
        assert!(random_prob(-0.1).is_err());
        assert!(random_prob(1.1).is_err());
        assert!(random_prob(0.5).is_ok());
    }

    #[test]
    fn scoped_seed_is_deterministic_and_restores_state() {
        let a = scoped_seed(7, next_double);
        let b = scoped_seed(7, next_double);
        assert_eq!(a, b);
    }
}
