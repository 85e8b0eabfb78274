//! Reproducible day selection.
//!
//! Every draw is driven by a [`SelectionSeed`] hashed from stable identifiers
//! (user, year, month, category). No wall clock, no process randomness: the
//! same identifiers always pick the same days.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SelectionSeed(u64);

impl SelectionSeed {
    /// Hashes the month identity and category into a seed.
    ///
    /// Variable-length fields are length-prefixed so ("ab", "c") and
    /// ("a", "bc") never collide.
    pub fn derive(user_id: &str, year: i32, month: u32, category_id: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((user_id.len() as u64).to_be_bytes());
        hasher.update(user_id.as_bytes());
        hasher.update(year.to_be_bytes());
        hasher.update(month.to_be_bytes());
        hasher.update((category_id.len() as u64).to_be_bytes());
        hasher.update(category_id.as_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self(u64::from_be_bytes(bytes))
    }

    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Picks `min(count, candidates.len())` candidates without replacement.
///
/// Candidates that also appear in `priority` are drawn first; the remainder is
/// only sampled once the priority pool is exhausted. The result is in draw
/// order, not candidate order. Empty candidates give an empty selection.
pub fn select<T>(seed: SelectionSeed, candidates: &[T], count: usize, priority: &[T]) -> Vec<T>
where
    T: Clone + PartialEq,
{
    let target = count.min(candidates.len());
    if target == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed.value());
    let (mut preferred, mut rest): (Vec<T>, Vec<T>) =
        candidates.iter().cloned().partition(|c| priority.contains(c));

    let mut picked = draw(&mut rng, &mut preferred, target);
    if picked.len() < target {
        let needed = target - picked.len();
        picked.extend(draw(&mut rng, &mut rest, needed));
    }
    picked
}

fn draw<T: Clone, R: Rng>(rng: &mut R, pool: &mut [T], amount: usize) -> Vec<T> {
    if pool.is_empty() || amount == 0 {
        return Vec::new();
    }
    let (chosen, _) = pool.partial_shuffle(rng, amount);
    chosen.to_vec()
}
