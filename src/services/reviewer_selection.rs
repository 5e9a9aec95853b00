//! Random reviewer selection.
//!
//! Callers pass candidates that are already eligible (active, in the right
//! team, not the author, not excluded). Selection is uniform and without
//! replacement.

use rand::Rng;
use rand::seq::SliceRandom;

/// Reviewers assigned when a pull request is opened.
pub const REVIEWERS_PER_PULL_REQUEST: usize = 2;

/// Pick `min(count, candidates.len())` distinct candidates uniformly at random.
pub fn select_reviewers<T, R>(candidates: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    candidates.choose_multiple(rng, count).cloned().collect()
}

/// Draw a single replacement reviewer, or `None` when nobody is eligible.
pub fn pick_replacement<T, R>(candidates: &[T], rng: &mut R) -> Option<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    select_reviewers(candidates, 1, rng).into_iter().next()
}
