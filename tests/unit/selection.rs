use review_assigner::services::reviewer_selection::{
    REVIEWERS_PER_PULL_REQUEST, pick_replacement, select_reviewers,
};
use std::collections::HashSet;

use super::rng;

#[test]
fn test_selection_is_subset_without_duplicates() {
    let candidates: Vec<i32> = (1..=10).collect();
    for seed in 0..50 {
        let picked = select_reviewers(&candidates, REVIEWERS_PER_PULL_REQUEST, &mut rng(seed));
        assert_eq!(picked.len(), REVIEWERS_PER_PULL_REQUEST);
        let unique: HashSet<i32> = picked.iter().copied().collect();
        assert_eq!(unique.len(), picked.len());
        assert!(unique.is_subset(&candidates.iter().copied().collect()));
    }
}

#[test]
fn test_selection_caps_at_available_candidates() {
    let picked = select_reviewers(&["only"], REVIEWERS_PER_PULL_REQUEST, &mut rng(1));
    assert_eq!(picked, vec!["only"]);
}

#[test]
fn test_selection_accepts_thread_rng() {
    let mut thread_rng = rand::thread_rng();
    let picked = select_reviewers(&[1, 2, 3], 2, &mut thread_rng);
    assert_eq!(picked.len(), 2);
}

#[test]
fn test_replacement_from_single_candidate() {
    assert_eq!(pick_replacement(&[42], &mut rng(3)), Some(42));
    assert_eq!(pick_replacement::<i32, _>(&[], &mut rng(3)), None);
}
