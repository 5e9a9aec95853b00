use review_assigner::{
    db::{MemoryStore, ReviewStore, enums::PullRequestStatus},
    error::{AppError, ConflictKind, Resource},
    services::PullRequestsService,
};

use super::{rng, seed_team};

#[test]
fn test_create_assigns_two_reviewers_excluding_author() {
    for seed in 0..20 {
        let mut store = MemoryStore::new();
        let users = seed_team(
            &mut store,
            "alpha",
            &[("u1", true), ("u2", true), ("u3", true), ("u4", true)],
        );
        let author = users[0].id;

        let pr = PullRequestsService::create(&mut store, &mut rng(seed), 1, "Add login", author)
            .unwrap();

        assert_eq!(pr.status, PullRequestStatus::Open);
        assert_eq!(pr.author.user_id, author);
        assert_eq!(pr.reviewers.len(), 2);
        assert!(pr.reviewer_ids().iter().all(|id| *id != author));
        assert_ne!(pr.reviewers[0].user_id, pr.reviewers[1].user_id);
    }
}

#[test]
fn test_create_without_eligible_teammates_has_no_reviewers() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "solo", &[("u1", true), ("u2", false)]);

    let pr = PullRequestsService::create(&mut store, &mut rng(1), 10, "Refactor", users[0].id)
        .unwrap();

    assert!(pr.reviewers.is_empty());
    assert_eq!(store.pull_request(10).unwrap().status, PullRequestStatus::Open);
}

#[test]
fn test_scenario_inactive_member_is_not_selected() {
    let mut store = MemoryStore::new();
    let users = seed_team(
        &mut store,
        "alpha",
        &[("u1", true), ("u2", true), ("u3", false)],
    );

    let pr = PullRequestsService::create(&mut store, &mut rng(9), 100, "Feature", users[0].id)
        .unwrap();

    assert_eq!(pr.reviewer_ids(), vec![users[1].id]);
    assert_eq!(pr.reviewers[0].team_name, "alpha");
}

#[test]
fn test_create_unknown_author() {
    let mut store = MemoryStore::new();
    let err = PullRequestsService::create(&mut store, &mut rng(1), 1, "x", 42).unwrap_err();
    assert!(matches!(
        err,
        AppError::NotFound {
            resource: Resource::Author
        }
    ));
    assert!(store.pull_request(1).is_err());
}

#[test]
fn test_create_author_without_team() {
    let mut store = MemoryStore::new();
    let loner = store.upsert_user("loner", true).unwrap();
    let err = PullRequestsService::create(&mut store, &mut rng(1), 1, "x", loner.id).unwrap_err();
    assert!(matches!(
        err,
        AppError::NotFound {
            resource: Resource::AuthorTeam
        }
    ));
}

#[test]
fn test_create_duplicate_id_keeps_original() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true)]);
    PullRequestsService::create(&mut store, &mut rng(1), 7, "Original", users[0].id).unwrap();

    let err = PullRequestsService::create(&mut store, &mut rng(2), 7, "Copy", users[1].id)
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::AlreadyExists {
            resource: Resource::PullRequest
        }
    ));
    assert_eq!(store.pull_request(7).unwrap().title, "Original");
}

#[test]
fn test_create_uses_first_team_of_author() {
    let mut store = MemoryStore::new();
    let alpha = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true)]);
    // u1 joins beta later; beta members must not be picked.
    let beta = store.create_team("beta").unwrap();
    let outsider = store.upsert_user("b1", true).unwrap();
    store.add_team_member(beta.id, outsider.id).unwrap();
    store.add_team_member(beta.id, alpha[0].id).unwrap();

    let pr = PullRequestsService::create(&mut store, &mut rng(4), 3, "x", alpha[0].id).unwrap();
    assert_eq!(pr.reviewer_ids(), vec![alpha[1].id]);
    assert_eq!(pr.author.team_name, "alpha");
}

#[test]
fn test_merge_is_idempotent() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true), ("u3", true)]);
    PullRequestsService::create(&mut store, &mut rng(5), 1, "Ship", users[0].id).unwrap();

    let first = PullRequestsService::merge(&mut store, 1).unwrap();
    let writes = store.writes();
    let second = PullRequestsService::merge(&mut store, 1).unwrap();

    assert_eq!(first.status, PullRequestStatus::Merged);
    assert!(first.merged_at.is_some());
    assert_eq!(first, second);
    assert_eq!(store.writes(), writes);
}

#[test]
fn test_merge_unknown_pull_request() {
    let mut store = MemoryStore::new();
    assert!(matches!(
        PullRequestsService::merge(&mut store, 404),
        Err(AppError::NotFound {
            resource: Resource::PullRequest
        })
    ));
}

#[test]
fn test_reassign_on_merged_fails_without_writes() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true), ("u3", true)]);
    let pr = PullRequestsService::create(&mut store, &mut rng(6), 1, "x", users[0].id).unwrap();
    PullRequestsService::merge(&mut store, 1).unwrap();

    let writes = store.writes();
    let err = PullRequestsService::reassign(&mut store, &mut rng(6), 1, pr.reviewers[0].user_id)
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Conflict {
            kind: ConflictKind::AlreadyMerged
        }
    ));
    assert_eq!(store.writes(), writes);
}

#[test]
fn test_reassign_unassigned_reviewer_fails_without_writes() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true), ("u3", true)]);
    PullRequestsService::create(&mut store, &mut rng(7), 1, "x", users[0].id).unwrap();

    let writes = store.writes();
    // The author is never a reviewer of their own PR.
    let err = PullRequestsService::reassign(&mut store, &mut rng(7), 1, users[0].id).unwrap_err();

    assert!(matches!(
        err,
        AppError::Conflict {
            kind: ConflictKind::NotAssigned
        }
    ));
    assert_eq!(store.writes(), writes);
}

#[test]
fn test_reassign_unknown_pull_request() {
    let mut store = MemoryStore::new();
    assert!(matches!(
        PullRequestsService::reassign(&mut store, &mut rng(1), 9, 1),
        Err(AppError::NotFound {
            resource: Resource::PullRequest
        })
    ));
}

#[test]
fn test_reassign_assignment_of_unknown_user_is_not_found() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true)]);
    PullRequestsService::create(&mut store, &mut rng(12), 1, "x", users[0].id).unwrap();
    // Assignment row whose user no longer resolves.
    store.add_reviewer(1, 999).unwrap();

    let writes = store.writes();
    let err = PullRequestsService::reassign(&mut store, &mut rng(12), 1, 999).unwrap_err();

    assert!(matches!(
        err,
        AppError::NotFound {
            resource: Resource::User
        }
    ));
    assert_eq!(store.writes(), writes);
    assert!(store.is_reviewer_assigned(1, 999).unwrap());
}

#[test]
fn test_reassign_reviewer_without_team_has_no_candidate() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true), ("u3", true)]);
    PullRequestsService::create(&mut store, &mut rng(13), 1, "x", users[0].id).unwrap();
    let drifter = store.upsert_user("drifter", true).unwrap();
    store.add_reviewer(1, drifter.id).unwrap();

    let writes = store.writes();
    let err = PullRequestsService::reassign(&mut store, &mut rng(13), 1, drifter.id).unwrap_err();

    assert!(matches!(
        err,
        AppError::Conflict {
            kind: ConflictKind::NoCandidate
        }
    ));
    assert_eq!(store.writes(), writes);
    assert!(store.is_reviewer_assigned(1, drifter.id).unwrap());
}

#[test]
fn test_reassign_replaces_with_fresh_reviewer() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true), ("u3", true)]);
    let pr = PullRequestsService::create(&mut store, &mut rng(8), 1, "x", users[0].id).unwrap();
    let before = pr.reviewer_ids();
    assert_eq!(before.len(), 2);

    let team = store.team_by_name("alpha").unwrap();
    let u4 = store.upsert_user("u4", true).unwrap();
    store.add_team_member(team.id, u4.id).unwrap();

    let old = before[0];
    let result = PullRequestsService::reassign(&mut store, &mut rng(8), 1, old).unwrap();

    assert_eq!(result.replaced_by, u4.id.to_string());
    let after = result.pr.reviewer_ids();
    assert_eq!(after.len(), 2);
    assert!(!after.contains(&old));
    assert!(after.contains(&before[1]));
    assert!(after.contains(&u4.id));
    assert!(!after.contains(&users[0].id));
}

#[test]
fn test_reassign_works_for_deactivated_reviewer() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true), ("u3", true)]);
    PullRequestsService::create(&mut store, &mut rng(2), 1, "x", users[0].id).unwrap();
    // u2 and u3 are the reviewers; u2 goes on leave and u4 joins.
    store.set_user_active(users[1].id, false).unwrap();
    let team = store.team_by_name("alpha").unwrap();
    let u4 = store.upsert_user("u4", true).unwrap();
    store.add_team_member(team.id, u4.id).unwrap();

    let result = PullRequestsService::reassign(&mut store, &mut rng(2), 1, users[1].id).unwrap();
    assert_eq!(result.replaced_by, u4.id.to_string());
}

#[test]
fn test_scenario_reassign_without_candidate() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true), ("u3", false)]);
    let pr = PullRequestsService::create(&mut store, &mut rng(3), 100, "x", users[0].id).unwrap();
    assert_eq!(pr.reviewer_ids(), vec![users[1].id]);

    let writes = store.writes();
    let err = PullRequestsService::reassign(&mut store, &mut rng(3), 100, users[1].id)
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Conflict {
            kind: ConflictKind::NoCandidate
        }
    ));
    assert_eq!(store.writes(), writes);
    let current: Vec<i32> = store.reviewers(100).unwrap().iter().map(|u| u.id).collect();
    assert_eq!(current, vec![users[1].id]);
}

#[test]
fn test_reviewer_failure_does_not_block_creation() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true), ("u3", true)]);
    store.reject_reviewer(users[1].id);

    let pr = PullRequestsService::create(&mut store, &mut rng(11), 1, "x", users[0].id).unwrap();
    assert_eq!(pr.reviewer_ids(), vec![users[2].id]);
}
