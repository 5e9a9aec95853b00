use review_assigner::{
    db::{MemoryStore, ReviewStore, enums::PullRequestStatus},
    error::{AppError, Resource},
    services::{PullRequestsService, UsersService},
};

use super::{rng, seed_team};

#[test]
fn test_set_status_returns_team_name() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true)]);

    let user = UsersService::set_status(&mut store, users[0].id, false).unwrap();
    assert_eq!(user.user_id, users[0].id);
    assert_eq!(user.team_name, "alpha");
    assert!(!user.is_active);
    assert!(!store.user(users[0].id).unwrap().is_active);
}

#[test]
fn test_set_status_for_user_without_team() {
    let mut store = MemoryStore::new();
    let loner = store.upsert_user("loner", true).unwrap();

    let user = UsersService::set_status(&mut store, loner.id, false).unwrap();
    assert_eq!(user.team_name, "");
    assert!(!user.is_active);
}

#[test]
fn test_set_status_unknown_user() {
    let mut store = MemoryStore::new();
    let err = UsersService::set_status(&mut store, 77, true).unwrap_err();
    assert!(matches!(
        err,
        AppError::NotFound {
            resource: Resource::User
        }
    ));
}

#[test]
fn test_reviews_list_newest_first_with_any_status() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true), ("u2", true)]);
    let (author, reviewer) = (users[0].id, users[1].id);

    PullRequestsService::create(&mut store, &mut rng(1), 1, "First", author).unwrap();
    PullRequestsService::create(&mut store, &mut rng(2), 2, "Second", author).unwrap();
    PullRequestsService::merge(&mut store, 1).unwrap();

    let reviews = UsersService::reviews(&mut store, reviewer).unwrap();
    assert_eq!(reviews.username, "u2");
    let ids: Vec<i32> = reviews.pull_requests.iter().map(|p| p.pull_request_id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(reviews.pull_requests[1].status, PullRequestStatus::Merged);
    assert_eq!(reviews.pull_requests[0].author_id, author);
}

#[test]
fn test_reviews_empty_for_user_without_assignments() {
    let mut store = MemoryStore::new();
    let users = seed_team(&mut store, "alpha", &[("u1", true)]);
    let reviews = UsersService::reviews(&mut store, users[0].id).unwrap();
    assert!(reviews.pull_requests.is_empty());
}

#[test]
fn test_reviews_unknown_user() {
    let mut store = MemoryStore::new();
    assert!(matches!(
        UsersService::reviews(&mut store, 5),
        Err(AppError::NotFound {
            resource: Resource::User
        })
    ));
}
