use review_assigner::{
    db::{MemoryStore, ReviewStore},
    error::{AppError, Resource},
    services::TeamsService,
    validation::{CreateTeamRequest, TeamMemberRequest},
};

use super::seed_team;

fn request(name: &str, members: &[(&str, bool)]) -> CreateTeamRequest {
    CreateTeamRequest {
        team_name: name.to_string(),
        members: members
            .iter()
            .map(|(username, is_active)| TeamMemberRequest::new(*username, *is_active))
            .collect(),
    }
}

#[test]
fn test_teams_service_validate_name() {
    assert!(TeamsService::validate_name("backend").is_ok());
    assert!(TeamsService::validate_name("").is_err());
    assert!(TeamsService::validate_name("   ").is_err());
}

#[test]
fn test_create_team_returns_members() {
    let mut store = MemoryStore::new();
    let team = TeamsService::create(
        &mut store,
        &request("alpha", &[("u1", true), ("u2", true), ("u3", false)]),
    )
    .unwrap();

    assert_eq!(team.team_name, "alpha");
    let names: Vec<&str> = team.members.iter().map(|m| m.username.as_str()).collect();
    assert_eq!(names, vec!["u1", "u2", "u3"]);
    assert!(!team.members[2].is_active);
}

#[test]
fn test_create_team_with_existing_name_fails_without_changes() {
    let mut store = MemoryStore::new();
    TeamsService::create(&mut store, &request("alpha", &[("u1", true)])).unwrap();

    let err = TeamsService::create(&mut store, &request("alpha", &[("u1", false), ("u9", true)]))
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::AlreadyExists {
            resource: Resource::Team
        }
    ));

    let team = TeamsService::get_by_name(&mut store, "alpha").unwrap();
    assert_eq!(team.members.len(), 1);
    assert!(team.members[0].is_active);
    assert!(store.team_by_name("alpha").is_ok());
}

#[test]
fn test_create_team_upserts_existing_user() {
    let mut store = MemoryStore::new();
    let first = TeamsService::create(&mut store, &request("alpha", &[("u1", true)])).unwrap();
    let second = TeamsService::create(&mut store, &request("beta", &[("u1", false)])).unwrap();

    assert_eq!(first.members[0].user_id, second.members[0].user_id);
    assert!(!second.members[0].is_active);

    // The same user is seen through both teams, with the updated flag.
    let alpha = TeamsService::get_by_name(&mut store, "alpha").unwrap();
    assert_eq!(alpha.members.len(), 1);
    assert!(!alpha.members[0].is_active);
}

#[test]
fn test_create_team_tolerates_duplicate_member_entries() {
    let mut store = MemoryStore::new();
    let team = TeamsService::create(&mut store, &request("alpha", &[("u1", true), ("u1", false)]))
        .unwrap();
    assert_eq!(team.members.len(), 1);
    assert!(!team.members[0].is_active);
}

#[test]
fn test_create_team_rejects_blank_name() {
    let mut store = MemoryStore::new();
    let err = TeamsService::create(&mut store, &request("  ", &[])).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(store.writes(), 0);
}

#[test]
fn test_get_team_includes_inactive_members() {
    let mut store = MemoryStore::new();
    seed_team(&mut store, "alpha", &[("u1", true), ("u2", false)]);
    let team = TeamsService::get_by_name(&mut store, "alpha").unwrap();
    assert_eq!(team.members.len(), 2);
}

#[test]
fn test_get_unknown_team_is_not_found() {
    let mut store = MemoryStore::new();
    let err = TeamsService::get_by_name(&mut store, "ghost").unwrap_err();
    assert!(matches!(
        err,
        AppError::NotFound {
            resource: Resource::Team
        }
    ));
}
