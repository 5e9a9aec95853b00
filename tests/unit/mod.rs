mod pull_request;
mod selection;
mod team;
mod user;

use rand::SeedableRng;
use rand::rngs::StdRng;
use review_assigner::db::models::User;
use review_assigner::db::{MemoryStore, ReviewStore};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Create `name` with the given members directly through the store.
pub fn seed_team(store: &mut MemoryStore, name: &str, members: &[(&str, bool)]) -> Vec<User> {
    let team = store.create_team(name).unwrap();
    members
        .iter()
        .map(|(username, is_active)| {
            let user = store.upsert_user(username, *is_active).unwrap();
            store.add_team_member(team.id, user.id).unwrap();
            user
        })
        .collect()
}
