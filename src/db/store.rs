//! Storage gateway used by the services.
//!
//! `ReviewStore` is implemented for `PgConnection` (diesel, production) and for
//! [`MemoryStore`](super::memory::MemoryStore) (in-process, tests).

use std::collections::HashMap;

use diesel::prelude::*;

use crate::db::models::{NewPullRequest, PullRequest, Team, User};
use crate::db::repositories::{PullRequestRepo, TeamRepo, UserRepo};
use crate::error::{AppError, AppResult, StoreError, StoreResult};

/// Attempts made by `in_transaction` when the database reports a
/// serialization failure.
pub const MAX_TRANSACTION_ATTEMPTS: u32 = 3;

pub trait ReviewStore {
    /// Run `f` in one serializable transaction, committing on `Ok` and
    /// rolling back on `Err`. `f` may be re-run after a serialization failure.
    fn in_transaction<T, F>(&mut self, f: F) -> AppResult<T>
    where
        F: FnMut(&mut Self) -> AppResult<T>;

    /// Run `f` inside the current transaction so that its failure only
    /// discards its own writes.
    fn savepoint<T, F>(&mut self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Self) -> AppResult<T>;

    // Users
    fn user(&mut self, user_id: i32) -> StoreResult<User>;
    fn upsert_user(&mut self, username: &str, is_active: bool) -> StoreResult<User>;
    fn set_user_active(&mut self, user_id: i32, is_active: bool) -> StoreResult<User>;
    /// Team ids ordered by membership age, oldest first.
    fn user_team_ids(&mut self, user_id: i32) -> StoreResult<Vec<i32>>;
    /// Name of each user's first team. Users without a team are absent.
    fn primary_team_names(&mut self, user_ids: &[i32]) -> StoreResult<HashMap<i32, String>>;

    // Teams
    fn team_by_name(&mut self, name: &str) -> StoreResult<Team>;
    fn create_team(&mut self, name: &str) -> StoreResult<Team>;
    fn add_team_member(&mut self, team_id: i32, user_id: i32) -> StoreResult<()>;
    fn team_members(&mut self, team_id: i32) -> StoreResult<Vec<User>>;
    fn active_team_members(&mut self, team_id: i32) -> StoreResult<Vec<User>>;

    // Pull requests
    fn create_pull_request(&mut self, new_pr: &NewPullRequest) -> StoreResult<PullRequest>;
    fn pull_request(&mut self, pr_id: i32) -> StoreResult<PullRequest>;
    /// Read a PR and lock it against concurrent lifecycle changes.
    fn lock_pull_request(&mut self, pr_id: i32) -> StoreResult<PullRequest>;
    fn mark_merged(&mut self, pr_id: i32) -> StoreResult<PullRequest>;
    fn add_reviewer(&mut self, pr_id: i32, reviewer_id: i32) -> StoreResult<()>;
    fn remove_reviewer(&mut self, pr_id: i32, reviewer_id: i32) -> StoreResult<()>;
    /// Whether the assignment row exists, whether or not the user does.
    fn is_reviewer_assigned(&mut self, pr_id: i32, reviewer_id: i32) -> StoreResult<bool>;
    /// Reviewers in assignment order.
    fn reviewers(&mut self, pr_id: i32) -> StoreResult<Vec<User>>;
    /// PRs reviewed by the user, newest first.
    fn pull_requests_for_reviewer(&mut self, reviewer_id: i32) -> StoreResult<Vec<PullRequest>>;
}

impl ReviewStore for PgConnection {
    fn in_transaction<T, F>(&mut self, mut f: F) -> AppResult<T>
    where
        F: FnMut(&mut Self) -> AppResult<T>,
    {
        let mut attempt = 1;
        loop {
            let result = self
                .build_transaction()
                .serializable()
                .run::<T, AppError, _>(|conn| f(conn));
            match result {
                Err(e) if e.is_serialization_failure() && attempt < MAX_TRANSACTION_ATTEMPTS => {
                    tracing::warn!(attempt, "Serialization failure, retrying transaction");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    fn savepoint<T, F>(&mut self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Self) -> AppResult<T>,
    {
        self.transaction::<T, AppError, _>(f)
    }

    fn user(&mut self, user_id: i32) -> StoreResult<User> {
        Ok(UserRepo::find_by_id(self, user_id)?)
    }

    fn upsert_user(&mut self, username: &str, is_active: bool) -> StoreResult<User> {
        Ok(UserRepo::upsert(self, username, is_active)?)
    }

    fn set_user_active(&mut self, user_id: i32, is_active: bool) -> StoreResult<User> {
        Ok(UserRepo::update_active(self, user_id, is_active)?)
    }

    fn user_team_ids(&mut self, user_id: i32) -> StoreResult<Vec<i32>> {
        Ok(UserRepo::team_ids(self, user_id)?)
    }

    fn primary_team_names(&mut self, user_ids: &[i32]) -> StoreResult<HashMap<i32, String>> {
        let rows = UserRepo::team_names(self, user_ids)?;
        let mut names = HashMap::new();
        for (user_id, team_name) in rows {
            names.entry(user_id).or_insert(team_name);
        }
        Ok(names)
    }

    fn team_by_name(&mut self, name: &str) -> StoreResult<Team> {
        Ok(TeamRepo::find_by_name(self, name)?)
    }

    fn create_team(&mut self, name: &str) -> StoreResult<Team> {
        Ok(TeamRepo::insert(self, name)?)
    }

    fn add_team_member(&mut self, team_id: i32, user_id: i32) -> StoreResult<()> {
        TeamRepo::add_member(self, team_id, user_id)?;
        Ok(())
    }

    fn team_members(&mut self, team_id: i32) -> StoreResult<Vec<User>> {
        Ok(TeamRepo::members(self, team_id)?)
    }

    fn active_team_members(&mut self, team_id: i32) -> StoreResult<Vec<User>> {
        Ok(TeamRepo::active_members(self, team_id)?)
    }

    fn create_pull_request(&mut self, new_pr: &NewPullRequest) -> StoreResult<PullRequest> {
        Ok(PullRequestRepo::insert(self, new_pr)?)
    }

    fn pull_request(&mut self, pr_id: i32) -> StoreResult<PullRequest> {
        Ok(PullRequestRepo::find_by_id(self, pr_id)?)
    }

    fn lock_pull_request(&mut self, pr_id: i32) -> StoreResult<PullRequest> {
        Ok(PullRequestRepo::find_by_id_for_update(self, pr_id)?)
    }

    fn mark_merged(&mut self, pr_id: i32) -> StoreResult<PullRequest> {
        Ok(PullRequestRepo::mark_merged(self, pr_id)?)
    }

    fn add_reviewer(&mut self, pr_id: i32, reviewer_id: i32) -> StoreResult<()> {
        PullRequestRepo::add_reviewer(self, pr_id, reviewer_id)?;
        Ok(())
    }

    fn remove_reviewer(&mut self, pr_id: i32, reviewer_id: i32) -> StoreResult<()> {
        match PullRequestRepo::remove_reviewer(self, pr_id, reviewer_id)? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }

    fn is_reviewer_assigned(&mut self, pr_id: i32, reviewer_id: i32) -> StoreResult<bool> {
        Ok(PullRequestRepo::is_assigned(self, pr_id, reviewer_id)?)
    }

    fn reviewers(&mut self, pr_id: i32) -> StoreResult<Vec<User>> {
        Ok(PullRequestRepo::reviewers(self, pr_id)?)
    }

    fn pull_requests_for_reviewer(&mut self, reviewer_id: i32) -> StoreResult<Vec<PullRequest>> {
        Ok(PullRequestRepo::list_by_reviewer(self, reviewer_id)?)
    }
}
