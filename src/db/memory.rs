//! In-memory implementation of [`ReviewStore`].
//!
//! Mirrors the PostgreSQL semantics the services depend on (unique usernames
//! and team names, caller-chosen PR ids, ordering of listings) without a
//! database. Transactions and savepoints are emulated by snapshotting state.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Utc;

use crate::db::enums::PullRequestStatus;
use crate::db::models::{NewPullRequest, PullRequest, ReviewerAssignment, Team, TeamMember, User};
use crate::db::store::ReviewStore;
use crate::error::{AppResult, StoreError, StoreResult};

#[derive(Clone, Debug, Default, PartialEq)]
struct MemoryState {
    users: BTreeMap<i32, User>,
    teams: BTreeMap<i32, Team>,
    team_members: Vec<TeamMember>,
    pull_requests: BTreeMap<i32, PullRequest>,
    pr_reviewers: Vec<ReviewerAssignment>,
    next_user_id: i32,
    next_team_id: i32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: MemoryState,
    writes: usize,
    rejected_reviewers: HashSet<i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutating calls made so far, including rolled back ones.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Make every future `add_reviewer` for this user fail with a storage
    /// failure.
    pub fn reject_reviewer(&mut self, user_id: i32) {
        self.rejected_reviewers.insert(user_id);
    }

    /// Add a membership whose `created_at` is backdated, to control which
    /// team counts as a user's first.
    #[cfg(test)]
    fn add_team_member_at(
        &mut self,
        team_id: i32,
        user_id: i32,
        created_at: chrono::DateTime<Utc>,
    ) {
        self.writes += 1;
        self.state
            .team_members
            .retain(|m| !(m.team_id == team_id && m.user_id == user_id));
        self.state.team_members.push(TeamMember {
            team_id,
            user_id,
            created_at,
        });
    }

    fn memberships_of(&self, user_id: i32) -> Vec<&TeamMember> {
        let mut memberships: Vec<&TeamMember> = self
            .state
            .team_members
            .iter()
            .filter(|m| m.user_id == user_id)
            .collect();
        memberships.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.team_id.cmp(&b.team_id))
        });
        memberships
    }

    fn members_where(&self, team_id: i32, keep: impl Fn(&User) -> bool) -> Vec<User> {
        let ids: HashSet<i32> = self
            .state
            .team_members
            .iter()
            .filter(|m| m.team_id == team_id)
            .map(|m| m.user_id)
            .collect();
        // BTreeMap iteration keeps users ordered by id.
        self.state
            .users
            .values()
            .filter(|u| ids.contains(&u.id) && keep(u))
            .cloned()
            .collect()
    }

    fn assignments_of(&self, pr_id: i32) -> Vec<&ReviewerAssignment> {
        let mut assignments: Vec<&ReviewerAssignment> = self
            .state
            .pr_reviewers
            .iter()
            .filter(|a| a.pr_id == pr_id)
            .collect();
        assignments.sort_by(|a, b| {
            a.assigned_at
                .cmp(&b.assigned_at)
                .then(a.reviewer_id.cmp(&b.reviewer_id))
        });
        assignments
    }
}

impl ReviewStore for MemoryStore {
    fn in_transaction<T, F>(&mut self, mut f: F) -> AppResult<T>
    where
        F: FnMut(&mut Self) -> AppResult<T>,
    {
        self.savepoint(|store| f(store))
    }

    fn savepoint<T, F>(&mut self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Self) -> AppResult<T>,
    {
        let snapshot = self.state.clone();
        let result = f(self);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    fn user(&mut self, user_id: i32) -> StoreResult<User> {
        self.state
            .users
            .get(&user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn upsert_user(&mut self, username: &str, is_active: bool) -> StoreResult<User> {
        self.writes += 1;
        let now = Utc::now();
        if let Some(user) = self
            .state
            .users
            .values_mut()
            .find(|u| u.username == username)
        {
            user.is_active = is_active;
            user.updated_at = now;
            return Ok(user.clone());
        }
        self.state.next_user_id += 1;
        let user = User {
            id: self.state.next_user_id,
            username: username.to_string(),
            is_active,
            created_at: now,
            updated_at: now,
        };
        self.state.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn set_user_active(&mut self, user_id: i32, is_active: bool) -> StoreResult<User> {
        self.writes += 1;
        let user = self
            .state
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::NotFound)?;
        user.is_active = is_active;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    fn user_team_ids(&mut self, user_id: i32) -> StoreResult<Vec<i32>> {
        Ok(self
            .memberships_of(user_id)
            .into_iter()
            .map(|m| m.team_id)
            .collect())
    }

    fn primary_team_names(&mut self, user_ids: &[i32]) -> StoreResult<HashMap<i32, String>> {
        let mut names = HashMap::new();
        for &user_id in user_ids {
            let first = self
                .memberships_of(user_id)
                .first()
                .and_then(|m| self.state.teams.get(&m.team_id));
            if let Some(team) = first {
                names.insert(user_id, team.name.clone());
            }
        }
        Ok(names)
    }

    fn team_by_name(&mut self, name: &str) -> StoreResult<Team> {
        self.state
            .teams
            .values()
            .find(|t| t.name == name)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn create_team(&mut self, name: &str) -> StoreResult<Team> {
        self.writes += 1;
        if self.state.teams.values().any(|t| t.name == name) {
            return Err(StoreError::AlreadyExists);
        }
        self.state.next_team_id += 1;
        let now = Utc::now();
        let team = Team {
            id: self.state.next_team_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.state.teams.insert(team.id, team.clone());
        Ok(team)
    }

    fn add_team_member(&mut self, team_id: i32, user_id: i32) -> StoreResult<()> {
        self.writes += 1;
        let exists = self
            .state
            .team_members
            .iter()
            .any(|m| m.team_id == team_id && m.user_id == user_id);
        if !exists {
            self.state.team_members.push(TeamMember {
                team_id,
                user_id,
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    fn team_members(&mut self, team_id: i32) -> StoreResult<Vec<User>> {
        Ok(self.members_where(team_id, |_| true))
    }

    fn active_team_members(&mut self, team_id: i32) -> StoreResult<Vec<User>> {
        Ok(self.members_where(team_id, |u| u.is_active))
    }

    fn create_pull_request(&mut self, new_pr: &NewPullRequest) -> StoreResult<PullRequest> {
        self.writes += 1;
        if self.state.pull_requests.contains_key(&new_pr.id) {
            return Err(StoreError::AlreadyExists);
        }
        let pr = PullRequest {
            id: new_pr.id,
            title: new_pr.title.clone(),
            author_id: new_pr.author_id,
            status: new_pr.status,
            created_at: new_pr.created_at,
            updated_at: new_pr.updated_at,
            merged_at: None,
        };
        self.state.pull_requests.insert(pr.id, pr.clone());
        Ok(pr)
    }

    fn pull_request(&mut self, pr_id: i32) -> StoreResult<PullRequest> {
        self.state
            .pull_requests
            .get(&pr_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn lock_pull_request(&mut self, pr_id: i32) -> StoreResult<PullRequest> {
        self.pull_request(pr_id)
    }

    fn mark_merged(&mut self, pr_id: i32) -> StoreResult<PullRequest> {
        self.writes += 1;
        let pr = self
            .state
            .pull_requests
            .get_mut(&pr_id)
            .ok_or(StoreError::NotFound)?;
        let now = Utc::now();
        pr.status = PullRequestStatus::Merged;
        pr.updated_at = now;
        pr.merged_at = Some(now);
        Ok(pr.clone())
    }

    fn add_reviewer(&mut self, pr_id: i32, reviewer_id: i32) -> StoreResult<()> {
        self.writes += 1;
        if self.rejected_reviewers.contains(&reviewer_id) {
            return Err(StoreError::Failure(diesel::result::Error::RollbackTransaction));
        }
        if self
            .state
            .pr_reviewers
            .iter()
            .any(|a| a.pr_id == pr_id && a.reviewer_id == reviewer_id)
        {
            return Err(StoreError::AlreadyExists);
        }
        self.state.pr_reviewers.push(ReviewerAssignment {
            pr_id,
            reviewer_id,
            assigned_at: Utc::now(),
        });
        Ok(())
    }

    fn remove_reviewer(&mut self, pr_id: i32, reviewer_id: i32) -> StoreResult<()> {
        self.writes += 1;
        let before = self.state.pr_reviewers.len();
        self.state
            .pr_reviewers
            .retain(|a| !(a.pr_id == pr_id && a.reviewer_id == reviewer_id));
        if self.state.pr_reviewers.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn is_reviewer_assigned(&mut self, pr_id: i32, reviewer_id: i32) -> StoreResult<bool> {
        Ok(self
            .state
            .pr_reviewers
            .iter()
            .any(|a| a.pr_id == pr_id && a.reviewer_id == reviewer_id))
    }

    fn reviewers(&mut self, pr_id: i32) -> StoreResult<Vec<User>> {
        Ok(self
            .assignments_of(pr_id)
            .into_iter()
            .filter_map(|a| self.state.users.get(&a.reviewer_id).cloned())
            .collect())
    }

    fn pull_requests_for_reviewer(&mut self, reviewer_id: i32) -> StoreResult<Vec<PullRequest>> {
        let mut prs: Vec<PullRequest> = self
            .state
            .pr_reviewers
            .iter()
            .filter(|a| a.reviewer_id == reviewer_id)
            .filter_map(|a| self.state.pull_requests.get(&a.pr_id).cloned())
            .collect();
        prs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(prs)
    }
}
