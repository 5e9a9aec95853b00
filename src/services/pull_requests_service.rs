use std::collections::HashSet;

use rand::Rng;

use crate::{
    db::{
        models::{NewPullRequest, PullRequest, PullRequestDetail, ReassignResponse, User, UserResponse},
        store::ReviewStore,
    },
    error::{AppError, AppResult, ConflictKind, Resource},
    services::reviewer_selection::{REVIEWERS_PER_PULL_REQUEST, pick_replacement, select_reviewers},
};

pub struct PullRequestsService;

impl PullRequestsService {
    /// Open a pull request and assign up to two reviewers from the author's
    /// first team. Reviewer assignment never fails the creation.
    pub fn create<S, R>(
        store: &mut S,
        rng: &mut R,
        pr_id: i32,
        title: &str,
        author_id: i32,
    ) -> AppResult<PullRequestDetail>
    where
        S: ReviewStore,
        R: Rng + ?Sized,
    {
        store.in_transaction(|store| {
            let author = store.user(author_id).map_err(|e| e.on(Resource::Author))?;
            let team_id = store
                .user_team_ids(author.id)?
                .first()
                .copied()
                .ok_or_else(|| AppError::not_found(Resource::AuthorTeam))?;

            let pr = store
                .create_pull_request(&NewPullRequest::open(pr_id, title, author.id))
                .map_err(|e| e.on(Resource::PullRequest))?;

            let assigned = Self::assign_initial_reviewers(store, rng, &pr, team_id);
            tracing::info!(
                pr_id = pr.id,
                author_id = author.id,
                team_id,
                reviewers = ?assigned,
                "Pull request created"
            );

            Self::detail(store, &pr)
        })
    }

    /// Mark a pull request as merged. Merging an already merged PR returns
    /// its current state untouched.
    pub fn merge<S: ReviewStore>(store: &mut S, pr_id: i32) -> AppResult<PullRequestDetail> {
        store.in_transaction(|store| {
            let pr = store
                .lock_pull_request(pr_id)
                .map_err(|e| e.on(Resource::PullRequest))?;

            let pr = if pr.status.is_merged() {
                tracing::debug!(pr_id, "Pull request already merged");
                pr
            } else {
                let merged = store
                    .mark_merged(pr.id)
                    .map_err(|e| e.on(Resource::PullRequest))?;
                tracing::info!(pr_id, merged_at = ?merged.merged_at, "Pull request merged");
                merged
            };

            Self::detail(store, &pr)
        })
    }

    /// Replace `old_reviewer_id` with a random active member of the old
    /// reviewer's first team. The author and every current reviewer are
    /// excluded from the draw.
    pub fn reassign<S, R>(
        store: &mut S,
        rng: &mut R,
        pr_id: i32,
        old_reviewer_id: i32,
    ) -> AppResult<ReassignResponse>
    where
        S: ReviewStore,
        R: Rng + ?Sized,
    {
        store.in_transaction(|store| {
            let pr = store
                .lock_pull_request(pr_id)
                .map_err(|e| e.on(Resource::PullRequest))?;
            if pr.status.is_merged() {
                return Err(AppError::conflict(ConflictKind::AlreadyMerged));
            }

            if !store.is_reviewer_assigned(pr.id, old_reviewer_id)? {
                return Err(AppError::conflict(ConflictKind::NotAssigned));
            }

            let old_reviewer = store
                .user(old_reviewer_id)
                .map_err(|e| e.on(Resource::User))?;
            let team_id = store
                .user_team_ids(old_reviewer.id)?
                .first()
                .copied()
                .ok_or_else(|| AppError::conflict(ConflictKind::NoCandidate))?;

            let mut excluded: HashSet<i32> =
                store.reviewers(pr.id)?.iter().map(|r| r.id).collect();
            excluded.insert(old_reviewer.id);
            excluded.insert(pr.author_id);
            let candidates: Vec<User> = store
                .active_team_members(team_id)?
                .into_iter()
                .filter(|u| !excluded.contains(&u.id))
                .collect();

            let replacement = pick_replacement(&candidates, rng)
                .ok_or_else(|| AppError::conflict(ConflictKind::NoCandidate))?;

            store
                .remove_reviewer(pr.id, old_reviewer.id)
                .map_err(|e| e.on(Resource::User))?;
            store
                .add_reviewer(pr.id, replacement.id)
                .map_err(|e| e.on(Resource::User))?;

            tracing::info!(
                pr_id,
                old_reviewer_id,
                new_reviewer_id = replacement.id,
                "Reviewer reassigned"
            );

            let detail = Self::detail(store, &pr)?;
            Ok(ReassignResponse::new(detail, replacement.id))
        })
    }

    // Best effort: lookup and every insert run in their own savepoint, and a
    // failure only costs that reviewer.
    fn assign_initial_reviewers<S, R>(
        store: &mut S,
        rng: &mut R,
        pr: &PullRequest,
        team_id: i32,
    ) -> Vec<i32>
    where
        S: ReviewStore,
        R: Rng + ?Sized,
    {
        let candidates: Vec<User> = match store.savepoint(|s| Ok(s.active_team_members(team_id)?)) {
            Ok(members) => members
                .into_iter()
                .filter(|u| u.id != pr.author_id)
                .collect(),
            Err(e) => {
                tracing::warn!(pr_id = pr.id, team_id, error = %e, "Could not load reviewer candidates");
                return Vec::new();
            }
        };

        let mut assigned = Vec::new();
        for reviewer in select_reviewers(&candidates, REVIEWERS_PER_PULL_REQUEST, rng) {
            match store.savepoint(|s| Ok(s.add_reviewer(pr.id, reviewer.id)?)) {
                Ok(()) => assigned.push(reviewer.id),
                Err(e) => tracing::warn!(
                    pr_id = pr.id,
                    reviewer_id = reviewer.id,
                    error = %e,
                    "Skipping reviewer assignment"
                ),
            }
        }
        assigned
    }

    fn detail<S: ReviewStore>(store: &mut S, pr: &PullRequest) -> AppResult<PullRequestDetail> {
        let author = store.user(pr.author_id).map_err(|e| e.on(Resource::Author))?;
        let reviewers = store.reviewers(pr.id)?;

        let ids: Vec<i32> = std::iter::once(author.id)
            .chain(reviewers.iter().map(|r| r.id))
            .collect();
        let teams = store.primary_team_names(&ids)?;
        let render = |user: &User| UserResponse::new(user, teams.get(&user.id).map(String::as_str));

        Ok(PullRequestDetail {
            pull_request_id: pr.id,
            pull_request_name: pr.title.clone(),
            author: render(&author),
            status: pr.status,
            reviewers: reviewers.iter().map(render).collect(),
            created_at: pr.created_at,
            merged_at: pr.merged_at,
        })
    }
}
