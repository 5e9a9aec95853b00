use crate::{
    db::{
        models::{PullRequestSummary, UserResponse, UserReviewsResponse},
        store::ReviewStore,
    },
    error::{AppResult, Resource},
};

pub struct UsersService;

impl UsersService {
    /// Toggle a user's active flag. A user without a team is still updated
    /// and comes back with an empty `team_name`.
    pub fn set_status<S: ReviewStore>(
        store: &mut S,
        user_id: i32,
        is_active: bool,
    ) -> AppResult<UserResponse> {
        store.in_transaction(|store| {
            let user = store
                .set_user_active(user_id, is_active)
                .map_err(|e| e.on(Resource::User))?;
            let teams = store.primary_team_names(&[user.id])?;
            tracing::info!(user_id, is_active, "User status updated");
            Ok(UserResponse::new(&user, teams.get(&user.id).map(String::as_str)))
        })
    }

    /// Pull requests the user reviews, newest first, merged ones included.
    pub fn reviews<S: ReviewStore>(store: &mut S, user_id: i32) -> AppResult<UserReviewsResponse> {
        store.in_transaction(|store| {
            let user = store.user(user_id).map_err(|e| e.on(Resource::User))?;
            let pull_requests = store
                .pull_requests_for_reviewer(user.id)?
                .iter()
                .map(PullRequestSummary::from)
                .collect();
            Ok(UserReviewsResponse {
                user_id: user.id,
                username: user.username,
                pull_requests,
            })
        })
    }
}
