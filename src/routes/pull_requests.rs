use crate::{
    AppState,
    error::AppResult,
    routes::with_connection,
    services::PullRequestsService,
    validation::{
        CreatePullRequestRequest, MergePullRequestRequest, ReassignReviewerRequest, ValidatedJson,
    },
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

/// POST /pullRequest/create
pub async fn create_pull_request(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreatePullRequestRequest>,
) -> AppResult<impl IntoResponse> {
    let pr = with_connection(&state, move |conn| {
        let mut rng = rand::thread_rng();
        PullRequestsService::create(
            conn,
            &mut rng,
            payload.pull_request_id,
            &payload.pull_request_name,
            payload.author_id,
        )
    })
    .await?;
    Ok((StatusCode::CREATED, Json(json!({ "pr": pr }))))
}

/// POST /pullRequest/merge
pub async fn merge_pull_request(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<MergePullRequestRequest>,
) -> AppResult<impl IntoResponse> {
    let pr = with_connection(&state, move |conn| {
        PullRequestsService::merge(conn, payload.pull_request_id)
    })
    .await?;
    Ok(Json(json!({ "pr": pr })))
}

/// POST /pullRequest/reassign
pub async fn reassign_reviewer(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<ReassignReviewerRequest>,
) -> AppResult<impl IntoResponse> {
    let reassigned = with_connection(&state, move |conn| {
        let mut rng = rand::thread_rng();
        PullRequestsService::reassign(
            conn,
            &mut rng,
            payload.pull_request_id,
            payload.old_reviewer_id,
        )
    })
    .await?;
    Ok(Json(reassigned))
}
