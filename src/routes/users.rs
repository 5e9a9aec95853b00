use crate::{
    AppState,
    error::{AppError, AppResult},
    routes::with_connection,
    services::UsersService,
    validation::{SetUserActiveRequest, UserQuery, ValidatedJson},
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;

/// POST /users/setIsActive
pub async fn set_is_active(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<SetUserActiveRequest>,
) -> AppResult<impl IntoResponse> {
    let user = with_connection(&state, move |conn| {
        UsersService::set_status(conn, payload.user_id, payload.is_active)
    })
    .await?;
    Ok(Json(json!({ "user": user })))
}

/// GET /users/getReview?user_id=
pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query.map_err(|e| AppError::validation(e.to_string()))?;
    let reviews =
        with_connection(&state, move |conn| UsersService::reviews(conn, query.user_id)).await?;
    Ok(Json(reviews))
}
