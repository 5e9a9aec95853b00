use crate::{
    AppState,
    error::{AppError, AppResult},
    routes::with_connection,
    services::TeamsService,
    validation::{CreateTeamRequest, TeamQuery, ValidatedJson},
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;

/// POST /team/add
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateTeamRequest>,
) -> AppResult<impl IntoResponse> {
    let team = with_connection(&state, move |conn| TeamsService::create(conn, &payload)).await?;
    Ok((StatusCode::CREATED, Json(json!({ "team": team }))))
}

/// GET /team/get?team_name=
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TeamQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query.map_err(|e| AppError::validation(e.to_string()))?;
    let team =
        with_connection(&state, move |conn| TeamsService::get_by_name(conn, &query.team_name))
            .await?;
    Ok(Json(team))
}
