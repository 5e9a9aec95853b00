use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// User models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// User API DTOs

/// User as rendered in PR details and status responses. `team_name` is empty
/// for a user that belongs to no team.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserResponse {
    pub user_id: i32,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl UserResponse {
    pub fn new(user: &User, team_name: Option<&str>) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            team_name: team_name.unwrap_or_default().to_string(),
            is_active: user.is_active,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserReviewsResponse {
    pub user_id: i32,
    pub username: String,
    pub pull_requests: Vec<crate::db::models::pull_request::PullRequestSummary>,
}
