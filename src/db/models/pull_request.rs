use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::enums::PullRequestStatus;
use crate::db::models::user::UserResponse;

// Pull request models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::pull_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PullRequest {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub status: PullRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

/// The id is chosen by the caller, not generated by the database.
#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::pull_requests)]
pub struct NewPullRequest {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub status: PullRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPullRequest {
    pub fn open(id: i32, title: impl Into<String>, author_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            author_id,
            status: PullRequestStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }
}

// Reviewer assignment models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::pr_reviewers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewerAssignment {
    pub pr_id: i32,
    pub reviewer_id: i32,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::pr_reviewers)]
pub struct NewReviewerAssignment {
    pub pr_id: i32,
    pub reviewer_id: i32,
    pub assigned_at: DateTime<Utc>,
}

// Pull request API DTOs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PullRequestDetail {
    pub pull_request_id: i32,
    pub pull_request_name: String,
    pub author: UserResponse,
    pub status: PullRequestStatus,
    pub reviewers: Vec<UserResponse>,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequestDetail {
    pub fn reviewer_ids(&self) -> Vec<i32> {
        self.reviewers.iter().map(|r| r.user_id).collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PullRequestSummary {
    pub pull_request_id: i32,
    pub pull_request_name: String,
    pub author_id: i32,
    pub status: PullRequestStatus,
}

impl From<&PullRequest> for PullRequestSummary {
    fn from(pr: &PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.title.clone(),
            author_id: pr.author_id,
            status: pr.status,
        }
    }
}

/// Result of a successful reassignment: the refreshed PR and the id of the
/// reviewer who replaced the old one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReassignResponse {
    pub pr: PullRequestDetail,
    pub replaced_by: String,
}

impl ReassignResponse {
    pub fn new(pr: PullRequestDetail, new_reviewer_id: i32) -> Self {
        Self {
            pr,
            replaced_by: new_reviewer_id.to_string(),
        }
    }
}
