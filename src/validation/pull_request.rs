use serde::Deserialize;
use validator::Validate;

use crate::validation::rules::not_blank;

/// Body of `POST /pullRequest/create`.
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreatePullRequestRequest {
    #[validate(range(min = 1, message = "pull_request_id must be positive"))]
    pub pull_request_id: i32,
    #[validate(
        length(max = 500, message = "pull_request_name must be at most 500 characters"),
        custom(function = "not_blank")
    )]
    pub pull_request_name: String,
    #[validate(range(min = 1, message = "author_id must be positive"))]
    pub author_id: i32,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct MergePullRequestRequest {
    #[validate(range(min = 1, message = "pull_request_id must be positive"))]
    pub pull_request_id: i32,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct ReassignReviewerRequest {
    #[validate(range(min = 1, message = "pull_request_id must be positive"))]
    pub pull_request_id: i32,
    #[validate(range(min = 1, message = "old_reviewer_id must be positive"))]
    pub old_reviewer_id: i32,
}
