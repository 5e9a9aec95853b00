use serde::Deserialize;
use validator::Validate;

use crate::validation::rules::not_blank;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct TeamMemberRequest {
    #[validate(
        length(max = 255, message = "Username must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub username: String,
    pub is_active: bool,
}

impl TeamMemberRequest {
    pub fn new(username: impl Into<String>, is_active: bool) -> Self {
        Self {
            username: username.into(),
            is_active,
        }
    }
}

/// Body of `POST /team/add`.
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateTeamRequest {
    #[validate(
        length(max = 255, message = "Team name must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub team_name: String,
    #[serde(default)]
    #[validate(nested)]
    pub members: Vec<TeamMemberRequest>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TeamQuery {
    pub team_name: String,
}
