use serde::Deserialize;
use validator::Validate;

/// Body of `POST /users/setIsActive`.
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct SetUserActiveRequest {
    #[validate(range(min = 1, message = "user_id must be positive"))]
    pub user_id: i32,
    pub is_active: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UserQuery {
    pub user_id: i32,
}
