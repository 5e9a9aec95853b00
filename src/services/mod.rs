pub mod pull_requests_service;
pub mod reviewer_selection;
pub mod teams_service;
pub mod users_service;

pub use pull_requests_service::PullRequestsService;
pub use teams_service::TeamsService;
pub use users_service::UsersService;
