pub mod pull_requests;
pub mod teams;
pub mod users;

pub use pull_requests::PullRequestRepo;
pub use teams::TeamRepo;
pub use users::UserRepo;
