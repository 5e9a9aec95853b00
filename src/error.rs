use crate::db::models::api::{ApiErrorResponse, ErrorCode};
use axum::{Json, http::StatusCode, response::IntoResponse};
use std::fmt;
use thiserror::Error;

/// Entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Author,
    AuthorTeam,
    Team,
    PullRequest,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::User => "user",
            Resource::Author => "author",
            Resource::AuthorTeam => "team of author",
            Resource::Team => "team",
            Resource::PullRequest => "pull request",
        })
    }
}

/// Valid entities, invalid state transition or no eligible candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    AlreadyMerged,
    NotAssigned,
    NoCandidate,
}

impl ConflictKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConflictKind::AlreadyMerged => ErrorCode::PrMerged,
            ConflictKind::NotAssigned => ErrorCode::NotAssigned,
            ConflictKind::NoCandidate => ErrorCode::NoCandidate,
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictKind::AlreadyMerged => "cannot reassign on merged PR",
            ConflictKind::NotAssigned => "reviewer is not assigned to this PR",
            ConflictKind::NoCandidate => "no active replacement candidate in team",
        })
    }
}

/// Storage gateway failure. Lookups and unique inserts report `NotFound` and
/// `AlreadyExists` separately from any other database failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    AlreadyExists,

    #[error("storage failure: {0}")]
    Failure(#[source] diesel::result::Error),
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match e {
            Error::NotFound => StoreError::NotFound,
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                StoreError::AlreadyExists
            }
            other => StoreError::Failure(other),
        }
    }
}

impl StoreError {
    /// Attach the entity this lookup or insert was about.
    pub fn on(self, resource: Resource) -> AppError {
        match self {
            StoreError::NotFound => AppError::NotFound { resource },
            StoreError::AlreadyExists => AppError::AlreadyExists { resource },
            StoreError::Failure(e) => AppError::Database(e),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{resource} not found")]
    NotFound { resource: Resource },

    #[error("{resource} already exists")]
    AlreadyExists { resource: Resource },

    #[error("{kind}")]
    Conflict { kind: ConflictKind },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Store errors reaching `?` without a resource attached are unexpected.
impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Failure(e) => AppError::Database(e),
            StoreError::NotFound => AppError::internal("record unexpectedly missing"),
            StoreError::AlreadyExists => AppError::internal("record unexpectedly duplicated"),
        }
    }
}

impl AppError {
    pub fn status_and_body(&self) -> (StatusCode, ApiErrorResponse) {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::new(ErrorCode::InternalError, "Database error"),
                )
            }
            AppError::Pool(e) => {
                tracing::error!("Connection pool error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::new(ErrorCode::InternalError, "Connection error"),
                )
            }
            AppError::Validation { message } => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse::new(ErrorCode::BadRequest, message.as_str()),
            ),
            AppError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorResponse::new(ErrorCode::NotFound, self.to_string()),
            ),
            AppError::AlreadyExists { resource } => match resource {
                Resource::Team => (
                    StatusCode::BAD_REQUEST,
                    ApiErrorResponse::new(ErrorCode::TeamExists, "team_name already exists"),
                ),
                Resource::PullRequest => (
                    StatusCode::CONFLICT,
                    ApiErrorResponse::new(ErrorCode::PrExists, "PR id already exists"),
                ),
                _ => {
                    tracing::error!("Unexpected duplicate: {}", self);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiErrorResponse::new(ErrorCode::InternalError, "Internal server error"),
                    )
                }
            },
            AppError::Conflict { kind } => (
                StatusCode::CONFLICT,
                ApiErrorResponse::new(kind.code(), kind.to_string()),
            ),
            AppError::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::new(ErrorCode::InternalError, "Configuration error"),
                )
            }
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::new(ErrorCode::InternalError, "Internal server error"),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

// Constructors
impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: Resource) -> Self {
        Self::NotFound { resource }
    }

    pub fn conflict(kind: ConflictKind) -> Self {
        Self::Conflict { kind }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_serialization_failure(&self) -> bool {
        matches!(
            self,
            AppError::Database(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::SerializationFailure,
                _
            ))
        )
    }
}
