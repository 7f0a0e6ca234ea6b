//! Error types for the ranking core.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - Enum variants for different error cases
//! - Error messages with context
//! - Automatic `Display` and `Error` trait implementations

use store::UserId;
use thiserror::Error;

/// Errors raised by the derived structures and the service façade.
///
/// Every guard violation becomes a typed variant. Nothing is swallowed and
/// nothing is retried: all operations are local and deterministic, so a
/// retry could never change the outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Referenced entity is absent from the primary store (or a film was
    /// never registered with the popularity index)
    #[error("{entity} with id {id} was not found")]
    NotFound { entity: String, id: u32 },

    /// Duplicate registration of an entity that is already tracked
    #[error("{entity} with id {id} already exists")]
    AlreadyExists { entity: String, id: u32 },

    /// A friend request in this direction is already pending
    #[error("user {from} already sent a friend request to user {to}")]
    FriendEdgeAlreadyExists { from: UserId, to: UserId },

    /// No friend request in this direction to withdraw
    #[error("user {from} has no friend request to user {to}")]
    FriendEdgeNotFound { from: UserId, to: UserId },

    /// Nonsensical request, e.g. befriending yourself
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DomainError {
    /// Shorthand for the film-not-found case
    pub fn film_not_found(id: u32) -> Self {
        DomainError::NotFound {
            entity: "film".to_string(),
            id,
        }
    }

    /// Shorthand for the user-not-found case
    pub fn user_not_found(id: u32) -> Self {
        DomainError::NotFound {
            entity: "user".to_string(),
            id,
        }
    }
}

/// Convenience type alias for Results in the ranking core
pub type Result<T> = std::result::Result<T, DomainError>;
