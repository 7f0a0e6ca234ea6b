//! Core domain types for the film rating service.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (FilmId, UserId)
//! - Structs with public fields
//! - Separate "new entity" payloads so only the store ever assigns ids
//! - Derive macros for common traits

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up film IDs with user IDs

/// Unique identifier for a film, assigned by the film store
pub type FilmId = u32;

/// Unique identifier for a user, assigned by the user store
pub type UserId = u32;

// =============================================================================
// Film-related Types
// =============================================================================

/// Represents a film in the catalog.
///
/// Field-format validation (title non-blank, release-date floor and so on)
/// happens at the transport layer and is not repeated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub title: String,
    pub description: String,
    /// Release year, if known
    ///
    /// Rust concept: `Option<T>` represents a value that may or may not exist
    pub release_year: Option<u16>,
    /// Running time in minutes
    pub duration_min: u32,
}

/// Payload for creating a film.
///
/// Carries everything except the id: ids are allocated by the store on
/// `create`, never supplied by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFilm {
    pub title: String,
    pub description: String,
    pub release_year: Option<u16>,
    pub duration_min: u32,
}

impl NewFilm {
    /// Attach a store-assigned id, producing the stored record
    pub fn into_film(self, id: FilmId) -> Film {
        Film {
            id,
            title: self.title,
            description: self.description,
            release_year: self.release_year,
            duration_min: self.duration_min,
        }
    }
}

// =============================================================================
// User-related Types
// =============================================================================

/// Represents a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub login: String,
    /// Display name; a blank name is replaced with the login at creation
    /// time by the user service
    pub name: String,
}

/// Payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub login: String,
    pub name: String,
}

impl NewUser {
    /// Attach a store-assigned id, producing the stored record
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            login: self.login,
            name: self.name,
        }
    }
}
