//! Primary entity storage for the film rating service.
//!
//! This crate provides:
//! - Domain types (`Film`, `User`) and their id aliases
//! - `FilmStore`/`UserStore` traits, the seam the service layer talks to
//! - In-memory implementations backed by `HashMap`, each owning an
//!   `IdAllocator` so ids are minted in exactly one place
//!
//! The derived ranking structures live in the `ranking` crate and never
//! touch these stores directly; the service layer is the only writer.

pub mod memory;
pub mod traits;
pub mod types;

// Re-export main types
pub use memory::{IdAllocator, InMemoryFilmStore, InMemoryUserStore};
pub use traits::{FilmStore, UserStore};
pub use types::{Film, FilmId, NewFilm, NewUser, User, UserId};
