//! # Service Crate
//!
//! The façade consumed by transport layers (controllers, the CLI harness).
//! Every mutation or query of a derived structure is gated on an existence
//! check against the primary store, so the popularity index and the
//! friendship graph never observe a reference to an entity that does not
//! exist.
//!
//! ## Ownership and locking
//! - `FilmService` exclusively owns the `PopularityIndex`
//! - `UserService` exclusively owns the `FriendshipGraph`
//! - Each derived structure sits behind its own `RwLock`; the write guard
//!   is held for the whole of one operation, so the index's
//!   remove-then-reinsert sequence and the graph's edge-pair checks never
//!   interleave with another mutation
//! - Lock order is always store first, then the derived structure, and the
//!   store guard is held across the derived mutation. That makes
//!   check-then-act atomic: an entity cannot be deleted between the
//!   existence check and the derived write.

pub mod films;
pub mod users;

use std::sync::{Arc, RwLock};

// Re-export main types
pub use films::FilmService;
pub use users::UserService;

/// Shared handle to the primary film store
pub type SharedFilmStore = Arc<RwLock<dyn store::FilmStore>>;

/// Shared handle to the primary user store
pub type SharedUserStore = Arc<RwLock<dyn store::UserStore>>;
