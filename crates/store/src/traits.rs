//! Store traits for primary entity records.
//!
//! These traits are the seam between the rating core and whatever holds the
//! primary film/user records. The in-memory implementations in this crate
//! are the only ones shipped; a relational implementation would slot in
//! behind the same interface.
//!
//! ## Design Note
//! - `Send + Sync` allows a store to be shared behind `Arc<RwLock<_>>`
//! - Lookups return `Option` rather than errors; translating absence into
//!   a domain error is the service layer's job
//! - `create` takes an id-less payload and returns the stored record, so
//!   callers can never smuggle in their own ids

use crate::types::{Film, FilmId, NewFilm, NewUser, User, UserId};

/// Primary storage for film records.
pub trait FilmStore: Send + Sync {
    /// Insert a new film, allocating its id. Returns the stored record.
    fn create(&mut self, new: NewFilm) -> Film;

    /// Replace an existing film record.
    ///
    /// Returns the updated record, or `None` if no film with that id exists.
    fn update(&mut self, film: Film) -> Option<Film>;

    /// Look up a film by id.
    fn get(&self, id: FilmId) -> Option<Film>;

    /// Whether a film with this id exists.
    fn exists(&self, id: FilmId) -> bool {
        self.get(id).is_some()
    }

    /// All films, in ascending-id order.
    fn all(&self) -> Vec<Film>;

    /// Remove a single film. Returns the removed record if it existed.
    fn delete(&mut self, id: FilmId) -> Option<Film>;

    /// Remove every film.
    fn delete_all(&mut self);
}

/// Primary storage for user records.
pub trait UserStore: Send + Sync {
    /// Insert a new user, allocating its id. Returns the stored record.
    fn create(&mut self, new: NewUser) -> User;

    /// Replace an existing user record.
    ///
    /// Returns the updated record, or `None` if no user with that id exists.
    fn update(&mut self, user: User) -> Option<User>;

    /// Look up a user by id.
    fn get(&self, id: UserId) -> Option<User>;

    /// Whether a user with this id exists.
    fn exists(&self, id: UserId) -> bool {
        self.get(id).is_some()
    }

    /// All users, in ascending-id order.
    fn all(&self) -> Vec<User>;

    /// Remove every user.
    fn delete_all(&mut self);
}
