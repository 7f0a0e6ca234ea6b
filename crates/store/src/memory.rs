//! In-memory store implementations.
//!
//! Both stores keep their records in a `HashMap` keyed by id and own an
//! `IdAllocator`. Nothing outside the store ever mints an id: the derived
//! ranking structures only see ids that a store has already handed out.
//!
//! Rust concepts demonstrated:
//! - HashMap for O(1) lookups
//! - Trait implementations over plain structs
//! - Returning owned clones so callers never borrow store internals

use crate::traits::{FilmStore, UserStore};
use crate::types::{Film, FilmId, NewFilm, NewUser, User, UserId};
use std::collections::HashMap;

/// Hands out sequential ids starting at 1.
///
/// Each store owns exactly one allocator, replacing ad-hoc incrementing
/// counter fields scattered through the code.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next id. The first call returns 1.
    pub fn allocate(&mut self) -> u32 {
        self.next += 1;
        self.next
    }
}

// =============================================================================
// Film store
// =============================================================================

/// Film records held in memory.
#[derive(Debug, Default)]
pub struct InMemoryFilmStore {
    films: HashMap<FilmId, Film>,
    ids: IdAllocator,
}

impl InMemoryFilmStore {
    pub fn new() -> Self {
        Self {
            films: HashMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Number of stored films
    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}

impl FilmStore for InMemoryFilmStore {
    fn create(&mut self, new: NewFilm) -> Film {
        let film = new.into_film(self.ids.allocate());
        self.films.insert(film.id, film.clone());
        film
    }

    fn update(&mut self, film: Film) -> Option<Film> {
        if !self.films.contains_key(&film.id) {
            return None;
        }
        self.films.insert(film.id, film.clone());
        Some(film)
    }

    fn get(&self, id: FilmId) -> Option<Film> {
        self.films.get(&id).cloned()
    }

    fn all(&self) -> Vec<Film> {
        let mut films: Vec<Film> = self.films.values().cloned().collect();
        films.sort_by_key(|f| f.id);
        films
    }

    fn delete(&mut self, id: FilmId) -> Option<Film> {
        self.films.remove(&id)
    }

    fn delete_all(&mut self) {
        self.films.clear();
    }
}

// =============================================================================
// User store
// =============================================================================

/// User records held in memory.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: HashMap<UserId, User>,
    ids: IdAllocator,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserStore for InMemoryUserStore {
    fn create(&mut self, new: NewUser) -> User {
        let user = new.into_user(self.ids.allocate());
        self.users.insert(user.id, user.clone());
        user
    }

    fn update(&mut self, user: User) -> Option<User> {
        if !self.users.contains_key(&user.id) {
            return None;
        }
        self.users.insert(user.id, user.clone());
        Some(user)
    }

    fn get(&self, id: UserId) -> Option<User> {
        self.users.get(&id).cloned()
    }

    fn all(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    fn delete_all(&mut self) {
        self.users.clear();
    }
}
