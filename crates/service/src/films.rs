//! Film operations: catalog CRUD plus the popularity ranking.

use crate::{SharedFilmStore, SharedUserStore};
use ranking::{DomainError, PopularityIndex, Result};
use std::sync::{PoisonError, RwLock};
use store::{Film, FilmId, FilmStore, NewFilm, UserId, UserStore};
use tracing::{info, instrument};

/// Film façade. Owns the popularity index; all like traffic and top-K
/// queries flow through here after an existence check against the stores.
pub struct FilmService {
    films: SharedFilmStore,
    users: SharedUserStore,
    popularity: RwLock<PopularityIndex>,
}

impl FilmService {
    /// Create a film service over shared store handles.
    ///
    /// The user store is needed because likes reference users: a like from
    /// an unknown user must be refused before it reaches the index.
    pub fn new(films: SharedFilmStore, users: SharedUserStore) -> Self {
        Self {
            films,
            users,
            popularity: RwLock::new(PopularityIndex::new()),
        }
    }

    /// Create a film and start tracking it with zero likes.
    #[instrument(skip(self, new), fields(title = %new.title))]
    pub fn create(&self, new: NewFilm) -> Result<Film> {
        let mut films = self.films.write().unwrap_or_else(PoisonError::into_inner);
        let film = films.create(new);
        // The store just allocated this id, so registration cannot collide
        self.popularity
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(film.id)?;
        info!("Created film {} \"{}\"", film.id, film.title);
        Ok(film)
    }

    /// Replace an existing film record. Likes are keyed by id and are
    /// unaffected.
    #[instrument(skip(self, film), fields(film_id = film.id))]
    pub fn update(&self, film: Film) -> Result<Film> {
        let id = film.id;
        self.films
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .update(film)
            .ok_or_else(|| DomainError::film_not_found(id))
    }

    /// Look up a single film
    pub fn get(&self, id: FilmId) -> Result<Film> {
        self.films
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .ok_or_else(|| DomainError::film_not_found(id))
    }

    /// All films in ascending-id order
    pub fn get_all(&self) -> Vec<Film> {
        self.films
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .all()
    }

    /// Record a like from `user_id` on `film_id`.
    ///
    /// Both ids must exist in the primary stores. A repeated like from the
    /// same user is a no-op.
    #[instrument(skip(self))]
    pub fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<()> {
        // Guards stay held across the index write (lock order: stores,
        // then index) so neither entity can vanish mid-operation
        let films = self.films.read().unwrap_or_else(PoisonError::into_inner);
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        if !films.exists(film_id) {
            return Err(DomainError::film_not_found(film_id));
        }
        if !users.exists(user_id) {
            return Err(DomainError::user_not_found(user_id));
        }

        self.popularity
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add_like(film_id, user_id)?;
        info!("User {} liked film {}", user_id, film_id);
        Ok(())
    }

    /// Withdraw a like. A no-op if the user never liked the film.
    #[instrument(skip(self))]
    pub fn remove_like(&self, film_id: FilmId, user_id: UserId) -> Result<()> {
        let films = self.films.read().unwrap_or_else(PoisonError::into_inner);
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        if !films.exists(film_id) {
            return Err(DomainError::film_not_found(film_id));
        }
        if !users.exists(user_id) {
            return Err(DomainError::user_not_found(user_id));
        }

        self.popularity
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_like(film_id, user_id)?;
        info!("User {} unliked film {}", user_id, film_id);
        Ok(())
    }

    /// The `count` most popular films, `(likes desc, id asc)`.
    ///
    /// Ranked ids are resolved back through the store; an id the store no
    /// longer knows is skipped rather than crashing the read.
    pub fn top_popular(&self, count: usize) -> Vec<Film> {
        let films = self.films.read().unwrap_or_else(PoisonError::into_inner);
        self.popularity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .top(count)
            .into_iter()
            .filter_map(|id| films.get(id))
            .collect()
    }

    /// Current like count for a film
    pub fn like_count(&self, film_id: FilmId) -> Result<usize> {
        self.popularity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .like_count(film_id)
            .ok_or_else(|| DomainError::film_not_found(film_id))
    }

    /// Delete one film, cascading into the popularity index so no stale
    /// entry survives.
    #[instrument(skip(self))]
    pub fn delete(&self, id: FilmId) -> Result<Film> {
        let mut films = self.films.write().unwrap_or_else(PoisonError::into_inner);
        let film = films
            .delete(id)
            .ok_or_else(|| DomainError::film_not_found(id))?;
        self.popularity
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .unregister(id)?;
        info!("Deleted film {}", id);
        Ok(film)
    }

    /// Wipe the catalog and the index together.
    #[instrument(skip(self))]
    pub fn delete_all(&self) {
        let mut films = self.films.write().unwrap_or_else(PoisonError::into_inner);
        films.delete_all();
        self.popularity
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        info!("Deleted all films");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use store::{InMemoryFilmStore, InMemoryUserStore, NewUser};

    fn new_film(title: &str) -> NewFilm {
        NewFilm {
            title: title.to_string(),
            description: String::new(),
            release_year: Some(1999),
            duration_min: 90,
        }
    }

    fn service_with_users(user_count: u32) -> FilmService {
        let films: crate::SharedFilmStore = Arc::new(RwLock::new(InMemoryFilmStore::new()));
        let users: crate::SharedUserStore = Arc::new(RwLock::new(InMemoryUserStore::new()));
        {
            let mut store = users.write().unwrap();
            for i in 0..user_count {
                store.create(NewUser {
                    email: format!("user{i}@example.com"),
                    login: format!("user{i}"),
                    name: format!("User {i}"),
                });
            }
        }
        FilmService::new(films, users)
    }

    #[test]
    fn test_create_registers_in_index() {
        let service = service_with_users(0);
        let film = service.create(new_film("Tracked")).unwrap();

        assert_eq!(service.like_count(film.id).unwrap(), 0);
        assert_eq!(service.top_popular(10)[0].id, film.id);
    }

    #[test]
    fn test_like_requires_existing_user() {
        let service = service_with_users(0);
        let film = service.create(new_film("Lonely")).unwrap();

        let err = service.add_like(film.id, 42).unwrap_err();
        assert_eq!(err, DomainError::user_not_found(42));
        assert_eq!(service.like_count(film.id).unwrap(), 0);
    }

    #[test]
    fn test_like_requires_existing_film() {
        let service = service_with_users(1);

        let err = service.add_like(99, 1).unwrap_err();
        assert_eq!(err, DomainError::film_not_found(99));
        assert!(service.top_popular(10).is_empty());
    }

    #[test]
    fn test_top_popular_resolves_records() {
        let service = service_with_users(2);
        let a = service.create(new_film("A")).unwrap();
        let b = service.create(new_film("B")).unwrap();

        service.add_like(b.id, 1).unwrap();
        service.add_like(b.id, 2).unwrap();
        service.add_like(a.id, 1).unwrap();

        let titles: Vec<String> = service
            .top_popular(2)
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_update_missing_film_fails() {
        let service = service_with_users(0);
        let phantom = new_film("Phantom").into_film(5);

        assert_eq!(
            service.update(phantom).unwrap_err(),
            DomainError::film_not_found(5)
        );
    }

    #[test]
    fn test_delete_cascades_into_index() {
        let service = service_with_users(1);
        let a = service.create(new_film("Keep")).unwrap();
        let b = service.create(new_film("Drop")).unwrap();
        service.add_like(b.id, 1).unwrap();

        service.delete(b.id).unwrap();

        let top: Vec<FilmId> = service.top_popular(10).iter().map(|f| f.id).collect();
        assert_eq!(top, vec![a.id]);
        assert_eq!(
            service.like_count(b.id).unwrap_err(),
            DomainError::film_not_found(b.id)
        );
    }

    #[test]
    fn test_delete_all_clears_index_too() {
        let service = service_with_users(1);
        let film = service.create(new_film("Gone")).unwrap();
        service.add_like(film.id, 1).unwrap();

        service.delete_all();

        assert!(service.get_all().is_empty());
        assert!(service.top_popular(10).is_empty());
    }
}
