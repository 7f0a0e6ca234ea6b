//! Integration tests for the service façade.
//!
//! These drive the film and user services together over shared stores,
//! the way a controller layer would.

use ranking::DomainError;
use service::{FilmService, SharedFilmStore, SharedUserStore, UserService};
use std::sync::{Arc, RwLock};
use store::{FilmId, InMemoryFilmStore, InMemoryUserStore, NewFilm, NewUser, UserId};

fn create_test_setup() -> (FilmService, UserService) {
    let films: SharedFilmStore = Arc::new(RwLock::new(InMemoryFilmStore::new()));
    let users: SharedUserStore = Arc::new(RwLock::new(InMemoryUserStore::new()));

    let film_service = FilmService::new(films, users.clone());
    let user_service = UserService::new(users);
    (film_service, user_service)
}

fn seed_users(service: &UserService, count: u32) -> Vec<UserId> {
    (0..count)
        .map(|i| {
            service
                .create(NewUser {
                    email: format!("user{i}@example.com"),
                    login: format!("user{i}"),
                    name: format!("User {i}"),
                })
                .id
        })
        .collect()
}

fn seed_films(service: &FilmService, count: u32) -> Vec<FilmId> {
    (0..count)
        .map(|i| {
            service
                .create(NewFilm {
                    title: format!("Film {i}"),
                    description: format!("Film number {i}"),
                    release_year: Some(1990 + i as u16),
                    duration_min: 100 + i,
                })
                .unwrap()
                .id
        })
        .collect()
}

#[test]
fn test_popularity_ranking_end_to_end() {
    let (films, users) = create_test_setup();
    seed_users(&users, 12);
    let ids = seed_films(&films, 3);
    assert_eq!(ids, vec![1, 2, 3]);

    // Likes: two for film 2, one for film 3, none for film 1
    films.add_like(2, 10).unwrap();
    films.add_like(2, 11).unwrap();
    films.add_like(3, 10).unwrap();

    let top: Vec<FilmId> = films.top_popular(3).iter().map(|f| f.id).collect();
    assert_eq!(top, vec![2, 3, 1]);

    // Double-liking changes nothing
    films.add_like(2, 10).unwrap();
    let top: Vec<FilmId> = films.top_popular(3).iter().map(|f| f.id).collect();
    assert_eq!(top, vec![2, 3, 1]);

    // Unliking film 2 twice drops it into the zero-like tie, which breaks
    // by ascending id
    films.remove_like(2, 10).unwrap();
    films.remove_like(2, 11).unwrap();
    let top: Vec<FilmId> = films.top_popular(3).iter().map(|f| f.id).collect();
    assert_eq!(top, vec![3, 1, 2]);
}

#[test]
fn test_like_on_unknown_film_leaves_ranking_unchanged() {
    let (films, users) = create_test_setup();
    seed_users(&users, 2);
    seed_films(&films, 2);
    films.add_like(1, 1).unwrap();

    let before: Vec<FilmId> = films.top_popular(10).iter().map(|f| f.id).collect();
    let err = films.add_like(99, 1).unwrap_err();

    assert_eq!(err, DomainError::film_not_found(99));
    let after: Vec<FilmId> = films.top_popular(10).iter().map(|f| f.id).collect();
    assert_eq!(before, after);
}

#[test]
fn test_friend_request_confirmation_flow() {
    let (_, users) = create_test_setup();
    seed_users(&users, 2);

    users.add_friend(1, 2).unwrap();
    assert!(users.confirmed_friends(1).unwrap().is_empty());
    let friend_ids: Vec<UserId> = users.friends(1).unwrap().iter().map(|u| u.id).collect();
    assert_eq!(friend_ids, vec![2]);

    users.add_friend(2, 1).unwrap();
    let confirmed_of_1: Vec<UserId> = users
        .confirmed_friends(1)
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    let confirmed_of_2: Vec<UserId> = users
        .confirmed_friends(2)
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(confirmed_of_1, vec![2]);
    assert_eq!(confirmed_of_2, vec![1]);
}

#[test]
fn test_common_friends_flow() {
    let (_, users) = create_test_setup();
    seed_users(&users, 3);

    users.add_friend(1, 2).unwrap();
    users.add_friend(1, 3).unwrap();
    users.add_friend(2, 3).unwrap();

    let common: Vec<UserId> = users
        .common_friends(1, 2)
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(common, vec![3]);

    let reversed: Vec<UserId> = users
        .common_friends(2, 1)
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(common, reversed);
}

#[test]
fn test_withdrawing_unsent_request_fails() {
    let (_, users) = create_test_setup();
    seed_users(&users, 2);

    let err = users.remove_friend(1, 2).unwrap_err();
    assert_eq!(err, DomainError::FriendEdgeNotFound { from: 1, to: 2 });
}

#[test]
fn test_self_friending_is_invalid() {
    let (_, users) = create_test_setup();
    seed_users(&users, 1);

    let err = users.add_friend(1, 1).unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));
}

#[test]
fn test_user_checks_run_before_graph_guards() {
    let (_, users) = create_test_setup();
    seed_users(&users, 1);

    // Unknown friend id wins over the missing-edge guard
    let err = users.remove_friend(1, 42).unwrap_err();
    assert_eq!(err, DomainError::user_not_found(42));
}

#[test]
fn test_shared_store_links_likes_to_users() {
    let (films, users) = create_test_setup();
    seed_films(&films, 1);

    // No users yet: the film service sees the same empty user store
    assert_eq!(
        films.add_like(1, 1).unwrap_err(),
        DomainError::user_not_found(1)
    );

    seed_users(&users, 1);
    films.add_like(1, 1).unwrap();
    assert_eq!(films.like_count(1).unwrap(), 1);
}

#[test]
fn test_error_messages_are_human_readable() {
    let (films, users) = create_test_setup();
    seed_users(&users, 1);
    seed_films(&films, 1);

    let err = films.add_like(7, 1).unwrap_err();
    assert_eq!(err.to_string(), "film with id 7 was not found");

    let err = users.add_friend(1, 1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid argument: user 1 cannot befriend themselves"
    );
}
