//! User operations: account CRUD plus the friend-request graph.

use crate::SharedUserStore;
use ranking::{DomainError, FriendshipGraph, Result};
use std::sync::{PoisonError, RwLock};
use store::{NewUser, User, UserId, UserStore};
use tracing::{info, instrument};

/// User façade. Owns the friendship graph; every edge mutation and every
/// friend query is gated on user existence in the primary store.
pub struct UserService {
    users: SharedUserStore,
    friendships: RwLock<FriendshipGraph>,
}

impl UserService {
    pub fn new(users: SharedUserStore) -> Self {
        Self {
            users,
            friendships: RwLock::new(FriendshipGraph::new()),
        }
    }

    /// Create a user.
    ///
    /// A blank display name defaults to the login. The rule applies once,
    /// here; `update` never re-applies it.
    #[instrument(skip(self, new), fields(login = %new.login))]
    pub fn create(&self, mut new: NewUser) -> User {
        if new.name.trim().is_empty() {
            info!("Blank name for \"{}\", using login as name", new.login);
            new.name = new.login.clone();
        }
        let user = self
            .users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .create(new);
        info!("Created user {} ({})", user.id, user.login);
        user
    }

    /// Replace an existing user record as given, blank name included.
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub fn update(&self, user: User) -> Result<User> {
        let id = user.id;
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .update(user)
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// Look up a single user
    pub fn get(&self, id: UserId) -> Result<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// All users in ascending-id order
    pub fn get_all(&self) -> Vec<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .all()
    }

    /// Send a friend request from `id` to `friend_id`.
    #[instrument(skip(self))]
    pub fn add_friend(&self, id: UserId, friend_id: UserId) -> Result<()> {
        // Guard stays held across the graph write (lock order: store,
        // then graph) so neither user can vanish mid-operation
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        if !users.exists(id) {
            return Err(DomainError::user_not_found(id));
        }
        if !users.exists(friend_id) {
            return Err(DomainError::user_not_found(friend_id));
        }

        self.friendships
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add_edge(id, friend_id)?;
        info!("User {} sent a friend request to user {}", id, friend_id);
        Ok(())
    }

    /// Withdraw the friend request from `id` to `friend_id`.
    #[instrument(skip(self))]
    pub fn remove_friend(&self, id: UserId, friend_id: UserId) -> Result<()> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        if !users.exists(id) {
            return Err(DomainError::user_not_found(id));
        }
        if !users.exists(friend_id) {
            return Err(DomainError::user_not_found(friend_id));
        }

        self.friendships
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_edge(id, friend_id)?;
        info!("User {} withdrew the friend request to user {}", id, friend_id);
        Ok(())
    }

    /// Users `id` has sent requests to, as full records, ascending by id.
    ///
    /// "Friends" here means outgoing requests; see `confirmed_friends` for
    /// the mutual view.
    pub fn friends(&self, id: UserId) -> Result<Vec<User>> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        if !users.exists(id) {
            return Err(DomainError::user_not_found(id));
        }
        let friends = self
            .friendships
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .outgoing(id)
            .into_iter()
            .filter_map(|friend_id| users.get(friend_id))
            .collect();
        Ok(friends)
    }

    /// Users whose requests pair up with `id`'s, ascending by id.
    pub fn confirmed_friends(&self, id: UserId) -> Result<Vec<User>> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        if !users.exists(id) {
            return Err(DomainError::user_not_found(id));
        }
        let friends = self
            .friendships
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .confirmed(id)
            .into_iter()
            .filter_map(|friend_id| users.get(friend_id))
            .collect();
        Ok(friends)
    }

    /// Users both `id` and `other_id` have sent requests to, ascending.
    pub fn common_friends(&self, id: UserId, other_id: UserId) -> Result<Vec<User>> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        if !users.exists(id) {
            return Err(DomainError::user_not_found(id));
        }
        if !users.exists(other_id) {
            return Err(DomainError::user_not_found(other_id));
        }
        let friends = self
            .friendships
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .common(id, other_id)
            .into_iter()
            .filter_map(|friend_id| users.get(friend_id))
            .collect();
        Ok(friends)
    }

    /// Wipe users and the friendship graph together.
    #[instrument(skip(self))]
    pub fn delete_all(&self) {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        users.delete_all();
        self.friendships
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        info!("Deleted all users");
    }
}
