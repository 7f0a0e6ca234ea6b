//! Live popularity ranking of films by like count.
//!
//! Maintains a total, deterministic order over film ids, queryable as a
//! prefix (top-K), with O(log n) updates per like/unlike.
//!
//! ## Algorithm
//! Two structures side by side:
//! 1. `liked_by`: film id -> set of users who liked it (the primary count
//!    source; duplicate likes are no-ops)
//! 2. `ranked`: a `BTreeSet` of `(Reverse(like_count), film_id)` snapshot
//!    pairs giving the `(count desc, id asc)` order for free
//!
//! The ranked set is keyed by an immutable snapshot of the count, never by
//! a comparator that reads live state. An entry's key must not change
//! while the entry sits inside the set, so every mutation follows the same
//! discipline: remove the entry under its old key, change the like set,
//! reinsert under the new key.
//!
//! ## Tie-break
//! Films with equal like counts order by ascending id. The pair key makes
//! the order strict: two distinct films can never compare equal, so the
//! set can never silently collapse them into one element.

use crate::error::{DomainError, Result};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use store::{FilmId, UserId};
use tracing::debug;

/// Derived ranking of films by descending like count.
#[derive(Debug, Default)]
pub struct PopularityIndex {
    /// Users who liked each film. The set length is the film's like count.
    liked_by: HashMap<FilmId, BTreeSet<UserId>>,
    /// Ranked view: ascending `(Reverse(count), id)` is exactly
    /// `(count desc, id asc)`.
    ranked: BTreeSet<(Reverse<usize>, FilmId)>,
}

impl PopularityIndex {
    /// Creates a new, empty index
    pub fn new() -> Self {
        Self {
            liked_by: HashMap::new(),
            ranked: BTreeSet::new(),
        }
    }

    /// Start tracking a film with zero likes.
    ///
    /// # Returns
    /// * `Err(AlreadyExists)` - if the film is already tracked; duplicate
    ///   registration is a caller error, not a silent no-op
    pub fn register(&mut self, film_id: FilmId) -> Result<()> {
        if self.liked_by.contains_key(&film_id) {
            return Err(DomainError::AlreadyExists {
                entity: "film".to_string(),
                id: film_id,
            });
        }
        self.liked_by.insert(film_id, BTreeSet::new());
        self.ranked.insert((Reverse(0), film_id));
        debug!("Registered film {} in popularity index", film_id);
        Ok(())
    }

    /// Stop tracking a film, dropping its like set and ranked entry.
    ///
    /// Used by the film delete path so the index never holds entries for
    /// films the store no longer knows.
    pub fn unregister(&mut self, film_id: FilmId) -> Result<()> {
        let liked_by = self
            .liked_by
            .remove(&film_id)
            .ok_or_else(|| DomainError::film_not_found(film_id))?;
        self.ranked.remove(&(Reverse(liked_by.len()), film_id));
        debug!("Unregistered film {} from popularity index", film_id);
        Ok(())
    }

    /// Record that `user_id` likes `film_id`.
    ///
    /// A repeated like from the same user is a no-op and leaves the order
    /// untouched. Otherwise the ranked entry is removed under its old
    /// count, the like set grows, and the entry is reinserted under the
    /// new count.
    ///
    /// # Returns
    /// * `Err(NotFound)` - if the film was never registered
    pub fn add_like(&mut self, film_id: FilmId, user_id: UserId) -> Result<()> {
        let liked_by = self
            .liked_by
            .get_mut(&film_id)
            .ok_or_else(|| DomainError::film_not_found(film_id))?;
        if liked_by.contains(&user_id) {
            return Ok(());
        }

        // Remove under the old key before the count changes
        let old_count = liked_by.len();
        self.ranked.remove(&(Reverse(old_count), film_id));
        liked_by.insert(user_id);
        self.ranked.insert((Reverse(old_count + 1), film_id));

        debug!(
            "Film {} liked by user {} ({} likes total)",
            film_id,
            user_id,
            old_count + 1
        );
        Ok(())
    }

    /// Withdraw a like. No-op if the user never liked the film.
    ///
    /// # Returns
    /// * `Err(NotFound)` - if the film was never registered
    pub fn remove_like(&mut self, film_id: FilmId, user_id: UserId) -> Result<()> {
        let liked_by = self
            .liked_by
            .get_mut(&film_id)
            .ok_or_else(|| DomainError::film_not_found(film_id))?;
        if !liked_by.contains(&user_id) {
            return Ok(());
        }

        let old_count = liked_by.len();
        self.ranked.remove(&(Reverse(old_count), film_id));
        liked_by.remove(&user_id);
        self.ranked.insert((Reverse(old_count - 1), film_id));

        debug!(
            "User {} unliked film {} ({} likes left)",
            user_id,
            film_id,
            old_count - 1
        );
        Ok(())
    }

    /// The first `count` film ids in `(likes desc, id asc)` order.
    ///
    /// Returns every tracked film if `count` exceeds the tracked total,
    /// and an empty list for `count == 0`. Pure read, O(count).
    pub fn top(&self, count: usize) -> Vec<FilmId> {
        self.ranked
            .iter()
            .take(count)
            .map(|&(_, film_id)| film_id)
            .collect()
    }

    /// Like count for a tracked film
    pub fn like_count(&self, film_id: FilmId) -> Option<usize> {
        self.liked_by.get(&film_id).map(|users| users.len())
    }

    /// Number of tracked films
    pub fn len(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liked_by.is_empty()
    }

    /// Drop every film and every like. Only an explicit clear empties the
    /// index; no operation does it as a side effect.
    pub fn clear(&mut self) {
        self.liked_by.clear();
        self.ranked.clear();
    }
}
