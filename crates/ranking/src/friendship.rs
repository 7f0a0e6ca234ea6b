//! Directed friend-request graph with derived symmetric views.
//!
//! Edges are one-directional requests: `(a, b)` means `a` asked to friend
//! `b`, and says nothing about `(b, a)`. The symmetric "confirmed
//! friendship" relation is never stored; it is derived at query time by
//! checking both directions, which keeps one structure authoritative and
//! rules out dual-write drift between a forward and a mirrored copy.
//!
//! Per unordered pair the relation walks NoRelation -> OneSided -> Mutual
//! and back one edge at a time; there is no shortcut from NoRelation to
//! Mutual.
//!
//! Per-user edge sets are `BTreeSet`, so every query comes back in
//! ascending-id order. Iteration order out of a hash set would vary run to
//! run, and API responses and test assertions need it reproducible.

use crate::error::{DomainError, Result};
use std::collections::{BTreeSet, HashMap};
use store::UserId;
use tracing::debug;

/// Directed friend-request edges over user ids.
#[derive(Debug, Default)]
pub struct FriendshipGraph {
    /// Requests each user has sent, keyed by requester.
    outgoing: HashMap<UserId, BTreeSet<UserId>>,
}

impl FriendshipGraph {
    /// Creates a new graph with no edges
    pub fn new() -> Self {
        Self {
            outgoing: HashMap::new(),
        }
    }

    /// Insert the edge `from -> to`.
    ///
    /// # Returns
    /// * `Err(InvalidArgument)` - on a self-edge
    /// * `Err(FriendEdgeAlreadyExists)` - if this request is already
    ///   pending; requests are one-shot actions, so re-adding is a caller
    ///   error rather than a silent success
    pub fn add_edge(&mut self, from: UserId, to: UserId) -> Result<()> {
        if from == to {
            return Err(DomainError::InvalidArgument(format!(
                "user {from} cannot befriend themselves"
            )));
        }
        let edges = self.outgoing.entry(from).or_default();
        if !edges.insert(to) {
            return Err(DomainError::FriendEdgeAlreadyExists { from, to });
        }
        debug!("Friend request {} -> {}", from, to);
        Ok(())
    }

    /// Remove the edge `from -> to`.
    ///
    /// # Returns
    /// * `Err(FriendEdgeNotFound)` - if no such request exists; a request
    ///   must have been made before it can be withdrawn
    pub fn remove_edge(&mut self, from: UserId, to: UserId) -> Result<()> {
        let removed = self
            .outgoing
            .get_mut(&from)
            .map(|edges| edges.remove(&to))
            .unwrap_or(false);
        if !removed {
            return Err(DomainError::FriendEdgeNotFound { from, to });
        }
        debug!("Withdrawn friend request {} -> {}", from, to);
        Ok(())
    }

    /// Whether the edge `from -> to` exists
    pub fn has_edge(&self, from: UserId, to: UserId) -> bool {
        self.outgoing
            .get(&from)
            .is_some_and(|edges| edges.contains(&to))
    }

    /// Users `id` has sent requests to, ascending by id.
    pub fn outgoing(&self, id: UserId) -> Vec<UserId> {
        self.outgoing
            .get(&id)
            .map(|edges| edges.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Users confirmed as friends of `id`: both directions present.
    /// Ascending by id.
    pub fn confirmed(&self, id: UserId) -> Vec<UserId> {
        self.outgoing
            .get(&id)
            .map(|edges| {
                edges
                    .iter()
                    .copied()
                    .filter(|&other| self.has_edge(other, id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Users both `a` and `b` have sent requests to, ascending by id.
    pub fn common(&self, a: UserId, b: UserId) -> Vec<UserId> {
        match (self.outgoing.get(&a), self.outgoing.get(&b)) {
            (Some(left), Some(right)) => left.intersection(right).copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(|edges| edges.len()).sum()
    }

    /// Drop every edge. Only an explicit clear empties the graph.
    pub fn clear(&mut self) {
        self.outgoing.clear();
    }
}
