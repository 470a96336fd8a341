//! Read-through snapshot of a blog's member list.
//!
//! # Design
//! The cache is either unpopulated (`None`) or holds the complete list from
//! the last successful fetch. Lookups take the shared lock; storing and
//! invalidating take the exclusive lock only for the assignment. Callers
//! always receive their own copy, so nothing outside this module can reach
//! the stored `Vec`.
//!
//! A poisoned lock is recovered rather than propagated: every write replaces
//! the whole value in one assignment, so the guarded state is never torn.

use std::sync::{PoisonError, RwLock};

use crate::types::BlogMember;

#[derive(Debug, Default)]
pub struct MemberCache {
    members: RwLock<Option<Vec<BlogMember>>>,
}

impl MemberCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the cached list, or `None` when unpopulated.
    pub fn get(&self) -> Option<Vec<BlogMember>> {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot with a copy of `members`.
    pub fn store(&self, members: &[BlogMember]) {
        let snapshot = members.to_vec();
        *self.members.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    pub fn invalidate(&self) {
        *self.members.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_populated(&self) -> bool {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
