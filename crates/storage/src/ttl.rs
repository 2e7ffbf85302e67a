//! TTL (Time-To-Live) index for efficient expiration sweeps
//!
//! This module provides TTLIndex that enables efficient queries for expired
//! objects without scanning every bucket:
//! - Maps deadline → Set<ObjectRef> using BTreeMap for sorted order
//! - take_expired() drains all objects due at or before a given instant
//! - O(expired count) instead of O(total data)

use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

/// Address of one object: bucket + id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Bucket name
    pub bucket: String,
    /// Object id
    pub id: String,
}

impl ObjectRef {
    /// Create a new object reference
    pub fn new(bucket: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            id: id.into(),
        }
    }
}

/// TTL index: deadline → objects
///
/// Uses BTreeMap for sorted ordering, allowing efficient range queries
/// for all objects due before a given instant.
#[derive(Debug, Default)]
pub struct TTLIndex {
    index: BTreeMap<Instant, HashSet<ObjectRef>>,
}

impl TTLIndex {
    /// Create a new empty TTLIndex
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
        }
    }

    /// Register `object` as due at `deadline`
    pub fn insert(&mut self, deadline: Instant, object: ObjectRef) {
        self.index.entry(deadline).or_default().insert(object);
    }

    /// Forget `object` at `deadline`
    ///
    /// Used when an expiry is cancelled by a write or replaced by a new one.
    /// If the set becomes empty, removes the deadline entry entirely.
    pub fn remove(&mut self, deadline: Instant, object: &ObjectRef) {
        if let Some(objects) = self.index.get_mut(&deadline) {
            objects.remove(object);
            if objects.is_empty() {
                self.index.remove(&deadline);
            }
        }
    }

    /// Remove and return every object due at or before `now`
    pub fn take_expired(&mut self, now: Instant) -> Vec<(Instant, ObjectRef)> {
        let due: Vec<Instant> = self.index.range(..=now).map(|(d, _)| *d).collect();

        let mut expired = Vec::new();
        for deadline in due {
            if let Some(objects) = self.index.remove(&deadline) {
                expired.extend(objects.into_iter().map(|o| (deadline, o)));
            }
        }
        expired
    }

    /// Forget every object of `bucket`
    pub fn remove_bucket(&mut self, bucket: &str) {
        self.index.retain(|_, objects| {
            objects.retain(|o| o.bucket != bucket);
            !objects.is_empty()
        });
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get the total number of objects in the index
    pub fn len(&self) -> usize {
        self.index.values().map(|objects| objects.len()).sum()
    }
}
