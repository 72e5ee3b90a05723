//! Time-based goods identifiers.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::domain::GoodsEntry;

/// IdGenerator issues millisecond timestamps as decimal strings.
///
/// Every id is strictly greater than the previous one issued by this generator
/// and never equal to an id already present in the collection.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id not present in `existing`.
    pub fn next(&self, existing: &[GoodsEntry]) -> String {
        let now = Utc::now().timestamp_millis();
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(now.max(prev + 1)))
            .unwrap_or(now);
        let mut candidate = now.max(prev + 1);

        while existing
            .iter()
            .any(|entry| entry.id().is_some_and(|id| id == candidate.to_string()))
        {
            candidate += 1;
        }
        self.last.fetch_max(candidate, Ordering::SeqCst);

        candidate.to_string()
    }
}
