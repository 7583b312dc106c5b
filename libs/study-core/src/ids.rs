//! Question id generation.
//!
//! Ids are short opaque tokens, unique per process rather than derived from
//! content. Extraction takes the generator as a parameter so tests can supply
//! deterministic ids.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of question identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce the next unique id.
    fn next_id(&self) -> String;
}

/// Random 8-character hex ids taken from a v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        id
    }
}

/// Deterministic `<prefix>-<n>` ids, counting from 1.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("q")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
