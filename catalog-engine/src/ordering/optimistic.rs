//! Two-phase display order
//!
//! A reorder shows its result before the write completes. The tentative
//! sequence stays pending until the caller commits it (write succeeded) or
//! reverts it (write failed); nothing is reverted automatically.

use shared::AppResult;

use super::move_item;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimisticOrder {
    committed: Vec<String>,
    tentative: Option<Vec<String>>,
}

impl OptimisticOrder {
    pub fn new(committed: Vec<String>) -> Self {
        Self {
            committed,
            tentative: None,
        }
    }

    /// Sequence to display: tentative when pending, committed otherwise
    pub fn current(&self) -> &[String] {
        self.tentative.as_deref().unwrap_or(self.committed.as_slice())
    }

    pub fn committed(&self) -> &[String] {
        &self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.tentative.is_some()
    }

    /// Show `seq` ahead of persistence
    pub fn apply(&mut self, seq: Vec<String>) {
        self.tentative = Some(seq);
    }

    /// Apply a drag from `from` to `to` on the current sequence
    pub fn apply_move(&mut self, from: usize, to: usize) -> AppResult<&[String]> {
        let moved = move_item(self.current(), from, to)?;
        self.apply(moved);
        Ok(self.current())
    }

    /// Persistence succeeded
    pub fn commit(&mut self) {
        if let Some(seq) = self.tentative.take() {
            self.committed = seq;
        }
    }

    /// Persistence failed; drop the tentative sequence
    pub fn revert(&mut self) {
        self.tentative = None;
    }

    /// Adopt a sequence read back from the store, settling a matching tentative one
    pub fn sync(&mut self, committed: Vec<String>) {
        if self.tentative.as_ref() == Some(&committed) {
            self.tentative = None;
        }
        self.committed = committed;
    }
}
