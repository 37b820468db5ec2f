//! Deterministic account picker for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::traits::AccountPicker;

/// Picker that always answers with a fixed index (wrapped into range) and
/// counts how often it was asked.
#[derive(Debug, Clone, Default)]
pub struct FixedPicker {
    index: usize,
    calls: Arc<AtomicUsize>,
}

impl FixedPicker {
    /// Create a picker answering `index`.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times [`AccountPicker::pick`] has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AccountPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.index % len
    }
}
