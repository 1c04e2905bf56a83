//! Canonical cell registry
//!
//! Hands out one shared `Arc<Cell>` per coordinate pair so that repeated
//! lookups of the same cell return the same allocation. Retention can be
//! bounded to the last N visibility windows.

use super::{Cell, CellRef};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
struct Entry {
    cell: CellRef,
    last_window: u64,
}

/// Registry of canonical cells
#[derive(Debug, Default)]
pub struct CellRegistry {
    entries: HashMap<Cell, Entry>,
    /// Number of windows opened so far
    window: u64,
    /// Keep cells touched within this many windows (0 = forever)
    retention: u64,
}

impl CellRegistry {
    /// Create an unbounded registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that forgets cells not seen in `retention` windows
    pub fn with_retention(retention: u64) -> Self {
        Self {
            retention,
            ..Self::default()
        }
    }

    /// Get the canonical handle for `cell`, registering it on first use
    pub fn canonical(&mut self, cell: Cell) -> CellRef {
        let window = self.window;
        let entry = self.entries.entry(cell).or_insert_with(|| Entry {
            cell: Arc::new(cell),
            last_window: window,
        });
        entry.last_window = window;
        Arc::clone(&entry.cell)
    }

    /// Start a new visibility window
    pub fn open_window(&mut self) {
        self.window += 1;
    }

    /// Drop cells not touched within the retention bound
    pub fn prune(&mut self) -> usize {
        if self.retention == 0 {
            return 0;
        }

        let before = self.entries.len();
        let cutoff = self.window.saturating_sub(self.retention);
        self.entries.retain(|_, entry| entry.last_window > cutoff);

        let pruned = before - self.entries.len();
        if pruned > 0 {
            debug!("Pruned {} canonical cells", pruned);
        }
        pruned
    }

    /// Number of registered cells
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no cell has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `cell` currently has a canonical handle
    pub fn contains(&self, cell: &Cell) -> bool {
        self.entries.contains_key(cell)
    }
}
