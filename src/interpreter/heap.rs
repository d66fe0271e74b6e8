//! The heap store.
//!
//! Addresses are handed out by a cursor that only moves forward, and freeing a
//! cell leaves a tombstone behind instead of removing it. Together these mean
//! an address names at most one allocation for the lifetime of a run.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::core::{Loc, Value};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("invalid address {0}: not a live cell")]
    InvalidAddress(Loc),
    #[error("cannot allocate {0} cells")]
    NonPositiveSize(i64),
}

/// Address → cell map. `None` marks a freed cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heap {
    cells: BTreeMap<Loc, Option<Value>>,
    next: u64,
}

impl Heap {
    pub fn new() -> Self {
        Heap::default()
    }

    /// Allocate `size` consecutive cells holding `init` and return the first.
    ///
    /// The new range lies past every address this heap ever issued.
    pub fn allocate(&mut self, size: i64, init: Value) -> Result<Loc, HeapError> {
        if size <= 0 {
            return Err(HeapError::NonPositiveSize(size));
        }
        let base = Loc(self.next);
        let count = size as u64;
        for offset in 0..count {
            let previous = self.cells.insert(Loc(base.0 + offset), Some(init.clone()));
            debug_assert!(previous.is_none(), "address {} issued twice", base.0 + offset);
        }
        self.next += count;
        debug!(%base, size, "allocated");
        Ok(base)
    }

    /// Tombstone a live cell.
    pub fn free(&mut self, loc: Loc) -> Result<(), HeapError> {
        match self.cells.get_mut(&loc) {
            Some(cell @ Some(_)) => {
                *cell = None;
                debug!(%loc, "freed");
                Ok(())
            }
            _ => Err(HeapError::InvalidAddress(loc)),
        }
    }

    pub fn load(&self, loc: Loc) -> Result<&Value, HeapError> {
        match self.cells.get(&loc) {
            Some(Some(value)) => Ok(value),
            _ => Err(HeapError::InvalidAddress(loc)),
        }
    }

    /// Overwrite a live cell in place.
    pub fn store(&mut self, loc: Loc, value: Value) -> Result<(), HeapError> {
        match self.cells.get_mut(&loc) {
            Some(Some(slot)) => {
                debug!(%loc, value = %value, "stored");
                *slot = value;
                Ok(())
            }
            _ => Err(HeapError::InvalidAddress(loc)),
        }
    }

    pub fn is_live(&self, loc: Loc) -> bool {
        matches!(self.cells.get(&loc), Some(Some(_)))
    }

    /// Whether `loc` was ever allocated, live or freed.
    pub fn was_issued(&self, loc: Loc) -> bool {
        self.cells.contains_key(&loc)
    }

    pub fn live_count(&self) -> usize {
        self.cells.values().filter(|cell| cell.is_some()).count()
    }

    pub fn issued_count(&self) -> usize {
        self.cells.len()
    }

    /// The address the next allocation will start at.
    pub fn next_free(&self) -> Loc {
        Loc(self.next)
    }
}
