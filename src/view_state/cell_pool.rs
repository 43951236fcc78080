//! Index-addressed pool of recyclable cells.
//!
//! Cells bound to a visible item index stay bound until they scroll out of
//! view or the pool is reloaded; they then return to a free list keyed by their
//! reuse identifier. A dequeued cell is always reset through
//! [`ReusableCell::prepare_for_reuse`] before it is handed out, so no display
//! state leaks from its previous binding.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// A cell that can be re-bound to arbitrary items.
pub trait ReusableCell {
    /// Stable identifier of the free list this cell returns to.
    fn reuse_identifier(&self) -> &'static str;

    /// Clear all per-item display state.
    fn prepare_for_reuse(&mut self);
}

/// Builds a fresh cell for a reuse identifier.
pub type CellFactory<C> = Box<dyn Fn(&'static str) -> C>;

/// Pool of cells keyed by item index, with per-identifier free lists.
pub struct CellPool<C: ReusableCell> {
    bound: BTreeMap<usize, C>,
    free: HashMap<&'static str, Vec<C>>,
    factory: CellFactory<C>,
    created: usize,
}

impl<C: ReusableCell> CellPool<C> {
    /// Create an empty pool.
    pub fn new(factory: CellFactory<C>) -> Self {
        Self {
            bound: BTreeMap::new(),
            free: HashMap::new(),
            factory,
            created: 0,
        }
    }

    /// Cell bound to `index`, reusing or creating one if needed.
    ///
    /// A cell already bound to `index` is returned as-is; otherwise a free cell
    /// (or a new one) is reset and bound.
    pub fn dequeue(&mut self, identifier: &'static str, index: usize) -> &mut C {
        match self.bound.entry(index) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let mut cell = match self.free.get_mut(identifier).and_then(Vec::pop) {
                    Some(cell) => cell,
                    None => {
                        self.created += 1;
                        (self.factory)(identifier)
                    }
                };
                cell.prepare_for_reuse();
                entry.insert(cell)
            }
        }
    }

    /// Return every bound cell outside `visible` to its free list.
    pub fn recycle_outside(&mut self, visible: Range<usize>) {
        let stale: Vec<usize> = self
            .bound
            .keys()
            .copied()
            .filter(|index| !visible.contains(index))
            .collect();
        for index in stale {
            if let Some(cell) = self.bound.remove(&index) {
                self.release(cell);
            }
        }
    }

    /// Unbind all cells. Used when the item set changes wholesale.
    pub fn reload(&mut self) {
        let bound = std::mem::take(&mut self.bound);
        for (_, cell) in bound {
            self.release(cell);
        }
    }

    /// Cell bound to `index`, if any.
    pub fn get(&self, index: usize) -> Option<&C> {
        self.bound.get(&index)
    }

    /// Bound cells in index order.
    pub fn bound(&self) -> impl Iterator<Item = (usize, &C)> {
        self.bound.iter().map(|(index, cell)| (*index, cell))
    }

    /// Number of bound cells.
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    /// Number of cells waiting in free lists.
    pub fn free_count(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    /// Total cells ever created by the factory.
    pub fn created_count(&self) -> usize {
        self.created
    }

    fn release(&mut self, cell: C) {
        self.free.entry(cell.reuse_identifier()).or_default().push(cell);
    }
}

impl<C: ReusableCell> std::fmt::Debug for CellPool<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellPool")
            .field("bound", &self.bound.len())
            .field("free", &self.free_count())
            .field("created", &self.created)
            .finish()
    }
}
