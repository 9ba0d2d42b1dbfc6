//! Active-row tracking.
//!
//! Observation hands over batches of [`VisibilityChange`]s. Each batch is
//! folded into the current [`ActiveSet`] by [`apply_visibility_batch`],
//! which is pure; [`VisibilityTracker`] owns the state and pushes the
//! result onto the rows' class lists.

use crate::render::TocEntry;
use pw_toc_traits::{Diagnostics, DomError, DomTree, Viewport};
use pw_toc_types::{ActiveSet, ObservationBand, VisibilityChange};
use std::cell::RefCell;
use std::rc::Rc;

/// Folds one batch into the active set.
///
/// Entries are taken in order. Non-intersecting entries are skipped. Each
/// intersecting entry makes its heading's row the only active one, so the
/// last intersecting entry of the batch wins. A batch without intersecting
/// entries leaves `current` as it is.
pub fn apply_visibility_batch<N: PartialEq>(
    headings: &[N],
    current: &ActiveSet,
    batch: &[VisibilityChange<N>],
) -> ActiveSet {
    batch
        .iter()
        .filter(|change| change.is_intersecting)
        .fold(current.clone(), |_, change| {
            match headings.iter().position(|h| *h == change.target) {
                Some(index) => ActiveSet::only(headings.len(), index),
                None => ActiveSet::empty(headings.len()),
            }
        })
}

/// Keeps the active class on the row of the heading currently in view.
#[derive(Debug)]
pub struct VisibilityTracker<N> {
    headings: Vec<N>,
    items: Vec<N>,
    active_class: String,
    active: RefCell<ActiveSet>,
}

impl<N: Clone + PartialEq + 'static> VisibilityTracker<N> {
    pub fn new(entries: &[TocEntry<N>], active_class: impl Into<String>) -> Self {
        Self {
            headings: entries.iter().map(|e| e.heading.clone()).collect(),
            items: entries.iter().map(|e| e.item.clone()).collect(),
            active_class: active_class.into(),
            active: RefCell::new(ActiveSet::empty(entries.len())),
        }
    }

    pub fn active(&self) -> ActiveSet {
        self.active.borrow().clone()
    }

    pub fn active_class(&self) -> &str {
        &self.active_class
    }

    /// Applies a batch and forces every row's class membership to match.
    ///
    /// Batches without an intersecting entry touch nothing.
    pub fn handle_batch<D>(&self, dom: &D, batch: &[VisibilityChange<N>]) -> Result<(), DomError>
    where
        D: DomTree<Node = N>,
    {
        if !batch.iter().any(|change| change.is_intersecting) {
            return Ok(());
        }

        let next = apply_visibility_batch(&self.headings, &self.active.borrow(), batch);
        for (index, active) in next.iter() {
            dom.set_class(&self.items[index], &self.active_class, active)?;
        }
        *self.active.borrow_mut() = next;
        Ok(())
    }

    /// Observes every heading against `band` for the lifetime of the page.
    pub fn attach<V>(
        self: &Rc<Self>,
        page: &V,
        band: ObservationBand,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Result<(), DomError>
    where
        V: Viewport<Node = N> + Clone + 'static,
    {
        let tracker = Rc::clone(self);
        let handle = page.clone();
        page.observe_visibility(
            &self.headings,
            band,
            Box::new(move |batch| {
                if let Err(e) = tracker.handle_batch(&handle, &batch) {
                    diagnostics.error(&format!("Failed to update active item: {}", e));
                }
            }),
        )
    }
}
