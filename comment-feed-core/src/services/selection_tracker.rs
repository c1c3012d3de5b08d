//! Wanted-comment search and sticky selection

use crate::store::CommentStore;
use crate::types::{CommentId, SearchState, SelectionOutcome};

/// Tracks the one-shot navigation target and the user's last selection.
///
/// The two pointers are independent: resolving a search sets the selection,
/// but selecting a row or losing the selected row never touches the search.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    search: SearchState,
    last_selected: Option<CommentId>,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start searching for `id`. Returns the target it replaced, if any.
    pub fn set_wanted(&mut self, id: CommentId) -> Option<CommentId> {
        let replaced = self.search.target();
        if let Some(old) = replaced {
            log::debug!("Wanted comment {old} replaced by {id}");
        }
        self.search = SearchState::Searching(id);
        replaced
    }

    /// Re-check the pending target against the store.
    ///
    /// Returns the terminal outcome on the transition out of `Searching`,
    /// and `None` on every later call.
    pub fn on_store_changed(
        &mut self,
        store: &CommentStore,
        exhausted: bool,
    ) -> Option<SelectionOutcome> {
        let SearchState::Searching(target) = self.search else {
            return None;
        };

        if store.contains(target) {
            self.search = SearchState::Resolved(target);
            self.last_selected = Some(target);
            Some(SelectionOutcome::Resolved(target))
        } else if exhausted {
            self.search = SearchState::Abandoned(target);
            Some(SelectionOutcome::Abandoned(target))
        } else {
            None
        }
    }

    pub fn on_user_select(&mut self, id: CommentId) {
        self.last_selected = Some(id);
    }

    /// Drop the selection if its comment left the store. Returns the cleared id.
    ///
    /// No replacement is picked; the caller decides what to select instead.
    pub fn resolve_last_selected(&mut self, store: &CommentStore) -> Option<CommentId> {
        match self.last_selected {
            Some(id) if !store.contains(id) => {
                self.last_selected = None;
                Some(id)
            }
            _ => None,
        }
    }

    /// Abort a pending search without reporting an outcome.
    pub fn cancel_wanted(&mut self) -> Option<CommentId> {
        let target = self.search.target();
        if target.is_some() {
            self.search = SearchState::Idle;
        }
        target
    }

    pub fn wanted(&self) -> Option<CommentId> {
        self.search.target()
    }

    pub fn last_selected(&self) -> Option<CommentId> {
        self.last_selected
    }

    pub fn state(&self) -> SearchState {
        self.search
    }
}
