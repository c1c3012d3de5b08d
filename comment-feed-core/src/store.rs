//! Ordered, deduplicated comment collection.

use std::collections::{BTreeMap, HashMap};

use crate::error::{FeedError, FeedResult};
use crate::types::{Comment, CommentId, CommentStatus, MergeDelta};

/// Comments of one feed, newest first, with an id -> position index.
///
/// Entries sharing a timestamp keep their arrival order.
#[derive(Debug, Default)]
pub struct CommentStore {
    entries: Vec<Comment>,
    index: HashMap<CommentId, usize>,
}

impl CommentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch in order: new ids are inserted at their timestamp
    /// position, known ids are replaced in place.
    ///
    /// An id only counts as updated if one of its attributes changed, so
    /// merging the same batch twice yields an empty delta the second time.
    pub fn merge<I>(&mut self, batch: I) -> MergeDelta
    where
        I: IntoIterator<Item = Comment>,
    {
        let mut delta = MergeDelta::default();
        for comment in batch {
            let id = comment.id;
            match self.index.get(&id).copied() {
                None => {
                    self.insert_ordered(comment);
                    delta.inserted.insert(id);
                }
                Some(pos) if self.entries[pos] == comment => {}
                Some(pos) => {
                    if self.entries[pos].created_at == comment.created_at {
                        self.entries[pos] = comment;
                    } else {
                        self.entries.remove(pos);
                        self.index.remove(&id);
                        self.reindex_from(pos);
                        self.insert_ordered(comment);
                    }
                    // Freshly inserted ids stay reported as inserted.
                    if !delta.inserted.contains(&id) {
                        delta.updated.insert(id);
                    }
                }
            }
        }
        delta
    }

    /// Set a comment's status and return the one it replaced.
    pub fn apply_status(&mut self, id: CommentId, status: CommentStatus) -> FeedResult<CommentStatus> {
        let pos = self.position(id).ok_or(FeedError::NotFound(id))?;
        let previous = self.entries[pos].status;
        self.entries[pos].status = status;
        Ok(previous)
    }

    /// Take a comment out of the feed, returning where it was.
    pub fn remove(&mut self, id: CommentId) -> FeedResult<(usize, Comment)> {
        let pos = self.index.remove(&id).ok_or(FeedError::NotFound(id))?;
        let comment = self.entries.remove(pos);
        self.reindex_from(pos);
        Ok((pos, comment))
    }

    /// Put a removed comment back.
    ///
    /// `hint` is used when it still fits the ordering; otherwise the comment
    /// goes to its timestamp position. An id that reappeared in the meantime is
    /// merged instead. Returns the final position.
    pub fn restore(&mut self, comment: Comment, hint: Option<usize>) -> usize {
        let id = comment.id;
        if self.index.contains_key(&id) {
            self.merge([comment]);
        } else {
            match hint.filter(|&pos| self.fits_at(pos, &comment)) {
                Some(pos) => {
                    self.entries.insert(pos, comment);
                    self.reindex_from(pos);
                }
                None => self.insert_ordered(comment),
            }
        }
        self.index[&id]
    }

    pub fn find(&self, id: CommentId) -> Option<&Comment> {
        self.position(id).map(|pos| &self.entries[pos])
    }

    pub fn contains(&self, id: CommentId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn position(&self, id: CommentId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Current contents in display order. Clone the iterator to walk it again.
    pub fn snapshot(&self) -> std::slice::Iter<'_, Comment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of loaded comments per status.
    pub fn status_counts(&self) -> BTreeMap<CommentStatus, usize> {
        let mut counts = BTreeMap::new();
        for comment in &self.entries {
            *counts.entry(comment.status).or_insert(0) += 1;
        }
        counts
    }

    /// Loaded direct replies to `parent`, in display order.
    pub fn replies_to(&self, parent: CommentId) -> impl Iterator<Item = &Comment> + '_ {
        self.entries
            .iter()
            .filter(move |c| c.parent_id == Some(parent))
    }

    fn insert_ordered(&mut self, comment: Comment) {
        let pos = self
            .entries
            .partition_point(|c| c.created_at >= comment.created_at);
        self.entries.insert(pos, comment);
        self.reindex_from(pos);
    }

    fn fits_at(&self, pos: usize, comment: &Comment) -> bool {
        if pos > self.entries.len() {
            return false;
        }
        let after_newer = pos == 0 || self.entries[pos - 1].created_at >= comment.created_at;
        let before_older =
            pos == self.entries.len() || self.entries[pos].created_at <= comment.created_at;
        after_newer && before_older
    }

    fn reindex_from(&mut self, start: usize) {
        for (pos, comment) in self.entries.iter().enumerate().skip(start) {
            self.index.insert(comment.id, pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{comment, comment_at};

    fn ids(store: &CommentStore) -> Vec<u64> {
        store.snapshot().map(|c| c.id.0).collect()
    }

    #[test]
    fn merge_orders_newest_first() {
        let mut store = CommentStore::new();
        store.merge([comment_at(1, 100), comment_at(2, 300)]);
        store.merge([comment_at(3, 200), comment_at(4, 50)]);

        assert_eq!(ids(&store), vec![2, 3, 1, 4]);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut store = CommentStore::new();
        let page = vec![comment(10), comment(11), comment(12)];

        let first = store.merge(page.clone());
        assert_eq!(first.inserted.len(), 3);
        let before: Vec<Comment> = store.snapshot().cloned().collect();

        let second = store.merge(page);
        assert!(second.is_empty());
        let after: Vec<Comment> = store.snapshot().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn merge_never_duplicates() {
        let mut store = CommentStore::new();
        store.merge([comment(1), comment(2)]);
        store.merge([comment(2), comment(3), comment(1)]);
        store.merge([comment(3)]);

        let mut seen = ids(&store);
        assert_eq!(seen.len(), 3);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn replace_in_place_keeps_position() {
        let mut store = CommentStore::new();
        store.merge([comment_at(1, 300), comment_at(2, 200), comment_at(3, 100)]);

        let mut edited = comment_at(2, 200);
        edited.content = "edited".to_string();
        let delta = store.merge([edited]);

        assert_eq!(delta.updated.len(), 1);
        assert!(delta.inserted.is_empty());
        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(store.find(CommentId(2)).unwrap().content, "edited");
    }

    #[test]
    fn timestamp_change_moves_entry() {
        let mut store = CommentStore::new();
        store.merge([comment_at(1, 300), comment_at(2, 200), comment_at(3, 100)]);

        store.merge([comment_at(3, 400)]);

        assert_eq!(ids(&store), vec![3, 1, 2]);
        assert_eq!(store.position(CommentId(2)), Some(2));
    }

    #[test]
    fn equal_timestamps_keep_arrival_order() {
        let mut store = CommentStore::new();
        store.merge([comment_at(5, 100), comment_at(6, 100)]);
        store.merge([comment_at(7, 100)]);

        assert_eq!(ids(&store), vec![5, 6, 7]);
    }

    #[test]
    fn apply_status_returns_previous() {
        let mut store = CommentStore::new();
        store.merge([comment(1)]);

        let previous = store.apply_status(CommentId(1), CommentStatus::Spam).unwrap();
        assert_eq!(previous, CommentStatus::Approved);
        assert_eq!(store.find(CommentId(1)).unwrap().status, CommentStatus::Spam);

        assert_eq!(
            store.apply_status(CommentId(99), CommentStatus::Spam),
            Err(FeedError::NotFound(CommentId(99)))
        );
    }

    #[test]
    fn remove_updates_index() {
        let mut store = CommentStore::new();
        store.merge([comment_at(1, 300), comment_at(2, 200), comment_at(3, 100)]);

        let (pos, removed) = store.remove(CommentId(2)).unwrap();
        assert_eq!(pos, 1);
        assert_eq!(removed.id, CommentId(2));
        assert!(!store.contains(CommentId(2)));
        assert_eq!(store.position(CommentId(3)), Some(1));
        assert!(store.find(CommentId(2)).is_none());

        assert!(matches!(
            store.remove(CommentId(2)),
            Err(FeedError::NotFound(_))
        ));
    }

    #[test]
    fn restore_uses_hint_when_consistent() {
        let mut store = CommentStore::new();
        store.merge([comment_at(1, 100), comment_at(2, 100), comment_at(3, 100)]);

        let (pos, removed) = store.remove(CommentId(2)).unwrap();
        let restored = store.restore(removed, Some(pos));

        assert_eq!(restored, 1);
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn restore_falls_back_to_timestamp_order() {
        let mut store = CommentStore::new();
        store.merge([comment_at(1, 300), comment_at(2, 200), comment_at(3, 100)]);

        let (_, removed) = store.remove(CommentId(1)).unwrap();
        // A stale hint pointing at the tail would break ordering.
        let restored = store.restore(removed, Some(2));

        assert_eq!(restored, 0);
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn snapshot_is_restartable() {
        let mut store = CommentStore::new();
        store.merge([comment_at(1, 200), comment_at(2, 100)]);

        let snapshot = store.snapshot();
        let first: Vec<_> = snapshot.clone().map(|c| c.id).collect();
        let second: Vec<_> = snapshot.map(|c| c.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn counts_and_replies() {
        let mut store = CommentStore::new();
        let mut reply = comment_at(2, 100);
        reply.parent_id = Some(CommentId(1));
        reply.status = CommentStatus::Pending;
        store.merge([comment_at(1, 200), reply]);

        let counts = store.status_counts();
        assert_eq!(counts.get(&CommentStatus::Approved), Some(&1));
        assert_eq!(counts.get(&CommentStatus::Pending), Some(&1));

        let replies: Vec<_> = store.replies_to(CommentId(1)).map(|c| c.id).collect();
        assert_eq!(replies, vec![CommentId(2)]);
    }
}
