use super::backend::StorageBackend;
use super::Preferences;
use crate::codec::autosave;
use crate::config::TimestampPolicy;
use crate::error::{MemoError, Result};
use crate::expiry::now_millis;
use crate::model::{Memo, MemoId, MemoRecord};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub struct MemoStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    /// Newest first.
    memos: Vec<Memo>,
    default_memo: Option<MemoId>,
    last_id: i64,
}

impl<B: StorageBackend> MemoStore<B> {
    /// An empty store. Call [`MemoStore::load`] to read what the backend holds.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            memos: Vec::new(),
            default_memo: None,
            last_id: 0,
        }
    }

    /// A store loaded from `backend`.
    pub fn open(backend: B) -> Result<Self> {
        let mut store = Self::with_backend(backend);
        store.load()?;
        Ok(store)
    }

    /// Replaces the in-memory state with the backend's auto-save file and preferences.
    ///
    /// On a read failure the store is left empty and the error is returned. A default-memo
    /// pointer that no longer names an active memo is cleared.
    pub fn load(&mut self) -> Result<usize> {
        self.memos.clear();
        self.default_memo = None;

        let text = self.backend.load_memos()?;
        let records = text.as_deref().map(autosave::decode).unwrap_or_default();
        self.memos = self.assign_ids(records);

        let prefs = match self.backend.load_preferences() {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Could not read preferences, starting without a default memo: {}", e);
                Preferences::default()
            }
        };
        self.default_memo = prefs.default_memo();
        self.drop_stale_default();

        debug!(count = self.memos.len(), "Loaded memos");
        Ok(self.memos.len())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // --- Views ---

    pub fn all_memos(&self) -> &[Memo] {
        &self.memos
    }

    pub fn active_memos(&self) -> Vec<Memo> {
        self.memos.iter().filter(|m| !m.is_deleted).cloned().collect()
    }

    pub fn deleted_memos(&self) -> Vec<Memo> {
        self.memos.iter().filter(|m| m.is_deleted).cloned().collect()
    }

    pub fn get(&self, id: MemoId) -> Option<&Memo> {
        self.memos.iter().find(|m| m.id == id)
    }

    pub fn default_memo_id(&self) -> Option<MemoId> {
        self.default_memo
    }

    /// The memo to present at launch, if one is set.
    pub fn default_memo(&self) -> Option<&Memo> {
        self.default_memo
            .and_then(|id| self.get(id))
            .filter(|m| !m.is_deleted)
    }

    // --- Lifecycle ---

    /// Prepends a new memo. The first active memo becomes the default memo.
    pub fn add(&mut self, content: impl Into<String>) -> Result<Memo> {
        let memo = Memo::new(self.next_id(), content, None);

        let mut next = Vec::with_capacity(self.memos.len() + 1);
        next.push(memo.clone());
        next.extend(self.memos.iter().cloned());
        self.commit(next)?;

        if self.active_count() == 1 {
            if let Err(e) = self.commit_default(Some(memo.id)) {
                warn!(id = %memo.id, "Could not save default memo: {}", e);
            }
        }

        Ok(memo)
    }

    pub fn update(
        &mut self,
        id: MemoId,
        content: impl Into<String>,
        policy: TimestampPolicy,
    ) -> Result<Memo> {
        let pos = self.position(id)?;
        let updated = self.memos[pos].with_content(content, policy == TimestampPolicy::Refresh);

        let mut next = self.memos.clone();
        next[pos] = updated.clone();
        self.commit(next)?;
        Ok(updated)
    }

    pub fn soft_delete(&mut self, id: MemoId) -> Result<Memo> {
        let mut deleted = self.soft_delete_batch(&[id])?;
        deleted.pop().ok_or(MemoError::NotFound(id))
    }

    /// Soft-deletes every id, or none of them.
    ///
    /// The batch is rejected before any change when it contains the default memo or an
    /// unknown id. Memos already in the trash are returned untouched.
    pub fn soft_delete_batch(&mut self, ids: &[MemoId]) -> Result<Vec<Memo>> {
        self.guard_default(ids)?;
        let positions = ids
            .iter()
            .map(|id| self.position(*id))
            .collect::<Result<Vec<_>>>()?;

        let now = now_millis();
        let mut next = self.memos.clone();
        let mut affected = Vec::with_capacity(positions.len());
        let mut changed = false;

        for pos in positions {
            if !next[pos].is_deleted {
                next[pos] = next[pos].soft_deleted(now);
                changed = true;
            }
            affected.push(next[pos].clone());
        }

        if changed {
            self.commit(next)?;
        }
        Ok(affected)
    }

    pub fn restore(&mut self, id: MemoId) -> Result<Memo> {
        let pos = self.position(id)?;
        if !self.memos[pos].is_deleted {
            return Ok(self.memos[pos].clone());
        }

        let restored = self.memos[pos].restored();
        let mut next = self.memos.clone();
        next[pos] = restored.clone();
        self.commit(next)?;
        Ok(restored)
    }

    /// Removes a memo for good.
    pub fn purge(&mut self, id: MemoId) -> Result<Memo> {
        let mut removed = self.purge_batch(&[id])?;
        removed.pop().ok_or(MemoError::NotFound(id))
    }

    /// Removes every id for good, or none of them.
    ///
    /// Checked like [`MemoStore::soft_delete_batch`]: the default memo or an unknown id
    /// rejects the batch before anything is removed. Duplicate ids are removed once.
    pub fn purge_batch(&mut self, ids: &[MemoId]) -> Result<Vec<Memo>> {
        self.guard_default(ids)?;
        let mut positions = Vec::with_capacity(ids.len());
        for id in ids {
            let pos = self.position(*id)?;
            if !positions.contains(&pos) {
                positions.push(pos);
            }
        }

        let removed: Vec<Memo> = positions.iter().map(|&pos| self.memos[pos].clone()).collect();
        let next = self
            .memos
            .iter()
            .enumerate()
            .filter(|(pos, _)| !positions.contains(pos))
            .map(|(_, memo)| memo.clone())
            .collect();
        self.commit(next)?;
        Ok(removed)
    }

    /// Purges every deleted memo past the retention window. Writes only when something was
    /// removed.
    pub fn sweep_expired(&mut self, now_ms: i64) -> Result<Vec<Memo>> {
        let (expired, kept): (Vec<Memo>, Vec<Memo>) = self
            .memos
            .iter()
            .cloned()
            .partition(|m| m.is_deleted && m.is_expired(now_ms));

        if expired.is_empty() {
            return Ok(expired);
        }

        self.commit(kept)?;
        info!(count = expired.len(), "Purged expired memos");
        Ok(expired)
    }

    /// Replaces the active memos with `records`, in order. The trash is kept.
    pub fn replace_active(&mut self, records: Vec<MemoRecord>) -> Result<Vec<Memo>> {
        let mut imported = Vec::with_capacity(records.len());
        for record in records {
            let id = self.next_id();
            let record = MemoRecord {
                is_deleted: false,
                deleted_at: None,
                ..record
            };
            imported.push(record.into_memo(id));
        }

        let mut next = imported.clone();
        next.extend(self.memos.iter().filter(|m| m.is_deleted).cloned());
        self.commit(next)?;

        self.drop_stale_default();
        info!(count = imported.len(), "Replaced active memos");
        Ok(imported)
    }

    // --- Default Memo ---

    pub fn set_default(&mut self, id: MemoId) -> Result<Memo> {
        let memo = self
            .get(id)
            .filter(|m| !m.is_deleted)
            .cloned()
            .ok_or(MemoError::NotFound(id))?;
        self.commit_default(Some(id))?;
        Ok(memo)
    }

    pub fn clear_default(&mut self) -> Result<()> {
        self.commit_default(None)
    }

    /// Rewrites the auto-save file from the current state.
    pub fn flush(&self) -> Result<()> {
        self.backend.save_memos(&autosave::encode(&self.memos))?;
        debug!(count = self.memos.len(), "Flushed memos");
        Ok(())
    }

    // --- Internals ---

    fn position(&self, id: MemoId) -> Result<usize> {
        self.memos
            .iter()
            .position(|m| m.id == id)
            .ok_or(MemoError::NotFound(id))
    }

    fn active_count(&self) -> usize {
        self.memos.iter().filter(|m| !m.is_deleted).count()
    }

    fn guard_default(&self, ids: &[MemoId]) -> Result<()> {
        match self.default_memo {
            Some(default) if ids.contains(&default) => {
                Err(MemoError::ProtectedDefaultMemo(default))
            }
            _ => Ok(()),
        }
    }

    /// Time-derived and strictly increasing within this store.
    fn next_id(&mut self) -> MemoId {
        let id = now_millis().max(self.last_id.saturating_add(1));
        self.last_id = id;
        MemoId::new(id)
    }

    /// Keeps stored ids where they are unique, issues fresh ones otherwise.
    ///
    /// `i64::MAX` is never kept, so a later id can always be issued above every stored one.
    fn assign_ids(&mut self, records: Vec<MemoRecord>) -> Vec<Memo> {
        let mut seen = HashSet::new();
        let mut keep = Vec::with_capacity(records.len());
        for record in &records {
            let kept = record
                .id
                .filter(|id| id.as_i64() < i64::MAX && seen.insert(*id));
            if let Some(id) = kept {
                self.last_id = self.last_id.max(id.as_i64());
            }
            keep.push(kept);
        }

        records
            .into_iter()
            .zip(keep)
            .map(|(record, kept)| {
                let id = match kept {
                    Some(id) => id,
                    None => self.next_id(),
                };
                record.into_memo(id)
            })
            .collect()
    }

    fn commit(&mut self, next: Vec<Memo>) -> Result<()> {
        self.backend.save_memos(&autosave::encode(&next))?;
        debug!(count = next.len(), "Auto-saved memos");
        self.memos = next;
        Ok(())
    }

    fn commit_default(&mut self, id: Option<MemoId>) -> Result<()> {
        self.backend
            .save_preferences(&Preferences::with_default_memo(id))?;
        self.default_memo = id;
        Ok(())
    }

    fn drop_stale_default(&mut self) {
        let Some(id) = self.default_memo else {
            return;
        };
        if self.default_memo().is_some() {
            return;
        }
        warn!(%id, "Default memo is missing or deleted, clearing it");
        self.default_memo = None;
        if let Err(e) = self
            .backend
            .save_preferences(&Preferences::with_default_memo(None))
        {
            warn!("Could not save cleared default memo: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::RETENTION_MILLIS;
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    const DAY: i64 = crate::expiry::MILLIS_PER_DAY;

    fn make_store() -> InMemoryStore {
        InMemoryStore::new()
    }

    // --- Add ---

    #[test]
    fn add_prepends_and_persists() {
        let mut store = make_store();
        store.add("first").unwrap();
        store.add("second").unwrap();

        let contents: Vec<_> = store.active_memos().into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["second", "first"]);
        assert_eq!(store.backend.memo_writes(), 2);
        assert!(store.backend.autosave_text().unwrap().contains("second"));
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut store = make_store();
        let ids: HashSet<MemoId> = (0..50).map(|i| store.add(format!("m{}", i)).unwrap().id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn first_active_memo_becomes_default() {
        let mut store = make_store();
        let first = store.add("first").unwrap();
        store.add("second").unwrap();

        assert_eq!(store.default_memo_id(), Some(first.id));
        assert_eq!(store.backend.preferences().default_memo(), Some(first.id));
    }

    #[test]
    fn empty_content_is_allowed_by_store() {
        let mut store = make_store();
        let memo = store.add("").unwrap();
        assert_eq!(memo.content, "");
    }

    #[test]
    fn add_fails_cleanly_on_write_error() {
        let mut store = make_store();
        store.backend.set_simulate_write_error(true);

        assert!(store.add("lost").is_err());
        assert!(store.all_memos().is_empty());
        assert_eq!(store.default_memo_id(), None);
    }

    // --- Update ---

    #[test]
    fn update_preserves_id_and_timestamp() {
        let mut store = make_store();
        let memo = store.add("old").unwrap();

        let updated = store
            .update(memo.id, "new", TimestampPolicy::Preserve)
            .unwrap();
        assert_eq!(updated.id, memo.id);
        assert_eq!(updated.timestamp, memo.timestamp);
        assert_eq!(store.get(memo.id).unwrap().content, "new");
    }

    #[test]
    fn update_missing_is_not_found() {
        let mut store = make_store();
        let err = store
            .update(MemoId::new(99), "x", TimestampPolicy::Preserve)
            .unwrap_err();
        assert!(matches!(err, MemoError::NotFound(id) if id == MemoId::new(99)));
    }

    #[test]
    fn update_keeps_state_on_write_error() {
        let mut store = make_store();
        let memo = store.add("old").unwrap();
        store.backend.set_simulate_write_error(true);

        assert!(store.update(memo.id, "new", TimestampPolicy::Preserve).is_err());
        assert_eq!(store.get(memo.id).unwrap().content, "old");
    }

    // --- Soft delete ---

    #[test]
    fn soft_delete_moves_memo_to_trash() {
        let mut store = make_store();
        store.add("default").unwrap();
        let memo = store.add("doomed").unwrap();

        let deleted = store.soft_delete(memo.id).unwrap();
        assert!(deleted.is_deleted);
        assert!(deleted.deleted_at.is_some());
        assert_eq!(store.active_memos().len(), 1);
        assert_eq!(store.deleted_memos()[0].id, memo.id);
    }

    #[test]
    fn soft_delete_default_is_rejected() {
        let mut store = make_store();
        let default = store.add("default").unwrap();
        let writes = store.backend.memo_writes();

        let err = store.soft_delete(default.id).unwrap_err();
        assert!(matches!(err, MemoError::ProtectedDefaultMemo(id) if id == default.id));
        assert!(!store.get(default.id).unwrap().is_deleted);
        assert_eq!(store.backend.memo_writes(), writes);
    }

    #[test]
    fn soft_delete_twice_keeps_first_deletion_time() {
        let mut store = make_store();
        store.add("default").unwrap();
        let memo = store.add("x").unwrap();

        let first = store.soft_delete(memo.id).unwrap();
        let writes = store.backend.memo_writes();
        let second = store.soft_delete(memo.id).unwrap();

        assert_eq!(first.deleted_at, second.deleted_at);
        assert_eq!(store.backend.memo_writes(), writes);
    }

    #[test]
    fn batch_with_default_rejects_everything() {
        let mut store = make_store();
        let default = store.add("default").unwrap();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();

        let err = store
            .soft_delete_batch(&[a.id, default.id, b.id])
            .unwrap_err();
        assert!(matches!(err, MemoError::ProtectedDefaultMemo(_)));
        assert!(store.deleted_memos().is_empty());
    }

    #[test]
    fn batch_with_unknown_id_rejects_everything() {
        let mut store = make_store();
        store.add("default").unwrap();
        let a = store.add("a").unwrap();

        let err = store
            .soft_delete_batch(&[a.id, MemoId::new(1)])
            .unwrap_err();
        assert!(matches!(err, MemoError::NotFound(_)));
        assert!(store.deleted_memos().is_empty());
    }

    #[test]
    fn batch_deletes_all_in_one_write() {
        let mut store = make_store();
        store.add("default").unwrap();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        let writes = store.backend.memo_writes();

        let deleted = store.soft_delete_batch(&[a.id, b.id]).unwrap();
        assert_eq!(deleted.len(), 2);
        assert_eq!(store.deleted_memos().len(), 2);
        assert_eq!(store.backend.memo_writes(), writes + 1);
    }

    // --- Restore ---

    #[test]
    fn restore_clears_deletion() {
        let mut store = make_store();
        store.add("default").unwrap();
        let memo = store.add("x").unwrap();
        store.soft_delete(memo.id).unwrap();

        let restored = store.restore(memo.id).unwrap();
        assert!(!restored.is_deleted);
        assert!(restored.deleted_at.is_none());
        assert!(store.deleted_memos().is_empty());
    }

    #[test]
    fn restore_keeps_original_position() {
        let mut store = make_store();
        store.add("oldest").unwrap();
        let middle = store.add("middle").unwrap();
        store.add("newest").unwrap();

        store.soft_delete(middle.id).unwrap();
        store.restore(middle.id).unwrap();

        let contents: Vec<_> = store.active_memos().into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn restore_missing_is_not_found() {
        let mut store = make_store();
        assert!(matches!(
            store.restore(MemoId::new(5)),
            Err(MemoError::NotFound(_))
        ));
    }

    // --- Purge ---

    #[test]
    fn purge_removes_memo() {
        let mut store = make_store();
        store.add("default").unwrap();
        let memo = store.add("x").unwrap();
        store.soft_delete(memo.id).unwrap();

        store.purge(memo.id).unwrap();
        assert!(store.get(memo.id).is_none());
        assert!(!store.backend.autosave_text().unwrap().contains("\nx\n"));
    }

    #[test]
    fn purge_default_is_rejected() {
        let mut store = make_store();
        let default = store.add("default").unwrap();
        assert!(matches!(
            store.purge(default.id),
            Err(MemoError::ProtectedDefaultMemo(_))
        ));
        assert!(store.get(default.id).is_some());
    }

    #[test]
    fn purge_batch_is_all_or_nothing() {
        let mut store = make_store();
        let default = store.add("default").unwrap();
        let victim = store.add("victim").unwrap();

        assert!(matches!(
            store.purge_batch(&[victim.id, default.id]),
            Err(MemoError::ProtectedDefaultMemo(_))
        ));
        assert!(matches!(
            store.purge_batch(&[victim.id, MemoId::new(-5)]),
            Err(MemoError::NotFound(_))
        ));
        assert_eq!(store.all_memos().len(), 2);

        let removed = store.purge_batch(&[victim.id, victim.id]).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(store.all_memos().len(), 1);
    }

    // --- Expiry sweep ---

    #[test]
    fn sweep_removes_only_expired_deleted_memos() {
        let now = 1_800_000_000_000;
        let mut store = StoreFixture::new()
            .with_active_memo("active")
            .with_deleted_memo("old", now - RETENTION_MILLIS - 1)
            .with_deleted_memo("boundary", now - RETENTION_MILLIS)
            .with_deleted_memo("recent", now - DAY)
            .build();

        let swept = store.sweep_expired(now).unwrap();

        assert_eq!(swept.len(), 1);
        assert_eq!(swept[0].content, "old");
        let remaining: Vec<_> = store.all_memos().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(remaining, vec!["active", "boundary", "recent"]);
    }

    #[test]
    fn sweep_without_expired_memos_does_not_write() {
        let now = 1_800_000_000_000;
        let mut store = StoreFixture::new()
            .with_deleted_memo("recent", now - DAY)
            .build();
        let writes = store.backend.memo_writes();

        assert!(store.sweep_expired(now).unwrap().is_empty());
        assert_eq!(store.backend.memo_writes(), writes);
    }

    // --- Import ---

    #[test]
    fn replace_active_keeps_file_order_and_trash() {
        let mut store = StoreFixture::new()
            .with_active_memo("will be replaced")
            .with_deleted_memo("in trash", 1_000)
            .build();

        let records = vec![
            MemoRecord::active("one", "2024-01-01 10:00:00"),
            MemoRecord::active("two", "2024-01-02 10:00:00"),
        ];
        store.replace_active(records).unwrap();

        let active: Vec<_> = store.active_memos().into_iter().map(|m| m.content).collect();
        assert_eq!(active, vec!["one", "two"]);
        assert_eq!(store.deleted_memos()[0].content, "in trash");
    }

    #[test]
    fn replace_active_clears_dangling_default() {
        let mut store = make_store();
        store.add("default").unwrap();
        store
            .replace_active(vec![MemoRecord::active("fresh", "t")])
            .unwrap();
        assert_eq!(store.default_memo_id(), None);
        assert_eq!(store.backend.preferences().default_memo(), None);
    }

    // --- Default memo ---

    #[test]
    fn set_default_requires_active_memo() {
        let mut store = make_store();
        store.add("default").unwrap();
        let other = store.add("other").unwrap();
        store.soft_delete(other.id).unwrap();

        assert!(matches!(
            store.set_default(other.id),
            Err(MemoError::NotFound(_))
        ));
    }

    #[test]
    fn clear_default_unprotects_memo() {
        let mut store = make_store();
        let memo = store.add("default").unwrap();
        store.clear_default().unwrap();
        assert!(store.soft_delete(memo.id).is_ok());
    }

    // --- Load ---

    #[test]
    fn load_round_trips_through_backend() {
        let mut store = make_store();
        let first = store.add("first").unwrap();
        let second = store.add("second").unwrap();
        store.soft_delete(second.id).unwrap();
        let text = store.backend.autosave_text().unwrap();

        let backend = MemBackend::with_autosave(text).with_preferences(store.backend.preferences());
        let mut reopened = MemoStore::with_backend(backend);
        assert_eq!(reopened.load().unwrap(), 2);

        assert_eq!(reopened.all_memos(), store.all_memos());
        assert_eq!(reopened.default_memo_id(), Some(first.id));
    }

    #[test]
    fn load_failure_leaves_store_empty() {
        let backend = MemBackend::with_autosave("MEMO_START\nx\n[t]\nDELETED:false\nMEMO_END\n");
        backend.set_simulate_read_error(true);
        let mut store = MemoStore::with_backend(backend);

        assert!(matches!(store.load(), Err(MemoError::Io(_))));
        assert!(store.all_memos().is_empty());
    }

    #[test]
    fn load_clears_pointer_to_deleted_memo() {
        let text = "MEMO_START\ngone\n[t]\nDELETED:true\nDELETED_AT:5\nID:77\nMEMO_END\n\n";
        let backend = MemBackend::with_autosave(text)
            .with_preferences(Preferences::with_default_memo(Some(MemoId::new(77))));
        let mut store = MemoStore::with_backend(backend);
        store.load().unwrap();

        assert_eq!(store.default_memo_id(), None);
        assert_eq!(store.backend.preferences().default_memo(), None);
    }

    #[test]
    fn load_regenerates_missing_and_duplicate_ids() {
        let text = "MEMO_START\na\n[t]\nDELETED:false\nID:5\nMEMO_END\n\n\
                    MEMO_START\nb\n[t]\nDELETED:false\nID:5\nMEMO_END\n\n\
                    MEMO_START\nc\n[t]\nDELETED:false\nMEMO_END\n\n";
        let mut store = MemoStore::with_backend(MemBackend::with_autosave(text));
        store.load().unwrap();

        let ids: HashSet<MemoId> = store.all_memos().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(store.all_memos()[0].id, MemoId::new(5));
    }

    #[test]
    fn flush_rewrites_current_state() {
        let mut store = make_store();
        store.add("x").unwrap();
        let writes = store.backend.memo_writes();
        store.flush().unwrap();
        assert_eq!(store.backend.memo_writes(), writes + 1);
    }
}
