use super::mem_backend::MemBackend;
use super::memo_store::MemoStore;

/// In-memory store for testing.
pub type InMemoryStore = MemoStore<MemBackend>;

impl InMemoryStore {
    pub fn new() -> Self {
        MemoStore::with_backend(MemBackend::new())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Test fixtures for building stores with pre-populated data.
#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::InMemoryStore;
    use crate::codec::autosave;
    use crate::model::{Memo, MemoId};
    use crate::store::mem_backend::MemBackend;
    use crate::store::memo_store::MemoStore;
    use crate::store::Preferences;

    /// Builder for a store whose auto-save file already holds memos.
    ///
    /// Memos keep the order they are added in (the first one is the newest, as in a real
    /// store) and get small sequential ids starting at 1.
    pub struct StoreFixture {
        memos: Vec<Memo>,
        default_memo: Option<usize>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                memos: Vec::new(),
                default_memo: None,
            }
        }

        fn next_id(&self) -> MemoId {
            MemoId::new(self.memos.len() as i64 + 1)
        }

        pub fn with_active_memo(mut self, content: &str) -> Self {
            let memo = Memo::new(
                self.next_id(),
                content,
                Some("2024-01-01 10:00:00".to_string()),
            );
            self.memos.push(memo);
            self
        }

        pub fn with_deleted_memo(mut self, content: &str, deleted_at: i64) -> Self {
            let memo = Memo::new(
                self.next_id(),
                content,
                Some("2024-01-01 10:00:00".to_string()),
            )
            .soft_deleted(deleted_at);
            self.memos.push(memo);
            self
        }

        /// Marks the most recently added memo as the default memo.
        pub fn as_default(mut self) -> Self {
            if !self.memos.is_empty() {
                self.default_memo = Some(self.memos.len() - 1);
            }
            self
        }

        pub fn build(self) -> InMemoryStore {
            let default = self.default_memo.map(|i| self.memos[i].id);
            let backend = MemBackend::with_autosave(autosave::encode(&self.memos))
                .with_preferences(Preferences::with_default_memo(default));
            let mut store = MemoStore::with_backend(backend);
            store.load().expect("fixture auto-save loads");
            store
        }
    }
}
