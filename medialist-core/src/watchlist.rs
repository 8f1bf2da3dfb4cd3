//! Per-user watchlists kept in a document store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;

use crate::auth::AuthUser;

/// Collection holding one watchlist document per user, keyed by email.
pub const WATCHLIST_COLLECTION: &str = "watchlist";

/// Errors reported by a document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend could not be reached
    #[error("Document store unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Trait for document store backends.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Fetches a document by collection and key. `None` when absent.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` - Backend could not be reached
    async fn get_document(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<String>>, StoreError>;

    /// Replaces a document.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` - Backend could not be reached
    async fn put_document(
        &self,
        collection: &str,
        key: &str,
        entries: Vec<String>,
    ) -> Result<(), StoreError>;
}

/// Document store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<(String, String), Vec<String>>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_document(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<String>>, StoreError> {
        let documents = self.documents.read();
        Ok(documents
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }

    async fn put_document(
        &self,
        collection: &str,
        key: &str,
        entries: Vec<String>,
    ) -> Result<(), StoreError> {
        self.documents
            .write()
            .insert((collection.to_string(), key.to_string()), entries);
        Ok(())
    }
}

/// What the watchlist page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchlistView {
    /// No document, or a document with no entries.
    Empty,
    /// Entries in the order they were added.
    Items(Vec<String>),
}

impl WatchlistView {
    /// Entries shown, empty for [`WatchlistView::Empty`].
    pub fn entries(&self) -> &[String] {
        match self {
            WatchlistView::Empty => &[],
            WatchlistView::Items(items) => items,
        }
    }
}

/// Reads and updates the signed-in user's watchlist.
///
/// Updates to one user's document are applied one at a time: each holds that
/// user's write lock across the read and the write back. Clones share the locks.
#[derive(Debug, Clone)]
pub struct WatchlistService {
    store: Arc<dyn DocumentStore>,
    write_locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl WatchlistService {
    /// Creates a service over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            write_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn write_lock(&self, key: &str) -> Arc<AsyncMutex<()>> {
        self.write_locks
            .lock()
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    /// Loads the watchlist for `user`. A missing document yields [`WatchlistView::Empty`].
    ///
    /// # Errors
    /// - `StoreError::Unavailable` - Backend could not be reached
    pub async fn load(&self, user: &AuthUser) -> Result<WatchlistView, StoreError> {
        let entries = self
            .store
            .get_document(WATCHLIST_COLLECTION, &user.email)
            .await?
            .unwrap_or_default();

        tracing::debug!(uid = %user.uid, entries = entries.len(), "Watchlist loaded");

        Ok(if entries.is_empty() {
            WatchlistView::Empty
        } else {
            WatchlistView::Items(entries)
        })
    }

    /// Appends `entry` unless it is already present. Returns whether it was added.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` - Backend could not be reached
    pub async fn add(&self, user: &AuthUser, entry: &str) -> Result<bool, StoreError> {
        let lock = self.write_lock(&user.email);
        let _guard = lock.lock().await;

        let mut entries = self
            .store
            .get_document(WATCHLIST_COLLECTION, &user.email)
            .await?
            .unwrap_or_default();

        if entries.iter().any(|existing| existing == entry) {
            return Ok(false);
        }

        entries.push(entry.to_string());
        self.store
            .put_document(WATCHLIST_COLLECTION, &user.email, entries)
            .await?;
        tracing::info!(uid = %user.uid, entry, "Added to watchlist");
        Ok(true)
    }

    /// Removes `entry`. Returns whether it was present.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` - Backend could not be reached
    pub async fn remove(&self, user: &AuthUser, entry: &str) -> Result<bool, StoreError> {
        let lock = self.write_lock(&user.email);
        let _guard = lock.lock().await;

        let Some(mut entries) = self
            .store
            .get_document(WATCHLIST_COLLECTION, &user.email)
            .await?
        else {
            return Ok(false);
        };

        let before = entries.len();
        entries.retain(|existing| existing != entry);
        if entries.len() == before {
            return Ok(false);
        }

        self.store
            .put_document(WATCHLIST_COLLECTION, &user.email, entries)
            .await?;
        tracing::info!(uid = %user.uid, entry, "Removed from watchlist");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;

    fn viewer() -> AuthUser {
        AuthUser {
            uid: "u1".to_string(),
            email: "viewer@example.com".to_string(),
        }
    }

    fn service() -> WatchlistService {
        WatchlistService::new(Arc::new(InMemoryDocumentStore::new()))
    }

    #[tokio::test]
    async fn test_missing_document_is_empty() {
        let view = assert_ok!(service().load(&viewer()).await);
        assert_eq!(view, WatchlistView::Empty);
        assert!(view.entries().is_empty());
    }

    #[tokio::test]
    async fn test_add_deduplicates() {
        let service = service();
        assert!(service.add(&viewer(), "Dune").await.unwrap());
        assert!(!service.add(&viewer(), "Dune").await.unwrap());
        assert!(service.add(&viewer(), "Arrival").await.unwrap());

        let view = service.load(&viewer()).await.unwrap();
        assert_eq!(
            view,
            WatchlistView::Items(vec!["Dune".to_string(), "Arrival".to_string()])
        );
    }

    #[tokio::test]
    async fn test_remove_last_entry_leaves_empty_view() {
        let service = service();
        service.add(&viewer(), "Dune").await.unwrap();

        assert!(assert_ok!(service.remove(&viewer(), "Dune").await));
        assert!(!assert_ok!(service.remove(&viewer(), "Dune").await));
        assert_eq!(service.load(&viewer()).await.unwrap(), WatchlistView::Empty);
    }

    /// Store that yields between reading a document and returning it.
    #[derive(Debug, Default)]
    struct SlowReadStore {
        inner: InMemoryDocumentStore,
    }

    #[async_trait]
    impl DocumentStore for SlowReadStore {
        async fn get_document(
            &self,
            collection: &str,
            key: &str,
        ) -> Result<Option<Vec<String>>, StoreError> {
            let document = self.inner.get_document(collection, key).await?;
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            Ok(document)
        }

        async fn put_document(
            &self,
            collection: &str,
            key: &str,
            entries: Vec<String>,
        ) -> Result<(), StoreError> {
            self.inner.put_document(collection, key, entries).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let service = WatchlistService::new(Arc::new(SlowReadStore::default()));
        let other_handle = service.clone();
        let user = viewer();

        let (dune, alien) = tokio::join!(
            service.add(&user, "Dune"),
            other_handle.add(&user, "Alien"),
        );
        assert!(assert_ok!(dune));
        assert!(assert_ok!(alien));

        let view = assert_ok!(service.load(&viewer()).await);
        assert_eq!(view.entries().len(), 2);
        assert!(view.entries().contains(&"Dune".to_string()));
        assert!(view.entries().contains(&"Alien".to_string()));

        let (removed, added) = tokio::join!(
            service.remove(&user, "Dune"),
            other_handle.add(&user, "Arrival"),
        );
        assert!(assert_ok!(removed));
        assert!(assert_ok!(added));
        let view = assert_ok!(service.load(&viewer()).await);
        assert_eq!(
            view,
            WatchlistView::Items(vec!["Alien".to_string(), "Arrival".to_string()])
        );
    }

    #[tokio::test]
    async fn test_watchlists_are_per_user() {
        let service = service();
        service.add(&viewer(), "Dune").await.unwrap();

        let other = AuthUser {
            uid: "u2".to_string(),
            email: "other@example.com".to_string(),
        };
        assert_eq!(service.load(&other).await.unwrap(), WatchlistView::Empty);
    }
}
