//! Quote Store - Authoritative Ordered Quote Collection
//!
//! Serves reads from an in-memory mirror and persists every mutation
//! through the `QuoteRepository` port before swapping the mirror:
//! - `open` loads the durable collection (initialisation)
//! - `append` / `replace_all` write the full collection, then swap
//! - `flush` rewrites the durable collection (teardown)
//!
//! Writers hold the mirror's write lock across validate → save → swap,
//! so mutations are serialised and readers never see partial state.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    NewQuote, Quote, QuoteError, QuoteId, ReplacementQuote, build_replacement, ids_exhausted,
    next_id_after,
};
use crate::ports::QuoteRepository;

struct Collection {
    quotes: Vec<Quote>,
    /// `None` once `QuoteId::MAX` is in use.
    next_id: Option<QuoteId>,
}

impl Collection {
    fn new(quotes: Vec<Quote>) -> Self {
        let next_id = next_id_after(quotes.iter().map(|q| q.id));
        Self { quotes, next_id }
    }
}

/// Owns the quote collection and its persistence.
pub struct QuoteStore<R: QuoteRepository + ?Sized> {
    /// Durable resource.
    repository: Arc<R>,
    /// In-memory mirror of the durable collection.
    collection: RwLock<Collection>,
}

impl<R: QuoteRepository + ?Sized> QuoteStore<R> {
    /// Open the store, initialising the mirror from the repository.
    #[instrument(skip(repository))]
    pub async fn open(repository: Arc<R>) -> Result<Self, QuoteError> {
        let quotes = repository.load().await.map_err(QuoteError::Persistence)?;
        info!(count = quotes.len(), "Quote store opened");

        Ok(Self {
            repository,
            collection: RwLock::new(Collection::new(quotes)),
        })
    }

    /// All records in insertion order.
    pub async fn list_all(&self) -> Vec<Quote> {
        self.collection.read().await.quotes.clone()
    }

    /// Records whose author matches `author` exactly.
    pub async fn list_by_author(&self, author: &str) -> Vec<Quote> {
        self.collection
            .read()
            .await
            .quotes
            .iter()
            .filter(|q| q.author == author)
            .cloned()
            .collect()
    }

    /// One record chosen uniformly at random.
    pub async fn pick_random(&self) -> Result<Quote, QuoteError> {
        let collection = self.collection.read().await;
        collection
            .quotes
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(QuoteError::EmptyCollection)
    }

    /// Validate and append one record, returning it with its assigned id.
    #[instrument(skip(self, candidate))]
    pub async fn append(&self, candidate: NewQuote) -> Result<Quote, QuoteError> {
        let mut collection = self.collection.write().await;
        let id = collection.next_id.ok_or_else(ids_exhausted)?;
        let quote = candidate.into_quote(id)?;

        let mut quotes = collection.quotes.clone();
        quotes.push(quote.clone());
        self.persist(&quotes).await?;

        collection.quotes = quotes;
        collection.next_id = quote.id.checked_add(1);

        info!(id = quote.id, total = collection.quotes.len(), "Quote appended");
        Ok(quote)
    }

    /// Validate every candidate and swap in the new collection.
    ///
    /// All-or-nothing: any invalid candidate leaves the prior
    /// collection (in memory and on disk) untouched.
    #[instrument(skip(self, candidates), fields(count = candidates.len()))]
    pub async fn replace_all(
        &self,
        candidates: Vec<ReplacementQuote>,
    ) -> Result<Vec<Quote>, QuoteError> {
        let quotes = build_replacement(candidates)?;

        let mut collection = self.collection.write().await;
        self.persist(&quotes).await?;
        *collection = Collection::new(quotes);

        info!(total = collection.quotes.len(), "Quote collection replaced");
        Ok(collection.quotes.clone())
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.collection.read().await.quotes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Whether the durable resource is usable.
    pub async fn is_healthy(&self) -> bool {
        self.repository.is_healthy().await
    }

    /// Rewrite the durable resource from the mirror.
    #[instrument(skip(self))]
    pub async fn flush(&self) -> Result<(), QuoteError> {
        let collection = self.collection.read().await;
        self.persist(&collection.quotes).await?;
        debug!(count = collection.quotes.len(), "Quote store flushed");
        Ok(())
    }

    async fn persist(&self, quotes: &[Quote]) -> Result<(), QuoteError> {
        self.repository.save(quotes).await.map_err(|e| {
            warn!(error = %e, "Failed to persist quote collection");
            QuoteError::Persistence(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Repository that records saves and can be told to fail.
    #[derive(Default)]
    struct RecordingRepo {
        initial: Vec<Quote>,
        saved: Mutex<Vec<Vec<Quote>>>,
        fail_saves: bool,
    }

    #[async_trait]
    impl QuoteRepository for RecordingRepo {
        async fn load(&self) -> anyhow::Result<Vec<Quote>> {
            Ok(self.initial.clone())
        }

        async fn save(&self, quotes: &[Quote]) -> anyhow::Result<()> {
            anyhow::ensure!(!self.fail_saves, "disk full");
            self.saved.lock().unwrap().push(quotes.to_vec());
            Ok(())
        }

        async fn is_healthy(&self) -> bool {
            !self.fail_saves
        }
    }

    fn quote(id: QuoteId, text: &str) -> Quote {
        Quote {
            id,
            quote: text.to_string(),
            author: "Tester".to_string(),
        }
    }

    #[tokio::test]
    async fn test_next_id_follows_largest_loaded_id() {
        let repo = Arc::new(RecordingRepo {
            initial: vec![quote(3, "a"), quote(9, "b"), quote(4, "c")],
            ..RecordingRepo::default()
        });
        let store = QuoteStore::open(repo).await.unwrap();

        let added = store.append(NewQuote::new("d", None)).await.unwrap();
        assert_eq!(added.id, 10);
    }

    #[tokio::test]
    async fn test_append_after_max_id_is_rejected() {
        let repo = Arc::new(RecordingRepo {
            initial: vec![quote(QuoteId::MAX, "edge")],
            ..RecordingRepo::default()
        });
        let store = QuoteStore::open(Arc::clone(&repo)).await.unwrap();

        let err = store.append(NewQuote::new("next", None)).await.unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)));
        assert_eq!(store.len().await, 1);
        assert!(repo.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_persists_full_collection() {
        let repo = Arc::new(RecordingRepo {
            initial: vec![quote(1, "a")],
            ..RecordingRepo::default()
        });
        let store = QuoteStore::open(Arc::clone(&repo)).await.unwrap();

        store.append(NewQuote::new("b", Some("B"))).await.unwrap();

        let saved = repo.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].len(), 2);
        assert_eq!(saved[0][1].quote, "b");
    }

    #[tokio::test]
    async fn test_invalid_append_does_not_persist() {
        let repo = Arc::new(RecordingRepo::default());
        let store = QuoteStore::open(Arc::clone(&repo)).await.unwrap();

        let err = store.append(NewQuote::default()).await.unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)));
        assert!(repo.saved.lock().unwrap().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_mirror_untouched() {
        let repo = Arc::new(RecordingRepo {
            initial: vec![quote(1, "a")],
            fail_saves: true,
            ..RecordingRepo::default()
        });
        let store = QuoteStore::open(repo).await.unwrap();

        let err = store.append(NewQuote::new("b", None)).await.unwrap_err();
        assert!(matches!(err, QuoteError::Persistence(_)));
        assert_eq!(store.list_all().await, vec![quote(1, "a")]);

        let err = store
            .replace_all(vec![ReplacementQuote::new("z", None)])
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Persistence(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_replace_resets_id_sequence() {
        let repo = Arc::new(RecordingRepo {
            initial: vec![quote(41, "old")],
            ..RecordingRepo::default()
        });
        let store = QuoteStore::open(repo).await.unwrap();

        store
            .replace_all(vec![ReplacementQuote::new("x", None)])
            .await
            .unwrap();
        let added = store.append(NewQuote::new("y", None)).await.unwrap();
        assert_eq!(added.id, 2);
    }

    #[tokio::test]
    async fn test_pick_random_on_empty_store() {
        let store = QuoteStore::open(Arc::new(RecordingRepo::default()))
            .await
            .unwrap();
        assert!(matches!(
            store.pick_random().await,
            Err(QuoteError::EmptyCollection)
        ));
    }

    #[tokio::test]
    async fn test_list_by_author_filters_exactly() {
        let repo = Arc::new(RecordingRepo {
            initial: vec![
                quote(1, "a"),
                Quote {
                    id: 2,
                    quote: "b".to_string(),
                    author: "Other".to_string(),
                },
            ],
            ..RecordingRepo::default()
        });
        let store = QuoteStore::open(repo).await.unwrap();

        assert_eq!(store.list_by_author("Tester").await.len(), 1);
        assert!(store.list_by_author("tester").await.is_empty());
        assert!(store.list_by_author("").await.is_empty());
    }

    #[tokio::test]
    async fn test_flush_writes_mirror() {
        let repo = Arc::new(RecordingRepo {
            initial: vec![quote(1, "a")],
            ..RecordingRepo::default()
        });
        let store = QuoteStore::open(Arc::clone(&repo)).await.unwrap();

        store.flush().await.unwrap();
        assert_eq!(repo.saved.lock().unwrap()[0], vec![quote(1, "a")]);
    }
}
