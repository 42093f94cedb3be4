//! Repository Port - Durable Quote Collection Interface
//!
//! The store keeps the collection in memory and only talks to the
//! durable resource through this trait. Every save replaces the whole
//! collection; there is no per-record write.

use async_trait::async_trait;

use crate::domain::Quote;

/// Trait for durable quote collection providers.
#[async_trait]
pub trait QuoteRepository: Send + Sync + 'static {
  /// Load the full collection in stored order.
  ///
  /// A resource that does not exist yet yields an empty collection.
  async fn load(&self) -> anyhow::Result<Vec<Quote>>;

  /// Replace the durable collection with `quotes`.
  async fn save(&self, quotes: &[Quote]) -> anyhow::Result<()>;

  /// Check if the durable resource is readable and writable.
  async fn is_healthy(&self) -> bool;
}
