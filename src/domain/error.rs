//! Quote store error taxonomy.

use thiserror::Error;

/// Errors surfaced by the quote store.
///
/// The HTTP layer maps each variant to a status code; see
/// `adapters::http::error`.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A payload is missing a required field or carries an empty one.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Random pick requested on an empty collection.
    #[error("the quote collection is empty")]
    EmptyCollection,

    /// The durable resource could not be read or written.
    #[error("persistence failure: {0}")]
    Persistence(#[source] anyhow::Error),
}
