//! Quote domain types.
//!
//! Defines the stored `Quote` record and the two inbound shapes the
//! store accepts: `NewQuote` for a single append and `ReplacementQuote`
//! for elements of a full-replace payload. Validation lives here so the
//! store and the HTTP layer share one rule.

use serde::{Deserialize, Serialize};

use super::error::QuoteError;

/// Author stored when a payload carries no author or a blank one.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Identifier assigned by the store.
pub type QuoteId = u64;

/// A stored quote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier within the collection.
    pub id: QuoteId,
    /// Quote body. Never empty.
    pub quote: String,
    /// Author, defaulted to [`ANONYMOUS_AUTHOR`].
    pub author: String,
}

/// Creation payload for a single append.
///
/// The body field is `text`. A payload that only carries `quote` is
/// treated as missing the body and rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    /// Quote body.
    #[serde(default)]
    pub text: Option<String>,
    /// Optional author.
    #[serde(default)]
    pub author: Option<String>,
}

impl NewQuote {
    /// Convenience constructor used by callers and tests.
    pub fn new(text: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            text: Some(text.into()),
            author: author.map(str::to_string),
        }
    }

    /// Validate the body and build a record with the given id.
    pub fn into_quote(self, id: QuoteId) -> Result<Quote, QuoteError> {
        let quote = require_text(self.text)?;
        Ok(Quote {
            id,
            quote,
            author: author_or_default(self.author),
        })
    }
}

/// One element of a full-replace payload.
///
/// Accepts either `text` or `quote` for the body so a previously listed
/// collection can be sent back as-is. A supplied `id` is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementQuote {
    /// Caller-supplied id, kept if present.
    #[serde(default)]
    pub id: Option<QuoteId>,
    /// Quote body.
    #[serde(default, alias = "quote")]
    pub text: Option<String>,
    /// Optional author.
    #[serde(default)]
    pub author: Option<String>,
}

impl ReplacementQuote {
    pub fn new(text: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            id: None,
            text: Some(text.into()),
            author: author.map(str::to_string),
        }
    }

    /// Same as [`ReplacementQuote::new`] with a fixed id.
    pub fn with_id(id: QuoteId, text: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(text, author)
        }
    }
}

impl From<Quote> for ReplacementQuote {
    fn from(quote: Quote) -> Self {
        Self {
            id: Some(quote.id),
            text: Some(quote.quote),
            author: Some(quote.author),
        }
    }
}

/// Build the replacement collection, validating every candidate first.
///
/// Supplied ids must be unique. Candidates without an id are numbered
/// sequentially after the largest supplied id. Nothing is returned unless
/// every candidate is valid.
pub fn build_replacement(
    candidates: Vec<ReplacementQuote>,
) -> Result<Vec<Quote>, QuoteError> {
    let mut seen = std::collections::HashSet::with_capacity(candidates.len());
    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.text.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(QuoteError::Validation(format!(
                "quote at index {index} is missing a non-empty \"text\" field"
            )));
        }
        if let Some(id) = candidate.id {
            if !seen.insert(id) {
                return Err(QuoteError::Validation(format!(
                    "duplicate id {id} at index {index}"
                )));
            }
        }
    }

    let mut next_id = next_id_after(seen.iter().copied());
    let mut quotes = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let id = match candidate.id {
            Some(id) => id,
            None => {
                let id = next_id.ok_or_else(ids_exhausted)?;
                next_id = id.checked_add(1);
                id
            }
        };
        quotes.push(Quote {
            id,
            quote: require_text(candidate.text)?,
            author: author_or_default(candidate.author),
        });
    }
    Ok(quotes)
}

/// First id after every id in `ids`; `None` once `QuoteId::MAX` is taken.
pub fn next_id_after(ids: impl IntoIterator<Item = QuoteId>) -> Option<QuoteId> {
    ids.into_iter().max().map_or(Some(1), |max| max.checked_add(1))
}

/// Error for an id request after `QuoteId::MAX` has been used.
pub fn ids_exhausted() -> QuoteError {
    QuoteError::Validation(format!("no quote id left after {}", QuoteId::MAX))
}

fn require_text(text: Option<String>) -> Result<String, QuoteError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(QuoteError::Validation(
            "\"text\" must not be empty".to_string(),
        )),
        None => Err(QuoteError::Validation(
            "missing required field \"text\"".to_string(),
        )),
    }
}

fn author_or_default(author: Option<String>) -> String {
    match author {
        Some(author) if !author.trim().is_empty() => author,
        _ => ANONYMOUS_AUTHOR.to_string(),
    }
}
