//! Domain layer - Quote records, inbound payloads and validation.
//!
//! No I/O here (hexagonal architecture inner ring). Everything is
//! serializable and testable in isolation.

pub mod error;
pub mod quote;

pub use error::QuoteError;
pub use quote::{
    ANONYMOUS_AUTHOR, NewQuote, Quote, QuoteId, ReplacementQuote, build_replacement, ids_exhausted,
    next_id_after,
};
