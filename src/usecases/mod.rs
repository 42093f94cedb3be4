//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain validation with the repository port.
//!
//! Use cases:
//! - `QuoteStore`: in-memory mirror of the durable quote collection

pub mod quote_store;

pub use quote_store::QuoteStore;
