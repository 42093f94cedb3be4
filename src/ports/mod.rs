//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `QuoteRepository`: durable quote collection (JSON file)

pub mod repository;

pub use repository::QuoteRepository;
