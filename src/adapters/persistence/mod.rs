//! Persistence Adapters - JSON File Storage
//!
//! Implements the `QuoteRepository` port with a single JSON file
//! rewritten atomically on every save. No database dependency.

pub mod json_file;

pub use json_file::JsonFileRepository;
