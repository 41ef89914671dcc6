//! Infrastructure adapters for external systems.
//!
//! Concrete implementations of the domain ports: SQLite persistence for
//! prompt overrides, an HTTP metrics source, and in-memory collaborators
//! for embedding and tests.

pub mod http;
pub mod memory;
pub mod sqlite;
