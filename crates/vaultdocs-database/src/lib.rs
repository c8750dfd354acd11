//! # vaultdocs-database
//!
//! Document record store for VaultDocs: PostgreSQL connection management,
//! migrations, and the [`DocumentRepository`] implementations (PostgreSQL
//! and in-memory) selected at runtime by [`DocumentStore::connect`].

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::DocumentRepository;
pub use store::DocumentStore;
