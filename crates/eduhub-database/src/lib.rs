//! # eduhub-database
//!
//! Persistence for EduHub. The services depend only on the store traits in
//! [`store`]; two backends implement them:
//!
//! - [`repositories`]: PostgreSQL via sqlx, with embedded migrations
//! - [`memory`]: process-local maps for demos and tests
//!
//! [`Stores`] bundles one implementation of every trait.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod query;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use store::{InstituteStore, RecordStore, UserStore};
pub use stores::Stores;
