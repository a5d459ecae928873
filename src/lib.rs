//! # booklist
//!
//! Relational schema modeling and hierarchical grouping for a personal book
//! catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Style (ordered grouping kind ids + options)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [grouping]
//! ┌─────────────────────────────────────────────────────────┐
//! │   GroupChain: BooklistGroups over registered GroupKeys   │
//! │   node keys, accumulated domains, date partitions        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [schema]
//! ┌─────────────────────────────────────────────────────────┐
//! │   TableDefinition: domains, keys, links, indexes, joins  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql]
//! ┌─────────────────────────────────────────────────────────┐
//! │          SQLite DDL / DML via a SqlEngine                │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod grouping;
pub mod schema;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::ddl;
pub use sql::dml;
pub use sql::token;
