//! Relational schema modeling.
//!
//! - [`domain`] - column descriptors and bound expressions
//! - [`table`] - table definitions with symmetric foreign keys
//! - [`engine`] - the execution seam and SQLite implementation
//! - [`catalog`] - the reference book-catalog schema

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod table;

pub use catalog::{reference_schema, ReferenceSchema, SourceTable};
pub use domain::{Domain, DomainExpression, DomainRef, Sort};
pub use engine::{ColumnInfo, EngineError, EngineResult, SqlEngine, TableInfo};
pub use table::{ForeignKey, IndexDefinition, JoinType, TableDefinition};
