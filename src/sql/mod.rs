//! SQL generation module.
//!
//! Typed builders that render the SQLite statements the schema layer emits:
//!
//! - [`ddl`] - CREATE TABLE / INDEX, ALTER TABLE ... ADD, DROP TABLE
//! - [`dml`] - INSERT ... SELECT used for safe table copies
//! - [`token`] - Token types for SQL generation
//! - [`types`] - Declared column types and defaults

pub mod ddl;
pub mod dml;
pub mod token;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use ddl::{
    AlterTableAdd, ColumnConstraint, ColumnDef, CreateIndex, CreateTable, DropTable,
    TableConstraint, TableKind, FULL_TEXT_MODULE,
};
pub use dml::InsertSelect;
pub use token::{Token, TokenStream};
pub use types::{DataType, DefaultValue};
