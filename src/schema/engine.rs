//! Execution engine seam.
//!
//! The schema layer never talks to a database directly; it renders SQL and
//! hands it to a [`SqlEngine`]. The catalog uses SQLite through `rusqlite`,
//! for which an implementation is provided here.

use rusqlite::{params_from_iter, Connection};
use tracing::debug;

use crate::sql::types::DataType;

/// Errors raised by the execution engine. Passed through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Physical description of one column, as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub position: usize,
    pub name: String,
    /// Declared type name, verbatim.
    pub type_name: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    /// 1-based position within the primary key, 0 if not part of it.
    pub primary_key_index: usize,
}

impl ColumnInfo {
    /// Declared type mapped onto [`DataType`], if recognised.
    pub fn data_type(&self) -> Option<DataType> {
        DataType::parse(&self.type_name)
    }
}

/// Physical description of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    table_name: String,
    columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    /// Case-insensitive lookup, as SQLite column names are.
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// True when the table does not physically exist.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// What the schema layer needs from a live database.
pub trait SqlEngine {
    /// Execute one statement that returns no rows.
    fn execute(&self, sql: &str) -> EngineResult<()>;

    /// Run a single-value integer query (`SELECT COUNT(*) ...`).
    fn query_count(&self, sql: &str, params: &[&str]) -> EngineResult<i64>;

    /// Column descriptions for `table`; empty if the table does not exist.
    fn column_info(&self, table: &str) -> EngineResult<Vec<ColumnInfo>>;
}

impl SqlEngine for Connection {
    fn execute(&self, sql: &str) -> EngineResult<()> {
        debug!(sql, "execute");
        self.execute_batch(sql)?;
        Ok(())
    }

    fn query_count(&self, sql: &str, params: &[&str]) -> EngineResult<i64> {
        let count = self.query_row(sql, params_from_iter(params.iter()), |row| row.get(0))?;
        Ok(count)
    }

    fn column_info(&self, table: &str) -> EngineResult<Vec<ColumnInfo>> {
        debug!(table, "introspecting columns");
        let mut stmt = self.prepare("SELECT cid, name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?)")?;
        let columns = stmt
            .query_map([table], |row| {
                let position: i64 = row.get(0)?;
                let not_null: i64 = row.get(3)?;
                let primary_key_index: i64 = row.get(5)?;
                Ok(ColumnInfo {
                    position: position as usize,
                    name: row.get(1)?,
                    type_name: row.get(2)?,
                    not_null: not_null != 0,
                    default_value: row.get(4)?,
                    primary_key_index: primary_key_index as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }
}
