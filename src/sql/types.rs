//! SQL-level storage types and default values for DDL generation.
//!
//! The catalog database is SQLite, whose columns carry a declared type
//! name that maps onto a storage affinity. The declared names below are the
//! ones the catalog schema has always used; `DATE`, `DATETIME` and
//! `BOOLEAN` are kept distinct from their affinities so that schema
//! introspection round-trips the declared intent.

use std::fmt;

use super::token::Token;

/// Declared column type.
///
/// # Examples
///
/// ```ignore
/// use booklist::sql::types::DataType;
///
/// assert_eq!(DataType::parse("integer"), Some(DataType::Integer));
/// assert_eq!(DataType::Datetime.to_string(), "DATETIME");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Integer affinity; also used for row ids and foreign keys.
    Integer,

    /// Floating point (REAL affinity).
    Real,

    /// Free text.
    Text,

    /// Raw bytes.
    Blob,

    /// Stored as 0/1 (NUMERIC affinity).
    Boolean,

    /// Partial or full ISO date text (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`).
    Date,

    /// ISO date-time text, stored in UTC.
    Datetime,
}

impl DataType {
    /// Parse a declared type name as reported by `PRAGMA table_info`.
    ///
    /// Matching is case-insensitive. Unknown names return `None`; SQLite
    /// itself accepts any type name, so callers must tolerate that.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "integer" | "int" | "bigint" => Some(DataType::Integer),
            "real" | "double" | "float" => Some(DataType::Real),
            "text" | "varchar" | "clob" => Some(DataType::Text),
            "blob" => Some(DataType::Blob),
            "boolean" | "bool" => Some(DataType::Boolean),
            "date" => Some(DataType::Date),
            "datetime" | "timestamp" => Some(DataType::Datetime),
            _ => None,
        }
    }

    /// Returns true if values of this type sort numerically.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Integer | DataType::Real | DataType::Boolean
        )
    }

    /// Returns true if this is a temporal (date/time) type.
    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::Date | DataType::Datetime)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Real => write!(f, "REAL"),
            DataType::Text => write!(f, "TEXT"),
            DataType::Blob => write!(f, "BLOB"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Date => write!(f, "DATE"),
            DataType::Datetime => write!(f, "DATETIME"),
        }
    }
}

/// Column default value.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
    /// `CURRENT_TIMESTAMP`, filled in by the engine at insert time.
    CurrentTimestamp,
}

impl DefaultValue {
    /// Convert to a single token.
    pub fn to_token(&self) -> Token {
        match self {
            DefaultValue::Integer(n) => Token::LitInt(*n),
            DefaultValue::Real(f) => Token::LitFloat(*f),
            DefaultValue::Text(s) => Token::LitString(s.clone()),
            DefaultValue::Boolean(b) => Token::LitInt(i64::from(*b)),
            DefaultValue::CurrentTimestamp => Token::Raw("CURRENT_TIMESTAMP".into()),
        }
    }
}

impl From<i64> for DefaultValue {
    fn from(n: i64) -> Self {
        DefaultValue::Integer(n)
    }
}

impl From<f64> for DefaultValue {
    fn from(f: f64) -> Self {
        DefaultValue::Real(f)
    }
}

impl From<bool> for DefaultValue {
    fn from(b: bool) -> Self {
        DefaultValue::Boolean(b)
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        DefaultValue::Text(s.to_string())
    }
}
