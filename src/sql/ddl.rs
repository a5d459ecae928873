//! DDL (Data Definition Language) support.
//!
//! Builders for the statements the schema layer emits: CREATE TABLE in its
//! three flavours (standard, temporary, full-text virtual), CREATE INDEX,
//! ALTER TABLE ... ADD and DROP TABLE.
//!
//! # Examples
//!
//! ```ignore
//! use booklist::sql::ddl::{CreateTable, ColumnDef, DataType, TableConstraint};
//!
//! let table = CreateTable::new("book_author")
//!     .column(ColumnDef::new("book", DataType::Integer).not_null())
//!     .column(ColumnDef::new("author", DataType::Integer).not_null())
//!     .constraint(TableConstraint::primary_key(["book", "author"]));
//!
//! assert_eq!(
//!     table.to_sql(),
//!     "CREATE TABLE book_author (book INTEGER NOT NULL, author INTEGER NOT NULL, PRIMARY KEY (book,author))"
//! );
//! ```

use super::token::{Token, TokenStream};
use super::types::DefaultValue;

pub use super::types::DataType;

/// Module used for full-text virtual tables.
pub const FULL_TEXT_MODULE: &str = "fts4";

/// Physical flavour of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableKind {
    /// Regular table in the main catalog.
    #[default]
    Standard,
    /// Connection-scoped table in the temp catalog.
    Temporary,
    /// Full-text virtual table; columns are untyped and unconstrained.
    FullText,
}

// ============================================================================
// CREATE TABLE
// ============================================================================

/// CREATE TABLE statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct CreateTable {
    pub kind: TableKind,
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
}

impl CreateTable {
    /// Create a new CREATE TABLE statement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: TableKind::Standard,
            name: name.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Set the table flavour.
    pub fn kind(mut self, kind: TableKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a column definition.
    pub fn column(mut self, col: ColumnDef) -> Self {
        self.columns.push(col);
        self
    }

    /// Add a table constraint.
    ///
    /// Constraints are ignored for full-text tables.
    pub fn constraint(mut self, constraint: TableConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Create).space();
        match self.kind {
            TableKind::Standard => {}
            TableKind::Temporary => {
                ts.push(Token::Temporary).space();
            }
            TableKind::FullText => {
                ts.push(Token::Virtual).space();
            }
        }
        ts.push(Token::Table)
            .space()
            .push(Token::Ident(self.name.clone()));

        if self.kind == TableKind::FullText {
            ts.space()
                .push(Token::Using)
                .space()
                .push(Token::Raw(FULL_TEXT_MODULE.into()));
        }

        ts.space().lparen();

        let mut first = true;
        for col in &self.columns {
            if !first {
                ts.comma().space();
            }
            first = false;
            if self.kind == TableKind::FullText {
                ts.push(Token::Ident(col.name.clone()));
            } else {
                ts.append(&col.to_tokens());
            }
        }

        if self.kind != TableKind::FullText {
            for constraint in &self.constraints {
                if !first {
                    ts.comma().space();
                }
                first = false;
                ts.append(&constraint.to_tokens());
            }
        }

        ts.rparen();
        ts
    }
}

// ============================================================================
// Column Definition
// ============================================================================

/// Column definition for CREATE TABLE and ALTER TABLE ... ADD.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    pub not_null: bool,
    pub default: Option<DefaultValue>,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDef {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            not_null: false,
            default: None,
            constraints: Vec::new(),
        }
    }

    /// Mark column as NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set default value.
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Add PRIMARY KEY constraint.
    ///
    /// Integer keys are rendered `AUTOINCREMENT` so row ids are never reused.
    pub fn primary_key(mut self) -> Self {
        let autoincrement = self.data_type == DataType::Integer;
        self.constraints
            .push(ColumnConstraint::PrimaryKey { autoincrement });
        self
    }

    /// Add REFERENCES constraint.
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.constraints.push(ColumnConstraint::References {
            table: table.into(),
            column: column.into(),
        });
        self
    }

    /// Whether this column declares itself the primary key.
    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, ColumnConstraint::PrimaryKey { .. }))
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Ident(self.name.clone()))
            .space()
            .push(Token::Raw(self.data_type.to_string()));

        if self.not_null {
            ts.space().push(Token::Not).space().push(Token::Null);
        }

        if let Some(ref value) = self.default {
            ts.space()
                .push(Token::Default)
                .space()
                .push(value.to_token());
        }

        for constraint in &self.constraints {
            match constraint {
                ColumnConstraint::PrimaryKey { autoincrement } => {
                    ts.space().push(Token::Primary).space().push(Token::Key);
                    if *autoincrement {
                        ts.space().push(Token::Autoincrement);
                    }
                }
                ColumnConstraint::References { table, column } => {
                    ts.space()
                        .push(Token::References)
                        .space()
                        .push(Token::Ident(table.clone()))
                        .lparen()
                        .push(Token::Ident(column.clone()))
                        .rparen();
                }
            }
        }

        ts
    }
}

/// Column-level constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey { autoincrement: bool },
    References { table: String, column: String },
}

// ============================================================================
// Table Constraints
// ============================================================================

/// Table-level constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableConstraint {
    PrimaryKey {
        columns: Vec<String>,
    },
    ForeignKey {
        columns: Vec<String>,
        references_table: String,
        references_columns: Vec<String>,
    },
}

impl TableConstraint {
    /// Create a PRIMARY KEY constraint.
    pub fn primary_key(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        TableConstraint::PrimaryKey {
            columns: columns.into_iter().map(|c| c.into()).collect(),
        }
    }

    /// Create a FOREIGN KEY constraint.
    pub fn foreign_key(
        columns: impl IntoIterator<Item = impl Into<String>>,
        references_table: impl Into<String>,
        references_columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        TableConstraint::ForeignKey {
            columns: columns.into_iter().map(|c| c.into()).collect(),
            references_table: references_table.into(),
            references_columns: references_columns.into_iter().map(|c| c.into()).collect(),
        }
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            TableConstraint::PrimaryKey { columns } => {
                ts.push(Token::Primary).space().push(Token::Key).space();
                emit_column_list(&mut ts, columns);
            }
            TableConstraint::ForeignKey {
                columns,
                references_table,
                references_columns,
            } => {
                ts.push(Token::Foreign).space().push(Token::Key).space();
                emit_column_list(&mut ts, columns);
                ts.space()
                    .push(Token::References)
                    .space()
                    .push(Token::Ident(references_table.clone()));
                emit_column_list(&mut ts, references_columns);
            }
        }

        ts
    }
}

// ============================================================================
// ALTER TABLE ... ADD
// ============================================================================

/// `ALTER TABLE <name> ADD <col-def>`.
///
/// SQLite accepts a single column per statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct AlterTableAdd {
    pub name: String,
    pub column: ColumnDef,
}

impl AlterTableAdd {
    /// Create a new ALTER TABLE ... ADD statement.
    pub fn new(name: impl Into<String>, column: ColumnDef) -> Self {
        Self {
            name: name.into(),
            column,
        }
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Alter)
            .space()
            .push(Token::Table)
            .space()
            .push(Token::Ident(self.name.clone()))
            .space()
            .push(Token::Add)
            .space()
            .append(&self.column.to_tokens());
        ts
    }
}

// ============================================================================
// DROP TABLE
// ============================================================================

/// DROP TABLE statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct DropTable {
    pub if_exists: bool,
    pub name: String,
}

impl DropTable {
    /// Create a new DROP TABLE statement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            if_exists: false,
            name: name.into(),
        }
    }

    /// Add IF EXISTS clause.
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Drop).space().push(Token::Table);
        if self.if_exists {
            ts.space().push(Token::If).space().push(Token::Exists);
        }
        ts.space().push(Token::Ident(self.name.clone()));

        ts
    }
}

// ============================================================================
// CREATE INDEX
// ============================================================================

/// CREATE INDEX statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct CreateIndex {
    pub unique: bool,
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
}

impl CreateIndex {
    /// Create a new CREATE INDEX statement.
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            unique: false,
            name: name.into(),
            table: table.into(),
            columns: Vec::new(),
        }
    }

    /// Make this a unique index.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Add multiple columns to the index.
    pub fn columns(mut self, cols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns.extend(cols.into_iter().map(|c| c.into()));
        self
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Create);
        if self.unique {
            ts.space().push(Token::Unique);
        }
        ts.space()
            .push(Token::Index)
            .space()
            .push(Token::Ident(self.name.clone()))
            .space()
            .push(Token::On)
            .space()
            .push(Token::Ident(self.table.clone()));
        emit_column_list(&mut ts, &self.columns);

        ts
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// `(a,b,c)` - no padding, matching the `REFERENCES parent(pk1,pk2)` shape.
pub(crate) fn emit_column_list(ts: &mut TokenStream, columns: &[String]) {
    ts.lparen();
    let mut first = true;
    for col in columns {
        if !first {
            ts.comma();
        }
        first = false;
        ts.push(Token::Ident(col.clone()));
    }
    ts.rparen();
}

// ============================================================================
// Tests
// ============================================================================
