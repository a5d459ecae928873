//! DML (Data Manipulation Language) support.
//!
//! Only the statement shape the schema layer needs for migrations:
//! `INSERT INTO dest (cols) SELECT cols FROM src`, which copies rows between
//! two tables by column *name* rather than by position.
//!
//! # Examples
//!
//! ```ignore
//! use booklist::sql::dml::InsertSelect;
//!
//! let copy = InsertSelect::new("books_new", "books")
//!     .column("title", "title")
//!     .column("isbn", "isbn_13");
//!
//! assert_eq!(
//!     copy.to_sql(),
//!     "INSERT INTO books_new (title,isbn_13) SELECT title,isbn FROM books"
//! );
//! ```

use super::ddl::emit_column_list;
use super::token::{Token, TokenStream};

/// `INSERT INTO <dest> (<cols>) SELECT <cols> FROM <src>`.
#[derive(Debug, Clone)]
#[must_use = "DML statements have no effect until converted to SQL with to_sql()"]
pub struct InsertSelect {
    pub into: String,
    pub from: String,
    /// `(source column, destination column)` pairs, in copy order.
    pub columns: Vec<(String, String)>,
}

impl InsertSelect {
    /// Create a new copy statement from `from` into `into`.
    pub fn new(into: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            into: into.into(),
            from: from.into(),
            columns: Vec::new(),
        }
    }

    /// Copy `source` into `destination`.
    pub fn column(mut self, source: impl Into<String>, destination: impl Into<String>) -> Self {
        self.columns.push((source.into(), destination.into()));
        self
    }

    /// Whether no column would be copied.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        let destination: Vec<String> = self.columns.iter().map(|(_, d)| d.clone()).collect();

        ts.push(Token::Insert)
            .space()
            .push(Token::Into)
            .space()
            .push(Token::Ident(self.into.clone()))
            .space();
        emit_column_list(&mut ts, &destination);

        ts.space().push(Token::Select).space();
        let mut first = true;
        for (source, _) in &self.columns {
            if !first {
                ts.comma();
            }
            first = false;
            ts.push(Token::Ident(source.clone()));
        }

        ts.space()
            .push(Token::From)
            .space()
            .push(Token::Ident(self.from.clone()));

        ts
    }
}
