//! Column descriptors.
//!
//! A [`Domain`] is a typed, named column that can be placed in any number of
//! tables. Domains are shared as [`DomainRef`] (`Arc<Domain>`): the *same*
//! domain appearing in several tables is the same allocation, and a table
//! uses pointer identity to tell "added twice" apart from "name clash".
//!
//! A [`DomainExpression`] binds a domain to the SQL expression that fills it
//! and to a sort direction.

use std::fmt;
use std::sync::Arc;

use crate::sql::ddl::ColumnDef;
use crate::sql::types::{DataType, DefaultValue};

/// Shared handle to a [`Domain`].
pub type DomainRef = Arc<Domain>;

/// A typed, named column descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    name: String,
    data_type: DataType,
    not_null: bool,
    primary_key: bool,
    default: Option<DefaultValue>,
    references: Option<(String, String)>,
}

impl Domain {
    /// Create a nullable, non-key domain.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            not_null: false,
            primary_key: false,
            default: None,
            references: None,
        }
    }

    /// Mark as the row id. Implies NOT NULL.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    /// Mark as NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Column-level `REFERENCES table(column)`, rendered with constraints.
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.references = Some((table.into(), column.into()));
        self
    }

    /// Finish building and share.
    pub fn build(self) -> DomainRef {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Column definition for CREATE TABLE / ALTER TABLE.
    ///
    /// Without constraints only `name TYPE` is emitted, which is what
    /// temporary and derived tables use. A key column keeps its
    /// `PRIMARY KEY` either way: it is the row id, not a check.
    pub fn column_def(&self, with_constraints: bool) -> ColumnDef {
        let mut col = ColumnDef::new(self.name.clone(), self.data_type);
        if !with_constraints {
            if self.primary_key {
                col = col.primary_key();
            }
            return col;
        }

        if self.not_null {
            col = col.not_null();
        }
        if let Some(ref value) = self.default {
            col = col.default(value.clone());
        }
        if self.primary_key {
            col = col.primary_key();
        }
        if let Some((ref table, ref column)) = self.references {
            col = col.references(table.clone(), column.clone());
        }
        col
    }

    /// Rendered column definition.
    pub fn definition(&self, with_constraints: bool) -> String {
        self.column_def(with_constraints).to_sql()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Sort direction of a [`DomainExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sort {
    Ascending,
    Descending,
    #[default]
    Unsorted,
}

impl Sort {
    /// `ASC` / `DESC`, or `None` when the column takes no part in ordering.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Sort::Ascending => Some("ASC"),
            Sort::Descending => Some("DESC"),
            Sort::Unsorted => None,
        }
    }
}

/// A domain bound to the SQL expression that computes it.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainExpression {
    domain: DomainRef,
    expression: Option<String>,
    sort: Sort,
}

impl DomainExpression {
    /// Bind `domain` to `expression`.
    pub fn new(domain: &DomainRef, expression: impl Into<String>, sort: Sort) -> Self {
        Self {
            domain: Arc::clone(domain),
            expression: Some(expression.into()),
            sort,
        }
    }

    /// Use the domain's own column name as the expression.
    pub fn column(domain: &DomainRef, sort: Sort) -> Self {
        Self {
            domain: Arc::clone(domain),
            expression: None,
            sort,
        }
    }

    pub fn domain(&self) -> &DomainRef {
        &self.domain
    }

    /// The source expression, falling back to the domain name.
    pub fn expression(&self) -> &str {
        self.expression.as_deref().unwrap_or(self.domain.name())
    }

    /// Whether an explicit source expression was given.
    pub fn has_expression(&self) -> bool {
        self.expression.is_some()
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// `<domain> ASC|DESC` for the ORDER BY of a derived table, where the
    /// value has already been materialized under the domain name.
    pub fn order_by_term(&self) -> Option<String> {
        self.sort
            .keyword()
            .map(|kw| format!("{} {}", self.domain.name(), kw))
    }
}
