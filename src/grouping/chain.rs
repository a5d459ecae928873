//! Ordered chain of grouping levels.
//!
//! A [`GroupChain`] holds the levels of one style, outermost first, and keeps
//! every level's accumulated domains current across edits. From it come the
//! node-key expressions, the derived booklist table and the statement that
//! fills it with book rows.

use std::sync::Arc;

use tracing::debug;

use super::domains::{BLG_LEVEL, BLG_NODE_KEY};
use super::group::{accumulate_domains, BooklistGroup};
use super::kind::GroupKind;
use super::options::GroupOptions;
use crate::config::StyleSettings;
use crate::schema::catalog::{ReferenceSchema, SourceTable, DOM_FK_BOOK, DOM_PK_ID};
use crate::schema::domain::DomainExpression;
use crate::schema::engine::{EngineResult, SqlEngine};
use crate::schema::table::TableDefinition;
use crate::sql::ddl::TableKind;

/// Alias of the derived booklist table.
pub const BOOKLIST_ALIAS: &str = "bl";

/// Chain edit and construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("unknown group kind id {0}")]
    UnknownKind(u8),

    #[error("book rows are always the innermost level and cannot be grouped on")]
    BookKind,

    #[error("{0} is already in the chain")]
    DuplicateKind(GroupKind),

    #[error("level {index} is out of range for a chain of {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("unknown style option '{0}'")]
    UnknownOption(String),
}

pub type ChainResult<T> = Result<T, ChainError>;

/// The active levels of a style, outermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupChain {
    groups: Vec<BooklistGroup>,
    book: BooklistGroup,
}

impl Default for GroupChain {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupChain {
    /// An empty chain: book rows only.
    ///
    /// # Panics
    ///
    /// Panics if the registry has not been initialized.
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            book: BooklistGroup::new(GroupKind::Book),
        }
    }

    /// Build from persisted kind ids, outermost first.
    pub fn from_ids(ids: &[u8], options: &GroupOptions) -> ChainResult<Self> {
        let mut chain = Self::new();
        for &id in ids {
            let group = BooklistGroup::from_id(id, options).ok_or(ChainError::UnknownKind(id))?;
            chain.push(group)?;
        }
        Ok(chain)
    }

    /// Build from the `[style]` section of the settings.
    pub fn from_style(style: &StyleSettings) -> ChainResult<Self> {
        let options =
            GroupOptions::from_persisted(&style.options).map_err(ChainError::UnknownOption)?;
        Self::from_ids(&style.groups, &options)
    }

    pub fn groups(&self) -> &[BooklistGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&BooklistGroup> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn kinds(&self) -> Vec<GroupKind> {
        self.groups.iter().map(BooklistGroup::kind).collect()
    }

    /// Depth of the book rows.
    pub fn book_level(&self) -> usize {
        self.groups.len() + 1
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Append an innermost level.
    pub fn push(&mut self, group: BooklistGroup) -> ChainResult<()> {
        self.insert(self.groups.len(), group)
    }

    pub fn insert(&mut self, index: usize, group: BooklistGroup) -> ChainResult<()> {
        self.check_insertable(&group)?;
        self.check_index(index, self.groups.len() + 1)?;
        self.groups.insert(index, group);
        self.recompute();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> ChainResult<BooklistGroup> {
        self.check_index(index, self.groups.len())?;
        let mut group = self.groups.remove(index);
        group.clear_accumulated_domains();
        self.recompute();
        Ok(group)
    }

    /// Move the level at `from` so that it ends up at `to`.
    pub fn move_group(&mut self, from: usize, to: usize) -> ChainResult<()> {
        self.check_index(from, self.groups.len())?;
        self.check_index(to, self.groups.len())?;
        let group = self.groups.remove(from);
        self.groups.insert(to, group);
        self.recompute();
        Ok(())
    }

    fn check_insertable(&self, group: &BooklistGroup) -> ChainResult<()> {
        if group.kind() == GroupKind::Book {
            return Err(ChainError::BookKind);
        }
        if self.groups.iter().any(|g| g.kind() == group.kind()) {
            return Err(ChainError::DuplicateKind(group.kind()));
        }
        Ok(())
    }

    /// `index` must be below `bound`.
    fn check_index(&self, index: usize, bound: usize) -> ChainResult<()> {
        if index >= bound {
            return Err(ChainError::OutOfRange {
                index,
                len: self.groups.len(),
            });
        }
        Ok(())
    }

    fn recompute(&mut self) {
        accumulate_domains(&mut self.groups);
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Node key of a book row: every level's segment, outermost first.
    pub fn node_key_expression(&self) -> String {
        self.node_key_of(self.groups.len())
    }

    /// Node key of a row at `level`: the segments of the `level` outermost
    /// groups. Level 0 is the root and has the empty key.
    pub fn node_key_expression_at(&self, level: usize) -> ChainResult<String> {
        if level > self.groups.len() {
            return Err(ChainError::OutOfRange {
                index: level,
                len: self.groups.len(),
            });
        }
        Ok(self.node_key_of(level))
    }

    fn node_key_of(&self, level: usize) -> String {
        if level == 0 {
            return "''".to_string();
        }
        self.groups[..level]
            .iter()
            .map(BooklistGroup::node_key_expression)
            .collect::<Vec<_>>()
            .join("||")
    }

    /// Columns carried by book rows: the innermost accumulated domains,
    /// every level's base domains, then the book key.
    pub fn leaf_domains(&self) -> Vec<DomainExpression> {
        let mut domains: Vec<DomainExpression> = self
            .groups
            .last()
            .map(|g| g.accumulated_domains().to_vec())
            .unwrap_or_default();

        let base = self
            .groups
            .iter()
            .flat_map(|g| g.base_domain_expressions().iter())
            .chain(std::iter::once(self.book.key_domain()));
        for expression in base {
            let name = expression.domain().name();
            if !domains.iter().any(|e| e.domain().name() == name) {
                domains.push(expression.clone());
            }
        }
        domains
    }

    /// `ORDER BY` terms over the booklist columns.
    pub fn order_by_terms(&self) -> Vec<String> {
        self.leaf_domains()
            .iter()
            .filter_map(DomainExpression::order_by_term)
            .collect()
    }

    /// Row filters contributed by `ShowAll*` options that are off.
    pub fn filters(&self) -> Vec<&'static str> {
        self.groups.iter().flat_map(|g| g.filters()).collect()
    }

    // =========================================================================
    // Derived table
    // =========================================================================

    /// Temporary table holding one row per book and level path.
    pub fn booklist_table(&self, name: &str) -> Arc<TableDefinition> {
        let table = TableDefinition::new(name, BOOKLIST_ALIAS)
            .with_kind(TableKind::Temporary)
            .build();
        table.add_domains(&[
            DOM_PK_ID.clone(),
            BLG_NODE_KEY.clone(),
            BLG_LEVEL.clone(),
            DOM_FK_BOOK.clone(),
        ]);
        for expression in self.leaf_domains() {
            table.add_domain(expression.domain());
        }
        table.set_primary_key(&[DOM_PK_ID.clone()]);
        table.add_index("NODE_KEY", false, &[BLG_NODE_KEY.clone()]);
        table
    }

    /// `books AS b LEFT OUTER JOIN ...` covering every table the levels read.
    pub fn from_clause(&self, schema: &ReferenceSchema) -> String {
        let mut joined = vec![SourceTable::Books];
        let mut sql = schema.books.table_ref();
        for group in &self.groups {
            for &(from, to) in group.joins() {
                if joined.contains(&to) {
                    continue;
                }
                sql.push_str(&schema.table(from).left_outer_join(schema.table(to)));
                joined.push(to);
            }
        }
        sql
    }

    /// `INSERT INTO <table> (...) SELECT ...` producing the book rows in
    /// display order.
    pub fn populate_statement(&self, schema: &ReferenceSchema, table: &TableDefinition) -> String {
        let leaf = self.leaf_domains();

        let mut columns = vec![
            BLG_NODE_KEY.name().to_string(),
            BLG_LEVEL.name().to_string(),
            DOM_FK_BOOK.name().to_string(),
        ];
        let mut select = vec![
            format!("{} AS {}", self.node_key_expression(), BLG_NODE_KEY.name()),
            format!("{} AS {}", self.book_level(), BLG_LEVEL.name()),
            format!("{} AS {}", schema.books.dot_domain(&DOM_PK_ID), DOM_FK_BOOK.name()),
        ];
        for expression in &leaf {
            let name = expression.domain().name();
            columns.push(name.to_string());
            select.push(format!("{} AS {}", expression.expression(), name));
        }

        let mut sql = format!(
            "INSERT INTO {} ({}) SELECT {} FROM {}",
            table.name(),
            columns.join(","),
            select.join(","),
            self.from_clause(schema)
        );
        let filters = self.filters();
        if !filters.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&filters.join(" AND "));
        }
        let order = self.order_by_terms();
        if !order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(","));
        }
        sql
    }

    /// Recreate the booklist table and fill it.
    pub fn materialize(
        &self,
        engine: &dyn SqlEngine,
        schema: &ReferenceSchema,
        name: &str,
    ) -> EngineResult<Arc<TableDefinition>> {
        let table = self.booklist_table(name);
        table.recreate(engine, false)?;
        engine.execute(&self.populate_statement(schema, &table))?;
        debug!(table = name, levels = self.groups.len(), "booklist materialized");
        Ok(table)
    }
}
