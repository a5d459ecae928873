//! In-memory model of a physical or temporary table.
//!
//! A [`TableDefinition`] owns an ordered domain list, a primary key, named
//! indexes and foreign-key links to other tables. Links are symmetric: a
//! child's parent-link and the parent's child-link are one shared
//! [`ForeignKey`] and are always added and removed together.
//!
//! Tables are shared as `Arc<TableDefinition>` and mutated through `&self`
//! during the definition phase, because linking two tables mutates both.
//!
//! # Panics
//!
//! Structural misuse is a programming error and panics: a domain name clash,
//! a duplicate index suffix, a second link between the same pair of tables,
//! a foreign key whose arity does not match the parent key, or a join between
//! two tables that were never linked.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use super::domain::DomainRef;
use super::engine::{EngineResult, SqlEngine, TableInfo};
use crate::sql::ddl::{
    AlterTableAdd, CreateIndex, CreateTable, DropTable, TableConstraint, TableKind,
};
use crate::sql::dml::InsertSelect;
use crate::sql::token::{Token, TokenStream};

/// How [`TableDefinition::join`] links the right-hand table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    LeftOuter,
}

/// A named index on one table.
#[derive(Debug, Clone)]
pub struct IndexDefinition {
    name: String,
    table: String,
    unique: bool,
    domains: Vec<DomainRef>,
}

impl IndexDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn domains(&self) -> &[DomainRef] {
        &self.domains
    }

    pub fn create_statement(&self) -> String {
        let mut index = CreateIndex::new(self.name.clone(), self.table.clone())
            .columns(self.domains.iter().map(|d| d.name().to_string()));
        if self.unique {
            index = index.unique();
        }
        index.to_sql()
    }
}

/// A registered link from a child table to its parent.
///
/// Child domains pair up positionally with `parent_domains`, which is either
/// the parent's primary key or a single explicitly named parent column.
#[derive(Debug)]
pub struct ForeignKey {
    parent: Weak<TableDefinition>,
    parent_name: String,
    child: Weak<TableDefinition>,
    child_name: String,
    domains: Vec<DomainRef>,
    parent_domains: Vec<DomainRef>,
}

impl ForeignKey {
    /// Link `child.domains` to `parent.parent_domains`.
    ///
    /// # Panics
    ///
    /// Panics if the column lists are empty or differ in length.
    pub fn new(
        parent: &Arc<TableDefinition>,
        child: &Arc<TableDefinition>,
        domains: &[DomainRef],
        parent_domains: &[DomainRef],
    ) -> Self {
        assert!(
            !domains.is_empty(),
            "foreign key {} -> {} has no columns",
            child.name,
            parent.name
        );
        assert_eq!(
            domains.len(),
            parent_domains.len(),
            "foreign key {} -> {}: {} child column(s) for {} parent key column(s)",
            child.name,
            parent.name,
            domains.len(),
            parent_domains.len()
        );
        Self {
            parent: Arc::downgrade(parent),
            parent_name: parent.name.clone(),
            child: Arc::downgrade(child),
            child_name: child.name.clone(),
            domains: domains.to_vec(),
            parent_domains: parent_domains.to_vec(),
        }
    }

    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    pub fn child_name(&self) -> &str {
        &self.child_name
    }

    pub fn domains(&self) -> &[DomainRef] {
        &self.domains
    }

    pub fn parent_domains(&self) -> &[DomainRef] {
        &self.parent_domains
    }

    /// `FOREIGN KEY (..) REFERENCES parent(..)`.
    pub fn constraint(&self) -> TableConstraint {
        TableConstraint::foreign_key(
            self.domains.iter().map(|d| d.name().to_string()),
            self.parent_name.clone(),
            self.parent_domains.iter().map(|d| d.name().to_string()),
        )
    }

    /// `parent.pk1=child.fk1[ AND parent.pk2=child.fk2 ...]`.
    fn predicate(&self, parent: &TableDefinition, child: &TableDefinition) -> String {
        let mut ts = TokenStream::new();
        for (i, (pk, fk)) in self.parent_domains.iter().zip(&self.domains).enumerate() {
            if i > 0 {
                ts.space().push(Token::And).space();
            }
            ts.push(parent.qualified(pk.name()))
                .push(Token::Eq)
                .push(child.qualified(fk.name()));
        }
        ts.serialize()
    }
}

#[derive(Debug, Default)]
struct TableState {
    domains: Vec<DomainRef>,
    primary_key: Vec<DomainRef>,
    indexes: Vec<IndexDefinition>,
    /// Links this table owns (it is the child).
    parents: Vec<Arc<ForeignKey>>,
    /// Links referencing this table (it is the parent).
    children: Vec<Arc<ForeignKey>>,
}

/// Same domain instances, in the same order.
fn same_domains(a: &[DomainRef], b: &[DomainRef]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
}

/// Definition of one table.
#[derive(Debug)]
pub struct TableDefinition {
    name: String,
    alias: String,
    kind: TableKind,
    state: RwLock<TableState>,
    table_info: Mutex<Option<Arc<TableInfo>>>,
}

impl TableDefinition {
    /// A standard table.
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
            kind: TableKind::Standard,
            state: RwLock::new(TableState::default()),
            table_info: Mutex::new(None),
        }
    }

    /// Change the table flavour.
    pub fn with_kind(mut self, kind: TableKind) -> Self {
        self.kind = kind;
        self
    }

    /// Share the definition so it can be linked to other tables.
    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    // =========================================================================
    // Definition phase
    // =========================================================================

    /// Add a domain.
    ///
    /// Returns `false` if this very domain is already present.
    ///
    /// # Panics
    ///
    /// Panics if a *different* domain with the same name is present.
    pub fn add_domain(&self, domain: &DomainRef) -> bool {
        let mut state = self.state.write();
        if let Some(existing) = state.domains.iter().find(|d| d.name() == domain.name()) {
            if Arc::ptr_eq(existing, domain) {
                return false;
            }
            panic!(
                "table {}: domain name '{}' is already used by a different domain",
                self.name,
                domain.name()
            );
        }
        state.domains.push(Arc::clone(domain));
        true
    }

    /// Add several domains; see [`add_domain`](Self::add_domain).
    pub fn add_domains(&self, domains: &[DomainRef]) {
        for domain in domains {
            self.add_domain(domain);
        }
    }

    /// Replace the declared primary key.
    ///
    /// # Panics
    ///
    /// Panics if the key changes while a child references it: the child's
    /// columns were paired with the old key columns by position.
    pub fn set_primary_key(&self, domains: &[DomainRef]) {
        let mut state = self.state.write();
        if !same_domains(&state.primary_key, domains) {
            let old_key = &state.primary_key;
            if let Some(fk) = state
                .children
                .iter()
                .find(|fk| same_domains(&fk.parent_domains, old_key))
            {
                panic!(
                    "primary key of '{}' changed while '{}' references it",
                    self.name, fk.child_name
                );
            }
        }
        state.primary_key = domains.to_vec();
    }

    /// Register a foreign key from this table to `parent`'s primary key.
    ///
    /// `domains` are this table's columns, in the same order as the parent's
    /// primary key columns. Returns the shared link.
    ///
    /// # Panics
    ///
    /// Panics if the column count differs from the parent's key, or if a link
    /// to `parent` already exists.
    pub fn add_reference(
        self: &Arc<Self>,
        parent: &Arc<TableDefinition>,
        domains: &[DomainRef],
    ) -> Arc<ForeignKey> {
        let parent_key = parent.primary_key();
        self.add_foreign_key(ForeignKey::new(parent, self, domains, &parent_key))
    }

    /// Register a single-column foreign key to an arbitrary parent column.
    pub fn add_reference_to_domain(
        self: &Arc<Self>,
        parent: &Arc<TableDefinition>,
        domain: &DomainRef,
        parent_domain: &DomainRef,
    ) -> Arc<ForeignKey> {
        self.add_foreign_key(ForeignKey::new(
            parent,
            self,
            std::slice::from_ref(domain),
            std::slice::from_ref(parent_domain),
        ))
    }

    /// Register a pre-built link on both sides.
    ///
    /// # Panics
    ///
    /// Panics if `fk` was built for a different child table, if its parent no
    /// longer exists, or if the pair is already linked.
    pub fn add_foreign_key(self: &Arc<Self>, fk: ForeignKey) -> Arc<ForeignKey> {
        assert!(
            Weak::ptr_eq(&fk.child, &Arc::downgrade(self)),
            "foreign key for child '{}' added to table '{}'",
            fk.child_name,
            self.name
        );
        let parent = fk
            .parent
            .upgrade()
            .unwrap_or_else(|| panic!("parent table '{}' has been dropped", fk.parent_name));

        let fk = Arc::new(fk);
        {
            let mut state = self.state.write();
            assert!(
                !state.parents.iter().any(|p| p.parent_name == fk.parent_name),
                "table {} already references {}",
                self.name,
                fk.parent_name
            );
            state.parents.push(Arc::clone(&fk));
        }
        parent.state.write().children.push(Arc::clone(&fk));
        fk
    }

    /// Remove the link to `parent` from both sides.
    ///
    /// Returns `false` if there was no such link.
    pub fn remove_reference(&self, parent: &TableDefinition) -> bool {
        let removed = {
            let mut state = self.state.write();
            let before = state.parents.len();
            state.parents.retain(|fk| fk.parent_name != parent.name);
            before != state.parents.len()
        };
        if removed {
            parent
                .state
                .write()
                .children
                .retain(|fk| fk.child_name != self.name);
        }
        removed
    }

    /// Register index `<table>_IDX_<suffix>`.
    ///
    /// # Panics
    ///
    /// Panics if the suffix is already used on this table.
    pub fn add_index(&self, suffix: &str, unique: bool, domains: &[DomainRef]) {
        let name = format!("{}_IDX_{}", self.name, suffix);
        let mut state = self.state.write();
        assert!(
            !state.indexes.iter().any(|i| i.name == name),
            "table {}: duplicate index suffix '{}'",
            self.name,
            suffix
        );
        state.indexes.push(IndexDefinition {
            name,
            table: self.name.clone(),
            unique,
            domains: domains.to_vec(),
        });
    }

    /// Drop every link (on both sides), domain, key and index so the
    /// definition can be reused for a fresh table.
    pub fn clear(&self) {
        let (parents, children) = {
            let mut state = self.state.write();
            state.domains.clear();
            state.primary_key.clear();
            state.indexes.clear();
            (
                std::mem::take(&mut state.parents),
                std::mem::take(&mut state.children),
            )
        };

        for fk in parents {
            if let Some(parent) = fk.parent.upgrade() {
                parent
                    .state
                    .write()
                    .children
                    .retain(|c| c.child_name != self.name);
            }
        }
        for fk in children {
            if let Some(child) = fk.child.upgrade() {
                child
                    .state
                    .write()
                    .parents
                    .retain(|p| p.parent_name != self.name);
            }
        }

        *self.table_info.lock() = None;
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn domains(&self) -> Vec<DomainRef> {
        self.state.read().domains.clone()
    }

    pub fn domain(&self, name: &str) -> Option<DomainRef> {
        self.state
            .read()
            .domains
            .iter()
            .find(|d| d.name() == name)
            .cloned()
    }

    pub fn contains_domain(&self, domain: &DomainRef) -> bool {
        self.state
            .read()
            .domains
            .iter()
            .any(|d| Arc::ptr_eq(d, domain))
    }

    pub fn primary_key(&self) -> Vec<DomainRef> {
        self.state.read().primary_key.clone()
    }

    pub fn indexes(&self) -> Vec<IndexDefinition> {
        self.state.read().indexes.clone()
    }

    /// Names of the tables this table references.
    pub fn parent_names(&self) -> Vec<String> {
        self.state
            .read()
            .parents
            .iter()
            .map(|fk| fk.parent_name.clone())
            .collect()
    }

    /// Names of the tables referencing this table.
    pub fn child_names(&self) -> Vec<String> {
        self.state
            .read()
            .children
            .iter()
            .map(|fk| fk.child_name.clone())
            .collect()
    }

    pub fn has_parent(&self, parent: &TableDefinition) -> bool {
        self.state
            .read()
            .parents
            .iter()
            .any(|fk| fk.parent_name == parent.name)
    }

    pub fn has_child(&self, child: &TableDefinition) -> bool {
        self.state
            .read()
            .children
            .iter()
            .any(|fk| fk.child_name == child.name)
    }

    // =========================================================================
    // SQL fragments
    // =========================================================================

    fn qualified(&self, name: &str) -> Token {
        Token::QualifiedIdent {
            qualifier: self.alias.clone(),
            name: name.to_string(),
        }
    }

    /// `alias.name`
    pub fn dot(&self, name: &str) -> String {
        self.qualified(name).serialize()
    }

    /// `alias.<domain name>`
    pub fn dot_domain(&self, domain: &DomainRef) -> String {
        self.dot(domain.name())
    }

    /// `alias.a AS a,alias.b AS b`
    ///
    /// The explicit `AS` keeps result column names stable under aliasing.
    pub fn dot_as(&self, names: &[&str]) -> String {
        let mut ts = TokenStream::new();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                ts.comma();
            }
            ts.push(self.qualified(name))
                .space()
                .push(Token::As)
                .space()
                .push(Token::Ident(name.to_string()));
        }
        ts.serialize()
    }

    /// `name AS alias`, for FROM clauses.
    pub fn table_ref(&self) -> String {
        let mut ts = TokenStream::new();
        ts.push(Token::Ident(self.name.clone()))
            .space()
            .push(Token::As)
            .space()
            .push(Token::Ident(self.alias.clone()));
        ts.serialize()
    }

    /// Join predicate between this table and `to`.
    ///
    /// Looks for `to` as a child first, then as a parent. Composite keys are
    /// matched positionally against the parent key.
    ///
    /// # Panics
    ///
    /// Panics if the two tables are not linked in either direction.
    pub fn fk_match(&self, to: &TableDefinition) -> String {
        let fk = {
            let state = self.state.read();
            state
                .children
                .iter()
                .find(|fk| fk.child_name == to.name)
                .or_else(|| state.parents.iter().find(|fk| fk.parent_name == to.name))
                .cloned()
        };
        let fk = fk.unwrap_or_else(|| {
            panic!(
                "no foreign key between {} and {}",
                self.name, to.name
            )
        });

        if fk.parent_name == self.name {
            fk.predicate(self, to)
        } else {
            fk.predicate(to, self)
        }
    }

    /// ` JOIN to AS t ON (<predicate>)`
    pub fn join(&self, to: &TableDefinition) -> String {
        self.join_with(to, JoinType::Inner)
    }

    /// ` LEFT OUTER JOIN to AS t ON (<predicate>)`
    pub fn left_outer_join(&self, to: &TableDefinition) -> String {
        self.join_with(to, JoinType::LeftOuter)
    }

    pub fn join_with(&self, to: &TableDefinition, join_type: JoinType) -> String {
        let mut ts = TokenStream::new();
        ts.space();
        if join_type == JoinType::LeftOuter {
            ts.push(Token::Left).space().push(Token::Outer).space();
        }
        ts.push(Token::Join)
            .space()
            .push(Token::Raw(to.table_ref()))
            .space()
            .push(Token::On)
            .space()
            .lparen()
            .push(Token::Raw(self.fk_match(to)))
            .rparen();
        ts.serialize()
    }

    /// `self AS s JOIN t1 ... JOIN t2 ...`, each table joined to the one
    /// before it.
    pub fn start_join(&self, tables: &[&TableDefinition]) -> String {
        let mut sql = self.table_ref();
        let mut last = self;
        for &table in tables {
            sql.push_str(&last.join(table));
            last = table;
        }
        sql
    }

    // =========================================================================
    // DDL
    // =========================================================================

    /// CREATE statement for this table.
    ///
    /// A table-level `PRIMARY KEY` is only emitted when no column declared
    /// itself the key. Foreign keys are emitted with constraints only.
    pub fn create_statement(&self, with_constraints: bool) -> String {
        let state = self.state.read();

        let mut create = CreateTable::new(self.name.clone()).kind(self.kind);
        let mut column_key = false;
        for domain in &state.domains {
            column_key |= domain.is_primary_key();
            create = create.column(domain.column_def(with_constraints));
        }

        if !column_key && !state.primary_key.is_empty() {
            create = create.constraint(TableConstraint::primary_key(
                state.primary_key.iter().map(|d| d.name().to_string()),
            ));
        }

        if with_constraints {
            for fk in &state.parents {
                create = create.constraint(fk.constraint());
            }
        }

        create.to_sql()
    }

    /// CREATE INDEX statements, in registration order.
    pub fn index_statements(&self) -> Vec<String> {
        self.state
            .read()
            .indexes
            .iter()
            .map(IndexDefinition::create_statement)
            .collect()
    }

    // =========================================================================
    // Engine operations
    // =========================================================================

    /// Whether the table physically exists, looked up in the catalog that
    /// matches its kind.
    pub fn exists(&self, engine: &dyn SqlEngine) -> EngineResult<bool> {
        let catalog = match self.kind {
            TableKind::Temporary => "sqlite_temp_master",
            TableKind::Standard | TableKind::FullText => "sqlite_master",
        };
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE type='table' AND name=?",
            catalog
        );
        Ok(engine.query_count(&sql, &[self.name.as_str()])? > 0)
    }

    /// Physical column description, queried once and then cached.
    pub fn table_info(&self, engine: &dyn SqlEngine) -> EngineResult<Arc<TableInfo>> {
        let mut cached = self.table_info.lock();
        if let Some(ref info) = *cached {
            return Ok(Arc::clone(info));
        }
        let info = Arc::new(TableInfo::new(
            self.name.clone(),
            engine.column_info(&self.name)?,
        ));
        *cached = Some(Arc::clone(&info));
        Ok(info)
    }

    /// Execute the CREATE statement.
    pub fn create(&self, engine: &dyn SqlEngine, with_constraints: bool) -> EngineResult<()> {
        debug!(table = %self.name, with_constraints, "creating table");
        engine.execute(&self.create_statement(with_constraints))?;
        *self.table_info.lock() = None;
        Ok(())
    }

    /// Execute every CREATE INDEX statement.
    pub fn create_indices(&self, engine: &dyn SqlEngine) -> EngineResult<()> {
        for sql in self.index_statements() {
            engine.execute(&sql)?;
        }
        Ok(())
    }

    /// `DROP TABLE IF EXISTS`.
    pub fn drop(&self, engine: &dyn SqlEngine) -> EngineResult<()> {
        debug!(table = %self.name, "dropping table");
        engine.execute(&DropTable::new(self.name.clone()).if_exists().to_sql())?;
        *self.table_info.lock() = None;
        Ok(())
    }

    /// Drop, create and index the table.
    pub fn recreate(&self, engine: &dyn SqlEngine, with_constraints: bool) -> EngineResult<()> {
        self.drop(engine)?;
        self.create(engine, with_constraints)?;
        self.create_indices(engine)
    }

    /// One `ALTER TABLE <name> ADD <col-def>` per domain.
    pub fn alter_table_add_columns(
        &self,
        engine: &dyn SqlEngine,
        domains: &[DomainRef],
    ) -> EngineResult<()> {
        for domain in domains {
            let sql = AlterTableAdd::new(self.name.clone(), domain.column_def(true)).to_sql();
            engine.execute(&sql)?;
        }
        *self.table_info.lock() = None;
        Ok(())
    }

    /// Copy every row into `destination`, matching columns by name.
    ///
    /// Source columns listed in `to_remove` are skipped; `to_rename` maps a
    /// source column to its new destination name. Column order in either
    /// table is irrelevant.
    pub fn copy_table_safely(
        &self,
        engine: &dyn SqlEngine,
        destination: &TableDefinition,
        to_remove: &[&str],
        to_rename: &[(&str, &str)],
    ) -> EngineResult<()> {
        let info = self.table_info(engine)?;

        let mut copy = InsertSelect::new(destination.name.clone(), self.name.clone());
        for column in info.columns() {
            let name = column.name.as_str();
            if to_remove.iter().any(|r| r.eq_ignore_ascii_case(name)) {
                continue;
            }
            let target = to_rename
                .iter()
                .find(|(from, _)| from.eq_ignore_ascii_case(name))
                .map_or(name, |(_, to)| *to);
            copy = copy.column(name, target);
        }

        debug!(from = %self.name, to = %destination.name, "copying table");
        engine.execute(&copy.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::domain::Domain;
    use crate::sql::types::DataType;

    fn id() -> DomainRef {
        Domain::new("_id", DataType::Integer).primary_key().build()
    }

    #[test]
    fn test_add_domain_identity_rules() {
        let table = TableDefinition::new("books", "b").build();
        let title = Domain::new("title", DataType::Text).build();

        assert!(table.add_domain(&title));
        assert!(!table.add_domain(&title));
        assert!(!table.add_domain(&Arc::clone(&title)));
        assert_eq!(table.domains().len(), 1);
    }

    #[test]
    #[should_panic(expected = "already used by a different domain")]
    fn test_add_domain_name_clash_panics() {
        let table = TableDefinition::new("books", "b").build();
        table.add_domain(&Domain::new("title", DataType::Text).build());
        table.add_domain(&Domain::new("title", DataType::Text).build());
    }

    #[test]
    fn test_reference_is_symmetric() {
        let pk = id();
        let fk = Domain::new("book", DataType::Integer).build();
        let books = TableDefinition::new("books", "b").build();
        books.add_domain(&pk);
        books.set_primary_key(&[Arc::clone(&pk)]);
        let loan = TableDefinition::new("loan", "l").build();
        loan.add_domain(&fk);

        loan.add_reference(&books, &[Arc::clone(&fk)]);
        assert_eq!(loan.parent_names(), vec!["books"]);
        assert_eq!(books.child_names(), vec!["loan"]);

        assert!(loan.remove_reference(&books));
        assert!(loan.parent_names().is_empty());
        assert!(books.child_names().is_empty());
        assert!(!loan.remove_reference(&books));
    }

    #[test]
    #[should_panic(expected = "already references")]
    fn test_second_link_for_same_pair_panics() {
        let pk = id();
        let fk = Domain::new("book", DataType::Integer).build();
        let books = TableDefinition::new("books", "b").build();
        books.set_primary_key(&[Arc::clone(&pk)]);
        let loan = TableDefinition::new("loan", "l").build();
        loan.add_reference(&books, &[Arc::clone(&fk)]);
        loan.add_reference(&books, &[fk]);
    }

    #[test]
    #[should_panic(expected = "added to table")]
    fn test_foreign_key_for_other_child_panics() {
        let pk = id();
        let books = TableDefinition::new("books", "b").build();
        books.set_primary_key(&[Arc::clone(&pk)]);
        let loan = TableDefinition::new("loan", "l").build();
        let other = TableDefinition::new("other", "o").build();
        let fk = ForeignKey::new(&books, &other, &[Arc::clone(&pk)], &[pk]);
        loan.add_foreign_key(fk);
    }

    #[test]
    #[should_panic(expected = "parent key column(s)")]
    fn test_arity_mismatch_panics() {
        let books = TableDefinition::new("books", "b").build();
        books.set_primary_key(&[id()]);
        let loan = TableDefinition::new("loan", "l").build();
        let a = Domain::new("a", DataType::Integer).build();
        let b = Domain::new("b", DataType::Integer).build();
        loan.add_reference(&books, &[a, b]);
    }

    #[test]
    #[should_panic(expected = "duplicate index suffix")]
    fn test_duplicate_index_suffix_panics() {
        let table = TableDefinition::new("books", "b");
        let title = Domain::new("title", DataType::Text).build();
        table.add_index("title", false, &[Arc::clone(&title)]);
        table.add_index("title", true, &[title]);
    }

    #[test]
    fn test_fragments() {
        let table = TableDefinition::new("books", "b");
        assert_eq!(table.dot("title"), "b.title");
        assert_eq!(table.table_ref(), "books AS b");
        assert_eq!(
            table.dot_as(&["title", "isbn"]),
            "b.title AS title,b.isbn AS isbn"
        );
    }

    #[test]
    fn test_clear_unlinks_both_sides() {
        let pk = id();
        let fk = Domain::new("book", DataType::Integer).build();
        let books = TableDefinition::new("books", "b").build();
        books.add_domain(&pk);
        books.set_primary_key(&[Arc::clone(&pk)]);
        let loan = TableDefinition::new("loan", "l").build();
        loan.add_domain(&fk);
        loan.add_reference(&books, &[fk]);

        books.clear();
        assert!(books.domains().is_empty());
        assert!(books.primary_key().is_empty());
        assert!(books.child_names().is_empty());
        assert!(!loan.has_parent(&books));
    }

    #[test]
    fn test_self_reference() {
        let pk = id();
        let parent_id = Domain::new("parent", DataType::Integer).build();
        let genre = TableDefinition::new("genre", "g").build();
        genre.add_domains(&[Arc::clone(&pk), Arc::clone(&parent_id)]);
        genre.set_primary_key(&[pk]);
        genre.add_reference(&genre, &[parent_id]);

        assert!(genre.has_parent(&genre));
        assert!(genre.has_child(&genre));
        assert_eq!(genre.fk_match(&genre), "g._id=g.parent");

        genre.clear();
        assert!(!genre.has_parent(&genre));
        assert!(!genre.has_child(&genre));
    }
}
