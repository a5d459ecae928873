//! Reference schema of the book catalog.
//!
//! Shared domains are process-wide statics so that every table placing the
//! same column places the same [`DomainRef`]. [`ReferenceSchema`] wires them
//! into table definitions with their keys, links and indexes; the grouping
//! layer's key expressions refer to the aliases declared here.

use std::sync::{Arc, LazyLock};

use tracing::debug;

use super::domain::{Domain, DomainRef};
use super::engine::{EngineResult, SqlEngine};
use super::table::TableDefinition;
use crate::sql::ddl::TableKind;
use crate::sql::types::{DataType, DefaultValue};

macro_rules! domain {
    ($(#[$meta:meta])* $id:ident = $build:expr) => {
        $(#[$meta])*
        pub static $id: LazyLock<DomainRef> = LazyLock::new(|| $build.build());
    };
}

// Keys
domain!(
    /// Row id of every entity table.
    DOM_PK_ID = Domain::new("_id", DataType::Integer).primary_key()
);
domain!(DOM_FK_BOOK = Domain::new("book", DataType::Integer).not_null());
domain!(DOM_FK_AUTHOR = Domain::new("author", DataType::Integer).not_null());
domain!(DOM_FK_SERIES = Domain::new("series", DataType::Integer).not_null());
domain!(DOM_FK_PUBLISHER = Domain::new("publisher", DataType::Integer).not_null());
domain!(DOM_FK_BOOKSHELF = Domain::new("bookshelf", DataType::Integer).not_null());

// Books
domain!(DOM_TITLE = Domain::new("title", DataType::Text).not_null());
domain!(DOM_DATE_PUBLISHED = Domain::new("date_published", DataType::Date));
domain!(DOM_DATE_FIRST_PUBLICATION = Domain::new("first_publication", DataType::Date));
domain!(DOM_GENRE = Domain::new("genre", DataType::Text).not_null().with_default(""));
domain!(DOM_LANGUAGE = Domain::new("language", DataType::Text).not_null().with_default(""));
domain!(DOM_LOCATION = Domain::new("location", DataType::Text).not_null().with_default(""));
domain!(DOM_FORMAT = Domain::new("format", DataType::Text).not_null().with_default(""));
domain!(DOM_COLOR = Domain::new("color", DataType::Text).not_null().with_default(""));
domain!(DOM_CONDITION = Domain::new("cond_bk", DataType::Integer).not_null().with_default(0i64));
domain!(DOM_RATING = Domain::new("rating", DataType::Real).not_null().with_default(0.0));
domain!(DOM_READ = Domain::new("read", DataType::Boolean).not_null().with_default(false));
domain!(DOM_READ_END = Domain::new("read_end", DataType::Date));
domain!(DOM_DATE_ACQUIRED = Domain::new("date_acquired", DataType::Date));
domain!(
    /// Stored in UTC.
    DOM_DATE_ADDED = Domain::new("date_added", DataType::Datetime)
        .not_null()
        .with_default(DefaultValue::CurrentTimestamp)
);
domain!(
    /// Stored in UTC.
    DOM_LAST_UPDATED = Domain::new("last_update_date", DataType::Datetime)
        .not_null()
        .with_default(DefaultValue::CurrentTimestamp)
);

// Authors, series, publishers, bookshelves
domain!(DOM_FAMILY_NAME = Domain::new("family_name", DataType::Text).not_null());
domain!(DOM_GIVEN_NAMES = Domain::new("given_names", DataType::Text).not_null().with_default(""));
domain!(DOM_AUTHOR_IS_COMPLETE = Domain::new("author_complete", DataType::Boolean).not_null().with_default(false));
domain!(DOM_SERIES_IS_COMPLETE = Domain::new("series_complete", DataType::Boolean).not_null().with_default(false));
domain!(DOM_NAME = Domain::new("name", DataType::Text).not_null());

// Link tables
domain!(DOM_AUTHOR_POSITION = Domain::new("author_position", DataType::Integer).not_null().with_default(1i64));
domain!(DOM_SERIES_POSITION = Domain::new("series_position", DataType::Integer).not_null().with_default(1i64));
domain!(DOM_PUBLISHER_POSITION = Domain::new("publisher_position", DataType::Integer).not_null().with_default(1i64));
domain!(
    /// Free text: "1", "1a", "IV".
    DOM_SERIES_NUM = Domain::new("series_num", DataType::Text).not_null().with_default("")
);

// Loans
domain!(DOM_LOANEE = Domain::new("loanee", DataType::Text).not_null());

// Full-text search
domain!(DOM_FTS_AUTHOR_NAME = Domain::new("author_name", DataType::Text));
domain!(DOM_FTS_SERIES_TITLE = Domain::new("series_title", DataType::Text));

/// Tables of the reference schema, addressable by variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTable {
    Books,
    Authors,
    Series,
    Publishers,
    Bookshelves,
    BookAuthor,
    BookSeries,
    BookPublisher,
    BookBookshelf,
    Loans,
    BooksFts,
}

/// The catalog tables, fully linked.
#[derive(Debug)]
pub struct ReferenceSchema {
    pub books: Arc<TableDefinition>,
    pub authors: Arc<TableDefinition>,
    pub series: Arc<TableDefinition>,
    pub publishers: Arc<TableDefinition>,
    pub bookshelves: Arc<TableDefinition>,
    pub book_author: Arc<TableDefinition>,
    pub book_series: Arc<TableDefinition>,
    pub book_publisher: Arc<TableDefinition>,
    pub book_bookshelf: Arc<TableDefinition>,
    pub loans: Arc<TableDefinition>,
    pub books_fts: Arc<TableDefinition>,
}

impl ReferenceSchema {
    /// Build a fresh, independent set of definitions.
    pub fn build() -> Self {
        let books = TableDefinition::new("books", "b").build();
        books.add_domains(&[
            DOM_PK_ID.clone(),
            DOM_TITLE.clone(),
            DOM_DATE_PUBLISHED.clone(),
            DOM_DATE_FIRST_PUBLICATION.clone(),
            DOM_GENRE.clone(),
            DOM_LANGUAGE.clone(),
            DOM_LOCATION.clone(),
            DOM_FORMAT.clone(),
            DOM_COLOR.clone(),
            DOM_CONDITION.clone(),
            DOM_RATING.clone(),
            DOM_READ.clone(),
            DOM_READ_END.clone(),
            DOM_DATE_ACQUIRED.clone(),
            DOM_DATE_ADDED.clone(),
            DOM_LAST_UPDATED.clone(),
        ]);
        books.set_primary_key(&[DOM_PK_ID.clone()]);
        books.add_index("title", false, &[DOM_TITLE.clone()]);

        let authors = entity("authors", "a", &[DOM_FAMILY_NAME.clone(), DOM_GIVEN_NAMES.clone(), DOM_AUTHOR_IS_COMPLETE.clone()]);
        authors.add_index("family_name", false, &[DOM_FAMILY_NAME.clone(), DOM_GIVEN_NAMES.clone()]);

        let series = entity("series", "s", &[DOM_TITLE.clone(), DOM_SERIES_IS_COMPLETE.clone()]);
        series.add_index("title", false, &[DOM_TITLE.clone()]);

        let publishers = entity("publishers", "pub", &[DOM_NAME.clone()]);
        publishers.add_index("name", true, &[DOM_NAME.clone()]);

        let bookshelves = entity("bookshelf", "bsh", &[DOM_NAME.clone()]);
        bookshelves.add_index("name", true, &[DOM_NAME.clone()]);

        let book_author = link(
            "book_author",
            "ba",
            (&books, &authors),
            &DOM_FK_AUTHOR,
            &[DOM_AUTHOR_POSITION.clone()],
        );
        book_author.add_index("author", false, &[DOM_FK_AUTHOR.clone()]);

        let book_series = link(
            "book_series",
            "bs",
            (&books, &series),
            &DOM_FK_SERIES,
            &[DOM_SERIES_NUM.clone(), DOM_SERIES_POSITION.clone()],
        );
        book_series.add_index("series", false, &[DOM_FK_SERIES.clone()]);

        let book_publisher = link(
            "book_publisher",
            "bp",
            (&books, &publishers),
            &DOM_FK_PUBLISHER,
            &[DOM_PUBLISHER_POSITION.clone()],
        );
        book_publisher.add_index("publisher", false, &[DOM_FK_PUBLISHER.clone()]);

        let book_bookshelf = link(
            "book_bookshelf",
            "bbsh",
            (&books, &bookshelves),
            &DOM_FK_BOOKSHELF,
            &[],
        );

        let loans = TableDefinition::new("loan", "lnd").build();
        loans.add_domains(&[DOM_PK_ID.clone(), DOM_FK_BOOK.clone(), DOM_LOANEE.clone()]);
        loans.set_primary_key(&[DOM_PK_ID.clone()]);
        loans.add_reference(&books, &[DOM_FK_BOOK.clone()]);
        loans.add_index("book", true, &[DOM_FK_BOOK.clone()]);

        let books_fts = TableDefinition::new("books_fts", "fts")
            .with_kind(TableKind::FullText)
            .build();
        books_fts.add_domains(&[
            DOM_TITLE.clone(),
            DOM_FTS_AUTHOR_NAME.clone(),
            DOM_FTS_SERIES_TITLE.clone(),
        ]);

        Self {
            books,
            authors,
            series,
            publishers,
            bookshelves,
            book_author,
            book_series,
            book_publisher,
            book_bookshelf,
            loans,
            books_fts,
        }
    }

    pub fn table(&self, table: SourceTable) -> &Arc<TableDefinition> {
        match table {
            SourceTable::Books => &self.books,
            SourceTable::Authors => &self.authors,
            SourceTable::Series => &self.series,
            SourceTable::Publishers => &self.publishers,
            SourceTable::Bookshelves => &self.bookshelves,
            SourceTable::BookAuthor => &self.book_author,
            SourceTable::BookSeries => &self.book_series,
            SourceTable::BookPublisher => &self.book_publisher,
            SourceTable::BookBookshelf => &self.book_bookshelf,
            SourceTable::Loans => &self.loans,
            SourceTable::BooksFts => &self.books_fts,
        }
    }

    /// All tables, parents before children.
    pub fn tables(&self) -> [&Arc<TableDefinition>; 11] {
        [
            &self.books,
            &self.authors,
            &self.series,
            &self.publishers,
            &self.bookshelves,
            &self.book_author,
            &self.book_series,
            &self.book_publisher,
            &self.book_bookshelf,
            &self.loans,
            &self.books_fts,
        ]
    }

    /// Every CREATE TABLE and CREATE INDEX statement, in execution order.
    pub fn statements(&self) -> Vec<String> {
        let mut sql = Vec::new();
        for table in self.tables() {
            sql.push(table.create_statement(true));
            sql.extend(table.index_statements());
        }
        sql
    }

    /// Create every table that does not exist yet, with its indexes.
    ///
    /// Returns the names of the tables created.
    pub fn create_missing(&self, engine: &dyn SqlEngine) -> EngineResult<Vec<String>> {
        let mut created = Vec::new();
        for table in self.tables() {
            if table.exists(engine)? {
                debug!(table = table.name(), "table exists, skipping");
                continue;
            }
            table.create(engine, true)?;
            table.create_indices(engine)?;
            created.push(table.name().to_string());
        }
        Ok(created)
    }
}

/// Shared, process-wide reference schema.
pub fn reference_schema() -> &'static ReferenceSchema {
    static SCHEMA: LazyLock<ReferenceSchema> = LazyLock::new(ReferenceSchema::build);
    &SCHEMA
}

/// Entity table: `_id` key followed by `domains`.
fn entity(name: &str, alias: &str, domains: &[DomainRef]) -> Arc<TableDefinition> {
    let table = TableDefinition::new(name, alias).build();
    table.add_domain(&DOM_PK_ID);
    table.add_domains(domains);
    table.set_primary_key(&[DOM_PK_ID.clone()]);
    table
}

/// Many-to-many link between `books` and `other`, keyed on both ids.
fn link(
    name: &str,
    alias: &str,
    (books, other): (&Arc<TableDefinition>, &Arc<TableDefinition>),
    fk: &DomainRef,
    extra: &[DomainRef],
) -> Arc<TableDefinition> {
    let table = TableDefinition::new(name, alias).build();
    table.add_domain(&DOM_FK_BOOK);
    table.add_domain(fk);
    table.add_domains(extra);
    table.set_primary_key(&[DOM_FK_BOOK.clone(), fk.clone()]);
    table.add_reference(books, &[DOM_FK_BOOK.clone()]);
    table.add_reference(other, &[fk.clone()]);
    table
}
