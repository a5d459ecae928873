//! The closed set of grouping kinds.
//!
//! Kind ids are persisted in user styles: they are never renumbered or
//! reused. Everything that distinguishes one kind from another lives in the
//! single table in [`GroupKind::descriptor`].

use std::fmt;

use super::date::{day, month, year};
use super::domains::*;
use super::key::GroupKey;
use super::options::{GroupOption, GroupOptions};
use crate::schema::catalog::{SourceTable, DOM_TITLE};
use crate::schema::domain::{DomainExpression, DomainRef, Sort};

/// A grouping kind, by persisted id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum GroupKind {
    /// Pseudo kind for the book rows themselves.
    Book = 0,
    Author = 1,
    Series = 2,
    Genre = 3,
    Publisher = 4,
    ReadStatus = 5,
    Loaned = 6,
    DatePublishedYear = 7,
    DatePublishedMonth = 8,
    Format = 9,
    DateReadMonth = 10,
    DateReadYear = 11,
    Location = 12,
    Language = 13,
    DateAddedYear = 14,
    DateAddedMonth = 15,
    DateAddedDay = 16,
    Rating = 17,
    Bookshelf = 18,
    DateReadDay = 19,
    DateLastUpdateYear = 20,
    DateLastUpdateMonth = 21,
    DateLastUpdateDay = 22,
    DateFirstPublicationYear = 23,
    DateFirstPublicationMonth = 24,
    Color = 25,
    Condition = 26,
    DateAcquiredYear = 27,
    DateAcquiredMonth = 28,
    DateAcquiredDay = 29,
    BookTitleFirstChar = 30,
    SeriesTitleFirstChar = 31,
}

/// How a kind's displayed value is obtained.
#[derive(Clone, Copy)]
pub enum DisplaySource {
    /// The key expression itself.
    Key,
    /// A separate expression, possibly depending on the style's options.
    Override(fn(&GroupOptions) -> DomainExpression),
    /// Book rows only: they display no group value.
    Absent,
}

impl fmt::Debug for DisplaySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplaySource::Key => f.write_str("Key"),
            DisplaySource::Override(_) => f.write_str("Override(..)"),
            DisplaySource::Absent => f.write_str("Absent"),
        }
    }
}

/// Catalog joins as `(already joined, newly joined)` pairs.
pub type JoinPath = &'static [(SourceTable, SourceTable)];

/// Everything the engine knows about one kind.
#[derive(Debug, Clone)]
pub struct KindDescriptor {
    pub key: GroupKey,
    pub display: DisplaySource,
    pub options: &'static [GroupOption],
    /// Tables, beyond `books`, the key and base expressions read from.
    pub joins: JoinPath,
}

impl KindDescriptor {
    fn new(key: GroupKey) -> Self {
        Self {
            key,
            display: DisplaySource::Key,
            options: &[],
            joins: &[],
        }
    }

    fn display(mut self, f: fn(&GroupOptions) -> DomainExpression) -> Self {
        self.display = DisplaySource::Override(f);
        self
    }

    fn options(mut self, options: &'static [GroupOption]) -> Self {
        self.options = options;
        self
    }

    fn joins(mut self, joins: JoinPath) -> Self {
        self.joins = joins;
        self
    }
}

const AUTHOR_JOINS: JoinPath = &[
    (SourceTable::Books, SourceTable::BookAuthor),
    (SourceTable::BookAuthor, SourceTable::Authors),
];
const SERIES_JOINS: JoinPath = &[
    (SourceTable::Books, SourceTable::BookSeries),
    (SourceTable::BookSeries, SourceTable::Series),
];
const PUBLISHER_JOINS: JoinPath = &[
    (SourceTable::Books, SourceTable::BookPublisher),
    (SourceTable::BookPublisher, SourceTable::Publishers),
];
const BOOKSHELF_JOINS: JoinPath = &[
    (SourceTable::Books, SourceTable::BookBookshelf),
    (SourceTable::BookBookshelf, SourceTable::Bookshelves),
];
const LOAN_JOINS: JoinPath = &[(SourceTable::Books, SourceTable::Loans)];

fn expr(domain: &DomainRef, sql: impl Into<String>, sort: Sort) -> DomainExpression {
    DomainExpression::new(domain, sql, sort)
}

fn key(label_id: &'static str, prefix: &'static str, key: DomainExpression) -> GroupKey {
    GroupKey::new(label_id, prefix, key)
}

/// Single-expression kind over a `books` column.
fn simple(
    label_id: &'static str,
    prefix: &'static str,
    domain: &DomainRef,
    sql: impl Into<String>,
    sort: Sort,
) -> KindDescriptor {
    KindDescriptor::new(key(label_id, prefix, expr(domain, sql, sort)))
}

fn author_display(options: &GroupOptions) -> DomainExpression {
    let sql = if options.get(GroupOption::GivenNameFirst) {
        "CASE WHEN a.given_names='' THEN a.family_name ELSE a.given_names||' '||a.family_name END"
    } else {
        "CASE WHEN a.given_names='' THEN a.family_name ELSE a.family_name||', '||a.given_names END"
    };
    expr(&BLG_AUTHOR_NAME, sql, Sort::Ascending)
}

fn series_display(_: &GroupOptions) -> DomainExpression {
    expr(&BLG_SERIES_TITLE, "s.title", Sort::Ascending)
}

fn publisher_display(_: &GroupOptions) -> DomainExpression {
    expr(&BLG_PUBLISHER_NAME, "pub.name", Sort::Ascending)
}

fn bookshelf_display(_: &GroupOptions) -> DomainExpression {
    expr(&BLG_BOOKSHELF_NAME, "bsh.name", Sort::Ascending)
}

impl GroupKind {
    pub const ALL: [GroupKind; 32] = [
        GroupKind::Book,
        GroupKind::Author,
        GroupKind::Series,
        GroupKind::Genre,
        GroupKind::Publisher,
        GroupKind::ReadStatus,
        GroupKind::Loaned,
        GroupKind::DatePublishedYear,
        GroupKind::DatePublishedMonth,
        GroupKind::Format,
        GroupKind::DateReadMonth,
        GroupKind::DateReadYear,
        GroupKind::Location,
        GroupKind::Language,
        GroupKind::DateAddedYear,
        GroupKind::DateAddedMonth,
        GroupKind::DateAddedDay,
        GroupKind::Rating,
        GroupKind::Bookshelf,
        GroupKind::DateReadDay,
        GroupKind::DateLastUpdateYear,
        GroupKind::DateLastUpdateMonth,
        GroupKind::DateLastUpdateDay,
        GroupKind::DateFirstPublicationYear,
        GroupKind::DateFirstPublicationMonth,
        GroupKind::Color,
        GroupKind::Condition,
        GroupKind::DateAcquiredYear,
        GroupKind::DateAcquiredMonth,
        GroupKind::DateAcquiredDay,
        GroupKind::BookTitleFirstChar,
        GroupKind::SeriesTitleFirstChar,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Book => "Book",
            GroupKind::Author => "Author",
            GroupKind::Series => "Series",
            GroupKind::Genre => "Genre",
            GroupKind::Publisher => "Publisher",
            GroupKind::ReadStatus => "Read status",
            GroupKind::Loaned => "Loaned",
            GroupKind::DatePublishedYear => "Year published",
            GroupKind::DatePublishedMonth => "Month published",
            GroupKind::Format => "Format",
            GroupKind::DateReadMonth => "Month read",
            GroupKind::DateReadYear => "Year read",
            GroupKind::Location => "Location",
            GroupKind::Language => "Language",
            GroupKind::DateAddedYear => "Year added",
            GroupKind::DateAddedMonth => "Month added",
            GroupKind::DateAddedDay => "Day added",
            GroupKind::Rating => "Rating",
            GroupKind::Bookshelf => "Bookshelf",
            GroupKind::DateReadDay => "Day read",
            GroupKind::DateLastUpdateYear => "Year updated",
            GroupKind::DateLastUpdateMonth => "Month updated",
            GroupKind::DateLastUpdateDay => "Day updated",
            GroupKind::DateFirstPublicationYear => "Year first published",
            GroupKind::DateFirstPublicationMonth => "Month first published",
            GroupKind::Color => "Color",
            GroupKind::Condition => "Condition",
            GroupKind::DateAcquiredYear => "Year acquired",
            GroupKind::DateAcquiredMonth => "Month acquired",
            GroupKind::DateAcquiredDay => "Day acquired",
            GroupKind::BookTitleFirstChar => "Title first letter",
            GroupKind::SeriesTitleFirstChar => "Series first letter",
        }
    }

    /// The kind table.
    ///
    /// Kinds displaying something other than their key also sort on the
    /// key, so groups sharing a display value never interleave.
    ///
    /// Dates stored in UTC (`date_added`, `last_update_date`) are converted
    /// to local time before partitioning; all other dates are user-entered
    /// and already local.
    pub fn descriptor(self) -> KindDescriptor {
        use Sort::{Ascending as Asc, Descending as Desc, Unsorted};

        match self {
            GroupKind::Book => KindDescriptor {
                display: DisplaySource::Absent,
                ..simple("group.book", "", &DOM_TITLE, "b.title", Asc)
            },
            GroupKind::Author => KindDescriptor::new(
                key("group.author", "a", expr(&BLG_AUTHOR_ID, "a._id", Asc))
                    .with_group_domains(vec![expr(&BLG_AUTHOR_IS_COMPLETE, "a.author_complete", Unsorted)])
                    .with_base_domains(vec![expr(&BLG_AUTHOR_POSITION, "ba.author_position", Asc)]),
            )
            .display(author_display)
            .options(&[GroupOption::ShowAllAuthors, GroupOption::GivenNameFirst])
            .joins(AUTHOR_JOINS),
            GroupKind::Series => KindDescriptor::new(
                key("group.series", "s", expr(&BLG_SERIES_ID, "s._id", Asc))
                    .with_group_domains(vec![expr(&BLG_SERIES_IS_COMPLETE, "s.series_complete", Unsorted)])
                    .with_base_domains(vec![
                        expr(&BLG_SERIES_NUM_FLOAT, "CAST(bs.series_num AS REAL)", Asc),
                        expr(&BLG_SERIES_NUM, "bs.series_num", Unsorted),
                    ]),
            )
            .display(series_display)
            .options(&[GroupOption::ShowAllSeries])
            .joins(SERIES_JOINS),
            GroupKind::Genre => simple("group.genre", "g", &BLG_GENRE, "b.genre", Asc),
            GroupKind::Publisher => KindDescriptor::new(key(
                "group.publisher",
                "p",
                expr(&BLG_PUBLISHER_ID, "pub._id", Asc),
            ))
            .display(publisher_display)
            .options(&[GroupOption::ShowAllPublishers])
            .joins(PUBLISHER_JOINS),
            GroupKind::ReadStatus => simple("group.read_status", "r", &BLG_READ_STATUS, "b.read", Asc),
            GroupKind::Loaned => {
                simple("group.loaned", "l", &BLG_LOANEE, "lnd.loanee", Asc).joins(LOAN_JOINS)
            }
            GroupKind::DatePublishedYear => simple(
                "group.date_published.year",
                "yrp",
                &BLG_DATE_PUBLISHED_YEAR,
                year("b.date_published", false),
                Desc,
            ),
            GroupKind::DatePublishedMonth => simple(
                "group.date_published.month",
                "mp",
                &BLG_DATE_PUBLISHED_MONTH,
                month("b.date_published", false),
                Desc,
            ),
            GroupKind::Format => simple("group.format", "fmt", &BLG_FORMAT, "b.format", Asc),
            GroupKind::DateReadMonth => simple(
                "group.date_read.month",
                "mr",
                &BLG_DATE_READ_MONTH,
                month("b.read_end", false),
                Desc,
            ),
            GroupKind::DateReadYear => simple(
                "group.date_read.year",
                "yr",
                &BLG_DATE_READ_YEAR,
                year("b.read_end", false),
                Desc,
            ),
            GroupKind::Location => simple("group.location", "loc", &BLG_LOCATION, "b.location", Asc),
            GroupKind::Language => simple("group.language", "lng", &BLG_LANGUAGE, "b.language", Asc),
            GroupKind::DateAddedYear => simple(
                "group.date_added.year",
                "ya",
                &BLG_DATE_ADDED_YEAR,
                year("b.date_added", true),
                Desc,
            ),
            GroupKind::DateAddedMonth => simple(
                "group.date_added.month",
                "ma",
                &BLG_DATE_ADDED_MONTH,
                month("b.date_added", true),
                Desc,
            ),
            GroupKind::DateAddedDay => simple(
                "group.date_added.day",
                "da",
                &BLG_DATE_ADDED_DAY,
                day("b.date_added", true),
                Desc,
            ),
            GroupKind::Rating => simple(
                "group.rating",
                "rt",
                &BLG_RATING,
                "CAST(b.rating AS INTEGER)",
                Desc,
            ),
            GroupKind::Bookshelf => KindDescriptor::new(key(
                "group.bookshelf",
                "shelf",
                expr(&BLG_BOOKSHELF_ID, "bsh._id", Asc),
            ))
            .display(bookshelf_display)
            .options(&[GroupOption::ShowAllBookshelves])
            .joins(BOOKSHELF_JOINS),
            GroupKind::DateReadDay => simple(
                "group.date_read.day",
                "dr",
                &BLG_DATE_READ_DAY,
                day("b.read_end", false),
                Desc,
            ),
            GroupKind::DateLastUpdateYear => simple(
                "group.date_last_update.year",
                "yu",
                &BLG_DATE_LAST_UPDATE_YEAR,
                year("b.last_update_date", true),
                Desc,
            ),
            GroupKind::DateLastUpdateMonth => simple(
                "group.date_last_update.month",
                "mu",
                &BLG_DATE_LAST_UPDATE_MONTH,
                month("b.last_update_date", true),
                Desc,
            ),
            GroupKind::DateLastUpdateDay => simple(
                "group.date_last_update.day",
                "du",
                &BLG_DATE_LAST_UPDATE_DAY,
                day("b.last_update_date", true),
                Desc,
            ),
            GroupKind::DateFirstPublicationYear => simple(
                "group.first_publication.year",
                "yfp",
                &BLG_DATE_FIRST_PUBLICATION_YEAR,
                year("b.first_publication", false),
                Desc,
            ),
            GroupKind::DateFirstPublicationMonth => simple(
                "group.first_publication.month",
                "mfp",
                &BLG_DATE_FIRST_PUBLICATION_MONTH,
                month("b.first_publication", false),
                Desc,
            ),
            GroupKind::Color => simple("group.color", "col", &BLG_COLOR, "b.color", Asc),
            GroupKind::Condition => simple("group.condition", "bc", &BLG_CONDITION, "b.cond_bk", Desc),
            GroupKind::DateAcquiredYear => simple(
                "group.date_acquired.year",
                "yac",
                &BLG_DATE_ACQUIRED_YEAR,
                year("b.date_acquired", false),
                Desc,
            ),
            GroupKind::DateAcquiredMonth => simple(
                "group.date_acquired.month",
                "mac",
                &BLG_DATE_ACQUIRED_MONTH,
                month("b.date_acquired", false),
                Desc,
            ),
            GroupKind::DateAcquiredDay => simple(
                "group.date_acquired.day",
                "dac",
                &BLG_DATE_ACQUIRED_DAY,
                day("b.date_acquired", false),
                Desc,
            ),
            GroupKind::BookTitleFirstChar => simple(
                "group.title.first_char",
                "t",
                &BLG_BOOK_TITLE_1ST_CHAR,
                "upper(SUBSTR(b.title,1,1))",
                Asc,
            ),
            GroupKind::SeriesTitleFirstChar => simple(
                "group.series_title.first_char",
                "st",
                &BLG_SERIES_TITLE_1ST_CHAR,
                "upper(SUBSTR(s.title,1,1))",
                Asc,
            )
            .joins(SERIES_JOINS),
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
