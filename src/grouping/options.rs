//! Per-style grouping preferences.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A user-toggleable preference attached to a grouping kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOption {
    /// List a book under every author, not only the primary one.
    ShowAllAuthors,
    /// Display "Given Family" instead of "Family, Given".
    GivenNameFirst,
    ShowAllSeries,
    ShowAllPublishers,
    ShowAllBookshelves,
}

impl GroupOption {
    pub const ALL: [GroupOption; 5] = [
        GroupOption::ShowAllAuthors,
        GroupOption::GivenNameFirst,
        GroupOption::ShowAllSeries,
        GroupOption::ShowAllPublishers,
        GroupOption::ShowAllBookshelves,
    ];

    /// Key under which the value is persisted in a style.
    pub fn persistence_key(self) -> &'static str {
        match self {
            GroupOption::ShowAllAuthors => "style.booklist.group.authors.show.all",
            GroupOption::GivenNameFirst => "style.booklist.group.authors.given.first",
            GroupOption::ShowAllSeries => "style.booklist.group.series.show.all",
            GroupOption::ShowAllPublishers => "style.booklist.group.publisher.show.all",
            GroupOption::ShowAllBookshelves => "style.booklist.group.bookshelf.show.all",
        }
    }

    pub fn default_value(self) -> bool {
        false
    }

    pub fn from_persistence_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.persistence_key() == key)
    }

    /// Row filter applied when a `ShowAll*` option is off, keeping only the
    /// primary link of each book.
    ///
    /// Written so books without any link still pass.
    pub fn primary_filter(self) -> Option<&'static str> {
        match self {
            GroupOption::ShowAllAuthors => Some("COALESCE(ba.author_position,1)=1"),
            GroupOption::ShowAllSeries => Some("COALESCE(bs.series_position,1)=1"),
            GroupOption::ShowAllPublishers => Some("COALESCE(bp.publisher_position,1)=1"),
            GroupOption::ShowAllBookshelves => Some(
                "COALESCE(bbsh.bookshelf,0)=COALESCE((SELECT MIN(x.bookshelf) FROM book_bookshelf AS x WHERE x.book=b._id),0)",
            ),
            GroupOption::GivenNameFirst => None,
        }
    }
}

impl fmt::Display for GroupOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.persistence_key())
    }
}

/// Option values of one style. Unset options read as their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOptions {
    values: BTreeMap<GroupOption, bool>,
}

impl GroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, option: GroupOption) -> bool {
        self.values
            .get(&option)
            .copied()
            .unwrap_or_else(|| option.default_value())
    }

    pub fn set(&mut self, option: GroupOption, value: bool) -> &mut Self {
        self.values.insert(option, value);
        self
    }

    pub fn with(mut self, option: GroupOption, value: bool) -> Self {
        self.set(option, value);
        self
    }

    /// Read from persisted `key -> value` pairs.
    ///
    /// Returns the first key that names no known option as `Err`.
    pub fn from_persisted<'a>(
        persisted: impl IntoIterator<Item = (&'a String, &'a bool)>,
    ) -> Result<Self, String> {
        let mut options = Self::new();
        for (key, value) in persisted {
            let option = GroupOption::from_persistence_key(key).ok_or_else(|| key.clone())?;
            options.set(option, *value);
        }
        Ok(options)
    }

    /// Only the options in `keep`.
    pub fn restricted_to(&self, keep: &[GroupOption]) -> Self {
        Self {
            values: self
                .values
                .iter()
                .filter(|(o, _)| keep.contains(o))
                .map(|(o, v)| (*o, *v))
                .collect(),
        }
    }
}
