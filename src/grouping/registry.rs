//! Process-wide registry of grouping kinds.
//!
//! The registry is built and validated once by [`init`] and is read-only
//! afterwards. A catalog that fails validation is a defect in the kind table
//! and aborts startup.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::kind::{DisplaySource, GroupKind, JoinPath};
use super::key::GroupKey;
use super::options::GroupOption;

/// Global registry instance.
static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Catalog validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("key prefix '{prefix}' is used by both {first} and {second}")]
    DuplicatePrefix {
        prefix: &'static str,
        first: GroupKind,
        second: GroupKind,
    },

    #[error("no kind registered for id {0}")]
    MissingKind(u8),

    #[error("entry {position} holds kind id {id}")]
    OutOfOrder { position: usize, id: u8 },

    #[error("the book kind must have id 0, found {0}")]
    BookNotZero(u8),

    #[error("{0} has an empty key prefix")]
    EmptyPrefix(GroupKind),

    #[error("{0} has no display domain")]
    MissingDisplay(GroupKind),

    #[error("the book kind must not have a display domain")]
    BookDisplay,
}

/// One registered kind.
#[derive(Debug, Clone)]
pub struct KindEntry {
    kind: GroupKind,
    key: Arc<GroupKey>,
    display: DisplaySource,
    options: &'static [GroupOption],
    joins: JoinPath,
}

impl KindEntry {
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn key(&self) -> &Arc<GroupKey> {
        &self.key
    }

    pub fn display(&self) -> DisplaySource {
        self.display
    }

    pub fn options(&self) -> &'static [GroupOption] {
        self.options
    }

    pub fn joins(&self) -> JoinPath {
        self.joins
    }
}

/// Immutable catalog of every grouping kind, indexed by id.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<KindEntry>,
}

impl Registry {
    /// Build entries from the kind table without validating them.
    pub fn build() -> Self {
        Self::from_entries(
            GroupKind::ALL
                .into_iter()
                .map(|kind| {
                    let descriptor = kind.descriptor();
                    KindEntry {
                        kind,
                        key: Arc::new(descriptor.key),
                        display: descriptor.display,
                        options: descriptor.options,
                        joins: descriptor.joins,
                    }
                })
                .collect(),
        )
    }

    fn from_entries(entries: Vec<KindEntry>) -> Self {
        Self { entries }
    }

    /// Check the catalog: every id present and in place, the book kind at 0
    /// with no display, every other kind with a display and a distinct,
    /// non-empty prefix.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (position, entry) in self.entries.iter().enumerate() {
            let id = entry.kind.id();
            if usize::from(id) != position {
                return Err(CatalogError::OutOfOrder { position, id });
            }
        }
        for kind in GroupKind::ALL {
            if usize::from(kind.id()) >= self.entries.len() {
                return Err(CatalogError::MissingKind(kind.id()));
            }
        }
        if GroupKind::Book.id() != 0 {
            return Err(CatalogError::BookNotZero(GroupKind::Book.id()));
        }

        let mut seen: HashMap<&'static str, GroupKind> = HashMap::new();
        for entry in &self.entries {
            let prefix = entry.key.prefix();
            if entry.kind == GroupKind::Book {
                if !matches!(entry.display, DisplaySource::Absent) {
                    return Err(CatalogError::BookDisplay);
                }
                continue;
            }
            if prefix.is_empty() {
                return Err(CatalogError::EmptyPrefix(entry.kind));
            }
            if matches!(entry.display, DisplaySource::Absent) {
                return Err(CatalogError::MissingDisplay(entry.kind));
            }
            if let Some(&first) = seen.get(prefix) {
                return Err(CatalogError::DuplicatePrefix {
                    prefix,
                    first,
                    second: entry.kind,
                });
            }
            seen.insert(prefix, entry.kind);
        }
        Ok(())
    }

    pub fn entry(&self, kind: GroupKind) -> &KindEntry {
        &self.entries[usize::from(kind.id())]
    }

    pub fn key(&self, kind: GroupKind) -> &Arc<GroupKey> {
        &self.entry(kind).key
    }

    pub fn entries(&self) -> &[KindEntry] {
        &self.entries
    }

    /// Kind owning a node-key prefix.
    pub fn kind_for_prefix(&self, prefix: &str) -> Option<GroupKind> {
        self.entries
            .iter()
            .find(|e| e.kind != GroupKind::Book && e.key.prefix() == prefix)
            .map(|e| e.kind)
    }
}

/// Build and validate the kind catalog without installing it.
pub fn validate_catalog() -> Result<(), CatalogError> {
    Registry::build().validate()
}

/// Build, validate and install the global registry. Idempotent.
///
/// # Panics
///
/// Panics if the kind catalog is invalid.
pub fn init() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let registry = Registry::build();
        if let Err(e) = registry.validate() {
            panic!("invalid grouping kind catalog: {e}");
        }
        debug!(kinds = registry.entries.len(), "group registry initialized");
        registry
    })
}

/// Get the global registry.
///
/// # Panics
///
/// Panics if [`init`] has not been called.
pub fn get() -> &'static Registry {
    REGISTRY
        .get()
        .expect("group registry not initialized. Call registry::init() first.")
}

/// Check whether the registry has been initialized.
pub fn is_initialized() -> bool {
    REGISTRY.get().is_some()
}
