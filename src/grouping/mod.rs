//! Hierarchical grouping of the book list.
//!
//! Each [`GroupKind`] describes one way to partition books (by author, by
//! year published, ...). A style picks an ordered chain of kinds; every
//! book row then gets a node key made of one `/<prefix>=<value>` segment
//! per level, so any subtree is addressed by a key prefix.
//!
//! Call [`registry::init`] once at startup before creating groups.

pub mod chain;
pub mod date;
pub mod domains;
pub mod group;
pub mod key;
pub mod kind;
pub mod options;
pub mod registry;

pub use chain::{ChainError, ChainResult, GroupChain, BOOKLIST_ALIAS};
pub use group::{accumulate_domains, BooklistGroup};
pub use key::GroupKey;
pub use kind::{DisplaySource, GroupKind, KindDescriptor};
pub use options::{GroupOption, GroupOptions};
pub use registry::{validate_catalog, CatalogError, Registry};
