//! One active level of a grouping chain.

use std::sync::Arc;

use super::key::GroupKey;
use super::kind::{DisplaySource, GroupKind, JoinPath};
use super::options::{GroupOption, GroupOptions};
use super::registry;
use crate::schema::domain::DomainExpression;

/// A grouping kind as used by one style, with its options and the domains
/// accumulated from the levels outside it.
#[derive(Debug, Clone)]
pub struct BooklistGroup {
    kind: GroupKind,
    key: Arc<GroupKey>,
    display: DisplaySource,
    option_schema: &'static [GroupOption],
    joins: JoinPath,
    options: GroupOptions,
    accumulated_domains: Option<Vec<DomainExpression>>,
}

impl BooklistGroup {
    /// A group with default options.
    ///
    /// # Panics
    ///
    /// Panics if the registry has not been initialized.
    pub fn new(kind: GroupKind) -> Self {
        Self::with_options(kind, &GroupOptions::new())
    }

    /// A group taking the options that apply to its kind from `options`.
    pub fn with_options(kind: GroupKind, options: &GroupOptions) -> Self {
        let entry = registry::get().entry(kind);
        Self {
            kind,
            key: Arc::clone(entry.key()),
            display: entry.display(),
            option_schema: entry.options(),
            joins: entry.joins(),
            options: options.restricted_to(entry.options()),
            accumulated_domains: None,
        }
    }

    /// Look up a group by persisted kind id.
    pub fn from_id(id: u8, options: &GroupOptions) -> Option<Self> {
        GroupKind::from_id(id).map(|kind| Self::with_options(kind, options))
    }

    pub fn id(&self) -> u8 {
        self.kind.id()
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn group_key(&self) -> &Arc<GroupKey> {
        &self.key
    }

    pub fn prefix(&self) -> &'static str {
        self.key.prefix()
    }

    pub fn label_id(&self) -> &'static str {
        self.key.label_id()
    }

    pub fn key_domain(&self) -> &DomainExpression {
        self.key.key_domain()
    }

    pub fn joins(&self) -> JoinPath {
        self.joins
    }

    /// Options this kind understands.
    pub fn option_schema(&self) -> &'static [GroupOption] {
        self.option_schema
    }

    pub fn option(&self, option: GroupOption) -> bool {
        self.options.get(option)
    }

    pub fn set_option(&mut self, option: GroupOption, value: bool) {
        assert!(
            self.option_schema.contains(&option),
            "{} has no option {}",
            self.kind,
            option
        );
        self.options.set(option, value);
    }

    /// Row filters for every `ShowAll*` option of this kind that is off.
    pub fn filters(&self) -> Vec<&'static str> {
        self.option_schema
            .iter()
            .filter(|o| !self.options.get(**o))
            .filter_map(|o| o.primary_filter())
            .collect()
    }

    /// The value shown for this level; `None` for book rows.
    pub fn display_domain(&self) -> Option<DomainExpression> {
        match self.display {
            DisplaySource::Key => Some(self.key.key_domain().clone()),
            DisplaySource::Override(build) => Some(build(&self.options)),
            DisplaySource::Absent => None,
        }
    }

    /// Domains this level adds to the group rows: the display override if
    /// any, the key, then the kind's extra group domains.
    pub fn group_domain_expressions(&self) -> Vec<DomainExpression> {
        let mut domains = Vec::with_capacity(self.key.group_domains().len() + 2);
        if let DisplaySource::Override(build) = self.display {
            domains.push(build(&self.options));
        }
        domains.push(self.key.key_domain().clone());
        domains.extend(self.key.group_domains().iter().cloned());
        domains
    }

    pub fn base_domain_expressions(&self) -> &[DomainExpression] {
        self.key.base_domains()
    }

    pub fn node_key_expression(&self) -> String {
        self.key.node_key_expression()
    }

    pub fn set_accumulated_domains(&mut self, domains: Vec<DomainExpression>) {
        self.accumulated_domains = Some(domains);
    }

    pub fn clear_accumulated_domains(&mut self) {
        self.accumulated_domains = None;
    }

    pub fn has_accumulated_domains(&self) -> bool {
        self.accumulated_domains.is_some()
    }

    /// Group domains of this level and every level outside it.
    ///
    /// # Panics
    ///
    /// Panics if they were never set.
    pub fn accumulated_domains(&self) -> &[DomainExpression] {
        self.accumulated_domains
            .as_deref()
            .unwrap_or_else(|| panic!("accumulated domains of {} read before being set", self.kind))
    }
}

impl PartialEq for BooklistGroup {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.key == other.key
            && self.accumulated_domains == other.accumulated_domains
    }
}

/// Set each group's accumulated domains: the union, in order and without
/// repeated domain names, of its own group domains and those of every group
/// before it.
pub fn accumulate_domains(groups: &mut [BooklistGroup]) {
    let mut accumulated: Vec<DomainExpression> = Vec::new();
    for group in groups.iter_mut() {
        for expression in group.group_domain_expressions() {
            let name = expression.domain().name();
            if !accumulated.iter().any(|e| e.domain().name() == name) {
                accumulated.push(expression);
            }
        }
        group.set_accumulated_domains(accumulated.clone());
    }
}
