//! Static descriptor of one grouping kind.

use crate::schema::domain::DomainExpression;

/// Label, node-key prefix and domain expressions of a grouping kind.
///
/// Built once per kind by the registry and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupKey {
    label_id: &'static str,
    prefix: &'static str,
    key_domain: DomainExpression,
    group_domains: Vec<DomainExpression>,
    base_domains: Vec<DomainExpression>,
}

impl GroupKey {
    pub fn new(label_id: &'static str, prefix: &'static str, key_domain: DomainExpression) -> Self {
        Self {
            label_id,
            prefix,
            key_domain,
            group_domains: Vec::new(),
            base_domains: Vec::new(),
        }
    }

    /// Extra values kept at the group level. Not checked for duplicates.
    pub fn with_group_domains(mut self, domains: Vec<DomainExpression>) -> Self {
        self.group_domains = domains;
        self
    }

    /// Extra values pushed down to each book row.
    pub fn with_base_domains(mut self, domains: Vec<DomainExpression>) -> Self {
        self.base_domains = domains;
        self
    }

    pub fn label_id(&self) -> &'static str {
        self.label_id
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn key_domain(&self) -> &DomainExpression {
        &self.key_domain
    }

    pub fn group_domains(&self) -> &[DomainExpression] {
        &self.group_domains
    }

    pub fn base_domains(&self) -> &[DomainExpression] {
        &self.base_domains
    }

    /// `'/<prefix>='||COALESCE(<key>,'')`
    pub fn node_key_expression(&self) -> String {
        format!(
            "'/{}='||COALESCE({},'')",
            self.prefix,
            self.key_domain.expression()
        )
    }
}
