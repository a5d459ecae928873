#[cfg(test)]
mod tests {
    use booklist::grouping::{registry, validate_catalog, GroupKey, GroupKind, GroupOption};
    use booklist::schema::{Domain, DomainExpression, Sort};
    use booklist::sql::DataType;
    use rusqlite::Connection;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_validates() {
        validate_catalog().unwrap();
    }

    #[test]
    fn test_prefixes_are_distinct_and_only_book_is_empty() {
        let registry = registry::init();
        let mut seen = HashSet::new();
        for kind in GroupKind::ALL {
            let prefix = registry.key(kind).prefix();
            if kind == GroupKind::Book {
                assert_eq!(prefix, "");
                continue;
            }
            assert!(!prefix.is_empty(), "{kind}");
            assert!(seen.insert(prefix), "duplicate prefix {prefix}");
        }
        assert_eq!(seen.len(), GroupKind::ALL.len() - 1);
    }

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(GroupKind::Book.id(), 0);
        assert_eq!(GroupKind::Author.id(), 1);
        assert_eq!(GroupKind::Bookshelf.id(), 18);
        assert_eq!(GroupKind::SeriesTitleFirstChar.id(), 31);
        assert_eq!(GroupKind::from_id(17), Some(GroupKind::Rating));
    }

    #[test]
    fn test_entries_expose_options() {
        let registry = registry::init();
        assert_eq!(
            registry.entry(GroupKind::Author).options(),
            &[GroupOption::ShowAllAuthors, GroupOption::GivenNameFirst]
        );
        assert!(registry.entry(GroupKind::Genre).options().is_empty());
    }

    #[test]
    fn test_keys_are_shared() {
        let registry = registry::init();
        let a = registry.key(GroupKind::Series);
        let b = registry::get().key(GroupKind::Series);
        assert!(std::sync::Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_node_key_composition() {
        let author = Domain::new("blg_author", DataType::Text).build();
        let series = Domain::new("blg_series", DataType::Text).build();
        let a = GroupKey::new("a", "a", DomainExpression::new(&author, "'Smith'", Sort::Ascending));
        let s = GroupKey::new("s", "s", DomainExpression::new(&series, "NULL", Sort::Ascending));

        let sql = format!(
            "SELECT {}||{}",
            a.node_key_expression(),
            s.node_key_expression()
        );
        let conn = Connection::open_in_memory().unwrap();
        let key: String = conn.query_row(&sql, [], |row| row.get(0)).unwrap();
        assert_eq!(key, "/a=Smith/s=");
    }
}
