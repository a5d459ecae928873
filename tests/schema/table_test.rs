#[cfg(test)]
mod tests {
    use booklist::schema::{Domain, DomainRef, TableDefinition};
    use booklist::sql::{DataType, TableKind};
    use insta::assert_snapshot;
    use std::sync::Arc;

    fn int(name: &str) -> DomainRef {
        Domain::new(name, DataType::Integer).not_null().build()
    }

    /// `parent(k1, k2)` with a composite key and `child(_id, c1, c2)`
    /// referencing it.
    fn composite() -> (Arc<TableDefinition>, Arc<TableDefinition>) {
        let k1 = int("k1");
        let k2 = int("k2");
        let parent = TableDefinition::new("parent", "p").build();
        parent.add_domains(&[k1.clone(), k2.clone()]);
        parent.set_primary_key(&[k1, k2]);

        let id = Domain::new("_id", DataType::Integer).primary_key().build();
        let c1 = int("c1");
        let c2 = int("c2");
        let child = TableDefinition::new("child", "c").build();
        child.add_domains(&[id.clone(), c1.clone(), c2.clone()]);
        child.set_primary_key(&[id]);
        child.add_reference(&parent, &[c1, c2]);

        (parent, child)
    }

    #[test]
    fn test_add_same_domain_twice() {
        let table = TableDefinition::new("books", "b");
        let title = Domain::new("title", DataType::Text).build();

        assert!(table.add_domain(&title));
        assert!(!table.add_domain(&title));
        assert_eq!(table.domains().len(), 1);
    }

    #[test]
    #[should_panic(expected = "already used by a different domain")]
    fn test_add_clashing_domain_panics() {
        let table = TableDefinition::new("books", "b");
        table.add_domain(&Domain::new("title", DataType::Text).build());
        table.add_domain(&Domain::new("title", DataType::Text).not_null().build());
    }

    #[test]
    fn test_reference_and_removal_are_symmetric() {
        let (parent, child) = composite();

        assert!(child.has_parent(&parent));
        assert!(parent.has_child(&child));
        assert_eq!(child.parent_names(), vec!["parent"]);
        assert_eq!(parent.child_names(), vec!["child"]);

        assert!(child.remove_reference(&parent));
        assert!(!child.has_parent(&parent));
        assert!(!parent.has_child(&child));
    }

    #[test]
    fn test_fk_match_composite_in_key_order() {
        let (parent, child) = composite();
        assert_eq!(parent.fk_match(&child), "p.k1=c.c1 AND p.k2=c.c2");
        // Same predicate from either side.
        assert_eq!(child.fk_match(&parent), "p.k1=c.c1 AND p.k2=c.c2");
    }

    #[test]
    #[should_panic(expected = "no foreign key between")]
    fn test_fk_match_without_link_panics() {
        let a = TableDefinition::new("a", "a");
        let b = TableDefinition::new("b", "b");
        a.fk_match(&b);
    }

    #[test]
    fn test_create_statement_with_column_key_and_composite_fk() {
        let (_parent, child) = composite();
        let sql = child.create_statement(true);

        assert_snapshot!(sql, @"CREATE TABLE child (_id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT, c1 INTEGER NOT NULL, c2 INTEGER NOT NULL, FOREIGN KEY (c1,c2) REFERENCES parent(k1,k2))");
        assert!(!sql.contains("PRIMARY KEY ("));
        assert_eq!(sql.matches("FOREIGN KEY").count(), 1);
    }

    #[test]
    fn test_create_statement_without_constraints() {
        let (parent, child) = composite();
        assert_eq!(
            child.create_statement(false),
            "CREATE TABLE child (_id INTEGER PRIMARY KEY AUTOINCREMENT, c1 INTEGER, c2 INTEGER)"
        );
        assert_eq!(
            parent.create_statement(true),
            "CREATE TABLE parent (k1 INTEGER NOT NULL, k2 INTEGER NOT NULL, PRIMARY KEY (k1,k2))"
        );
        assert_eq!(
            parent.create_statement(false),
            "CREATE TABLE parent (k1 INTEGER, k2 INTEGER, PRIMARY KEY (k1,k2))"
        );
    }

    #[test]
    fn test_key_column_declared_once_either_way() {
        let (_parent, child) = composite();
        for with_constraints in [true, false] {
            let sql = child.create_statement(with_constraints);
            assert_eq!(sql.matches("PRIMARY KEY").count(), 1, "{sql}");
            assert!(!sql.contains("PRIMARY KEY ("), "{sql}");
        }
    }

    #[test]
    fn test_resetting_referenced_key_to_same_columns() {
        let (parent, child) = composite();
        let key = parent.primary_key();
        parent.set_primary_key(&key);
        assert_eq!(parent.fk_match(&child), "p.k1=c.c1 AND p.k2=c.c2");
    }

    #[test]
    #[should_panic(expected = "changed while 'child' references it")]
    fn test_changing_referenced_key_panics() {
        let (parent, _child) = composite();
        let first = parent.domains()[0].clone();
        parent.set_primary_key(&[first]);
    }

    #[test]
    fn test_joins() {
        let (parent, child) = composite();

        assert_eq!(
            parent.join(&child),
            " JOIN child AS c ON (p.k1=c.c1 AND p.k2=c.c2)"
        );
        assert_eq!(
            child.left_outer_join(&parent),
            " LEFT OUTER JOIN parent AS p ON (p.k1=c.c1 AND p.k2=c.c2)"
        );
        assert_eq!(
            parent.start_join(&[&child]),
            "parent AS p JOIN child AS c ON (p.k1=c.c1 AND p.k2=c.c2)"
        );
    }

    #[test]
    fn test_reference_to_non_key_domain() {
        let code = Domain::new("code", DataType::Text).not_null().build();
        let lang = TableDefinition::new("language", "lg").build();
        lang.add_domain(&code);

        let book_lang = Domain::new("lang_code", DataType::Text).build();
        let books = TableDefinition::new("books", "b").build();
        books.add_domain(&book_lang);
        books.add_reference_to_domain(&lang, &book_lang, &code);

        assert_eq!(books.fk_match(&lang), "lg.code=b.lang_code");
    }

    #[test]
    fn test_index_statements() {
        let (_parent, child) = composite();
        child.add_index("c", true, &child.domains()[1..]);
        assert_eq!(
            child.index_statements(),
            vec!["CREATE UNIQUE INDEX child_IDX_c ON child(c1,c2)"]
        );
    }

    #[test]
    fn test_table_kinds() {
        let title = Domain::new("title", DataType::Text).not_null().build();

        let temp = TableDefinition::new("tmp", "t").with_kind(TableKind::Temporary);
        temp.add_domain(&title);
        assert_eq!(
            temp.create_statement(true),
            "CREATE TEMPORARY TABLE tmp (title TEXT NOT NULL)"
        );

        let fts = TableDefinition::new("books_fts", "f").with_kind(TableKind::FullText);
        fts.add_domain(&title);
        assert_eq!(
            fts.create_statement(true),
            "CREATE VIRTUAL TABLE books_fts USING fts4 (title)"
        );
    }

    #[test]
    fn test_clear_allows_reuse() {
        let (parent, child) = composite();
        child.clear();

        assert!(child.domains().is_empty());
        assert!(child.index_statements().is_empty());
        assert!(!parent.has_child(&child));

        let title = Domain::new("title", DataType::Text).build();
        assert!(child.add_domain(&title));
        assert_eq!(child.create_statement(true), "CREATE TABLE child (title TEXT)");
    }
}
