#[cfg(test)]
mod tests {
    use booklist::config::StyleSettings;
    use booklist::grouping::{
        registry, BooklistGroup, ChainError, GroupChain, GroupKind, GroupOption, GroupOptions,
    };
    use booklist::schema::{ReferenceSchema, SqlEngine};
    use rusqlite::Connection;
    use std::collections::BTreeMap;

    fn chain(kinds: &[GroupKind], options: &GroupOptions) -> GroupChain {
        registry::init();
        let mut chain = GroupChain::new();
        for &kind in kinds {
            chain
                .push(BooklistGroup::with_options(kind, options))
                .unwrap();
        }
        chain
    }

    fn names(group: &BooklistGroup) -> Vec<String> {
        group
            .accumulated_domains()
            .iter()
            .map(|e| e.domain().name().to_string())
            .collect()
    }

    #[test]
    fn test_domains_accumulate_outermost_first() {
        let chain = chain(
            &[GroupKind::Genre, GroupKind::Format, GroupKind::Location],
            &GroupOptions::new(),
        );
        assert_eq!(names(&chain.groups()[0]), vec!["blg_genre"]);
        assert_eq!(names(&chain.groups()[1]), vec!["blg_genre", "blg_format"]);
        assert_eq!(
            names(&chain.groups()[2]),
            vec!["blg_genre", "blg_format", "blg_location"]
        );
    }

    #[test]
    fn test_edits_recompute_accumulated_domains() {
        let mut chain = chain(
            &[GroupKind::Genre, GroupKind::Format, GroupKind::Location],
            &GroupOptions::new(),
        );

        let removed = chain.remove(0).unwrap();
        assert_eq!(removed.kind(), GroupKind::Genre);
        assert!(!removed.has_accumulated_domains());
        assert_eq!(names(&chain.groups()[0]), vec!["blg_format"]);

        chain.move_group(1, 0).unwrap();
        assert_eq!(chain.kinds(), vec![GroupKind::Location, GroupKind::Format]);
        assert_eq!(names(&chain.groups()[1]), vec!["blg_location", "blg_format"]);
    }

    #[test]
    fn test_node_key_per_level() {
        let chain = chain(&[GroupKind::Genre, GroupKind::Format], &GroupOptions::new());
        assert_eq!(chain.node_key_expression_at(0).unwrap(), "''");
        assert_eq!(
            chain.node_key_expression_at(1).unwrap(),
            "'/g='||COALESCE(b.genre,'')"
        );
        assert_eq!(
            chain.node_key_expression(),
            "'/g='||COALESCE(b.genre,'')||'/fmt='||COALESCE(b.format,'')"
        );
    }

    #[test]
    fn test_from_style() {
        registry::init();
        let style = StyleSettings {
            groups: vec![3, 9],
            options: BTreeMap::new(),
        };
        let chain = GroupChain::from_style(&style).unwrap();
        assert_eq!(chain.kinds(), vec![GroupKind::Genre, GroupKind::Format]);

        let unknown_kind = StyleSettings {
            groups: vec![99],
            options: BTreeMap::new(),
        };
        assert_eq!(
            GroupChain::from_style(&unknown_kind),
            Err(ChainError::UnknownKind(99))
        );

        let book = StyleSettings {
            groups: vec![0],
            options: BTreeMap::new(),
        };
        assert_eq!(GroupChain::from_style(&book), Err(ChainError::BookKind));

        let unknown_option = StyleSettings {
            groups: vec![1],
            options: BTreeMap::from([("style.bogus".to_string(), true)]),
        };
        assert_eq!(
            GroupChain::from_style(&unknown_option),
            Err(ChainError::UnknownOption("style.bogus".to_string()))
        );
    }

    #[test]
    fn test_options_reach_the_groups() {
        registry::init();
        let style = StyleSettings {
            groups: vec![1],
            options: BTreeMap::from([(
                GroupOption::ShowAllAuthors.persistence_key().to_string(),
                true,
            )]),
        };
        let chain = GroupChain::from_style(&style).unwrap();
        assert!(chain.groups()[0].option(GroupOption::ShowAllAuthors));
        assert!(chain.filters().is_empty());
    }

    /// Catalog with four books:
    /// Dune (Herbert, 1965), Foundation (Asimov, 1951),
    /// Good Omens (Pratchett then Gaiman, 1990) and Beowulf (no author, no date).
    fn catalog() -> (Connection, ReferenceSchema) {
        let conn = Connection::open_in_memory().unwrap();
        let schema = ReferenceSchema::build();
        schema.create_missing(&conn).unwrap();
        SqlEngine::execute(
            &conn,
            "INSERT INTO authors (_id, family_name, given_names) VALUES
                (1, 'Herbert', 'Frank'),
                (2, 'Asimov', 'Isaac'),
                (3, 'Pratchett', 'Terry'),
                (4, 'Gaiman', 'Neil');
             INSERT INTO books (_id, title, date_published) VALUES
                (1, 'Dune', '1965-08-01'),
                (2, 'Foundation', '1951'),
                (3, 'Good Omens', '1990-5'),
                (4, 'Beowulf', NULL);
             INSERT INTO book_author (book, author, author_position) VALUES
                (1, 1, 1),
                (2, 2, 1),
                (3, 3, 1),
                (3, 4, 2);",
        )
        .unwrap();
        (conn, schema)
    }

    fn node_keys(conn: &Connection, table: &str) -> Vec<(String, String)> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT node_key, title FROM {table} ORDER BY _id"
            ))
            .unwrap();
        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(k, t)| (k.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn test_materialize_primary_authors_only() {
        let (conn, schema) = catalog();
        let chain = chain(
            &[GroupKind::Author, GroupKind::DatePublishedYear],
            &GroupOptions::new(),
        );

        let table = chain.materialize(&conn, &schema, "bl_authors").unwrap();
        assert!(table.exists(&conn).unwrap());

        // Ordered by display name; the book without an author sorts first.
        assert_eq!(
            node_keys(&conn, "bl_authors"),
            pairs(&[
                ("/a=/yrp=", "Beowulf"),
                ("/a=2/yrp=1951", "Foundation"),
                ("/a=1/yrp=1965", "Dune"),
                ("/a=3/yrp=1990", "Good Omens"),
            ])
        );

        let levels = conn
            .query_count("SELECT COUNT(*) FROM bl_authors WHERE level=3", &[])
            .unwrap();
        assert_eq!(levels, 4);
    }

    #[test]
    fn test_same_named_authors_stay_contiguous() {
        let conn = Connection::open_in_memory().unwrap();
        let schema = ReferenceSchema::build();
        schema.create_missing(&conn).unwrap();
        SqlEngine::execute(
            &conn,
            "INSERT INTO authors (_id, family_name, given_names) VALUES
                (1, 'Smith', 'John'),
                (2, 'Smith', 'John');
             INSERT INTO books (_id, title, date_published) VALUES
                (1, 'First', '2000'),
                (2, 'Second', '1999'),
                (3, 'Third', '1990');
             INSERT INTO book_author (book, author, author_position) VALUES
                (1, 1, 1),
                (2, 2, 1),
                (3, 1, 1);",
        )
        .unwrap();

        let chain = chain(
            &[GroupKind::Author, GroupKind::DatePublishedYear],
            &GroupOptions::new(),
        );
        chain.materialize(&conn, &schema, "bl_smith").unwrap();

        assert_eq!(
            node_keys(&conn, "bl_smith"),
            pairs(&[
                ("/a=1/yrp=2000", "First"),
                ("/a=1/yrp=1990", "Third"),
                ("/a=2/yrp=1999", "Second"),
            ])
        );
    }

    #[test]
    fn test_materialize_all_authors() {
        let (conn, schema) = catalog();
        let options = GroupOptions::new().with(GroupOption::ShowAllAuthors, true);
        let chain = chain(&[GroupKind::Author], &options);

        chain.materialize(&conn, &schema, "bl_all").unwrap();

        let good_omens = conn
            .query_count("SELECT COUNT(*) FROM bl_all WHERE book=3", &[])
            .unwrap();
        assert_eq!(good_omens, 2);
        assert_eq!(
            conn.query_count(
                "SELECT COUNT(*) FROM bl_all WHERE node_key=? AND blg_author_name=?",
                &["/a=4", "Gaiman, Neil"],
            )
            .unwrap(),
            1
        );
    }

    #[test]
    fn test_materialize_replaces_previous_rows() {
        let (conn, schema) = catalog();
        let chain = chain(&[GroupKind::DatePublishedYear], &GroupOptions::new());

        chain.materialize(&conn, &schema, "bl_years").unwrap();
        chain.materialize(&conn, &schema, "bl_years").unwrap();

        assert_eq!(
            node_keys(&conn, "bl_years"),
            pairs(&[
                ("/yrp=1990", "Good Omens"),
                ("/yrp=1965", "Dune"),
                ("/yrp=1951", "Foundation"),
                ("/yrp=", "Beowulf"),
            ])
        );
    }
}
