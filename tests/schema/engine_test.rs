#[cfg(test)]
mod tests {
    use booklist::schema::{
        ColumnInfo, Domain, EngineResult, ReferenceSchema, SqlEngine, TableDefinition,
    };
    use booklist::sql::{DataType, DefaultValue, TableKind};
    use rusqlite::Connection;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_reference_schema_applies() {
        let conn = conn();
        let schema = ReferenceSchema::build();

        let created = schema.create_missing(&conn).unwrap();
        assert_eq!(created.len(), schema.tables().len());
        for table in schema.tables() {
            assert!(table.exists(&conn).unwrap(), "{}", table.name());
        }

        // Second run finds everything in place.
        assert!(schema.create_missing(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_exists_uses_temp_catalog_for_temporary_tables() {
        let conn = conn();
        let title = Domain::new("title", DataType::Text).build();
        let temp = TableDefinition::new("bl", "bl").with_kind(TableKind::Temporary);
        temp.add_domain(&title);

        assert!(!temp.exists(&conn).unwrap());
        temp.create(&conn, false).unwrap();
        assert!(temp.exists(&conn).unwrap());

        temp.drop(&conn).unwrap();
        assert!(!temp.exists(&conn).unwrap());
    }

    #[test]
    fn test_table_info_is_cached_until_altered() {
        let conn = conn();
        let title = Domain::new("title", DataType::Text).not_null().build();
        let table = TableDefinition::new("books", "b");
        table.add_domain(&title);
        table.create(&conn, true).unwrap();

        let first = table.table_info(&conn).unwrap();
        assert_eq!(first.column_names(), vec!["title"]);

        // Changed behind the definition's back: the cache still answers.
        SqlEngine::execute(&conn, "ALTER TABLE books ADD isbn TEXT").unwrap();
        assert_eq!(table.table_info(&conn).unwrap().columns().len(), 1);

        let color = Domain::new("color", DataType::Text)
            .not_null()
            .with_default("")
            .build();
        table.alter_table_add_columns(&conn, &[color]).unwrap();

        let info = table.table_info(&conn).unwrap();
        assert_eq!(info.column_names(), vec!["title", "isbn", "color"]);
        let color = info.column("COLOR").unwrap();
        assert!(color.not_null);
        assert_eq!(color.default_value.as_deref(), Some("''"));
    }

    #[test]
    fn test_table_info_refreshed_after_create() {
        let conn = conn();
        let title = Domain::new("title", DataType::Text).build();
        let table = TableDefinition::new("shelf_copy", "sc");
        table.add_domain(&title);

        assert!(table.table_info(&conn).unwrap().is_empty());
        table.create(&conn, true).unwrap();
        assert_eq!(table.table_info(&conn).unwrap().column_names(), vec!["title"]);
    }

    /// Engine that answers `column_info` slowly and counts the calls.
    struct CountingEngine {
        column_info_calls: AtomicUsize,
    }

    impl SqlEngine for CountingEngine {
        fn execute(&self, _sql: &str) -> EngineResult<()> {
            Ok(())
        }

        fn query_count(&self, _sql: &str, _params: &[&str]) -> EngineResult<i64> {
            Ok(0)
        }

        fn column_info(&self, _table: &str) -> EngineResult<Vec<ColumnInfo>> {
            self.column_info_calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            Ok(vec![ColumnInfo {
                position: 0,
                name: "title".to_string(),
                type_name: "TEXT".to_string(),
                not_null: false,
                default_value: None,
                primary_key_index: 0,
            }])
        }
    }

    #[test]
    fn test_table_info_queried_once_across_threads() {
        let engine = CountingEngine {
            column_info_calls: AtomicUsize::new(0),
        };
        let table = TableDefinition::new("books", "b").build();

        let infos: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let table = Arc::clone(&table);
                    let engine = &engine;
                    scope.spawn(move || table.table_info(engine).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(engine.column_info_calls.load(Ordering::SeqCst), 1);
        for info in &infos {
            assert!(Arc::ptr_eq(info, &infos[0]));
        }
        assert_eq!(infos[0].column_names(), vec!["title"]);
    }

    #[test]
    fn test_copy_table_safely_removes_and_renames() {
        let conn = conn();
        SqlEngine::execute(
            &conn,
            "CREATE TABLE old_books (title TEXT, isbn TEXT, obsolete TEXT);
             INSERT INTO old_books VALUES ('Dune', '0441013597', 'x');",
        )
        .unwrap();

        let source = TableDefinition::new("old_books", "o");
        let isbn = Domain::new("isbn_13", DataType::Text).build();
        let title = Domain::new("title", DataType::Text)
            .not_null()
            .with_default(DefaultValue::from(""))
            .build();
        let destination = TableDefinition::new("books", "b");
        destination.add_domains(&[isbn, title]);
        destination.create(&conn, true).unwrap();

        source
            .copy_table_safely(&conn, &destination, &["obsolete"], &[("isbn", "isbn_13")])
            .unwrap();

        let copied = conn
            .query_count(
                "SELECT COUNT(*) FROM books WHERE title=? AND isbn_13=?",
                &["Dune", "0441013597"],
            )
            .unwrap();
        assert_eq!(copied, 1);
    }

    #[test]
    fn test_recreate_empties_table() {
        let conn = conn();
        let title = Domain::new("title", DataType::Text).build();
        let table = TableDefinition::new("scratch", "sc");
        table.add_domain(&title);
        table.add_index("title", false, &[title.clone()]);

        table.recreate(&conn, true).unwrap();
        SqlEngine::execute(&conn, "INSERT INTO scratch VALUES ('a')").unwrap();
        table.recreate(&conn, true).unwrap();

        assert_eq!(
            conn.query_count("SELECT COUNT(*) FROM scratch", &[]).unwrap(),
            0
        );
        assert_eq!(
            conn.query_count(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?",
                &["scratch_IDX_title"],
            )
            .unwrap(),
            1
        );
    }

    #[test]
    fn test_engine_errors_propagate() {
        let conn = conn();
        let table = TableDefinition::new("books", "b");
        let title = Domain::new("title", DataType::Text).build();
        table.add_domain(&title);
        table.create(&conn, true).unwrap();
        assert!(table.create(&conn, true).is_err());
    }
}
