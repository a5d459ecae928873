#[cfg(test)]
mod tests {
    use booklist::grouping::date::{day, local_date_time_expression, month, year};
    use rusqlite::Connection;

    /// Evaluate a text expression built over the literal `value`.
    fn eval(build: impl Fn(&str) -> String, value: &str) -> String {
        let conn = Connection::open_in_memory().unwrap();
        let literal = format!("'{}'", value.replace('\'', "''"));
        conn.query_row(&format!("SELECT {}", build(&literal)), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    fn ymd(value: &str) -> (String, String, String) {
        (
            eval(|f| year(f, false), value),
            eval(|f| month(f, false), value),
            eval(|f| day(f, false), value),
        )
    }

    #[test]
    fn test_full_date_time() {
        assert_eq!(
            ymd("2001-03-15 10:00:00"),
            ("2001".into(), "03".into(), "15".into())
        );
    }

    #[test]
    fn test_year_and_short_month_only() {
        assert_eq!(ymd("2001-3"), ("2001".into(), "3".into(), String::new()));
    }

    #[test]
    fn test_year_only() {
        assert_eq!(ymd("1999"), ("1999".into(), String::new(), String::new()));
    }

    #[test]
    fn test_short_day_forms() {
        assert_eq!(ymd("2001-03-5"), ("2001".into(), "03".into(), "5".into()));
        assert_eq!(ymd("2001-3-15"), ("2001".into(), "3".into(), "15".into()));
        assert_eq!(ymd("2001-3-5"), ("2001".into(), "3".into(), "5".into()));
    }

    #[test]
    fn test_non_date_text() {
        assert_eq!(ymd("unknown"), (String::new(), String::new(), String::new()));
        assert_eq!(ymd(""), (String::new(), String::new(), String::new()));
    }

    #[test]
    fn test_local_wrapper_passes_date_only_values() {
        assert_eq!(eval(local_date_time_expression, "2020-01-01"), "2020-01-01");
        assert_eq!(eval(|f| year(f, true), "2020-01-01"), "2020");
        assert_eq!(eval(|f| day(f, true), "2020-01-01"), "01");
    }

    #[test]
    fn test_local_wrapper_converts_date_time_values() {
        let local = eval(local_date_time_expression, "2020-06-15 12:00:00");
        // Zone-dependent value, fixed shape.
        assert_eq!(local.len(), "2020-06-15 12:00:00".len());
        assert_eq!(&local[4..5], "-");
        assert_eq!(&local[13..14], ":");
    }
}
