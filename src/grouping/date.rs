//! Year/month/day extraction from partial ISO dates.
//!
//! Stored dates are free text: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, optionally
//! followed by a time, with one- or two-digit months and days. Fixed-width
//! slicing breaks on the short forms, so each extractor tests the shape with
//! GLOB first and only then picks the substring. Values matching no shape
//! extract as `''`.

/// SQLite GLOB fragment for four digits.
const YYYY: &str = "[0-9][0-9][0-9][0-9]";
const D: &str = "[0-9]";
const DD: &str = "[0-9][0-9]";

/// Convert `field` to local time when it carries a time component.
///
/// Date-only values have no zone to convert from and are passed through.
pub fn local_date_time_expression(field: &str) -> String {
    format!(
        "CASE WHEN {f} GLOB '*-*-* *' THEN datetime({f},'localtime') ELSE {f} END",
        f = field
    )
}

fn source(field: &str, to_local: bool) -> String {
    if to_local {
        local_date_time_expression(field)
    } else {
        field.to_string()
    }
}

/// `CASE WHEN <x> GLOB <p1> THEN SUBSTR(<x>,s,n) ... ELSE '' END`
///
/// Arms are tested in order; the first match decides the offset.
fn extract(x: &str, arms: &[(String, u8, u8)]) -> String {
    let mut sql = String::from("CASE");
    for (pattern, start, len) in arms {
        sql.push_str(&format!(
            " WHEN {x} GLOB '{pattern}' THEN SUBSTR({x},{start},{len})"
        ));
    }
    sql.push_str(" ELSE '' END");
    sql
}

/// Four-digit year, or `''`.
pub fn year(field: &str, to_local: bool) -> String {
    let x = source(field, to_local);
    extract(&x, &[(format!("{YYYY}*"), 1, 4)])
}

/// Month as stored (`"03"` or `"3"`), or `''`.
pub fn month(field: &str, to_local: bool) -> String {
    let x = source(field, to_local);
    extract(
        &x,
        &[
            (format!("{YYYY}-{DD}*"), 6, 2),
            (format!("{YYYY}-{D}*"), 6, 1),
        ],
    )
}

/// Day as stored (`"05"` or `"5"`), or `''`.
pub fn day(field: &str, to_local: bool) -> String {
    let x = source(field, to_local);
    // Order matters: the patterns overlap.
    extract(
        &x,
        &[
            (format!("{YYYY}-{DD}-{DD}*"), 9, 2),
            (format!("{YYYY}-{D}-{DD}*"), 8, 2),
            (format!("{YYYY}-{DD}-{D}*"), 9, 1),
            (format!("{YYYY}-{D}-{D}*"), 8, 1),
        ],
    )
}
