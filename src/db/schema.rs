pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Splits a DDL script into executable statements. The schema contains no
/// string literals, so statements are cut at bare semicolons after comment
/// lines are stripped.
pub fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
        .split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}
