use super::projection::StatRow;

/// Case-insensitive substring match against the row's name or team.
/// A blank query matches every row.
pub fn matches(row: &StatRow, query: &str) -> bool {
    let Some(needle) = prepare_query(query) else {
        return true;
    };
    contains_ignore_case(&row.name, &needle) || contains_ignore_case(&row.team, &needle)
}

pub fn filter_rows(rows: Vec<StatRow>, query: &str) -> Vec<StatRow> {
    rows.into_iter().filter(|row| matches(row, query)).collect()
}

/// Trimmed, lowercased query, or `None` when it matches everything.
pub(crate) fn prepare_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}
