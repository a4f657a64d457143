//! Plain text and single-column CSV

/// One fragment per non-blank line
pub(super) fn lines(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// First column of each line
///
/// No quoting support: the cell ends at the first comma. Lines mentioning
/// "text" are treated as header rows and skipped.
pub(super) fn first_column(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| {
            let cell = line.split(',').next().unwrap_or_default();
            cell.trim().trim_matches('"').trim().to_string()
        })
        .filter(|cell| !cell.is_empty() && !cell.to_lowercase().contains("text"))
        .collect()
}
