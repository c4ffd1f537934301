//! Text normalization

/// Normalize a message and split it into word tokens.
///
/// Lowercases, deletes digits and punctuation (anything neither alphanumeric
/// nor whitespace), then splits on whitespace runs. Repeats and order are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_numeric())
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    normalized.split_whitespace().map(str::to_string).collect()
}
