use std::collections::HashSet;

/// Lowercase review text and split it into the set of distinct words it contains
///
/// Any character that is not alphanumeric separates words, so punctuation,
/// hyphens and apostrophes never end up inside a token. No stemming and no
/// stop-word removal: "Clean!" yields `clean`, "cleaner" stays `cleaner`.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
