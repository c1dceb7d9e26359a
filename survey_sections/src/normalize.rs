// Canonical forms of question keys and section titles.

// Function words that never identify a question.
const KEYWORD_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
    "these", "those", "you", "your", "we", "our", "they", "their", "it", "its",
];

/// Turns a question key or a section title into a comparable form.
///
/// Configuration keys are snake_case while titles are prose: underscores
/// become spaces, everything outside `[a-z0-9 ]` is removed and whitespace is
/// collapsed. Only ASCII is folded.
///
/// ```
/// use survey_sections::normalize;
/// assert_eq!(normalize("Which IDEs do you use?"), "which ides do you use");
/// assert_eq!(normalize("how_large_is_your_organization"), "how large is your organization");
/// ```
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' { ' ' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// The meaningful words of a key or a title.
///
/// Short tokens (two characters or less) and function words are dropped. The
/// result may be empty.
pub fn extract_keywords(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|w| w.len() > 2 && !KEYWORD_STOP_WORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}

/// Derives a snake_case key from a section title.
///
/// This is how sections that no configured question claims get a stable
/// identifier. For titles without underscores, normalizing the key gives back
/// the normalized title.
pub fn title_to_key(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<&str>>().join("_")
}
