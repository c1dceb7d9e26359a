use std::collections::HashMap;

use log::debug;

use crate::config::*;
use crate::resolve::resolve;

// Stop words for free-text answers. Larger than the keyword list: prose is
// full of quantifiers and negations that say nothing about the topic.
const PROSE_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
    "these", "those", "you", "your", "we", "our", "they", "their", "it", "its", "i", "me", "my",
    "myself", "he", "him", "his", "she", "her", "hers", "what", "which", "who", "whom", "where",
    "when", "why", "how", "all", "each", "every", "both", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t",
    "just", "don", "now",
];

/// Splits free text into lower-case tokens of letters, digits and underscores.
fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

fn keep_token(word: &str, min_word_length: usize) -> bool {
    word.chars().count() >= min_word_length
        && !PROSE_STOP_WORDS.contains(&word)
        && !word.chars().all(|c| c.is_ascii_digit())
}

/// Aggregates the free-text answers of a section into word frequencies.
///
/// Each answer contributes its count to every word it contains. The words
/// are sorted by decreasing count (first occurrence first on ties) and
/// truncated. Percentages are relative to the number of responses of the
/// section, and are 0 when that number is unknown.
pub fn word_frequencies(section: &Section, options: &WordCloudOptions) -> Vec<DataPoint> {
    // Insertion order is kept on the side for stable tie breaking.
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for dp in section.distribution.iter() {
        for word in tokenize(&dp.value) {
            if !keep_token(&word, options.min_word_length) {
                continue;
            }
            match counts.get_mut(&word) {
                Some(c) => *c += dp.count,
                None => {
                    counts.insert(word.clone(), dp.count);
                    order.push(word);
                }
            }
        }
    }

    let mut words: Vec<DataPoint> = order
        .into_iter()
        .map(|w| {
            let count = counts.get(&w).copied().unwrap_or(0);
            let percentage = if section.responses > 0 {
                100.0 * count as f64 / section.responses as f64
            } else {
                0.0
            };
            DataPoint {
                value: w,
                count,
                percentage,
                text: None,
            }
        })
        .collect();
    // sort_by is stable.
    words.sort_by(|a, b| b.count.cmp(&a.count));
    words.truncate(options.max_words);
    debug!(
        "word_frequencies: {:?}: {} distinct words kept",
        section.title,
        words.len()
    );
    words
}

/// Word frequencies of the section a question key resolves to.
///
/// Empty if the key does not resolve.
pub fn word_frequencies_for_question(
    sections: &[Section],
    question_key: &str,
    options: &WordCloudOptions,
) -> Vec<DataPoint> {
    match resolve(sections, question_key).section() {
        Some(section) => word_frequencies(section, options),
        None => Vec::new(),
    }
}
