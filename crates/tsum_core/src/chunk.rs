//! Sentence-aware text chunking.
//!
//! Summarization models have a bounded input size, so long texts are split
//! into chunks that stay under a character budget. Splitting happens on the
//! literal `". "` sequence, which approximates sentence boundaries — it will
//! mis-split on abbreviations or decimal numbers, and that is accepted.

/// Default per-chunk character budget.
pub const DEFAULT_CHUNK_BUDGET: usize = 1000;

/// Split `text` into chunks of at most [`DEFAULT_CHUNK_BUDGET`] characters.
pub fn split(text: &str) -> Vec<String> {
    split_with_budget(text, DEFAULT_CHUNK_BUDGET)
}

/// Split `text` into chunks of at most `budget` characters, keeping sentences
/// intact. A single sentence longer than the budget becomes its own oversized
/// chunk. Joining the returned chunks with a single space reproduces the
/// normalized input exactly.
pub fn split_with_budget(text: &str, budget: usize) -> Vec<String> {
    let normalized = text.replace('\n', " ");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Vec::new();
    }
    if normalized.len() <= budget {
        return vec![normalized.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    // split_inclusive keeps the ". " attached to the preceding sentence, so
    // no separator text is lost across chunk boundaries.
    for sentence in normalized.split_inclusive(". ") {
        if !current.is_empty() && current.len() + sentence.len() >= budget {
            chunks.push(current.trim_end().to_string());
            current.clear();
        }
        current.push_str(sentence);
    }
    if !current.is_empty() {
        chunks.push(current.trim_end().to_string());
    }
    chunks
}
