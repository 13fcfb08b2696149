use crate::token::{TargetSentence, WordToken};

/// First contiguous run of tokens spelling out `sentence` word for word.
///
/// Comparison is case-insensitive and ignores punctuation at either end of
/// a word, which is roughly what a renderer's own phrase search tolerates.
/// Anything looser is left to the fuzzy aligner.
pub fn find_exact<'a>(sentence: &TargetSentence, tokens: &'a [WordToken]) -> Option<&'a [WordToken]> {
    let n = sentence.len();
    if n == 0 || tokens.len() < n {
        return None;
    }

    let needle: Vec<String> = sentence.words().iter().map(|w| normalize(w)).collect();
    if needle.iter().all(String::is_empty) {
        return None;
    }
    let haystack: Vec<String> = tokens.iter().map(|t| normalize(&t.text)).collect();

    haystack
        .windows(n)
        .position(|w| w == needle.as_slice())
        .map(|pos| &tokens[pos..pos + n])
}

fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}
