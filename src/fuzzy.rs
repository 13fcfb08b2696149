use unidecode::unidecode;

/// Similarity in `0..=100` between two strings, insensitive to case,
/// punctuation and the order of whitespace-separated parts.
///
/// Both sides are transliterated to ASCII, lowercased, every non-alphanumeric
/// char is turned into a space, and the resulting parts are sorted and
/// re-joined before an indel-normalised comparison.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a = sorted_tokens(a);
    let b = sorted_tokens(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    ratio(&a, &b)
}

/// `true` if `token_sort_ratio(a, b) >= threshold`.
pub fn is_match(a: &str, b: &str, threshold: u8) -> bool {
    token_sort_ratio(a, b) >= threshold
}

fn sorted_tokens(s: &str) -> Vec<char> {
    let cleaned: String = unidecode(s)
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    let mut parts: Vec<&str> = cleaned.split_whitespace().collect();
    parts.sort_unstable();
    parts.join(" ").chars().collect()
}

/// `200 * lcs / (|a| + |b|)`, rounded.
fn ratio(a: &[char], b: &[char]) -> u8 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let lcs = lcs_len(a, b);
    ((200 * lcs) as f64 / total as f64).round() as u8
}

/// Longest common subsequence length, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &x in a {
        for (j, &y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
