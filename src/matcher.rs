use crate::config::MatchConfig;
use crate::fuzzy::is_match;
use crate::token::{TargetSentence, WordToken};

/// Tokens picked by one matcher pass, in stream order.
pub type CandidateSpan<'a> = Vec<&'a WordToken>;

struct MatchState<'a> {
    sentence_pointer: usize,
    grace_seed: usize,
    grace_period_counter: usize,
    words_passed_since_match: usize,
    in_matching: bool,
    matched: CandidateSpan<'a>,
}

impl<'a> MatchState<'a> {
    fn new(grace_seed: usize) -> Self {
        Self {
            sentence_pointer: 0,
            grace_seed,
            grace_period_counter: grace_seed,
            words_passed_since_match: 0,
            in_matching: false,
            matched: Vec::new(),
        }
    }

    fn hit(&mut self) {
        self.sentence_pointer += 1;
        self.in_matching = true;
        self.words_passed_since_match = 0;
    }

    /// Records a miss and abandons the partial alignment when the streak
    /// cap is exceeded or the grace period is still running.
    fn miss(&mut self, max_miss_streak: usize) {
        self.words_passed_since_match += 1;
        let streak_exhausted = self.in_matching && self.words_passed_since_match > max_miss_streak;
        if streak_exhausted || self.grace_period_counter > 0 {
            self.sentence_pointer = 0;
            self.grace_period_counter = self.grace_seed;
            self.words_passed_since_match = 0;
            self.in_matching = false;
            self.matched.clear();
        }
    }
}

/// Single forward pass aligning `sentence` against `tokens`.
///
/// Returns as soon as every sentence word has been matched; otherwise
/// returns whatever partial alignment is left when the stream runs out.
pub fn match_sentence<'a>(
    sentence: &TargetSentence,
    tokens: &'a [WordToken],
    grace_seed: usize,
    config: &MatchConfig,
) -> CandidateSpan<'a> {
    let mut state = MatchState::new(grace_seed);
    if sentence.is_empty() {
        return state.matched;
    }

    let mut i = 0;
    while i < tokens.len() {
        let Some(target) = sentence.get(state.sentence_pointer) else {
            break;
        };
        let token = &tokens[i];

        // Line-wrap hyphenation: "inter-" + "national"
        if let (Some(stem), Some(next)) = (token.dehyphenated(), tokens.get(i + 1)) {
            let merged = format!("{stem}{}", next.text);
            if is_match(&merged, target, config.threshold) {
                state.matched.push(token);
                state.matched.push(next);
                state.hit();
                i += 2;
                if state.sentence_pointer == sentence.len() {
                    break;
                }
                continue;
            }
        }

        if word_matches(&token.text, target, config.threshold) {
            state.matched.push(token);
            state.hit();
            if state.grace_period_counter > 0 {
                state.grace_period_counter -= 1;
            }
        } else {
            state.miss(config.max_miss_streak);
        }

        if state.sentence_pointer == sentence.len() {
            break;
        }
        i += 1;
    }

    state.matched
}

/// Compares against the sentence word as written and with its first hyphen removed.
fn word_matches(text: &str, target: &str, threshold: u8) -> bool {
    is_match(text, target, threshold)
        || (target.contains('-') && is_match(text, &target.replacen('-', "", 1), threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::line_of;

    fn texts<'a>(span: &[&'a WordToken]) -> Vec<&'a str> {
        span.iter().map(|t| t.text.as_str()).collect()
    }

    fn run(sentence: &str, tokens: &[WordToken], seed: usize) -> Vec<String> {
        let config = MatchConfig::default();
        match_sentence(&TargetSentence::new(sentence), tokens, seed, &config)
            .iter()
            .map(|t| t.text.clone())
            .collect()
    }

    #[test]
    fn verbatim_sentence_matches_for_every_seed() {
        let tokens = line_of(&["the", "quick", "brown", "fox"], 1);
        for seed in 0..6 {
            let span = match_sentence(
                &TargetSentence::new("the quick brown fox"),
                &tokens,
                seed,
                &MatchConfig::default(),
            );
            assert_eq!(span.len(), 4, "seed {seed}");
            for (got, expected) in span.iter().zip(&tokens) {
                assert!(std::ptr::eq(*got, expected));
            }
        }
    }

    #[test]
    fn empty_inputs_give_empty_spans() {
        let tokens = line_of(&["a", "b"], 0);
        assert!(run("", &tokens, 2).is_empty());
        assert!(run("   ", &tokens, 2).is_empty());
        assert!(run("a b", &[], 2).is_empty());
    }

    #[test]
    fn hyphenated_line_break_consumes_both_tokens() {
        let tokens = line_of(&["the", "inter-", "national", "court"], 0);
        let span = match_sentence(
            &TargetSentence::new("the international court"),
            &tokens,
            2,
            &MatchConfig::default(),
        );
        assert_eq!(texts(&span), ["the", "inter-", "national", "court"]);
    }

    #[test]
    fn em_dash_line_break_is_merged_too() {
        let tokens = line_of(&["multi\u{2014}", "modal"], 0);
        assert_eq!(run("multimodal", &tokens, 2), ["multi\u{2014}", "modal"]);
    }

    #[test]
    fn failed_merge_falls_back_to_direct_comparison() {
        // "pre-" + "trained" is not "pre-", but the token alone is close enough
        let tokens = line_of(&["pre-", "trained", "x"], 0);
        assert_eq!(run("pre", &tokens, 0), ["pre-"]);
    }

    #[test]
    fn hyphenated_sentence_word_matches_joined_token() {
        let tokens = line_of(&["a", "wellknown", "result"], 0);
        assert_eq!(
            run("a well-known result", &tokens, 2),
            ["a", "wellknown", "result"]
        );
    }

    #[test]
    fn leading_noise_is_absorbed_by_grace_period() {
        let tokens = line_of(&["noise1", "noise2", "alpha", "beta"], 0);
        for seed in 2..=4 {
            assert_eq!(run("alpha beta", &tokens, seed), ["alpha", "beta"]);
        }
    }

    #[test]
    fn zero_seed_tolerates_leading_noise_without_reset() {
        let tokens = line_of(&["noise1", "noise2", "alpha", "beta"], 0);
        assert_eq!(run("alpha beta", &tokens, 0), ["alpha", "beta"]);
    }

    #[test]
    fn miss_during_grace_period_restarts_alignment() {
        // "alpha" at 0 is abandoned when "zzz" misses while grace is active
        let tokens = line_of(&["alpha", "zzz", "alpha", "beta"], 0);
        let span = match_sentence(
            &TargetSentence::new("alpha beta"),
            &tokens,
            2,
            &MatchConfig::default(),
        );
        assert!(std::ptr::eq(span[0], &tokens[2]));
        assert!(std::ptr::eq(span[1], &tokens[3]));
    }

    #[test]
    fn sixteen_misses_reset_an_alignment_in_progress() {
        let mut words = vec!["alpha"];
        words.extend(std::iter::repeat_n("zzz", 16));
        words.extend(["alpha", "beta"]);
        let tokens = line_of(&words, 0);

        let span = match_sentence(
            &TargetSentence::new("alpha beta"),
            &tokens,
            0,
            &MatchConfig::default(),
        );
        assert_eq!(span.len(), 2);
        assert!(std::ptr::eq(span[0], &tokens[17]));
        assert!(std::ptr::eq(span[1], &tokens[18]));
    }

    #[test]
    fn fifteen_misses_keep_the_alignment_alive() {
        let mut words = vec!["alpha"];
        words.extend(std::iter::repeat_n("zzz", 15));
        words.push("beta");
        let tokens = line_of(&words, 0);

        let span = match_sentence(
            &TargetSentence::new("alpha beta"),
            &tokens,
            0,
            &MatchConfig::default(),
        );
        assert!(std::ptr::eq(span[0], &tokens[0]));
        assert!(std::ptr::eq(span[1], &tokens[16]));
    }

    #[test]
    fn miss_streak_cap_is_configurable() {
        let tokens = line_of(&["alpha", "zzz", "zzz", "alpha", "beta"], 0);
        let config = MatchConfig {
            max_miss_streak: 1,
            ..MatchConfig::default()
        };
        let span = match_sentence(&TargetSentence::new("alpha beta"), &tokens, 0, &config);
        assert!(std::ptr::eq(span[0], &tokens[3]));
    }

    #[test]
    fn stops_at_first_full_alignment() {
        let tokens = line_of(&["alpha", "beta", "alpha", "beta"], 0);
        let span = match_sentence(
            &TargetSentence::new("alpha beta"),
            &tokens,
            2,
            &MatchConfig::default(),
        );
        assert!(std::ptr::eq(span[1], &tokens[1]));
        assert_eq!(span.len(), 2);
    }

    #[test]
    fn partial_alignment_is_returned_when_stream_ends() {
        let tokens = line_of(&["alpha", "beta"], 0);
        assert_eq!(run("alpha beta gamma", &tokens, 0), ["alpha", "beta"]);
    }

    #[test]
    fn no_similar_words_gives_empty_span() {
        let tokens = line_of(&["lorem", "ipsum", "dolor"], 0);
        assert!(run("xyzzy qwv", &tokens, 2).is_empty());
    }
}
