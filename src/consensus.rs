use rayon::prelude::*;
use tracing::debug;

use crate::config::MatchConfig;
use crate::matcher::{CandidateSpan, match_sentence};
use crate::token::{TargetSentence, WordToken};

/// Tokens that survived cross-pass agreement, in the order of the longest pass.
pub type ConsensusSpan<'a> = Vec<&'a WordToken>;

/// Outcome of locating one sentence on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alignment<'a> {
    Matched(ConsensusSpan<'a>),
    Unmatched,
}

impl<'a> Alignment<'a> {
    pub fn span(&self) -> Option<&[&'a WordToken]> {
        match self {
            Alignment::Matched(span) => Some(span.as_slice()),
            Alignment::Unmatched => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Alignment::Matched(_))
    }
}

/// Runs one matcher pass per grace seed and reconciles the candidates.
pub fn resolve<'a>(
    sentence: &TargetSentence,
    tokens: &'a [WordToken],
    config: &MatchConfig,
) -> ConsensusSpan<'a> {
    // collect() keeps seed order, so the outcome does not depend on scheduling
    let candidates: Vec<CandidateSpan<'a>> = config
        .grace_seeds
        .par_iter()
        .map(|&seed| {
            let span = match_sentence(sentence, tokens, seed, config);
            debug!(seed, matched = span.len(), "matcher pass");
            span
        })
        .collect();

    reconcile(candidates, config.consensus_radius)
}

/// [`resolve`], with an empty consensus reported as [`Alignment::Unmatched`].
pub fn locate<'a>(
    sentence: &TargetSentence,
    tokens: &'a [WordToken],
    config: &MatchConfig,
) -> Alignment<'a> {
    let span = resolve(sentence, tokens, config);
    if span.is_empty() {
        Alignment::Unmatched
    } else {
        Alignment::Matched(span)
    }
}

/// Intersects candidate spans by spatial proximity.
///
/// The longest span seeds the result; each further span (longest first)
/// keeps a token only if it has a nearest neighbour in that span, within
/// `radius` when one is given. Text is not compared here, so two adjacent
/// but different words can stand in for each other.
pub fn reconcile<'a>(mut candidates: Vec<CandidateSpan<'a>>, radius: Option<f32>) -> ConsensusSpan<'a> {
    candidates.retain(|span| !span.is_empty());
    // Stable: equal-length spans stay in seed order
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut candidates = candidates.into_iter();
    let Some(mut result) = candidates.next() else {
        return Vec::new();
    };

    for other in candidates {
        result.retain(|token| {
            nearest(token, &other).is_some_and(|(_, distance)| radius.is_none_or(|r| distance <= r))
        });
    }

    result
}

/// Token in `span` whose box center is closest to `token`'s, with its distance.
fn nearest<'a>(token: &WordToken, span: &[&'a WordToken]) -> Option<(&'a WordToken, f32)> {
    let mut best: Option<(&'a WordToken, f32)> = None;
    for &candidate in span {
        let distance = token.bbox.center_distance(&candidate.bbox);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best
}
