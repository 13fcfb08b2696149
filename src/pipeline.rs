use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, aggregate_by_block, ill_formed_count};
use crate::config::MatchConfig;
use crate::consensus::{Alignment, locate};
use crate::exact::find_exact;
use crate::token::{BBox, TargetSentence, WordToken};

/// What the summariser returned for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerReply {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    /// No further pages need processing after this one.
    #[serde(default)]
    pub stop: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInput {
    /// 1-indexed
    pub page: usize,
    pub words: Vec<WordToken>,
    pub reply: SummarizerReply,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInput {
    pub pages: Vec<PageInput>,
}

impl DocumentInput {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading document {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing document {}", path.display()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub config: MatchConfig,
    /// Key rectangles by `(block_id, line_id)` instead of `line_id` alone.
    pub key_by_block: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

/// A highlight rectangle covering the matched part of one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineHighlight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<u32>,
    pub line_id: u32,
    pub rect: BBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HighlightOutcome {
    Highlighted {
        kind: MatchKind,
        lines: Vec<LineHighlight>,
    },
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceHighlight {
    pub sentence: String,
    #[serde(flatten)]
    pub outcome: HighlightOutcome,
}

impl SentenceHighlight {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, HighlightOutcome::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    pub page: usize,
    pub summary: String,
    pub highlights: Vec<SentenceHighlight>,
    pub failed: usize,
    /// Matched tokens left out of a rectangle because their box was inverted.
    pub skipped_tokens: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentReport {
    pub pages: Vec<PageReport>,
    pub highlighted: usize,
    pub failed: usize,
    /// Set when a reply asked to stop before the last page.
    pub stopped_early: bool,
}

/// Locates one sentence on a page: exact phrase first, fuzzy aligner second.
pub fn highlight_sentence(sentence: &str, words: &[WordToken], options: &PipelineOptions) -> SentenceHighlight {
    let (outcome, _) = highlight_sentence_counted(sentence, words, options);
    SentenceHighlight {
        sentence: sentence.to_string(),
        outcome,
    }
}

fn highlight_sentence_counted(
    sentence: &str,
    words: &[WordToken],
    options: &PipelineOptions,
) -> (HighlightOutcome, usize) {
    let target = TargetSentence::new(sentence);

    let (kind, span): (MatchKind, Vec<&WordToken>) = if let Some(run) = find_exact(&target, words) {
        (MatchKind::Exact, run.iter().collect())
    } else {
        match locate(&target, words, &options.config) {
            Alignment::Matched(span) => (MatchKind::Fuzzy, span),
            Alignment::Unmatched => return (HighlightOutcome::Failed, 0),
        }
    };

    let skipped = ill_formed_count(&span);
    let lines: Vec<LineHighlight> = if options.key_by_block {
        aggregate_by_block(&span)
            .into_iter()
            .map(|((block_id, line_id), rect)| LineHighlight {
                block_id: Some(block_id),
                line_id,
                rect,
            })
            .collect()
    } else {
        aggregate(&span)
            .into_iter()
            .map(|(line_id, rect)| LineHighlight {
                block_id: None,
                line_id,
                rect,
            })
            .collect()
    };

    if lines.is_empty() {
        return (HighlightOutcome::Failed, skipped);
    }
    (HighlightOutcome::Highlighted { kind, lines }, skipped)
}

/// Highlights every sentence the summariser picked for this page.
///
/// A sentence that cannot be placed is recorded as failed; it never stops
/// the rest of the page.
pub fn highlight_page(page: &PageInput, options: &PipelineOptions) -> PageReport {
    info!(page = page.page, sentences = page.reply.highlights.len(), "highlighting page");

    let results: Vec<(SentenceHighlight, usize)> = page
        .reply
        .highlights
        .par_iter()
        .map(|sentence| {
            let (outcome, skipped) = highlight_sentence_counted(sentence, &page.words, options);
            let highlight = SentenceHighlight {
                sentence: sentence.clone(),
                outcome,
            };
            (highlight, skipped)
        })
        .collect();

    let skipped_tokens: usize = results.iter().map(|(_, s)| s).sum();
    let highlights: Vec<SentenceHighlight> = results.into_iter().map(|(h, _)| h).collect();
    let failed = highlights.iter().filter(|h| h.is_failed()).count();

    if failed > 0 {
        warn!(
            "Failed to highlight {}/{} sentences on page {}",
            failed,
            highlights.len(),
            page.page
        );
        for h in highlights.iter().filter(|h| h.is_failed()) {
            debug!(page = page.page, sentence = %h.sentence, "no alignment");
        }
    }
    if skipped_tokens > 0 {
        warn!(page = page.page, skipped_tokens, "ignored words with inverted bounding boxes");
    }

    PageReport {
        page: page.page,
        summary: page.reply.summary.clone(),
        highlights,
        failed,
        skipped_tokens,
    }
}

/// Processes pages in order, stopping after the first reply with `stop` set.
pub fn highlight_document(doc: &DocumentInput, options: &PipelineOptions) -> DocumentReport {
    let mut report = DocumentReport::default();

    for (idx, page) in doc.pages.iter().enumerate() {
        let page_report = highlight_page(page, options);
        report.failed += page_report.failed;
        report.highlighted += page_report.highlights.len() - page_report.failed;
        report.pages.push(page_report);

        if page.reply.stop {
            info!(page = page.page, "stopping as requested by summariser reply");
            report.stopped_early = idx + 1 < doc.pages.len();
            break;
        }
    }

    report
}
