// src/types.rs

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use spanlight::pipeline::SentenceHighlight;
use spanlight::{MatchConfig, WordToken};

// --- App state shared across handlers ---
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<MatchConfig>,
}

// --- Request types ---
#[derive(Deserialize)]
pub struct HighlightRequest {
    #[serde(default = "first_page")]
    pub page: usize,
    pub words: Vec<WordToken>,
    pub sentences: Vec<String>,
    /// Overrides the server's matcher settings for this request
    #[serde(default)]
    pub config: Option<MatchConfig>,
    #[serde(default)]
    pub key_by_block: bool,
}

fn first_page() -> usize {
    1
}

// --- Response types ---
#[derive(Serialize)]
pub struct HighlightResponse {
    pub page: usize,
    pub highlights: Vec<SentenceHighlight>,
    pub failed: usize,
}
