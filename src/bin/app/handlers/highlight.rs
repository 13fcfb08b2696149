// src/handlers/highlight.rs

use axum::{Json, extract::State};
use spanlight::pipeline::{PageInput, PipelineOptions, SummarizerReply, highlight_page};
use tracing::info;

use crate::errors::AppError;
use crate::types::{AppState, HighlightRequest, HighlightResponse};

pub async fn handle_highlight(
    State(state): State<AppState>,
    Json(request): Json<HighlightRequest>,
) -> Result<Json<HighlightResponse>, AppError> {
    let config = match request.config {
        Some(config) => config,
        None => state.config.as_ref().clone(),
    };
    config.validate().map_err(AppError::bad_request)?;

    info!(
        page = request.page,
        words = request.words.len(),
        sentences = request.sentences.len(),
        "highlight request"
    );

    let options = PipelineOptions {
        config,
        key_by_block: request.key_by_block,
    };
    let page = PageInput {
        page: request.page,
        words: request.words,
        reply: SummarizerReply {
            summary: String::new(),
            highlights: request.sentences,
            stop: false,
        },
    };

    // Alignment is CPU-bound; keep it off the async workers
    let report = tokio::task::spawn_blocking(move || highlight_page(&page, &options)).await?;

    Ok(Json(HighlightResponse {
        page: report.page,
        failed: report.failed,
        highlights: report.highlights,
    }))
}
