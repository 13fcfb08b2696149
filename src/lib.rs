//! Locates summariser-picked sentences inside a page's extracted words and
//! turns the matched words into per-line highlight rectangles.
//!
//! [`consensus::resolve`] runs the fuzzy [`matcher`] with several grace
//! periods and reconciles the passes; [`aggregate::aggregate`] turns the
//! surviving words into one rectangle per line. [`pipeline`] wires both
//! behind an exact phrase search for whole pages and documents.

pub mod aggregate;
pub mod config;
pub mod consensus;
pub mod exact;
pub mod fuzzy;
pub mod matcher;
pub mod pipeline;
pub mod token;

pub use aggregate::{LineBoxes, aggregate};
pub use config::MatchConfig;
pub use consensus::{Alignment, ConsensusSpan, locate, resolve};
pub use matcher::{CandidateSpan, match_sentence};
pub use token::{BBox, TargetSentence, WordToken};
