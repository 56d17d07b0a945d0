//! Study material extraction.
//!
//! Turns the plain text of an uploaded exam or notes document into question
//! records (each with the answers listed under it) and term definitions, and
//! gates uploads on existence, size and type before any parsing happens.

pub mod config;
pub mod pipeline;

pub use pipeline::extraction::{
    join_segments, parse_document, split_lines, Concept, ExtractionError, ExtractionResult,
    Extractor, Line, ParseStatus, ParsedDocument, PatternSet, Question, TextAcquirer,
};
pub use pipeline::import::{validate_file, validate_file_with, DocumentKind, ImportError, ValidationOutcome};

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over the default filter.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} v{} logging initialised", config::APP_NAME, config::APP_VERSION);
}
