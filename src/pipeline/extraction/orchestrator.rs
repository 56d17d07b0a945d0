//! Extraction entry points.
//!
//! [`Extractor::build_result`] is total: given text it always produces a
//! success record. [`parse_document`] owns the fallible edge (validation and
//! text acquisition) and turns acquisition faults into a failure record.

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use super::concepts::extract_concepts;
use super::patterns::PatternSet;
use super::questions::{extract_questions, find_answers};
use super::types::{
    split_lines, Concept, ExtractionResult, Line, ParseStatus, ParsedDocument, Question,
    TextAcquirer,
};
use super::ExtractionError;
use crate::config::{ParserConfig, UploadLimits};
use crate::pipeline::import::{check_file, sanitize_filename, DocumentKind, ImportError};

/// Stateless extraction engine. Cheap to clone; clones share the pattern set.
#[derive(Debug, Clone)]
pub struct Extractor {
    patterns: Arc<PatternSet>,
    config: ParserConfig,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(PatternSet::standard(), ParserConfig::default())
    }
}

impl Extractor {
    pub fn new(patterns: Arc<PatternSet>, config: ParserConfig) -> Self {
        Self { patterns, config }
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self::new(PatternSet::standard(), config)
    }

    pub fn extract_questions(&self, lines: &[Line<'_>]) -> Vec<Question> {
        extract_questions(&self.patterns, &self.config, lines)
    }

    pub fn find_answers(&self, lines: &[Line<'_>], question_index: usize) -> Vec<String> {
        find_answers(&self.patterns, &self.config, lines, question_index)
    }

    pub fn extract_concepts(&self, text: &str) -> Vec<Concept> {
        extract_concepts(&self.patterns, &self.config, text)
    }

    /// Run both scanners over `raw_text` and assemble the record.
    pub fn build_result(&self, raw_text: &str) -> ExtractionResult {
        let lines = split_lines(raw_text);
        let questions = self.extract_questions(&lines);
        let concepts = self.extract_concepts(raw_text);

        tracing::info!(
            lines = lines.len(),
            questions = questions.len(),
            concepts = concepts.len(),
            "Extraction complete"
        );

        ExtractionResult::success(questions, concepts)
    }
}

/// Concatenate acquired segments, each followed by a newline.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let capacity = segments.iter().map(|s| s.as_ref().len() + 1).sum();
    let mut text = String::with_capacity(capacity);
    for segment in segments {
        text.push_str(segment.as_ref());
        text.push('\n');
    }
    text
}

/// Validate a stored upload, pull its text, and extract from it.
///
/// A file that fails validation is an `Err` (nothing is parsed). A file that
/// validates but cannot be read yields `Ok` with status `Failed` and a
/// failure-shaped result.
pub fn parse_document(
    path: &Path,
    acquirer: &dyn TextAcquirer,
    extractor: &Extractor,
    limits: &UploadLimits,
) -> Result<ParsedDocument, ImportError> {
    let filename = sanitize_filename(
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown"),
    );

    let info = check_file(path, limits)?;
    let kind = info.kind().ok_or_else(|| ImportError::UnsupportedFileType {
        extension: info.file_type.trim_start_matches('.').to_string(),
        allowed: "PDF and DOCX".to_string(),
    })?;

    let document_id = Uuid::new_v4();
    tracing::info!(
        document_id = %document_id,
        file = %filename,
        kind = kind.as_str(),
        size = info.file_size,
        "Parsing document"
    );

    let (status, result) = match acquire_text(path, kind, acquirer) {
        Ok(text) => (ParseStatus::Completed, extractor.build_result(&text)),
        Err(e) => {
            tracing::warn!(
                document_id = %document_id,
                file = %filename,
                error = %e,
                "Text acquisition failed"
            );
            (
                ParseStatus::Failed,
                ExtractionResult::failure(format!("Failed to parse {}: {}", kind.label(), e)),
            )
        }
    };

    Ok(ParsedDocument {
        document_id,
        filename,
        kind,
        file_size: info.file_size,
        status,
        result,
    })
}

fn acquire_text(
    path: &Path,
    kind: DocumentKind,
    acquirer: &dyn TextAcquirer,
) -> Result<String, ExtractionError> {
    let segments = acquirer.acquire(path, kind)?;
    Ok(join_segments(&segments))
}
