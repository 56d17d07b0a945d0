use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ExtractionError;
use crate::pipeline::import::DocumentKind;

/// One line of the source text and its 0-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub index: usize,
    pub text: &'a str,
}

/// Split raw text on `\n` only. A trailing newline yields a final empty line,
/// so line numbers stay aligned with the source.
pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    text.split('\n')
        .enumerate()
        .map(|(index, text)| Line { index, text })
        .collect()
}

/// A question found in the text, with the answers listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    /// 1-based line number of the question in the source text.
    #[serde(rename = "line_number")]
    pub source_line: usize,
    pub answers: Vec<String>,
}

/// A term and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub term: String,
    pub definition: String,
}

/// Output of one extraction run.
///
/// Failure is data, not an error: both shapes expose `questions` and
/// `concepts`, so a stored record can always be read the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Success {
        questions: Vec<Question>,
        concepts: Vec<Concept>,
        total_questions: usize,
        total_concepts: usize,
    },
    Failure {
        error: String,
        questions: Vec<Question>,
        concepts: Vec<Concept>,
    },
}

impl ExtractionResult {
    pub fn success(questions: Vec<Question>, concepts: Vec<Concept>) -> Self {
        Self::Success {
            total_questions: questions.len(),
            total_concepts: concepts.len(),
            questions,
            concepts,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
            questions: vec![],
            concepts: vec![],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn questions(&self) -> &[Question] {
        match self {
            Self::Success { questions, .. } | Self::Failure { questions, .. } => questions,
        }
    }

    pub fn concepts(&self) -> &[Concept] {
        match self {
            Self::Success { concepts, .. } | Self::Failure { concepts, .. } => concepts,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.questions().len()
    }

    pub fn total_concepts(&self) -> usize {
        self.concepts().len()
    }
}

/// Final state of a parsed upload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    Completed,
    Failed,
}

impl ParseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// A validated upload together with what was extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub document_id: Uuid,
    pub filename: String,
    pub kind: DocumentKind,
    pub file_size: u64,
    pub status: ParseStatus,
    pub result: ExtractionResult,
}

/// Turns a stored document into ordered text segments (pages or paragraphs).
///
/// Format decoding lives with the implementor; the extractor only ever sees
/// the text.
pub trait TextAcquirer {
    fn acquire(&self, path: &Path, kind: DocumentKind) -> Result<Vec<String>, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_trailing_empty_line() {
        let lines = split_lines("a\nb\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], Line { index: 1, text: "b" });
        assert_eq!(lines[2].text, "");
    }

    #[test]
    fn split_empty_text_is_one_blank_line() {
        let lines = split_lines("");
        assert_eq!(lines, vec![Line { index: 0, text: "" }]);
    }

    #[test]
    fn success_totals_follow_lengths() {
        let result = ExtractionResult::success(
            vec![Question {
                text: "What is osmosis exactly?".into(),
                source_line: 1,
                answers: vec![],
            }],
            vec![],
        );
        assert!(result.is_success());
        assert_eq!(result.total_questions(), 1);
        assert_eq!(result.total_concepts(), 0);
        assert!(matches!(
            result,
            ExtractionResult::Success { total_questions: 1, total_concepts: 0, .. }
        ));
    }

    #[test]
    fn success_serializes_to_record_shape() {
        let result = ExtractionResult::success(
            vec![Question {
                text: "Explain photosynthesis".into(),
                source_line: 3,
                answers: vec!["Light to sugar".into()],
            }],
            vec![Concept {
                term: "Osmosis".into(),
                definition: "diffusion of water across a membrane".into(),
            }],
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "questions": [{
                    "question": "Explain photosynthesis",
                    "line_number": 3,
                    "answers": ["Light to sugar"]
                }],
                "concepts": [{
                    "term": "Osmosis",
                    "definition": "diffusion of water across a membrane"
                }],
                "total_questions": 1,
                "total_concepts": 1
            })
        );
    }

    #[test]
    fn failure_serializes_with_empty_collections() {
        let result = ExtractionResult::failure("Failed to parse PDF: bad xref");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Failed to parse PDF: bad xref",
                "questions": [],
                "concepts": []
            })
        );
        assert!(result.questions().is_empty());
        assert_eq!(result.error(), Some("Failed to parse PDF: bad xref"));
    }

    #[test]
    fn stored_records_deserialize_into_either_shape() {
        let ok: ExtractionResult = serde_json::from_str(
            r#"{"questions":[],"concepts":[],"total_questions":0,"total_concepts":0}"#,
        )
        .unwrap();
        assert!(ok.is_success());

        let failed: ExtractionResult =
            serde_json::from_str(r#"{"error":"boom","questions":[],"concepts":[]}"#).unwrap();
        assert_eq!(failed.error(), Some("boom"));
    }

    #[test]
    fn parse_status_strings() {
        assert_eq!(ParseStatus::Completed.as_str(), "completed");
        assert_eq!(ParseStatus::Failed.as_str(), "failed");
        assert_eq!(
            serde_json::to_value(ParseStatus::Completed).unwrap(),
            serde_json::json!("completed")
        );
    }

    #[test]
    fn only_terminal_statuses_are_stored() {
        let failed: ParseStatus = serde_json::from_str(r#""failed""#).unwrap();
        assert_eq!(failed, ParseStatus::Failed);
        assert!(serde_json::from_str::<ParseStatus>(r#""processing""#).is_err());
    }
}
