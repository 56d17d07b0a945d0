//! Application constants and tunables for validation and extraction.
//!
//! Defaults reproduce the behaviour of the upload flow: 20MB ceiling, PDF and
//! DOCX only, a 9-line answer window, and the minimum lengths below which a
//! captured fragment is treated as noise.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "study-extract";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upload size ceiling in bytes (20MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Number of lines after a question that are searched for its answers.
/// Answers are expected to sit directly under their question.
pub const DEFAULT_ANSWER_LOOKAHEAD: usize = 9;

/// Default `EnvFilter` directive when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "study_extract_lib=info,study_extract=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gate applied to a file before any text is pulled out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    /// Files strictly larger than this are rejected.
    pub max_file_size: u64,
    /// Lowercase extensions without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: vec!["pdf".into(), "docx".into()],
        }
    }
}

impl UploadLimits {
    /// Exact ceiling for messages: "20MB", "1536KB", "1000 bytes".
    pub fn max_file_size_label(&self) -> String {
        const KIB: u64 = 1024;
        const MIB: u64 = 1024 * 1024;

        let bytes = self.max_file_size;
        if bytes >= MIB && bytes % MIB == 0 {
            format!("{}MB", bytes / MIB)
        } else if bytes >= KIB && bytes % KIB == 0 {
            format!("{}KB", bytes / KIB)
        } else {
            format!("{bytes} bytes")
        }
    }

    pub fn allows(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

/// Thresholds for the line scanner and the definition scanner.
///
/// All minimums are inclusive character counts on trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub answer_lookahead: usize,
    pub min_question_chars: usize,
    pub min_answer_chars: usize,
    pub min_term_chars: usize,
    pub min_definition_chars: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            answer_lookahead: DEFAULT_ANSWER_LOOKAHEAD,
            min_question_chars: 11,
            min_answer_chars: 4,
            min_term_chars: 3,
            min_definition_chars: 11,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub limits: UploadLimits,
    pub parser: ParserConfig,
}

impl AppConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
