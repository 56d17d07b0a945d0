use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ImportError;
use crate::config::UploadLimits;

/// Document formats the upload flow accepts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// Upper-case label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
        }
    }

    /// Map an extension (with or without the dot, any case) to a kind.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');
        if extension.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else if extension.eq_ignore_ascii_case("docx") {
            Some(Self::Docx)
        } else {
            None
        }
    }
}

/// Facts about a file that passed validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfo {
    pub file_size: u64,
    /// Lowercased extension with its leading dot, e.g. `.pdf`.
    pub file_type: String,
}

impl FileInfo {
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_extension(&self.file_type)
    }
}

/// Serializable outcome of [`validate_file`].
///
/// Shape: `{ valid, error?, file_size?, file_type? }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

impl From<Result<FileInfo, ImportError>> for ValidationOutcome {
    fn from(result: Result<FileInfo, ImportError>) -> Self {
        match result {
            Ok(info) => Self {
                valid: true,
                error: None,
                file_size: Some(info.file_size),
                file_type: Some(info.file_type),
            },
            Err(e) => Self {
                valid: false,
                error: Some(e.to_string()),
                file_size: None,
                file_type: None,
            },
        }
    }
}

/// Validate a file against the default upload limits.
pub fn validate_file(path: &Path) -> ValidationOutcome {
    validate_file_with(path, &UploadLimits::default())
}

/// Validate a file against explicit limits. Never fails; rejections are
/// reported through `valid = false` and a message.
pub fn validate_file_with(path: &Path, limits: &UploadLimits) -> ValidationOutcome {
    let result = check_file(path, limits);
    if let Err(e) = &result {
        tracing::warn!(path = %path.display(), error = %e, "File rejected");
    }
    result.into()
}

/// Checks run in a fixed order so the reported reason is deterministic:
/// existence, then size, then extension.
pub fn check_file(path: &Path, limits: &UploadLimits) -> Result<FileInfo, ImportError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) if m.is_file() => m,
        Ok(_) => return Err(ImportError::NotFound),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ImportError::NotFound),
        Err(e) => return Err(ImportError::Io(e)),
    };

    let file_size = metadata.len();
    if file_size > limits.max_file_size {
        return Err(ImportError::FileTooLarge {
            size: file_size,
            limit: limits.max_file_size_label(),
        });
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if extension.is_empty() || !limits.allows(&extension) {
        return Err(ImportError::UnsupportedFileType {
            extension,
            allowed: describe_allowed(&limits.allowed_extensions),
        });
    }

    tracing::debug!(path = %path.display(), size = file_size, "File passed validation");

    Ok(FileInfo {
        file_size,
        file_type: format!(".{extension}"),
    })
}

/// Name-only pre-check used before a file is written anywhere: the name must
/// carry an extension and that extension must be allowed.
pub fn allowed_file(filename: &str, limits: &UploadLimits) -> bool {
    match filename.rsplit_once('.') {
        Some((_, extension)) => !extension.is_empty() && limits.allows(extension),
        None => false,
    }
}

/// Reduce an uploaded name to a bare file name: no directories, no control
/// characters, at most 255 characters.
pub fn sanitize_filename(original: &str) -> String {
    let name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let clean: String = name
        .chars()
        .filter(|c| *c != '\0' && !c.is_control())
        .take(255)
        .collect();

    if clean.is_empty() || clean == "." || clean == ".." {
        "document".to_string()
    } else {
        clean
    }
}

/// "PDF and DOCX", "PDF, DOCX and TXT"
fn describe_allowed(extensions: &[String]) -> String {
    let labels: Vec<String> = extensions.iter().map(|e| e.to_uppercase()).collect();
    match labels.split_last() {
        None => "no".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}
