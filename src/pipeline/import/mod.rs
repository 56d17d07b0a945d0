pub mod format;

pub use format::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File does not exist")]
    NotFound,

    #[error("File size exceeds {limit} limit")]
    FileTooLarge { size: u64, limit: String },

    #[error("Unsupported file type. Only {allowed} files are allowed.")]
    UnsupportedFileType { extension: String, allowed: String },
}
