pub mod types;
pub mod patterns;
pub mod questions;
pub mod concepts;
pub mod orchestrator;

pub use types::*;
pub use patterns::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Acquisition(String),
}
