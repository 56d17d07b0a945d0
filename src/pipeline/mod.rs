pub mod import;
pub mod extraction;
