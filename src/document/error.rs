// ==========================================
// BQC Generator - document assembly errors
// ==========================================
// Tool: thiserror derive
// ==========================================

use thiserror::Error;

/// Failure while building or serializing a document
#[derive(Error, Debug)]
pub enum RenderError {
    /// Document tree assembly aborted (e.g. a panic inside a section builder)
    #[error("document assembly failed: {0}")]
    Assembly(String),

    #[error("package write failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("i/o failure while writing document: {0}")]
    Io(#[from] std::io::Error),

    #[error("xml serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
