// ==========================================
// BQC Generator - document layer
// ==========================================
// model: format-neutral tree (paragraphs, tables, runs)
// docx_writer: tree → OOXML package bytes
// ==========================================

pub mod docx_writer;
pub mod error;
pub mod model;

pub use docx_writer::{write_docx, DocxWriter};
pub use error::{RenderError, RenderResult};
pub use model::{Alignment, Block, Document, Paragraph, ParagraphStyle, Run, Table, TableCell, TableRow};
