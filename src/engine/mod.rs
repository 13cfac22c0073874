// ==========================================
// BQC Generator - engine layer
// ==========================================
// Responsibility: derived figures and document assembly
// Rule: no I/O, no SQL; every function is deterministic for
//       a given ProcurementRecord snapshot
// ==========================================

pub mod calculator;
pub mod formatting;
pub mod normalizer;
pub mod pipeline;
pub mod render_context;
pub mod renderer;
pub mod rich_text;
pub mod section_numbering;

pub use calculator::{calculate, emd_lakh, past_performance, CalculatedValues};
pub use normalizer::{normalize, NormalizedRecord};
pub use pipeline::{AssembledDocument, DocumentPipeline};
pub use render_context::{CriteriaShape, EvaluationShape, RenderContext};
pub use renderer::render_document;
pub use rich_text::{html_to_runs, FormatStack};
pub use section_numbering::SectionNumbers;
