// ==========================================
// BQC Generator - document assembly pipeline
// ==========================================
// Flow: normalize → calculate → resolve context (section numbers
//       included) → render tree → serialize
// Rule: all-or-nothing, a failed run never yields partial bytes
// ==========================================

use crate::document::docx_writer::DocxWriter;
use crate::document::error::{RenderError, RenderResult};
use crate::document::model::Document;
use crate::domain::procurement::ProcurementRecord;
use crate::engine::calculator::{calculate, CalculatedValues};
use crate::engine::normalizer::normalize;
use crate::engine::render_context::RenderContext;
use crate::engine::renderer::render_document;
use std::panic::{self, AssertUnwindSafe};
use tracing::{info, instrument};

// ==========================================
// AssembledDocument - pipeline output
// ==========================================

#[derive(Debug, Clone)]
pub struct AssembledDocument {
    pub document: Document,
    pub values: CalculatedValues,
    pub context: RenderContext,
}

// ==========================================
// DocumentPipeline
// ==========================================

pub struct DocumentPipeline {
    writer: DocxWriter,
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentPipeline {
    pub fn new() -> Self {
        Self {
            writer: DocxWriter::new(),
        }
    }

    /// Pipeline with a caller-supplied writer (fixed timestamps in tests)
    pub fn with_writer(writer: DocxWriter) -> Self {
        Self { writer }
    }

    /// Build the document tree without serializing it
    ///
    /// # Returns
    /// - Err(RenderError::Assembly) when a section builder aborts
    pub fn assemble(&self, record: &ProcurementRecord) -> RenderResult<AssembledDocument> {
        // Builders are pure; a panic only means this one request fails
        panic::catch_unwind(AssertUnwindSafe(|| assemble_unchecked(record)))
            .map_err(|payload| RenderError::Assembly(panic_message(payload.as_ref())))
    }

    /// Full run: record in, .docx bytes out
    #[instrument(skip(self, record), fields(ref_number = %record.ref_number))]
    pub fn run(&self, record: &ProcurementRecord) -> RenderResult<Vec<u8>> {
        let assembled = self.assemble(record)?;
        let bytes = self.writer.write(&assembled.document)?;

        info!(
            tender_type = %assembled.context.tender_type,
            lot_wise = assembled.context.is_lot_wise(),
            emd_lakh = assembled.values.emd_lakh,
            bytes = bytes.len(),
            "document generated"
        );
        Ok(bytes)
    }
}

fn assemble_unchecked(record: &ProcurementRecord) -> AssembledDocument {
    let normalized = normalize(record);
    let values = calculate(record);
    let context = RenderContext::resolve(record, &values);
    let document = render_document(&normalized, &values, &context);

    AssembledDocument {
        document,
        values,
        context,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{EvaluationMethodology, TenderType};

    #[test]
    fn test_run_produces_zip_bytes() {
        let record = ProcurementRecord {
            ref_number: "GDS/1".to_string(),
            cec_estimate_incl_gst: Some(2.0),
            quantity_supplied: Some(1000.0),
            ..Default::default()
        };
        let bytes = DocumentPipeline::new().run(&record).unwrap();
        // local file header signature
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let record = ProcurementRecord {
            ref_number: "WRK/9".to_string(),
            tender_type: TenderType::Works,
            evaluation_methodology: EvaluationMethodology::LotWise,
            ..Default::default()
        };
        let pipeline = DocumentPipeline::new();
        let first = pipeline.assemble(&record).unwrap();
        let second = pipeline.assemble(&record).unwrap();
        assert_eq!(first.document, second.document);
        assert!(first.context.is_lot_wise());
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
