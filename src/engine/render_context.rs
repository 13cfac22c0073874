// ==========================================
// BQC Generator - render context
// ==========================================
// Resolved once per document: which section builders run and
// which variant each one takes. Builders match on these shapes
// instead of re-inspecting the record.
// ==========================================

use crate::domain::procurement::ProcurementRecord;
use crate::domain::types::TenderType;
use crate::engine::calculator::CalculatedValues;
use crate::engine::section_numbering::SectionNumbers;

/// Technical criterion variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaShape {
    /// Goods: quantity-based past performance
    PastPerformance { dual: bool },
    /// Service / Works: value-based experience tiers
    Experience { dual: bool },
}

/// Evaluation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationShape {
    SingleEstimate,
    LotWise,
}

/// The five explanatory-note toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteToggles {
    pub experience: bool,
    pub additional: bool,
    pub financial: bool,
    pub emd: bool,
    pub past_performance: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub tender_type: TenderType,
    pub criteria: CriteriaShape,
    pub evaluation: EvaluationShape,
    pub notes: NoteToggles,
    pub sections: SectionNumbers,
    pub divisible: bool,
    pub has_amc: bool,
    pub has_om: bool,
}

impl RenderContext {
    pub fn resolve(record: &ProcurementRecord, values: &CalculatedValues) -> Self {
        let lot_wise = record.evaluation_methodology.is_lot_wise();

        let criteria = if record.tender_type.is_service_or_works() {
            CriteriaShape::Experience {
                dual: values.experience.mse_relaxed,
            }
        } else {
            CriteriaShape::PastPerformance {
                dual: !lot_wise && record.mse_relaxation,
            }
        };

        let evaluation = if lot_wise {
            EvaluationShape::LotWise
        } else {
            EvaluationShape::SingleEstimate
        };

        let notes = NoteToggles {
            experience: record.experience_note.is_active(),
            additional: record.additional_note.is_active(),
            financial: record.financial_note.is_active(),
            emd: record.emd_note.is_active(),
            past_performance: record.past_performance_note.is_active(),
        };

        Self {
            tender_type: record.tender_type,
            criteria,
            evaluation,
            notes,
            sections: SectionNumbers::assign(record.has_performance_security),
            divisible: record.divisibility.is_divisible(),
            has_amc: !lot_wise && record.has_amc,
            has_om: record.has_om,
        }
    }

    pub fn is_lot_wise(&self) -> bool {
        self.evaluation == EvaluationShape::LotWise
    }
}
