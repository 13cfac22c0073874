// ==========================================
// BQC Generator - procurement record model
// ==========================================
// The submitted "Bid Qualification Criteria" form.
// Amounts (CEC, AMC, O&M) are expressed in Crore.
// ==========================================

use crate::domain::types::{Divisibility, EvaluationMethodology, TenderType};
use serde::{Deserialize, Serialize};

// ==========================================
// ProcurementRecord - central entity
// ==========================================
// Natural key for upsert: (user_id, ref_number)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcurementRecord {
    // ===== identity =====
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub ref_number: String,

    // ===== header =====
    pub description: Option<String>,
    pub indenting_department: Option<String>,
    pub document_date: Option<String>,

    // ===== classification =====
    pub tender_type: TenderType,
    pub evaluation_methodology: EvaluationMethodology,
    pub divisibility: Divisibility,

    // ===== financial (single-estimate mode) =====
    pub cec_estimate_incl_gst: Option<f64>,
    pub cec_estimate_excl_gst: Option<f64>,
    pub correction_factor: Option<f64>, // 0..1, Divisible only
    pub has_amc: bool,
    pub amc_value: Option<f64>,
    pub has_om: bool,
    pub om_value: Option<f64>,
    pub contract_duration_years: Option<f64>,
    pub quantity_supplied: Option<f64>,
    pub quantity_unit: Option<String>,
    pub mse_relaxation: bool,

    // ===== lot-wise mode =====
    pub lots: Vec<LotRecord>,

    // ===== narrative =====
    pub similar_work_definition: Option<String>,
    pub additional_criteria: Option<String>,
    pub experience_note: ExplanatoryNote,
    pub additional_note: ExplanatoryNote,
    pub financial_note: ExplanatoryNote,
    pub emd_note: ExplanatoryNote,
    pub past_performance_note: ExplanatoryNote,

    // ===== performance security =====
    pub has_performance_security: bool,
    pub performance_security_percent: Option<f64>,

    // ===== approval chain =====
    pub approval: ApprovalChain,

    // ===== bookkeeping (set by persistence) =====
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// ==========================================
// LotRecord - one independently evaluated lot
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LotRecord {
    #[serde(alias = "lotNumber")]
    pub lot_id: String,
    pub description: Option<String>,
    pub cec_estimate_incl_gst: Option<f64>,
    pub cec_estimate_excl_gst: Option<f64>,
    pub has_amc: bool,
    pub amc_value: Option<f64>,
    pub quantity: Option<f64>,
    pub mse_relaxation: bool,
}

// ==========================================
// ExplanatoryNote - (hasNote, noteHtml) pair
// ==========================================
// note_html may carry <br>, <b>, <i>, <u> inline markup
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplanatoryNote {
    pub has_note: bool,
    pub note_html: String,
}

impl ExplanatoryNote {
    pub fn new(note_html: &str) -> Self {
        Self {
            has_note: true,
            note_html: note_html.to_string(),
        }
    }

    /// A note is rendered only when toggled on and non-blank
    pub fn is_active(&self) -> bool {
        self.has_note && !self.note_html.trim().is_empty()
    }
}

// ==========================================
// Approval chain
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Signatory {
    pub name: Option<String>,
    pub designation: Option<String>,
}

impl Signatory {
    pub fn new(name: &str, designation: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            designation: Some(designation.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApprovalChain {
    pub proposed_by: Signatory,
    pub recommended_by: Signatory,
    pub concurred_by: Signatory,
    pub approved_by: Signatory,
}

// ==========================================
// SubmissionSummary - list row
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub id: String,
    pub ref_number: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_payload() {
        let raw = r#"{
            "refNumber": "MM/GDS/2024/017",
            "tenderType": "Service",
            "evaluationMethodology": "lot-wise",
            "lots": [{ "lotId": "L1", "cecEstimateInclGst": 1.5, "mseRelaxation": true }],
            "emdNote": { "hasNote": true, "noteHtml": "<b>Nil</b>" }
        }"#;

        let record: ProcurementRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.ref_number, "MM/GDS/2024/017");
        assert_eq!(record.tender_type, TenderType::Service);
        assert!(record.evaluation_methodology.is_lot_wise());
        assert_eq!(record.divisibility, Divisibility::NonDivisible);
        assert_eq!(record.lots.len(), 1);
        assert_eq!(record.lots[0].cec_estimate_incl_gst, Some(1.5));
        assert!(record.lots[0].mse_relaxation);
        assert!(record.emd_note.is_active());
        assert!(!record.experience_note.is_active());
        assert!(record.cec_estimate_incl_gst.is_none());
    }

    #[test]
    fn test_blank_note_is_inactive() {
        let note = ExplanatoryNote {
            has_note: true,
            note_html: "   ".to_string(),
        };
        assert!(!note.is_active());
    }
}
