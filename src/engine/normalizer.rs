// ==========================================
// BQC Generator - input normalizer
// ==========================================
// Turns a submitted record into display-ready text:
// blank optional fields become "N/A", dates become dd/mm/yyyy,
// unnamed lots get positional ids. Numbers are left to the
// calculator (which treats missing values as zero).
// ==========================================

use crate::domain::procurement::{ProcurementRecord, Signatory};
use crate::engine::calculator::num;
use crate::engine::formatting::{format_date_str, format_decimal};

/// Literal fallback for missing optional text
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatoryDisplay {
    pub role: &'static str,
    pub name: String,
    pub designation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotDisplay {
    pub lot_id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Source snapshot, untouched
    pub record: ProcurementRecord,
    pub ref_number: String,
    pub description: String,
    pub indenting_department: String,
    pub document_date: String,
    pub similar_work_definition: String,
    pub additional_criteria: String,
    /// Contract duration as text ("2" / "1.5"), "N/A" when missing or not positive
    pub contract_duration: String,
    /// Unit for supplied quantities, "units" when not given
    pub quantity_unit: String,
    pub lots: Vec<LotDisplay>,
    pub signatories: [SignatoryDisplay; 4],
}

pub fn normalize(record: &ProcurementRecord) -> NormalizedRecord {
    let duration = num(record.contract_duration_years);
    let contract_duration = if duration > 0.0 {
        format_decimal(duration, 2)
    } else {
        NOT_AVAILABLE.to_string()
    };

    let document_date = record
        .document_date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| format_date_str(d).unwrap_or_else(|| d.trim().to_string()))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let lots = record
        .lots
        .iter()
        .enumerate()
        .map(|(idx, lot)| LotDisplay {
            lot_id: if lot.lot_id.trim().is_empty() {
                format!("Lot {}", idx + 1)
            } else {
                lot.lot_id.trim().to_string()
            },
            description: text_or_na(lot.description.as_deref()),
        })
        .collect();

    let chain = &record.approval;
    let signatories = [
        signatory("Proposed by", &chain.proposed_by),
        signatory("Recommended by", &chain.recommended_by),
        signatory("Concurred by", &chain.concurred_by),
        signatory("Approved by", &chain.approved_by),
    ];

    NormalizedRecord {
        record: record.clone(),
        ref_number: text_or_na(Some(record.ref_number.as_str())),
        description: text_or_na(record.description.as_deref()),
        indenting_department: text_or_na(record.indenting_department.as_deref()),
        document_date,
        similar_work_definition: text_or_na(record.similar_work_definition.as_deref()),
        additional_criteria: text_or_na(record.additional_criteria.as_deref()),
        contract_duration,
        quantity_unit: record
            .quantity_unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or("units")
            .to_string(),
        lots,
        signatories,
    }
}

pub fn text_or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn signatory(role: &'static str, s: &Signatory) -> SignatoryDisplay {
    SignatoryDisplay {
        role,
        name: text_or_na(s.name.as_deref()),
        designation: text_or_na(s.designation.as_deref()),
    }
}
