// ==========================================
// BQC Generator - save payload validator
// ==========================================
// Checks a ProcurementRecord before it is persisted.
// Document generation does not go through here: the pipeline
// renders whatever it is given, missing numbers as zero.
// ==========================================

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::procurement::ProcurementRecord;
use crate::i18n::{t, t_with_args};

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcurementValidator;

impl ProcurementValidator {
    pub fn new() -> Self {
        Self
    }

    /// # Returns
    /// - Ok(()) when every check passes
    /// - Err(ApiError::ValidationError) listing every violation found
    pub fn validate(&self, record: &ProcurementRecord) -> ApiResult<()> {
        let violations = self.collect_violations(record);
        if violations.is_empty() {
            return Ok(());
        }

        let reason = violations
            .iter()
            .map(|v| v.reason.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        tracing::debug!(count = violations.len(), %reason, "save payload rejected");
        Err(ApiError::ValidationError { reason, violations })
    }

    pub fn collect_violations(&self, record: &ProcurementRecord) -> Vec<ValidationViolation> {
        let mut out = Vec::new();

        if record.ref_number.trim().is_empty() {
            out.push(violation("refNumber", t("procurement.ref_required")));
        }

        for (field, value) in [
            ("cecEstimateInclGst", record.cec_estimate_incl_gst),
            ("cecEstimateExclGst", record.cec_estimate_excl_gst),
            ("amcValue", record.amc_value),
            ("omValue", record.om_value),
            ("quantitySupplied", record.quantity_supplied),
            ("contractDurationYears", record.contract_duration_years),
        ] {
            check_non_negative(&mut out, field, value);
        }

        if record.divisibility.is_divisible() {
            if let Some(cf) = record.correction_factor {
                if !(0.0..=1.0).contains(&cf) {
                    out.push(violation(
                        "correctionFactor",
                        t("procurement.correction_factor_range"),
                    ));
                }
            }
        }

        if record.evaluation_methodology.is_lot_wise() {
            if record.lots.is_empty() {
                out.push(violation("lots", t("procurement.lots_required")));
            }
            for (idx, lot) in record.lots.iter().enumerate() {
                let prefix = format!("lots[{}]", idx);
                check_non_negative(
                    &mut out,
                    &format!("{}.cecEstimateInclGst", prefix),
                    lot.cec_estimate_incl_gst,
                );
                check_non_negative(&mut out, &format!("{}.quantity", prefix), lot.quantity);
                if gst_inverted(lot.cec_estimate_incl_gst, lot.cec_estimate_excl_gst) {
                    let label = if lot.lot_id.trim().is_empty() {
                        (idx + 1).to_string()
                    } else {
                        lot.lot_id.clone()
                    };
                    out.push(violation(
                        &format!("{}.cecEstimateInclGst", prefix),
                        t_with_args("procurement.lot_gst_invariant", &[("lot", &label)]),
                    ));
                }
            }
        } else if gst_inverted(record.cec_estimate_incl_gst, record.cec_estimate_excl_gst) {
            let incl = record.cec_estimate_incl_gst.unwrap_or_default().to_string();
            let excl = record.cec_estimate_excl_gst.unwrap_or_default().to_string();
            out.push(violation(
                "cecEstimateInclGst",
                t_with_args("procurement.gst_invariant", &[("incl", &incl), ("excl", &excl)]),
            ));
        }

        out
    }
}

/// GST is additive: incl. must not be below excl. when both are set
fn gst_inverted(incl: Option<f64>, excl: Option<f64>) -> bool {
    match (incl, excl) {
        (Some(i), Some(e)) if i > 0.0 && e > 0.0 => i < e,
        _ => false,
    }
}

fn check_non_negative(out: &mut Vec<ValidationViolation>, field: &str, value: Option<f64>) {
    if let Some(v) = value {
        if v < 0.0 || !v.is_finite() {
            out.push(violation(
                field,
                t_with_args("procurement.negative_amount", &[("field", field)]),
            ));
        }
    }
}

fn violation(field: &str, reason: String) -> ValidationViolation {
    ValidationViolation {
        field: field.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::procurement::LotRecord;
    use crate::domain::types::{Divisibility, EvaluationMethodology};

    fn fields(record: &ProcurementRecord) -> Vec<String> {
        ProcurementValidator::new()
            .collect_violations(record)
            .into_iter()
            .map(|v| v.field)
            .collect()
    }

    #[test]
    fn test_valid_record_passes() {
        let record = ProcurementRecord {
            ref_number: "GDS/1".to_string(),
            cec_estimate_incl_gst: Some(1.18),
            cec_estimate_excl_gst: Some(1.0),
            ..Default::default()
        };
        assert!(ProcurementValidator::new().validate(&record).is_ok());
    }

    #[test]
    fn test_missing_ref_and_inverted_gst() {
        let record = ProcurementRecord {
            cec_estimate_incl_gst: Some(1.0),
            cec_estimate_excl_gst: Some(1.18),
            ..Default::default()
        };
        assert_eq!(fields(&record), vec!["refNumber", "cecEstimateInclGst"]);

        match ProcurementValidator::new().validate(&record) {
            Err(ApiError::ValidationError { violations, .. }) => assert_eq!(violations.len(), 2),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_lot_wise_checks() {
        let mut record = ProcurementRecord {
            ref_number: "L/1".to_string(),
            evaluation_methodology: EvaluationMethodology::LotWise,
            // ignored in lot-wise mode
            cec_estimate_incl_gst: Some(1.0),
            cec_estimate_excl_gst: Some(5.0),
            ..Default::default()
        };
        assert_eq!(fields(&record), vec!["lots"]);

        record.lots = vec![
            LotRecord {
                cec_estimate_incl_gst: Some(1.0),
                cec_estimate_excl_gst: Some(2.0),
                ..Default::default()
            },
            LotRecord {
                quantity: Some(-3.0),
                ..Default::default()
            },
        ];
        assert_eq!(
            fields(&record),
            vec!["lots[0].cecEstimateInclGst", "lots[1].quantity"]
        );
    }

    #[test]
    fn test_correction_factor_range_only_when_divisible() {
        let mut record = ProcurementRecord {
            ref_number: "D/1".to_string(),
            correction_factor: Some(1.5),
            ..Default::default()
        };
        assert!(fields(&record).is_empty());

        record.divisibility = Divisibility::Divisible;
        assert_eq!(fields(&record), vec!["correctionFactor"]);
    }
}
