// ==========================================
// ProcurementRecord builder for integration tests
// ==========================================

#![allow(dead_code)]

use bqc_generator::domain::{
    ApprovalChain, Divisibility, EvaluationMethodology, ExplanatoryNote, LotRecord,
    ProcurementRecord, Signatory, TenderType,
};

pub struct RecordBuilder {
    record: ProcurementRecord,
}

impl RecordBuilder {
    /// Goods, single estimate, no optional sections
    pub fn goods(ref_number: &str) -> Self {
        Self {
            record: ProcurementRecord {
                ref_number: ref_number.to_string(),
                tender_type: TenderType::Goods,
                ..Default::default()
            },
        }
    }

    pub fn service(ref_number: &str) -> Self {
        Self::goods(ref_number).tender_type(TenderType::Service)
    }

    pub fn works(ref_number: &str) -> Self {
        Self::goods(ref_number).tender_type(TenderType::Works)
    }

    pub fn tender_type(mut self, tender_type: TenderType) -> Self {
        self.record.tender_type = tender_type;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.record.description = Some(description.to_string());
        self
    }

    pub fn department(mut self, department: &str) -> Self {
        self.record.indenting_department = Some(department.to_string());
        self
    }

    /// CEC in Crore
    pub fn cec(mut self, incl_gst: f64, excl_gst: f64) -> Self {
        self.record.cec_estimate_incl_gst = Some(incl_gst);
        self.record.cec_estimate_excl_gst = Some(excl_gst);
        self
    }

    pub fn quantity(mut self, quantity: f64, unit: &str) -> Self {
        self.record.quantity_supplied = Some(quantity);
        self.record.quantity_unit = Some(unit.to_string());
        self
    }

    pub fn mse_relaxation(mut self) -> Self {
        self.record.mse_relaxation = true;
        self
    }

    pub fn duration_years(mut self, years: f64) -> Self {
        self.record.contract_duration_years = Some(years);
        self
    }

    pub fn amc(mut self, value: f64) -> Self {
        self.record.has_amc = true;
        self.record.amc_value = Some(value);
        self
    }

    pub fn divisible(mut self, correction_factor: f64) -> Self {
        self.record.divisibility = Divisibility::Divisible;
        self.record.correction_factor = Some(correction_factor);
        self
    }

    pub fn similar_work(mut self, html: &str) -> Self {
        self.record.similar_work_definition = Some(html.to_string());
        self
    }

    pub fn emd_note(mut self, html: &str) -> Self {
        self.record.emd_note = ExplanatoryNote::new(html);
        self
    }

    pub fn performance_security(mut self, percent: f64) -> Self {
        self.record.has_performance_security = true;
        self.record.performance_security_percent = Some(percent);
        self
    }

    /// Switches to lot-wise evaluation and appends a lot (amounts in Crore)
    pub fn lot(mut self, lot_id: &str, incl_gst: f64, excl_gst: f64, quantity: f64) -> Self {
        self.record.evaluation_methodology = EvaluationMethodology::LotWise;
        self.record.lots.push(LotRecord {
            lot_id: lot_id.to_string(),
            cec_estimate_incl_gst: Some(incl_gst),
            cec_estimate_excl_gst: Some(excl_gst),
            quantity: Some(quantity),
            ..Default::default()
        });
        self
    }

    pub fn approval(mut self, proposer: &str, approver: &str) -> Self {
        self.record.approval = ApprovalChain {
            proposed_by: Signatory::new(proposer, "Assistant Materials Manager"),
            approved_by: Signatory::new(approver, "Principal Chief Materials Manager"),
            ..Default::default()
        };
        self
    }

    pub fn build(self) -> ProcurementRecord {
        self.record
    }
}
