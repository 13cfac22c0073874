// ==========================================
// BQC Generator - section number assigner
// ==========================================
// Fixed base order: BQC = 3, Evaluation = 5, EMD = 6.
// Performance Security takes the next number only when
// requested; Approval Required always comes last.
// ==========================================

use serde::Serialize;

pub const PREAMBLE_SECTION: u32 = 1;
pub const ESTIMATE_SECTION: u32 = 2;
pub const BQC_SECTION: u32 = 3;
pub const ADDITIONAL_SECTION: u32 = 4;
pub const EVALUATION_SECTION: u32 = 5;
pub const EMD_SECTION: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionNumbers {
    pub preamble: u32,
    pub estimate: u32,
    pub bqc: u32,
    pub additional: u32,
    pub evaluation: u32,
    pub emd: u32,
    pub performance_security: Option<u32>,
    pub approval: u32,
}

impl SectionNumbers {
    pub fn assign(has_performance_security: bool) -> Self {
        let mut next = EMD_SECTION + 1;

        let performance_security = if has_performance_security {
            let number = next;
            next += 1;
            Some(number)
        } else {
            None
        };
        let approval = next;

        Self {
            preamble: PREAMBLE_SECTION,
            estimate: ESTIMATE_SECTION,
            bqc: BQC_SECTION,
            additional: ADDITIONAL_SECTION,
            evaluation: EVALUATION_SECTION,
            emd: EMD_SECTION,
            performance_security,
            approval,
        }
    }

    /// Sections the approving authority is asked to approve, in order
    pub fn approval_references(&self) -> Vec<(u32, &'static str)> {
        let mut refs = vec![
            (self.bqc, "Bid Qualification Criteria"),
            (self.evaluation, "Evaluation Methodology"),
            (self.emd, "Earnest Money Deposit"),
        ];
        if let Some(ps) = self.performance_security {
            refs.push((ps, "Performance Security"));
        }
        refs
    }
}
