// ==========================================
// BQC Generator - derived value calculator
// ==========================================
// Input: ProcurementRecord snapshot (amounts in Crore)
// Output: EMD / turnover / experience / past performance figures
// Rule: pure functions, no I/O, missing numerics count as zero
// Rule: branch on evaluation_methodology, never mix CEC sources
// ==========================================

use crate::domain::procurement::{LotRecord, ProcurementRecord};
use crate::domain::types::TenderType;
use serde::Serialize;
use tracing::instrument;

// ==========================================
// Rates
// ==========================================

/// Annual turnover requirement as a share of the estimate
pub const TURNOVER_RATE: f64 = 0.30;

/// Experience tiers (Option A / B / C)
pub const EXPERIENCE_OPTION_A_RATE: f64 = 0.40;
pub const EXPERIENCE_OPTION_B_RATE: f64 = 0.50;
pub const EXPERIENCE_OPTION_C_RATE: f64 = 0.80;

/// Past performance: share of the quantity to be supplied
pub const PAST_PERFORMANCE_RATE: f64 = 0.30;

/// MSE relaxation on qualification thresholds
pub const MSE_RELAXATION: f64 = 0.15;
pub const MSE_FACTOR: f64 = 1.0 - MSE_RELAXATION;

// ==========================================
// Result types
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverRequirement {
    /// CEC incl. GST minus AMC (Crore)
    pub base_amount: f64,
    /// 30%, scaled by (1 + correction factor) when Divisible
    pub rate: f64,
    /// Contract duration used for annualization, when > 1
    pub annualized_over: Option<f64>,
    /// Required average annual turnover (Crore)
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceOption {
    /// Tier rate (0.40 / 0.50 / 0.80)
    pub percent: f64,
    /// Required value of similar work (Crore)
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceTiers {
    pub option_a: ExperienceOption,
    pub option_b: ExperienceOption,
    pub option_c: ExperienceOption,
}

impl ExperienceTiers {
    fn from_amount(amount: f64) -> Self {
        Self {
            option_a: ExperienceOption {
                percent: EXPERIENCE_OPTION_A_RATE,
                value: EXPERIENCE_OPTION_A_RATE * amount,
            },
            option_b: ExperienceOption {
                percent: EXPERIENCE_OPTION_B_RATE,
                value: EXPERIENCE_OPTION_B_RATE * amount,
            },
            option_c: ExperienceOption {
                percent: EXPERIENCE_OPTION_C_RATE,
                value: EXPERIENCE_OPTION_C_RATE * amount,
            },
        }
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let apply = |o: ExperienceOption| ExperienceOption {
            percent: o.percent,
            value: f(o.value),
        };
        Self {
            option_a: apply(self.option_a),
            option_b: apply(self.option_b),
            option_c: apply(self.option_c),
        }
    }

    pub fn options(&self) -> [(&'static str, ExperienceOption); 3] {
        [
            ("A", self.option_a),
            ("B", self.option_b),
            ("C", self.option_c),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRequirements {
    /// Applicable tiers (already relaxed when `mse_relaxed`)
    pub requirement: ExperienceTiers,
    pub mse_relaxed: bool,
    pub annualized_over: Option<f64>,
}

impl ExperienceRequirements {
    /// Tiers without MSE relaxation, derived by dividing the relaxed value by 0.85
    pub fn unrelaxed(&self) -> ExperienceTiers {
        if self.mse_relaxed {
            self.requirement.map(|v| v / MSE_FACTOR)
        } else {
            self.requirement
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PastPerformanceRequirement {
    /// Quantity to be supplied (summed over lots in lot-wise mode)
    pub quantity: f64,
    /// Required quantity with MSE relaxation applied where flagged
    pub required: f64,
    /// Required quantity without any relaxation
    pub required_unrelaxed: f64,
    pub mse_relaxed: bool,
}

impl PastPerformanceRequirement {
    /// Rounded to the nearest whole unit for display
    pub fn rounded(&self) -> u64 {
        round_units(self.required)
    }

    pub fn rounded_unrelaxed(&self) -> u64 {
        round_units(self.required_unrelaxed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotCalculation {
    pub lot_id: String,
    pub cec_incl_gst: f64,
    pub emd_lakh: f64,
    pub turnover: f64,
    /// Goods only
    pub past_performance: Option<f64>,
    /// Service / Works only
    pub experience: Option<ExperienceTiers>,
    pub mse_relaxation: bool,
}

/// Every derived figure the renderer needs, computed once
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedValues {
    pub total_cec_incl_gst: f64,
    pub total_cec_excl_gst: f64,
    pub emd_lakh: f64,
    pub turnover: TurnoverRequirement,
    pub experience: ExperienceRequirements,
    pub past_performance: Option<PastPerformanceRequirement>,
    pub lots: Vec<LotCalculation>,
}

// ==========================================
// EMD
// ==========================================

/// Tiered EMD lookup: amount in Crore → EMD in Lakh
///
/// | CEC (Crore)  | Goods | Service / Works |
/// |--------------|-------|-----------------|
/// | < 0.5        | 0     | 0               |
/// | 0.5 – 1.0    | 0     | 1               |
/// | 1 – 5        | 2.5   | 2.5             |
/// | 5 – 10       | 5     | 5               |
/// | 10 – 15      | 7.5   | 7.5             |
/// | 15 – 25      | 10    | 10              |
/// | > 25         | 20    | 20              |
pub fn emd_lakh(amount_crore: f64, tender_type: TenderType) -> f64 {
    let amount = finite_or_zero(amount_crore);

    if amount < 0.5 {
        0.0
    } else if amount < 1.0 {
        match tender_type {
            TenderType::Goods => 0.0,
            TenderType::Service | TenderType::Works => 1.0,
        }
    } else if amount < 5.0 {
        2.5
    } else if amount < 10.0 {
        5.0
    } else if amount < 15.0 {
        7.5
    } else if amount <= 25.0 {
        10.0
    } else {
        20.0
    }
}

// ==========================================
// Totals
// ==========================================

pub fn total_cec_incl_gst(record: &ProcurementRecord) -> f64 {
    if record.evaluation_methodology.is_lot_wise() {
        record
            .lots
            .iter()
            .map(|lot| num(lot.cec_estimate_incl_gst))
            .sum()
    } else {
        num(record.cec_estimate_incl_gst)
    }
}

pub fn total_cec_excl_gst(record: &ProcurementRecord) -> f64 {
    if record.evaluation_methodology.is_lot_wise() {
        record
            .lots
            .iter()
            .map(|lot| num(lot.cec_estimate_excl_gst))
            .sum()
    } else {
        num(record.cec_estimate_excl_gst)
    }
}

/// Duration divisor: the contract duration when it exceeds one year, else none
pub fn annualization_years(record: &ProcurementRecord) -> Option<f64> {
    let years = num(record.contract_duration_years);
    if years > 1.0 {
        Some(years)
    } else {
        None
    }
}

/// (1 + correction factor) for Divisible tenders, 1 otherwise
pub fn divisibility_scale(record: &ProcurementRecord) -> f64 {
    if record.divisibility.is_divisible() {
        1.0 + num(record.correction_factor).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

// ==========================================
// Turnover
// ==========================================

pub fn turnover_requirement(record: &ProcurementRecord) -> TurnoverRequirement {
    let base_amount = if record.evaluation_methodology.is_lot_wise() {
        record.lots.iter().map(lot_turnover_base).sum()
    } else {
        let amc = if record.has_amc {
            num(record.amc_value)
        } else {
            0.0
        };
        (num(record.cec_estimate_incl_gst) - amc).max(0.0)
    };

    let rate = TURNOVER_RATE * divisibility_scale(record);
    let annualized_over = annualization_years(record);
    let amount = annualize(base_amount * rate, annualized_over);

    TurnoverRequirement {
        base_amount,
        rate,
        annualized_over,
        amount,
    }
}

fn lot_turnover_base(lot: &LotRecord) -> f64 {
    let amc = if lot.has_amc { num(lot.amc_value) } else { 0.0 };
    (num(lot.cec_estimate_incl_gst) - amc).max(0.0)
}

// ==========================================
// Experience
// ==========================================

pub fn experience_requirements(record: &ProcurementRecord) -> ExperienceRequirements {
    let scaled_total = total_cec_incl_gst(record) * divisibility_scale(record);
    let mut tiers = ExperienceTiers::from_amount(scaled_total);

    let annualized_over = if record.tender_type.is_service_or_works() {
        annualization_years(record)
    } else {
        None
    };
    if let Some(years) = annualized_over {
        tiers = tiers.map(|v| v / years);
    }

    let mse_relaxed = record.tender_type.is_service_or_works()
        && !record.evaluation_methodology.is_lot_wise()
        && record.mse_relaxation;
    if mse_relaxed {
        tiers = tiers.map(|v| v * MSE_FACTOR);
    }

    ExperienceRequirements {
        requirement: tiers,
        mse_relaxed,
        annualized_over,
    }
}

// ==========================================
// Past performance
// ==========================================

/// 30% of the quantity supplied, times 0.85 under MSE relaxation (unrounded)
pub fn past_performance(quantity_supplied: f64, mse_relaxation: bool) -> f64 {
    let base = finite_or_zero(quantity_supplied).max(0.0) * PAST_PERFORMANCE_RATE;
    if mse_relaxation {
        base * MSE_FACTOR
    } else {
        base
    }
}

/// Goods only; summed across lots in lot-wise mode
pub fn past_performance_requirement(
    record: &ProcurementRecord,
) -> Option<PastPerformanceRequirement> {
    if record.tender_type != TenderType::Goods {
        return None;
    }

    let requirement = if record.evaluation_methodology.is_lot_wise() {
        let mut quantity = 0.0;
        let mut required = 0.0;
        let mut required_unrelaxed = 0.0;
        for lot in &record.lots {
            let q = num(lot.quantity);
            quantity += q;
            required += past_performance(q, lot.mse_relaxation);
            required_unrelaxed += past_performance(q, false);
        }
        PastPerformanceRequirement {
            quantity,
            required,
            required_unrelaxed,
            mse_relaxed: record.lots.iter().any(|l| l.mse_relaxation),
        }
    } else {
        let quantity = num(record.quantity_supplied);
        PastPerformanceRequirement {
            quantity,
            required: past_performance(quantity, record.mse_relaxation),
            required_unrelaxed: past_performance(quantity, false),
            mse_relaxed: record.mse_relaxation,
        }
    };

    Some(requirement)
}

// ==========================================
// Per-lot figures
// ==========================================

pub fn lot_calculations(record: &ProcurementRecord) -> Vec<LotCalculation> {
    if !record.evaluation_methodology.is_lot_wise() {
        return Vec::new();
    }

    let scale = divisibility_scale(record);
    let rate = TURNOVER_RATE * scale;
    let years = annualization_years(record);
    let service_years = if record.tender_type.is_service_or_works() {
        years
    } else {
        None
    };

    record
        .lots
        .iter()
        .map(|lot| {
            let cec = num(lot.cec_estimate_incl_gst);
            let required_quantity = (record.tender_type == TenderType::Goods)
                .then(|| past_performance(num(lot.quantity), lot.mse_relaxation));
            let experience = record.tender_type.is_service_or_works().then(|| {
                let tiers = ExperienceTiers::from_amount(cec * scale);
                match service_years {
                    Some(y) => tiers.map(|v| v / y),
                    None => tiers,
                }
            });

            LotCalculation {
                lot_id: lot.lot_id.clone(),
                cec_incl_gst: cec,
                emd_lakh: emd_lakh(cec, record.tender_type),
                turnover: annualize(lot_turnover_base(lot) * rate, years),
                past_performance: required_quantity,
                experience,
                mse_relaxation: lot.mse_relaxation,
            }
        })
        .collect()
}

// ==========================================
// Bundle
// ==========================================

#[instrument(skip(record), fields(ref_number = %record.ref_number))]
pub fn calculate(record: &ProcurementRecord) -> CalculatedValues {
    let lots = lot_calculations(record);
    let total_incl = total_cec_incl_gst(record);

    let emd = if record.evaluation_methodology.is_lot_wise() {
        lots.iter().map(|l| l.emd_lakh).sum()
    } else {
        emd_lakh(total_incl, record.tender_type)
    };

    let values = CalculatedValues {
        total_cec_incl_gst: total_incl,
        total_cec_excl_gst: total_cec_excl_gst(record),
        emd_lakh: emd,
        turnover: turnover_requirement(record),
        experience: experience_requirements(record),
        past_performance: past_performance_requirement(record),
        lots,
    };

    tracing::debug!(
        total_cec_incl_gst = values.total_cec_incl_gst,
        emd_lakh = values.emd_lakh,
        turnover = values.turnover.amount,
        lot_count = values.lots.len(),
        "derived values computed"
    );

    values
}

// ==========================================
// helpers
// ==========================================

/// Missing or non-finite numeric input counts as zero
pub(crate) fn num(value: Option<f64>) -> f64 {
    value.map(finite_or_zero).unwrap_or(0.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn annualize(amount: f64, years: Option<f64>) -> f64 {
    match years {
        Some(y) => amount / y,
        None => amount,
    }
}

fn round_units(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}
