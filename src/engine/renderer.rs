// ==========================================
// BQC Generator - document renderer
// ==========================================
// Input: NormalizedRecord + CalculatedValues + RenderContext
// Output: format-neutral Document tree
// Rule: every branch is decided by RenderContext; section
//       builders only format, they never recompute figures
// ==========================================

use crate::document::model::{
    Alignment, Block, Document, Paragraph, ParagraphStyle, Run, Table, TableCell, TableRow,
};
use crate::domain::procurement::ExplanatoryNote;
use crate::engine::calculator::{CalculatedValues, ExperienceTiers, LotCalculation, num};
use crate::engine::formatting::{
    crore_to_rupees, currency_format, format_decimal, format_indian_rupees, lakh_to_rupees,
};
use crate::engine::normalizer::{NormalizedRecord, NOT_AVAILABLE};
use crate::engine::render_context::{CriteriaShape, EvaluationShape, RenderContext};
use tracing::instrument;

pub const DOCUMENT_TITLE: &str = "BID QUALIFICATION CRITERIA (BQC)";

/// A4 text width with 1-inch margins (twips)
const TEXT_WIDTH: u32 = 9026;

/// Indent for criteria bodies (twips)
const BODY_INDENT: u32 = 360;

// ==========================================
// Entry point
// ==========================================

#[instrument(skip_all, fields(ref_number = %normalized.ref_number))]
pub fn render_document(
    normalized: &NormalizedRecord,
    values: &CalculatedValues,
    ctx: &RenderContext,
) -> Document {
    let renderer = DocumentRenderer {
        n: normalized,
        v: values,
        ctx,
    };

    let mut doc = Document::new(format!("BQC - {}", normalized.ref_number));
    doc.author = normalized
        .signatories
        .first()
        .map(|s| s.name.clone())
        .filter(|name| name != NOT_AVAILABLE);

    doc.extend(renderer.header());
    doc.extend(renderer.preamble());
    doc.extend(renderer.cost_estimate());
    doc.extend(renderer.qualification_criteria());
    doc.extend(renderer.additional_criteria());
    doc.extend(renderer.evaluation());
    doc.extend(renderer.earnest_money());
    doc.extend(renderer.performance_security());
    doc.extend(renderer.approval());

    tracing::debug!(blocks = doc.blocks.len(), "document tree assembled");
    doc
}

struct DocumentRenderer<'a> {
    n: &'a NormalizedRecord,
    v: &'a CalculatedValues,
    ctx: &'a RenderContext,
}

impl DocumentRenderer<'_> {
    // ==========================================
    // Header
    // ==========================================

    fn header(&self) -> Vec<Block> {
        let title = Paragraph::new(vec![Run::bold_text(DOCUMENT_TITLE).size(14).underline()])
            .align(Alignment::Center)
            .style(ParagraphStyle::Title)
            .spacing_after(240);

        let ref_line = Paragraph::new(vec![
            Run::bold_text("Ref No: "),
            Run::text(self.n.ref_number.as_str()),
        ])
        .spacing_after(0);

        let date_line = Paragraph::new(vec![
            Run::bold_text("Date: "),
            Run::text(self.n.document_date.as_str()),
        ])
        .align(Alignment::Right);

        let subject = Paragraph::new(vec![
            Run::bold_text("Subject: "),
            Run::text(format!(
                "Bid Qualification Criteria for {}",
                self.n.description
            )),
        ])
        .align(Alignment::Justify)
        .spacing_after(240);

        vec![
            Block::Paragraph(title),
            Block::Paragraph(ref_line),
            Block::Paragraph(date_line),
            Block::Paragraph(subject),
        ]
    }

    // ==========================================
    // 1. Preamble
    // ==========================================

    fn preamble(&self) -> Vec<Block> {
        let body = format!(
            "The cost estimate for \"{}\" has been approved by the Contract Estimate \
             Committee on the indent of {}. The Bid Qualification Criteria, Evaluation \
             Methodology and Earnest Money Deposit proposed for the {} tender are \
             placed below for approval.",
            self.n.description,
            self.n.indenting_department,
            self.ctx.tender_type
        );
        vec![
            heading(self.ctx.sections.preamble, "Preamble"),
            body_paragraph(body),
        ]
    }

    // ==========================================
    // 2. Cost estimate
    // ==========================================

    fn cost_estimate(&self) -> Vec<Block> {
        let record = &self.n.record;
        let mut rows = vec![
            ("Tender Type", self.ctx.tender_type.to_string()),
            ("Evaluation Methodology", record.evaluation_methodology.to_string()),
            ("Divisibility", record.divisibility.to_string()),
            (
                "CEC Estimate (incl. GST)",
                rupees_from_crore(self.v.total_cec_incl_gst),
            ),
            (
                "CEC Estimate (excl. GST)",
                rupees_from_crore(self.v.total_cec_excl_gst),
            ),
        ];
        if self.ctx.divisible {
            rows.push((
                "Correction Factor",
                format_decimal(num(record.correction_factor).clamp(0.0, 1.0), 2),
            ));
        }
        if self.ctx.has_amc {
            rows.push(("AMC / CAMC Value", rupees_from_crore(num(record.amc_value))));
        }
        if self.ctx.has_om {
            rows.push(("O&M Value", rupees_from_crore(num(record.om_value))));
        }
        rows.push((
            "Contract Duration (years)",
            self.n.contract_duration.clone(),
        ));
        if self.ctx.is_lot_wise() {
            rows.push(("Number of Lots", self.n.lots.len().to_string()));
        }

        let table_rows = rows
            .into_iter()
            .map(|(label, value)| {
                TableRow::new(vec![
                    TableCell::new(vec![
                        Paragraph::new(vec![Run::bold_text(label)]).spacing_after(0)
                    ]),
                    TableCell::text(value),
                ])
            })
            .collect();

        vec![
            heading(self.ctx.sections.estimate, "Cost Estimate"),
            Block::Table(Table::new(table_rows, vec![3600, TEXT_WIDTH - 3600])),
            spacer(),
        ]
    }

    // ==========================================
    // 3. Bid qualification criteria
    // ==========================================

    fn qualification_criteria(&self) -> Vec<Block> {
        let section = self.ctx.sections.bqc;
        let mut blocks = vec![heading(section, "Bid Qualification Criteria")];

        blocks.push(subheading(format!("{}.1 Technical Criteria", section)));
        match self.ctx.criteria {
            CriteriaShape::PastPerformance { dual } => {
                blocks.extend(self.past_performance_blocks(dual));
                if self.ctx.notes.past_performance {
                    blocks.push(note_block(&self.n.record.past_performance_note));
                }
            }
            CriteriaShape::Experience { dual } => {
                blocks.extend(self.experience_blocks(dual));
                if self.ctx.notes.experience {
                    blocks.push(note_block(&self.n.record.experience_note));
                }
            }
        }

        blocks.push(subheading(format!("{}.2 Financial Criteria", section)));
        blocks.extend(self.financial_blocks());
        if self.ctx.notes.financial {
            blocks.push(note_block(&self.n.record.financial_note));
        }

        blocks
    }

    fn past_performance_blocks(&self, dual: bool) -> Vec<Block> {
        let unit = &self.n.quantity_unit;
        let Some(pp) = self.v.past_performance else {
            return vec![body_paragraph(NOT_AVAILABLE)];
        };

        let lead = "The bidder should have successfully executed supplies of similar \
                    items during the last three financial years, in any one financial year, \
                    of quantity not less than";

        if self.ctx.is_lot_wise() {
            return vec![
                body_paragraph(format!(
                    "{} 30% of the quantity of the lot(s) bid for. Lot-wise requirements \
                     are listed in Section {}.",
                    lead, self.ctx.sections.evaluation
                )),
                body_paragraph(format!(
                    "Aggregate requirement for all lots: {} {} (against a total quantity \
                     of {} {}).",
                    pp.rounded(),
                    unit,
                    format_decimal(pp.quantity, 2),
                    unit
                )),
            ];
        }

        if dual {
            vec![
                body_paragraph(format!("{}:", lead)),
                labelled(
                    "(a) For MSE bidders: ",
                    format!(
                        "{} {} (30% of {} {}, after 15% MSE relaxation)",
                        pp.rounded(),
                        unit,
                        format_decimal(pp.quantity, 2),
                        unit
                    ),
                ),
                labelled(
                    "(b) For other bidders: ",
                    format!(
                        "{} {} (30% of {} {})",
                        pp.rounded_unrelaxed(),
                        unit,
                        format_decimal(pp.quantity, 2),
                        unit
                    ),
                ),
            ]
        } else {
            vec![body_paragraph(format!(
                "{} {} {} (30% of the quantity to be supplied, {} {}).",
                lead,
                pp.rounded(),
                unit,
                format_decimal(pp.quantity, 2),
                unit
            ))]
        }
    }

    fn experience_blocks(&self, dual: bool) -> Vec<Block> {
        let experience = &self.v.experience;
        let mut blocks = vec![body_paragraph(
            "The bidder should have satisfactorily completed similar works during the \
             last seven years ending on the last day of the month previous to the one \
             in which the bid is invited, as per any one of the following options:",
        )];

        if self.ctx.is_lot_wise() {
            blocks.push(body_paragraph(format!(
                "The values are applied to the lot(s) bid for, as listed in Section {}.",
                self.ctx.sections.evaluation
            )));
        } else if dual {
            blocks.push(labelled("(a) For MSE bidders:", String::new()));
            blocks.extend(experience_options(&experience.requirement));
            blocks.push(labelled("(b) For other bidders:", String::new()));
            blocks.extend(experience_options(&experience.unrelaxed()));
        } else {
            blocks.extend(experience_options(&experience.requirement));
        }

        if let Some(years) = experience.annualized_over {
            blocks.push(body_paragraph(format!(
                "The above values are annualized over the contract duration of {} years.",
                format_decimal(years, 2)
            )));
        }

        blocks.push(labelled(
            "Similar work means: ",
            self.n.similar_work_definition.clone(),
        ));
        blocks
    }

    fn financial_blocks(&self) -> Vec<Block> {
        let turnover = &self.v.turnover;
        let mut blocks = vec![body_paragraph(format!(
            "The average annual financial turnover of the bidder during the last three \
             financial years, ending 31st March of the previous financial year, should be \
             at least {}.",
            rupees_from_crore(turnover.amount)
        ))];

        let mut basis = vec![format!(
            "{}% of {}",
            format_decimal(turnover.rate * 100.0, 2),
            rupees_from_crore(turnover.base_amount)
        )];
        if self.ctx.divisible {
            basis.push(format!(
                "the rate includes the correction factor of {}",
                format_decimal(num(self.n.record.correction_factor).clamp(0.0, 1.0), 2)
            ));
        }
        if self.ctx.has_amc || self.n.record.lots.iter().any(|l| l.has_amc) {
            basis.push("AMC / CAMC value excluded from the base".to_string());
        }
        if let Some(years) = turnover.annualized_over {
            basis.push(format!(
                "annualized over {} years",
                format_decimal(years, 2)
            ));
        }
        blocks.push(labelled("Basis: ", basis.join("; ")));
        blocks
    }

    // ==========================================
    // 4. Additional criteria
    // ==========================================

    fn additional_criteria(&self) -> Vec<Block> {
        let mut blocks = vec![
            heading(self.ctx.sections.additional, "Additional Criteria"),
            body_paragraph(self.n.additional_criteria.as_str()),
        ];
        if self.ctx.notes.additional {
            blocks.push(note_block(&self.n.record.additional_note));
        }
        blocks
    }

    // ==========================================
    // 5. Evaluation methodology
    // ==========================================

    fn evaluation(&self) -> Vec<Block> {
        let mut blocks = vec![heading(
            self.ctx.sections.evaluation,
            "Evaluation Methodology",
        )];

        match self.ctx.evaluation {
            EvaluationShape::SingleEstimate => {
                blocks.push(body_paragraph(
                    "Evaluation shall be carried out on overall lowest (L1) basis for the \
                     complete scope of the tender. Bidders must quote for all items.",
                ));
            }
            EvaluationShape::LotWise => {
                blocks.push(body_paragraph(
                    "Evaluation shall be carried out lot-wise on lowest (L1) basis. \
                     Bidders may quote for one or more lots and must meet the criteria \
                     of every lot quoted for, as tabulated below.",
                ));
                blocks.push(Block::Table(self.lot_table()));
                blocks.push(spacer());
            }
        }
        blocks
    }

    fn lot_table(&self) -> Table {
        let goods = matches!(self.ctx.criteria, CriteriaShape::PastPerformance { .. });
        let last_column = if goods {
            "Past Performance"
        } else {
            "Experience (A / B / C)"
        };

        let mut rows = vec![TableRow::header(&[
            "Lot",
            "CEC (incl. GST)",
            "EMD",
            "Turnover",
            last_column,
        ])];

        for (lot, display) in self.v.lots.iter().zip(&self.n.lots) {
            rows.push(TableRow::new(vec![
                TableCell::text(display.lot_id.as_str()),
                TableCell::text(rupees_from_crore(lot.cec_incl_gst)),
                TableCell::text(emd_short(lot.emd_lakh)),
                TableCell::text(rupees_from_crore(lot.turnover)),
                TableCell::text(self.lot_criterion(lot)),
            ]));
        }

        Table::new(rows, vec![1300, 2000, 1500, 2000, TEXT_WIDTH - 6800])
    }

    fn lot_criterion(&self, lot: &LotCalculation) -> String {
        let mse = if lot.mse_relaxation { " (MSE relaxed)" } else { "" };
        match (lot.past_performance, lot.experience) {
            (Some(quantity), _) => format!(
                "{} {}{}",
                format_decimal(quantity, 0),
                self.n.quantity_unit,
                mse
            ),
            (None, Some(tiers)) => tiers
                .options()
                .iter()
                .map(|(label, option)| format!("{}: {}", label, rupees_from_crore(option.value)))
                .collect::<Vec<_>>()
                .join("\n"),
            (None, None) => NOT_AVAILABLE.to_string(),
        }
    }

    // ==========================================
    // 6. Earnest money deposit
    // ==========================================

    fn earnest_money(&self) -> Vec<Block> {
        let emd = self.v.emd_lakh;
        let amount = if emd > 0.0 {
            format!(
                "Rs. {} Lakh (Rs. {})",
                format_decimal(emd, 2),
                format_indian_rupees(lakh_to_rupees(emd))
            )
        } else {
            "Nil".to_string()
        };

        let mut blocks = vec![
            heading(self.ctx.sections.emd, "Earnest Money Deposit (EMD)"),
            labelled("EMD: ", amount),
        ];
        if self.ctx.is_lot_wise() && emd > 0.0 {
            blocks.push(body_paragraph(format!(
                "The above is the total for all lots; lot-wise EMD is listed in Section {}.",
                self.ctx.sections.evaluation
            )));
        }
        if emd > 0.0 {
            blocks.push(body_paragraph(
                "Micro and Small Enterprises registered with the notified agencies for the \
                 tendered items are exempted from submission of EMD.",
            ));
        }
        if self.ctx.notes.emd {
            blocks.push(note_block(&self.n.record.emd_note));
        }
        blocks
    }

    // ==========================================
    // 7. Performance security (optional)
    // ==========================================

    fn performance_security(&self) -> Vec<Block> {
        let Some(section) = self.ctx.sections.performance_security else {
            return Vec::new();
        };

        let percent = num(self.n.record.performance_security_percent);
        let rate = if percent > 0.0 {
            format!("{}% of the contract value", format_decimal(percent, 2))
        } else {
            "the rate stipulated in the tender conditions".to_string()
        };

        vec![
            heading(section, "Performance Security"),
            body_paragraph(format!(
                "The successful bidder shall furnish a Performance Security at {}, valid \
                 for a period of 60 days beyond the completion of all contractual \
                 obligations.",
                rate
            )),
        ]
    }

    // ==========================================
    // Approval required
    // ==========================================

    fn approval(&self) -> Vec<Block> {
        let references = self
            .ctx
            .sections
            .approval_references()
            .into_iter()
            .map(|(number, title)| format!("{} (Section {})", title, number))
            .collect::<Vec<_>>()
            .join(", ");

        let roles: Vec<&str> = self.n.signatories.iter().map(|s| s.role).collect();
        let names = TableRow::new(
            self.n
                .signatories
                .iter()
                .map(|s| {
                    TableCell::new(vec![
                        Paragraph::new(vec![Run::bold_text(s.name.as_str())])
                            .align(Alignment::Center)
                            .spacing_after(0),
                    ])
                })
                .collect(),
        );
        let designations = TableRow::new(
            self.n
                .signatories
                .iter()
                .map(|s| {
                    TableCell::new(vec![Paragraph::plain(s.designation.as_str())
                        .align(Alignment::Center)
                        .spacing_after(0)])
                })
                .collect(),
        );

        let column = TEXT_WIDTH / 4;
        vec![
            heading(self.ctx.sections.approval, "Approval Required"),
            body_paragraph(format!("Approval is solicited for the {}.", references)),
            spacer(),
            Block::Table(
                Table::new(
                    vec![TableRow::header(&roles), names, designations],
                    vec![column; 4],
                )
                .without_borders(),
            ),
        ]
    }
}

// ==========================================
// Builders
// ==========================================

fn heading(number: u32, title: &str) -> Block {
    Block::Paragraph(Paragraph::heading(format!("{}. {}", number, title)))
}

fn subheading(text: String) -> Block {
    Block::Paragraph(Paragraph::subheading(text).indent(BODY_INDENT / 2))
}

fn body_paragraph(text: impl Into<String>) -> Block {
    Block::Paragraph(
        Paragraph::plain(text)
            .align(Alignment::Justify)
            .indent(BODY_INDENT),
    )
}

fn labelled(label: &str, value: String) -> Block {
    let mut runs = vec![Run::bold_text(label)];
    if !value.is_empty() {
        runs.push(Run::text(value));
    }
    Block::Paragraph(Paragraph::new(runs).indent(BODY_INDENT))
}

fn spacer() -> Block {
    Block::Paragraph(Paragraph::plain("").spacing_after(0))
}

/// "Note:" followed by the converted note HTML
fn note_block(note: &ExplanatoryNote) -> Block {
    let mut runs = vec![Run::bold_text("Note: ").italic()];
    runs.extend(
        super::rich_text::html_to_runs(&note.note_html)
            .into_iter()
            .map(Run::italic),
    );
    Block::Paragraph(
        Paragraph::new(runs)
            .align(Alignment::Justify)
            .indent(BODY_INDENT),
    )
}

fn experience_options(tiers: &ExperienceTiers) -> Vec<Block> {
    let [a, b, c] = tiers.options();
    vec![
        labelled(
            "Option A: ",
            format!(
                "Three similar completed works, each of value not less than {} ({}% of the estimate).",
                rupees_from_crore(a.1.value),
                format_decimal(a.1.percent * 100.0, 2)
            ),
        ),
        labelled(
            "Option B: ",
            format!(
                "Two similar completed works, each of value not less than {} ({}% of the estimate).",
                rupees_from_crore(b.1.value),
                format_decimal(b.1.percent * 100.0, 2)
            ),
        ),
        labelled(
            "Option C: ",
            format!(
                "One similar completed work of value not less than {} ({}% of the estimate).",
                rupees_from_crore(c.1.value),
                format_decimal(c.1.percent * 100.0, 2)
            ),
        ),
    ]
}

/// Crore amount rendered in Crore / Lacs wording
fn rupees_from_crore(crore: f64) -> String {
    format!("Rs. {}", currency_format(crore_to_rupees(crore)))
}

fn emd_short(lakh: f64) -> String {
    if lakh > 0.0 {
        format!("Rs. {} Lakh", format_decimal(lakh, 2))
    } else {
        "Nil".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::procurement::{LotRecord, ProcurementRecord, Signatory};
    use crate::domain::types::{EvaluationMethodology, TenderType};
    use crate::engine::calculator::calculate;
    use crate::engine::normalizer::normalize;

    fn render(record: &ProcurementRecord) -> Document {
        let values = calculate(record);
        let ctx = RenderContext::resolve(record, &values);
        render_document(&normalize(record), &values, &ctx)
    }

    fn goods() -> ProcurementRecord {
        ProcurementRecord {
            ref_number: "MM/GDS/2024/017".to_string(),
            description: Some("Supply of centrifugal pumps".to_string()),
            tender_type: TenderType::Goods,
            cec_estimate_incl_gst: Some(2.0),
            cec_estimate_excl_gst: Some(1.7),
            quantity_supplied: Some(1000.0),
            quantity_unit: Some("Nos".to_string()),
            ..Default::default()
        }
    }

    fn approval_text(doc: &Document) -> String {
        let text = doc.plain_text();
        let start = text.find("Approval Required").unwrap_or(0);
        text[start..].to_string()
    }

    #[test]
    fn test_goods_single_estimate_sections() {
        let doc = render(&goods());
        let text = doc.plain_text();

        assert!(text.starts_with(DOCUMENT_TITLE));
        assert!(text.contains("Ref No: MM/GDS/2024/017"));
        assert!(text.contains("3. Bid Qualification Criteria"));
        assert!(text.contains("300 Nos"));
        assert!(text.contains("EMD: Rs. 2.5 Lakh (Rs. 2,50,000)"));
        assert!(text.contains("7. Approval Required"));
        assert!(!text.contains("Option A"));
        assert!(!text.contains("Performance Security"));
    }

    #[test]
    fn test_goods_mse_dual_blocks() {
        let mut record = goods();
        record.mse_relaxation = true;
        let text = render(&record).plain_text();

        assert!(text.contains("(a) For MSE bidders: 255 Nos"));
        assert!(text.contains("(b) For other bidders: 300 Nos"));
    }

    #[test]
    fn test_service_experience_options() {
        let record = ProcurementRecord {
            ref_number: "SRV/1".to_string(),
            tender_type: TenderType::Service,
            cec_estimate_incl_gst: Some(10.0),
            contract_duration_years: Some(2.0),
            mse_relaxation: true,
            similar_work_definition: Some("Housekeeping of industrial premises".to_string()),
            ..Default::default()
        };
        let text = render(&record).plain_text();

        assert!(text.contains("Option A"));
        assert!(text.contains("Option C"));
        assert!(text.contains("(a) For MSE bidders:"));
        assert!(text.contains("annualized over the contract duration of 2 years"));
        assert!(text.contains("Similar work means: Housekeeping of industrial premises"));
        // 0.4 * 10 Cr / 2 years without relaxation
        assert!(text.contains("Rs. 2.00 Crore"));
        assert!(!text.contains("Past Performance"));
    }

    #[test]
    fn test_lot_wise_table_rows() {
        let mut record = goods();
        record.evaluation_methodology = EvaluationMethodology::LotWise;
        record.lots = vec![
            LotRecord {
                lot_id: "L1".to_string(),
                cec_estimate_incl_gst: Some(1.2),
                quantity: Some(100.0),
                ..Default::default()
            },
            LotRecord {
                cec_estimate_incl_gst: Some(0.6),
                quantity: Some(20.0),
                mse_relaxation: true,
                ..Default::default()
            },
        ];

        let doc = render(&record);
        let lot_table = doc
            .tables()
            .find(|t| t.column_count() == 5)
            .expect("lot table");
        assert_eq!(lot_table.rows.len(), 3);
        assert!(lot_table.rows[0].is_header);

        let text = doc.plain_text();
        assert!(text.contains("L1 | Rs. 1.20 Crore | Rs. 2.5 Lakh"));
        assert!(text.contains("Lot 2 | Rs. 60.00 Lacs | Nil"));
        assert!(text.contains("5 Nos (MSE relaxed)"));
    }

    #[test]
    fn test_notes_follow_toggles() {
        let mut record = goods();
        record.emd_note = ExplanatoryNote::new("Pay via <b>NEFT</b>");
        record.financial_note = ExplanatoryNote {
            has_note: false,
            note_html: "Hidden financial note".to_string(),
        };
        let doc = render(&record);
        let text = doc.plain_text();

        assert!(text.contains("Note: Pay via NEFT"));
        assert!(!text.contains("Hidden financial note"));

        let note = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Paragraph(p) if p.text().contains("NEFT") => Some(p),
                _ => None,
            })
            .expect("note paragraph");
        assert!(note.runs.iter().any(|r| r.text == "NEFT" && r.bold && r.italic));
    }

    #[test]
    fn test_approval_references_follow_numbering() {
        let text = approval_text(&render(&goods()));
        assert!(text.contains("Bid Qualification Criteria (Section 3)"));
        assert!(text.contains("Earnest Money Deposit (Section 6)"));
        assert!(!text.contains("Performance Security"));

        let mut record = goods();
        record.has_performance_security = true;
        record.performance_security_percent = Some(5.0);
        let doc = render(&record);
        let full = doc.plain_text();
        assert!(full.contains("7. Performance Security"));
        assert!(full.contains("5% of the contract value"));
        assert!(approval_text(&doc).starts_with("Approval Required"));
        assert!(full.contains("8. Approval Required"));
        assert!(approval_text(&doc).contains("Performance Security (Section 7)"));
    }

    #[test]
    fn test_signatory_table() {
        let mut record = goods();
        record.approval.proposed_by = Signatory::new("A. Rao", "Manager (MM)");
        let doc = render(&record);
        let table = doc.tables().last().expect("signatory table");

        assert!(!table.borders);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.column_count(), 4);
        let text = approval_text(&doc);
        assert!(text.contains("Proposed by | Recommended by | Concurred by | Approved by"));
        assert!(text.contains("A. Rao | N/A | N/A | N/A"));
        assert_eq!(doc.author.as_deref(), Some("A. Rao"));
    }

    #[test]
    fn test_zero_estimate_renders_without_nan() {
        let record = ProcurementRecord {
            tender_type: TenderType::Works,
            contract_duration_years: Some(f64::NAN),
            ..Default::default()
        };
        let text = render(&record).plain_text();
        assert!(!text.contains("NaN"));
        assert!(text.contains("EMD: Nil"));
    }
}
