// ==========================================
// Fill a database with sample BQC submissions
// ==========================================
// usage: seed_demo_submissions [db_path] [count] [--reset]
// ==========================================

use chrono::{Duration, Local, Utc};
use std::error::Error;
use std::fs;
use std::path::Path;

use bqc_generator::config::default_db_path;
use bqc_generator::domain::{
    ApprovalChain, Divisibility, EvaluationMethodology, ExplanatoryNote, LotRecord,
    ProcurementRecord, Signatory, TenderType,
};
use bqc_generator::repository::ProcurementRepository;

const DEFAULT_COUNT: usize = 24;
const DEMO_USERS: [&str; 3] = ["demo-user-1", "demo-user-2", "demo-user-3"];
const DEPARTMENTS: [&str; 4] = ["Mechanical", "Electrical", "Civil", "Signal & Telecom"];

fn main() -> Result<(), Box<dyn Error>> {
    bqc_generator::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let reset = args.iter().any(|a| a == "--reset");
    let mut positional = args.iter().filter(|a| !a.starts_with("--"));

    let db_path = positional.next().cloned().unwrap_or_else(default_db_path);
    let count = positional
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_COUNT)
        .max(1);

    if reset {
        backup_and_reset_db(&db_path)?;
    }

    let repo = ProcurementRepository::new(&db_path)?;
    let now = Utc::now();

    for i in 0..count {
        let user_id = DEMO_USERS[i % DEMO_USERS.len()];
        let record = demo_record(i);
        // spread creation dates over roughly the last six months
        let created = now - Duration::days((i as i64) * 7);
        let id = repo.upsert_at(user_id, &record.ref_number, &record, created)?;
        tracing::debug!(user_id, id = %id, ref_number = %record.ref_number, "seeded");
    }

    eprintln!(
        "Seeded {} submissions into {} (total rows: {})",
        count,
        db_path,
        repo.count_all()?
    );
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn demo_record(i: usize) -> ProcurementRecord {
    let department = DEPARTMENTS[i % DEPARTMENTS.len()];
    let base = 0.25 + (i as f64) * 0.85;

    let mut record = ProcurementRecord {
        ref_number: format!("DEMO/{}/{:03}", department_code(department), i + 1),
        description: Some(format!("{} procurement package {}", department, i + 1)),
        indenting_department: Some(department.to_string()),
        cec_estimate_incl_gst: Some(base * 1.18),
        cec_estimate_excl_gst: Some(base),
        contract_duration_years: Some(1.0 + (i % 3) as f64),
        approval: demo_approval(),
        ..Default::default()
    };

    match i % 4 {
        0 => {
            record.tender_type = TenderType::Goods;
            record.quantity_supplied = Some(100.0 + (i as f64) * 10.0);
            record.quantity_unit = Some("Nos".to_string());
            record.mse_relaxation = true;
        }
        1 => {
            record.tender_type = TenderType::Service;
            record.has_amc = true;
            record.amc_value = Some(base * 0.1);
            record.similar_work_definition =
                Some("Comprehensive maintenance of <b>rolling stock</b> equipment".to_string());
            record.experience_note =
                ExplanatoryNote::new("Completion certificates must be enclosed.");
        }
        2 => {
            record.tender_type = TenderType::Works;
            record.divisibility = Divisibility::Divisible;
            record.correction_factor = Some(0.25);
            record.has_performance_security = true;
            record.performance_security_percent = Some(5.0);
        }
        _ => {
            record.tender_type = TenderType::Goods;
            record.evaluation_methodology = EvaluationMethodology::LotWise;
            record.cec_estimate_incl_gst = None;
            record.cec_estimate_excl_gst = None;
            record.lots = (1..=3)
                .map(|n| LotRecord {
                    lot_id: format!("Lot-{}", n),
                    description: Some(format!("Part {}", n)),
                    cec_estimate_incl_gst: Some(base * n as f64 * 0.4),
                    cec_estimate_excl_gst: Some(base * n as f64 * 0.34),
                    quantity: Some(50.0 * n as f64),
                    mse_relaxation: n % 2 == 1,
                    ..Default::default()
                })
                .collect();
        }
    }

    record
}

fn department_code(department: &str) -> String {
    department
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

fn demo_approval() -> ApprovalChain {
    ApprovalChain {
        proposed_by: Signatory::new("A. Sharma", "Assistant Materials Manager"),
        recommended_by: Signatory::new("R. Iyer", "Deputy Chief Materials Manager"),
        concurred_by: Signatory::new("S. Gupta", "Senior Finance Advisor"),
        approved_by: Signatory::new("P. Nair", "Principal Chief Materials Manager"),
    }
}
