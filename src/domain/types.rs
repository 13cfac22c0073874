// ==========================================
// BQC Generator - domain type definitions
// ==========================================
// Wire names follow the procurement form payload:
// "Goods" / "single-estimate" / "Non-Divisible" / "docx"
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Tender type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TenderType {
    #[default]
    Goods,
    #[serde(alias = "Services")]
    Service,
    Works,
}

impl TenderType {
    /// Service and Works share the experience / annualization rules
    pub fn is_service_or_works(&self) -> bool {
        matches!(self, TenderType::Service | TenderType::Works)
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            TenderType::Goods => "Goods",
            TenderType::Service => "Service",
            TenderType::Works => "Works",
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s.trim() {
            "Service" | "Services" => TenderType::Service,
            "Works" => TenderType::Works,
            _ => TenderType::Goods,
        }
    }
}

impl fmt::Display for TenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

// ==========================================
// Evaluation methodology
// ==========================================
// Decides which CEC source is authoritative: the top-level
// estimate fields or the lots[] sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EvaluationMethodology {
    #[default]
    #[serde(rename = "single-estimate", alias = "single")]
    SingleEstimate,
    #[serde(rename = "lot-wise", alias = "lotwise")]
    LotWise,
}

impl EvaluationMethodology {
    pub fn is_lot_wise(&self) -> bool {
        matches!(self, EvaluationMethodology::LotWise)
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            EvaluationMethodology::SingleEstimate => "single-estimate",
            EvaluationMethodology::LotWise => "lot-wise",
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s.trim() {
            "lot-wise" | "lotwise" => EvaluationMethodology::LotWise,
            _ => EvaluationMethodology::SingleEstimate,
        }
    }
}

impl fmt::Display for EvaluationMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

// ==========================================
// Divisibility
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Divisibility {
    Divisible,
    #[default]
    #[serde(rename = "Non-Divisible", alias = "NonDivisible")]
    NonDivisible,
}

impl Divisibility {
    pub fn is_divisible(&self) -> bool {
        matches!(self, Divisibility::Divisible)
    }
}

impl fmt::Display for Divisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Divisibility::Divisible => write!(f, "Divisible"),
            Divisibility::NonDivisible => write!(f, "Non-Divisible"),
        }
    }
}

// ==========================================
// Output document format
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Docx,
}

impl DocumentFormat {
    /// Parse the `format` field of a generation request (case-insensitive)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
        }
    }
}

// ==========================================
// Caller role (supplied by the auth gateway)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn from_header(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("admin") {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }
}
