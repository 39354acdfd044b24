//! Simulation mode: a deterministic, network-free stand-in for the
//! analysis service.
//!
//! The demonstration dataset is a fixed rental agreement; questions are
//! routed through an ordered table of keyword triggers, first match wins.
//! Everything here returns the same output for the same input, so the
//! canned flows are exercisable under plain `cargo test`.

use shared_types::{AnalyzeResponse, AnswerResponse, Clause, RiskLevel};

pub const DEMO_DOCUMENT_ID: &str = "demo-001";
pub const DEMO_DOCUMENT_NAME: &str = "Rental_Agreement_Karachi_2024.pdf";
pub const DEMO_CONFIDENCE: f64 = 0.91;

/// Notice shown instead of a report binary; simulation mode has nothing to
/// download.
pub const REPORT_NOTICE: &str =
    "PDF download needs the analysis service. Disable demo mode and upload a real document.";

/// The canned analysis result. `file_name` labels the session when the user
/// actually offered a file; otherwise the demonstration name is used.
pub fn demo_analysis(file_name: Option<&str>) -> AnalyzeResponse {
    AnalyzeResponse {
        document_id: DEMO_DOCUMENT_ID.to_string(),
        document_name: file_name.unwrap_or(DEMO_DOCUMENT_NAME).to_string(),
        clauses: demo_clauses(),
    }
}

pub fn demo_clauses() -> Vec<Clause> {
    fn clause(
        id: u32,
        clause_type: &str,
        risk: RiskLevel,
        original: &str,
        explanation: &str,
        note: Option<&str>,
    ) -> Clause {
        Clause {
            id,
            clause_type: clause_type.to_string(),
            risk,
            original: original.to_string(),
            explanation: explanation.to_string(),
            note: note.map(str::to_string),
        }
    }

    vec![
        clause(
            1,
            "Termination",
            RiskLevel::High,
            "The landlord reserves the right to terminate this agreement with 7 days written notice for any reason deemed appropriate by the landlord at their sole discretion.",
            "مالک مکان بغیر کسی خاص وجہ کے صرف 7 دن کے نوٹس پر آپ کو گھر خالی کروا سکتا ہے۔ یہ آپ کے لیے انتہائی نقصان دہ ہے۔ دستخط سے پہلے اس شق پر مذاکرہ ضرور کریں۔",
            Some("Landlord can evict with only 7 days notice. Negotiate for minimum 60 days."),
        ),
        clause(
            2,
            "Payment and Penalty",
            RiskLevel::Medium,
            "Late payment of monthly rent shall incur a financial penalty of five percent (5%) per week on the outstanding amount, compounded on a monthly basis.",
            "اگر کرایہ دیر سے دیا تو ہر ہفتے 5 فیصد جرمانہ لگے گا۔ ایک مہینے کی تاخیر بھی بڑی رقم بن سکتی ہے۔",
            Some("5% weekly penalty compounded monthly. One missed month could cost 20%+ extra."),
        ),
        clause(
            3,
            "Maintenance",
            RiskLevel::Safe,
            "The landlord shall remain solely responsible for all structural repairs and general maintenance where the cost thereof exceeds Pakistani Rupees Ten Thousand (PKR 10,000).",
            "10,000 روپے سے اوپر کی تمام مرمت مالک مکان کی ذمہ داری ہے۔ یہ آپ کے لیے فائدہ مند شق ہے۔",
            None,
        ),
        clause(
            4,
            "Arbitration",
            RiskLevel::High,
            "Any disputes arising under this agreement shall be submitted exclusively to binding arbitration. The tenant hereby waives the right to pursue matters through civil courts of law.",
            "اگر کوئی تنازعہ ہو تو آپ عدالت نہیں جا سکتے۔ یہ عام طور پر مالک مکان کے حق میں ہوتا ہے۔",
            Some("You give up your right to civil court. Try to remove this clause entirely."),
        ),
        clause(
            5,
            "Liability Waiver",
            RiskLevel::High,
            "The landlord shall not be held liable for any damages to the tenant's personal property arising from structural defects, water leaks, electrical failures, or utility disruptions.",
            "اگر گھر کی خرابی سے سامان تباہ ہو تو مالک مکان ذمہ دار نہیں ہوگا۔ رہائش سے پہلے مکمل معائنہ کریں۔",
            Some("Landlord escapes all liability. Document move-in condition with timestamped photos."),
        ),
        clause(
            6,
            "Rent Increase",
            RiskLevel::Medium,
            "The landlord reserves the right to increase the monthly rent by up to fifteen percent (15%) annually, with thirty (30) days advance written notice to the tenant.",
            "مالک مکان ہر سال 15 فیصد تک کرایہ بڑھا سکتا ہے۔ 2 سال میں کرایہ 32 فیصد بڑھ سکتا ہے۔",
            Some("15% annually means rent grows ~32% over 2 years. Negotiate a cap at 8-10%."),
        ),
        clause(
            7,
            "Subletting",
            RiskLevel::Safe,
            "The tenant is strictly prohibited from subletting or sharing the premises with any third party without obtaining prior written consent from the landlord.",
            "بغیر مالک مکان کی تحریری اجازت کے آپ گھر کسی کو نہیں دے سکتے۔ یہ معیاری شق ہے۔",
            None,
        ),
        clause(
            8,
            "Security Deposit",
            RiskLevel::Safe,
            "A security deposit equivalent to two (2) months rent shall be retained by the landlord and returned within sixty (60) days of vacating, subject to deductions for damages.",
            "دو مہینے کا ڈپازٹ واپسی کے 60 دن بعد ملے گا۔ جاتے وقت گھر کی حالت کی تصویریں ضرور لیں۔",
            None,
        ),
    ]
}

struct CannedRoute {
    /// Case-insensitive substrings that select this answer.
    triggers: &'static [&'static str],
    answer_en: &'static str,
    answer_ur: &'static str,
    source: &'static str,
}

impl CannedRoute {
    fn response(&self) -> AnswerResponse {
        AnswerResponse {
            answer_en: self.answer_en.to_string(),
            answer_ur: Some(self.answer_ur.to_string()),
            source_clause: Some(self.source.to_string()),
            confidence: Some(DEMO_CONFIDENCE),
        }
    }
}

/// Routing table for canned answers. Evaluated top to bottom, first match
/// wins; the order is the routing priority.
const ROUTES: &[CannedRoute] = &[
    CannedRoute {
        triggers: &["late", "penalty", "جرمانہ"],
        answer_en: "If you pay rent late, a 5% weekly penalty is charged, compounded monthly. One month late can cost 20%+ more.",
        answer_ur: "اگر آپ نے کرایہ وقت پر نہیں دیا تو ہر ہفتے 5 فیصد جرمانہ لگے گا۔ ادائیگی میں تاخیر بڑی رقم بن سکتی ہے۔",
        source: "Clause 02 — Payment and Penalty",
    },
    CannedRoute {
        triggers: &["evict", "terminate", "نکال"],
        answer_en: "Yes — the landlord can evict with only 7 days notice and no stated reason. This is a High Risk clause.",
        answer_ur: "ہاں، مالک مکان صرف 7 دن کے نوٹس پر بغیر وجہ بتائے آپ کو گھر خالی کروا سکتا ہے۔",
        source: "Clause 01 — Termination",
    },
    CannedRoute {
        triggers: &["deposit", "واپس", "ڈپازٹ"],
        answer_en: "The security deposit is 2 months rent, returned within 60 days of vacating minus any damage deductions.",
        answer_ur: "دو مہینے کا ڈپازٹ واپسی کے 60 دن بعد ملے گا۔ جاتے وقت گھر کی تصویریں ضرور لیں۔",
        source: "Clause 08 — Security Deposit",
    },
    CannedRoute {
        triggers: &["court", "arbitration", "عدالت"],
        answer_en: "You have waived your right to civil court. All disputes go to binding arbitration, which usually favors the landlord.",
        answer_ur: "آپ عدالت نہیں جا سکتے۔ صرف ثالثی کا راستہ ہے جو مالک مکان کے حق میں ہوتا ہے۔",
        source: "Clause 04 — Arbitration",
    },
    CannedRoute {
        triggers: &["rent", "increase", "کرایہ"],
        answer_en: "Rent can be increased up to 15% annually with 30 days notice. Over 2 years that is roughly 32% more.",
        answer_ur: "مالک مکان ہر سال 15 فیصد تک کرایہ بڑھا سکتا ہے۔ پہلے سے بجٹ بنائیں۔",
        source: "Clause 06 — Rent Increase",
    },
    CannedRoute {
        triggers: &["safe", "dangerous", "خطرناک", "محفوظ"],
        answer_en: "Most dangerous: Termination (7 days), Arbitration (no court), Liability Waiver. Safe: Maintenance, Subletting, Security Deposit.",
        answer_ur: "سب سے خطرناک: فسخ معاہدہ، ثالثی، ذمہ داری سے چھٹکارا۔ محفوظ: مرمت، ذیلی کرایہ، اور ڈپازٹ۔",
        source: "Overall Document Analysis",
    },
];

const FALLBACK: CannedRoute = CannedRoute {
    triggers: &[],
    answer_en: "Based on the document: it contains 3 high risk, 2 medium risk, and 3 safe clauses. Review carefully before signing.",
    answer_ur: "اس دستاویز میں 3 خطرناک، 2 درمیانی، اور 3 محفوظ شقیں ہیں۔ دستخط سے پہلے غور سے پڑھیں۔",
    source: "General Analysis",
};

/// Answer a question against the demonstration dataset.
pub fn demo_answer(question: &str) -> AnswerResponse {
    let question = question.to_lowercase();
    ROUTES
        .iter()
        .find(|route| route.triggers.iter().any(|t| question.contains(t)))
        .unwrap_or(&FALLBACK)
        .response()
}
