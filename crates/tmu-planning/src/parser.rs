//! Keyword-driven requirement analysis

use tmu_core::{RequirementAnalysis, RiskLevel};
use tracing::debug;

/// Requirement pre-filled in the input box
pub const DEFAULT_REQUIREMENT_TEXT: &str = "Users must login using email and password; admins can require OTP. Lock account after too many failures. Redirect to dashboard on success.";

pub const MISSING_PASSWORD_COMPLEXITY: &str =
    "password complexity policy (inferred, confidence=0.84)";
pub const MISSING_LOCKOUT_THRESHOLD: &str =
    "max failed attempts before lockout (inferred, confidence=0.81)";
pub const MISSING_OTP_MANDATORY: &str = "otp mandatory policy (inferred, confidence=0.7)";

/// Used only when no other gap was found
pub const MISSING_SESSION_TIMEOUT: &str = "session timeout seconds (inferred, confidence=0.73)";

const TITLE: &str = "Secure Login";

const CLARIFYING_QUESTIONS: [&str; 3] = [
    "Should OTP be mandatory for all admins or per-tenant configurable?",
    "What is the lockout threshold and lockout duration?",
    "What password complexity rules apply (length, charset, reuse, history)?",
];

const ACCEPTANCE_CRITERIA: [&str; 3] = [
    "User can login with valid email and password",
    "Admin can enable OTP for login (inferred, confidence=0.78)",
    "Successful login redirects to dashboard",
];

const IMPACTED_MODULES: [&str; 2] = [
    "auth-service",
    "user-profile (inferred, confidence=0.62)",
];

const NONFUNCTIONAL_TAGS: [&str; 2] = ["security", "usability"];

const RISK_REASON: &str =
    "Auth and lockout flows are security-critical; ambiguity can cause bypass or lockout issues";

const INITIAL_ASSUMPTION: &str = "Email is unique username (inferred, confidence=0.65)";

/// A gap rule: fires when `keyword` is present and `qualifier` is absent
struct GapRule {
    keyword: &'static str,
    qualifier: &'static str,
    message: &'static str,
}

/// Checked in this order; every rule that fires contributes its message
const GAP_RULES: [GapRule; 3] = [
    GapRule {
        keyword: "password",
        qualifier: "complex",
        message: MISSING_PASSWORD_COMPLEXITY,
    },
    GapRule {
        keyword: "lock",
        qualifier: "attempt",
        message: MISSING_LOCKOUT_THRESHOLD,
    },
    GapRule {
        keyword: "otp",
        qualifier: "mandatory",
        message: MISSING_OTP_MANDATORY,
    },
];

/// Maps free text to a [`RequirementAnalysis`]
///
/// All checks are case-insensitive substring tests, so every input, including
/// the empty string, yields a complete record.
pub struct RequirementParser;

impl RequirementParser {
    pub fn parse(text: &str) -> RequirementAnalysis {
        let text = text.to_lowercase();

        let mut actors = vec!["User".to_string()];
        if text.contains("admin") {
            actors.push("Admin".to_string());
        }

        let functional_tags = vec![
            "authentication".to_string(),
            if text.contains("otp") { "otp" } else { "login" }.to_string(),
            if text.contains("lock") { "lockout" } else { "session" }.to_string(),
        ];

        let mut missing_info: Vec<String> = GAP_RULES
            .iter()
            .filter(|rule| text.contains(rule.keyword) && !text.contains(rule.qualifier))
            .map(|rule| rule.message.to_string())
            .collect();
        // The fallback replaces the list rather than joining it
        if missing_info.is_empty() {
            missing_info.push(MISSING_SESSION_TIMEOUT.to_string());
        }

        debug!(
            actors = actors.len(),
            gaps = missing_info.len(),
            "Parsed requirement: {}",
            functional_tags.join(", ")
        );

        RequirementAnalysis {
            title: TITLE.to_string(),
            actors,
            functional_tags,
            nonfunctional_tags: to_strings(&NONFUNCTIONAL_TAGS),
            acceptance_criteria: to_strings(&ACCEPTANCE_CRITERIA),
            impacted_modules: to_strings(&IMPACTED_MODULES),
            missing_info,
            clarifying_questions: to_strings(&CLARIFYING_QUESTIONS),
            risk: RiskLevel::High,
            risk_reason: RISK_REASON.to_string(),
            assumptions: vec![INITIAL_ASSUMPTION.to_string()],
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
