//! The fixed test-case catalog

use tmu_core::{RequirementAnalysis, RiskLevel, RiskSummary, TestCase, TestDesign};
use tracing::debug;

/// Generates the test design for a requirement
///
/// The catalog does not depend on the requirement; only its assumptions are
/// carried into the design.
pub struct TestCaseCatalog;

impl TestCaseCatalog {
    /// Number of test cases in the catalog
    pub const LEN: usize = 8;

    pub fn generate(requirement: &RequirementAnalysis) -> TestDesign {
        let test_cases = Self::test_cases();
        let summary = RiskSummary::tally(&test_cases);

        debug!(
            cases = test_cases.len(),
            assumptions = requirement.assumptions.len(),
            "Generated test design ({})",
            summary
        );

        TestDesign {
            test_cases,
            summary,
            assumptions: requirement.assumptions.clone(),
        }
    }

    /// The catalog in its fixed order, TC001 first
    pub fn test_cases() -> Vec<TestCase> {
        vec![
            case(
                "TC001",
                "Valid login without OTP",
                &["OTP disabled for tenant"],
                &[
                    "1. Open login page",
                    "2. Enter valid email and password",
                    "3. Click Login",
                ],
                "TD01",
                "User lands on dashboard",
                RiskLevel::High,
                (true, "Stable UI flow; high reuse"),
            ),
            case(
                "TC002",
                "Valid login with OTP",
                &["OTP enabled for tenant", "User enrolled in OTP"],
                &[
                    "1. Open login page",
                    "2. Enter valid credentials",
                    "3. Provide valid OTP within time window",
                ],
                "TD02",
                "Login succeeds and redirect to dashboard",
                RiskLevel::High,
                (true, "API-based OTP stub possible"),
            ),
            case(
                "TC003",
                "Invalid password",
                &[],
                &[
                    "1. Open login page",
                    "2. Enter valid email and invalid password",
                    "3. Click Login",
                ],
                "TD03",
                "Error displayed; no login",
                RiskLevel::Medium,
                (true, "Simple negative path"),
            ),
            case(
                "TC004",
                "OTP timeout",
                &["OTP enabled"],
                &[
                    "1. Login with valid credentials",
                    "2. Do not enter OTP",
                    "3. Wait for timeout window to elapse",
                ],
                "TD04",
                "OTP expires; user prompted to resend",
                RiskLevel::High,
                (true, "Can simulate clock or mock OTP"),
            ),
            case(
                "TC005",
                "Account lockout after N failures",
                &["Lockout policy configured (inferred, confidence=0.8)"],
                &[
                    "1. Attempt login with invalid password N times",
                    "2. Attempt login with valid password",
                ],
                "TD05",
                "Account is locked; login blocked",
                RiskLevel::High,
                (false, "Lockout reset/stateful; may be slow"),
            ),
            case(
                "TC006",
                "Boundary: password length min-1",
                &[],
                &["1. Enter password at min length minus one", "2. Submit"],
                "TD06",
                "Validation error",
                RiskLevel::Low,
                (true, "Fast validation check"),
            ),
            case(
                "TC007",
                "Exploratory: rapid successive logins",
                &[],
                &[
                    "1. Attempt multiple rapid logins with valid and invalid data",
                    "2. Observe responses and rate limits",
                ],
                "TD07",
                "System handles without instability",
                RiskLevel::Medium,
                (false, "Exploratory; less deterministic"),
            ),
            case(
                "TC008",
                "State transition: locked -> unlocked after duration",
                &["Account locked"],
                &["1. Wait lockout duration", "2. Attempt valid login"],
                "TD08",
                "Account unlocks; login succeeds",
                RiskLevel::Medium,
                (true, "Can fast-forward time with mocks"),
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn case(
    id: &str,
    title: &str,
    preconditions: &[&str],
    steps: &[&str],
    test_data: &str,
    expected: &str,
    risk: RiskLevel,
    (automation_candidate, automation_reason): (bool, &str),
) -> TestCase {
    TestCase {
        id: id.to_string(),
        title: title.to_string(),
        preconditions: preconditions.iter().map(|s| s.to_string()).collect(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        test_data: test_data.to_string(),
        expected: expected.to_string(),
        risk,
        automation_candidate,
        automation_reason: automation_reason.to_string(),
    }
}
