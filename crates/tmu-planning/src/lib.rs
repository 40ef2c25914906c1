//! tmu Planning - requirement analysis and test design
//!
//! This crate holds the whole data pipeline of tmu:
//!
//! ```text
//! text -> RequirementParser -> RequirementAnalysis
//!      -> TestCaseCatalog   -> TestDesign
//!      -> projection        -> rows -> JSON / CSV exports
//! ```
//!
//! Every step is a pure function of its input. The [`pipeline`] module ties the
//! steps together for one front-end request.

pub mod catalog;
pub mod clarify;
pub mod export;
pub mod parser;
pub mod pipeline;
pub mod projection;

pub use catalog::TestCaseCatalog;
pub use clarify::ClarificationAnswers;
pub use export::{ExportFile, ExportKind};
pub use parser::{RequirementParser, DEFAULT_REQUIREMENT_TEXT};
pub use pipeline::{FormState, PipelineOutput};
pub use projection::{requirement_summary_rows, to_rows, SummaryRow, TestCaseRow};
