//! # tmu-core
//!
//! Core types for tmu, the Testing Methodologies Utility.
//!
//! tmu turns free-text software requirements into two records:
//!
//! - a [`RequirementAnalysis`] summarizing actors, tags, acceptance criteria
//!   and the gaps that need clarification
//! - a [`TestDesign`] holding the test-case catalog and its risk summary
//!
//! Both are plain data. They are created fresh per request, carry no identity
//! and serialize to JSON with the exact field names the exports use.

mod config;
mod error;
mod types;

pub use config::{ExportConfig, ServerConfig, TmuConfig};
pub use error::{Result, TmuError};
pub use types::*;
