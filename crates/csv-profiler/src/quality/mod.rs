//! Data quality analysis module.
//!
//! Findings are derived purely from a column's computed metrics by walking a
//! fixed, ordered rule table.

mod analyzer;
mod rules;

pub use analyzer::{DataQualityAnalyzer, RuleOutcome};
pub use rules::{QualityRule, RULES};
