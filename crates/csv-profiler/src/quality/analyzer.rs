use crate::config::ProfilerConfig;
use crate::quality::rules::{QualityRule, RULES};
use crate::types::{ColumnReport, FindingKind, QualityFinding};
use serde::Serialize;
use tracing::debug;

/// What happened to one rule for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "finding", rename_all = "snake_case")]
pub enum RuleOutcome {
    /// The rule's precondition was not met; the predicate was never run.
    Skipped,
    /// The rule was evaluated and did not fire.
    Passed,
    /// The rule fired.
    Fired(QualityFinding),
}

impl RuleOutcome {
    pub fn finding(&self) -> Option<&QualityFinding> {
        match self {
            Self::Fired(finding) => Some(finding),
            Self::Skipped | Self::Passed => None,
        }
    }
}

pub struct DataQualityAnalyzer;

impl DataQualityAnalyzer {
    /// Findings for one column, in rule-table order.
    pub fn evaluate(report: &ColumnReport, config: &ProfilerConfig) -> Vec<QualityFinding> {
        RULES
            .iter()
            .filter_map(|rule| match Self::run_rule(rule, report, config) {
                RuleOutcome::Fired(finding) => Some(finding),
                RuleOutcome::Skipped | RuleOutcome::Passed => None,
            })
            .collect()
    }

    /// Per-rule outcomes for one column, in rule-table order.
    pub fn evaluate_rules_traced(
        report: &ColumnReport,
        config: &ProfilerConfig,
    ) -> Vec<(FindingKind, RuleOutcome)> {
        RULES
            .iter()
            .map(|rule| (rule.kind, Self::run_rule(rule, report, config)))
            .collect()
    }

    fn run_rule(rule: &QualityRule, report: &ColumnReport, config: &ProfilerConfig) -> RuleOutcome {
        if !(rule.applies)(report, config) {
            return RuleOutcome::Skipped;
        }

        if (rule.check)(report, config) {
            debug!(column = %report.name, rule = ?rule.kind, "Quality rule fired");
            RuleOutcome::Fired(rule.finding(report, config))
        } else {
            RuleOutcome::Passed
        }
    }
}
