//! JSON reporter for machine-readable output

use crate::audit::{AuditReport, ReportSummary};
use crate::checklist::{self, ChecklistItem, CompletionStats};
use crate::classifier::VitalStatus;
use crate::tools::Tool;
use crate::{MetricScore, ScoreGrade, WebVital};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Audit report with classified scores and vitals alongside the raw data
    pub fn report(&self, report: &AuditReport) -> String {
        let scores = report
            .metrics
            .category_scores()
            .into_iter()
            .map(|score| JsonScore {
                grade: score.grade(),
                score,
            })
            .collect();
        let vitals = report
            .metrics
            .web_vitals()
            .into_iter()
            .map(|vital| JsonVital {
                status: vital.status().ok(),
                vital,
            })
            .collect();

        let output = JsonReport {
            report,
            summary: report.summary(),
            scores,
            vitals,
        };
        self.encode(&output, "{}")
    }

    pub fn report_checklist(&self, items: &[ChecklistItem]) -> String {
        let output = JsonChecklist {
            stats: checklist::completion_stats(items),
            items,
        };
        self.encode(&output, "{}")
    }

    pub fn report_tools(&self, tools: &[Tool]) -> String {
        self.encode(&tools, "[]")
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a AuditReport,
    summary: ReportSummary,
    scores: Vec<JsonScore>,
    vitals: Vec<JsonVital>,
}

#[derive(Serialize)]
struct JsonScore {
    #[serde(flatten)]
    score: MetricScore,
    #[serde(flatten)]
    grade: ScoreGrade,
}

#[derive(Serialize)]
struct JsonVital {
    #[serde(flatten)]
    vital: WebVital,
    status: Option<VitalStatus>,
}

#[derive(Serialize)]
struct JsonChecklist<'a> {
    stats: CompletionStats,
    items: &'a [ChecklistItem],
}
