//! Audit data: wire types of the stub endpoint, metric sources, report assembly
//!
//! A [`MetricSource`] produces a Lighthouse-shaped [`AuditResponse`]. The
//! response is converted to dashboard [`AuditMetrics`] (0-100 scores, vitals
//! in display units) and wrapped in an [`AuditReport`] for the reporters.

pub mod endpoint;
pub mod mock;
#[cfg(feature = "remote")]
pub mod remote;
pub mod sample;

pub use mock::{MockMetricSource, ValueRange};
#[cfg(feature = "remote")]
pub use remote::RemoteMetricSource;

use crate::classifier::{self, SeverityCounts, VitalMetric};
use crate::error::Result;
use crate::runner::{default_categories, Device, RunnerConfig, Throttling};
use crate::{AuditCategory, Grade, Issue, MetricScore, WebVital};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a POST to the audit endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub url: String,
    #[serde(default)]
    pub config: AuditConfig,
}

impl AuditRequest {
    pub fn new(url: impl Into<String>, config: AuditConfig) -> Self {
        Self {
            url: url.into(),
            config,
        }
    }
}

/// Requested audit options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<AuditCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttling: Option<Throttling>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            device: None,
            throttling: None,
        }
    }
}

impl From<&RunnerConfig> for AuditConfig {
    fn from(config: &RunnerConfig) -> Self {
        Self {
            categories: config.categories.clone(),
            device: Some(config.device),
            throttling: Some(config.throttling),
        }
    }
}

/// Lighthouse-shaped audit result returned by the endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResponse {
    pub lhr: LighthouseResult,
    pub timing: Timing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LighthouseResult {
    pub categories: CategoryScores,
    pub audits: AuditValues,
}

/// Category scores on a 0-1 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub performance: CategoryScore,
    pub accessibility: CategoryScore,
    #[serde(rename = "best-practices")]
    pub best_practices: CategoryScore,
    pub seo: CategoryScore,
    pub pwa: CategoryScore,
}

impl CategoryScores {
    pub fn get(&self, category: AuditCategory) -> f64 {
        match category {
            AuditCategory::Performance => self.performance.score,
            AuditCategory::Accessibility => self.accessibility.score,
            AuditCategory::BestPractices => self.best_practices.score,
            AuditCategory::Seo => self.seo.score,
            AuditCategory::Pwa => self.pwa.score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
}

/// Raw metric audits; timings in milliseconds, layout shift unitless
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuditValues {
    pub first_contentful_paint: NumericAudit,
    pub largest_contentful_paint: NumericAudit,
    pub cumulative_layout_shift: NumericAudit,
    pub first_input_delay: NumericAudit,
    pub server_response_time: NumericAudit,
}

impl AuditValues {
    pub fn get(&self, metric: VitalMetric) -> f64 {
        match metric {
            VitalMetric::Fcp => self.first_contentful_paint.numeric_value,
            VitalMetric::Lcp => self.largest_contentful_paint.numeric_value,
            VitalMetric::Cls => self.cumulative_layout_shift.numeric_value,
            VitalMetric::Fid => self.first_input_delay.numeric_value,
            VitalMetric::Ttfb => self.server_response_time.numeric_value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericAudit {
    pub numeric_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Total audit wall time in milliseconds
    pub total: f64,
}

/// Produces audit snapshots. The randomized mock and the HTTP client both
/// implement this, so a real measurement pipeline can replace either
/// without touching the classifier.
pub trait MetricSource: Send + Sync {
    fn snapshot(&self, request: &AuditRequest) -> Result<AuditResponse>;
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

impl AuditResponse {
    /// Convert to dashboard units: scores x100, FCP/LCP in seconds.
    pub fn to_metrics(&self) -> AuditMetrics {
        let categories = &self.lhr.categories;
        let audits = &self.lhr.audits;
        let score = |c: AuditCategory| (categories.get(c) * 100.0).round();
        AuditMetrics {
            performance: score(AuditCategory::Performance),
            accessibility: score(AuditCategory::Accessibility),
            best_practices: score(AuditCategory::BestPractices),
            seo: score(AuditCategory::Seo),
            pwa: score(AuditCategory::Pwa),
            fcp: round_to(audits.get(VitalMetric::Fcp) / 1000.0, 2),
            lcp: round_to(audits.get(VitalMetric::Lcp) / 1000.0, 2),
            cls: round_to(audits.get(VitalMetric::Cls), 3),
            fid: audits.get(VitalMetric::Fid).round(),
            ttfb: audits.get(VitalMetric::Ttfb).round(),
        }
    }
}

/// Dashboard metrics: 0-100 category scores and vitals in display units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetrics {
    pub performance: f64,
    pub accessibility: f64,
    pub best_practices: f64,
    pub seo: f64,
    pub pwa: f64,
    /// seconds
    pub fcp: f64,
    /// seconds
    pub lcp: f64,
    pub cls: f64,
    /// milliseconds
    pub fid: f64,
    /// milliseconds
    pub ttfb: f64,
}

impl AuditMetrics {
    pub fn score(&self, category: AuditCategory) -> MetricScore {
        let value = match category {
            AuditCategory::Performance => self.performance,
            AuditCategory::Accessibility => self.accessibility,
            AuditCategory::BestPractices => self.best_practices,
            AuditCategory::Seo => self.seo,
            AuditCategory::Pwa => self.pwa,
        };
        MetricScore::new(category.label(), value)
    }

    /// All five category scores in dashboard order
    pub fn category_scores(&self) -> Vec<MetricScore> {
        AuditCategory::ALL.iter().map(|c| self.score(*c)).collect()
    }

    pub fn vital(&self, metric: VitalMetric) -> WebVital {
        let value = match metric {
            VitalMetric::Fcp => self.fcp,
            VitalMetric::Lcp => self.lcp,
            VitalMetric::Cls => self.cls,
            VitalMetric::Fid => self.fid,
            VitalMetric::Ttfb => self.ttfb,
        };
        WebVital::new(metric, value)
    }

    pub fn web_vitals(&self) -> Vec<WebVital> {
        VitalMetric::ALL.iter().map(|m| self.vital(*m)).collect()
    }
}

/// Everything a reporter renders for one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub url: String,
    pub generated_at: DateTime<Utc>,
    pub device: Device,
    pub throttling: Throttling,
    pub metrics: AuditMetrics,
    pub issues: Vec<Issue>,
}

/// Headline numbers for the overview
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub performance_score: f64,
    pub performance_grade: Grade,
    pub issue_counts: SeverityCounts,
    pub potential_savings_ms: u64,
}

impl AuditReport {
    pub fn summary(&self) -> ReportSummary {
        let performance = self.metrics.score(AuditCategory::Performance);
        ReportSummary {
            performance_score: performance.value,
            performance_grade: performance.grade().grade,
            issue_counts: classifier::severity_counts(&self.issues),
            potential_savings_ms: classifier::total_savings_ms(&self.issues),
        }
    }
}

/// Run one audit against a source and assemble the report.
///
/// Sources only produce metrics; the issue list is the dashboard's standard
/// catalog (see [`sample::sample_issues`]).
pub fn run_audit(source: &dyn MetricSource, request: &AuditRequest) -> Result<AuditReport> {
    let response = source.snapshot(request)?;
    log::debug!(
        "audit snapshot for {} took {:.0}ms (simulated)",
        request.url,
        response.timing.total
    );
    Ok(AuditReport {
        url: request.url.clone(),
        generated_at: Utc::now(),
        device: request.config.device.unwrap_or_default(),
        throttling: request.config.throttling.unwrap_or_default(),
        metrics: response.to_metrics(),
        issues: sample::sample_issues(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::VitalStatus;

    fn response() -> AuditResponse {
        let score = |s| CategoryScore { score: s };
        let audit = |v| NumericAudit { numeric_value: v };
        AuditResponse {
            lhr: LighthouseResult {
                categories: CategoryScores {
                    performance: score(0.673),
                    accessibility: score(0.89),
                    best_practices: score(0.831),
                    seo: score(0.92),
                    pwa: score(0.45),
                },
                audits: AuditValues {
                    first_contentful_paint: audit(2104.6),
                    largest_contentful_paint: audit(3799.0),
                    cumulative_layout_shift: audit(0.14962),
                    first_input_delay: audit(180.4),
                    server_response_time: audit(849.6),
                },
            },
            timing: Timing { total: 7000.0 },
        }
    }

    #[test]
    fn test_to_metrics_converts_units() {
        let m = response().to_metrics();
        assert_eq!(m.performance, 67.0);
        assert_eq!(m.best_practices, 83.0);
        assert_eq!(m.fcp, 2.1);
        assert_eq!(m.lcp, 3.8);
        assert_eq!(m.cls, 0.15);
        assert_eq!(m.fid, 180.0);
        assert_eq!(m.ttfb, 850.0);
    }

    #[test]
    fn test_web_vitals_classify() {
        let m = response().to_metrics();
        let statuses: Vec<VitalStatus> = m
            .web_vitals()
            .iter()
            .map(|v| v.status().unwrap())
            .collect();
        assert_eq!(
            statuses,
            vec![
                VitalStatus::Poor,
                VitalStatus::Poor,
                VitalStatus::NeedsImprovement,
                VitalStatus::NeedsImprovement,
                VitalStatus::Poor,
            ]
        );
    }

    #[test]
    fn test_response_wire_shape_uses_lighthouse_ids() {
        let json = serde_json::to_value(response()).unwrap();
        assert!(json["lhr"]["categories"]["best-practices"]["score"].is_number());
        assert!(json["lhr"]["audits"]["server-response-time"]["numericValue"].is_number());
        assert!(json["timing"]["total"].is_number());
    }

    #[test]
    fn test_request_config_is_optional() {
        let req: AuditRequest = serde_json::from_str(r#"{"url":"https://example.com"}"#).unwrap();
        assert_eq!(req.config.categories, default_categories());
        assert!(req.config.device.is_none());
    }

    #[test]
    fn test_request_with_full_config() {
        let req: AuditRequest = serde_json::from_str(
            r#"{"url":"https://example.com","config":{"categories":["performance","pwa"],"device":"desktop","throttling":"fast-3g"}}"#,
        )
        .unwrap();
        assert_eq!(
            req.config.categories,
            vec![AuditCategory::Performance, AuditCategory::Pwa]
        );
        assert_eq!(req.config.device, Some(Device::Desktop));
        assert_eq!(req.config.throttling, Some(Throttling::Fast3g));
    }

    #[test]
    fn test_run_audit_builds_report_with_summary() {
        let source = MockMetricSource::seeded(7);
        let request = AuditRequest::new("https://example.com", AuditConfig::default());
        let report = run_audit(&source, &request).unwrap();
        assert_eq!(report.url, "https://example.com");
        assert_eq!(report.device, Device::Mobile);
        let summary = report.summary();
        assert_eq!(summary.issue_counts.critical, 2);
        assert_eq!(summary.potential_savings_ms, 3060);
        assert!(summary.performance_score >= 50.0 && summary.performance_score <= 90.0);
    }
}
