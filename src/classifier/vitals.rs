//! Core Web Vital status classification

use crate::error::{AuditError, Result};
use crate::VitalUnit;
use serde::{Deserialize, Serialize};

/// The five Core Web Vitals tracked by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalMetric {
    Fcp,
    Lcp,
    Cls,
    Fid,
    Ttfb,
}

/// Two-threshold table row: `value <= good` is good, `value <= needs_improvement`
/// needs improvement, anything above is poor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalThresholds {
    pub good: f64,
    pub needs_improvement: f64,
}

/// Classification of a vital against its thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalStatus {
    Good,
    NeedsImprovement,
    Poor,
}

impl VitalStatus {
    /// Badge text
    pub fn label(self) -> &'static str {
        match self {
            VitalStatus::Good => "Good",
            VitalStatus::NeedsImprovement => "Needs Improvement",
            VitalStatus::Poor => "Poor",
        }
    }

    /// Progress-bar fill percentage for the metric card
    pub fn progress_fill(self) -> u8 {
        match self {
            VitalStatus::Good => 100,
            VitalStatus::NeedsImprovement => 60,
            VitalStatus::Poor => 30,
        }
    }
}

impl std::fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VitalStatus::Good => write!(f, "good"),
            VitalStatus::NeedsImprovement => write!(f, "needs-improvement"),
            VitalStatus::Poor => write!(f, "poor"),
        }
    }
}

impl VitalMetric {
    pub const ALL: [VitalMetric; 5] = [
        VitalMetric::Fcp,
        VitalMetric::Lcp,
        VitalMetric::Cls,
        VitalMetric::Fid,
        VitalMetric::Ttfb,
    ];

    pub fn acronym(self) -> &'static str {
        match self {
            VitalMetric::Fcp => "FCP",
            VitalMetric::Lcp => "LCP",
            VitalMetric::Cls => "CLS",
            VitalMetric::Fid => "FID",
            VitalMetric::Ttfb => "TTFB",
        }
    }

    /// Lighthouse audit id carrying this metric's numeric value
    pub fn audit_id(self) -> &'static str {
        match self {
            VitalMetric::Fcp => "first-contentful-paint",
            VitalMetric::Lcp => "largest-contentful-paint",
            VitalMetric::Cls => "cumulative-layout-shift",
            VitalMetric::Fid => "first-input-delay",
            VitalMetric::Ttfb => "server-response-time",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VitalMetric::Fcp => "First Contentful Paint (FCP)",
            VitalMetric::Lcp => "Largest Contentful Paint (LCP)",
            VitalMetric::Cls => "Cumulative Layout Shift (CLS)",
            VitalMetric::Fid => "First Input Delay (FID)",
            VitalMetric::Ttfb => "Time to First Byte (TTFB)",
        }
    }

    pub fn unit(self) -> VitalUnit {
        match self {
            VitalMetric::Fcp | VitalMetric::Lcp => VitalUnit::Seconds,
            VitalMetric::Cls => VitalUnit::Unitless,
            VitalMetric::Fid | VitalMetric::Ttfb => VitalUnit::Milliseconds,
        }
    }

    pub fn thresholds(self) -> VitalThresholds {
        let (good, needs_improvement) = match self {
            VitalMetric::Fcp => (1.0, 1.8),
            VitalMetric::Lcp => (2.0, 2.5),
            VitalMetric::Cls => (0.1, 0.25),
            VitalMetric::Fid => (100.0, 300.0),
            VitalMetric::Ttfb => (600.0, 800.0),
        };
        VitalThresholds {
            good,
            needs_improvement,
        }
    }

    /// Target shown next to the value (the poor boundary for timings)
    pub fn target(self) -> &'static str {
        match self {
            VitalMetric::Fcp => "< 1.8s",
            VitalMetric::Lcp => "< 2.5s",
            VitalMetric::Cls => "< 0.1",
            VitalMetric::Fid => "< 100ms",
            VitalMetric::Ttfb => "< 600ms",
        }
    }

    /// Ties go to the better bucket.
    pub fn status(self, value: f64) -> VitalStatus {
        let t = self.thresholds();
        if value <= t.good {
            VitalStatus::Good
        } else if value <= t.needs_improvement {
            VitalStatus::NeedsImprovement
        } else {
            VitalStatus::Poor
        }
    }
}

impl std::str::FromStr for VitalMetric {
    type Err = AuditError;

    /// Accepts the acronym or the audit id, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        VitalMetric::ALL
            .into_iter()
            .find(|m| m.acronym().eq_ignore_ascii_case(name) || m.audit_id().eq_ignore_ascii_case(name))
            .ok_or_else(|| AuditError::UnknownMetric(s.to_string()))
    }
}

/// Classify a raw metric value by metric name.
///
/// Returns [`AuditError::UnknownMetric`] for names outside the threshold table.
pub fn vital_status(metric_name: &str, value: f64) -> Result<VitalStatus> {
    let metric: VitalMetric = metric_name.parse()?;
    Ok(metric.status(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fcp_buckets() {
        assert_eq!(vital_status("FCP", 1.0).unwrap(), VitalStatus::Good);
        assert_eq!(vital_status("FCP", 1.1).unwrap(), VitalStatus::NeedsImprovement);
        assert_eq!(vital_status("FCP", 1.8).unwrap(), VitalStatus::NeedsImprovement);
        assert_eq!(vital_status("FCP", 1.9).unwrap(), VitalStatus::Poor);
    }

    #[test]
    fn test_lcp_buckets() {
        assert_eq!(vital_status("LCP", 2.0).unwrap(), VitalStatus::Good);
        assert_eq!(vital_status("LCP", 2.5).unwrap(), VitalStatus::NeedsImprovement);
        assert_eq!(vital_status("LCP", 3.8).unwrap(), VitalStatus::Poor);
    }

    #[test]
    fn test_cls_buckets() {
        assert_eq!(vital_status("CLS", 0.1).unwrap(), VitalStatus::Good);
        assert_eq!(vital_status("CLS", 0.15).unwrap(), VitalStatus::NeedsImprovement);
        assert_eq!(vital_status("CLS", 0.25).unwrap(), VitalStatus::NeedsImprovement);
        assert_eq!(vital_status("CLS", 0.26).unwrap(), VitalStatus::Poor);
    }

    #[test]
    fn test_fid_buckets() {
        assert_eq!(vital_status("FID", 100.0).unwrap(), VitalStatus::Good);
        assert_eq!(vital_status("FID", 180.0).unwrap(), VitalStatus::NeedsImprovement);
        assert_eq!(vital_status("FID", 300.0).unwrap(), VitalStatus::NeedsImprovement);
        assert_eq!(vital_status("FID", 301.0).unwrap(), VitalStatus::Poor);
    }

    #[test]
    fn test_ttfb_buckets() {
        assert_eq!(vital_status("TTFB", 600.0).unwrap(), VitalStatus::Good);
        assert_eq!(vital_status("TTFB", 700.0).unwrap(), VitalStatus::NeedsImprovement);
        assert_eq!(vital_status("TTFB", 850.0).unwrap(), VitalStatus::Poor);
    }

    #[test]
    fn test_name_lookup_accepts_audit_id_and_case() {
        assert_eq!(vital_status("fcp", 0.5).unwrap(), VitalStatus::Good);
        assert_eq!(
            vital_status("server-response-time", 900.0).unwrap(),
            VitalStatus::Poor
        );
        assert_eq!(
            vital_status("Largest-Contentful-Paint", 2.2).unwrap(),
            VitalStatus::NeedsImprovement
        );
    }

    #[test]
    fn test_unknown_metric_is_an_error_not_a_bucket() {
        let err = vital_status("INP", 50.0).unwrap_err();
        assert_eq!(err, AuditError::UnknownMetric("INP".to_string()));
    }

    #[test]
    fn test_badge_and_fill() {
        assert_eq!(VitalStatus::Good.label(), "Good");
        assert_eq!(VitalStatus::NeedsImprovement.label(), "Needs Improvement");
        assert_eq!(VitalStatus::Poor.progress_fill(), 30);
        assert_eq!(VitalStatus::NeedsImprovement.progress_fill(), 60);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&VitalStatus::NeedsImprovement).unwrap();
        assert_eq!(json, "\"needs-improvement\"");
    }
}
