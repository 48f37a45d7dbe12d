//! perfaudit: Website Performance Audit Dashboard
//!
//! This library classifies audit results (category scores, Core Web Vitals,
//! issues) and aggregates optimization checklists. Metric values come from a
//! [`audit::MetricSource`]; the bundled sources are a randomized mock and a
//! client for the stub audit endpoint served by `perfaudit-server`.

pub mod audit;
pub mod checklist;
pub mod classifier;
pub mod config;
pub mod error;
pub mod format;
pub mod logger;
pub mod reporter;
pub mod runner;
pub mod tools;

pub use error::AuditError;

use serde::{Deserialize, Serialize};

/// Letter grade for a 0-100 category score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Inclusive lower bounds at 90/80/70/60. NaN falls through to F.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// Badge color that co-varies with the grade
    pub fn color(self) -> GradeColor {
        match self {
            Grade::A => GradeColor::Green,
            Grade::B => GradeColor::Yellow,
            Grade::C => GradeColor::Orange,
            Grade::D | Grade::F => GradeColor::Red,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Badge color for a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl std::fmt::Display for GradeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeColor::Green => write!(f, "green"),
            GradeColor::Yellow => write!(f, "yellow"),
            GradeColor::Orange => write!(f, "orange"),
            GradeColor::Red => write!(f, "red"),
        }
    }
}

/// Grade bucket with its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreGrade {
    pub grade: Grade,
    pub color: GradeColor,
}

/// A named 0-100 category score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricScore {
    /// Display name (e.g. "Best Practices")
    pub name: String,
    /// Score clamped to [0, 100]
    pub value: f64,
}

impl MetricScore {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 100.0)
        };
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn grade(&self) -> ScoreGrade {
        classifier::score_grade(self.value)
    }

    pub fn tone(&self) -> classifier::ScoreTone {
        classifier::score_tone(self.value)
    }
}

/// Lighthouse audit categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditCategory {
    Performance,
    Accessibility,
    BestPractices,
    Seo,
    Pwa,
}

impl AuditCategory {
    pub const ALL: [AuditCategory; 5] = [
        AuditCategory::Performance,
        AuditCategory::Accessibility,
        AuditCategory::BestPractices,
        AuditCategory::Seo,
        AuditCategory::Pwa,
    ];

    /// Wire id (e.g. "best-practices")
    pub fn id(self) -> &'static str {
        match self {
            AuditCategory::Performance => "performance",
            AuditCategory::Accessibility => "accessibility",
            AuditCategory::BestPractices => "best-practices",
            AuditCategory::Seo => "seo",
            AuditCategory::Pwa => "pwa",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuditCategory::Performance => "Performance",
            AuditCategory::Accessibility => "Accessibility",
            AuditCategory::BestPractices => "Best Practices",
            AuditCategory::Seo => "SEO",
            AuditCategory::Pwa => "PWA",
        }
    }
}

impl std::fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for AuditCategory {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuditCategory::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AuditError::InvalidInput(format!("unknown audit category: {}", s)))
    }
}

/// Severity levels for issues. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A performance issue found by an audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: Severity,
    /// Category name (e.g. "Images", "JavaScript")
    pub category: String,
    pub title: String,
    pub description: String,
    /// Remediation advice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    /// Estimated time saved by fixing the issue, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_ms: Option<u64>,
}

impl Issue {
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            title: title.into(),
            description: description.into(),
            solution: None,
            savings_ms: None,
        }
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    pub fn with_savings_ms(mut self, savings_ms: u64) -> Self {
        self.savings_ms = Some(savings_ms);
        self
    }

    /// Human sentence for the savings badge, e.g. "Potential savings of 1.2s"
    pub fn impact_summary(&self) -> Option<String> {
        let ms = self.savings_ms?;
        format::format_duration(ms as f64)
            .ok()
            .map(|d| format!("Potential savings of {}", d))
    }
}

/// Impact tier of a checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::High => write!(f, "high"),
            Impact::Medium => write!(f, "medium"),
            Impact::Low => write!(f, "low"),
        }
    }
}

/// Unit of a web vital value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalUnit {
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "ms")]
    Milliseconds,
    #[serde(rename = "unitless")]
    Unitless,
}

/// A raw Core Web Vital measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebVital {
    /// Metric acronym (FCP, LCP, CLS, FID, TTFB)
    pub name: String,
    pub value: f64,
    pub unit: VitalUnit,
}

impl WebVital {
    pub fn new(metric: classifier::VitalMetric, value: f64) -> Self {
        Self {
            name: metric.acronym().to_string(),
            value,
            unit: metric.unit(),
        }
    }

    pub fn status(&self) -> Result<classifier::VitalStatus, AuditError> {
        classifier::vital_status(&self.name, self.value)
    }

    /// Value with its unit suffix, as shown on a metric card
    pub fn display_value(&self) -> String {
        match self.unit {
            VitalUnit::Seconds => format!("{}s", self.value),
            VitalUnit::Milliseconds => format!("{}ms", self.value),
            VitalUnit::Unitless => format!("{}", self.value),
        }
    }
}
