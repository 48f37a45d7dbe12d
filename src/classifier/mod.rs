//! Audit result classification: score grades, vital statuses, issue ordering

pub mod grade;
pub mod issues;
pub mod vitals;

pub use grade::{grade_description, score_grade, score_tone, ScoreTone};
pub use issues::{severity_counts, sort_issues, total_savings_ms, SeverityCounts};
pub use vitals::{vital_status, VitalMetric, VitalStatus, VitalThresholds};
