//! Issue ordering and summaries

use crate::{Issue, Severity};
use serde::Serialize;

/// Stable sort: severity first (critical, warning, info), then category name.
pub fn sort_issues(issues: &[Issue]) -> Vec<Issue> {
    let mut sorted = issues.to_vec();
    sorted.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.category.cmp(&b.category))
    });
    sorted
}

/// Issue counts by severity (the overview's quick stats)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.critical + self.warning + self.info
    }
}

pub fn severity_counts(issues: &[Issue]) -> SeverityCounts {
    issues
        .iter()
        .fold(SeverityCounts::default(), |mut acc, issue| {
            match issue.severity {
                Severity::Critical => acc.critical += 1,
                Severity::Warning => acc.warning += 1,
                Severity::Info => acc.info += 1,
            }
            acc
        })
}

/// Sum of estimated savings across issues, in milliseconds
pub fn total_savings_ms(issues: &[Issue]) -> u64 {
    issues.iter().filter_map(|i| i.savings_ms).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity, category: &str, title: &str) -> Issue {
        Issue::new(severity, category, title, "")
    }

    #[test]
    fn test_sort_by_severity_then_category() {
        let issues = vec![
            issue(Severity::Info, "Caching", "cache"),
            issue(Severity::Warning, "Network", "compress"),
            issue(Severity::Critical, "JavaScript", "unused js"),
            issue(Severity::Warning, "CSS", "render blocking"),
            issue(Severity::Critical, "Images", "next-gen"),
        ];
        let sorted = sort_issues(&issues);
        let titles: Vec<&str> = sorted.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["next-gen", "unused js", "render blocking", "compress", "cache"]
        );
        // input untouched
        assert_eq!(issues[0].title, "cache");
    }

    #[test]
    fn test_sort_is_stable_within_same_key() {
        let issues = vec![
            issue(Severity::Warning, "CSS", "first"),
            issue(Severity::Warning, "CSS", "second"),
        ];
        let sorted = sort_issues(&issues);
        assert_eq!(sorted[0].title, "first");
        assert_eq!(sorted[1].title, "second");
    }

    #[test]
    fn test_severity_counts() {
        let issues = vec![
            issue(Severity::Critical, "a", "1"),
            issue(Severity::Critical, "b", "2"),
            issue(Severity::Info, "c", "3"),
        ];
        let counts = severity_counts(&issues);
        assert_eq!(counts.critical, 2);
        assert_eq!(counts.warning, 0);
        assert_eq!(counts.info, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_total_savings_skips_missing() {
        let issues = vec![
            issue(Severity::Critical, "a", "1").with_savings_ms(1200),
            issue(Severity::Warning, "b", "2"),
            issue(Severity::Info, "c", "3").with_savings_ms(200),
        ];
        assert_eq!(total_savings_ms(&issues), 1400);
        assert_eq!(total_savings_ms(&[]), 0);
    }
}
