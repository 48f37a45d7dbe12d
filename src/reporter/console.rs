//! Console reporter with colored output

use crate::audit::sample::solution_snippet;
use crate::audit::AuditReport;
use crate::checklist::{self, ChecklistItem};
use crate::classifier::{self, grade_description, ScoreTone, VitalStatus};
use crate::format::format_duration;
use crate::tools::Tool;
use crate::{Grade, Impact, Issue, MetricScore, Severity, WebVital};
use colored::{ColoredString, Colorize};
use std::fmt::Write;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Show solutions and code snippets under each issue
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Print a full audit report
    pub fn report(&self, report: &AuditReport) {
        print!("{}", self.render(report));
    }

    /// Print just the headline score
    pub fn report_quiet(&self, report: &AuditReport) {
        println!("{}", self.render_quiet(report));
    }

    pub fn report_checklist(&self, items: &[ChecklistItem]) {
        print!("{}", self.render_checklist(items));
    }

    pub fn report_tools(&self, tools: &[Tool]) {
        print!("{}", self.render_tools(tools));
    }

    pub fn render_quiet(&self, report: &AuditReport) -> String {
        let summary = report.summary();
        format!(
            "{}: {} ({})",
            report.url,
            summary.performance_score,
            self.colorize_grade(summary.performance_grade)
        )
    }

    pub fn render(&self, report: &AuditReport) -> String {
        let mut out = String::new();
        self.write_header(&mut out, report);
        self.write_overview(&mut out, report);
        self.write_vitals(&mut out, &report.metrics.web_vitals());
        if !report.issues.is_empty() {
            self.write_issues(&mut out, &report.issues);
        }
        out
    }

    fn write_header(&self, out: &mut String, report: &AuditReport) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            self.paint(format!("Performance Audit: {}", report.url).bold())
        );
        let _ = writeln!(
            out,
            "   Device: {} | Network: {} | {}",
            report.device,
            report.throttling.label(),
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(out);
    }

    fn write_overview(&self, out: &mut String, report: &AuditReport) {
        let summary = report.summary();
        let grade = summary.performance_grade;

        let _ = writeln!(
            out,
            "   Performance: {} {}",
            self.create_score_bar(summary.performance_score),
            self.colorize_grade(grade)
        );
        let _ = writeln!(
            out,
            "   {}",
            self.paint(grade_description(grade).dimmed())
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "   {}", self.paint("Category Scores:".bold()));
        for score in report.metrics.category_scores() {
            self.write_category_score(out, &score);
        }
        let _ = writeln!(out);

        let savings = format_duration(summary.potential_savings_ms as f64)
            .unwrap_or_else(|_| "-".to_string());
        let counts = summary.issue_counts;
        let _ = writeln!(out, "   {}", self.paint("Quick Stats:".bold()));
        let _ = writeln!(out, "   Potential savings: {}", self.paint(savings.bold()));
        let _ = writeln!(
            out,
            "   Issues: {} critical, {} warnings, {} info",
            self.paint(counts.critical.to_string().red()),
            self.paint(counts.warning.to_string().yellow()),
            self.paint(counts.info.to_string().blue())
        );
        let _ = writeln!(out);
    }

    fn write_category_score(&self, out: &mut String, score: &MetricScore) {
        let bar = self.create_mini_bar(score.value, 100.0);
        let value = format!("{:>3}", score.value);
        let value = match score.tone() {
            ScoreTone::Green => value.green(),
            ScoreTone::Yellow => value.yellow(),
            ScoreTone::Red => value.red(),
        };
        let _ = writeln!(
            out,
            "   {} {} {} {}",
            bar,
            self.paint(value),
            self.colorize_grade(score.grade().grade),
            score.name
        );
    }

    fn write_vitals(&self, out: &mut String, vitals: &[WebVital]) {
        let _ = writeln!(out, "   {}", self.paint("Core Web Vitals:".bold()));
        for vital in vitals {
            // names come from VitalMetric, so classification cannot fail here
            let Ok(metric) = vital.name.parse::<classifier::VitalMetric>() else {
                continue;
            };
            let status = metric.status(vital.value);
            let _ = writeln!(
                out,
                "   {:<5} {:>8} {} {} target {}",
                vital.name,
                vital.display_value(),
                self.create_mini_bar(status.progress_fill() as f64, 100.0),
                self.status_badge(status),
                self.paint(metric.target().dimmed())
            );
        }
        let _ = writeln!(out);
    }

    fn write_issues(&self, out: &mut String, issues: &[Issue]) {
        let _ = writeln!(out, "   {}", self.paint("Issues Found:".bold()));
        for issue in classifier::sort_issues(issues) {
            self.write_issue(out, &issue);
        }
        let _ = writeln!(out);
    }

    fn write_issue(&self, out: &mut String, issue: &Issue) {
        let icon = match issue.severity {
            Severity::Critical => "✗".red(),
            Severity::Warning => "⚠".yellow(),
            Severity::Info => "ℹ".blue(),
        };
        let savings = issue
            .savings_ms
            .and_then(|ms| format_duration(ms as f64).ok())
            .map(|d| format!(" Save {}", d))
            .unwrap_or_default();

        let _ = writeln!(
            out,
            "   {} [{}] {}{}",
            self.paint(icon),
            self.paint(issue.category.dimmed()),
            issue.title,
            self.paint(savings.green())
        );

        if !self.verbose {
            return;
        }

        let _ = writeln!(out, "       {}", self.paint(issue.description.dimmed()));
        if let Some(ref solution) = issue.solution {
            let _ = writeln!(
                out,
                "       {} {}",
                self.paint("→".dimmed()),
                self.paint(solution.italic())
            );
        }
        if let Some(snippet) = solution_snippet(&issue.category) {
            for line in snippet.lines() {
                let _ = writeln!(out, "         {}", self.paint(line.cyan()));
            }
        }
    }

    pub fn render_checklist(&self, items: &[ChecklistItem]) -> String {
        let mut out = String::new();
        let stats = checklist::completion_stats(items);

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.paint("Optimization Checklist".bold()));
        let _ = writeln!(
            out,
            "   {} {}/{} completed",
            self.create_score_bar(stats.percentage),
            stats.completed,
            stats.total
        );
        let _ = writeln!(out);

        for group in checklist::group_by_category(items) {
            let _ = writeln!(out, "   {}", self.paint(group.category.bold()));
            for item in group.items {
                let mark = if item.completed {
                    "[x]".green()
                } else {
                    "[ ]".normal()
                };
                let impact = match item.impact {
                    Impact::High => "high".red(),
                    Impact::Medium => "medium".yellow(),
                    Impact::Low => "low".blue(),
                };
                let _ = writeln!(
                    out,
                    "   {} {} {} ({} impact)",
                    self.paint(mark),
                    self.paint(item.id.dimmed()),
                    item.title,
                    self.paint(impact)
                );
                if self.verbose {
                    let _ = writeln!(out, "         {}", self.paint(item.description.dimmed()));
                }
            }
        }
        let _ = writeln!(out);
        out
    }

    pub fn render_tools(&self, tools: &[Tool]) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.paint("Performance Tools".bold()));
        for group in checklist::group_by_category(tools) {
            let _ = writeln!(out);
            let _ = writeln!(out, "   {}", self.paint(group.category.bold()));
            for tool in group.items {
                let _ = writeln!(out, "   {} {}", self.paint("→".cyan()), tool.name);
                let _ = writeln!(out, "     {}", tool.description);
                let _ = writeln!(out, "     {}", self.paint(tool.url.underline()));
                if self.verbose {
                    let _ = writeln!(
                        out,
                        "     {}",
                        self.paint(tool.features.join(", ").dimmed())
                    );
                }
            }
        }
        let _ = writeln!(out);
        out
    }

    fn paint(&self, s: ColoredString) -> String {
        if self.use_colors {
            s.to_string()
        } else {
            s.clear().to_string()
        }
    }

    fn status_badge(&self, status: VitalStatus) -> String {
        let label = status.label();
        let badge = match status {
            VitalStatus::Good => label.green(),
            VitalStatus::NeedsImprovement => label.yellow(),
            VitalStatus::Poor => label.red(),
        };
        self.paint(badge)
    }

    fn colorize_grade(&self, grade: Grade) -> String {
        let s = grade.to_string();
        let colored = match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.yellow(),
            Grade::C => s.truecolor(255, 165, 0),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        };
        self.paint(colored)
    }

    fn create_score_bar(&self, score: f64) -> String {
        let clamped = if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let filled = (clamped * 20.0 / 100.0) as usize;
        let empty = 20 - filled;

        let bar = format!(
            "[{}{}] {:>5.1}%",
            "█".repeat(filled),
            "░".repeat(empty),
            clamped
        );

        if self.use_colors {
            match classifier::score_tone(clamped) {
                ScoreTone::Green => bar.green().to_string(),
                ScoreTone::Yellow => bar.yellow().to_string(),
                ScoreTone::Red => bar.red().to_string(),
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, value: f64, max: f64) -> String {
        let ratio = if max > 0.0 && value.is_finite() {
            (value / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (ratio * 10.0) as usize;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
