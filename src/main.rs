//! perfaudit: Website Performance Audit CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::LevelFilter;
use perfaudit::audit::sample::sample_report;
use perfaudit::audit::{
    run_audit, AuditConfig, AuditReport, AuditRequest, MetricSource, MockMetricSource,
};
use perfaudit::checklist::{self, ChecklistItem};
use perfaudit::config::{
    load_config, write_default_config, CliOverrides, Config, CONFIG_FILENAME,
};
use perfaudit::logger;
use perfaudit::reporter::{ConsoleReporter, JsonReporter};
use perfaudit::runner::{run_progress, Device, Throttling};
use perfaudit::tools::{tools_in_category, Tool, TOOLS};
use perfaudit::AuditCategory;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

/// perfaudit: Website Performance Audit Dashboard
#[derive(Parser, Debug)]
#[command(name = "perfaudit")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// URL to audit (omit when using a subcommand)
    url: Option<String>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum performance score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (score only)
    #[arg(long, short)]
    quiet: bool,

    /// Show solutions and code examples for each issue
    #[arg(long, short)]
    verbose: bool,

    /// Emulated device: mobile, desktop
    #[arg(long)]
    device: Option<Device>,

    /// Network throttling: none, fast-3g, slow-4g
    #[arg(long)]
    throttling: Option<Throttling>,

    /// Audit category (repeatable): performance, accessibility, best-practices, seo, pwa
    #[arg(long = "category", value_name = "CATEGORY")]
    categories: Vec<AuditCategory>,

    /// Seed for reproducible mock results
    #[arg(long)]
    seed: Option<u64>,

    /// Do not show the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Path to config file (default: search .perfauditrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Audit endpoint URL (e.g. http://127.0.0.1:3000/api/lighthouse)
    #[arg(long)]
    endpoint: Option<String>,

    /// Render the fixed sample analysis instead of running an audit
    #[arg(long, conflicts_with_all = ["seed", "endpoint"])]
    sample: bool,

    /// Log level: error, warn, info, debug, trace (default: PERFAUDIT_LOG, then warn)
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the optimization checklist
    Checklist {
        /// Toggle the item with this id (repeatable)
        #[arg(long = "done", value_name = "ID")]
        done: Vec<String>,

        /// Mark every item as pending
        #[arg(long)]
        reset: bool,

        /// Load and save checklist state in this JSON file
        #[arg(long)]
        state: Option<PathBuf>,

        /// Output format as JSON
        #[arg(long, short)]
        json: bool,

        /// Show item descriptions
        #[arg(long, short)]
        verbose: bool,
    },

    /// List recommended performance tools
    Tools {
        /// Only list tools in this category (e.g. Analysis, Images)
        #[arg(long)]
        category: Option<String>,

        /// Output format as JSON
        #[arg(long, short)]
        json: bool,

        /// Show tool features
        #[arg(long, short)]
        verbose: bool,
    },

    /// Create .perfauditrc.json with sensible defaults
    Init {
        /// Minimum performance score (e.g. 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    logger::init(log_level(args.log_level)?)?;

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::Checklist {
                done,
                reset,
                state,
                json,
                verbose,
            } => run_checklist(&done, reset, state.as_deref(), json, verbose),
            Commands::Tools {
                category,
                json,
                verbose,
            } => run_tools(category.as_deref(), json, verbose),
            Commands::Init { threshold, dir } => run_init(threshold, dir.as_deref()),
        };
    }

    let url = args
        .url
        .clone()
        .context("a URL is required when no subcommand is given")?;
    validate_url(&url)?;

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    // CLI flags override config file
    let config = load_config(&cwd, args.config.as_deref())?.merge_with_cli(CliOverrides {
        threshold: args.threshold,
        device: args.device,
        throttling: args.throttling,
        categories: args.categories.clone(),
        endpoint: args.endpoint.clone(),
    });

    let runner = config.runner_config();
    if !runner.can_run() {
        anyhow::bail!("Select at least one audit category");
    }

    let report = if args.sample {
        sample_report(&url)
    } else {
        let request = AuditRequest::new(url.as_str(), AuditConfig::from(&runner));
        let source = build_source(&config, args.seed)?;
        let show_progress = !(args.no_progress || args.quiet || args.json);
        execute_audit(source, request, show_progress, config.progress_interval())?
    };

    if args.json {
        println!("{}", JsonReporter::new().pretty().report(&report));
    } else if args.quiet {
        ConsoleReporter::new().report_quiet(&report);
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        reporter.report(&report);
    }

    let threshold = config.threshold();
    let score = report.summary().performance_score;
    if score < threshold as f64 {
        if !args.quiet && !args.json {
            eprintln!(
                "\n{}: Performance score {} is below threshold {}",
                "Failed".red().bold(),
                score,
                threshold
            );
        }
        return Ok(ExitCode::from(1));
    }

    Ok(ExitCode::SUCCESS)
}

/// `--log-level` wins over `PERFAUDIT_LOG`; subcommands only see the variable
fn log_level(flag: Option<LevelFilter>) -> Result<LevelFilter> {
    if let Some(level) = flag {
        return Ok(level);
    }
    match std::env::var("PERFAUDIT_LOG") {
        Ok(name) => logger::parse_level(&name).context("Invalid PERFAUDIT_LOG"),
        Err(_) => Ok(LevelFilter::Warn),
    }
}

fn validate_url(url: &str) -> Result<()> {
    let pattern = Regex::new(r"^https?://[^\s/?#]+[^\s]*$").context("Invalid URL pattern")?;
    if !pattern.is_match(url) {
        anyhow::bail!("Invalid URL: {} (expected http:// or https://)", url);
    }
    Ok(())
}

/// Remote endpoint when configured, otherwise the (optionally seeded) mock
fn build_source(config: &Config, seed: Option<u64>) -> Result<Arc<dyn MetricSource>> {
    if let Some(ref endpoint) = config.endpoint {
        return remote_source(endpoint);
    }
    Ok(match seed {
        Some(seed) => Arc::new(MockMetricSource::seeded(seed)),
        None => Arc::new(MockMetricSource::new()),
    })
}

#[cfg(feature = "remote")]
fn remote_source(endpoint: &str) -> Result<Arc<dyn MetricSource>> {
    let source = perfaudit::audit::RemoteMetricSource::new(endpoint)
        .with_context(|| format!("Failed to create client for {}", endpoint))?;
    Ok(Arc::new(source))
}

#[cfg(not(feature = "remote"))]
fn remote_source(endpoint: &str) -> Result<Arc<dyn MetricSource>> {
    anyhow::bail!(
        "--endpoint {} requires perfaudit to be built with the `remote` feature",
        endpoint
    )
}

/// Run the audit, drawing the progress bar on stderr while it is in flight
fn execute_audit(
    source: Arc<dyn MetricSource>,
    request: AuditRequest,
    show_progress: bool,
    interval: Duration,
) -> Result<AuditReport> {
    if !show_progress {
        return run_audit(&*source, &request).context("Audit failed");
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    eprintln!("{}: Auditing {}...", "Info".blue(), request.url);
    let (_, audit) = rt.block_on(async move {
        let audit = tokio::task::spawn_blocking(move || run_audit(&*source, &request));
        tokio::join!(run_progress(interval, draw_progress), audit)
    });
    eprintln!();

    audit
        .context("Audit task panicked")?
        .context("Audit failed")
}

fn draw_progress(value: u8) {
    let filled = value as usize / 5;
    let mut stderr = std::io::stderr();
    let _ = write!(
        stderr,
        "\r   [{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(20 - filled),
        value
    );
    let _ = stderr.flush();
}

fn run_checklist(
    done: &[String],
    reset: bool,
    state: Option<&Path>,
    json: bool,
    verbose: bool,
) -> Result<ExitCode> {
    let mut items = match state {
        Some(path) if path.exists() => load_checklist(path)?,
        _ => checklist::default_checklist(),
    };

    if reset {
        items = checklist::reset_all(&items);
    }
    for id in done {
        items = checklist::toggle_completion(&items, id)
            .with_context(|| format!("Cannot toggle checklist item {}", id))?;
    }

    if let Some(path) = state {
        let content =
            serde_json::to_string_pretty(&items).context("Failed to serialize checklist")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write checklist state: {}", path.display()))?;
    }

    if json {
        println!("{}", JsonReporter::new().pretty().report_checklist(&items));
    } else {
        let mut reporter = ConsoleReporter::new();
        if verbose {
            reporter = reporter.verbose();
        }
        reporter.report_checklist(&items);
    }
    Ok(ExitCode::SUCCESS)
}

fn load_checklist(path: &Path) -> Result<Vec<ChecklistItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read checklist state: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in checklist state: {}", path.display()))
}

fn run_tools(category: Option<&str>, json: bool, verbose: bool) -> Result<ExitCode> {
    let tools: Vec<Tool> = match category {
        Some(category) => tools_in_category(category).into_iter().cloned().collect(),
        None => TOOLS.to_vec(),
    };
    if tools.is_empty() {
        eprintln!("{}: No tools in that category", "Warning".yellow());
    }

    if json {
        println!("{}", JsonReporter::new().pretty().report_tools(&tools));
    } else {
        let mut reporter = ConsoleReporter::new();
        if verbose {
            reporter = reporter.verbose();
        }
        reporter.report_tools(&tools);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(70);
    let path = write_default_config(dir, Some(threshold_value))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_url_is_optional_for_subcommands() {
        let args = Args::try_parse_from(["perfaudit", "checklist"]).unwrap();
        assert!(args.url.is_none());
        assert!(matches!(args.command, Some(Commands::Checklist { .. })));

        let args = Args::try_parse_from(["perfaudit", "https://example.com", "--sample"]).unwrap();
        assert_eq!(args.url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_log_level_flag_wins() {
        assert_eq!(log_level(Some(LevelFilter::Trace)).unwrap(), LevelFilter::Trace);
    }
}
