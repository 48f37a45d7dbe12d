//! Audit runner configuration and the simulated progress timer

use crate::error::{AuditError, Result};
use crate::AuditCategory;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default tick period of the progress timer
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(500);
/// Progress added per tick
pub const PROGRESS_STEP: u8 = 10;

/// Emulated device form factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Mobile,
    Desktop,
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Mobile => write!(f, "mobile"),
            Device::Desktop => write!(f, "desktop"),
        }
    }
}

impl std::str::FromStr for Device {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(Device::Mobile),
            "desktop" => Ok(Device::Desktop),
            other => Err(AuditError::InvalidInput(format!("unknown device: {}", other))),
        }
    }
}

/// Emulated network throttling profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Throttling {
    None,
    #[serde(rename = "fast-3g")]
    Fast3g,
    #[default]
    #[serde(rename = "slow-4g")]
    Slow4g,
}

impl Throttling {
    pub fn label(self) -> &'static str {
        match self {
            Throttling::None => "No throttling",
            Throttling::Fast3g => "Fast 3G",
            Throttling::Slow4g => "Slow 4G",
        }
    }
}

impl std::fmt::Display for Throttling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Throttling::None => write!(f, "none"),
            Throttling::Fast3g => write!(f, "fast-3g"),
            Throttling::Slow4g => write!(f, "slow-4g"),
        }
    }
}

impl std::str::FromStr for Throttling {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Throttling::None),
            "fast-3g" => Ok(Throttling::Fast3g),
            "slow-4g" => Ok(Throttling::Slow4g),
            other => Err(AuditError::InvalidInput(format!(
                "unknown throttling profile: {}",
                other
            ))),
        }
    }
}

/// Categories selected by default for a new run
pub fn default_categories() -> Vec<AuditCategory> {
    vec![
        AuditCategory::Performance,
        AuditCategory::Accessibility,
        AuditCategory::BestPractices,
        AuditCategory::Seo,
    ]
}

/// Settings for one audit run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerConfig {
    #[serde(default)]
    pub device: Device,
    #[serde(default)]
    pub throttling: Throttling,
    #[serde(default = "default_categories")]
    pub categories: Vec<AuditCategory>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            device: Device::default(),
            throttling: Throttling::default(),
            categories: default_categories(),
        }
    }
}

impl RunnerConfig {
    /// Select the category if absent, deselect it if present
    pub fn toggle_category(&self, category: AuditCategory) -> Self {
        let mut categories = self.categories.clone();
        if let Some(pos) = categories.iter().position(|c| *c == category) {
            categories.remove(pos);
        } else {
            categories.push(category);
        }
        Self {
            categories,
            ..self.clone()
        }
    }

    /// A run needs at least one category
    pub fn can_run(&self) -> bool {
        !self.categories.is_empty()
    }
}

/// Outcome of advancing the progress counter by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStep {
    Running(u8),
    Finished,
}

/// Pure progress counter: +step per tick until it reaches 100, then finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTicker {
    value: u8,
    step: u8,
}

impl ProgressTicker {
    pub fn new(step: u8) -> Self {
        Self {
            value: 0,
            step: step.max(1),
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn tick(&mut self) -> ProgressStep {
        if self.value >= 100 {
            return ProgressStep::Finished;
        }
        self.value = self.value.saturating_add(self.step).min(100);
        ProgressStep::Running(self.value)
    }
}

impl Default for ProgressTicker {
    fn default() -> Self {
        Self::new(PROGRESS_STEP)
    }
}

/// Drive a [`ProgressTicker`] on a fixed-period timer until it finishes.
///
/// `on_progress` is called with each new value. The timer stops itself at 100;
/// dropping the future is the only way to cancel a run early. Returns the
/// number of ticks that reported progress.
pub async fn run_progress<F>(period: Duration, mut on_progress: F) -> usize
where
    F: FnMut(u8),
{
    let mut ticker = ProgressTicker::default();
    let mut interval = tokio::time::interval(period);
    // the first tick of a tokio interval completes immediately
    interval.tick().await;

    let mut ticks = 0;
    loop {
        interval.tick().await;
        match ticker.tick() {
            ProgressStep::Running(value) => {
                ticks += 1;
                on_progress(value);
            }
            ProgressStep::Finished => break,
        }
    }
    log::debug!("progress timer finished after {} ticks", ticks);
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.device, Device::Mobile);
        assert_eq!(config.throttling, Throttling::Slow4g);
        assert_eq!(config.categories.len(), 4);
        assert!(!config.categories.contains(&AuditCategory::Pwa));
        assert!(config.can_run());
    }

    #[test]
    fn test_toggle_category_adds_and_removes() {
        let config = RunnerConfig::default();
        let with_pwa = config.toggle_category(AuditCategory::Pwa);
        assert!(with_pwa.categories.contains(&AuditCategory::Pwa));
        assert_eq!(with_pwa.categories.last(), Some(&AuditCategory::Pwa));
        let without_seo = with_pwa.toggle_category(AuditCategory::Seo);
        assert!(!without_seo.categories.contains(&AuditCategory::Seo));
        // original untouched
        assert_eq!(config.categories.len(), 4);
    }

    #[test]
    fn test_cannot_run_without_categories() {
        let mut config = RunnerConfig::default();
        for c in default_categories() {
            config = config.toggle_category(c);
        }
        assert!(config.categories.is_empty());
        assert!(!config.can_run());
    }

    #[test]
    fn test_throttling_parse_and_display() {
        assert_eq!("fast-3g".parse::<Throttling>().unwrap(), Throttling::Fast3g);
        assert_eq!("Slow-4G".parse::<Throttling>().unwrap(), Throttling::Slow4g);
        assert_eq!(Throttling::None.to_string(), "none");
        assert!("dialup".parse::<Throttling>().is_err());
        let json = serde_json::to_string(&Throttling::Slow4g).unwrap();
        assert_eq!(json, "\"slow-4g\"");
    }

    #[test]
    fn test_ticker_reaches_100_in_ten_steps_then_finishes() {
        let mut ticker = ProgressTicker::default();
        let values: Vec<ProgressStep> = (0..11).map(|_| ticker.tick()).collect();
        assert_eq!(values[0], ProgressStep::Running(10));
        assert_eq!(values[9], ProgressStep::Running(100));
        assert_eq!(values[10], ProgressStep::Finished);
        assert_eq!(ticker.value(), 100);
        assert_eq!(ticker.tick(), ProgressStep::Finished);
    }

    #[test]
    fn test_ticker_caps_uneven_steps() {
        let mut ticker = ProgressTicker::new(30);
        ticker.tick();
        ticker.tick();
        ticker.tick();
        assert_eq!(ticker.tick(), ProgressStep::Running(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_progress_self_terminates() {
        let mut seen = Vec::new();
        let start = tokio::time::Instant::now();
        let ticks = run_progress(DEFAULT_PROGRESS_INTERVAL, |v| seen.push(v)).await;
        assert_eq!(ticks, 10);
        assert_eq!(seen, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        // ten progress ticks plus the stopping tick
        let elapsed = start.elapsed();
        assert!(elapsed >= DEFAULT_PROGRESS_INTERVAL * 11);
        assert!(elapsed < DEFAULT_PROGRESS_INTERVAL * 12);
    }
}
