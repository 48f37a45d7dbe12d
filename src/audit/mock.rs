//! Randomized stand-in for a real measurement pipeline
//!
//! Values are drawn from fixed ranges and never depend on the requested URL.

use super::{
    AuditRequest, AuditResponse, AuditValues, CategoryScore, CategoryScores, LighthouseResult,
    MetricSource, NumericAudit, Timing,
};
use crate::classifier::VitalMetric;
use crate::error::Result;
use crate::AuditCategory;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Half-open value range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        self.min + rng.gen::<f64>() * (self.max - self.min)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Score range (0-1) for a category
pub fn category_range(category: AuditCategory) -> ValueRange {
    match category {
        AuditCategory::Performance => ValueRange::new(0.5, 0.9),
        AuditCategory::Accessibility => ValueRange::new(0.7, 1.0),
        AuditCategory::BestPractices => ValueRange::new(0.7, 1.0),
        AuditCategory::Seo => ValueRange::new(0.8, 1.0),
        AuditCategory::Pwa => ValueRange::new(0.2, 0.8),
    }
}

/// Raw audit value range (ms, or unitless for CLS)
pub fn metric_range(metric: VitalMetric) -> ValueRange {
    match metric {
        VitalMetric::Fcp => ValueRange::new(1000.0, 3000.0),
        VitalMetric::Lcp => ValueRange::new(2000.0, 5000.0),
        VitalMetric::Cls => ValueRange::new(0.0, 0.3),
        VitalMetric::Fid => ValueRange::new(50.0, 250.0),
        VitalMetric::Ttfb => ValueRange::new(300.0, 800.0),
    }
}

pub const TIMING_RANGE: ValueRange = ValueRange::new(5000.0, 15000.0);

/// [`MetricSource`] returning pseudo-random values
pub struct MockMetricSource {
    rng: Mutex<StdRng>,
}

impl MockMetricSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence of snapshots for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockMetricSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for MockMetricSource {
    fn snapshot(&self, request: &AuditRequest) -> Result<AuditResponse> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let rng = &mut *rng;

        let mut score = |c: AuditCategory| CategoryScore {
            score: category_range(c).sample(&mut *rng),
        };
        let categories = CategoryScores {
            performance: score(AuditCategory::Performance),
            accessibility: score(AuditCategory::Accessibility),
            best_practices: score(AuditCategory::BestPractices),
            seo: score(AuditCategory::Seo),
            pwa: score(AuditCategory::Pwa),
        };

        let mut audit = |m: VitalMetric| NumericAudit {
            numeric_value: metric_range(m).sample(&mut *rng),
        };
        let audits = AuditValues {
            first_contentful_paint: audit(VitalMetric::Fcp),
            largest_contentful_paint: audit(VitalMetric::Lcp),
            cumulative_layout_shift: audit(VitalMetric::Cls),
            first_input_delay: audit(VitalMetric::Fid),
            server_response_time: audit(VitalMetric::Ttfb),
        };

        let timing = Timing {
            total: TIMING_RANGE.sample(&mut *rng),
        };

        log::debug!(
            "mock snapshot for {} ({} categories requested)",
            request.url,
            request.config.categories.len()
        );

        Ok(AuditResponse {
            lhr: LighthouseResult { categories, audits },
            timing,
        })
    }
}
