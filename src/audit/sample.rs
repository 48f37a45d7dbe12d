//! Fixed sample analysis shown by the dashboard

use super::{AuditMetrics, AuditReport};
use crate::runner::{Device, Throttling};
use crate::{Issue, Severity};
use chrono::Utc;

/// Canned dashboard metrics
pub fn sample_metrics() -> AuditMetrics {
    AuditMetrics {
        performance: 67.0,
        accessibility: 89.0,
        best_practices: 83.0,
        seo: 92.0,
        pwa: 45.0,
        fcp: 2.1,
        lcp: 3.8,
        cls: 0.15,
        fid: 180.0,
        ttfb: 850.0,
    }
}

/// The standard issue catalog with remediation advice
pub fn sample_issues() -> Vec<Issue> {
    vec![
        Issue::new(
            Severity::Critical,
            "Images",
            "Serve images in next-gen formats",
            "Image formats like WebP and AVIF often provide better compression than PNG or JPEG.",
        )
        .with_solution("Convert images to WebP/AVIF format using an image optimization pipeline")
        .with_savings_ms(1200),
        Issue::new(
            Severity::Critical,
            "JavaScript",
            "Remove unused JavaScript",
            "Remove dead code and unused polyfills to reduce bundle size.",
        )
        .with_solution("Use tree shaking and code splitting with dynamic imports")
        .with_savings_ms(890),
        Issue::new(
            Severity::Warning,
            "CSS",
            "Eliminate render-blocking resources",
            "Resources are blocking the first paint of your page.",
        )
        .with_solution("Inline critical CSS and defer non-critical stylesheets")
        .with_savings_ms(450),
        Issue::new(
            Severity::Warning,
            "Network",
            "Enable text compression",
            "Text-based resources should be served with compression.",
        )
        .with_solution("Enable gzip/brotli compression on your server")
        .with_savings_ms(320),
        Issue::new(
            Severity::Info,
            "Caching",
            "Serve static assets with efficient cache policy",
            "A long cache lifetime can speed up repeat visits.",
        )
        .with_solution("Set appropriate cache headers for static assets")
        .with_savings_ms(200),
    ]
}

/// Example code accompanying a solution, for categories that have one
pub fn solution_snippet(category: &str) -> Option<&'static str> {
    match category {
        "Images" => Some(
            r#"<picture>
  <source srcset="/hero.avif" type="image/avif">
  <source srcset="/hero.webp" type="image/webp">
  <img src="/hero.jpg" alt="Description" width="800" height="600" loading="lazy">
</picture>"#,
        ),
        "JavaScript" => Some(
            r#"// Dynamic imports for code splitting
const HeavyComponent = await import('./HeavyComponent.js')

// Tree shaking with ES modules
import { specificFunction } from 'library'"#,
        ),
        _ => None,
    }
}

/// The full sample analysis for a URL
pub fn sample_report(url: &str) -> AuditReport {
    AuditReport {
        url: url.to_string(),
        generated_at: Utc::now(),
        device: Device::Mobile,
        throttling: Throttling::Slow4g,
        metrics: sample_metrics(),
        issues: sample_issues(),
    }
}
