//! Catalog of third-party performance tools

use crate::checklist::Categorized;
use serde::Serialize;

/// An external tool recommended alongside the audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub url: &'static str,
    pub features: &'static [&'static str],
}

pub const TOOLS: &[Tool] = &[
    Tool {
        name: "Google Lighthouse",
        description: "Comprehensive performance, accessibility, and SEO auditing",
        category: "Analysis",
        url: "https://developers.google.com/web/tools/lighthouse",
        features: &[
            "Performance scoring",
            "Core Web Vitals",
            "Best practices",
            "Accessibility audit",
        ],
    },
    Tool {
        name: "WebPageTest",
        description: "Detailed performance testing with waterfall charts",
        category: "Analysis",
        url: "https://www.webpagetest.org/",
        features: &[
            "Multi-location testing",
            "Connection simulation",
            "Filmstrip view",
            "Performance budget",
        ],
    },
    Tool {
        name: "GTmetrix",
        description: "Performance monitoring with historical data",
        category: "Monitoring",
        url: "https://gtmetrix.com/",
        features: &[
            "Performance monitoring",
            "Historical reports",
            "Alerts",
            "Video playback",
        ],
    },
    Tool {
        name: "TinyPNG",
        description: "Smart PNG and JPEG compression",
        category: "Images",
        url: "https://tinypng.com/",
        features: &[
            "Lossless compression",
            "Batch processing",
            "API access",
            "WebP conversion",
        ],
    },
    Tool {
        name: "Bundle Analyzer",
        description: "Analyze and optimize JavaScript bundles",
        category: "JavaScript",
        url: "https://www.npmjs.com/package/webpack-bundle-analyzer",
        features: &[
            "Bundle visualization",
            "Size analysis",
            "Dependency tracking",
            "Tree shaking insights",
        ],
    },
    Tool {
        name: "Chrome DevTools",
        description: "Built-in performance profiling and debugging",
        category: "Development",
        url: "https://developers.google.com/web/tools/chrome-devtools",
        features: &[
            "Performance profiler",
            "Network analysis",
            "Coverage report",
            "Lighthouse integration",
        ],
    },
];

impl Categorized for Tool {
    fn category(&self) -> &str {
        self.category
    }
}

/// Tools in a category, case-insensitive
pub fn tools_in_category(category: &str) -> Vec<&'static Tool> {
    TOOLS
        .iter()
        .filter(|t| t.category.eq_ignore_ascii_case(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_urls_are_https() {
        assert_eq!(TOOLS.len(), 6);
        assert!(TOOLS.iter().all(|t| t.url.starts_with("https://")));
    }

    #[test]
    fn test_filter_by_category() {
        let analysis = tools_in_category("analysis");
        assert_eq!(analysis.len(), 2);
        assert_eq!(analysis[0].name, "Google Lighthouse");
        assert!(tools_in_category("Nope").is_empty());
    }
}
