//! Coverage comment body rendering.
//!
//! A published body is one marker line followed by a markdown table: a
//! header row carrying the configured title, then one row per metric with
//! the reported percentage and a `( covered / total )` fraction.

use crate::coverage::CoverageSummary;
use crate::types::PublishId;

use super::marker::format_marker;

/// The fully resolved, ready-to-send unit for one report file.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPublication {
    pub title: String,
    pub identity: PublishId,
    pub body: String,
}

impl RenderedPublication {
    pub fn new(summary: &CoverageSummary, title: String, identity: PublishId) -> Self {
        let body = format_comment(summary, &title, &identity);
        RenderedPublication {
            title,
            identity,
            body,
        }
    }
}

/// Renders the comment body for one coverage summary.
///
/// Percentages are rendered with `f64`'s `Display`, reproducing the report's
/// own value without re-rounding: `87.5` prints as `87.5%`, `70.0` as `70%`.
pub fn format_comment(summary: &CoverageSummary, title: &str, identity: &PublishId) -> String {
    let mut body = String::new();
    body.push_str(&format_marker(identity));
    body.push('\n');
    body.push_str(&format!("| {} | % | values |\n", title));
    body.push_str("| --- | :---: | :---: |\n");
    for (label, metric) in summary.metrics() {
        body.push_str(&format!(
            "| {} | {}% | ( {} / {} ) |\n",
            label, metric.pct, metric.covered, metric.total
        ));
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::marker::{MarkerScan, scan_marker};
    use crate::coverage::MetricCoverage;
    use proptest::prelude::*;

    fn sample_summary() -> CoverageSummary {
        CoverageSummary {
            statements: MetricCoverage {
                pct: 87.5,
                covered: 35,
                total: 40,
            },
            branches: MetricCoverage {
                pct: 70.0,
                covered: 7,
                total: 10,
            },
            functions: MetricCoverage {
                pct: 100.0,
                covered: 5,
                total: 5,
            },
            lines: MetricCoverage {
                pct: 90.0,
                covered: 90,
                total: 100,
            },
        }
    }

    #[test]
    fn renders_marker_then_table() {
        let body = format_comment(
            &sample_summary(),
            "Coverage",
            &PublishId::new("cov-main"),
        );

        let mut lines = body.lines();
        assert_eq!(
            scan_marker(lines.next().unwrap()),
            MarkerScan::Marker(PublishId::new("cov-main"))
        );
        assert_eq!(lines.next().unwrap(), "| Coverage | % | values |");
        assert_eq!(lines.next().unwrap(), "| --- | :---: | :---: |");
        assert_eq!(lines.next().unwrap(), "| Statements | 87.5% | ( 35 / 40 ) |");
        assert_eq!(lines.next().unwrap(), "| Branches | 70% | ( 7 / 10 ) |");
        assert_eq!(lines.next().unwrap(), "| Functions | 100% | ( 5 / 5 ) |");
        assert_eq!(lines.next().unwrap(), "| Lines | 90% | ( 90 / 100 ) |");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn whole_percentages_render_without_decimal_point() {
        let body = format_comment(&sample_summary(), "Coverage", &PublishId::new("cov"));
        assert!(body.contains("70%"));
        assert!(!body.contains("70.0%"));
    }

    #[test]
    fn rendered_publication_carries_its_body() {
        let publication = RenderedPublication::new(
            &sample_summary(),
            "Coverage".to_string(),
            PublishId::new("cov-main"),
        );
        assert_eq!(publication.title, "Coverage");
        assert!(publication.body.contains("Statements | 87.5% | ( 35 / 40 )"));
    }

    proptest! {
        /// The marker embedded in any rendered body scans back to the
        /// identity it was rendered with.
        #[test]
        fn body_marker_roundtrips(
            identity in "[^\u{0}-\u{1f}\u{7f}]{1,40}",
            title in "[^\u{0}-\u{1f}\u{7f}|]{0,30}",
            covered in 0u64..1000,
            total in 1000u64..2000,
        ) {
            let summary = CoverageSummary {
                statements: MetricCoverage { pct: 50.0, covered, total },
                branches: MetricCoverage { pct: 0.0, covered: 0, total: 0 },
                functions: MetricCoverage { pct: 0.0, covered: 0, total: 0 },
                lines: MetricCoverage { pct: 0.0, covered: 0, total: 0 },
            };
            let id = PublishId::new(&identity);
            let body = format_comment(&summary, &title, &id);
            prop_assert_eq!(scan_marker(&body), MarkerScan::Marker(id));
        }
    }
}
