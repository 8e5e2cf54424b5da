//! Core Web Vitals estimator.
//!
//! No browser runs here: LCP, blocking time, and CLS are approximated from
//! page weight, script counts, and undimensioned images. Every finding is
//! flagged `is_estimated` so consumers never present these as field data.

use crate::analyzer::scorers::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, Finding, SignalCode};

// Point allocation (sums to 100)
const PTS_LCP: f64 = 40.0;
const PTS_TBT: f64 = 35.0;
const PTS_CLS: f64 = 25.0;

// Model constants for the estimates
const LCP_BASE_MS: f64 = 800.0;
const LCP_MS_PER_KB: f64 = 3.0;
const LCP_MS_PER_SCRIPT: f64 = 40.0;
const TBT_MS_PER_SCRIPT: f64 = 25.0;
const TBT_MS_PER_100_INLINE_BYTES: f64 = 0.1;
const CLS_BASE: f64 = 0.02;
const CLS_PER_UNDIMENSIONED_RATIO: f64 = 0.25;

// Google's published good/needs-improvement thresholds
const LCP_GOOD_MS: f64 = 2500.0;
const LCP_POOR_MS: f64 = 4000.0;
const TBT_GOOD_MS: f64 = 200.0;
const TBT_POOR_MS: f64 = 600.0;
const CLS_GOOD: f64 = 0.1;
const CLS_POOR: f64 = 0.25;

pub struct CoreWebVitalsAudit;

impl CoreWebVitalsAudit {
    /// Estimated largest contentful paint in milliseconds
    pub fn estimate_lcp_ms(doc: &DocumentModel) -> f64 {
        let kb = doc.page_weight() as f64 / 1024.0;
        LCP_BASE_MS + kb * LCP_MS_PER_KB + doc.external_scripts as f64 * LCP_MS_PER_SCRIPT
    }

    /// Estimated total blocking time in milliseconds
    pub fn estimate_tbt_ms(doc: &DocumentModel) -> f64 {
        doc.external_scripts as f64 * TBT_MS_PER_SCRIPT
            + doc.inline_script_bytes as f64 / 100.0 * TBT_MS_PER_100_INLINE_BYTES
    }

    /// Estimated cumulative layout shift
    pub fn estimate_cls(doc: &DocumentModel) -> f64 {
        if doc.images.is_empty() {
            return CLS_BASE;
        }
        let undimensioned = doc.images.iter().filter(|i| !i.has_dimensions).count();
        CLS_BASE + CLS_PER_UNDIMENSIONED_RATIO * undimensioned as f64 / doc.images.len() as f64
    }

    fn graded(value: f64, good: f64, poor: f64) -> f64 {
        if value <= good {
            1.0
        } else if value <= poor {
            0.5
        } else {
            0.0
        }
    }

    fn estimate(
        checklist: &mut Checklist,
        code: SignalCode,
        points: f64,
        fraction: f64,
        message: String,
    ) {
        let finding = if fraction >= 1.0 {
            Finding::strength(Category::CoreWebVitals, code, message).estimated()
        } else {
            Finding::issue(Category::CoreWebVitals, code, message).estimated()
        };
        checklist.add(points, fraction, finding);
    }
}

impl CategoryScorer for CoreWebVitalsAudit {
    fn category(&self) -> Category {
        Category::CoreWebVitals
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::CoreWebVitals);

        let lcp = Self::estimate_lcp_ms(doc);
        Self::estimate(
            &mut checklist,
            SignalCode::LcpEstimate,
            PTS_LCP,
            Self::graded(lcp, LCP_GOOD_MS, LCP_POOR_MS),
            format!("Estimated LCP ~{:.0} ms (good is under {:.0} ms)", lcp, LCP_GOOD_MS),
        );

        let tbt = Self::estimate_tbt_ms(doc);
        Self::estimate(
            &mut checklist,
            SignalCode::TbtEstimate,
            PTS_TBT,
            Self::graded(tbt, TBT_GOOD_MS, TBT_POOR_MS),
            format!("Estimated blocking time ~{:.0} ms from {} scripts", tbt, doc.external_scripts),
        );

        let cls = Self::estimate_cls(doc);
        Self::estimate(
            &mut checklist,
            SignalCode::ClsEstimate,
            PTS_CLS,
            Self::graded(cls, CLS_GOOD, CLS_POOR),
            format!("Estimated layout shift ~{:.2} (good is under {})", cls, CLS_GOOD),
        );

        checklist.into_score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(html: &str) -> DocumentModel {
        DocumentModel::parse("https://example.com/", html, None)
    }

    #[test]
    fn light_page_scores_full_and_is_all_estimates() {
        let score = CoreWebVitalsAudit.score(&doc_with("<html><body><p>hi</p></body></html>"));
        assert_eq!(score.score, 100.0);
        assert!(score.findings.iter().all(|f| f.is_estimated));
    }

    #[test]
    fn heavy_page_degrades_lcp_estimate() {
        let html = format!("<html><body>{}</body></html>", "x".repeat(1200 * 1024));
        let score = CoreWebVitalsAudit.score(&doc_with(&html));
        let lcp = score
            .findings
            .iter()
            .find(|f| f.code == SignalCode::LcpEstimate)
            .unwrap();
        assert_eq!(lcp.severity, crate::FindingSeverity::Issue);
    }

    #[test]
    fn undimensioned_images_raise_cls_estimate() {
        let html = r#"<html><body><img src="a.png"><img src="b.png"></body></html>"#;
        let doc = doc_with(html);
        let cls = CoreWebVitalsAudit::estimate_cls(&doc);
        assert!(cls > CLS_GOOD);
    }

    #[test]
    fn dimensioned_images_keep_cls_low() {
        let html = r#"<html><body><img src="a.png" width="10" height="10"></body></html>"#;
        let doc = doc_with(html);
        assert!(CoreWebVitalsAudit::estimate_cls(&doc) < CLS_GOOD);
    }

    #[test]
    fn script_pile_raises_tbt_estimate() {
        let scripts: String = (0..30)
            .map(|i| format!("<script src=\"/s{}.js\"></script>", i))
            .collect();
        let doc = doc_with(&format!("<html><body>{}</body></html>", scripts));
        assert!(CoreWebVitalsAudit::estimate_tbt_ms(&doc) > TBT_GOOD_MS);
    }
}
