//! Performance scorer: page weight and resource heuristics.
//!
//! No browser timing is available, so every signal here is an estimate
//! derived from the HTML itself and is flagged as such.

use super::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, Finding, SignalCode};

// Point allocation (sums to 100)
const PTS_PAGE_WEIGHT: f64 = 30.0;
const PTS_SCRIPT_COUNT: f64 = 25.0;
const PTS_INLINE_STYLE: f64 = 15.0;
const PTS_IMAGE_DIMENSIONS: f64 = 15.0;
const PTS_LAZY_LOADING: f64 = 15.0;

const WEIGHT_GOOD: usize = 100 * 1024;
const WEIGHT_FAIR: usize = 300 * 1024;
const WEIGHT_POOR: usize = 600 * 1024;

const SCRIPTS_GOOD: usize = 5;
const SCRIPTS_FAIR: usize = 15;
const SCRIPTS_POOR: usize = 30;

const INLINE_STYLE_GOOD: usize = 2 * 1024;
const INLINE_STYLE_FAIR: usize = 10 * 1024;

pub struct PerformanceScorer;

impl PerformanceScorer {
    fn estimate(
        checklist: &mut Checklist,
        code: SignalCode,
        points: f64,
        fraction: f64,
        message: String,
    ) {
        let finding = if fraction >= 1.0 {
            Finding::strength(Category::Performance, code, message).estimated()
        } else {
            Finding::issue(Category::Performance, code, message).estimated()
        };
        checklist.add(points, fraction, finding);
    }
}

impl CategoryScorer for PerformanceScorer {
    fn category(&self) -> Category {
        Category::Performance
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::Performance);

        let weight = doc.page_weight();
        let kb = weight / 1024;
        let (fraction, msg) = if weight <= WEIGHT_GOOD {
            (1.0, format!("Page weight is lean (~{} KB)", kb))
        } else if weight <= WEIGHT_FAIR {
            (0.66, format!("Page weight is moderate (~{} KB)", kb))
        } else if weight <= WEIGHT_POOR {
            (0.33, format!("Page weight is heavy (~{} KB)", kb))
        } else {
            (0.0, format!("Page weight is very heavy (~{} KB)", kb))
        };
        Self::estimate(&mut checklist, SignalCode::PageWeight, PTS_PAGE_WEIGHT, fraction, msg);

        let scripts = doc.external_scripts;
        let (fraction, msg) = if scripts <= SCRIPTS_GOOD {
            (1.0, format!("{} external script(s)", scripts))
        } else if scripts <= SCRIPTS_FAIR {
            (0.6, format!("{} external scripts add fetch overhead", scripts))
        } else if scripts <= SCRIPTS_POOR {
            (0.3, format!("{} external scripts; consolidate bundles", scripts))
        } else {
            (0.0, format!("{} external scripts will dominate load time", scripts))
        };
        Self::estimate(&mut checklist, SignalCode::ScriptCount, PTS_SCRIPT_COUNT, fraction, msg);

        let style_bytes = doc.inline_style_bytes;
        let (fraction, msg) = if style_bytes <= INLINE_STYLE_GOOD {
            (1.0, format!("Inline styles are small ({} bytes)", style_bytes))
        } else if style_bytes <= INLINE_STYLE_FAIR {
            (0.5, format!("{} bytes of inline styles", style_bytes))
        } else {
            (0.0, format!("{} bytes of inline styles bloat the document", style_bytes))
        };
        Self::estimate(
            &mut checklist,
            SignalCode::InlineStyleVolume,
            PTS_INLINE_STYLE,
            fraction,
            msg,
        );

        if doc.images.is_empty() {
            Self::estimate(
                &mut checklist,
                SignalCode::ImageDimensions,
                PTS_IMAGE_DIMENSIONS,
                1.0,
                "No images to cause layout shift".to_string(),
            );
            Self::estimate(
                &mut checklist,
                SignalCode::LazyLoading,
                PTS_LAZY_LOADING,
                1.0,
                "No images to lazy-load".to_string(),
            );
        } else {
            let with_dims = doc.images.iter().filter(|i| i.has_dimensions).count();
            let ratio = with_dims as f64 / doc.images.len() as f64;
            let fraction = if ratio >= 0.8 {
                1.0
            } else if ratio >= 0.4 {
                0.5
            } else {
                0.0
            };
            Self::estimate(
                &mut checklist,
                SignalCode::ImageDimensions,
                PTS_IMAGE_DIMENSIONS,
                fraction,
                format!(
                    "{} of {} images declare width and height",
                    with_dims,
                    doc.images.len()
                ),
            );

            let lazy = doc.raw_html.contains("loading=\"lazy\"")
                || doc.raw_html.contains("loading='lazy'");
            Self::estimate(
                &mut checklist,
                SignalCode::LazyLoading,
                PTS_LAZY_LOADING,
                if lazy { 1.0 } else { 0.0 },
                if lazy {
                    "Images use native lazy loading".to_string()
                } else {
                    "No lazy loading on images".to_string()
                },
            );
        }

        checklist.into_score()
    }
}
