/*!
 * First-page detection and template replacement.
 *
 * Advisory documents open with a fixed marketing page that must not be
 * translated. Detection runs at extraction time: body paragraphs before the
 * first line of actual advisory content are staged for removal, so the
 * translation pipeline never sees them. Removal and template insertion are
 * applied during reconstruction, after block replacement.
 */

use log::debug;

use super::model::{Document, Element, Paragraph, RunStyle};

/// File name of the Japanese replacement page inserted at the top of every
/// translated document.
pub const TEMPLATE_IMAGE: &str = "japanese_first_page_template.png";

/// Template image width, 6 inches in EMU.
const TEMPLATE_WIDTH_EMU: u64 = 6 * 914_400;

/// Paragraphs shorter than this (before advisory content starts) are part of
/// the first page even when no marker phrase matches.
const SHORT_PARAGRAPH_CHARS: usize = 50;

/// Marker phrases identifying first-page marketing content. Matched
/// case-insensitively as substrings.
static MARKER_PHRASES: &[&str] = &[
    "as the attack surface expands",
    "attack surface",
    "sophisticated threat actors",
    "vulnerability management has shifted",
    "proactive and predictive approach",
    "transformation calls for",
    "risk-based methodologies",
    "advanced threat intelligence",
    "broader security architecture",
    "contemporary vulnerability management",
    "organization's distinct threat environment",
    "customize remediation strategies",
    "advanced vulnerability management",
    "avm services",
    "risk-based approach",
    "asset value",
    "severity of vulnerabilities",
    "threat actors",
    "this is where our proactive",
    "build a robust vulnerability management system",
    "based on a risk-based approach",
    "come to play and help you",
];

/// Whether a paragraph is the first line of actual advisory content, ending
/// the first page.
fn is_content_start(text: &str) -> bool {
    let lower = text.trim().to_lowercase();

    let vendor_product = lower.contains("vmware")
        && ["esxi", "vcenter", "workstation", "fusion"]
            .iter()
            .any(|p| lower.contains(p));

    vendor_product
        || (lower.contains("vmsa-") && lower.len() > 10)
        || (lower.contains("cve-") && lower.len() > 15)
        || (lower.contains("vulnerability detail") && lower.len() > 10)
        || lower.contains("脆弱性の詳細")
}

/// Whether a paragraph belongs to the first page, given that advisory
/// content has not started yet.
fn is_first_page_paragraph(text: &str) -> bool {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();
    MARKER_PHRASES.iter().any(|m| lower.contains(m)) || trimmed.len() < SHORT_PARAGRAPH_CHARS
}

/// Staged removal plan for first-page body elements.
///
/// Indices refer to the body as it stood at extraction time; `apply` removes
/// them in descending order, so it must run only after all block replacement
/// (which addresses paragraphs through stable handles) is complete.
#[derive(Debug, Clone, Default)]
pub struct FirstPagePlan {
    removals: Vec<usize>,
}

impl FirstPagePlan {
    /// Scan the document body and stage first-page elements for removal.
    ///
    /// Walks body elements in order until the advisory content start cue is
    /// found. Before the cue, paragraphs matching a marker phrase or shorter
    /// than the short-paragraph bound are staged; tables are never staged.
    pub fn detect(document: &Document) -> Self {
        let mut removals = Vec::new();

        for (index, element) in document.body.iter().enumerate() {
            let Element::Paragraph(paragraph) = element else {
                continue;
            };
            let text = paragraph.text();

            if is_content_start(&text) {
                debug!("Advisory content starts at body element {index}");
                break;
            }

            if is_first_page_paragraph(&text) {
                removals.push(index);
            }
        }

        debug!("Staged {} first-page elements for removal", removals.len());
        Self { removals }
    }

    /// Whether a body element index is staged for removal.
    pub fn contains(&self, index: usize) -> bool {
        self.removals.contains(&index)
    }

    /// Number of staged elements.
    pub fn len(&self) -> usize {
        self.removals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }

    /// Remove the staged elements from the document.
    pub fn apply(&self, document: &mut Document) {
        document.remove_elements(&self.removals);
    }
}

/// Insert the Japanese template page at the top of the body: the template
/// image followed by a page-break paragraph separating it from the advisory
/// content.
pub fn insert_template(document: &mut Document) {
    let mut page_break = Paragraph::new();
    page_break.set_single_run("\u{000C}", RunStyle::default());
    document.insert_element(0, Element::Paragraph(page_break));

    document.insert_element(
        0,
        Element::Image(super::model::Image {
            source: TEMPLATE_IMAGE.to_string(),
            width_emu: Some(TEMPLATE_WIDTH_EMU),
        }),
    );
}
