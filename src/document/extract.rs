/*!
 * Block extraction.
 *
 * Walks the document tree in order (body paragraphs, table cells row-major,
 * then headers and footers) and produces one content block per structural
 * paragraph, with stable ids and handles. Empty paragraphs still produce
 * blocks so reconstruction can verify the 1:1 mapping.
 */

use log::debug;
use serde::Serialize;

use crate::errors::DocumentError;

use super::first_page::FirstPagePlan;
use super::model::{BlockRef, Document, Element, Hyperlink, ParagraphFormat, Run, RunStyle};

/// Where in the document a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockLocation {
    Body,
    TableCell,
    Header,
    Footer,
}

/// One extracted paragraph, the unit the pipeline operates on.
#[derive(Debug, Clone)]
pub struct ContentBlock {
    /// Traversal index as a string. Monotonically increasing across the
    /// whole document, no gaps or duplicates.
    pub id: String,

    /// Concatenated run text.
    pub text: String,

    /// Set by the classifier after extraction; extraction leaves it false.
    pub translatable: bool,

    pub location: BlockLocation,

    /// Paragraph-level formatting, carried for inspection only.
    pub formatting: ParagraphFormat,

    /// Snapshot of the original runs.
    pub runs: Vec<Run>,

    /// Snapshot of the hyperlinks anchored in the paragraph. Links are
    /// never translated; the originals stay in the document tree.
    pub hyperlinks: Vec<Hyperlink>,

    /// Style of the first run with visible text. Applied to the replacement
    /// run at reconstruction.
    pub style_donor: RunStyle,

    /// Whether the paragraph carries no visible text.
    pub is_empty: bool,

    /// Stable structural handle used by reconstruction.
    pub block_ref: BlockRef,
}

/// Pick the style donor run: the first run whose text is non-empty after
/// trimming. Falls back to the default style.
fn style_donor(runs: &[Run]) -> RunStyle {
    runs.iter()
        .find(|r| !r.text.trim().is_empty())
        .map(|r| r.style.clone())
        .unwrap_or_default()
}

/// Result of extraction: the block sequence plus the staged first-page plan
/// reconstruction will need.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub blocks: Vec<ContentBlock>,
    pub first_page: FirstPagePlan,
}

/// Extract every structural paragraph as a content block, in document order.
///
/// First-page paragraphs are detected here, excluded from the block
/// sequence, and staged for removal during reconstruction. Returns an error
/// if the walk cannot account for every paragraph in the tree.
pub fn extract_blocks(document: &Document) -> Result<ExtractedDocument, DocumentError> {
    let first_page = FirstPagePlan::detect(document);

    let mut blocks = Vec::new();
    let mut next_id = 0usize;
    let mut staged_paragraphs = 0usize;

    let mut push_block =
        |blocks: &mut Vec<ContentBlock>,
         next_id: &mut usize,
         paragraph: &super::model::Paragraph,
         location: BlockLocation,
         block_ref: BlockRef| {
            let text = paragraph.text();
            blocks.push(ContentBlock {
                id: next_id.to_string(),
                is_empty: text.trim().is_empty(),
                translatable: false,
                location,
                formatting: paragraph.format.clone(),
                runs: paragraph.runs.clone(),
                hyperlinks: paragraph.hyperlinks.clone(),
                style_donor: style_donor(&paragraph.runs),
                text,
                block_ref,
            });
            *next_id += 1;
        };

    for (element_index, element) in document.body.iter().enumerate() {
        match element {
            Element::Paragraph(paragraph) => {
                if first_page.contains(element_index) {
                    staged_paragraphs += 1;
                    continue;
                }
                push_block(
                    &mut blocks,
                    &mut next_id,
                    paragraph,
                    BlockLocation::Body,
                    BlockRef::Body {
                        element: element_index,
                    },
                );
            }
            Element::Table(table) => {
                for (row_index, row) in table.rows.iter().enumerate() {
                    for (cell_index, cell) in row.iter().enumerate() {
                        for (para_index, paragraph) in cell.paragraphs.iter().enumerate() {
                            push_block(
                                &mut blocks,
                                &mut next_id,
                                paragraph,
                                BlockLocation::TableCell,
                                BlockRef::TableCell {
                                    element: element_index,
                                    row: row_index,
                                    cell: cell_index,
                                    paragraph: para_index,
                                },
                            );
                        }
                    }
                }
            }
            Element::Image(_) => {}
        }
    }

    for (index, paragraph) in document.headers.iter().enumerate() {
        push_block(
            &mut blocks,
            &mut next_id,
            paragraph,
            BlockLocation::Header,
            BlockRef::Header { index },
        );
    }
    for (index, paragraph) in document.footers.iter().enumerate() {
        push_block(
            &mut blocks,
            &mut next_id,
            paragraph,
            BlockLocation::Footer,
            BlockRef::Footer { index },
        );
    }

    let expected = document.paragraph_count() - staged_paragraphs;
    if blocks.len() != expected {
        return Err(DocumentError::StructuralIntegrity(format!(
            "extracted {} blocks but the document holds {} reachable paragraphs",
            blocks.len(),
            expected
        )));
    }

    debug!(
        "Extracted {} blocks ({} first-page paragraphs excluded)",
        blocks.len(),
        staged_paragraphs
    );

    Ok(ExtractedDocument { blocks, first_page })
}
