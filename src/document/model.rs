/*!
 * In-memory document tree.
 *
 * The advisory container format is supplied externally as a tree of
 * paragraphs, runs, and tables with a fixed capability set: get/set text
 * per run, get/set run style attributes, clear a paragraph's runs and
 * append a new run, and insert/remove structural elements. This module is
 * that contract; documents round-trip through JSON via `file_utils`.
 */

use serde::{Deserialize, Serialize};

/// Character-level style attributes carried by a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// RGB color as a hex string ("1F4E79")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One contiguous text fragment with uniform styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,

    #[serde(default)]
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A hyperlink anchored in a paragraph: the target URL plus its display
/// text. Links are never translated; extraction records them and
/// reconstruction leaves them in place whether or not the paragraph's
/// runs are replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hyperlink {
    pub target: String,

    #[serde(default)]
    pub text: String,
}

impl Hyperlink {
    pub fn new(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            text: text.into(),
        }
    }
}

/// Paragraph-level formatting. Opaque pass-through: extraction records it,
/// reconstruction never touches it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_level: Option<u8>,
}

/// A paragraph: ordered runs plus paragraph-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub runs: Vec<Run>,

    /// Hyperlinks anchored in this paragraph, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hyperlinks: Vec<Hyperlink>,

    #[serde(default)]
    pub format: ParagraphFormat,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph with a single unstyled run. Used heavily by tests.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::new(text, RunStyle::default())],
            hyperlinks: Vec::new(),
            format: ParagraphFormat::default(),
        }
    }

    /// Anchor a hyperlink in the paragraph
    pub fn add_hyperlink(&mut self, link: Hyperlink) {
        self.hyperlinks.push(link);
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether the paragraph carries no visible text
    pub fn is_empty(&self) -> bool {
        self.text().trim().is_empty()
    }

    /// Remove all runs
    pub fn clear_runs(&mut self) {
        self.runs.clear();
    }

    /// Append a run at the end
    pub fn append_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Replace all content with a single styled run. This is the
    /// reconstruction primitive: clear, then insert one run carrying the
    /// translated text with the donor style. Hyperlinks are not runs and
    /// stay anchored in the paragraph.
    pub fn set_single_run(&mut self, text: impl Into<String>, style: RunStyle) {
        self.runs.clear();
        self.runs.push(Run::new(text, style));
    }
}

/// One table cell, holding its own paragraph sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::from_text(text)],
        }
    }
}

/// A table: rows of cells. The walker translates cell paragraphs in place;
/// table structure itself is never altered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

/// An embedded image reference. Never produces a content block; passed
/// through untouched unless it belongs to the removed first page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_emu: Option<u64>,
}

/// A top-level body element in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Paragraph(Paragraph),
    Table(Table),
    Image(Image),
}

/// The document handle: body elements in order, plus header and footer
/// paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub body: Vec<Element>,

    #[serde(default)]
    pub headers: Vec<Paragraph>,

    #[serde(default)]
    pub footers: Vec<Paragraph>,
}

/// Stable handle to the structural element backing a content block.
///
/// Reconstruction references paragraphs through these handles so that
/// first-page removal (which shifts body indices) can safely run after
/// all block replacements have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRef {
    /// Paragraph at `element` index in the body
    Body { element: usize },
    /// Paragraph inside a table cell
    TableCell {
        element: usize,
        row: usize,
        cell: usize,
        paragraph: usize,
    },
    /// Header paragraph
    Header { index: usize },
    /// Footer paragraph
    Footer { index: usize },
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a body paragraph
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Element::Paragraph(paragraph));
    }

    /// Append a body table
    pub fn push_table(&mut self, table: Table) {
        self.body.push(Element::Table(table));
    }

    /// Insert an element at a body position
    pub fn insert_element(&mut self, index: usize, element: Element) {
        self.body.insert(index, element);
    }

    /// Remove body elements by index. Indices are deduplicated and removed
    /// in descending order so earlier removals never shift later targets.
    pub fn remove_elements(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for idx in sorted.into_iter().rev() {
            if idx < self.body.len() {
                self.body.remove(idx);
            }
        }
    }

    /// Resolve a block handle to its paragraph
    pub fn paragraph(&self, block_ref: BlockRef) -> Option<&Paragraph> {
        match block_ref {
            BlockRef::Body { element } => match self.body.get(element)? {
                Element::Paragraph(p) => Some(p),
                _ => None,
            },
            BlockRef::TableCell {
                element,
                row,
                cell,
                paragraph,
            } => match self.body.get(element)? {
                Element::Table(t) => t.rows.get(row)?.get(cell)?.paragraphs.get(paragraph),
                _ => None,
            },
            BlockRef::Header { index } => self.headers.get(index),
            BlockRef::Footer { index } => self.footers.get(index),
        }
    }

    /// Resolve a block handle to its paragraph, mutably
    pub fn paragraph_mut(&mut self, block_ref: BlockRef) -> Option<&mut Paragraph> {
        match block_ref {
            BlockRef::Body { element } => match self.body.get_mut(element)? {
                Element::Paragraph(p) => Some(p),
                _ => None,
            },
            BlockRef::TableCell {
                element,
                row,
                cell,
                paragraph,
            } => match self.body.get_mut(element)? {
                Element::Table(t) => t
                    .rows
                    .get_mut(row)?
                    .get_mut(cell)?
                    .paragraphs
                    .get_mut(paragraph),
                _ => None,
            },
            BlockRef::Header { index } => self.headers.get_mut(index),
            BlockRef::Footer { index } => self.footers.get_mut(index),
        }
    }

    /// Total structural paragraph count across body, table cells, headers
    /// and footers - the N that extraction must map 1:1 onto blocks.
    pub fn paragraph_count(&self) -> usize {
        let body: usize = self
            .body
            .iter()
            .map(|e| match e {
                Element::Paragraph(_) => 1,
                Element::Table(t) => t
                    .rows
                    .iter()
                    .flatten()
                    .map(|c| c.paragraphs.len())
                    .sum(),
                Element::Image(_) => 0,
            })
            .sum();
        body + self.headers.len() + self.footers.len()
    }
}
