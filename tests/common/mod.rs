/*!
 * Common test utilities for the cvetrans test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use cvetrans::document::{Cell, Document, Paragraph, Run, RunStyle, Table};

/// Initialize logging for tests. Safe to call from every test; only the
/// first call installs the logger. Honors `RUST_LOG` like the binary does.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A paragraph with a single bold run, for style-donor assertions
pub fn bold_paragraph(text: &str) -> Paragraph {
    let mut paragraph = Paragraph::new();
    paragraph.append_run(Run::new(
        text,
        RunStyle {
            bold: Some(true),
            ..RunStyle::default()
        },
    ));
    paragraph
}

/// A representative advisory document: a marketing first page, narrative
/// paragraphs, an empty paragraph, a product/severity table, and a header
/// and footer.
pub fn sample_advisory_document() -> Document {
    let mut doc = Document::new();

    // first page
    doc.push_paragraph(Paragraph::from_text(
        "As the attack surface expands, sophisticated threat actors demand a proactive and predictive approach to vulnerability management.",
    ));
    doc.push_paragraph(Paragraph::from_text("Security Advisory"));

    // advisory content
    doc.push_paragraph(Paragraph::from_text(
        "VMware ESXi 7.0.3 contains an improper access control vulnerability tracked as CVE-2025-41225.",
    ));
    doc.push_paragraph(Paragraph::new());
    doc.push_paragraph(Paragraph::from_text(
        "Customers should apply the patches listed in the response matrix to remediate this issue.",
    ));
    doc.push_table(Table {
        rows: vec![
            vec![Cell::from_text("Product"), Cell::from_text("Severity")],
            vec![Cell::from_text("VMware ESXi"), Cell::from_text("Critical")],
        ],
    });

    doc.headers
        .push(Paragraph::from_text("Vulnerability Advisory Bulletin"));
    doc.footers
        .push(Paragraph::from_text("Distribution restricted to customers"));

    doc
}
