/*!
 * Tests for document extraction, first-page handling, and reconstruction
 */

use cvetrans::document::{
    extract_blocks, reconstruct, BlockLocation, Document, Element, Hyperlink, Paragraph, Run,
    RunStyle, TEMPLATE_IMAGE,
};
use cvetrans::errors::DocumentError;
use cvetrans::translation::TranslationResult;

use crate::common;

#[test]
fn test_extractBlocks_withSampleAdvisory_shouldWalkEverythingInOrder() {
    let doc = common::sample_advisory_document();
    let extracted = extract_blocks(&doc).unwrap();

    // 3 body paragraphs (first page excluded), 4 table cells, 1 header, 1 footer
    assert_eq!(extracted.blocks.len(), 9);
    assert_eq!(extracted.first_page.len(), 2);

    let ids: Vec<&str> = extracted.blocks.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5", "6", "7", "8"]);

    assert!(extracted.blocks[0].text.contains("CVE-2025-41225"));
    assert!(extracted.blocks[1].is_empty);
    assert_eq!(extracted.blocks[3].text, "Product");
    assert_eq!(extracted.blocks[3].location, BlockLocation::TableCell);
    assert_eq!(extracted.blocks[7].location, BlockLocation::Header);
    assert_eq!(extracted.blocks[8].location, BlockLocation::Footer);

    // marketing first page never reaches the block sequence
    assert!(extracted
        .blocks
        .iter()
        .all(|b| !b.text.contains("attack surface")));
}

#[test]
fn test_extractBlocks_styleDonor_shouldSkipEmptyLeadingRuns() {
    let mut doc = Document::new();
    let mut paragraph = Paragraph::new();
    paragraph.append_run(Run::new("", RunStyle::default()));
    paragraph.append_run(Run::new(
        "VMware ESXi deployments are affected by CVE-2025-41225.",
        RunStyle {
            italic: Some(true),
            font_size: Some(11.0),
            ..RunStyle::default()
        },
    ));
    doc.push_paragraph(paragraph);

    let extracted = extract_blocks(&doc).unwrap();
    assert_eq!(extracted.blocks[0].style_donor.italic, Some(true));
    assert_eq!(extracted.blocks[0].style_donor.font_size, Some(11.0));
}

#[test]
fn test_reconstruct_withSampleAdvisory_shouldReplaceFirstPageWithTemplate() {
    let mut doc = common::sample_advisory_document();
    let extracted = extract_blocks(&doc).unwrap();

    let results: Vec<TranslationResult> = extracted
        .blocks
        .iter()
        .map(|b| TranslationResult::skipped(b.id.clone(), b.text.clone()))
        .collect();

    reconstruct(&mut doc, &extracted, &results).unwrap();

    // template image first, then the page break, then advisory content only
    let Element::Image(image) = &doc.body[0] else {
        panic!("expected template image at position 0");
    };
    assert_eq!(image.source, TEMPLATE_IMAGE);
    assert!(matches!(&doc.body[1], Element::Paragraph(_)));

    let body_text: Vec<String> = doc
        .body
        .iter()
        .filter_map(|e| match e {
            Element::Paragraph(p) => Some(p.text()),
            _ => None,
        })
        .collect();
    assert!(!body_text.iter().any(|t| t.contains("attack surface")));
    assert!(!body_text.iter().any(|t| t == "Security Advisory"));
    assert!(body_text.iter().any(|t| t.contains("CVE-2025-41225")));
}

#[test]
fn test_reconstruct_withTableCellResult_shouldReplaceCellParagraph() {
    let mut doc = common::sample_advisory_document();
    let extracted = extract_blocks(&doc).unwrap();

    let results: Vec<TranslationResult> = extracted
        .blocks
        .iter()
        .map(|b| {
            if b.text == "Critical" {
                TranslationResult::success(b.id.clone(), b.text.clone(), "緊急")
            } else {
                TranslationResult::skipped(b.id.clone(), b.text.clone())
            }
        })
        .collect();

    reconstruct(&mut doc, &extracted, &results).unwrap();

    let table = doc
        .body
        .iter()
        .find_map(|e| match e {
            Element::Table(t) => Some(t),
            _ => None,
        })
        .unwrap();
    assert_eq!(table.rows[1][1].paragraphs[0].text(), "緊急");
    assert_eq!(table.rows[1][0].paragraphs[0].text(), "VMware ESXi");
}

#[test]
fn test_reconstruct_withHyperlinkedParagraphs_shouldKeepLinksInPlace() {
    let mut doc = Document::new();

    let mut replaced = Paragraph::from_text(
        "VMware ESXi remediation steps are described in the linked knowledge base article.",
    );
    replaced.add_hyperlink(Hyperlink::new(
        "https://kb.vmware.com/s/article/12345",
        "KB 12345",
    ));
    doc.push_paragraph(replaced);

    let mut skipped = Paragraph::from_text("https://support.vmware.com/advisories");
    skipped.add_hyperlink(Hyperlink::new(
        "https://support.vmware.com/advisories",
        "VMware advisories",
    ));
    doc.push_paragraph(skipped);

    let extracted = extract_blocks(&doc).unwrap();
    assert_eq!(extracted.blocks.len(), 2);
    assert_eq!(extracted.blocks[0].hyperlinks.len(), 1);
    assert_eq!(
        extracted.blocks[1].hyperlinks[0].target,
        "https://support.vmware.com/advisories"
    );

    let results = vec![
        TranslationResult::success(
            "0",
            extracted.blocks[0].text.clone(),
            "修復手順はリンク先のナレッジベース記事に記載されています。",
        ),
        TranslationResult::skipped("1", extracted.blocks[1].text.clone()),
    ];
    reconstruct(&mut doc, &extracted, &results).unwrap();

    // replaced paragraph: text swapped, link still anchored
    let Element::Paragraph(paragraph) = &doc.body[2] else {
        panic!("expected paragraph after template insertion");
    };
    assert!(paragraph.text().contains("ナレッジベース"));
    assert_eq!(paragraph.hyperlinks.len(), 1);
    assert_eq!(
        paragraph.hyperlinks[0].target,
        "https://kb.vmware.com/s/article/12345"
    );

    // skipped paragraph: runs and link both untouched
    let Element::Paragraph(paragraph) = &doc.body[3] else {
        panic!("expected paragraph after template insertion");
    };
    assert_eq!(paragraph.text(), "https://support.vmware.com/advisories");
    assert_eq!(
        paragraph.hyperlinks[0].text,
        "VMware advisories"
    );
}

#[test]
fn test_reconstruct_withMissingResult_shouldAbortWithIntegrityError() {
    let mut doc = common::sample_advisory_document();
    let extracted = extract_blocks(&doc).unwrap();

    // drop the result for one block
    let results: Vec<TranslationResult> = extracted
        .blocks
        .iter()
        .skip(1)
        .map(|b| TranslationResult::skipped(b.id.clone(), b.text.clone()))
        .collect();

    let err = reconstruct(&mut doc, &extracted, &results).unwrap_err();
    assert!(matches!(err, DocumentError::StructuralIntegrity(_)));
}

#[test]
fn test_reconstruct_withDuplicateResults_shouldAbortWithIntegrityError() {
    let mut doc = common::sample_advisory_document();
    let extracted = extract_blocks(&doc).unwrap();

    let mut results: Vec<TranslationResult> = extracted
        .blocks
        .iter()
        .map(|b| TranslationResult::skipped(b.id.clone(), b.text.clone()))
        .collect();
    results.push(TranslationResult::skipped("0", "duplicate"));

    let err = reconstruct(&mut doc, &extracted, &results).unwrap_err();
    assert!(matches!(err, DocumentError::StructuralIntegrity(_)));
}

#[test]
fn test_reconstruct_successWithBoldDonor_shouldStyleReplacementRun() {
    let mut doc = Document::new();
    doc.push_paragraph(common::bold_paragraph(
        "VMware ESXi contains a heap-overflow vulnerability, CVE-2025-41225.",
    ));
    let extracted = extract_blocks(&doc).unwrap();

    let results = vec![TranslationResult::success(
        "0",
        extracted.blocks[0].text.clone(),
        "VMware ESXiにはヒープオーバーフローの脆弱性CVE-2025-41225が含まれています。",
    )];
    reconstruct(&mut doc, &extracted, &results).unwrap();

    let Element::Paragraph(paragraph) = &doc.body[2] else {
        panic!("expected paragraph after template insertion");
    };
    assert_eq!(paragraph.runs.len(), 1);
    assert_eq!(paragraph.runs[0].style.bold, Some(true));
}
