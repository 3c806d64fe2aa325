/*!
 * End-to-end document translation tests, wired through mock providers
 */

use std::sync::Arc;
use std::time::Duration;

use cvetrans::app_config::Config;
use cvetrans::classifier::ClassifierConfig;
use cvetrans::document::{extract_blocks, Document, Element, Paragraph, TEMPLATE_IMAGE};
use cvetrans::providers::mock::MockTranslator;
use cvetrans::providers::RequestParams;
use cvetrans::translation::{
    BatchOptions, DocumentTranslator, TranslationService, TranslationStatus,
};

use crate::common;

fn document_translator(mock: MockTranslator, options: BatchOptions) -> DocumentTranslator {
    common::init_test_logging();
    DocumentTranslator::new(
        Arc::new(TranslationService::new(
            Arc::new(mock),
            RequestParams::default(),
        )),
        options,
        ClassifierConfig::default(),
    )
}

#[tokio::test]
async fn test_translateDocument_endToEnd_shouldProtectTranslateAndRestore() {
    let mut doc = Document::new();
    doc.push_paragraph(Paragraph::from_text(
        "VMware ESXi 7.0.3 contains a critical vulnerability CVE-2025-41225.",
    ));

    // the backend sees only placeholder tokens and echoes them in Japanese
    let mock = MockTranslator::scripted("[KEEP:0001]には重大な脆弱性[KEEP:0002]が含まれています。");
    let translator = document_translator(mock, BatchOptions::default());

    let outcome = translator.translate_document(&mut doc).await.unwrap();

    assert_eq!(outcome.statistics.total_blocks, 1);
    assert_eq!(outcome.statistics.translated, 1);
    assert_eq!(outcome.statistics.preserved_terms, 2);
    assert_eq!(outcome.statistics.partial_restorations, 0);

    let Element::Paragraph(paragraph) = &doc.body[2] else {
        panic!("expected paragraph after template insertion");
    };
    assert_eq!(
        paragraph.text(),
        "VMware ESXi 7.0.3には重大な脆弱性CVE-2025-41225が含まれています。"
    );
}

#[tokio::test]
async fn test_translateDocument_withOneFailingBlock_shouldIsolateTheFailure() {
    let mut doc = Document::new();
    doc.push_paragraph(Paragraph::from_text(
        "VMware ESXi updates remediate the vulnerability described in CVE-2025-41225.",
    ));
    doc.push_paragraph(Paragraph::from_text(
        "The response matrix lists the patched build for each release line.",
    ));
    doc.push_paragraph(Paragraph::from_text(
        "The acknowledgements section credits the original reporter.",
    ));
    doc.push_paragraph(Paragraph::from_text(
        "Workarounds are not available for this vulnerability class.",
    ));
    doc.push_paragraph(Paragraph::from_text(
        "Customers with extended support contracts receive the same remediation.",
    ));

    let mock = MockTranslator::failing_when("acknowledgements");
    let translator = document_translator(mock, BatchOptions::default());

    let outcome = translator.translate_document(&mut doc).await.unwrap();

    assert_eq!(outcome.statistics.total_blocks, 5);
    assert_eq!(outcome.statistics.translated, 4);
    assert_eq!(outcome.statistics.failed, 1);
    assert_eq!(outcome.results[2].status, TranslationStatus::Failed);

    // failed block keeps its source text, neighbors are translated
    let texts: Vec<String> = doc
        .body
        .iter()
        .filter_map(|e| match e {
            Element::Paragraph(p) => Some(p.text()),
            _ => None,
        })
        .collect();
    assert!(texts
        .iter()
        .any(|t| t == "The acknowledgements section credits the original reporter."));
    assert!(texts.iter().any(|t| t.starts_with("翻訳済み: ") && t.contains("response matrix")));
    assert!(texts.iter().any(|t| t.contains("CVE-2025-41225")));
}

#[tokio::test]
async fn test_translateDocument_withFullAdvisory_shouldCoverEveryLocation() {
    let mut doc = common::sample_advisory_document();
    let translator = document_translator(MockTranslator::working(), BatchOptions::default());

    let outcome = translator.translate_document(&mut doc).await.unwrap();

    // 9 blocks: 3 body paragraphs, 4 table cells, header, footer
    assert_eq!(outcome.statistics.total_blocks, 9);
    assert_eq!(outcome.statistics.failed, 0);
    // empty paragraph and the lone "VMware ESXi" cell are skipped
    assert!(outcome.statistics.skipped >= 2);
    assert_eq!(
        outcome.statistics.translated + outcome.statistics.skipped,
        9
    );

    // first page replaced by the template image
    let Element::Image(image) = &doc.body[0] else {
        panic!("expected template image at position 0");
    };
    assert_eq!(image.source, TEMPLATE_IMAGE);

    // table structure intact, technical cell untouched, severity rating
    // mapped through the glossary
    let table = doc
        .body
        .iter()
        .find_map(|e| match e {
            Element::Table(t) => Some(t),
            _ => None,
        })
        .unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1][0].paragraphs[0].text(), "VMware ESXi");
    assert_eq!(table.rows[1][1].paragraphs[0].text(), "緊急");

    // header and footer paragraphs went through translation
    assert!(doc.headers[0].text().starts_with("翻訳済み: "));
    assert!(doc.footers[0].text().starts_with("翻訳済み: "));
}

#[tokio::test]
async fn test_translateDocument_withExpiredDeadline_shouldStillReconstruct() {
    let mut doc = Document::new();
    doc.push_paragraph(Paragraph::from_text(
        "VMware ESXi updates address the vulnerability tracked as CVE-2025-41225.",
    ));
    doc.push_paragraph(Paragraph::from_text(
        "This narrative paragraph will not finish translating before the deadline.",
    ));

    let options = BatchOptions {
        document_timeout: Some(Duration::from_millis(20)),
        ..BatchOptions::default()
    };
    let translator = document_translator(MockTranslator::slow(500), options);

    let outcome = translator.translate_document(&mut doc).await.unwrap();

    assert_eq!(outcome.statistics.total_blocks, 2);
    assert_eq!(outcome.statistics.failed, 2);

    // reconstruction still ran: template inserted, source text preserved
    assert!(matches!(&doc.body[0], Element::Image(_)));
    let texts: Vec<String> = doc
        .body
        .iter()
        .filter_map(|e| match e {
            Element::Paragraph(p) => Some(p.text()),
            _ => None,
        })
        .collect();
    assert!(texts.iter().any(|t| t.contains("CVE-2025-41225")));
}

#[tokio::test]
async fn test_translateDocument_roundTripThroughJson_shouldPreserveResult() {
    use cvetrans::file_utils::FileManager;

    let dir = common::create_temp_dir().unwrap();
    let input = dir.path().join("advisory.json");

    let doc = common::sample_advisory_document();
    FileManager::save_document(&input, &doc).unwrap();

    let mut loaded = FileManager::load_document(&input).unwrap();
    let translator = document_translator(MockTranslator::working(), BatchOptions::default());
    translator.translate_document(&mut loaded).await.unwrap();

    let output = dir.path().join("advisory.ja.json");
    FileManager::save_document(&output, &loaded).unwrap();
    let reloaded = FileManager::load_document(&output).unwrap();
    assert_eq!(reloaded, loaded);
}

#[test]
fn test_config_drivenPipeline_shouldHonorBatchSettings() {
    let mut config = Config::default();
    config.translation.batch_size = 2;
    config.translation.max_concurrency = 1;

    let options = config.translation.batch_options();
    assert_eq!(options.batch_size, 2);
    assert_eq!(options.max_concurrency, 1);

    let mut doc = Document::new();
    for i in 0..4 {
        doc.push_paragraph(Paragraph::from_text(format!(
            "VMware ESXi advisory narrative paragraph number {i} describing remediation steps."
        )));
    }

    let translator = document_translator(MockTranslator::working(), options);
    let outcome = tokio_test::block_on(translator.translate_document(&mut doc)).unwrap();
    assert_eq!(outcome.statistics.translated, 4);
}

#[tokio::test]
async fn test_extractBlocks_thenTranslate_shouldKeepOneResultPerBlock() {
    let doc = common::sample_advisory_document();
    let extracted = extract_blocks(&doc).unwrap();

    let translator = document_translator(MockTranslator::working(), BatchOptions::default());
    let mut doc2 = common::sample_advisory_document();
    let outcome = translator.translate_document(&mut doc2).await.unwrap();

    assert_eq!(outcome.results.len(), extracted.blocks.len());
    let mut ids: Vec<&str> = outcome.results.iter().map(|r| r.block_id.as_str()).collect();
    ids.dedup();
    assert_eq!(ids.len(), extracted.blocks.len());
}
