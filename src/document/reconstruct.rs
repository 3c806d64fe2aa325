/*!
 * Document reconstruction.
 *
 * Applies translation results back onto the document tree, then performs
 * first-page removal and template insertion. Ordering matters: block
 * replacement goes first through stable handles, structural removal shifts
 * body indices afterwards, and the template lands at position 0 last.
 */

use std::collections::HashMap;

use log::{debug, warn};

use crate::errors::DocumentError;
use crate::translation::{TranslationResult, TranslationStatus};

use super::extract::ExtractedDocument;
use super::first_page;
use super::model::Document;

/// Apply translation results and finish the document.
///
/// Every extracted block must have exactly one result and every result must
/// reference an extracted block; a mismatch is a structural integrity
/// violation and aborts the whole operation, leaving no partial artifact for
/// the caller to save.
pub fn reconstruct(
    document: &mut Document,
    extracted: &ExtractedDocument,
    results: &[TranslationResult],
) -> Result<(), DocumentError> {
    let by_id: HashMap<&str, &TranslationResult> = results
        .iter()
        .map(|r| (r.block_id.as_str(), r))
        .collect();

    if by_id.len() != results.len() {
        return Err(DocumentError::StructuralIntegrity(
            "duplicate block ids in translation results".to_string(),
        ));
    }

    let known: HashMap<&str, ()> = extracted
        .blocks
        .iter()
        .map(|b| (b.id.as_str(), ()))
        .collect();
    for result in results {
        if !known.contains_key(result.block_id.as_str()) {
            return Err(DocumentError::UnknownBlock(result.block_id.clone()));
        }
    }

    let mut applied = 0usize;
    for block in &extracted.blocks {
        let result = by_id.get(block.id.as_str()).ok_or_else(|| {
            DocumentError::StructuralIntegrity(format!(
                "block {} has no translation result",
                block.id
            ))
        })?;

        match result.status {
            TranslationStatus::Success => {
                let Some(translated) = result.translated_text.as_deref() else {
                    warn!("Block {} marked success without text, keeping original", block.id);
                    continue;
                };
                let paragraph = document.paragraph_mut(block.block_ref).ok_or_else(|| {
                    DocumentError::StructuralIntegrity(format!(
                        "block {} no longer resolves to a paragraph",
                        block.id
                    ))
                })?;
                paragraph.set_single_run(translated, block.style_donor.clone());
                applied += 1;
            }
            // Failed blocks keep their source text; skipped and empty blocks
            // are left exactly as extracted.
            TranslationStatus::Failed | TranslationStatus::Skipped => {}
        }
    }

    extracted.first_page.apply(document);
    first_page::insert_template(document);

    debug!(
        "Reconstructed document: {applied} blocks replaced, {} first-page elements removed",
        extracted.first_page.len()
    );
    Ok(())
}
