use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The config accepts ISO 639-1 (2-letter) and ISO 639-3 (3-letter) codes;
/// the pipeline itself only cares that both ends of the translation are
/// real languages.
/// Check whether a code is a valid ISO 639-1 or ISO 639-3 language code
pub fn validate_language_code(code: &str) -> bool {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized).is_some(),
        3 => Language::from_639_3(&normalized).is_some(),
        _ => false,
    }
}

/// Normalize a language code to ISO 639-3 (3-letter) format
pub fn normalize_to_639_3(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    if normalized.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized.len() == 3 && Language::from_639_3(&normalized).is_some() {
        return Ok(normalized);
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_639_3(code1), normalize_to_639_3(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_639_3(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;
    Ok(lang.to_name().to_string())
}
