/*!
 * Tests for ISO language code utilities
 */

use cvetrans::language_utils::{
    get_language_name, language_codes_match, normalize_to_639_3, validate_language_code,
};

#[test]
fn test_validateLanguageCode_withTwoAndThreeLetterCodes_shouldPass() {
    assert!(validate_language_code("en"));
    assert!(validate_language_code("eng"));
    assert!(validate_language_code("ja"));
    assert!(validate_language_code("jpn"));
    assert!(validate_language_code(" EN "));
}

#[test]
fn test_validateLanguageCode_withInvalidInput_shouldFail() {
    assert!(!validate_language_code("xx"));
    assert!(!validate_language_code("japanese"));
    assert!(!validate_language_code(""));
    assert!(!validate_language_code("j"));
}

#[test]
fn test_normalizeTo6393_shouldUpconvertTwoLetterCodes() {
    assert_eq!(normalize_to_639_3("en").unwrap(), "eng");
    assert_eq!(normalize_to_639_3("ja").unwrap(), "jpn");
    assert_eq!(normalize_to_639_3("jpn").unwrap(), "jpn");
    assert!(normalize_to_639_3("xx").is_err());
}

#[test]
fn test_languageCodesMatch_shouldCompareAcrossFormats() {
    assert!(language_codes_match("ja", "jpn"));
    assert!(language_codes_match("JA", "ja"));
    assert!(!language_codes_match("ja", "en"));
    assert!(!language_codes_match("ja", "nonsense"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishNames() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert!(get_language_name("zz").is_err());
}
