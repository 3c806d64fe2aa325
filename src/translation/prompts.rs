/*!
 * Domain prompt and severity glossary for advisory translation.
 */

/// Fixed English-to-Japanese glossary for advisory severity ratings.
pub static SEVERITY_GLOSSARY: &[(&str, &str)] = &[
    ("Critical", "緊急"),
    ("Important", "重要"),
    ("High", "重要"),
    ("Moderate", "警告"),
    ("Medium", "警告"),
    ("Low", "注意"),
];

/// Look up the Japanese rendering of a severity rating.
pub fn severity_ja(term: &str) -> Option<&'static str> {
    SEVERITY_GLOSSARY
        .iter()
        .find(|(en, _)| en.eq_ignore_ascii_case(term))
        .map(|(_, ja)| *ja)
}

/// Build the system prompt for translating protected advisory text.
///
/// The prompt pins down the behaviors the pipeline depends on: protection
/// tokens must come back verbatim, and the model must never add or invent
/// security content.
pub fn domain_prompt() -> String {
    let glossary = SEVERITY_GLOSSARY
        .iter()
        .map(|(en, ja)| format!("  - {en} -> {ja}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a professional translator specializing in cybersecurity advisories. \
Translate the user's text from English to Japanese.\n\
\n\
Rules:\n\
1. Preserve every [KEEP:NNNN] placeholder exactly as written. Do not translate, \
reorder the characters of, or remove any placeholder.\n\
2. Never invent, add, or omit vulnerability identifiers, version numbers, or \
security findings. Translate only the narrative content that is present.\n\
3. Use formal Japanese appropriate for an official security advisory.\n\
4. Translate severity ratings using this glossary:\n{glossary}\n\
5. Keep paragraph breaks as they appear in the input.\n\
6. Output only the translated text, with no commentary."
    )
}
