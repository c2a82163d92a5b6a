use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;

/// Language utilities for locale identifier handling
///
/// This module maps store locale identifiers (ISO 639-1 codes, optionally
/// qualified with a region or script subtag such as "fr-FR", "zh-Hans" or
/// "pt-BR") to human-readable names used in translation prompts.

/// Store locales whose display names do not follow from the base code alone
static STORE_LOCALE_NAMES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("zh-Hans", "Simplified Chinese"),
        ("zh-Hant", "Traditional Chinese"),
        ("pt-BR", "Brazilian Portuguese"),
        ("pt-PT", "European Portuguese"),
        ("es-MX", "Mexican Spanish"),
        ("es-ES", "Spanish (Spain)"),
        ("fr-CA", "Canadian French"),
        ("en-GB", "British English"),
        ("en-AU", "Australian English"),
        ("en-CA", "Canadian English"),
        ("en-US", "English (U.S.)"),
        ("nl-NL", "Dutch"),
        ("de-DE", "German"),
        ("fr-FR", "French"),
        ("it-IT", "Italian"),
        ("ja-JP", "Japanese"),
        ("ko-KR", "Korean"),
    ]
});

/// Validate that a locale identifier has a recognizable base language code
pub fn validate_locale_code(code: &str) -> Result<()> {
    let base = base_code(code);
    if base.len() == 2 && Language::from_639_1(&base.to_lowercase()).is_some() {
        return Ok(());
    }
    if base.len() == 3 && Language::from_639_3(&base.to_lowercase()).is_some() {
        return Ok(());
    }
    Err(anyhow!("Invalid locale code: {}", code))
}

/// Extract the base language code from a locale identifier ("fr-FR" -> "fr")
pub fn base_code(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_string()
}

/// Check if two locale codes refer to the same base language
pub fn locale_codes_match(code1: &str, code2: &str) -> bool {
    let base1 = base_code(code1).to_lowercase();
    let base2 = base_code(code2).to_lowercase();
    !base1.is_empty() && base1 == base2
}

/// Get a human-readable display name for a locale identifier
///
/// Qualified store locales resolve through the store table first; anything
/// else falls back to the English name of the base language. Unknown codes
/// come back unchanged so prompts still carry something meaningful.
pub fn display_name(code: &str) -> String {
    let trimmed = code.trim();
    if let Some((_, name)) = STORE_LOCALE_NAMES
        .iter()
        .find(|(locale, _)| locale.eq_ignore_ascii_case(trimmed))
    {
        return (*name).to_string();
    }

    let base = base_code(trimmed).to_lowercase();
    let language = if base.len() == 2 {
        Language::from_639_1(&base)
    } else if base.len() == 3 {
        Language::from_639_3(&base)
    } else {
        None
    };

    match language {
        Some(lang) => lang.to_name().to_string(),
        None => trimmed.to_string(),
    }
}
