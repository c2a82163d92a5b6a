/*!
 * Xcode String Catalog (`.xcstrings`) document model.
 *
 * This module parses, inspects and regenerates `.xcstrings` files. Parsing
 * tolerates missing top-level fields the way Xcode exports sometimes omit
 * them; serialization is deterministic (keys and locales sorted) so saved
 * files diff cleanly between runs.
 */

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::translation::merge::TranslationTarget;

/// A single localized value inside a string entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StringUnit {
    /// Translation state ("translated", "needs_review", ...)
    pub state: String,
    /// The localized text
    pub value: String,
}

/// Per-language localization record
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_unit: Option<StringUnit>,
}

/// One translatable string entry keyed by its catalog key
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StringEntry {
    /// Developer comment carried through from the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Extraction state reported by Xcode ("manual", "stale", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_state: Option<String>,

    /// Localized values by locale code
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub localizations: BTreeMap<String, Localization>,
}

/// Parsed `.xcstrings` document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct XCStringsDocument {
    /// Language the catalog keys are written in
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Catalog format version
    #[serde(default = "default_version")]
    pub version: String,

    /// All string entries, sorted by key
    #[serde(default)]
    pub strings: BTreeMap<String, StringEntry>,
}

/// A catalog key that still lacks one or more requested translations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslation {
    /// The catalog key
    pub key: String,
    /// Source text to translate (source-language value, or the key itself)
    pub source_text: String,
    /// Languages with no localization for this key
    pub missing_languages: Vec<String>,
}

/// Per-language translation counts for a document
#[derive(Debug, Clone, Default)]
pub struct TranslationStats {
    /// Total number of catalog keys
    pub total_strings: usize,
    /// All languages present in the document, sorted
    pub languages: Vec<String>,
    /// Translated entry count per language
    pub translated_counts: BTreeMap<String, usize>,
    /// Missing entry count per language
    pub missing_counts: BTreeMap<String, usize>,
}

impl Default for XCStringsDocument {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            version: default_version(),
            strings: BTreeMap::new(),
        }
    }
}

impl XCStringsDocument {
    /// Parse an `.xcstrings` file content
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| anyhow!("Failed to parse .xcstrings file: {}", e))
    }

    /// Generate `.xcstrings` file content with sorted keys and locales
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize .xcstrings document: {}", e))
    }

    /// The localized value for a key and language, if present
    pub fn translation(&self, key: &str, language: &str) -> Option<&str> {
        self.strings
            .get(key)?
            .localizations
            .get(language)?
            .string_unit
            .as_ref()
            .map(|unit| unit.value.as_str())
    }

    /// Whether a key has any localization record for a language
    pub fn has_localization(&self, key: &str, language: &str) -> bool {
        self.strings
            .get(key)
            .map(|entry| entry.localizations.contains_key(language))
            .unwrap_or(false)
    }

    /// Source text for a key: the source-language value, or the key itself
    pub fn source_text(&self, key: &str) -> String {
        self.translation(key, &self.source_language)
            .map(|value| value.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Write a translated value for a key and language
    ///
    /// Creates the entry and localization records as needed; the stored
    /// unit is marked "translated".
    pub fn add_translation(&mut self, key: &str, language: &str, value: &str) {
        let entry = self.strings.entry(key.to_string()).or_default();
        entry.localizations.insert(
            language.to_string(),
            Localization {
                string_unit: Some(StringUnit {
                    state: "translated".to_string(),
                    value: value.to_string(),
                }),
            },
        );
    }

    /// Keys that lack a localization for at least one of the given languages
    pub fn missing_translations(&self, target_languages: &[String]) -> Vec<MissingTranslation> {
        let mut missing = Vec::new();
        for (key, entry) in &self.strings {
            let missing_languages: Vec<String> = target_languages
                .iter()
                .filter(|lang| !entry.localizations.contains_key(lang.as_str()))
                .cloned()
                .collect();
            if !missing_languages.is_empty() {
                missing.push(MissingTranslation {
                    key: key.clone(),
                    source_text: self.source_text(key),
                    missing_languages,
                });
            }
        }
        missing
    }

    /// Translation statistics across the document and any extra languages
    pub fn stats(&self, target_languages: &[String]) -> TranslationStats {
        let mut languages: BTreeSet<String> = BTreeSet::new();
        for entry in self.strings.values() {
            for lang in entry.localizations.keys() {
                languages.insert(lang.clone());
            }
        }

        let total = self.strings.len();
        let mut translated_counts = BTreeMap::new();
        let mut missing_counts = BTreeMap::new();

        for lang in &languages {
            let translated = self
                .strings
                .keys()
                .filter(|key| self.translation(key, lang).is_some())
                .count();
            translated_counts.insert(lang.clone(), translated);
            missing_counts.insert(lang.clone(), total - translated);
        }

        // Requested languages absent from the file count as fully missing
        for lang in target_languages {
            if !languages.contains(lang) {
                translated_counts.insert(lang.clone(), 0);
                missing_counts.insert(lang.clone(), total);
            }
        }

        TranslationStats {
            total_strings: total,
            languages: languages.into_iter().collect(),
            translated_counts,
            missing_counts,
        }
    }
}

impl TranslationTarget for XCStringsDocument {
    fn apply(&mut self, key: &str, language: &str, value: &str) {
        self.add_translation(key, language, value);
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}
