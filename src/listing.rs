/*!
 * App Store listing fields and their character limits.
 *
 * Store listing metadata (name, subtitle, keywords, promotional text,
 * description, what's new) is limited per field by App Store Connect.
 * Model output is not trusted to respect those limits, so translated
 * values are clamped with a trailing ellipsis marker before they reach
 * the listing document.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::translation::batch::TranslatableItem;
use crate::translation::merge::TranslationTarget;

/// A translatable App Store listing field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListingField {
    Name,
    Subtitle,
    Keywords,
    PromotionalText,
    Description,
    WhatsNew,
}

impl ListingField {
    /// All fields in the order they appear in a listing
    pub fn all() -> [ListingField; 6] {
        [
            Self::Name,
            Self::Subtitle,
            Self::Keywords,
            Self::PromotionalText,
            Self::Description,
            Self::WhatsNew,
        ]
    }

    /// The JSON field key used by the store API
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Subtitle => "subtitle",
            Self::Keywords => "keywords",
            Self::PromotionalText => "promotionalText",
            Self::Description => "description",
            Self::WhatsNew => "whatsNew",
        }
    }

    /// Maximum length in characters accepted by the store
    pub fn char_limit(&self) -> usize {
        match self {
            Self::Name => 30,
            Self::Subtitle => 30,
            Self::Keywords => 100,
            Self::PromotionalText => 170,
            Self::Description => 4000,
            Self::WhatsNew => 4000,
        }
    }

    /// Look up a field by its JSON key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|field| field.key() == key)
    }
}

/// Clamp text to a character limit, marking the cut with an ellipsis
pub fn enforce_char_limit(text: &str, limit: usize) -> String {
    let count = text.chars().count();
    if count <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(3);
    let truncated: String = text.chars().take(keep).collect();
    format!("{}...", truncated)
}

/// Store listing document: source-locale fields plus localized variants
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingDocument {
    /// Source-locale field values by field key
    #[serde(default)]
    pub source: BTreeMap<String, String>,

    /// Localized field values, locale -> field key -> text
    #[serde(default)]
    pub localizations: BTreeMap<String, BTreeMap<String, String>>,
}

impl ListingDocument {
    /// Work items for every non-empty source field
    pub fn translatable_items(&self) -> Vec<TranslatableItem> {
        ListingField::all()
            .into_iter()
            .filter_map(|field| {
                let text = self.source.get(field.key())?;
                if text.trim().is_empty() {
                    return None;
                }
                Some(TranslatableItem::new(field.key(), text))
            })
            .collect()
    }

    /// The localized value for a field and locale, if present
    pub fn localized(&self, field_key: &str, locale: &str) -> Option<&str> {
        self.localizations
            .get(locale)?
            .get(field_key)
            .map(|s| s.as_str())
    }
}

impl TranslationTarget for ListingDocument {
    fn apply(&mut self, key: &str, language: &str, value: &str) {
        let clamped = match ListingField::from_key(key) {
            Some(field) => enforce_char_limit(value, field.char_limit()),
            None => value.to_string(),
        };
        self.localizations
            .entry(language.to_string())
            .or_default()
            .insert(key.to_string(), clamped);
    }
}
