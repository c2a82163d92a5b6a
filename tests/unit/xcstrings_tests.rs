/*!
 * Tests for merging pipeline results into string catalogs
 */

use locforge::translation::merge::apply_results;
use locforge::translation::{ItemResult, TranslatableItem};
use locforge::xcstrings::XCStringsDocument;

use crate::common::SAMPLE_CATALOG;

fn item(doc: &XCStringsDocument, key: &str) -> TranslatableItem {
    TranslatableItem::new(key, doc.source_text(key))
}

#[test]
fn test_apply_results_withSuccesses_shouldAddTranslatedUnits() {
    let mut doc = XCStringsDocument::parse(SAMPLE_CATALOG).unwrap();
    let results = vec![
        ItemResult::success(&item(&doc, "farewell"), "fr", "Au revoir".to_string()),
        ItemResult::success(&item(&doc, "welcome_message"), "fr", "Bon retour!".to_string()),
    ];

    apply_results(&mut doc, &results);

    assert_eq!(doc.translation("farewell", "fr"), Some("Au revoir"));
    assert_eq!(doc.translation("welcome_message", "fr"), Some("Bon retour!"));
}

#[test]
fn test_apply_results_shouldLeaveUnrelatedLanguagesByteIdentical() {
    let mut doc = XCStringsDocument::parse(SAMPLE_CATALOG).unwrap();
    let before = doc.clone();

    let results = vec![ItemResult::success(
        &item(&doc, "welcome_message"),
        "fr",
        "Bon retour!".to_string(),
    )];
    apply_results(&mut doc, &results);

    // Every pre-existing entry survives untouched
    for (key, entry) in &before.strings {
        for (lang, localization) in &entry.localizations {
            assert_eq!(
                doc.strings[key].localizations[lang],
                *localization,
                "{}/{} was modified by an unrelated merge",
                key,
                lang
            );
        }
    }
    assert_eq!(doc.source_language, before.source_language);
    assert_eq!(doc.version, before.version);
}

#[test]
fn test_apply_results_withFailure_shouldWriteSourceTextFallback() {
    let mut doc = XCStringsDocument::parse(SAMPLE_CATALOG).unwrap();
    let results = vec![ItemResult::failed(
        &item(&doc, "welcome_message"),
        "ja",
        "rate limited".to_string(),
    )];

    apply_results(&mut doc, &results);

    // The fallback keeps the catalog complete instead of leaving a hole
    assert_eq!(doc.translation("welcome_message", "ja"), Some("Welcome back!"));
}

#[test]
fn test_merged_document_shouldSerializeDeterministically() {
    let mut doc = XCStringsDocument::parse(SAMPLE_CATALOG).unwrap();
    let results = vec![
        ItemResult::success(&item(&doc, "farewell"), "fr", "Au revoir".to_string()),
        ItemResult::success(&item(&doc, "farewell"), "ja", "さようなら".to_string()),
    ];
    apply_results(&mut doc, &results);

    let first = doc.to_json_string().unwrap();
    let second = XCStringsDocument::parse(&first).unwrap().to_json_string().unwrap();
    assert_eq!(first, second);
}
