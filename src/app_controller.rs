/*!
 * Application controller.
 *
 * Drives a whole catalog translation from the CLI: load the `.xcstrings`
 * document, work out which keys still miss translations per target
 * language, run the pipeline language by language with a progress bar,
 * merge the results and write the output file.
 */

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers;
use crate::translation::progress::{ProgressCallback, RunSummary};
use crate::translation::{TranslatableItem, TranslationPipeline, merge};
use crate::xcstrings::XCStringsDocument;

/// Main application controller
pub struct Controller {
    /// Application configuration
    config: Config,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        if config.target_languages.is_empty() {
            return Err(anyhow!("No target languages configured"));
        }
        for language in &config.target_languages {
            language_utils::validate_locale_code(language)
                .with_context(|| format!("Invalid target language '{}'", language))?;
        }
        config.run.validate()?;
        Ok(Self { config })
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<()> {
        let provider_config = self.config.active_provider_config()?;
        let backend = providers::backend_from_config(self.config.provider, provider_config)?;
        info!(
            "Testing connection to {} with model {}",
            self.config.provider.display_name(),
            self.config.get_model()
        );
        backend.test_connection().await?;
        info!("Successfully connected to {}", self.config.provider.display_name());
        Ok(())
    }

    /// Translate missing entries of an `.xcstrings` catalog file
    ///
    /// Returns the combined summary across all target languages. The output
    /// lands next to the input unless `in_place` is set.
    pub async fn run_catalog_translation(
        &self,
        input_path: &Path,
        in_place: bool,
    ) -> Result<RunSummary> {
        let content = FileManager::read_to_string(input_path)?;
        let mut document = XCStringsDocument::parse(&content)?;

        let stats = document.stats(&self.config.target_languages);
        info!(
            "Loaded {} with {} keys, {} languages present",
            input_path.display(),
            stats.total_strings,
            stats.languages.len()
        );

        let missing = document.missing_translations(&self.config.target_languages);
        if missing.is_empty() {
            info!("Nothing to translate; all requested languages are complete");
            return Ok(RunSummary::default());
        }

        let provider_config = self.config.active_provider_config()?;
        let backend = providers::backend_from_config(self.config.provider, provider_config)?;
        let pipeline = TranslationPipeline::new(backend, self.config.run.clone());

        // One pipeline run per language: each language has its own set of
        // missing keys, and already-translated entries must not be rewritten.
        let mut work: Vec<(String, Vec<TranslatableItem>)> = Vec::new();
        for language in &self.config.target_languages {
            let items: Vec<TranslatableItem> = missing
                .iter()
                .filter(|m| m.missing_languages.contains(language))
                .map(|m| TranslatableItem::new(m.key.clone(), m.source_text.clone()))
                .collect();
            if !items.is_empty() {
                work.push((language.clone(), items));
            }
        }

        let overall_total: usize = work.iter().map(|(_, items)| items.len()).sum();
        info!(
            "Translating {} missing entries across {} languages using {} - {}",
            overall_total,
            work.len(),
            self.config.provider.display_name(),
            self.config.get_model()
        );

        let progress_bar = ProgressBar::new(overall_total as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let mut combined = RunSummary::default();
        let mut offset: usize = 0;

        for (language, items) in work {
            let pb = progress_bar.clone();
            let base = offset;
            let callback: ProgressCallback = Arc::new(move |progress| {
                pb.set_position((base + progress.current) as u64);
                pb.set_message(progress.current_label.clone());
            });

            let outcome = pipeline
                .run(&items, &[language.clone()], Some(callback))
                .await?;
            merge::apply_results(&mut document, &outcome.results);

            offset += items.len();
            combined.total += outcome.summary.total;
            combined.succeeded += outcome.summary.succeeded;
            combined.failed += outcome.summary.failed;
            combined.errors.extend(outcome.summary.errors);
            for (lang, tally) in outcome.summary.per_language {
                let entry = combined.per_language.entry(lang).or_default();
                entry.succeeded += tally.succeeded;
                entry.failed += tally.failed;
            }
        }

        progress_bar.finish_and_clear();

        let output_path = self.output_path(input_path, in_place);
        FileManager::write_string(&output_path, &document.to_json_string()?)?;
        info!("Saved {}", output_path.display());

        if combined.failed > 0 {
            warn!(
                "Translation completed with {} errors; affected entries kept original text",
                combined.failed
            );
            for run_error in &combined.errors {
                error!(
                    "  {} [{}]: {}",
                    run_error.key, run_error.target_language, run_error.message
                );
            }
        } else {
            info!("Translation completed: {} entries", combined.succeeded);
        }

        Ok(combined)
    }

    fn output_path(&self, input_path: &Path, in_place: bool) -> PathBuf {
        if in_place {
            input_path.to_path_buf()
        } else {
            FileManager::generate_output_path(input_path, "translated")
        }
    }
}
