use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::{Config, TranslationProvider};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::{
    Anthropic, OpenAi, OpenAiEmbeddings, SemanticValidator, TranslationClient,
};
use crate::translation::{BatchTranslator, DocumentTranslator, TranslationService};

// @module: Application controller for document translation

/// Main application controller for advisory translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Build the backend client named by the configuration
    fn build_client(&self) -> Arc<dyn TranslationClient> {
        let provider = &self.config.provider;
        match provider.provider_type {
            TranslationProvider::OpenAI => {
                Arc::new(OpenAi::new(&provider.api_key, &provider.endpoint))
            }
            TranslationProvider::Anthropic => {
                Arc::new(Anthropic::new(&provider.api_key, &provider.endpoint))
            }
        }
    }

    /// Build the translation service, attaching the embeddings validator
    /// when validation is enabled
    fn build_service(&self) -> TranslationService {
        let mut service =
            TranslationService::new(self.build_client(), self.config.provider.request_params());
        if self.config.validation.enabled {
            let validator: Arc<dyn SemanticValidator> = Arc::new(OpenAiEmbeddings::with_model(
                &self.config.provider.api_key,
                "",
                &self.config.validation.embedding_model,
            ));
            service = service.with_validator(validator);
        }
        service
    }

    /// Verify the configured provider is reachable
    pub async fn test_connection(&self) -> Result<()> {
        info!(
            "Testing connection to {}",
            self.config.provider.provider_type.display_name()
        );
        self.build_service()
            .test_connection()
            .await
            .context("Provider connection test failed")?;
        info!("Connection OK");
        Ok(())
    }

    /// Translate a single document file and write the result next to it
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow::anyhow!(
                "Input file does not exist: {:?}",
                input_file
            ));
        }
        FileManager::ensure_dir(&output_dir)?;

        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.config.target_language,
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, translation already exists (use -f to force overwrite)");
            return Ok(());
        }

        info!(
            "Translating {:?} from {} to {}",
            input_file,
            language_utils::get_language_name(&self.config.source_language)
                .unwrap_or_else(|_| self.config.source_language.clone()),
            language_utils::get_language_name(&self.config.target_language)
                .unwrap_or_else(|_| self.config.target_language.clone())
        );

        let mut document = FileManager::load_document(&input_file)?;

        let progress_bar = ProgressBar::new(0);
        progress_bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} blocks",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let pb = progress_bar.clone();
        let batch = BatchTranslator::new(
            Arc::new(self.build_service()),
            self.config.translation.batch_options(),
        )
        .with_progress(Arc::new(move |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        }));

        let translator = DocumentTranslator::with_batch(batch, self.config.classifier.clone());
        let outcome = translator.translate_document(&mut document).await?;
        progress_bar.finish_and_clear();

        FileManager::save_document(&output_path, &document)?;

        info!("Saved translated document to {:?}", output_path);
        info!("{}", outcome.statistics.summary());
        info!(
            "Translation completed in {:.1}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Translate every document file in a folder. Failures are reported per
    /// file and do not stop the rest of the folder.
    pub async fn run_folder(
        &self,
        input_dir: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {:?}",
                input_dir
            ));
        }

        let files = FileManager::find_files(&input_dir, "json")?;
        if files.is_empty() {
            warn!("No document files found in {:?}", input_dir);
            return Ok(());
        }

        info!("Found {} documents in {:?}", files.len(), input_dir);
        let mut failures = 0usize;
        for file in &files {
            if let Err(e) = self
                .run(file.clone(), output_dir.clone(), force_overwrite)
                .await
            {
                warn!("Failed to translate {:?}: {e:#}", file);
                failures += 1;
            }
        }

        if failures > 0 {
            warn!("{failures} of {} documents failed", files.len());
        } else {
            info!("All {} documents translated", files.len());
        }
        Ok(())
    }
}

impl Controller {
    /// Output path the controller would write for an input file
    pub fn output_path_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, output_dir, &self.config.target_language)
    }
}
