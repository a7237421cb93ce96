//! Text recognizer implementations
//!
//! This module contains implementations of the TextRecognizer trait for
//! different OCR backends. Engines are conditionally compiled based on
//! feature flags.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

use crate::error::ScanError;
use crate::recognizer::TextRecognizer;
use std::path::PathBuf;
use std::sync::Arc;

/// Settings shared by recognizer backends
#[derive(Debug, Clone, Default)]
pub struct RecognizerOptions {
    /// Where downloaded models are cached (platform cache dir if unset)
    pub model_cache_dir: Option<PathBuf>,
}

/// Information about an available recognizer
#[derive(Debug, Clone)]
pub struct RecognizerInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub supported_languages: Vec<String>,
}

/// Registry of available text recognizers
#[derive(Default)]
pub struct RecognizerRegistry {
    recognizers: Vec<Arc<dyn TextRecognizer>>,
    default_recognizer: String,
}

impl RecognizerRegistry {
    /// Create a registry with every compiled-in recognizer initialized
    pub fn new(options: &RecognizerOptions) -> Result<Self, ScanError> {
        #[allow(unused_mut)]
        let mut registry = Self::empty();

        #[cfg(feature = "engine-ocrs")]
        {
            tracing::info!("Initializing ocrs recognizer...");
            registry = registry.with(Arc::new(ocrs::OcrsRecognizer::new(options)?));
        }
        #[cfg(not(feature = "engine-ocrs"))]
        let _ = options;

        if registry.recognizers.is_empty() {
            return Err(ScanError::InitializationError(
                "No text recognizers available. Build with --features engine-ocrs".to_string(),
            ));
        }

        Ok(registry)
    }

    /// Registry with no recognizers; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a recognizer; the first one added becomes the default
    pub fn with(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        if self.default_recognizer.is_empty() {
            self.default_recognizer = recognizer.name().to_string();
        }
        self.recognizers.push(recognizer);
        self
    }

    /// Get a recognizer by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn TextRecognizer>> {
        self.recognizers.iter().find(|r| r.name() == name).cloned()
    }

    /// Get the default recognizer
    pub fn default_recognizer(&self) -> Option<Arc<dyn TextRecognizer>> {
        self.get(&self.default_recognizer)
    }

    /// Get the default recognizer name, empty when nothing is registered
    pub fn default_name(&self) -> &str {
        &self.default_recognizer
    }

    /// List all available recognizer names
    pub fn list(&self) -> Vec<&str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    /// Get info about all available recognizers
    pub fn info(&self) -> Vec<RecognizerInfo> {
        self.recognizers
            .iter()
            .map(|r| RecognizerInfo {
                name: r.name(),
                description: r.description(),
                supported_languages: r.supported_languages(),
            })
            .collect()
    }
}
