use crate::Args;
use frame_ocr::engines::RecognizerOptions;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_file_size: usize,
    pub model_cache_dir: Option<PathBuf>,
    pub disable_recognizer: bool,
}

impl Config {
    pub fn recognizer_options(&self) -> RecognizerOptions {
        RecognizerOptions {
            model_cache_dir: self.model_cache_dir.clone(),
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_file_size: args.max_file_size,
            model_cache_dir: args.model_cache_dir,
            disable_recognizer: args.disable_recognizer,
        }
    }
}
