//! OCRS recognizer implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Downloads neural network models automatically on first use.
//!
//! ocrs detects words and groups them into lines but has no notion of
//! paragraphs, so blocks are rebuilt from line spacing.

use super::RecognizerOptions;
use crate::error::ScanError;
use crate::geometry::{Point, Rect};
use crate::recognizer::TextRecognizer;
use crate::tree::{RawRecognitionResult, RawTextBlock, RawTextElement, RawTextLine};
use image::DynamicImage;
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams, TextItem};
use rten::Model;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// A vertical gap wider than this many line heights starts a new block
const BLOCK_GAP_FACTOR: f64 = 0.75;

/// Recognizer wrapping the ocrs library
pub struct OcrsRecognizer {
    engine: OcrsOcrEngine,
}

impl OcrsRecognizer {
    /// Create a new recognizer, downloading models if needed
    pub fn new(options: &RecognizerOptions) -> Result<Self, ScanError> {
        let cache_dir = options.model_cache_dir.clone().unwrap_or_else(default_cache_dir);

        // Load models (will download if not cached)
        let detection_model_path =
            ensure_model_downloaded(&cache_dir, DETECTION_MODEL_URL, "text-detection.rten")?;
        let recognition_model_path =
            ensure_model_downloaded(&cache_dir, RECOGNITION_MODEL_URL, "text-recognition.rten")?;

        let detection_model = Model::load_file(&detection_model_path).map_err(|e| {
            ScanError::InitializationError(format!("Failed to load detection model: {}", e))
        })?;
        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            ScanError::InitializationError(format!("Failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| {
            ScanError::InitializationError(format!("Failed to create OCR engine: {}", e))
        })?;

        tracing::info!("ocrs recognizer initialized successfully");

        Ok(Self { engine })
    }
}

impl TextRecognizer for OcrsRecognizer {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies required"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<RawRecognitionResult, ScanError> {
        // Convert to RGB8 (HWC format, which is what ImageSource::from_bytes expects)
        let rgb_img = image.to_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            ScanError::RecognitionError(format!("Failed to create image source: {}", e))
        })?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| ScanError::RecognitionError(format!("Failed to prepare input: {}", e)))?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| ScanError::RecognitionError(format!("Failed to detect words: {}", e)))?;

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| ScanError::RecognitionError(format!("Failed to recognize text: {}", e)))?;

        let lines: Vec<RawTextLine> = line_texts
            .iter()
            .filter_map(|line| line.as_ref())
            .map(convert_line)
            .filter(|line| !line.elements.is_empty())
            .collect();

        tracing::debug!(
            "ocrs found {} words in {} lines",
            word_rects.len(),
            lines.len()
        );

        let blocks = group_lines_into_blocks(lines);
        let text = blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(RawRecognitionResult { text, blocks })
    }

    fn supported_languages(&self) -> Vec<String> {
        // ocrs currently only supports English/Latin alphabet
        vec!["en".to_string()]
    }
}

fn convert_line(line: &ocrs::TextLine) -> RawTextLine {
    let elements: Vec<RawTextElement> = line
        .words()
        .map(|word| {
            let corner_points = corners_of(&word);
            RawTextElement {
                text: word.to_string(),
                frame: Rect::enclosing(&corner_points),
                corner_points,
            }
        })
        .collect();

    let corner_points = corners_of(line);
    RawTextLine {
        text: elements
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        frame: Rect::enclosing(&corner_points),
        corner_points,
        // ocrs does not identify languages
        recognized_languages: Vec::new(),
        elements,
    }
}

fn corners_of<T: TextItem>(item: &T) -> Vec<Point> {
    item.rotated_rect()
        .corners()
        .iter()
        .map(|c| Point::new(f64::from(c.x), f64::from(c.y)))
        .collect()
}

/// Group lines (in reading order) into blocks separated by vertical gaps.
fn group_lines_into_blocks(lines: Vec<RawTextLine>) -> Vec<RawTextBlock> {
    let mut groups: Vec<Vec<RawTextLine>> = Vec::new();
    let mut previous: Option<Rect> = None;

    for line in lines {
        let starts_block = match (previous, line.frame) {
            (Some(prev), Some(cur)) => {
                let gap = cur.y - prev.max_y();
                gap > prev.height * BLOCK_GAP_FACTOR || cur.max_y() < prev.y
            }
            _ => groups.is_empty(),
        };
        if line.frame.is_some() {
            previous = line.frame;
        }

        match groups.last_mut() {
            Some(group) if !starts_block => group.push(line),
            _ => groups.push(vec![line]),
        }
    }

    groups.into_iter().map(block_from_lines).collect()
}

fn block_from_lines(lines: Vec<RawTextLine>) -> RawTextBlock {
    let frame = lines
        .iter()
        .filter_map(|l| l.frame)
        .reduce(|a, b| {
            let x = a.x.min(b.x);
            let y = a.y.min(b.y);
            Rect::new(x, y, a.max_x().max(b.max_x()) - x, a.max_y().max(b.max_y()) - y)
        });
    let corner_points = frame
        .map(|r| {
            vec![
                Point::new(r.x, r.y),
                Point::new(r.max_x(), r.y),
                Point::new(r.max_x(), r.max_y()),
                Point::new(r.x, r.max_y()),
            ]
        })
        .unwrap_or_default();

    RawTextBlock {
        text: lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        frame,
        corner_points,
        recognized_languages: Vec::new(),
        lines,
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("frame-ocr")
}

/// Ensure model is downloaded and return its path
fn ensure_model_downloaded(
    cache_dir: &Path,
    url: &str,
    filename: &str,
) -> Result<PathBuf, ScanError> {
    std::fs::create_dir_all(cache_dir).map_err(|e| {
        ScanError::InitializationError(format!("Failed to create cache directory: {}", e))
    })?;

    let model_path = cache_dir.join(filename);

    // Download if not cached
    if !model_path.exists() {
        tracing::info!("Downloading {} (this may take a moment)...", filename);
        download_file(url, &model_path)?;
        tracing::info!("Downloaded {} to {:?}", filename, model_path);
    } else {
        tracing::info!("Using cached model from {:?}", model_path);
    }

    Ok(model_path)
}

/// Download a file from URL to path using ureq
fn download_file(url: &str, path: &Path) -> Result<(), ScanError> {
    let response = ureq::get(url).call().map_err(|e| {
        ScanError::InitializationError(format!("Failed to download model: {}", e))
    })?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        ScanError::InitializationError(format!("Failed to read response body: {}", e))
    })?;

    let mut file = File::create(path).map_err(|e| {
        ScanError::InitializationError(format!("Failed to create model file: {}", e))
    })?;

    file.write_all(&buffer).map_err(|e| {
        ScanError::InitializationError(format!("Failed to write model file: {}", e))
    })?;

    Ok(())
}
