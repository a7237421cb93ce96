use crate::error::ScanError;
use crate::tree::RawRecognitionResult;
use image::DynamicImage;

/// Text recognition capability injected into the scan pipeline
///
/// Implementations report geometry in the pixel space of the image they are
/// given, which for scanning is the full capture frame.
pub trait TextRecognizer: Send + Sync {
    /// Returns the recognizer identifier (e.g., "ocrs")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the recognizer
    fn description(&self) -> &'static str;

    /// Recognize text in an upright image
    fn recognize(&self, image: &DynamicImage) -> Result<RawRecognitionResult, ScanError>;

    /// Language codes the recognizer can report
    fn supported_languages(&self) -> Vec<String>;
}
