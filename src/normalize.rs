//! Rewrites a raw recognition tree into crop-relative coordinates
//!
//! Every rect and corner point is translated by the crop window origin.
//! Widths and heights are untouched; there is no scaling step because the
//! crop window is expressed in capture pixels.

use crate::geometry::{CropWindow, Point, Rect, Size};
use crate::tree::{
    BoundingFrame, RawRecognitionResult, RawTextBlock, RawTextElement, RawTextLine, Text,
    TextBlock, TextElement, TextLine,
};

/// Normalize a raw tree against `crop`, echoing the capture frame size.
///
/// Never fails. A node without a frame gets an all-zero `BoundingFrame`, and
/// language entries without a code are dropped.
pub fn normalize(raw: &RawRecognitionResult, crop: &CropWindow, capture: Size) -> Text {
    let offset = Offset::from(crop);

    Text {
        text: raw.text.clone(),
        blocks: raw.blocks.iter().map(|b| offset.block(b)).collect(),
        x_axis: crop.x,
        y_axis: crop.y,
        frame_width: capture.width,
        frame_height: capture.height,
    }
}

/// Map a normalized tree back into capture-frame coordinates.
///
/// Uses the result's own `x_axis`/`y_axis`. Every node comes back with a
/// frame, so a zero box from a missing detection returns as a zero-size box
/// at the crop origin.
pub fn restore(text: &Text) -> RawRecognitionResult {
    let (dx, dy) = (text.x_axis, text.y_axis);

    let points = |points: &[Point]| -> Vec<Point> {
        points.iter().map(|p| p.translate(dx, dy)).collect()
    };
    let frame = |f: &BoundingFrame| Some(f.rect().translate(dx, dy));
    let languages =
        |langs: &[String]| -> Vec<Option<String>> { langs.iter().cloned().map(Some).collect() };

    RawRecognitionResult {
        text: text.text.clone(),
        blocks: text
            .blocks
            .iter()
            .map(|block| RawTextBlock {
                text: block.text.clone(),
                frame: frame(&block.frame),
                corner_points: points(&block.corner_points),
                recognized_languages: languages(&block.recognized_languages),
                lines: block
                    .lines
                    .iter()
                    .map(|line| RawTextLine {
                        text: line.text.clone(),
                        frame: frame(&line.frame),
                        corner_points: points(&line.corner_points),
                        recognized_languages: languages(&line.recognized_languages),
                        elements: line
                            .elements
                            .iter()
                            .map(|element| RawTextElement {
                                text: element.text.clone(),
                                frame: frame(&element.frame),
                                corner_points: points(&element.corner_points),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Translation applied to every node of one tree
#[derive(Debug, Clone, Copy)]
struct Offset {
    dx: f64,
    dy: f64,
}

impl From<&CropWindow> for Offset {
    fn from(crop: &CropWindow) -> Self {
        Self {
            dx: -crop.x,
            dy: -crop.y,
        }
    }
}

impl Offset {
    fn block(&self, block: &RawTextBlock) -> TextBlock {
        TextBlock {
            text: block.text.clone(),
            recognized_languages: languages(&block.recognized_languages),
            corner_points: self.points(&block.corner_points),
            frame: self.frame(block.frame.as_ref()),
            lines: block.lines.iter().map(|l| self.line(l)).collect(),
        }
    }

    fn line(&self, line: &RawTextLine) -> TextLine {
        TextLine {
            text: line.text.clone(),
            recognized_languages: languages(&line.recognized_languages),
            corner_points: self.points(&line.corner_points),
            frame: self.frame(line.frame.as_ref()),
            elements: line.elements.iter().map(|e| self.element(e)).collect(),
        }
    }

    fn element(&self, element: &RawTextElement) -> TextElement {
        TextElement {
            text: element.text.clone(),
            corner_points: self.points(&element.corner_points),
            frame: self.frame(element.frame.as_ref()),
        }
    }

    fn points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| p.translate(self.dx, self.dy)).collect()
    }

    // Centers are taken from the capture-space rect before translation.
    fn frame(&self, rect: Option<&Rect>) -> BoundingFrame {
        match rect {
            Some(rect) => {
                let moved = rect.translate(self.dx, self.dy);
                BoundingFrame {
                    x: moved.x,
                    y: moved.y,
                    width: moved.width,
                    height: moved.height,
                    bounding_center_x: rect.center_x(),
                    bounding_center_y: rect.center_y(),
                }
            }
            None => BoundingFrame::default(),
        }
    }
}

fn languages(codes: &[Option<String>]) -> Vec<String> {
    codes
        .iter()
        .flatten()
        .filter(|code| !code.is_empty())
        .cloned()
        .collect()
}
