use frame_ocr::tree::{RawTextBlock, RawTextElement, RawTextLine};
use frame_ocr::{
    map_result, normalize, restore, CropWindow, Point, RawRecognitionResult, Rect, ScanError,
    Size, Viewport,
};

fn boxed(rect: Rect) -> (Option<Rect>, Vec<Point>) {
    (
        Some(rect),
        vec![
            Point::new(rect.x, rect.y),
            Point::new(rect.max_x(), rect.y),
            Point::new(rect.max_x(), rect.max_y()),
            Point::new(rect.x, rect.max_y()),
        ],
    )
}

fn receipt() -> RawRecognitionResult {
    let mut blocks = Vec::new();
    for (b, top) in [(0, 120.0), (1, 480.0)] {
        let mut lines = Vec::new();
        for l in 0..3 {
            let y = top + f64::from(l) * 24.0;
            let elements = (0..2)
                .map(|e| {
                    let (frame, corner_points) =
                        boxed(Rect::new(40.0 + f64::from(e) * 90.0, y, 80.0, 18.0));
                    RawTextElement {
                        text: format!("w{}{}{}", b, l, e),
                        frame,
                        corner_points,
                    }
                })
                .collect();
            let (frame, corner_points) = boxed(Rect::new(40.0, y, 170.0, 18.0));
            lines.push(RawTextLine {
                text: format!("line {}{}", b, l),
                frame,
                corner_points,
                recognized_languages: vec![Some("en".to_string())],
                elements,
            });
        }
        let (frame, corner_points) = boxed(Rect::new(40.0, top, 170.0, 66.0));
        blocks.push(RawTextBlock {
            text: format!("block {}", b),
            frame,
            corner_points,
            recognized_languages: vec![Some("en".to_string()), Some("de".to_string())],
            lines,
        });
    }
    RawRecognitionResult {
        text: "receipt".to_string(),
        blocks,
    }
}

#[test]
fn crop_ratio_matches_target_ratio() {
    let sizes = [
        (1920.0, 1080.0),
        (1080.0, 1920.0),
        (640.0, 480.0),
        (333.0, 777.0),
        (1.0, 1.0),
    ];
    for &(cw, ch) in &sizes {
        for &(pw, ph) in &sizes {
            for &(tw, th) in &sizes {
                let crop = CropWindow::compute_for_target(
                    Size::new(cw, ch),
                    Size::new(pw, ph),
                    Size::new(tw, th),
                )
                .unwrap();
                let expected = th / tw;
                let actual = crop.height / crop.width;
                assert!(
                    ((actual - expected) / expected).abs() < 1e-6,
                    "ratio {} != {} for capture {}x{}",
                    actual,
                    expected,
                    cw,
                    ch
                );
                assert!(crop.x.is_finite() && crop.y.is_finite());
            }
        }
    }
}

#[test]
fn concrete_square_frame_tall_preview() {
    let capture = Size::new(1000.0, 1000.0);
    let crop = CropWindow::compute(capture, Size::new(400.0, 800.0)).unwrap();
    assert_eq!(crop.as_rect(), Rect::new(0.0, -500.0, 1000.0, 2000.0));

    let raw = RawRecognitionResult {
        text: "A".to_string(),
        blocks: vec![RawTextBlock {
            text: "A".to_string(),
            frame: Some(Rect::new(100.0, 600.0, 50.0, 20.0)),
            ..Default::default()
        }],
    };
    let text = normalize(&raw, &crop, capture);
    assert_eq!(
        text.blocks[0].frame.rect(),
        Rect::new(100.0, 1100.0, 50.0, 20.0)
    );
}

#[test]
fn bounding_center_ignores_translation() {
    let raw = receipt();
    let crop = CropWindow::compute(Size::new(1280.0, 720.0), Size::new(300.0, 600.0)).unwrap();
    let text = normalize(&raw, &crop, Size::new(1280.0, 720.0));

    for (raw_block, block) in raw.blocks.iter().zip(&text.blocks) {
        let original = raw_block.frame.unwrap();
        assert_eq!(block.frame.bounding_center_x, original.x + original.width / 2.0);
        assert_eq!(block.frame.bounding_center_y, original.y + original.height / 2.0);
        for (raw_line, line) in raw_block.lines.iter().zip(&block.lines) {
            let original = raw_line.frame.unwrap();
            assert_eq!(line.frame.bounding_center_y, original.center_y());
            assert_eq!(line.frame.y, original.y - crop.y);
        }
    }
}

#[test]
fn restore_round_trips_capture_coordinates() {
    let raw = receipt();
    let crop = CropWindow {
        x: 64.0,
        y: -256.0,
        width: 512.0,
        height: 1024.0,
    };
    let text = normalize(&raw, &crop, Size::new(640.0, 480.0));
    assert_eq!(restore(&text), raw);
}

#[test]
fn identity_crop_is_idempotent() {
    let raw = receipt();
    let capture = Size::new(640.0, 480.0);
    let once = normalize(&raw, &CropWindow::default(), capture);

    for (raw_block, block) in raw.blocks.iter().zip(&once.blocks) {
        assert_eq!(Some(block.frame.rect()), raw_block.frame);
        assert_eq!(block.corner_points, raw_block.corner_points);
    }

    let twice = normalize(&restore(&once), &CropWindow::default(), capture);
    assert_eq!(twice, once);
}

#[test]
fn empty_result_passes_through() {
    let raw = RawRecognitionResult {
        text: "nothing here".to_string(),
        blocks: Vec::new(),
    };
    let frame = map_result(
        &raw,
        Size::new(640.0, 480.0),
        &Viewport::new(Size::new(320.0, 240.0)),
    )
    .unwrap();
    assert!(frame.result.blocks.is_empty());
    assert_eq!(frame.result.text, "nothing here");
    assert_eq!(frame.result.x_axis, 0.0);
    assert_eq!(frame.result.y_axis, 0.0);
}

#[test]
fn zero_sized_capture_is_rejected() {
    let raw = receipt();
    let err = map_result(
        &raw,
        Size::new(0.0, 1000.0),
        &Viewport::new(Size::new(400.0, 800.0)),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ScanError::InvalidDimension {
            input: "capture",
            ..
        }
    ));

    assert!(CropWindow::compute(Size::new(100.0, 100.0), Size::new(100.0, 0.0)).is_err());
}

#[test]
fn overflowing_crop_never_reaches_output() {
    let err = map_result(
        &RawRecognitionResult::default(),
        Size::new(1e300, 1e300),
        &Viewport::new(Size::new(1e-10, 1.0)).with_target(Size::new(1e10, 1.0)),
    )
    .unwrap_err();
    assert_eq!(err.code(), "INVALID_DIMENSION");
}
