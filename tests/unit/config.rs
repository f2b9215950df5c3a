use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = SketchConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.frames_per_transition, 50);
    assert_eq!(cfg.tail_bounds, TailBounds::Clamp);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = SketchConfig::from_json_str(
        r#"{ "brush_radius": 3, "additional_frames": 2, "tail_bounds": "reject" }"#,
    )
    .unwrap();
    assert_eq!(cfg.brush_radius, 3.0);
    assert_eq!(cfg.additional_frames, 2);
    assert_eq!(cfg.tail_bounds, TailBounds::Reject);
    assert_eq!(cfg.canvas, SketchConfig::default().canvas);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = SketchConfig::from_json_str(r#"{ "brush": 3 }"#).unwrap_err();
    assert!(matches!(err, StrokeposeError::Serde(_)));
}

#[test]
fn out_of_range_values_fail_validation() {
    for json in [
        r#"{ "brush_radius": 0 }"#,
        r#"{ "blur_radius": -1 }"#,
        r#"{ "additional_frames_step": 0 }"#,
        r#"{ "canvas": { "width": 0, "height": 10 } }"#,
        r#"{ "playback_fps": { "num": 0, "den": 1 } }"#,
        r#"{ "pixel_ratio": 200 }"#,
    ] {
        let err = SketchConfig::from_json_str(json).unwrap_err();
        assert!(
            matches!(err, StrokeposeError::Validation(_)),
            "{json} -> {err}"
        );
    }
}

#[test]
fn raster_canvas_applies_pixel_ratio() {
    let cfg = SketchConfig {
        pixel_ratio: 2.0,
        ..SketchConfig::default()
    };
    assert_eq!(cfg.raster_canvas().width, 1024);
    assert_eq!(cfg.raster_canvas().height, 512);
}
