use super::*;

#[test]
fn default_style_is_valid_and_matches_booth_look() {
    let s = CollageStyle::default();
    s.validate().unwrap();
    assert_eq!(s.canvas.width, 1080);
    assert_eq!(s.canvas.height, 1920);
    assert_eq!(s.background.len(), 3);
    assert_eq!(s.strip_background.len(), 2);
    assert_eq!(s.rotation_deg, 10.0);
    assert_eq!(s.jpeg_quality, 90);
    assert!(s.pixel_stages.is_empty());
}

#[test]
fn partial_json_keeps_defaults() {
    let s = CollageStyle::from_json_str(
        r##"{
            "pixel_stages": ["grayscale"],
            "stamp": { "locale": "en-US" },
            "filters": { "warm": "sepia(0.4)" }
        }"##,
    )
    .unwrap();
    assert_eq!(s.pixel_stages, vec![PixelStage::Grayscale]);
    assert_eq!(s.stamp.locale, DateLocale::EnUs);
    assert_eq!(s.stamp.font_size_px, 16.0);
    assert_eq!(s.filter_spec(FilterId::Warm).to_string(), "sepia(0.4)");
    assert_eq!(s.filter_spec(FilterId::Cool), FilterId::Cool.preset());
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(CollageStyle::from_json_str(r#"{ "stickers": [] }"#).is_err());
}

#[test]
fn validation_catches_bad_values() {
    let mut s = CollageStyle::default();
    s.jpeg_quality = 0;
    assert!(s.validate().is_err());

    let mut s = CollageStyle::default();
    s.background.clear();
    assert!(s.validate().is_err());

    let mut s = CollageStyle::default();
    s.strip_background = vec![
        GradientStop::new(0.8, Rgba8::WHITE),
        GradientStop::new(0.2, Rgba8::WHITE),
    ];
    assert!(s.validate().is_err());

    let mut s = CollageStyle::default();
    s.stamp.font_size_px = 0.0;
    assert!(s.validate().is_err());
}

#[test]
fn huge_shadow_blur_is_rejected_up_front() {
    assert!(CollageStyle::from_json_str(r#"{"shadow":{"blur":1e10}}"#).is_err());
    assert!(CollageStyle::from_json_str(r#"{"shadow":{"blur":-1}}"#).is_err());
    assert!(CollageStyle::from_json_str(r#"{"shadow":{"blur":500}}"#).is_ok());
}

#[test]
fn style_round_trips_through_json() {
    let s = CollageStyle::default();
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(CollageStyle::from_json_str(&json).unwrap(), s);
}
