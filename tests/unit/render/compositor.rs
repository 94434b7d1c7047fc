use std::io::Cursor;

use super::*;
use crate::assets::photo::RawPhoto;
use crate::effects::pixel::PixelStage;
use crate::foundation::core::Rgba8;

fn png(w: u32, h: u32, px: [u8; 4]) -> RawPhoto {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    RawPhoto::from_bytes(buf)
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

const COLORS: [[u8; 4]; 4] = [
    [255, 0, 0, 255],
    [0, 255, 0, 255],
    [0, 0, 255, 255],
    [255, 255, 0, 255],
];

fn four_photos() -> PhotoSequence {
    COLORS.iter().map(|&c| png(500, 400, c)).collect()
}

#[test]
fn centered_crop_takes_the_middle_of_large_photos() {
    let c = CenteredCrop::new(640, 480, 378, 378);
    assert_eq!(
        c,
        CenteredCrop {
            src_x: 131,
            src_y: 51,
            width: 378,
            height: 378,
            dst_x: 0,
            dst_y: 0,
        }
    );
}

#[test]
fn centered_crop_clamps_small_photos() {
    let c = CenteredCrop::new(100, 500, 378, 378);
    assert_eq!(c.src_x, 0);
    assert_eq!(c.width, 100);
    assert_eq!(c.dst_x, 139);
    assert_eq!(c.src_y, 61);
    assert_eq!(c.height, 378);
    assert_eq!(c.dst_y, 0);
}

#[test]
fn empty_sequence_produces_nothing() {
    let comp = Compositor::new(CollageStyle::default()).unwrap();
    let empty = PhotoSequence::default();
    assert!(comp.render_strip(&empty, FilterId::Normal, day()).unwrap().is_none());
    assert!(comp.compose_frame(&empty, FilterId::Vintage, day()).unwrap().is_none());
}

#[test]
fn tiles_are_stacked_in_capture_order() {
    let comp = Compositor::new(CollageStyle::default()).unwrap();
    let strip = comp
        .render_strip(&four_photos(), FilterId::Normal, day())
        .unwrap()
        .unwrap();
    assert_eq!(strip.width, 378);
    assert_eq!(strip.height, 1683);

    for (i, color) in COLORS.iter().enumerate() {
        let top = i as u32 * (378 + 57);
        assert_eq!(strip.pixel(189, top + 189).unwrap(), *color, "tile {i}");
        assert_eq!(strip.pixel(0, top).unwrap(), *color, "tile {i} top-left");
        assert_eq!(strip.pixel(377, top + 377).unwrap(), *color, "tile {i} bottom-right");
    }
}

#[test]
fn gap_rows_show_strip_background() {
    let comp = Compositor::new(CollageStyle::default()).unwrap();
    let strip = comp
        .render_strip(&four_photos(), FilterId::Normal, day())
        .unwrap()
        .unwrap();
    let px = strip.pixel(20, 378 + 28).unwrap();
    assert_eq!(px[3], 255);
    assert_eq!(px[0], px[1]);
    assert_eq!(px[1], px[2]);
    assert!((0x26..=0x33).contains(&px[0]), "got {px:?}");
}

#[test]
fn shadow_darkens_the_gap_under_each_tile() {
    let with_shadow = Compositor::new(CollageStyle::default()).unwrap();
    let mut no_shadow_style = CollageStyle::default();
    no_shadow_style.shadow.color = Rgba8::rgba(0, 0, 0, 0);
    let no_shadow = Compositor::new(no_shadow_style).unwrap();

    let photos = four_photos();
    let a = with_shadow
        .render_strip(&photos, FilterId::Normal, day())
        .unwrap()
        .unwrap();
    let b = no_shadow
        .render_strip(&photos, FilterId::Normal, day())
        .unwrap()
        .unwrap();

    let y = 378 + 3;
    assert!(a.pixel(100, y).unwrap()[0] < b.pixel(100, y).unwrap()[0]);
    // Far from any tile the shadow has no effect.
    assert_eq!(a.pixel(20, 378 + 28), b.pixel(20, 378 + 28));
}

#[test]
fn small_photo_sits_centered_on_white_backing() {
    let comp = Compositor::new(CollageStyle::default()).unwrap();
    let photos: PhotoSequence = vec![png(100, 100, [0, 0, 255, 255])].into_iter().collect();
    let strip = comp
        .render_strip(&photos, FilterId::Normal, day())
        .unwrap()
        .unwrap();
    assert_eq!(strip.height, 378);
    assert_eq!(strip.pixel(189, 189).unwrap(), [0, 0, 255, 255]);
    assert_eq!(strip.pixel(5, 5).unwrap(), [255, 255, 255, 255]);
}

#[test]
fn filters_stay_inside_tiles() {
    let comp = Compositor::new(CollageStyle::default()).unwrap();
    let photos = four_photos();
    let normal = comp
        .render_strip(&photos, FilterId::Normal, day())
        .unwrap()
        .unwrap();
    let vintage = comp
        .render_strip(&photos, FilterId::Vintage, day())
        .unwrap()
        .unwrap();

    assert_ne!(normal.pixel(189, 189), vintage.pixel(189, 189));
    assert_eq!(normal.pixel(20, 378 + 28), vintage.pixel(20, 378 + 28));
}

#[test]
fn grayscale_stage_runs_before_filter() {
    let mut style = CollageStyle::default();
    style.pixel_stages = vec![PixelStage::Grayscale];
    let comp = Compositor::new(style).unwrap();
    let photos: PhotoSequence = vec![png(400, 400, [255, 0, 0, 255])].into_iter().collect();

    let gray = comp
        .render_strip(&photos, FilterId::Normal, day())
        .unwrap()
        .unwrap();
    assert_eq!(gray.pixel(189, 189).unwrap(), [85, 85, 85, 255]);

    // Sepia after grayscale tints the gray; the reverse order would not start from gray.
    let tinted = comp
        .render_strip(&photos, FilterId::Vintage, day())
        .unwrap()
        .unwrap();
    let p = tinted.pixel(189, 189).unwrap();
    assert!(p[0] > p[2], "expected warm tint, got {p:?}");
}

#[test]
fn decode_failure_aborts_the_whole_strip() {
    let comp = Compositor::new(CollageStyle::default()).unwrap();
    let mut photos = four_photos();
    photos.push(RawPhoto::from_bytes(b"broken".to_vec()));
    let err = comp
        .compose_frame(&photos, FilterId::Normal, day())
        .unwrap_err();
    assert!(matches!(
        err,
        crate::foundation::error::SnapstripError::Decode { index: 4, .. }
    ));
}
