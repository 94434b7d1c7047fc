use chrono::NaiveDate;

use super::*;
use crate::render::stamp::StampRenderer;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

#[test]
fn latin_locale_resolves_a_face_covering_the_date() {
    let fonts = system_stamp_fonts(DateLocale::EnUs);
    assert!(!fonts.is_empty(), "no sans-serif system font found");

    let mut r = StampRenderer::new(&fonts).unwrap();
    let ids = r.glyph_ids(&DateLocale::EnUs.format_long(day()), 16.0);
    assert!(!ids.is_empty());
    assert!(ids.iter().all(|&id| id != 0), "missing glyphs: {ids:?}");
}

#[test]
fn latin_locale_asks_for_a_single_face() {
    assert_eq!(system_stamp_fonts(DateLocale::EnGb).len(), 1);
}

#[test]
fn cjk_locale_falls_back_to_a_han_face_when_installed() {
    let db = system_db();
    let fonts = system_stamp_fonts(DateLocale::ZhTw);
    assert!(!fonts.is_empty());

    let mut r = StampRenderer::new(&fonts).unwrap();
    let ids = r.glyph_ids(&DateLocale::ZhTw.format_long(day()), 16.0);
    assert!(!ids.is_empty());
    // Digits always come from the sans face.
    assert!(ids.iter().filter(|&&id| id != 0).count() >= 8, "{ids:?}");

    if cjk_face(db).is_some() {
        assert!(ids.iter().all(|&id| id != 0), "missing glyphs: {ids:?}");
    }
}

#[test]
fn resolved_fonts_carry_their_family_name() {
    for font in system_stamp_fonts(DateLocale::ZhTw) {
        assert!(font.family_hint().is_some_and(|f| !f.is_empty()));
    }
}
