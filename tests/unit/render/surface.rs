use super::*;

#[test]
fn from_premul_checks_length() {
    assert!(Surface::from_premul(2, 2, vec![0u8; 15]).is_err());
    assert!(Surface::from_premul(2, 2, vec![0u8; 16]).is_ok());
}

#[test]
fn fill_rect_clips_to_bounds() {
    let mut s = Surface::new_transparent(4, 4).unwrap();
    s.fill_rect(2, -1, 10, 2, [255, 255, 255, 255]);
    assert_eq!(s.pixel(2, 0), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(3, 0), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(1, 0), Some([0, 0, 0, 0]));
}

#[test]
fn draw_over_places_source_at_offset() {
    let mut dst = Surface::new_transparent(4, 4).unwrap();
    let src = Surface::from_premul(2, 2, [9u8, 8, 7, 255].repeat(4)).unwrap();
    dst.draw_over(&src, 1, 2);
    assert_eq!(dst.pixel(1, 2), Some([9, 8, 7, 255]));
    assert_eq!(dst.pixel(2, 3), Some([9, 8, 7, 255]));
    assert_eq!(dst.pixel(0, 2), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn draw_over_negative_offset_clips_source() {
    let mut dst = Surface::new_transparent(2, 2).unwrap();
    let mut src = Surface::new_transparent(2, 2).unwrap();
    src.fill_rect(1, 1, 1, 1, [1, 2, 3, 255]);
    dst.draw_over(&src, -1, -1);
    assert_eq!(dst.pixel(0, 0), Some([1, 2, 3, 255]));
    assert_eq!(dst.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn crop_copies_rows() {
    let mut s = Surface::new_transparent(3, 3).unwrap();
    s.fill_rect(1, 1, 1, 1, [5, 5, 5, 255]);
    let c = s.crop(1, 1, 2, 2).unwrap();
    assert_eq!(c.pixel(0, 0), Some([5, 5, 5, 255]));
    assert_eq!(c.pixel(1, 1), Some([0, 0, 0, 0]));
    assert!(s.crop(2, 2, 2, 2).is_err());
}
