use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(100, 128), 50);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[50, 25, 100, 128]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
}

#[test]
fn rgba_len_detects_overflow() {
    assert_eq!(rgba_len(2, 3), Some(24));
    assert_eq!(rgba_len(u32::MAX, u32::MAX), None);
}
