use super::*;

#[test]
fn grayscale_averages_channels_and_keeps_alpha() {
    let mut px = vec![30u8, 60, 90, 255, 255, 0, 0, 200];
    apply_pixel_stages(&[PixelStage::Grayscale], &mut px);
    assert_eq!(&px[..4], &[60, 60, 60, 255]);
    assert_eq!(&px[4..], &[85, 85, 85, 200]);
}

#[test]
fn grayscale_rounds_to_nearest() {
    // (1 + 1 + 2) / 3 = 1.33 -> 1, (1 + 2 + 2) / 3 = 1.67 -> 2
    let mut px = vec![1u8, 1, 2, 255, 1, 2, 2, 255];
    apply_pixel_stages(&[PixelStage::Grayscale], &mut px);
    assert_eq!(px[0], 1);
    assert_eq!(px[4], 2);
}

#[test]
fn no_stages_is_identity() {
    let mut px = vec![1u8, 2, 3, 4];
    apply_pixel_stages(&[], &mut px);
    assert_eq!(px, vec![1, 2, 3, 4]);
}

#[test]
fn stage_serde_names_are_lowercase() {
    let s: PixelStage = serde_json::from_str("\"grayscale\"").unwrap();
    assert_eq!(s, PixelStage::Grayscale);
}
