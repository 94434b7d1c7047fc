use super::*;

#[test]
fn zero_blur_is_identity() {
    let mut s = Surface::from_premul(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    GaussianBlur::from_sigma(0.0).apply(&mut s).unwrap();
    assert_eq!(s.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn shadow_blur_maps_to_half_sigma() {
    let b = GaussianBlur::from_shadow_blur(10.0);
    assert_eq!(b.sigma, 5.0);
    assert_eq!(b.radius, 15);
}

#[test]
fn kernel_size_is_capped() {
    let b = GaussianBlur::from_sigma(1e10);
    assert_eq!(b.sigma, MAX_BLUR_SIGMA);
    assert_eq!(b.radius, 750);
}

#[test]
fn constant_surface_is_unchanged() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let mut s = Surface::from_premul(w, h, px.repeat((w * h) as usize)).unwrap();
    GaussianBlur::from_sigma(1.5).apply(&mut s).unwrap();
    assert!(s.data().chunks_exact(4).all(|p| p == px));
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    let mut s = Surface::from_premul(w, h, src).unwrap();

    GaussianBlur {
        radius: 2,
        sigma: 1.2,
    }
    .apply(&mut s)
    .unwrap();

    let nonzero = s.data().chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    let sum_a: u32 = s.data().chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}
