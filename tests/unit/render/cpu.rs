use super::*;
use kurbo::Vec2;

#[test]
fn centered_rotation_maps_strip_center_to_canvas_center() {
    let t = centered_rotation(1080, 1920, 378, 1683, 10.0);
    let c = t * kurbo::Point::new(189.0, 841.5);
    assert!((c.x - 540.0).abs() < 1e-9);
    assert!((c.y - 960.0).abs() < 1e-9);
}

#[test]
fn positive_degrees_rotate_clockwise_in_y_down_space() {
    let t = centered_rotation(100, 100, 10, 10, 90.0);
    // The strip's right-pointing axis ends up pointing down.
    let x_axis = t * kurbo::Point::new(10.0, 5.0) - t * kurbo::Point::new(5.0, 5.0);
    assert!((x_axis - Vec2::new(0.0, 5.0)).hypot() < 1e-9);
}

#[test]
fn surface_dims_reject_oversize() {
    assert!(surface_dims_u16(70_000, 1).is_err());
    assert_eq!(surface_dims_u16(1080, 1920).unwrap(), (1080, 1920));
}

#[test]
fn rotated_draw_covers_canvas_center_and_leaves_corners() {
    let mut dst = Surface::new_transparent(64, 64).unwrap();
    dst.fill_rect(0, 0, 64, 64, [0, 0, 0, 255]);
    let src = Surface::from_premul(16, 32, [255u8, 255, 255, 255].repeat(16 * 32)).unwrap();

    draw_rotated_centered(&mut dst, &src, 10.0).unwrap();

    let center = dst.pixel(32, 32).unwrap();
    assert!(center[0] > 200, "center should be covered, got {center:?}");
    assert_eq!(dst.pixel(0, 0).unwrap(), [0, 0, 0, 255]);
    assert_eq!(dst.pixel(63, 63).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn pixmap_round_trip_preserves_bytes() {
    let src = Surface::from_premul(2, 1, vec![10, 20, 30, 255, 5, 5, 5, 128]).unwrap();
    let pm = pixmap_from_surface(&src).unwrap();
    assert_eq!(pixmap_to_surface(&pm).unwrap(), src);
}
