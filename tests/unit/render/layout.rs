use super::*;

fn default_canvas() -> Canvas {
    Canvas {
        width: 1080,
        height: 1920,
    }
}

#[test]
fn default_canvas_tile_and_gap() {
    let g = LayoutGeometry::new(default_canvas(), 4).unwrap();
    assert_eq!(g.tile_width, 378);
    assert_eq!(g.tile_height, 378);
    assert_eq!(g.gap, 57);
}

#[test]
fn strip_height_has_no_trailing_gap() {
    let one = LayoutGeometry::new(default_canvas(), 1).unwrap();
    assert_eq!(one.strip_height(), 378);
    let four = LayoutGeometry::new(default_canvas(), 4).unwrap();
    assert_eq!(four.strip_height(), 4 * 378 + 3 * 57);
    assert_eq!(four.strip_height(), 1683);
}

#[test]
fn tile_and_stamp_positions() {
    let g = LayoutGeometry::new(default_canvas(), 4).unwrap();
    for i in 0..4u32 {
        assert_eq!(g.tile_y(i), i * (378 + 57));
        assert_eq!(g.stamp_baseline(i), f64::from((i + 1) * (378 + 57)) - 28.5);
    }
    assert_eq!(g.tile_rect(1), Rect::new(0.0, 435.0, 378.0, 813.0));
    assert_eq!(g.stamp_center_x(), 189.0);
}

#[test]
fn geometry_follows_count() {
    let a = LayoutGeometry::new(default_canvas(), 2).unwrap();
    let b = LayoutGeometry::new(default_canvas(), 3).unwrap();
    assert_ne!(a.strip_height(), b.strip_height());
}

#[test]
fn zero_photos_rejected() {
    assert!(LayoutGeometry::new(default_canvas(), 0).is_err());
}

#[test]
fn oversized_strip_rejected() {
    assert!(LayoutGeometry::new(default_canvas(), 1000).is_err());
}

#[test]
fn strip_height_cap_allows_150_default_tiles() {
    let g = LayoutGeometry::new(default_canvas(), 150).unwrap();
    assert_eq!(g.strip_height(), 65193);
    assert!(LayoutGeometry::new(default_canvas(), 151).is_err());
}
