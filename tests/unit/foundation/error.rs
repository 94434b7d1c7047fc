use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SnapstripError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SnapstripError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        SnapstripError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn decode_names_the_photo_index() {
    let err = SnapstripError::decode(2, "bad header");
    assert_eq!(err.to_string(), "decode error: photo 2: bad header");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SnapstripError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
