use std::sync::Arc;

use base64::Engine as _;

use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::render::frame::FrameRGBA;

/// An encoded collage, ready for display or download.
///
/// Cheap to clone; the encoded bytes are shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeImage {
    width: u32,
    height: u32,
    bytes: Arc<[u8]>,
}

impl CompositeImage {
    /// Encoded JPEG bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// MIME type of [`CompositeImage::bytes`].
    pub fn mime(&self) -> &'static str {
        "image/jpeg"
    }

    /// `data:` URI embedding the encoded image as base64.
    pub fn data_uri(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{b64}", self.mime())
    }
}

/// Encode a premultiplied frame as baseline JPEG.
///
/// JPEG has no alpha channel; dropping alpha from premultiplied data is the same as flattening
/// onto black. Composed frames are opaque, so this only matters for callers' own frames.
pub(crate) fn encode_jpeg(frame: &FrameRGBA, quality: u8) -> SnapstripResult<CompositeImage> {
    let px = (frame.width as usize) * (frame.height as usize);
    if frame.data.len() != px * 4 {
        return Err(SnapstripError::encode(
            "frame byte length does not match width*height*4",
        ));
    }
    if !frame.premultiplied {
        return Err(SnapstripError::encode("frame must be premultiplied RGBA8"));
    }

    let mut rgb = Vec::with_capacity(px * 3);
    for p in frame.data.chunks_exact(4) {
        rgb.extend_from_slice(&p[..3]);
    }

    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
        .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| SnapstripError::encode(format!("jpeg: {e}")))?;

    tracing::debug!(bytes = buf.len(), quality, "encoded jpeg");
    Ok(CompositeImage {
        width: frame.width,
        height: frame.height,
        bytes: Arc::from(buf),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
