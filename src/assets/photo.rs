use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::SnapstripResult;

/// Number of frames the capture flow takes before the collage stage.
pub const CAPTURE_COUNT: usize = 4;

/// One encoded still image as handed over by the capture side.
///
/// The bytes are never mutated; clones share the same buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPhoto {
    bytes: Arc<[u8]>,
}

impl RawPhoto {
    /// Wrap encoded image bytes (PNG, JPEG, ... anything `image` can decode).
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Read an encoded image from disk.
    pub fn from_path(path: &Path) -> SnapstripResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read photo '{}'", path.display()))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Photos in capture order; index 0 is placed at the top of the strip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhotoSequence {
    photos: Vec<RawPhoto>,
}

impl PhotoSequence {
    /// Build a sequence from photos already in capture order.
    pub fn new(photos: Vec<RawPhoto>) -> Self {
        Self { photos }
    }

    /// Wrap encoded images already in capture order.
    pub fn from_bytes<I, B>(images: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Arc<[u8]>>,
    {
        images.into_iter().map(RawPhoto::from_bytes).collect()
    }

    /// Read every path in order.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> SnapstripResult<Self> {
        let photos = paths
            .iter()
            .map(|p| RawPhoto::from_path(p.as_ref()))
            .collect::<SnapstripResult<Vec<_>>>()?;
        Ok(Self { photos })
    }

    /// Append the next captured photo.
    pub fn push(&mut self, photo: RawPhoto) {
        self.photos.push(photo);
    }

    /// Number of photos.
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// `true` when nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// `true` once the default capture flow has all of its frames.
    pub fn is_complete(&self) -> bool {
        self.photos.len() >= CAPTURE_COUNT
    }

    /// Photos in capture order.
    pub fn photos(&self) -> &[RawPhoto] {
        &self.photos
    }
}

impl FromIterator<RawPhoto> for PhotoSequence {
    fn from_iter<I: IntoIterator<Item = RawPhoto>>(iter: I) -> Self {
        Self {
            photos: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/photo.rs"]
mod tests;
