use rayon::prelude::*;

use crate::assets::photo::RawPhoto;
use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// A photo decoded into premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DecodedPhoto {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba8_premul: Vec<u8>,
}

pub(crate) fn decode_photo(bytes: &[u8]) -> Result<DecodedPhoto, String> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err("decoded image has zero size".to_owned());
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedPhoto {
        width,
        height,
        rgba8_premul,
    })
}

/// Decode every photo concurrently and return them in capture order.
///
/// All decodes run to completion before any result is inspected; the lowest failing index is
/// reported and no partial set is ever returned.
#[tracing::instrument(skip(photos), fields(count = photos.len()))]
pub(crate) fn decode_all(photos: &[RawPhoto]) -> SnapstripResult<Vec<DecodedPhoto>> {
    let results: Vec<Result<DecodedPhoto, String>> = photos
        .par_iter()
        .map(|p| decode_photo(p.bytes()))
        .collect();

    let mut out = Vec::with_capacity(results.len());
    for (index, r) in results.into_iter().enumerate() {
        match r {
            Ok(photo) => out.push(photo),
            Err(message) => {
                tracing::warn!(index, %message, "photo decode failed");
                return Err(SnapstripError::decode(index, message));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
