use chrono::NaiveDate;

use crate::assets::decode::{DecodedPhoto, decode_all};
use crate::assets::photo::PhotoSequence;
use crate::effects::blur::GaussianBlur;
use crate::effects::filter::{FilterId, FilterSpec};
use crate::effects::pixel::apply_pixel_stages;
use crate::encode::jpeg::{CompositeImage, encode_jpeg};
use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::render::cpu::draw_rotated_centered;
use crate::render::fonts::system_stamp_fonts;
use crate::render::frame::FrameRGBA;
use crate::render::gradient::fill_vertical_gradient;
use crate::render::layout::LayoutGeometry;
use crate::render::stamp::{StampFont, StampRenderer};
use crate::render::surface::Surface;
use crate::style::{CollageStyle, ShadowStyle};

/// Source rectangle of a centered crop and where it lands inside the tile.
///
/// The rectangle never leaves the photo: on an axis where the photo is smaller than the tile,
/// the whole photo is used and centered in the slot over the tile backing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CenteredCrop {
    pub(crate) src_x: u32,
    pub(crate) src_y: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) dst_x: u32,
    pub(crate) dst_y: u32,
}

impl CenteredCrop {
    pub(crate) fn new(src_w: u32, src_h: u32, tile_w: u32, tile_h: u32) -> Self {
        let (src_x, width, dst_x) = centered_span(src_w, tile_w);
        let (src_y, height, dst_y) = centered_span(src_h, tile_h);
        Self {
            src_x,
            src_y,
            width,
            height,
            dst_x,
            dst_y,
        }
    }
}

fn centered_span(src: u32, tile: u32) -> (u32, u32, u32) {
    let len = src.min(tile);
    let start = (i64::from(src) - i64::from(tile))
        .div_euclid(2)
        .clamp(0, i64::from(src - len)) as u32;
    (start, len, (tile - len) / 2)
}

/// Turns a photo sequence and a filter into the tilted strip collage.
///
/// Stateless: every call decodes from the raw photos, so nothing carries over between runs.
#[derive(Clone, Debug)]
pub struct Compositor {
    style: CollageStyle,
    fonts: Vec<StampFont>,
}

impl Compositor {
    /// Create a compositor for a validated style.
    ///
    /// Stamp fonts are resolved from the installed system fonts: a sans-serif face, plus a
    /// CJK-capable face when the stamp locale needs one.
    pub fn new(style: CollageStyle) -> SnapstripResult<Self> {
        style.validate()?;
        let fonts = system_stamp_fonts(style.stamp.locale);
        Ok(Self { style, fonts })
    }

    /// Put `font` first in the stamp font stack. System faces stay behind it as fallbacks.
    pub fn with_font(mut self, font: StampFont) -> Self {
        self.fonts.insert(0, font);
        self
    }

    /// Stamp fonts in fallback order.
    pub fn stamp_fonts(&self) -> &[StampFont] {
        &self.fonts
    }

    /// Active style.
    pub fn style(&self) -> &CollageStyle {
        &self.style
    }

    /// Compose and encode. Returns `Ok(None)` for an empty sequence.
    pub fn compose(
        &self,
        photos: &PhotoSequence,
        filter: FilterId,
        date: NaiveDate,
    ) -> SnapstripResult<Option<CompositeImage>> {
        let Some(frame) = self.compose_frame(photos, filter, date)? else {
            return Ok(None);
        };
        encode_jpeg(&frame, self.style.jpeg_quality).map(Some)
    }

    /// Compose without encoding: the final canvas as premultiplied RGBA.
    #[tracing::instrument(skip(self, photos), fields(count = photos.len()))]
    pub fn compose_frame(
        &self,
        photos: &PhotoSequence,
        filter: FilterId,
        date: NaiveDate,
    ) -> SnapstripResult<Option<FrameRGBA>> {
        let Some(strip) = self.strip_surface(photos, filter, date)? else {
            return Ok(None);
        };

        let canvas = self.style.canvas;
        let mut out = Surface::new_transparent(canvas.width, canvas.height)?;
        fill_vertical_gradient(&mut out, &self.style.background);
        draw_rotated_centered(&mut out, &strip, self.style.rotation_deg)?;
        Ok(Some(FrameRGBA::from_surface(out)))
    }

    /// The untransformed working surface: stacked tiles before rotation.
    pub fn render_strip(
        &self,
        photos: &PhotoSequence,
        filter: FilterId,
        date: NaiveDate,
    ) -> SnapstripResult<Option<FrameRGBA>> {
        Ok(self
            .strip_surface(photos, filter, date)?
            .map(FrameRGBA::from_surface))
    }

    fn strip_surface(
        &self,
        photos: &PhotoSequence,
        filter: FilterId,
        date: NaiveDate,
    ) -> SnapstripResult<Option<Surface>> {
        if photos.is_empty() {
            tracing::debug!("no photos; nothing to compose");
            return Ok(None);
        }

        let decoded = decode_all(photos.photos())?;
        let geom = LayoutGeometry::new(self.style.canvas, decoded.len())?;
        tracing::debug!(
            tile = geom.tile_width,
            gap = geom.gap,
            strip_height = geom.strip_height(),
            "strip layout"
        );

        let mut strip = Surface::new_transparent(geom.strip_width(), geom.strip_height())?;
        fill_vertical_gradient(&mut strip, &self.style.strip_background);

        let spec = self.style.filter_spec(filter);
        let stamp_text = self.style.stamp.locale.format_long(date);
        let mut stamps = if self.fonts.is_empty() {
            tracing::warn!("no stamp font available; date stamps skipped");
            None
        } else {
            Some(StampRenderer::new(&self.fonts)?)
        };

        for (i, photo) in decoded.into_iter().enumerate() {
            let index = i as u32;
            self.draw_tile(&mut strip, photo, index, &geom, &spec)?;
            if let Some(renderer) = stamps.as_mut() {
                let layer = renderer.render(
                    &stamp_text,
                    &self.style.stamp,
                    geom.strip_width(),
                    geom.stamp_center_x(),
                    geom.stamp_baseline(index),
                )?;
                strip.draw_over(&layer.surface, 0, layer.top);
            }
        }
        Ok(Some(strip))
    }

    fn draw_tile(
        &self,
        strip: &mut Surface,
        mut photo: DecodedPhoto,
        index: u32,
        geom: &LayoutGeometry,
        spec: &FilterSpec,
    ) -> SnapstripResult<()> {
        let y = i64::from(geom.tile_y(index));
        let (tw, th) = (geom.tile_width, geom.tile_height);

        draw_shadow(strip, y, tw, th, &self.style.shadow)?;
        strip.fill_rect(0, y, tw, th, self.style.tile_backing.to_premul());

        // Pixel stages see the whole source photo; the filter chain only the cropped tile.
        apply_pixel_stages(&self.style.pixel_stages, &mut photo.rgba8_premul);
        let source = Surface::from_premul(photo.width, photo.height, photo.rgba8_premul)?;
        let crop = CenteredCrop::new(source.width(), source.height(), tw, th);
        let mut tile = source.crop(crop.src_x, crop.src_y, crop.width, crop.height)?;
        spec.apply(&mut tile)?;

        strip.draw_over(&tile, i64::from(crop.dst_x), y + i64::from(crop.dst_y));
        Ok(())
    }
}

fn draw_shadow(
    strip: &mut Surface,
    y: i64,
    w: u32,
    h: u32,
    shadow: &ShadowStyle,
) -> SnapstripResult<()> {
    if shadow.color.a == 0 {
        return Ok(());
    }
    let blur = GaussianBlur::from_shadow_blur(shadow.blur);
    let pad = blur.radius;
    let padded = |side: u32| {
        pad.checked_mul(2)
            .and_then(|p| side.checked_add(p))
            .ok_or_else(|| SnapstripError::render("shadow blur too large for tile"))
    };
    let mut layer = Surface::new_transparent(padded(w)?, padded(h)?)?;
    layer.fill_rect(i64::from(pad), i64::from(pad), w, h, shadow.color.to_premul());
    blur.apply(&mut layer)?;
    strip.draw_over(
        &layer,
        i64::from(shadow.offset_x) - i64::from(pad),
        y + i64::from(shadow.offset_y) - i64::from(pad),
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
