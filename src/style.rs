//! Visual configuration for the collage.
//!
//! Every constant the compositor draws with lives here, so the observed look variants (other
//! background colors, other effect chains, the grayscale pass) are configuration rather than
//! code. Defaults reproduce the standard photo-booth strip.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::effects::blur::MAX_BLUR_SIGMA;
use crate::effects::filter::{FilterId, FilterSpec};
use crate::effects::pixel::PixelStage;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::render::gradient::GradientStop;
use crate::render::stamp::DateLocale;

/// Drop shadow behind each tile's white backing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowStyle {
    /// Horizontal offset in pixels (positive = right).
    pub offset_x: i32,
    /// Vertical offset in pixels (positive = down).
    pub offset_y: i32,
    /// Canvas-style blur amount; the gaussian deviation is half of this.
    pub blur: f32,
    /// Shadow color including its opacity.
    pub color: Rgba8,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            offset_x: 5,
            offset_y: 5,
            blur: 10.0,
            color: Rgba8::rgba(0, 0, 0, 51),
        }
    }
}

/// Date stamp drawn under each tile.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StampStyle {
    /// Text color.
    pub color: Rgba8,
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Long-form date format.
    pub locale: DateLocale,
}

impl Default for StampStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::rgb(0x9f, 0x7a, 0xea),
            font_size_px: 16.0,
            locale: DateLocale::ZhTw,
        }
    }
}

/// Complete look of a collage.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageStyle {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Vertical gradient behind everything.
    pub background: Vec<GradientStop>,
    /// Vertical gradient of the working surface that holds the tiles.
    pub strip_background: Vec<GradientStop>,
    /// Opaque backing drawn under each photo.
    pub tile_backing: Rgba8,
    /// Tile drop shadow.
    pub shadow: ShadowStyle,
    /// Date stamp.
    pub stamp: StampStyle,
    /// Clockwise rotation of the strip, in degrees.
    pub rotation_deg: f64,
    /// JPEG quality, 1..=100.
    pub jpeg_quality: u8,
    /// Pixel-level effects run on each full source photo before the filter chain.
    pub pixel_stages: Vec<PixelStage>,
    /// Replacement chains for the built-in filter presets.
    pub filters: BTreeMap<FilterId, FilterSpec>,
}

impl Default for CollageStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1080,
                height: 1920,
            },
            background: vec![
                GradientStop::new(0.0, Rgba8::rgb(0x1a, 0x1a, 0x1a)),
                GradientStop::new(0.5, Rgba8::rgb(0x26, 0x26, 0x26)),
                GradientStop::new(1.0, Rgba8::rgb(0x33, 0x33, 0x33)),
            ],
            strip_background: vec![
                GradientStop::new(0.0, Rgba8::rgb(0x26, 0x26, 0x26)),
                GradientStop::new(1.0, Rgba8::rgb(0x33, 0x33, 0x33)),
            ],
            tile_backing: Rgba8::WHITE,
            shadow: ShadowStyle::default(),
            stamp: StampStyle::default(),
            rotation_deg: 10.0,
            jpeg_quality: 90,
            pixel_stages: Vec::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl CollageStyle {
    /// Parse and validate a JSON style. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> SnapstripResult<Self> {
        let style: Self = serde_json::from_str(json).context("parse style JSON")?;
        style.validate()?;
        Ok(style)
    }

    /// Read a JSON style file.
    pub fn from_path(path: &Path) -> SnapstripResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read style '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Check ranges the compositor relies on.
    pub fn validate(&self) -> SnapstripResult<()> {
        self.canvas.validate()?;
        validate_stops("background", &self.background)?;
        validate_stops("strip_background", &self.strip_background)?;
        let max_blur = MAX_BLUR_SIGMA * 2.0;
        if !self.shadow.blur.is_finite() || !(0.0..=max_blur).contains(&self.shadow.blur) {
            return Err(SnapstripError::validation(format!(
                "shadow.blur must be in 0..={max_blur}"
            )));
        }
        if !self.stamp.font_size_px.is_finite() || self.stamp.font_size_px <= 0.0 {
            return Err(SnapstripError::validation(
                "stamp.font_size_px must be finite and > 0",
            ));
        }
        if !self.rotation_deg.is_finite() {
            return Err(SnapstripError::validation("rotation_deg must be finite"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SnapstripError::validation("jpeg_quality must be in 1..=100"));
        }
        Ok(())
    }

    /// Effect chain for `id`, honoring overrides.
    pub fn filter_spec(&self, id: FilterId) -> FilterSpec {
        self.filters
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.preset())
    }
}

fn validate_stops(name: &str, stops: &[GradientStop]) -> SnapstripResult<()> {
    if stops.is_empty() {
        return Err(SnapstripError::validation(format!(
            "{name} needs at least one gradient stop"
        )));
    }
    let mut prev = 0.0f32;
    for s in stops {
        if !s.offset.is_finite() || !(0.0..=1.0).contains(&s.offset) {
            return Err(SnapstripError::validation(format!(
                "{name} stop offsets must be within 0..=1"
            )));
        }
        if s.offset < prev {
            return Err(SnapstripError::validation(format!(
                "{name} stop offsets must be non-decreasing"
            )));
        }
        prev = s.offset;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/style.rs"]
mod tests;
