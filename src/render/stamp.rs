use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, NaiveDate};

use crate::foundation::core::{Affine, Rgba8};
use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::render::cpu::{affine_to_cpu, pixmap_to_surface, surface_dims_u16};
use crate::render::surface::Surface;
use crate::style::StampStyle;

/// Long-form date formats for the stamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DateLocale {
    /// `2026年10月18日`
    #[default]
    #[serde(rename = "zh-TW")]
    ZhTw,
    /// `October 18, 2026`
    #[serde(rename = "en-US")]
    EnUs,
    /// `18 October 2026`
    #[serde(rename = "en-GB")]
    EnGb,
}

impl DateLocale {
    /// Format `date` the way this locale writes a long date.
    pub fn format_long(self, date: NaiveDate) -> String {
        match self {
            Self::ZhTw => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
            Self::EnUs => date.format("%B %-d, %Y").to_string(),
            Self::EnGb => date.format("%-d %B %Y").to_string(),
        }
    }

    /// `true` when [`DateLocale::format_long`] writes Han characters.
    pub fn uses_cjk(self) -> bool {
        matches!(self, Self::ZhTw)
    }
}

/// Font used for date stamps, as raw TTF/OTF/TTC bytes.
#[derive(Clone)]
pub struct StampFont {
    bytes: Arc<Vec<u8>>,
    family: Option<String>,
}

impl std::fmt::Debug for StampFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StampFont")
            .field("len", &self.bytes.len())
            .field("family", &self.family)
            .finish()
    }
}

impl StampFont {
    /// Wrap font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            family: None,
        }
    }

    /// A system face; `family` picks one family out of a collection file.
    pub(crate) fn from_system(bytes: Arc<Vec<u8>>, family: String) -> Self {
        Self {
            bytes,
            family: Some(family),
        }
    }

    /// Preferred family name, when the font came from system discovery.
    pub fn family_hint(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Read a font file.
    pub fn from_path(path: &Path) -> SnapstripResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(Self::from_bytes(bytes))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A rasterized stamp and the strip row its top edge lands on.
pub(crate) struct StampLayer {
    pub(crate) surface: Surface,
    pub(crate) top: i64,
}

/// Shapes stamp text with Parley and rasterizes it with `vello_cpu`.
///
/// Built once per compose call. Fonts are registered in fallback order and form one font
/// stack, so characters missing from the first face are taken from the next one.
pub(crate) struct StampRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: Vec<String>,
}

impl StampRenderer {
    pub(crate) fn new(fonts: &[StampFont]) -> SnapstripResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let mut families: Vec<String> = Vec::new();
        for font in fonts {
            let blob: Arc<dyn AsRef<[u8]> + Send + Sync> = font.bytes.clone();
            let registered = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::new(blob), None);
            let names: Vec<String> = registered
                .iter()
                .filter_map(|(id, _)| font_ctx.collection.family_name(*id).map(str::to_owned))
                .collect();
            let hinted = font
                .family
                .as_deref()
                .and_then(|hint| names.iter().find(|n| n.eq_ignore_ascii_case(hint)));
            match hinted {
                Some(name) => families.push(name.clone()),
                None => families.extend(names.iter().cloned()),
            }
        }
        families.dedup();
        if families.is_empty() {
            return Err(SnapstripError::validation(
                "no font families registered from font bytes",
            ));
        }

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            families,
        })
    }

    fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        let stack: Vec<parley::style::FontFamily<'static>> = self
            .families
            .iter()
            .map(|name| parley::style::FontFamily::Named(Cow::Owned(name.clone())))
            .collect();
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::List(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Glyph ids the shaper picked for `text`; id 0 means no face had the character.
    #[cfg(test)]
    pub(crate) fn glyph_ids(&mut self, text: &str, size_px: f32) -> Vec<u32> {
        let layout = self.layout(text, size_px, TextBrushRgba8::default());
        let mut ids = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                    ids.extend(run.positioned_glyphs().map(|g| g.id));
                }
            }
        }
        ids
    }

    /// Render `text` centered on `center_x` with its baseline on `baseline`.
    ///
    /// The returned layer spans the full `width` and enough rows around the baseline for
    /// ascenders and descenders.
    pub(crate) fn render(
        &mut self,
        text: &str,
        style: &StampStyle,
        width: u32,
        center_x: f64,
        baseline: f64,
    ) -> SnapstripResult<StampLayer> {
        let size = style.font_size_px;
        let above = (size * 1.5).ceil() as u32;
        let below = (size * 0.75).ceil() as u32;
        let top = baseline.floor() as i64 - i64::from(above);
        let (w16, h16) = surface_dims_u16(width, above + below)?;

        let layout = self.layout(text, size, style.color.into());
        let first_baseline = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().baseline))
            .unwrap_or(0.0);
        let origin_x = center_x - f64::from(layout.width()) / 2.0;
        let origin_y = (baseline - top as f64) - first_baseline;

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_transform(affine_to_cpu(Affine::translate((origin_x, origin_y))));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                if run.positioned_glyphs().any(|g| g.id == 0) {
                    tracing::warn!(text, "stamp font has no glyph for some characters");
                }
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(StampLayer {
            surface: pixmap_to_surface(&pixmap)?,
            top,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stamp.rs"]
mod tests;
