use std::sync::Arc;

use crate::foundation::core::Affine;
use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::render::surface::Surface;

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn surface_dims_u16(width: u32, height: u32) -> SnapstripResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SnapstripError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SnapstripError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn pixmap_from_surface(surface: &Surface) -> SnapstripResult<vello_cpu::Pixmap> {
    let (w, h) = surface_dims_u16(surface.width(), surface.height())?;
    let mut may_have_opacities = false;
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = surface
        .data()
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

pub(crate) fn pixmap_to_surface(pixmap: &vello_cpu::Pixmap) -> SnapstripResult<Surface> {
    Surface::from_premul(
        u32::from(pixmap.width()),
        u32::from(pixmap.height()),
        pixmap.data_as_u8_slice().to_vec(),
    )
}

/// Transform that centers a `src_w × src_h` surface on the canvas center, rotated clockwise by
/// `degrees` around that center.
pub(crate) fn centered_rotation(
    canvas_w: u32,
    canvas_h: u32,
    src_w: u32,
    src_h: u32,
    degrees: f64,
) -> Affine {
    Affine::translate((f64::from(canvas_w) / 2.0, f64::from(canvas_h) / 2.0))
        * Affine::rotate(degrees.to_radians())
        * Affine::translate((-f64::from(src_w) / 2.0, -f64::from(src_h) / 2.0))
}

/// Draw `src` centered and rotated onto `dst` with bilinear sampling.
///
/// `vello_cpu` renders into a fresh buffer, so the strip is rasterized into a transparent layer
/// and then composited over `dst`.
pub(crate) fn draw_rotated_centered(
    dst: &mut Surface,
    src: &Surface,
    degrees: f64,
) -> SnapstripResult<()> {
    let (w16, h16) = surface_dims_u16(dst.width(), dst.height())?;
    let transform = centered_rotation(dst.width(), dst.height(), src.width(), src.height(), degrees);
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap_from_surface(src)?)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(src.width()),
        f64::from(src.height()),
    ));
    ctx.flush();

    let mut layer = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut layer);
    dst.draw_over_full(&pixmap_to_surface(&layer)?)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
