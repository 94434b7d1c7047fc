use crate::foundation::core::Rgba8;
use crate::render::surface::Surface;

/// One color stop of a vertical linear gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, 0 (top) ..= 1 (bottom).
    pub offset: f32,
    /// Stop color.
    pub color: Rgba8,
}

impl GradientStop {
    /// Create a stop.
    pub fn new(offset: f32, color: Rgba8) -> Self {
        Self { offset, color }
    }
}

/// Straight-alpha color at `t`, interpolating between the surrounding stops.
///
/// Before the first stop and after the last stop the end colors are held.
fn sample(stops: &[GradientStop], t: f32) -> Rgba8 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba8::rgba(0, 0, 0, 0);
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }

    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t > b.offset {
            continue;
        }
        let span = b.offset - a.offset;
        let u = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
        let lerp = |x: u8, y: u8| -> u8 {
            let (xf, yf) = (f32::from(x), f32::from(y));
            (xf + (yf - xf) * u).round().clamp(0.0, 255.0) as u8
        };
        return Rgba8::rgba(
            lerp(a.color.r, b.color.r),
            lerp(a.color.g, b.color.g),
            lerp(a.color.b, b.color.b),
            lerp(a.color.a, b.color.a),
        );
    }
    last.color
}

/// Paint a top-to-bottom gradient over the whole surface.
///
/// Row `y` samples the gradient at its pixel center, `(y + 0.5) / height`.
pub(crate) fn fill_vertical_gradient(surface: &mut Surface, stops: &[GradientStop]) {
    let (w, h) = (surface.width() as usize, surface.height());
    if w == 0 || h == 0 {
        return;
    }
    let row_len = w * 4;
    let data = surface.data_mut();
    for y in 0..h {
        let t = (y as f32 + 0.5) / h as f32;
        let px = sample(stops, t).to_premul();
        let start = y as usize * row_len;
        for out in data[start..start + row_len].chunks_exact_mut(4) {
            out.copy_from_slice(&px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
