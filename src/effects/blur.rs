use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::render::surface::Surface;

/// Largest standard deviation a blur kernel is built for; larger requests are clamped.
pub(crate) const MAX_BLUR_SIGMA: f32 = 250.0;

/// Gaussian kernel extent derived from a canvas-style blur amount.
///
/// Canvas `shadowBlur` and CSS `blur()` both describe a gaussian whose standard deviation is
/// half (shadow) or equal to (filter) the given amount; the kernel covers three deviations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GaussianBlur {
    pub(crate) radius: u32,
    pub(crate) sigma: f32,
}

impl GaussianBlur {
    pub(crate) fn from_sigma(sigma: f32) -> Self {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Self {
                radius: 0,
                sigma: 0.0,
            };
        }
        let sigma = sigma.min(MAX_BLUR_SIGMA);
        Self {
            radius: (sigma * 3.0).ceil() as u32,
            sigma,
        }
    }

    pub(crate) fn from_shadow_blur(blur: f32) -> Self {
        Self::from_sigma(blur / 2.0)
    }

    pub(crate) fn is_noop(self) -> bool {
        self.radius == 0
    }

    /// Blur `surface` in place.
    pub(crate) fn apply(self, surface: &mut Surface) -> SnapstripResult<()> {
        if self.is_noop() {
            return Ok(());
        }
        let kernel = gaussian_kernel_q16(self.radius, self.sigma)?;
        let (w, h) = (surface.width(), surface.height());
        let mut tmp = vec![0u8; surface.data().len()];
        convolve(surface.data(), &mut tmp, w, h, &kernel, Axis::X);
        convolve(&tmp, surface.data_mut(), w, h, &kernel, Axis::Y);
        Ok(())
    }
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> SnapstripResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(SnapstripError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(SnapstripError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Fold the rounding residue into the center tap so the kernel sums to exactly 1.0 (Q16).
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn convolve(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x + d).clamp(0, w - 1), y),
                    Axis::Y => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out_idx + c] = (((a + 32768) >> 16).min(255)) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
