/// Effect applied directly to the decoded source pixels, before cropping and before the filter
/// chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelStage {
    /// Replace R, G and B by their rounded mean.
    Grayscale,
}

impl PixelStage {
    pub(crate) fn apply(self, rgba8_premul: &mut [u8]) {
        match self {
            Self::Grayscale => grayscale_in_place(rgba8_premul),
        }
    }
}

/// Channel mean is linear, so averaging premultiplied channels equals premultiplying the
/// straight-alpha mean.
fn grayscale_in_place(rgba8_premul: &mut [u8]) {
    for px in rgba8_premul.chunks_exact_mut(4) {
        let sum = u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2]);
        let avg = ((sum + 1) / 3) as u8;
        px[0] = avg;
        px[1] = avg;
        px[2] = avg;
    }
}

pub(crate) fn apply_pixel_stages(stages: &[PixelStage], rgba8_premul: &mut [u8]) {
    for stage in stages {
        stage.apply(rgba8_premul);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pixel.rs"]
mod tests;
