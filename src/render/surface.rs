use crate::effects::composite::{over, over_in_place};
use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::foundation::math::rgba_len;

/// An owned premultiplied RGBA8 raster, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    pub(crate) fn new_transparent(width: u32, height: u32) -> SnapstripResult<Self> {
        let len = rgba_len(width, height)
            .ok_or_else(|| SnapstripError::render("surface size overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    pub(crate) fn from_premul(width: u32, height: u32, data: Vec<u8>) -> SnapstripResult<Self> {
        if rgba_len(width, height) != Some(data.len()) {
            return Err(SnapstripError::render(
                "surface byte length does not match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Fill an axis-aligned rectangle (clipped to the surface) with a premultiplied color.
    pub(crate) fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: [u8; 4]) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        let stride = self.width as usize;
        for row in y0..y1 {
            for col in x0..x1 {
                let i = (row * stride + col) * 4;
                let d = [
                    self.data[i],
                    self.data[i + 1],
                    self.data[i + 2],
                    self.data[i + 3],
                ];
                self.data[i..i + 4].copy_from_slice(&over(d, color, 1.0));
            }
        }
    }

    /// Source-over `src` with its top-left corner at `(x, y)`; anything outside is clipped.
    pub(crate) fn draw_over(&mut self, src: &Surface, x: i64, y: i64) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, src.width, src.height) else {
            return;
        };
        let dst_stride = self.width as usize;
        let src_stride = src.width as usize;
        for row in y0..y1 {
            let sy = (row as i64 - y) as usize;
            for col in x0..x1 {
                let sx = (col as i64 - x) as usize;
                let si = (sy * src_stride + sx) * 4;
                let di = (row * dst_stride + col) * 4;
                let s = [
                    src.data[si],
                    src.data[si + 1],
                    src.data[si + 2],
                    src.data[si + 3],
                ];
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(d, s, 1.0));
            }
        }
    }

    /// Source-over a surface of identical size.
    pub(crate) fn draw_over_full(&mut self, src: &Surface) -> SnapstripResult<()> {
        if src.width != self.width || src.height != self.height {
            return Err(SnapstripError::render("surface size mismatch"));
        }
        over_in_place(&mut self.data, &src.data)
    }

    /// Copy a sub-rectangle into a new surface. The rectangle must lie inside the surface.
    pub(crate) fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> SnapstripResult<Surface> {
        if x.checked_add(w).is_none_or(|r| r > self.width)
            || y.checked_add(h).is_none_or(|b| b > self.height)
        {
            return Err(SnapstripError::render("crop rectangle exceeds surface"));
        }
        let mut out = Surface::new_transparent(w, h)?;
        let src_stride = self.width as usize * 4;
        let row_len = w as usize * 4;
        for row in 0..h as usize {
            let si = (y as usize + row) * src_stride + x as usize * 4;
            let di = row * row_len;
            out.data[di..di + row_len].copy_from_slice(&self.data[si..si + row_len]);
        }
        Ok(out)
    }

    fn clip(&self, x: i64, y: i64, w: u32, h: u32) -> Option<(usize, usize, usize, usize)> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(w)).min(i64::from(self.width));
        let y1 = (y + i64::from(h)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
