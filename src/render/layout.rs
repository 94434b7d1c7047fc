use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{SnapstripError, SnapstripResult};

/// Tile width as a percentage of canvas width.
pub const TILE_WIDTH_PERCENT: u32 = 35;
/// Gap between tiles as a percentage of canvas height.
pub const GAP_PERCENT: u32 = 3;

/// Strip geometry for one compose call.
///
/// Derived from the canvas and the photo count; never cached across calls. The strip height
/// must fit in `u16`, the largest surface the rasterizer accepts, which allows 150 photos on a
/// 1080x1920 canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutGeometry {
    /// Number of tiles stacked in the strip.
    pub count: u32,
    /// Square tile side, `floor(canvas.width * 0.35)`.
    pub tile_width: u32,
    /// Equal to `tile_width`.
    pub tile_height: u32,
    /// Vertical gap, `floor(canvas.height * 0.03)`.
    pub gap: u32,
}

impl LayoutGeometry {
    /// Compute geometry for `count` photos on `canvas`.
    ///
    /// Fails when the strip would be taller than `u16::MAX` rows.
    pub fn new(canvas: Canvas, count: usize) -> SnapstripResult<Self> {
        canvas.validate()?;
        if count == 0 {
            return Err(SnapstripError::validation("layout needs at least one photo"));
        }
        let count: u32 = count
            .try_into()
            .map_err(|_| SnapstripError::validation("too many photos"))?;
        // Integer math keeps the floor exact.
        let tile_width = canvas.width * TILE_WIDTH_PERCENT / 100;
        let gap = canvas.height * GAP_PERCENT / 100;
        if tile_width == 0 {
            return Err(SnapstripError::validation("canvas too narrow for a tile"));
        }
        let geom = Self {
            count,
            tile_width,
            tile_height: tile_width,
            gap,
        };
        let h = u64::from(geom.pitch()) * u64::from(count) - u64::from(gap);
        if h > u64::from(u16::MAX) {
            return Err(SnapstripError::validation(format!(
                "{count} tiles exceed the maximum strip height of {} rows",
                u16::MAX
            )));
        }
        Ok(geom)
    }

    /// Distance between the tops of consecutive tiles.
    pub fn pitch(&self) -> u32 {
        self.tile_height + self.gap
    }

    /// Working surface width.
    pub fn strip_width(&self) -> u32 {
        self.tile_width
    }

    /// Working surface height: `count * (tile_height + gap) - gap`.
    pub fn strip_height(&self) -> u32 {
        self.pitch() * self.count - self.gap
    }

    /// Top edge of tile `index`.
    pub fn tile_y(&self, index: u32) -> u32 {
        index * self.pitch()
    }

    /// Tile rectangle in working-surface coordinates.
    pub fn tile_rect(&self, index: u32) -> Rect {
        let y = f64::from(self.tile_y(index));
        Rect::new(
            0.0,
            y,
            f64::from(self.tile_width),
            y + f64::from(self.tile_height),
        )
    }

    /// Date-stamp baseline for tile `index`, in the gap strip under the tile.
    pub fn stamp_baseline(&self, index: u32) -> f64 {
        f64::from((index + 1) * self.pitch()) - f64::from(self.gap) / 2.0
    }

    /// Horizontal center of the strip.
    pub fn stamp_center_x(&self) -> f64 {
        f64::from(self.tile_width) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
