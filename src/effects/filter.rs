use std::fmt;
use std::str::FromStr;

use crate::effects::blur::{GaussianBlur, MAX_BLUR_SIGMA};
use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::render::surface::Surface;

/// The user-selectable filter presets.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterId {
    /// No color adjustment.
    #[default]
    Normal,
    /// Brighter, slightly desaturated, light sepia.
    Warm,
    /// Darker, punchier, faint sepia.
    Cool,
    /// Faded colors, strong sepia.
    Vintage,
}

impl FilterId {
    /// Every preset, in menu order.
    pub const ALL: [FilterId; 4] = [Self::Normal, Self::Warm, Self::Cool, Self::Vintage];

    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Vintage => "vintage",
        }
    }

    /// Built-in effect chain for this preset.
    pub fn preset(self) -> FilterSpec {
        use FilterOp::*;
        let ops = match self {
            Self::Normal => vec![],
            Self::Warm => vec![Brightness(1.1), Contrast(0.9), Saturate(0.9), Sepia(0.2)],
            Self::Cool => vec![Brightness(0.9), Contrast(1.1), Saturate(1.1), Sepia(0.1)],
            Self::Vintage => vec![Saturate(0.7), Contrast(1.2), Sepia(0.5), Brightness(0.9)],
        };
        FilterSpec { ops }
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterId {
    type Err = SnapstripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SnapstripError::validation(format!("unknown filter '{s}'")))
    }
}

/// One color-adjustment operator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterOp {
    /// Multiply color channels.
    Brightness(f32),
    /// Scale channels around mid-gray.
    Contrast(f32),
    /// Scale saturation (0 = gray, 1 = unchanged).
    Saturate(f32),
    /// Blend toward sepia tone, 0..=1.
    Sepia(f32),
    /// Gaussian blur with the given standard deviation in pixels.
    Blur {
        /// Standard deviation in pixels.
        radius_px: f32,
    },
}

impl FilterOp {
    fn color_matrix(self) -> Option<[f32; 20]> {
        match self {
            Self::Brightness(b) => Some([
                b, 0.0, 0.0, 0.0, 0.0, //
                0.0, b, 0.0, 0.0, 0.0, //
                0.0, 0.0, b, 0.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 0.0,
            ]),
            Self::Contrast(c) => {
                let t = 0.5 - 0.5 * c;
                Some([
                    c, 0.0, 0.0, 0.0, t, //
                    0.0, c, 0.0, 0.0, t, //
                    0.0, 0.0, c, 0.0, t, //
                    0.0, 0.0, 0.0, 1.0, 0.0,
                ])
            }
            Self::Saturate(s) => Some([
                0.213 + 0.787 * s,
                0.715 - 0.715 * s,
                0.072 - 0.072 * s,
                0.0,
                0.0,
                0.213 - 0.213 * s,
                0.715 + 0.285 * s,
                0.072 - 0.072 * s,
                0.0,
                0.0,
                0.213 - 0.213 * s,
                0.715 - 0.715 * s,
                0.072 + 0.928 * s,
                0.0,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
                0.0,
            ]),
            Self::Sepia(amount) => {
                let k = 1.0 - amount.clamp(0.0, 1.0);
                Some([
                    0.393 + 0.607 * k,
                    0.769 - 0.769 * k,
                    0.189 - 0.189 * k,
                    0.0,
                    0.0,
                    0.349 - 0.349 * k,
                    0.686 + 0.314 * k,
                    0.168 - 0.168 * k,
                    0.0,
                    0.0,
                    0.272 - 0.272 * k,
                    0.534 - 0.534 * k,
                    0.131 + 0.869 * k,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    1.0,
                    0.0,
                ])
            }
            Self::Blur { .. } => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Brightness(_) => "brightness",
            Self::Contrast(_) => "contrast",
            Self::Saturate(_) => "saturate",
            Self::Sepia(_) => "sepia",
            Self::Blur { .. } => "blur",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Brightness(v) | Self::Contrast(v) | Self::Saturate(v) | Self::Sepia(v) => {
                write!(f, "{}({v})", self.name())
            }
            Self::Blur { radius_px } => write!(f, "blur({radius_px}px)"),
        }
    }
}

/// An ordered chain of [`FilterOp`]s applied to one tile.
///
/// Serialized in CSS filter notation, e.g. `"saturate(0.7) contrast(1.2) sepia(0.5)"`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilterSpec {
    ops: Vec<FilterOp>,
}

impl FilterSpec {
    /// Build a chain from explicit operators.
    pub fn new(ops: Vec<FilterOp>) -> Self {
        Self { ops }
    }

    /// Operators in application order.
    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    /// `true` when applying the chain leaves pixels unchanged.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Parse CSS filter notation. `"none"` and the empty string yield the identity chain.
    pub fn parse(text: &str) -> SnapstripResult<Self> {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("none") {
            return Ok(Self::default());
        }

        let mut ops = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let open = rest
                .find('(')
                .ok_or_else(|| SnapstripError::validation(format!("expected '(' in '{rest}'")))?;
            let close = rest[open..]
                .find(')')
                .map(|i| open + i)
                .ok_or_else(|| SnapstripError::validation(format!("expected ')' in '{rest}'")))?;
            let name = rest[..open].trim().to_ascii_lowercase();
            let arg = rest[open + 1..close].trim();
            ops.push(parse_op(&name, arg)?);
            rest = rest[close + 1..].trim_start();
        }
        Ok(Self { ops })
    }

    /// Apply the chain to a tile in place.
    pub(crate) fn apply(&self, surface: &mut Surface) -> SnapstripResult<()> {
        for op in &self.ops {
            match *op {
                FilterOp::Blur { radius_px } => {
                    GaussianBlur::from_sigma(radius_px).apply(surface)?;
                }
                color_op => {
                    if let Some(m) = color_op.color_matrix() {
                        color_matrix_rgba8_premul_in_place(surface.data_mut(), m);
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return f.write_str("none");
        }
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for FilterSpec {
    type Error = SnapstripError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FilterSpec> for String {
    fn from(spec: FilterSpec) -> Self {
        spec.to_string()
    }
}

fn parse_op(name: &str, arg: &str) -> SnapstripResult<FilterOp> {
    if name == "blur" {
        let px = arg.strip_suffix("px").unwrap_or(arg).trim();
        let radius_px = parse_number(name, px)?;
        if radius_px > MAX_BLUR_SIGMA {
            return Err(SnapstripError::validation(format!(
                "blur() radius must be <= {MAX_BLUR_SIGMA}px"
            )));
        }
        return Ok(FilterOp::Blur { radius_px });
    }

    let value = match arg.strip_suffix('%') {
        Some(pct) => parse_number(name, pct)? / 100.0,
        None => parse_number(name, arg)?,
    };
    match name {
        "brightness" => Ok(FilterOp::Brightness(value)),
        "contrast" => Ok(FilterOp::Contrast(value)),
        "saturate" => Ok(FilterOp::Saturate(value)),
        "sepia" => Ok(FilterOp::Sepia(value)),
        _ => Err(SnapstripError::validation(format!(
            "unknown filter function '{name}'"
        ))),
    }
}

fn parse_number(name: &str, s: &str) -> SnapstripResult<f32> {
    let v: f32 = s
        .trim()
        .parse()
        .map_err(|_| SnapstripError::validation(format!("{name}() expects a number, got '{s}'")))?;
    if !v.is_finite() || v < 0.0 {
        return Err(SnapstripError::validation(format!(
            "{name}() must be finite and >= 0"
        )));
    }
    Ok(v)
}

fn color_matrix_rgba8_premul_in_place(px: &mut [u8], m: [f32; 20]) {
    for d in px.chunks_exact_mut(4) {
        let pa = f32::from(d[3]) / 255.0;
        if pa <= 0.0 {
            continue;
        }

        // premul -> straight
        let r = f32::from(d[0]) / 255.0 / pa;
        let g = f32::from(d[1]) / 255.0 / pa;
        let b = f32::from(d[2]) / 255.0 / pa;

        let out_r = (m[0] * r + m[1] * g + m[2] * b + m[3] * pa + m[4]).clamp(0.0, 1.0);
        let out_g = (m[5] * r + m[6] * g + m[7] * b + m[8] * pa + m[9]).clamp(0.0, 1.0);
        let out_b = (m[10] * r + m[11] * g + m[12] * b + m[13] * pa + m[14]).clamp(0.0, 1.0);
        let out_a = (m[15] * r + m[16] * g + m[17] * b + m[18] * pa + m[19]).clamp(0.0, 1.0);

        d[0] = (out_r * out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        d[1] = (out_g * out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        d[2] = (out_b * out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        d[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
