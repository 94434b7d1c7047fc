//! Snapstrip composes a sequence of booth photos into a tilted photo-strip collage.
//!
//! The pipeline is pure and deterministic:
//!
//! - Build a [`PhotoSequence`] from encoded images
//! - Pick a [`FilterId`] and a [`CollageStyle`]
//! - Run a [`Compositor`] to get a [`CompositeImage`] (JPEG)
//!
//! [`CollageSession`] adds the interactive bits: latest-result tracking, stale-run protection
//! and export.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod encode;
mod foundation;
mod render;
/// Latest-composite session and export.
pub mod session;
/// Collage appearance configuration.
pub mod style;

pub use crate::assets::photo::{CAPTURE_COUNT, PhotoSequence, RawPhoto};
pub use crate::effects::filter::{FilterId, FilterOp, FilterSpec};
pub use crate::effects::pixel::PixelStage;
pub use crate::encode::jpeg::CompositeImage;
pub use crate::foundation::core::{Canvas, Rgba8};
pub use crate::foundation::error::{SnapstripError, SnapstripResult};
pub use crate::render::compositor::Compositor;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::gradient::GradientStop;
pub use crate::render::layout::LayoutGeometry;
pub use crate::render::stamp::{DateLocale, StampFont};
pub use crate::session::{CollageSession, CommitOutcome, ComposeTicket, EXPORT_FILE_NAME};
pub use crate::style::{CollageStyle, ShadowStyle, StampStyle};
