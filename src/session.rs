//! Latest-result holder for interactive use.
//!
//! A [`CollageSession`] wraps a [`Compositor`] and keeps the newest committed composite. Every
//! compose request takes a [`ComposeTicket`]; a result is only stored if no newer ticket was
//! issued in the meantime, so a slow run that finishes late never overwrites a newer one.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use chrono::NaiveDate;

use crate::assets::photo::PhotoSequence;
use crate::effects::filter::FilterId;
use crate::encode::jpeg::CompositeImage;
use crate::foundation::error::{SnapstripError, SnapstripResult};
use crate::render::compositor::Compositor;

/// File name used by [`CollageSession::export_to`].
pub const EXPORT_FILE_NAME: &str = "kawaii-photo-booth.jpg";

/// Proof that a compose request was started; carries its generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposeTicket {
    generation: u64,
}

impl ComposeTicket {
    /// Generation number, increasing per [`CollageSession::begin`].
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a finished compose run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The result is now the latest composite.
    Committed,
    /// A newer request was started; the result was dropped.
    Stale,
    /// The run had no photos; the previous composite is kept.
    Empty,
}

/// Holds the latest composite and guards it against stale completions.
#[derive(Debug)]
pub struct CollageSession {
    compositor: Compositor,
    generation: AtomicU64,
    latest: Mutex<Option<Arc<CompositeImage>>>,
}

impl CollageSession {
    /// Start an empty session.
    pub fn new(compositor: Compositor) -> Self {
        Self {
            compositor,
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// The compositor used by [`CollageSession::run`].
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Issue a ticket for a new request. All earlier tickets become stale.
    pub fn begin(&self) -> ComposeTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        ComposeTicket { generation }
    }

    /// Store `result` if `ticket` is still the newest.
    pub fn commit(&self, ticket: ComposeTicket, result: Option<CompositeImage>) -> CommitOutcome {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.generation.load(Ordering::Acquire);
        if ticket.generation != current {
            tracing::warn!(
                ticket = ticket.generation,
                current,
                "dropping stale composite"
            );
            return CommitOutcome::Stale;
        }
        match result {
            Some(image) => {
                *latest = Some(Arc::new(image));
                CommitOutcome::Committed
            }
            None => CommitOutcome::Empty,
        }
    }

    /// Compose under `ticket` and commit the result.
    ///
    /// On error nothing is committed and the previous composite stays visible.
    pub fn run(
        &self,
        ticket: ComposeTicket,
        photos: &PhotoSequence,
        filter: FilterId,
        date: NaiveDate,
    ) -> SnapstripResult<CommitOutcome> {
        let result = self.compositor.compose(photos, filter, date)?;
        Ok(self.commit(ticket, result))
    }

    /// Start and run a request in one step.
    pub fn recompose(
        &self,
        photos: &PhotoSequence,
        filter: FilterId,
        date: NaiveDate,
    ) -> SnapstripResult<CommitOutcome> {
        let ticket = self.begin();
        self.run(ticket, photos, filter, date)
    }

    /// [`CollageSession::recompose`] stamped with today's local date.
    pub fn recompose_today(
        &self,
        photos: &PhotoSequence,
        filter: FilterId,
    ) -> SnapstripResult<CommitOutcome> {
        self.recompose(photos, filter, chrono::Local::now().date_naive())
    }

    /// Latest committed composite, if any.
    pub fn latest(&self) -> Option<Arc<CompositeImage>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write the latest composite to `dir/kawaii-photo-booth.jpg`.
    pub fn export_to(&self, dir: &Path) -> SnapstripResult<PathBuf> {
        let image = self
            .latest()
            .ok_or_else(|| SnapstripError::validation("nothing to export yet"))?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create export dir '{}'", dir.display()))?;
        let path = dir.join(EXPORT_FILE_NAME);
        std::fs::write(&path, image.bytes())
            .with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = image.bytes().len(), "exported collage");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
