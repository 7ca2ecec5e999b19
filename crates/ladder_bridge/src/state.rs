//! Shared ladder state and the snapshot handed to readers.

use chrono::{DateTime, Utc};
use shared::domain::{CharacterRecord, LadderMode};

use crate::{error::FetchFailure, model::LadderModel};

/// Loading/error/model state owned by one bridge. Every field is read and
/// written under the bridge's single state lock.
#[derive(Debug, Default)]
pub(crate) struct LadderState {
    pub(crate) generation: u64,
    pub(crate) loading: bool,
    pub(crate) error: Option<FetchFailure>,
    pub(crate) model: LadderModel,
    pub(crate) requested_mode: Option<LadderMode>,
    pub(crate) displayed_mode: Option<LadderMode>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

impl LadderState {
    /// Stamps a new request. Returns its generation and whether a previous
    /// error was cleared.
    pub(crate) fn begin(&mut self, mode: LadderMode) -> (u64, bool) {
        self.generation += 1;
        self.loading = true;
        self.requested_mode = Some(mode);
        let cleared = self.error.take().is_some();
        (self.generation, cleared)
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub(crate) fn apply_success(&mut self, mode: LadderMode, characters: Vec<CharacterRecord>) {
        self.model.replace(characters);
        self.displayed_mode = Some(mode);
        self.updated_at = Some(Utc::now());
        self.error = None;
        self.loading = false;
    }

    pub(crate) fn apply_failure(&mut self, failure: FetchFailure) {
        self.error = Some(failure);
        self.loading = false;
    }

    pub(crate) fn snapshot(&self) -> LadderSnapshot {
        LadderSnapshot {
            generation: self.generation,
            loading: self.loading,
            error: self.error.clone(),
            model: self.model.clone(),
            requested_mode: self.requested_mode.clone(),
            displayed_mode: self.displayed_mode.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Consistent point-in-time view of the bridge, taken in one read.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderSnapshot {
    pub generation: u64,
    pub loading: bool,
    pub error: Option<FetchFailure>,
    pub model: LadderModel,
    /// Mode of the most recently issued request.
    pub requested_mode: Option<LadderMode>,
    /// Mode the model rows belong to.
    pub displayed_mode: Option<LadderMode>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl LadderSnapshot {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn characters(&self) -> &[CharacterRecord] {
        self.model.rows()
    }
}
