//! Fetch controller: request lifecycle, generation gating and publishing.

use std::sync::Arc;

use ladder_client::LadderClient;
use parking_lot::RwLock;
use shared::domain::{CharacterRecord, LadderMode};
use tokio::{runtime::Handle, sync::watch};
use tracing::{debug, info, warn};

use crate::{
    error::{BridgeError, FetchFailure},
    model::LadderModel,
    state::{LadderSnapshot, LadderState},
    view::LadderView,
};

struct BridgeInner {
    client: Arc<dyn LadderClient>,
    view: Arc<dyn LadderView>,
    state: RwLock<LadderState>,
    // Mirrors `state.loading` for async waiters.
    loading_tx: watch::Sender<bool>,
}

/// Connects a presentation layer to a [`LadderClient`].
///
/// `request_ladder` never blocks: it flags loading, spawns the fetch onto the
/// backend runtime and returns. Each request is stamped with a generation and
/// only the completion of the latest generation may touch the state, so a
/// slow superseded fetch can never overwrite a newer result.
#[derive(Clone)]
pub struct LadderBridge {
    inner: Arc<BridgeInner>,
    runtime: Handle,
}

impl LadderBridge {
    /// Uses the tokio runtime the caller is running on.
    pub fn new(
        client: Arc<dyn LadderClient>,
        view: Arc<dyn LadderView>,
    ) -> Result<Self, BridgeError> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_handle(client, view, runtime))
    }

    pub fn with_handle(
        client: Arc<dyn LadderClient>,
        view: Arc<dyn LadderView>,
        runtime: Handle,
    ) -> Self {
        let (loading_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(BridgeInner {
                client,
                view,
                state: RwLock::new(LadderState::default()),
                loading_tx,
            }),
            runtime,
        }
    }

    /// Starts fetching the ladder for `mode` and returns the request's
    /// generation. Loading is already visible when this returns.
    pub fn request_ladder(&self, mode: impl Into<LadderMode>) -> u64 {
        let mode = mode.into();
        let generation = self.inner.begin(mode.clone());
        info!(%mode, generation, "ladder requested");

        let inner = Arc::clone(&self.inner);
        self.runtime.spawn(async move {
            inner.run_fetch(generation, mode).await;
        });
        generation
    }

    pub fn snapshot(&self) -> LadderSnapshot {
        self.inner.state.read().snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().loading
    }

    pub fn error(&self) -> Option<FetchFailure> {
        self.inner.state.read().error.clone()
    }

    pub fn model(&self) -> LadderModel {
        self.inner.state.read().model.clone()
    }

    pub fn characters(&self) -> Vec<CharacterRecord> {
        self.inner.state.read().model.rows().to_vec()
    }

    pub fn generation(&self) -> u64 {
        self.inner.state.read().generation
    }

    /// Resolves once no request is outstanding and returns the state at
    /// that point.
    pub async fn wait_idle(&self) -> LadderSnapshot {
        let mut loading = self.inner.loading_tx.subscribe();
        // The sender lives in `inner`, which `self` keeps alive.
        let _ = loading.wait_for(|loading| !*loading).await;
        self.snapshot()
    }
}

impl BridgeInner {
    fn begin(&self, mode: LadderMode) -> u64 {
        let mut state = self.state.write();
        let (generation, cleared_error) = state.begin(mode);
        if cleared_error {
            self.view.set_error(None);
        }
        self.view.set_loading(true);
        self.loading_tx.send_replace(state.loading);
        generation
    }

    async fn run_fetch(&self, generation: u64, mode: LadderMode) {
        // The client runs in its own task so a panic inside it surfaces as a
        // join error instead of leaving the request loading forever.
        let client = Arc::clone(&self.client);
        let fetch_mode = mode.clone();
        let outcome =
            tokio::spawn(async move { client.fetch_characters(&fetch_mode).await }).await;

        let result = match outcome {
            Ok(Ok(characters)) => Ok(characters),
            Ok(Err(err)) => Err(FetchFailure::from_client_error(&mode, &err)),
            Err(err) => Err(FetchFailure::from_join_error(&mode, &err)),
        };
        self.complete(generation, mode, result);
    }

    /// Applies a finished fetch if it still belongs to the latest request.
    /// Returns whether the result was applied.
    fn complete(
        &self,
        generation: u64,
        mode: LadderMode,
        result: Result<Vec<CharacterRecord>, FetchFailure>,
    ) -> bool {
        let mut state = self.state.write();
        if !state.is_current(generation) {
            debug!(
                %mode,
                generation,
                current = state.generation,
                "discarding superseded ladder result"
            );
            return false;
        }

        match result {
            Ok(characters) => {
                let count = characters.len();
                state.apply_success(mode.clone(), characters);
                self.view.replace_characters(&state.model);
                self.view.set_loading(false);
                info!(%mode, generation, count, "ladder updated");
            }
            Err(failure) => {
                warn!(%mode, generation, error = %failure, "ladder fetch failed");
                self.view.set_error(Some(&failure));
                state.apply_failure(failure);
                self.view.set_loading(false);
            }
        }
        self.loading_tx.send_replace(state.loading);
        true
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
