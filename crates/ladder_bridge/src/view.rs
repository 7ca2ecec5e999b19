//! Publishing interface between the bridge and a presentation layer.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::{error::FetchFailure, events::LadderEvent, model::LadderModel};

/// Receives the bridge's observable properties as they change.
///
/// Calls are made while the bridge holds its state lock, in the same order
/// the state changes. Implementations must return quickly and must not call
/// back into the bridge.
pub trait LadderView: Send + Sync {
    fn set_loading(&self, loading: bool);
    fn set_error(&self, error: Option<&FetchFailure>);
    /// The whole list was replaced; there are no incremental updates.
    fn replace_characters(&self, model: &LadderModel);
}

/// View for front ends that only poll snapshots.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl LadderView for NullView {
    fn set_loading(&self, _loading: bool) {}

    fn set_error(&self, _error: Option<&FetchFailure>) {}

    fn replace_characters(&self, _model: &LadderModel) {}
}

/// Forwards notifications as [`LadderEvent`]s to a UI thread that drains the
/// paired receiver once per frame.
#[derive(Debug, Clone)]
pub struct ChannelView {
    tx: Sender<LadderEvent>,
}

impl ChannelView {
    pub fn new(tx: Sender<LadderEvent>) -> Self {
        Self { tx }
    }

    pub fn bounded(capacity: usize) -> (Self, Receiver<LadderEvent>) {
        let (tx, rx) = bounded(capacity);
        (Self::new(tx), rx)
    }

    fn emit(&self, event: LadderEvent) {
        let name = event.name();
        match self.tx.try_send(event) {
            Ok(()) => tracing::trace!(event = name, "queued ladder event"),
            // The snapshot stays authoritative, so a lagging UI only loses
            // intermediate notifications.
            Err(TrySendError::Full(_)) => {
                tracing::warn!(event = name, "ladder event queue is full; dropping event");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!(event = name, "ladder event receiver dropped");
            }
        }
    }
}

impl LadderView for ChannelView {
    fn set_loading(&self, loading: bool) {
        self.emit(LadderEvent::LoadingChanged(loading));
    }

    fn set_error(&self, error: Option<&FetchFailure>) {
        self.emit(LadderEvent::ErrorChanged(error.cloned()));
    }

    fn replace_characters(&self, model: &LadderModel) {
        self.emit(LadderEvent::CharactersReplaced(model.clone()));
    }
}
