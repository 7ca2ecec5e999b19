//! Notifications delivered from the bridge to the UI thread.

use crate::{error::FetchFailure, model::LadderModel};

#[derive(Debug, Clone, PartialEq)]
pub enum LadderEvent {
    LoadingChanged(bool),
    ErrorChanged(Option<FetchFailure>),
    CharactersReplaced(LadderModel),
}

impl LadderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LadderEvent::LoadingChanged(_) => "loading_changed",
            LadderEvent::ErrorChanged(_) => "error_changed",
            LadderEvent::CharactersReplaced(_) => "characters_replaced",
        }
    }
}
