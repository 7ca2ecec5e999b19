use serde::{Deserialize, Serialize};

use crate::domain::CharacterRecord;

/// Ladder payload as served by the backend. Older deployments return a bare
/// array, newer ones wrap it in an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LadderResponse {
    Bare(Vec<CharacterRecord>),
    Envelope { characters: Vec<CharacterRecord> },
}

impl LadderResponse {
    pub fn into_characters(self) -> Vec<CharacterRecord> {
        match self {
            Self::Bare(characters) | Self::Envelope { characters } => characters,
        }
    }
}
