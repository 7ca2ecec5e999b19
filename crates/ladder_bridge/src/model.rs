//! Display-facing ladder collection.
//!
//! `LadderModel` mirrors the list-model shape GUI toolkits bind to: a row
//! count, a row accessor and per-role cell data. It is replaced wholesale on
//! every successful fetch and never patched in place.

use std::sync::Arc;

use shared::domain::CharacterRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterRole {
    Rank,
    Name,
    Class,
    Level,
    Experience,
    Status,
}

impl CharacterRole {
    pub const ALL: [CharacterRole; 6] = [
        CharacterRole::Rank,
        CharacterRole::Name,
        CharacterRole::Class,
        CharacterRole::Level,
        CharacterRole::Experience,
        CharacterRole::Status,
    ];

    /// Property name a presentation layer binds the role to.
    pub fn name(self) -> &'static str {
        match self {
            CharacterRole::Rank => "rank",
            CharacterRole::Name => "name",
            CharacterRole::Class => "class",
            CharacterRole::Level => "level",
            CharacterRole::Experience => "experience",
            CharacterRole::Status => "status",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }
}

/// Ordered characters of the displayed ladder. Cloning shares the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LadderModel {
    rows: Arc<Vec<CharacterRecord>>,
}

impl LadderModel {
    pub fn new(rows: Vec<CharacterRecord>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&CharacterRecord> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[CharacterRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.rows.iter()
    }

    pub fn role_names(&self) -> Vec<(CharacterRole, &'static str)> {
        CharacterRole::ALL
            .into_iter()
            .map(|role| (role, role.name()))
            .collect()
    }

    /// Cell text for `role` at `row`; `None` when the row is out of range or
    /// the backend did not report that attribute.
    pub fn data(&self, row: usize, role: CharacterRole) -> Option<String> {
        let record = self.rows.get(row)?;
        match role {
            CharacterRole::Rank => Some(record.rank.to_string()),
            CharacterRole::Name => Some(record.name.clone()),
            CharacterRole::Class => record.class.clone(),
            CharacterRole::Level => record.level.map(|level| level.to_string()),
            CharacterRole::Experience => record.experience.map(|exp| exp.to_string()),
            CharacterRole::Status => record.status.clone(),
        }
    }

    pub(crate) fn replace(&mut self, rows: Vec<CharacterRecord>) {
        self.rows = Arc::new(rows);
    }
}
