use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! key_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

// Selects which ranked ladder to retrieve ("1v1", "hardcore", ...). The
// format is owned by the ladder backend.
key_newtype!(LadderMode);

impl LadderMode {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// One ranked entry of a ladder. Display attributes other than rank and name
/// are optional because not every ladder backend reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub rank: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CharacterRecord {
    pub fn new(rank: u32, name: impl Into<String>) -> Self {
        Self {
            rank,
            name: name.into(),
            class: None,
            level: None,
            experience: None,
            status: None,
        }
    }
}
