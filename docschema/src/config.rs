use serde::{Deserialize, Serialize};

/// What to do with attributes that have no matching field when loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unknown {
    /// Leave them out of the loaded document.
    #[default]
    Exclude,
    /// Report each of them as a field error.
    Raise,
}

/// Settings shared by every schema of a [`Marshaller`](crate::Marshaller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How deep embedded documents may nest before conversion gives up.
    pub max_depth: usize,
    /// Handling of unknown attributes when loading.
    pub unknown: Unknown,
    /// Leave null values out of dumped documents.
    pub skip_null: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 32,
            skip_null: false,
            unknown: Unknown::Exclude,
        }
    }
}
