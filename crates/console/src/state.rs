//! Operator state that outlives a single invocation, such as the selected
//! facility. Loaded at startup and saved whenever it changes.

use {
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    simulator::Address,
    std::{io, path::PathBuf},
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct State {
    pub selected_facility: Option<Address>,
}

/// A key-value store for the operator [`State`].
pub trait Store {
    /// Loads the persisted state, or the default state if nothing was saved
    /// yet.
    fn load(&self) -> Result<State>;

    fn save(&self, state: &State) -> Result<()>;
}

/// Stores the state as a JSON document in a file.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Store for JsonFile {
    fn load(&self) -> Result<State> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "no saved state, using defaults");
                return Ok(State::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read state {:?}", self.path));
            }
        };
        serde_json::from_str(&data).with_context(|| format!("malformed state {:?}", self.path))
    }

    fn save(&self, state: &State) -> Result<()> {
        let data = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, data)
            .with_context(|| format!("failed to write state {:?}", self.path))?;
        tracing::debug!(path = ?self.path, ?state, "saved state");
        Ok(())
    }
}
