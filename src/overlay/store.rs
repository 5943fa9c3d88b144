use crate::overlay::state::{OverlayPatch, OverlayState};
use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const OVERLAY_STATE_FILE_NAME: &str = "overlay-state.json";
pub const OVERLAY_STATE_KEY: &str = "overlayState";

/// Somewhere the owner can write the full record after each mutation.
pub trait StatePersistence {
    fn save(&self, state: &OverlayState) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved record. Never fails: anything unreadable falls back to
    /// defaults, one field at a time.
    pub fn load(&self) -> OverlayState {
        match self.read_document() {
            Ok(Some(document)) => state_from_document(&document),
            Ok(None) => OverlayState::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring saved overlay state: {e:#}");
                OverlayState::default()
            }
        }
    }

    fn read_document(&self) -> Result<Option<Map<String, Value>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("read overlay state file {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("parse overlay state file {}", self.path.display()))?;
        match value {
            Value::Object(map) => Ok(Some(map)),
            other => Err(anyhow!("expected a JSON object, found {}", kind(&other))),
        }
    }
}

impl StatePersistence for StateStore {
    fn save(&self, state: &OverlayState) -> Result<()> {
        // Other keys in the file belong to someone else; keep them.
        let mut document = self.read_document().ok().flatten().unwrap_or_default();
        document.insert(
            OVERLAY_STATE_KEY.to_string(),
            serde_json::to_value(state).context("serialize overlay state")?,
        );
        let json = serde_json::to_vec_pretty(&Value::Object(document))
            .context("serialize overlay state document")?;
        atomic_write(&self.path, &json)
            .with_context(|| format!("write overlay state file {}", self.path.display()))
    }
}

fn state_from_document(document: &Map<String, Value>) -> OverlayState {
    match document.get(OVERLAY_STATE_KEY) {
        Some(Value::Object(fields)) => OverlayState::default().merge(&lenient_patch(fields)),
        Some(other) => {
            tracing::warn!(
                "saved {OVERLAY_STATE_KEY} is {}, using defaults",
                kind(other)
            );
            OverlayState::default()
        }
        None => OverlayState::default(),
    }
}

/// Each field is decoded on its own so one bad value cannot discard the rest.
fn lenient_patch(fields: &Map<String, Value>) -> OverlayPatch {
    let mut patch = OverlayPatch::default();
    for (key, value) in fields {
        let mut single = Map::new();
        single.insert(key.clone(), value.clone());
        match serde_json::from_value::<OverlayPatch>(Value::Object(single)) {
            Ok(field) => patch.absorb(field),
            Err(e) => tracing::warn!(field = %key, "dropping saved overlay field: {e}"),
        }
    }
    patch
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
