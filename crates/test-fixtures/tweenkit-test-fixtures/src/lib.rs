//! Shared JSON fixtures for tweenkit tests, listed in `fixtures/manifest.json`.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures/manifest.json should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    timelines: HashMap<String, String>,
    #[serde(default)]
    configs: HashMap<String, ConfigEntry>,
}

/// Config entries are either a bare path or `{ "path": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigEntry {
    Path(String),
    Detailed { path: String },
}

impl ConfigEntry {
    fn path(&self) -> &str {
        match self {
            ConfigEntry::Path(path) | ConfigEntry::Detailed { path } => path,
        }
    }
}

/// Read a manifest-relative file.
fn fixture_text(rel: &str) -> Result<String> {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "../../../fixtures", rel]
        .iter()
        .collect();
    std::fs::read_to_string(&path).with_context(|| format!("reading fixture {}", path.display()))
}

pub mod timelines {
    use super::*;

    /// Names of every stored timeline fixture.
    pub fn keys() -> Vec<String> {
        MANIFEST.timelines.keys().cloned().collect()
    }

    /// Raw JSON of the named timeline, as fed to the stored-timeline parser.
    pub fn json(name: &str) -> Result<String> {
        let rel = MANIFEST
            .timelines
            .get(name)
            .ok_or_else(|| anyhow!("no timeline fixture named '{name}'"))?;
        fixture_text(rel)
    }
}

pub mod configs {
    use super::*;

    /// Deserialize the named config fixture into `T`.
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = MANIFEST
            .configs
            .get(name)
            .ok_or_else(|| anyhow!("no config fixture named '{name}'"))?;
        let text = fixture_text(entry.path())?;
        serde_json::from_str(&text).with_context(|| format!("parsing config fixture '{name}'"))
    }
}
