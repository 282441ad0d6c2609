//! Manifest of rendered assets, written next to the images.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::naming::{DotCloudName, WhiteName};
use crate::error::{Result, StimError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experiment {
    Numerosity,
    Whites,
}

impl Experiment {
    pub fn manifest_file_name(self) -> &'static str {
        match self {
            Self::Numerosity => "manifest_numerosity.json",
            Self::Whites => "manifest_whites.json",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetParams {
    DotCloud(DotCloudName),
    White(WhiteName),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub file: String,
    pub params: AssetParams,
}

impl AssetEntry {
    pub fn dot_cloud(name: DotCloudName) -> Self {
        Self {
            file: name.to_string(),
            params: AssetParams::DotCloud(name),
        }
    }

    pub fn white(name: WhiteName) -> Self {
        Self {
            file: name.to_string(),
            params: AssetParams::White(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub experiment: Experiment,
    pub assets: Vec<AssetEntry>,
}

impl Manifest {
    pub fn new(experiment: Experiment) -> Self {
        Self {
            experiment,
            assets: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: AssetEntry) {
        self.assets.push(entry);
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn file_names(&self) -> BTreeSet<&str> {
        self.assets.iter().map(|a| a.file.as_str()).collect()
    }

    pub fn path_in(dir: &Path, experiment: Experiment) -> PathBuf {
        dir.join(experiment.manifest_file_name())
    }

    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = Self::path_in(dir, self.experiment);
        let text = serde_json::to_string_pretty(self)?;
        fs::write(&path, text).map_err(|e| StimError::io(&path, e))?;
        Ok(path)
    }

    /// `Ok(None)` when no manifest has been written for `experiment`.
    pub fn load(dir: &Path, experiment: Experiment) -> Result<Option<Self>> {
        let path = Self::path_in(dir, experiment);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|e| StimError::io(&path, e))?;
        Ok(Some(serde_json::from_str(&text)?))
    }
}
