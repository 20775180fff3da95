//! Lifetime of exported asset files
//!
//! Every dataset label maps to one asset path, overwritten on each rebuild.
//! [`AssetStore`] remembers which paths were written and, depending on the
//! [`RetentionPolicy`], deletes them when their layer goes away.

use crate::error::IoError;
use glyphview_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What happens to an asset once nothing displays it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Leave every asset on disk
    KeepAll,
    /// Delete a label's asset when it is released
    #[default]
    DeleteOnRelease,
}

/// Registry of written assets keyed by dataset label
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    policy: RetentionPolicy,
    assets: BTreeMap<String, PathBuf>,
}

fn remove_asset(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

impl AssetStore {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            policy,
            assets: BTreeMap::new(),
        }
    }

    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Remember that `label`'s asset now lives at `path`.
    ///
    /// If the label previously pointed elsewhere, the old file is released
    /// under the current policy. A path already owned by another label is
    /// refused, since releasing either label would delete the other's asset.
    pub fn record<S: Into<String>>(&mut self, label: S, path: PathBuf) -> Result<()> {
        let label = label.into();
        if let Some(owner) = self.owner(&path) {
            if owner != label {
                return Err(IoError::PathConflict {
                    path,
                    owner: owner.to_string(),
                    label,
                }
                .into());
            }
        }

        if let Some(previous) = self.assets.insert(label, path.clone()) {
            if previous != path && self.policy == RetentionPolicy::DeleteOnRelease {
                remove_asset(&previous)?;
            }
        }
        Ok(())
    }

    /// Path last recorded for `label`
    pub fn path(&self, label: &str) -> Option<&Path> {
        self.assets.get(label).map(PathBuf::as_path)
    }

    /// Label whose asset was recorded at `path`
    pub fn owner(&self, path: &Path) -> Option<&str> {
        self.assets
            .iter()
            .find(|(_, recorded)| recorded.as_path() == path)
            .map(|(label, _)| label.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    /// Forget `label`, deleting its file under [`RetentionPolicy::DeleteOnRelease`].
    ///
    /// Returns the path that was deleted, if any.
    pub fn release(&mut self, label: &str) -> Result<Option<PathBuf>> {
        let Some(path) = self.assets.remove(label) else {
            return Ok(None);
        };
        match self.policy {
            RetentionPolicy::KeepAll => Ok(None),
            RetentionPolicy::DeleteOnRelease => {
                if remove_asset(&path)? {
                    tracing::debug!(label, path = %path.display(), "deleted released asset");
                    Ok(Some(path))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Release every label except those in `keep`
    pub fn release_except(&mut self, keep: &[&str]) -> Result<Vec<PathBuf>> {
        let stale: Vec<String> = self
            .assets
            .keys()
            .filter(|label| !keep.contains(&label.as_str()))
            .cloned()
            .collect();

        let mut removed = Vec::new();
        for label in stale {
            if let Some(path) = self.release(&label)? {
                removed.push(path);
            }
        }
        Ok(removed)
    }
}
