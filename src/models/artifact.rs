use std::path::{Path, PathBuf};

use crate::utils::downloader_def::errors::FetchError;

/// A file that must exist in the target directory, and where to fetch it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub file_name: String,
    pub url: String,
}

impl ArtifactSpec {
    pub fn new(file_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            url: url.into(),
        }
    }
}

/// Destination root for provisioned artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningTarget {
    path: PathBuf,
}

impl ProvisioningTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn candidate(&self, spec: &ArtifactSpec) -> PathBuf {
        self.path.join(&spec.file_name)
    }
}

/// Result of resolving one artifact during a provisioning pass.
#[derive(Debug)]
pub enum DownloadOutcome {
    AlreadyPresent,
    Downloaded { bytes: u64 },
    Failed(FetchError),
}
