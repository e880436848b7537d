use std::path::PathBuf;

use thiserror::Error;

/// Failure while fetching a single artifact from its remote source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote returned status {status}")]
    Status { status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal errors of a provisioning pass. Either one aborts the whole pass.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("could not create target directory {}: {cause}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("failed to download {file_name}: {cause}")]
    DownloadFailed {
        file_name: String,
        #[source]
        cause: FetchError,
    },
}

impl ProvisioningError {
    /// Name of the artifact that failed, if the failure is artifact specific.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::DirectoryCreationFailed { .. } => None,
            Self::DownloadFailed { file_name, .. } => Some(file_name),
        }
    }
}
