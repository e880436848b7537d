use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use crate::{
    models::artifact::{ArtifactSpec, DownloadOutcome, ProvisioningTarget},
    utils::{
        command::CommandUtils,
        downloader_def::{
            errors::{FetchError, ProvisioningError},
            r#trait::SourceProvider,
        },
    },
};

/// Ensures a set of artifacts exists in a target directory, fetching the
/// missing ones through a [`SourceProvider`].
///
/// Presence of the file name is the only cache key: existing files are never
/// inspected, refreshed or re-downloaded.
pub struct Downloader<P: SourceProvider> {
    provider: P,
    show_progress: bool,
}

impl<P: SourceProvider> Downloader<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Creates `target` if needed, then resolves every spec in order.
    ///
    /// The first failed download aborts the pass; later specs are not attempted.
    pub fn provision(
        &self,
        target: &ProvisioningTarget,
        specs: &[ArtifactSpec],
    ) -> Result<(), ProvisioningError> {
        self.prepare_dir(target)?;

        let mut downloaded = 0;
        let mut present = 0;
        for spec in specs {
            match self.resolve(target, spec) {
                DownloadOutcome::AlreadyPresent => present += 1,
                DownloadOutcome::Downloaded { .. } => downloaded += 1,
                DownloadOutcome::Failed(cause) => {
                    return Err(ProvisioningError::DownloadFailed {
                        file_name: spec.file_name.clone(),
                        cause,
                    });
                }
            }
        }

        info!(
            "Artifacts ready in {}: {} downloaded, {} already present",
            target.path().display(),
            downloaded,
            present
        );
        Ok(())
    }

    fn prepare_dir(&self, target: &ProvisioningTarget) -> Result<(), ProvisioningError> {
        let path = target.path();
        if path.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(path).map_err(|cause| ProvisioningError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            cause,
        })?;
        info!("Created target directory {}", path.display());
        Ok(())
    }

    pub fn resolve(&self, target: &ProvisioningTarget, spec: &ArtifactSpec) -> DownloadOutcome {
        let candidate = target.candidate(spec);
        if candidate.exists() {
            debug!("{} already present, skipping", spec.file_name);
            return DownloadOutcome::AlreadyPresent;
        }

        info!("Downloading {}...", spec.file_name);
        match self.fetch_into(target, spec, &candidate) {
            Ok(DownloadOutcome::Downloaded { bytes }) => {
                info!("Successfully downloaded {} ({} bytes)", spec.file_name, bytes);
                DownloadOutcome::Downloaded { bytes }
            }
            Ok(outcome) => outcome,
            Err(cause) => {
                error!("Failed to download {}: {}", spec.file_name, cause);
                DownloadOutcome::Failed(cause)
            }
        }
    }

    /// Streams into a hidden `.part` file in the target and renames it
    /// into place only once the whole body is on disk. The temp file is
    /// removed on drop, so no error path leaves `candidate` behind.
    fn fetch_into(
        &self,
        target: &ProvisioningTarget,
        spec: &ArtifactSpec,
        candidate: &Path,
    ) -> Result<DownloadOutcome, FetchError> {
        let mut stream = self.provider.open_stream(&spec.url)?;
        let mut part = Self::part_builder().tempfile_in(target.path())?;

        let progress = self.progress_bar(&spec.file_name, stream.content_length);
        let copied = io::copy(&mut progress.wrap_read(&mut stream.reader), &mut part);
        let bytes = match copied {
            Ok(bytes) => {
                progress.finish_and_clear();
                bytes
            }
            Err(err) => {
                progress.abandon();
                return Err(err.into());
            }
        };
        part.flush()?;
        part.as_file().sync_all()?;

        match part.persist_noclobber(candidate) {
            Ok(_) => Ok(DownloadOutcome::Downloaded { bytes }),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                warn!(
                    "{} appeared while downloading, keeping the existing file",
                    spec.file_name
                );
                Ok(DownloadOutcome::AlreadyPresent)
            }
            Err(err) => Err(err.error.into()),
        }
    }

    /// Temp names stay short so any file name the target accepts also fits
    /// as a `.part` file, and the mode follows the umask like a plain create.
    fn part_builder() -> tempfile::Builder<'static, 'static> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(".provision.").suffix(".part");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        builder
    }

    fn progress_bar(&self, file_name: &str, content_length: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let Some(len) = content_length else {
            return CommandUtils::display_loader(format!("Downloading {file_name}"));
        };

        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        ) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message(file_name.to_string());
        bar
    }
}
