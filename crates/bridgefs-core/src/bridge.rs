//! Bridge surface consumed by the webview frontend.
//!
//! Each call resolves caller paths against the application base directory,
//! logs one line, runs the typed operation and collapses the outcome into a
//! [`FlagResult`]. Archive calls additionally have typed variants that keep
//! the [`ExtractionReport`], since the flag alone cannot tell a clean
//! extraction from one that skipped entries.

use std::path::Path;
use std::path::PathBuf;

use tracing::info;
use tracing::warn;

use crate::BridgeConfig;
use crate::ExtractionReport;
use crate::FlagResult;
use crate::ProgressCallback;
use crate::Result;
use crate::api;
use crate::fileio;
use crate::fileio::IoMode;
use crate::paths::PathResolver;
use crate::report::NoopProgress;
use crate::result::SUCCESS;

/// File-system and archive operations for the frontend.
///
/// # Examples
///
/// ```no_run
/// use bridgefs_core::Bridge;
/// use bridgefs_core::BridgeConfig;
///
/// let bridge = Bridge::new(BridgeConfig::default().with_base_dir("/opt/app"));
/// let result = bridge.unzip_zip_file("data/bundle.zip", "data/bundle");
/// if !result.flag {
///     eprintln!("extraction failed: {}", result.data);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Bridge {
    resolver: PathResolver,
    config: BridgeConfig,
}

impl Bridge {
    /// Creates a bridge using `config`.
    #[must_use]
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            resolver: PathResolver::new(&config.base_dir),
            config,
        }
    }

    /// Creates a bridge configured from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(BridgeConfig::from_env())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Resolves a caller path against the base directory.
    #[must_use]
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.resolver.resolve(path)
    }

    /// Writes a file. `mode` is `"Text"` or `"Binary"` (base64 content).
    pub fn write_file(&self, path: impl AsRef<Path>, content: &str, mode: &str) -> FlagResult {
        let path = path.as_ref();
        info!("WriteFile [{mode}]: {}", path.display());

        let result = mode
            .parse::<IoMode>()
            .and_then(|mode| fileio::write_file(&self.resolve(path), content, mode))
            .map(|()| SUCCESS);
        respond("WriteFile", result)
    }

    /// Reads a file as text or base64.
    pub fn read_file(&self, path: impl AsRef<Path>, mode: &str) -> FlagResult {
        let path = path.as_ref();
        info!("ReadFile [{mode}]: {}", path.display());

        let result = mode
            .parse::<IoMode>()
            .and_then(|mode| fileio::read_file(&self.resolve(path), mode));
        respond("ReadFile", result)
    }

    /// Moves `source` to `target`.
    pub fn move_file(&self, source: impl AsRef<Path>, target: impl AsRef<Path>) -> FlagResult {
        let (source, target) = (source.as_ref(), target.as_ref());
        info!("MoveFile: {} -> {}", source.display(), target.display());

        let result = fileio::move_file(&self.resolve(source), &self.resolve(target));
        respond("MoveFile", result.map(|()| SUCCESS))
    }

    /// Removes a file or directory tree.
    pub fn remove_file(&self, path: impl AsRef<Path>) -> FlagResult {
        let path = path.as_ref();
        info!("RemoveFile: {}", path.display());

        respond(
            "RemoveFile",
            fileio::remove_file(&self.resolve(path)).map(|()| SUCCESS),
        )
    }

    /// Copies `source` to `dest`.
    pub fn copy_file(&self, source: impl AsRef<Path>, dest: impl AsRef<Path>) -> FlagResult {
        let (source, dest) = (source.as_ref(), dest.as_ref());
        info!("CopyFile: {} -> {}", source.display(), dest.display());

        let result = fileio::copy_file(&self.resolve(source), &self.resolve(dest));
        respond("CopyFile", result.map(|_| SUCCESS))
    }

    /// Creates a directory and its parents.
    pub fn make_dir(&self, path: impl AsRef<Path>) -> FlagResult {
        let path = path.as_ref();
        info!("MakeDir: {}", path.display());

        respond(
            "MakeDir",
            fileio::make_dir(&self.resolve(path)).map(|()| SUCCESS),
        )
    }

    /// Lists a directory as `name,size,isDir` records joined by `|`.
    pub fn read_dir(&self, path: impl AsRef<Path>) -> FlagResult {
        let path = path.as_ref();
        info!("ReadDir: {}", path.display());

        respond("ReadDir", fileio::read_dir(&self.resolve(path)))
    }

    /// Returns the resolved absolute form of `path`. Never fails.
    pub fn absolute_path(&self, path: impl AsRef<Path>) -> FlagResult {
        let path = path.as_ref();
        info!("AbsolutePath: {}", path.display());

        FlagResult::success(self.resolver.resolve_display(path))
    }

    /// Reports `"true"` or `"false"`.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> FlagResult {
        let path = path.as_ref();
        info!("FileExists: {}", path.display());

        let result = fileio::file_exists(&self.resolve(path)).map(|exists| exists.to_string());
        respond("FileExists", result)
    }

    /// Extracts a ZIP archive, skipping entries that escape `output`.
    pub fn unzip_zip_file(&self, path: impl AsRef<Path>, output: impl AsRef<Path>) -> FlagResult {
        let result = self.extract_zip(path, output, &mut NoopProgress);
        respond("UnzipZIPFile", result.map(|_| SUCCESS))
    }

    /// Extracts a gzip-compressed TAR archive, skipping entries that escape
    /// `output`.
    pub fn unzip_tar_gz_file(
        &self,
        path: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> FlagResult {
        let result = self.extract_tar_gz(path, output, &mut NoopProgress);
        respond("UnzipTarGZFile", result.map(|_| SUCCESS))
    }

    /// Decompresses a plain gzip file into the file `output`.
    pub fn unzip_gz_file(&self, path: impl AsRef<Path>, output: impl AsRef<Path>) -> FlagResult {
        let result = self.decompress_gz(path, output, &mut NoopProgress);
        respond("UnzipGZFile", result.map(|_| SUCCESS))
    }

    /// Reads an absolute path as text without base-directory resolution.
    pub fn read_external_file(&self, path: impl AsRef<Path>) -> FlagResult {
        let path = path.as_ref();
        info!("ReadExternalFile: {}", path.display());

        respond("ReadExternalFile", fileio::read_file(path, IoMode::Text))
    }

    /// Writes text to an absolute path without base-directory resolution.
    pub fn write_external_file(&self, path: impl AsRef<Path>, content: &str) -> FlagResult {
        let path = path.as_ref();
        info!("WriteExternalFile: {}", path.display());

        let result = fileio::write_file(path, content, IoMode::Text).map(|()| SUCCESS);
        respond("WriteExternalFile", result)
    }

    /// Typed form of [`unzip_zip_file`](Self::unzip_zip_file).
    ///
    /// # Errors
    ///
    /// See [`api::extract_zip`].
    pub fn extract_zip(
        &self,
        path: impl AsRef<Path>,
        output: impl AsRef<Path>,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let (path, output) = (path.as_ref(), output.as_ref());
        info!("UnzipZIPFile: {} -> {}", path.display(), output.display());

        api::extract_zip_with_progress(
            self.resolve(path),
            self.resolve(output),
            &self.config,
            progress,
        )
    }

    /// Typed form of [`unzip_tar_gz_file`](Self::unzip_tar_gz_file).
    ///
    /// # Errors
    ///
    /// See [`api::extract_tar_gz`].
    pub fn extract_tar_gz(
        &self,
        path: impl AsRef<Path>,
        output: impl AsRef<Path>,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let (path, output) = (path.as_ref(), output.as_ref());
        info!("UnzipTarGZFile: {} -> {}", path.display(), output.display());

        api::extract_tar_gz_with_progress(
            self.resolve(path),
            self.resolve(output),
            &self.config,
            progress,
        )
    }

    /// Typed form of [`unzip_gz_file`](Self::unzip_gz_file).
    ///
    /// # Errors
    ///
    /// See [`api::decompress_gz`].
    pub fn decompress_gz(
        &self,
        path: impl AsRef<Path>,
        output: impl AsRef<Path>,
        progress: &mut dyn ProgressCallback,
    ) -> Result<u64> {
        let (path, output) = (path.as_ref(), output.as_ref());
        info!("UnzipGZFile: {} -> {}", path.display(), output.display());

        api::decompress_gz_with_progress(self.resolve(path), self.resolve(output), progress)
    }
}

fn respond<T: Into<String>>(operation: &'static str, result: Result<T>) -> FlagResult {
    if let Err(e) = &result {
        warn!(operation, error = %e, "bridge call failed");
    }
    FlagResult::from_result(result)
}
