//! Bridge configuration.

use std::path::PathBuf;

/// Environment variable that overrides the application base directory.
pub const BASE_DIR_ENV: &str = "BRIDGEFS_BASE_DIR";

/// Configuration shared by all bridge operations.
///
/// # Examples
///
/// ```
/// use bridgefs_core::BridgeConfig;
///
/// let config = BridgeConfig::default()
///     .with_base_dir("/opt/app")
///     .with_preserve_permissions(false);
/// assert!(!config.preserve_permissions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Directory that relative caller paths are resolved against.
    pub base_dir: PathBuf,

    /// Apply the unix permission bits stored in archive entries when
    /// creating extracted files.
    pub preserve_permissions: bool,
}

impl Default for BridgeConfig {
    /// Default values:
    /// - `base_dir`: `.`
    /// - `preserve_permissions`: true
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            preserve_permissions: true,
        }
    }
}

impl BridgeConfig {
    /// Builds a configuration from the process environment.
    ///
    /// The base directory is taken from `BRIDGEFS_BASE_DIR` when set and
    /// non-empty, otherwise the directory of the running executable, otherwise
    /// the current directory.
    #[must_use]
    pub fn from_env() -> Self {
        let base_dir = std::env::var_os(BASE_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(PathBuf::from))
            })
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            base_dir,
            ..Self::default()
        }
    }

    /// Sets the base directory.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Sets whether stored entry permissions are applied.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }
}
