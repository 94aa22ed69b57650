//! Configuration management for `libms`.
//!
//! Values come from, in order of precedence:
//! - Command-line flags
//! - Environment variables (read by clap, e.g. `LIBMS_DATA_FILE`)
//! - Built-in defaults

use std::path::PathBuf;

/// Data file used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "library_data.jsonl";

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// Effective configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the book list is loaded from and saved to.
    pub data_file: PathBuf,
    /// Log destination; `None` means stderr.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Merge CLI overrides over the defaults. Empty paths count as unset.
    #[must_use]
    pub fn resolve(overrides: &CliOverrides) -> Self {
        let data_file = non_empty(overrides.data_file.as_ref())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let log_file = non_empty(overrides.log_file.as_ref());

        Self {
            data_file,
            log_file,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(&CliOverrides::default())
    }
}

fn non_empty(path: Option<&PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty()).cloned()
}
