use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while building a [`FilterSelector`](crate::FilterSelector)
/// or toggling its selection.
///
/// Configuration and settings failures are fatal to construction; the caller
/// never obtains a usable instance. Per-file parse failures during the scan
/// are not represented here because they are skipped with a diagnostic.
#[derive(Debug, Error)]
pub enum FilterError {
    /// No `config.json` exists next to the application executable.
    #[error("unable to find config.json in {}", .dir.display())]
    ConfigNotFound { dir: PathBuf },

    /// `config.json` parsed but does not define `FixtureID`.
    #[error("unable to find FixtureID in {}", .path.display())]
    ConfigFieldMissing { path: PathBuf },

    /// `config.json` is not valid JSON.
    #[error("cannot load {} as JSON", .path.display())]
    ConfigParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings file for the active fixture does not exist.
    #[error("unable to find settings file {}", .path.display())]
    SettingsNotFound { path: PathBuf },

    /// The settings file parsed but does not define `FixtureType`.
    #[error("unable to find FixtureType in {}", .path.display())]
    SettingsFieldMissing { path: PathBuf },

    /// The settings file is not valid JSON.
    #[error("cannot load {} as JSON", .path.display())]
    SettingsParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A toggle referenced a category index outside the discovered list.
    #[error("category index {index} is out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A config or settings file exists but could not be read.
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
