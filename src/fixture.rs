//! Resolve the fixture identity that drives test file compatibility.
//!
//! The fixture id comes from a `config.json` sitting next to the host
//! application's executable; the fixture type comes from a settings file in
//! the settings directory shared by the test station tooling.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::FilterError;

/// Configuration file expected next to the host executable.
pub(crate) const CONFIG_FILE: &str = "config.json";

/// Settings file the deployed tooling ships today, shared by every fixture
/// on the bench.
pub const SHARED_SETTINGS_FILE: &str = "cnctestapplication_settings_14.json";

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "FixtureID")]
    fixture_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(rename = "FixtureType")]
    fixture_type: Option<String>,
}

/// Settings filename a fixture id would select once settings are written per
/// fixture instead of shared.
#[must_use]
pub fn per_fixture_settings_name(fixture_id: &str) -> String {
    format!("cnctestapplication_settings_{fixture_id}.json")
}

/// Read the fixture id from the `config.json` next to `app_path`.
pub(crate) fn load_fixture_id(app_path: &Path) -> Result<String, FilterError> {
    let dir = app_path.parent().unwrap_or_else(|| Path::new(""));
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(FilterError::ConfigNotFound {
                dir: dir.to_path_buf(),
            });
        }
        Err(err) => return Err(FilterError::Io { path, source: err }),
    };
    let raw: RawConfig = serde_json::from_str(&text).map_err(|source| {
        FilterError::ConfigParseError {
            path: path.clone(),
            source,
        }
    })?;
    raw.fixture_id
        .ok_or(FilterError::ConfigFieldMissing { path })
}

/// Read the fixture type from the shared settings file in `settings_dir`.
///
/// The fixture id is accepted but does not pick the filename yet: the
/// deployed tooling writes one shared settings file for the whole bench.
// TODO: read per_fixture_settings_name(fixture_id) once the settings writer
// produces one file per fixture.
pub(crate) fn load_fixture_type(
    settings_dir: &Path,
    _fixture_id: &str,
) -> Result<String, FilterError> {
    let path = settings_dir.join(SHARED_SETTINGS_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(FilterError::SettingsNotFound { path });
        }
        Err(err) => return Err(FilterError::Io { path, source: err }),
    };
    let raw: RawSettings = serde_json::from_str(&text).map_err(|source| {
        FilterError::SettingsParseError {
            path: path.clone(),
            source,
        }
    })?;
    raw.fixture_type
        .ok_or(FilterError::SettingsFieldMissing { path })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn fixture_id_is_read_from_sibling_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{"FixtureID": "7"}"#).unwrap();

        let id = load_fixture_id(&dir.path().join("testapp.exe")).unwrap();

        assert_eq!(id, "7");
    }

    #[test]
    fn missing_config_reports_the_directory() {
        let dir = tempdir().unwrap();

        let err = load_fixture_id(&dir.path().join("testapp.exe")).unwrap_err();

        assert!(matches!(err, FilterError::ConfigNotFound { .. }));
    }

    #[test]
    fn config_without_fixture_id_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{"Station": "A"}"#).unwrap();

        let err = load_fixture_id(&dir.path().join("testapp.exe")).unwrap_err();

        assert!(matches!(err, FilterError::ConfigFieldMissing { .. }));
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();

        let err = load_fixture_id(&dir.path().join("testapp.exe")).unwrap_err();

        assert!(matches!(err, FilterError::ConfigParseError { .. }));
    }

    #[test]
    fn fixture_type_is_read_from_shared_settings() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(SHARED_SETTINGS_FILE),
            r#"{"FixtureType": "rotary"}"#,
        )
        .unwrap();

        let fixture_type = load_fixture_type(dir.path(), "7").unwrap();

        assert_eq!(fixture_type, "rotary");
    }

    #[test]
    fn missing_settings_file_is_reported() {
        let dir = tempdir().unwrap();

        let err = load_fixture_type(dir.path(), "7").unwrap_err();

        assert!(matches!(err, FilterError::SettingsNotFound { .. }));
    }

    #[test]
    fn settings_without_fixture_type_are_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SHARED_SETTINGS_FILE), r#"{"Bench": 2}"#).unwrap();

        let err = load_fixture_type(dir.path(), "7").unwrap_err();

        assert!(matches!(err, FilterError::SettingsFieldMissing { .. }));
    }

    #[test]
    fn per_fixture_name_embeds_the_id() {
        assert_eq!(
            per_fixture_settings_name("14"),
            "cnctestapplication_settings_14.json"
        );
    }
}
