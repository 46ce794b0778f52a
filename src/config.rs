//! Picker settings, read from a TOML file and overridden from the command line.

use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Tunable behaviour of a selection session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Re-sort the filtered rows by the first column after every filter pass.
    pub sort_by_first_column: bool,
    /// Stretch the dialog across the whole terminal width.
    pub span_all_screens: bool,
    /// Cells added to each column's content width.
    pub column_padding: u16,
    /// Empty rows kept below the last record.
    pub row_slack: u16,
    /// Horizontal scroll step for Left/Right.
    pub scroll_step: u16,
    /// Horizontal scroll step for Shift+Left/Shift+Right.
    pub scroll_step_large: u16,
    /// Two clicks on one row within this window count as a double-click.
    pub double_click_ms: u64,
    /// Log level name (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sort_by_first_column: false,
            span_all_screens: false,
            column_padding: 2,
            row_slack: 1,
            scroll_step: 4,
            scroll_step_large: 20,
            double_click_ms: 400,
            log_level: None,
        }
    }
}

impl Settings {
    /// Location of the per-user settings file, if the platform has one.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "bim-picker").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load settings from `path`, or from [`Settings::default_path`] when
    /// `path` is `None`. A missing default file yields the defaults; a
    /// missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Settings::from_toml("").ok(), Some(Settings::default()));
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let settings = Settings::from_toml("sort_by_first_column = true\nscroll_step = 8\n")
            .unwrap_or_default();
        assert!(settings.sort_by_first_column);
        assert_eq!(settings.scroll_step, 8);
        assert_eq!(settings.scroll_step_large, Settings::default().scroll_step_large);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml("sort_by_first_colum = true").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Settings::load(Some(&missing)),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn load_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "span_all_screens = true").expect("write");
        writeln!(file, "log_level = \"debug\"").expect("write");
        let settings = Settings::load(Some(file.path())).expect("load");
        assert!(settings.span_all_screens);
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_toml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "column_padding = \"wide\"").expect("write");
        let err = Settings::load(Some(file.path())).expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
