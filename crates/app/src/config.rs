use std::fs;
use std::path::{Path, PathBuf};

use explainer_core::model::TimingOverrides;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read timing file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid timing file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads timing overrides; no file means no overrides.
pub fn load_overrides(path: Option<&Path>) -> Result<TimingOverrides, ConfigError> {
    let Some(path) = path else {
        return Ok(TimingOverrides::default());
    };
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn missing_path_yields_defaults() {
        let overrides = load_overrides(None).unwrap();
        assert_eq!(overrides, TimingOverrides::default());
    }

    #[test]
    fn reads_partial_overrides() {
        let file = write_config(
            "animation_scale = 0.5\n\n[narrator]\npause_secs = 1.0\n",
        );
        let overrides = load_overrides(Some(file.path())).unwrap();
        assert_eq!(overrides.animation_scale, Some(0.5));
        let narrator = overrides.narrator.expect("narrator section");
        assert_eq!(narrator.pause_secs, Some(1.0));
        assert_eq!(narrator.per_char_secs, None);
        assert!(overrides.view.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[narrator]\ntypo_secs = 1.0\n");
        let err = load_overrides(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = load_overrides(Some(Path::new("/nonexistent/timing.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/timing.toml"));
    }
}
