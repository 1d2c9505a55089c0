//! Error types for scene operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, writing or applying scenes.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No factory scene, user scene or file by that name
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// Parameter id not in the table
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Chain stage name not recognised
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    /// Waveform name not recognised
    #[error("unknown wave: {0}")]
    UnknownWave(String),

    /// LFO target name not recognised
    #[error("unknown LFO target: {0}")]
    UnknownLfoTarget(String),

    /// Note division label not recognised
    #[error("unknown note division: {0}")]
    UnknownDivision(String),

    /// Voice or sequencer slot out of range
    #[error("{what} index {index} out of range (max {max})")]
    OutOfRange {
        /// What was indexed.
        what: &'static str,
        /// Index given.
        index: usize,
        /// Largest valid index.
        max: usize,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
        assert!(err.source().is_some(), "ReadFile must expose I/O source");
    }

    #[test]
    fn write_file_display() {
        let err = ConfigError::write_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to write file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
    }

    #[test]
    fn create_dir_display() {
        let err = ConfigError::create_dir("/a/b", mock_io_err());
        assert!(err.to_string().contains("failed to create directory"));
    }

    #[test]
    fn name_errors_display() {
        assert_eq!(
            ConfigError::SceneNotFound("dusk".into()).to_string(),
            "scene not found: dusk"
        );
        assert_eq!(
            ConfigError::UnknownParameter("ring_frq".into()).to_string(),
            "unknown parameter: ring_frq"
        );
        assert_eq!(
            ConfigError::UnknownStage("reverb".into()).to_string(),
            "unknown stage: reverb"
        );
        let err = ConfigError::OutOfRange {
            what: "voice",
            index: 5,
            max: 2,
        };
        assert_eq!(err.to_string(), "voice index 5 out of range (max 2)");
        assert!(err.source().is_none());
    }
}
