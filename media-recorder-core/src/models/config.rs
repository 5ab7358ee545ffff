use serde::{Deserialize, Serialize};

use super::artifact::ContainerType;
use super::constraint::VideoSpec;
use super::error::RecorderError;

/// Configuration for a recording controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecorderConfig {
    /// Container the recorder encodes into (default: WebM).
    pub container: ContainerType,

    /// Suggested filename without extension (default: "RecordedVideo").
    pub file_stem: String,

    /// Video shape used when seeding the capture constraint.
    pub video: VideoSpec,

    /// Stop automatically once this many seconds were recorded (None = unlimited).
    pub max_duration_secs: Option<u64>,
}

impl RecorderConfig {
    pub fn validate(&self) -> Result<(), RecorderError> {
        if self.file_stem.trim().is_empty() {
            return Err(RecorderError::InvalidConfiguration(
                "file stem must not be empty".into(),
            ));
        }
        if self.file_stem.contains(['/', '\\']) {
            return Err(RecorderError::InvalidConfiguration(format!(
                "file stem must not contain path separators: {}",
                self.file_stem
            )));
        }
        if self.max_duration_secs == Some(0) {
            return Err(RecorderError::InvalidConfiguration(
                "max duration must be positive".into(),
            ));
        }
        self.video
            .validate()
            .map_err(RecorderError::InvalidConfiguration)
    }

    pub fn from_json(json: &str) -> Result<Self, RecorderError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            RecorderError::InvalidConfiguration(format!("failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn suggested_filename(&self) -> String {
        format!("{}.{}", self.file_stem, self.container.extension())
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            container: ContainerType::Webm,
            file_stem: "RecordedVideo".into(),
            video: VideoSpec::default(),
            max_duration_secs: None,
        }
    }
}
