use serde::Serialize;

use super::elapsed::format_elapsed;
use super::state::RecordingState;
use crate::storage::artifact_registry::ArtifactHandle;

/// What the presentation layer needs to render the recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: RecordingState,
    pub elapsed_seconds: u64,
    pub elapsed_display: String,
    pub artifact: Option<ArtifactHandle>,
}

impl SessionSnapshot {
    pub fn new(state: RecordingState, elapsed_seconds: u64, artifact: Option<ArtifactHandle>) -> Self {
        Self {
            state,
            elapsed_seconds,
            elapsed_display: format_elapsed(elapsed_seconds),
            artifact,
        }
    }
}
