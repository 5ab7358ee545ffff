use std::fmt;

use serde::{Deserialize, Serialize};

/// Recording controller state machine.
///
/// State transitions:
/// ```text
/// idle → streaming → recording ↔ paused
///            ↑           ↓         ↓
///            └──────── stopped ←───┘
/// ```
///
/// `Stopped` ends a session; acquiring a stream again starts the next cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    #[default]
    Idle,
    Streaming,
    Recording,
    Paused,
    Stopped,
}

impl RecordingState {
    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Streaming)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }

    /// A session is live between `start` and `stop`.
    pub fn has_live_session(&self) -> bool {
        matches!(self, Self::Recording | Self::Paused)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Streaming => "streaming",
            Self::Recording => "recording",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
