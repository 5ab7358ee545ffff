use thiserror::Error;

use super::capability::MediaKind;
use super::state::RecordingState;

/// Errors reported by the capture environment.
///
/// The negotiator only distinguishes denial from everything else: a
/// `PermissionDenied` means the hardware exists but the user refused it,
/// any other variant is treated as "no device".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("device not found")]
    DeviceNotFound,

    #[error("stream has no {0} track")]
    TrackNotFound(MediaKind),

    #[error("recorder failed: {0}")]
    RecorderFailed(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl CaptureError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

/// Errors surfaced by the negotiator and the recording controller.
///
/// None of these are fatal: negotiation errors disable the recording path
/// for that attempt, everything else leaves the controller state unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("no audio or video capture device was detected")]
    NoDeviceAtAll,

    #[error("permission to use the microphone and the camera was refused")]
    NoPermissionForEither,

    #[error("video cannot be recorded without audio; allow microphone access")]
    VideoOnlyNoAudio,

    #[error("capture stream unavailable: {0}")]
    StreamUnavailable(CaptureError),

    #[error("recorder unavailable: {0}")]
    RecorderUnavailable(CaptureError),

    #[error("no active capture stream")]
    NoActiveStream,

    #[error("no active recording session")]
    NoActiveSession,

    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        state: RecordingState,
        operation: &'static str,
    },

    #[error("{0} track unavailable")]
    TrackUnavailable(MediaKind),

    #[error("invalid capture constraint: {0}")]
    InvalidConstraint(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl RecorderError {
    /// Whether the user can retry the same operation after fixing the
    /// environment (reconnecting a device, closing another app).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::StreamUnavailable(_) | Self::RecorderUnavailable(_))
    }

    /// Whether this error came out of permission negotiation.
    pub fn is_negotiation_failure(&self) -> bool {
        matches!(
            self,
            Self::NoDeviceAtAll | Self::NoPermissionForEither | Self::VideoOnlyNoAudio
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message_names_state_and_operation() {
        let err = RecorderError::InvalidTransition {
            state: RecordingState::Paused,
            operation: "pause",
        };
        assert_eq!(err.to_string(), "cannot pause while paused");
    }

    #[test]
    fn only_acquisition_failures_are_recoverable() {
        assert!(RecorderError::StreamUnavailable(CaptureError::DeviceNotFound).is_recoverable());
        assert!(!RecorderError::NoActiveStream.is_recoverable());
        assert!(!RecorderError::VideoOnlyNoAudio.is_recoverable());
        assert!(RecorderError::VideoOnlyNoAudio.is_negotiation_failure());
    }
}
