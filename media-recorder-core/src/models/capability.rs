use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::RecorderError;

/// Kind of capture hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Audio, MediaKind::Video];
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => f.write_str("audio"),
            Self::Video => f.write_str("video"),
        }
    }
}

/// What negotiation learned about one media kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCapability {
    pub exists: bool,
    pub has_permission: bool,
    pub device_id: Option<String>,
}

impl DeviceCapability {
    pub fn granted(device_id: impl Into<String>) -> Self {
        Self {
            exists: true,
            has_permission: true,
            device_id: Some(device_id.into()),
        }
    }

    pub fn denied() -> Self {
        Self {
            exists: true,
            has_permission: false,
            device_id: None,
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    /// A kind may be requested only if the hardware exists and the user allowed it.
    pub fn is_usable(&self) -> bool {
        self.exists && self.has_permission
    }
}

/// Audio and video capabilities, resolved together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapabilityPair {
    pub audio: DeviceCapability,
    pub video: DeviceCapability,
}

impl DeviceCapabilityPair {
    pub fn get(&self, kind: MediaKind) -> &DeviceCapability {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }

    pub fn usable_audio(&self) -> bool {
        self.audio.is_usable()
    }

    pub fn usable_video(&self) -> bool {
        self.video.is_usable()
    }
}

/// A capture device as listed by the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub kind: MediaKind,
    pub label: String,
    pub device_id: String,
}

/// Entry for a device selector, with the negotiated device pre-selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectableDevice {
    #[serde(flatten)]
    pub device: DeviceInfo,
    pub selected: bool,
}

/// Classification of a [`DeviceCapabilityPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionOutcome {
    Granted,
    NoDeviceAtAll,
    NoPermissionForEither,
    VideoOnlyNoAudio,
}

impl PermissionOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// The negotiation error matching a blocking outcome.
    pub fn error(&self) -> Option<RecorderError> {
        match self {
            Self::Granted => None,
            Self::NoDeviceAtAll => Some(RecorderError::NoDeviceAtAll),
            Self::NoPermissionForEither => Some(RecorderError::NoPermissionForEither),
            Self::VideoOnlyNoAudio => Some(RecorderError::VideoOnlyNoAudio),
        }
    }

    /// Text shown to the user when the recording path is disabled.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Granted => None,
            Self::NoDeviceAtAll => Some(concat!(
                "No audio or video recording device was detected. ",
                "You can still upload a video you recorded yourself."
            )),
            Self::NoPermissionForEither => Some(concat!(
                "You did not allow the use of your microphone or your camera. ",
                "You can still upload a video you recorded yourself."
            )),
            Self::VideoOnlyNoAudio => Some(concat!(
                "A video cannot be recorded without sound; please allow the use of your microphone. ",
                "You can still upload a video you recorded yourself."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_requires_existence_and_permission() {
        assert!(DeviceCapability::granted("mic-1").is_usable());
        assert!(!DeviceCapability::denied().is_usable());
        assert!(!DeviceCapability::absent().is_usable());
    }

    #[test]
    fn capability_serializes_camel_case() {
        let json = serde_json::to_value(DeviceCapability::granted("cam-0")).unwrap();
        assert_eq!(json["hasPermission"], true);
        assert_eq!(json["deviceId"], "cam-0");
    }

    #[test]
    fn blocking_outcomes_map_to_errors() {
        assert_eq!(PermissionOutcome::Granted.error(), None);
        assert_eq!(
            PermissionOutcome::VideoOnlyNoAudio.error(),
            Some(RecorderError::VideoOnlyNoAudio)
        );
    }

    #[test]
    fn only_blocking_outcomes_have_messages() {
        assert!(PermissionOutcome::Granted.user_message().is_none());
        assert!(PermissionOutcome::VideoOnlyNoAudio
            .user_message()
            .unwrap()
            .contains("microphone"));
    }
}
