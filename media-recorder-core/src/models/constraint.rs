use serde::{Deserialize, Serialize};

use super::capability::{DeviceCapabilityPair, MediaKind};
use super::error::RecorderError;

/// Camera orientation preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

/// Frame-rate bounds in frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    pub ideal: u32,
    pub max: u32,
}

impl Default for FrameRate {
    fn default() -> Self {
        Self { ideal: 24, max: 24 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSpec {
    pub width: u32,
    pub height: u32,
    pub frame_rate: FrameRate,
    pub facing_mode: FacingMode,
    #[serde(default)]
    pub device_id: Option<String>,
}

impl VideoSpec {
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "video dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.frame_rate.ideal == 0 {
            return Err("ideal frame rate must be positive".into());
        }
        if self.frame_rate.ideal > self.frame_rate.max {
            return Err(format!(
                "ideal frame rate {} exceeds max {}",
                self.frame_rate.ideal, self.frame_rate.max
            ));
        }
        Ok(())
    }
}

impl Default for VideoSpec {
    fn default() -> Self {
        Self {
            width: 854,
            height: 480,
            frame_rate: FrameRate::default(),
            facing_mode: FacingMode::User,
            device_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSpec {
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Whether a media kind is requested, and with which shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "spec")]
pub enum TrackRequest<T> {
    Disabled,
    Enabled(T),
}

impl<T> TrackRequest<T> {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    pub fn spec(&self) -> Option<&T> {
        match self {
            Self::Enabled(spec) => Some(spec),
            Self::Disabled => None,
        }
    }

    fn spec_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Enabled(spec) => Some(spec),
            Self::Disabled => None,
        }
    }
}

/// Desired shape of a capture stream.
///
/// Validated on construction; fields are only reachable through accessors
/// so an invalid constraint can never reach the environment. The only
/// mutation allowed afterwards is re-targeting a device selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureConstraint {
    audio: TrackRequest<AudioSpec>,
    video: TrackRequest<VideoSpec>,
}

impl CaptureConstraint {
    pub fn new(
        audio: TrackRequest<AudioSpec>,
        video: TrackRequest<VideoSpec>,
    ) -> Result<Self, RecorderError> {
        if !audio.is_enabled() && !video.is_enabled() {
            return Err(RecorderError::InvalidConstraint(
                "at least one of audio or video must be requested".into(),
            ));
        }
        if let TrackRequest::Enabled(spec) = &video {
            spec.validate().map_err(RecorderError::InvalidConstraint)?;
        }
        Ok(Self { audio, video })
    }

    /// Seeds a constraint from negotiation: each usable kind is enabled and
    /// pointed at the device the user consented with.
    pub fn from_capabilities(
        pair: &DeviceCapabilityPair,
        video_template: &VideoSpec,
    ) -> Result<Self, RecorderError> {
        let audio = if pair.usable_audio() {
            TrackRequest::Enabled(AudioSpec {
                device_id: pair.audio.device_id.clone(),
            })
        } else {
            TrackRequest::Disabled
        };
        let video = if pair.usable_video() {
            TrackRequest::Enabled(VideoSpec {
                device_id: pair.video.device_id.clone(),
                ..video_template.clone()
            })
        } else {
            TrackRequest::Disabled
        };
        Self::new(audio, video)
    }

    /// Bare request for a single kind, used while probing for consent.
    pub fn probe(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Audio => Self {
                audio: TrackRequest::Enabled(AudioSpec::default()),
                video: TrackRequest::Disabled,
            },
            MediaKind::Video => Self {
                audio: TrackRequest::Disabled,
                video: TrackRequest::Enabled(VideoSpec::default()),
            },
        }
    }

    pub fn audio(&self) -> &TrackRequest<AudioSpec> {
        &self.audio
    }

    pub fn video(&self) -> &TrackRequest<VideoSpec> {
        &self.video
    }

    pub fn is_enabled(&self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Audio => self.audio.is_enabled(),
            MediaKind::Video => self.video.is_enabled(),
        }
    }

    pub fn enabled_kinds(&self) -> Vec<MediaKind> {
        MediaKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }

    pub fn device_selector(&self, kind: MediaKind) -> Option<&str> {
        match kind {
            MediaKind::Audio => self.audio.spec().and_then(|s| s.device_id.as_deref()),
            MediaKind::Video => self.video.spec().and_then(|s| s.device_id.as_deref()),
        }
    }

    /// Points `kind` at another physical device. Fails if the kind was not
    /// negotiated as usable.
    pub fn set_device_selector(
        &mut self,
        kind: MediaKind,
        device_id: impl Into<String>,
    ) -> Result<(), RecorderError> {
        let slot = match kind {
            MediaKind::Audio => self.audio.spec_mut().map(|s| &mut s.device_id),
            MediaKind::Video => self.video.spec_mut().map(|s| &mut s.device_id),
        };
        match slot {
            Some(slot) => {
                *slot = Some(device_id.into());
                Ok(())
            }
            None => Err(RecorderError::TrackUnavailable(kind)),
        }
    }
}
