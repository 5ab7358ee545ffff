use std::sync::Arc;

use crate::models::capability::{
    DeviceCapability, DeviceCapabilityPair, MediaKind, PermissionOutcome, SelectableDevice,
};
use crate::models::constraint::{CaptureConstraint, VideoSpec};
use crate::models::error::{CaptureError, RecorderError};
use crate::traits::capture_environment::CaptureEnvironment;

/// Classify a capability pair. First matching rule wins:
///
/// 1. neither kind exists → `NoDeviceAtAll`
/// 2. neither kind is permitted → `NoPermissionForEither`
/// 3. video permitted but audio refused → `VideoOnlyNoAudio`
/// 4. otherwise → `Granted`
///
/// Rule 3 keeps the product from ever recording forced-silent video.
pub fn classify(pair: &DeviceCapabilityPair) -> PermissionOutcome {
    let (audio, video) = (&pair.audio, &pair.video);
    if !audio.exists && !video.exists {
        PermissionOutcome::NoDeviceAtAll
    } else if !audio.has_permission && !video.has_permission {
        PermissionOutcome::NoPermissionForEither
    } else if !audio.has_permission && video.has_permission {
        PermissionOutcome::VideoOnlyNoAudio
    } else {
        PermissionOutcome::Granted
    }
}

/// Result of a granted negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedCapabilities {
    pub pair: DeviceCapabilityPair,
    pub usable_audio: bool,
    pub usable_video: bool,
}

impl NegotiatedCapabilities {
    /// Initial capture constraint: usable kinds only, each bound to the
    /// device the user consented with.
    pub fn constraint(&self, video_template: &VideoSpec) -> Result<CaptureConstraint, RecorderError> {
        CaptureConstraint::from_capabilities(&self.pair, video_template)
    }
}

/// Determines, once per startup, which media kinds exist and are permitted.
pub struct CapabilityNegotiator<E: CaptureEnvironment> {
    environment: Arc<E>,
}

impl<E: CaptureEnvironment> CapabilityNegotiator<E> {
    pub fn new(environment: Arc<E>) -> Self {
        Self { environment }
    }

    /// Probe audio and video concurrently. Resolves only once both probes
    /// have completed.
    pub async fn negotiate(&self) -> DeviceCapabilityPair {
        let (audio, video) = futures::join!(
            self.probe(MediaKind::Audio),
            self.probe(MediaKind::Video)
        );
        log::info!(
            "Negotiated capabilities: audio(exists={}, permitted={}) video(exists={}, permitted={})",
            audio.exists,
            audio.has_permission,
            video.exists,
            video.has_permission
        );
        DeviceCapabilityPair { audio, video }
    }

    /// Negotiate and classify. Any outcome other than `Granted` becomes the
    /// matching negotiation error.
    pub async fn negotiate_and_classify(&self) -> Result<NegotiatedCapabilities, RecorderError> {
        let pair = self.negotiate().await;
        let outcome = classify(&pair);
        if let Some(error) = outcome.error() {
            log::warn!("Recording disabled: {}", error);
            return Err(error);
        }
        Ok(NegotiatedCapabilities {
            usable_audio: pair.usable_audio(),
            usable_video: pair.usable_video(),
            pair,
        })
    }

    /// Request a single kind and interpret the answer. The probe stream is
    /// released as soon as its device id has been read.
    pub async fn probe(&self, kind: MediaKind) -> DeviceCapability {
        match self
            .environment
            .request_stream(&CaptureConstraint::probe(kind))
            .await
        {
            Ok(mut stream) => {
                let device_id = stream.device_id(kind);
                stream.stop();
                DeviceCapability {
                    exists: true,
                    has_permission: true,
                    device_id,
                }
            }
            Err(e) if e.is_permission_denied() => {
                log::debug!("{} probe denied", kind);
                DeviceCapability::denied()
            }
            Err(e) => {
                log::debug!("{} probe found no device: {}", kind, e);
                DeviceCapability::absent()
            }
        }
    }

    /// Devices to offer in the selectors: usable kinds only, with the
    /// negotiated device marked as selected.
    pub async fn selectable_devices(
        &self,
        pair: &DeviceCapabilityPair,
    ) -> Result<Vec<SelectableDevice>, CaptureError> {
        let devices = self.environment.enumerate_devices().await?;
        Ok(devices
            .into_iter()
            .filter(|device| pair.get(device.kind).is_usable())
            .map(|device| {
                let selected =
                    pair.get(device.kind).device_id.as_deref() == Some(device.device_id.as_str());
                SelectableDevice { device, selected }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap(exists: bool, has_permission: bool) -> DeviceCapability {
        DeviceCapability {
            exists,
            has_permission,
            device_id: has_permission.then(|| "dev".to_string()),
        }
    }

    fn pair(audio: DeviceCapability, video: DeviceCapability) -> DeviceCapabilityPair {
        DeviceCapabilityPair { audio, video }
    }

    #[test]
    fn no_device_at_all() {
        assert_eq!(
            classify(&pair(cap(false, false), cap(false, false))),
            PermissionOutcome::NoDeviceAtAll
        );
    }

    #[test]
    fn denied_both() {
        assert_eq!(
            classify(&pair(cap(true, false), cap(true, false))),
            PermissionOutcome::NoPermissionForEither
        );
        // One kind absent, the other denied: nothing to record with.
        assert_eq!(
            classify(&pair(cap(false, false), cap(true, false))),
            PermissionOutcome::NoPermissionForEither
        );
    }

    #[test]
    fn video_without_audio_is_refused() {
        assert_eq!(
            classify(&pair(cap(true, false), cap(true, true))),
            PermissionOutcome::VideoOnlyNoAudio
        );
        // Absent microphone is treated the same as a refused one.
        assert_eq!(
            classify(&pair(cap(false, false), cap(true, true))),
            PermissionOutcome::VideoOnlyNoAudio
        );
    }

    #[test]
    fn audio_only_is_granted() {
        let p = pair(cap(true, true), cap(true, false));
        assert_eq!(classify(&p), PermissionOutcome::Granted);
        assert!(p.usable_audio());
        assert!(!p.usable_video());
    }

    #[test]
    fn classification_is_total_over_reachable_pairs() {
        // Reachable capabilities: absent, denied, granted.
        let all = [cap(false, false), cap(true, false), cap(true, true)];
        for audio in &all {
            for video in &all {
                let p = pair(audio.clone(), video.clone());
                let outcome = classify(&p);
                assert_eq!(outcome, classify(&p));
                if outcome.is_granted() {
                    assert!(p.usable_audio(), "granted pairs always carry audio: {:?}", p);
                }
            }
        }
    }
}
