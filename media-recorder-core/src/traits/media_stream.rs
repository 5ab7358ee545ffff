use crate::models::capability::MediaKind;
use crate::models::error::CaptureError;

/// Live handle to one audio track and/or one video track.
pub trait MediaStream: Send + Sync {
    fn id(&self) -> &str;

    fn has_track(&self, kind: MediaKind) -> bool;

    /// Device backing the `kind` track, if the stream has one.
    fn device_id(&self, kind: MediaKind) -> Option<String>;

    /// `None` when the stream has no `kind` track.
    fn is_track_enabled(&self, kind: MediaKind) -> Option<bool>;

    fn set_track_enabled(&mut self, kind: MediaKind, enabled: bool) -> Result<(), CaptureError>;

    /// Stop every track and release the hardware. Idempotent.
    fn stop(&mut self);
}
