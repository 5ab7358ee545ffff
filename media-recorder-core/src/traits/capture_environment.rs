use std::sync::Arc;

use async_trait::async_trait;

use crate::models::artifact::ContainerType;
use crate::models::capability::DeviceInfo;
use crate::models::constraint::CaptureConstraint;
use crate::models::error::CaptureError;
use crate::traits::media_recorder::MediaRecorder;
use crate::traits::media_stream::MediaStream;

/// Callback invoked with each encoded segment a recorder emits, in emission order.
pub type SegmentSink = Arc<dyn Fn(&[u8]) + Send + Sync + 'static>;

/// The platform's capture facilities.
///
/// Implemented by:
/// - `SimulatedEnvironment` (media-recorder-sim)
/// - a host binding to the platform's media APIs
#[async_trait]
pub trait CaptureEnvironment: Send + Sync {
    /// Ask for a live stream matching `constraint`.
    ///
    /// May prompt the user for consent. Fails with
    /// `CaptureError::PermissionDenied` when consent is refused; any other
    /// error means the requested hardware is not there.
    async fn request_stream(
        &self,
        constraint: &CaptureConstraint,
    ) -> Result<Box<dyn MediaStream>, CaptureError>;

    /// List capture devices with human-readable labels.
    async fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, CaptureError>;

    /// Open an encoder bound to `stream`. The recorder is idle until started.
    fn open_recorder(
        &self,
        stream: &dyn MediaStream,
        container: ContainerType,
    ) -> Result<Box<dyn MediaRecorder>, CaptureError>;
}
