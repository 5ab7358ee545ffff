use crate::models::error::CaptureError;
use crate::traits::capture_environment::SegmentSink;

/// Encoder turning a live stream into segments.
pub trait MediaRecorder: Send {
    /// Begin encoding, delivering segments through `sink`.
    fn start(&mut self, sink: SegmentSink) -> Result<(), CaptureError>;

    fn pause(&mut self) -> Result<(), CaptureError>;

    fn resume(&mut self) -> Result<(), CaptureError>;

    /// Finish encoding. Any buffered final segment must be delivered to the
    /// sink before this returns.
    fn stop(&mut self) -> Result<(), CaptureError>;
}
