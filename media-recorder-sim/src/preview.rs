use parking_lot::Mutex;

use media_recorder_core::traits::media_stream::MediaStream;
use media_recorder_core::traits::preview_sink::PreviewSink;

/// Preview sink that remembers which stream it is showing.
#[derive(Debug, Default)]
pub struct SimulatedPreview {
    showing: Mutex<Option<String>>,
    attach_count: Mutex<u64>,
}

impl SimulatedPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the attached stream, if any.
    pub fn showing(&self) -> Option<String> {
        self.showing.lock().clone()
    }

    pub fn attach_count(&self) -> u64 {
        *self.attach_count.lock()
    }
}

impl PreviewSink for SimulatedPreview {
    fn attach(&self, stream: &dyn MediaStream) {
        *self.showing.lock() = Some(stream.id().to_string());
        *self.attach_count.lock() += 1;
    }

    fn detach(&self) {
        self.showing.lock().take();
    }
}
