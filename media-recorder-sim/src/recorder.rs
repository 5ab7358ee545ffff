use std::sync::Arc;

use parking_lot::Mutex;

use media_recorder_core::models::artifact::ContainerType;
use media_recorder_core::models::error::CaptureError;
use media_recorder_core::traits::capture_environment::SegmentSink;
use media_recorder_core::traits::media_recorder::MediaRecorder;

/// Magic bytes opening the first segment of each container.
pub fn container_header(container: ContainerType) -> &'static [u8] {
    match container {
        ContainerType::Webm => &[0x1A, 0x45, 0xDF, 0xA3],
        ContainerType::Mp4 => b"ftyp",
        ContainerType::Ogg => b"OggS",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderPhase {
    Inactive,
    Recording,
    Paused,
    Stopped,
}

struct RecorderState {
    container: ContainerType,
    stream_id: String,
    phase: RecorderPhase,
    sink: Option<SegmentSink>,
    pending: Vec<u8>,
    fail_next: Option<CaptureError>,
}

/// Recorder handed out by [`crate::SimulatedEnvironment`].
///
/// Starting delivers the container header as the first segment. Captured
/// data is buffered until `request_data` or `stop` flushes it.
pub struct SimulatedRecorder {
    state: Arc<Mutex<RecorderState>>,
}

/// Test-side handle on a [`SimulatedRecorder`].
#[derive(Clone)]
pub struct RecorderProbe {
    state: Arc<Mutex<RecorderState>>,
}

impl SimulatedRecorder {
    pub(crate) fn new(stream_id: String, container: ContainerType) -> (Self, RecorderProbe) {
        let state = Arc::new(Mutex::new(RecorderState {
            container,
            stream_id,
            phase: RecorderPhase::Inactive,
            sink: None,
            pending: Vec::new(),
            fail_next: None,
        }));
        let probe = RecorderProbe {
            state: Arc::clone(&state),
        };
        (Self { state }, probe)
    }

    fn transition(
        &self,
        allowed: &[RecorderPhase],
        next: RecorderPhase,
    ) -> Result<(), CaptureError> {
        let mut state = self.state.lock();
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        if !allowed.contains(&state.phase) {
            return Err(CaptureError::RecorderFailed(format!(
                "cannot go from {:?} to {:?}",
                state.phase, next
            )));
        }
        state.phase = next;
        Ok(())
    }
}

impl MediaRecorder for SimulatedRecorder {
    fn start(&mut self, sink: SegmentSink) -> Result<(), CaptureError> {
        self.transition(&[RecorderPhase::Inactive], RecorderPhase::Recording)?;
        let header = {
            let mut state = self.state.lock();
            state.sink = Some(Arc::clone(&sink));
            log::debug!("Simulated recorder started on {}", state.stream_id);
            container_header(state.container)
        };
        sink(header);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), CaptureError> {
        self.transition(&[RecorderPhase::Recording], RecorderPhase::Paused)
    }

    fn resume(&mut self) -> Result<(), CaptureError> {
        self.transition(&[RecorderPhase::Paused], RecorderPhase::Recording)
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        self.transition(
            &[RecorderPhase::Recording, RecorderPhase::Paused],
            RecorderPhase::Stopped,
        )?;
        flush_pending(&self.state);
        Ok(())
    }
}

impl RecorderProbe {
    pub fn phase(&self) -> RecorderPhase {
        self.state.lock().phase
    }

    pub fn container(&self) -> ContainerType {
        self.state.lock().container
    }

    pub fn stream_id(&self) -> String {
        self.state.lock().stream_id.clone()
    }

    /// Deliver a segment right now, whatever the recorder phase. Models a
    /// platform callback that races a pause.
    pub fn emit(&self, segment: &[u8]) {
        let sink = self.state.lock().sink.clone();
        match sink {
            Some(sink) => sink(segment),
            None => log::warn!("Simulated recorder emitted before start"),
        }
    }

    /// Encode data into the pending buffer. Ignored unless recording.
    pub fn capture(&self, data: &[u8]) {
        let mut state = self.state.lock();
        if state.phase == RecorderPhase::Recording {
            state.pending.extend_from_slice(data);
        }
    }

    /// Flush pending data as one segment, if there is any.
    pub fn request_data(&self) {
        flush_pending(&self.state);
    }

    /// Make the next recorder call fail with `error`.
    pub fn fail_next(&self, error: CaptureError) {
        self.state.lock().fail_next = Some(error);
    }
}

fn flush_pending(state: &Mutex<RecorderState>) {
    let (sink, pending) = {
        let mut state = state.lock();
        if state.pending.is_empty() {
            return;
        }
        (state.sink.clone(), std::mem::take(&mut state.pending))
    };
    // Sink runs outside the lock; it may call back into the probe.
    if let Some(sink) = sink {
        sink(&pending);
    }
}
