use std::sync::Arc;

use parking_lot::Mutex;

use media_recorder_core::models::capability::MediaKind;
use media_recorder_core::models::error::CaptureError;
use media_recorder_core::traits::media_stream::MediaStream;

#[derive(Debug, Clone)]
struct Track {
    kind: MediaKind,
    device_id: String,
    enabled: bool,
}

#[derive(Debug)]
struct StreamState {
    tracks: Vec<Track>,
    stopped: bool,
}

/// Stream handed out by [`crate::SimulatedEnvironment`].
pub struct SimulatedStream {
    id: String,
    state: Arc<Mutex<StreamState>>,
}

/// Read-only view of a stream, kept by the environment after hand-out.
#[derive(Clone)]
pub struct StreamProbe {
    id: String,
    state: Arc<Mutex<StreamState>>,
}

impl SimulatedStream {
    pub(crate) fn new(id: String, tracks: Vec<(MediaKind, String)>) -> (Self, StreamProbe) {
        let state = Arc::new(Mutex::new(StreamState {
            tracks: tracks
                .into_iter()
                .map(|(kind, device_id)| Track {
                    kind,
                    device_id,
                    enabled: true,
                })
                .collect(),
            stopped: false,
        }));
        let probe = StreamProbe {
            id: id.clone(),
            state: Arc::clone(&state),
        };
        (Self { id, state }, probe)
    }
}

impl MediaStream for SimulatedStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn has_track(&self, kind: MediaKind) -> bool {
        self.state.lock().tracks.iter().any(|t| t.kind == kind)
    }

    fn device_id(&self, kind: MediaKind) -> Option<String> {
        self.state
            .lock()
            .tracks
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.device_id.clone())
    }

    fn is_track_enabled(&self, kind: MediaKind) -> Option<bool> {
        self.state
            .lock()
            .tracks
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.enabled)
    }

    fn set_track_enabled(&mut self, kind: MediaKind, enabled: bool) -> Result<(), CaptureError> {
        let mut state = self.state.lock();
        let track = state
            .tracks
            .iter_mut()
            .find(|t| t.kind == kind)
            .ok_or(CaptureError::TrackNotFound(kind))?;
        track.enabled = enabled;
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = self.state.lock();
        if !state.stopped {
            log::debug!("Simulated stream {} stopped", self.id);
            state.stopped = true;
        }
    }
}

impl StreamProbe {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().stopped
    }

    pub fn is_track_enabled(&self, kind: MediaKind) -> Option<bool> {
        self.state
            .lock()
            .tracks
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.enabled)
    }

    pub fn device_id(&self, kind: MediaKind) -> Option<String> {
        self.state
            .lock()
            .tracks
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.device_id.clone())
    }

    pub fn kinds(&self) -> Vec<MediaKind> {
        self.state.lock().tracks.iter().map(|t| t.kind).collect()
    }
}
