use async_trait::async_trait;
use parking_lot::Mutex;

use media_recorder_core::models::artifact::ContainerType;
use media_recorder_core::models::capability::{DeviceInfo, MediaKind};
use media_recorder_core::models::constraint::CaptureConstraint;
use media_recorder_core::models::error::CaptureError;
use media_recorder_core::traits::capture_environment::CaptureEnvironment;
use media_recorder_core::traits::media_recorder::MediaRecorder;
use media_recorder_core::traits::media_stream::MediaStream;

use crate::recorder::{RecorderProbe, SimulatedRecorder};
use crate::stream::{SimulatedStream, StreamProbe};

/// The user's answer to a consent prompt for one media kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consent {
    Granted,
    Denied,
}

#[derive(Debug, Clone)]
struct SimDevice {
    info: DeviceInfo,
    connected: bool,
}

struct EnvState {
    devices: Vec<SimDevice>,
    audio_consent: Consent,
    video_consent: Consent,
    next_stream: u64,
    requests: Vec<CaptureConstraint>,
    streams: Vec<StreamProbe>,
    recorders: Vec<RecorderProbe>,
    fail_next_request: Option<CaptureError>,
    fail_next_recorder: Option<CaptureError>,
}

impl EnvState {
    fn consent(&self, kind: MediaKind) -> Consent {
        match kind {
            MediaKind::Audio => self.audio_consent,
            MediaKind::Video => self.video_consent,
        }
    }

    /// The selected device if it is connected, else the first connected
    /// device of that kind.
    fn resolve_device(&self, kind: MediaKind, selector: Option<&str>) -> Option<String> {
        let mut candidates = self
            .devices
            .iter()
            .filter(|d| d.connected && d.info.kind == kind);
        let device = match selector {
            Some(id) => candidates.find(|d| d.info.device_id == id),
            None => candidates.next(),
        };
        device.map(|d| d.info.device_id.clone())
    }
}

/// Capture environment backed by an in-memory device list.
///
/// Devices can be connected and disconnected at any time; consent is
/// answered per kind. Every stream and recorder handed out stays
/// observable through its probe.
pub struct SimulatedEnvironment {
    state: Mutex<EnvState>,
}

impl SimulatedEnvironment {
    /// No devices, consent granted for both kinds.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EnvState {
                devices: Vec::new(),
                audio_consent: Consent::Granted,
                video_consent: Consent::Granted,
                next_stream: 0,
                requests: Vec::new(),
                streams: Vec::new(),
                recorders: Vec::new(),
                fail_next_request: None,
                fail_next_recorder: None,
            }),
        }
    }

    /// A laptop: built-in microphone and camera, plus a USB microphone.
    pub fn with_default_devices() -> Self {
        let env = Self::new();
        env.add_device(MediaKind::Audio, "builtin-mic", "Built-in Microphone");
        env.add_device(MediaKind::Audio, "usb-mic", "USB Microphone");
        env.add_device(MediaKind::Video, "builtin-cam", "Built-in Camera");
        env
    }

    pub fn add_device(&self, kind: MediaKind, device_id: &str, label: &str) {
        self.state.lock().devices.push(SimDevice {
            info: DeviceInfo {
                kind,
                label: label.to_string(),
                device_id: device_id.to_string(),
            },
            connected: true,
        });
    }

    pub fn disconnect(&self, device_id: &str) {
        self.set_connected(device_id, false);
    }

    pub fn reconnect(&self, device_id: &str) {
        self.set_connected(device_id, true);
    }

    pub fn set_consent(&self, kind: MediaKind, consent: Consent) {
        let mut state = self.state.lock();
        match kind {
            MediaKind::Audio => state.audio_consent = consent,
            MediaKind::Video => state.video_consent = consent,
        }
    }

    /// Make the next `request_stream` fail with `error`.
    pub fn fail_next_request(&self, error: CaptureError) {
        self.state.lock().fail_next_request = Some(error);
    }

    /// Make the next `open_recorder` fail with `error`.
    pub fn fail_next_recorder(&self, error: CaptureError) {
        self.state.lock().fail_next_recorder = Some(error);
    }

    /// Every constraint passed to `request_stream`, in call order.
    pub fn requests(&self) -> Vec<CaptureConstraint> {
        self.state.lock().requests.clone()
    }

    pub fn streams(&self) -> Vec<StreamProbe> {
        self.state.lock().streams.clone()
    }

    pub fn last_stream(&self) -> Option<StreamProbe> {
        self.state.lock().streams.last().cloned()
    }

    pub fn recorders(&self) -> Vec<RecorderProbe> {
        self.state.lock().recorders.clone()
    }

    pub fn last_recorder(&self) -> Option<RecorderProbe> {
        self.state.lock().recorders.last().cloned()
    }

    fn set_connected(&self, device_id: &str, connected: bool) {
        let mut state = self.state.lock();
        for device in state.devices.iter_mut().filter(|d| d.info.device_id == device_id) {
            device.connected = connected;
            log::debug!(
                "Simulated device {} {}",
                device_id,
                if connected { "connected" } else { "disconnected" }
            );
        }
    }
}

impl Default for SimulatedEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureEnvironment for SimulatedEnvironment {
    async fn request_stream(
        &self,
        constraint: &CaptureConstraint,
    ) -> Result<Box<dyn MediaStream>, CaptureError> {
        let mut state = self.state.lock();
        state.requests.push(constraint.clone());
        if let Some(error) = state.fail_next_request.take() {
            return Err(error);
        }

        let mut tracks = Vec::new();
        for kind in constraint.enabled_kinds() {
            let device_id = state
                .resolve_device(kind, constraint.device_selector(kind))
                .ok_or(CaptureError::DeviceNotFound)?;
            if state.consent(kind) == Consent::Denied {
                return Err(CaptureError::PermissionDenied);
            }
            tracks.push((kind, device_id));
        }

        state.next_stream += 1;
        let (stream, probe) = SimulatedStream::new(format!("sim-stream-{}", state.next_stream), tracks);
        state.streams.push(probe);
        Ok(Box::new(stream))
    }

    async fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, CaptureError> {
        Ok(self
            .state
            .lock()
            .devices
            .iter()
            .filter(|d| d.connected)
            .map(|d| d.info.clone())
            .collect())
    }

    fn open_recorder(
        &self,
        stream: &dyn MediaStream,
        container: ContainerType,
    ) -> Result<Box<dyn MediaRecorder>, CaptureError> {
        let mut state = self.state.lock();
        if let Some(error) = state.fail_next_recorder.take() {
            return Err(error);
        }
        let (recorder, probe) = SimulatedRecorder::new(stream.id().to_string(), container);
        state.recorders.push(probe);
        Ok(Box::new(recorder))
    }
}
