#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;

use media_recorder_core::{
    Artifact, AudioSpec, CaptureConstraint, RecorderConfig, RecorderError, RecordingController,
    RecordingState, SessionObserver, SessionSnapshot, TrackRequest, VideoSpec,
};
use media_recorder_sim::SimulatedEnvironment;

pub type Controller = RecordingController<SimulatedEnvironment>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn audio_video() -> CaptureConstraint {
    CaptureConstraint::new(
        TrackRequest::Enabled(AudioSpec {
            device_id: Some("builtin-mic".into()),
        }),
        TrackRequest::Enabled(VideoSpec {
            device_id: Some("builtin-cam".into()),
            ..Default::default()
        }),
    )
    .unwrap()
}

pub fn audio_only() -> CaptureConstraint {
    CaptureConstraint::new(
        TrackRequest::Enabled(AudioSpec::default()),
        TrackRequest::Disabled,
    )
    .unwrap()
}

pub fn controller_with(
    config: RecorderConfig,
    constraint: CaptureConstraint,
) -> (Arc<SimulatedEnvironment>, Controller) {
    init_logging();
    let env = Arc::new(SimulatedEnvironment::with_default_devices());
    let controller = RecordingController::new(Arc::clone(&env), config, constraint).unwrap();
    (env, controller)
}

pub fn controller() -> (Arc<SimulatedEnvironment>, Controller) {
    controller_with(RecorderConfig::default(), audio_video())
}

/// Drive a fresh controller into `state`.
pub fn controller_in(state: RecordingState) -> (Arc<SimulatedEnvironment>, Controller) {
    let (env, mut controller) = controller();
    if state == RecordingState::Idle {
        return (env, controller);
    }
    futures::executor::block_on(controller.acquire_stream()).unwrap();
    if state == RecordingState::Streaming {
        return (env, controller);
    }
    controller.start_recording().unwrap();
    match state {
        RecordingState::Paused => controller.pause_recording().unwrap(),
        RecordingState::Stopped => {
            controller.stop_recording().unwrap();
        }
        _ => {}
    }
    assert_eq!(controller.state(), state);
    (env, controller)
}

pub fn tick_n(controller: &mut Controller, n: u32) {
    for _ in 0..n {
        controller.tick();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    State(RecordingState),
    Elapsed(String),
    Error(RecorderError),
    ArtifactReady { filename: String, byte_len: usize },
}

/// Observer that records every notification.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().clone()
    }

    pub fn states(&self) -> Vec<RecordingState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::State(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<RecorderError> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Error(err) => Some(err),
                _ => None,
            })
            .collect()
    }
}

impl SessionObserver for RecordingObserver {
    fn on_state_changed(&self, snapshot: &SessionSnapshot) {
        self.events.lock().push(ObservedEvent::State(snapshot.state));
    }

    fn on_elapsed_updated(&self, snapshot: &SessionSnapshot) {
        self.events
            .lock()
            .push(ObservedEvent::Elapsed(snapshot.elapsed_display.clone()));
    }

    fn on_error(&self, error: &RecorderError) {
        self.events.lock().push(ObservedEvent::Error(error.clone()));
    }

    fn on_artifact_ready(&self, _snapshot: &SessionSnapshot, artifact: &Artifact) {
        self.events.lock().push(ObservedEvent::ArtifactReady {
            filename: artifact.filename().to_string(),
            byte_len: artifact.len(),
        });
    }
}
