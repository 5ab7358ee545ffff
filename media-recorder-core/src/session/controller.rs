use std::sync::Arc;

use uuid::Uuid;

use crate::models::artifact::Artifact;
use crate::models::capability::MediaKind;
use crate::models::config::RecorderConfig;
use crate::models::constraint::CaptureConstraint;
use crate::models::elapsed::ElapsedCounter;
use crate::models::error::RecorderError;
use crate::models::snapshot::SessionSnapshot;
use crate::models::state::RecordingState;
use crate::session::negotiator::NegotiatedCapabilities;
use crate::session::recording_session::RecordingSession;
use crate::storage::artifact_registry::{ArtifactHandle, ArtifactRegistry};
use crate::traits::capture_environment::CaptureEnvironment;
use crate::traits::media_recorder::MediaRecorder;
use crate::traits::media_stream::MediaStream;
use crate::traits::preview_sink::PreviewSink;
use crate::traits::session_observer::SessionObserver;

/// Owns the capture stream, the recorder and the recording state machine.
///
/// ```text
/// [CaptureEnvironment] → stream ─┬→ [PreviewSink]
///                                └→ [MediaRecorder] → segments → [RecordingSession]
///                                                                      ↓ stop
///                                                  [ArtifactRegistry] ← Artifact
/// ```
///
/// Every operation either performs its transition or returns an error and
/// leaves the state untouched. Failures are logged and reported to the
/// observer before being returned.
pub struct RecordingController<E: CaptureEnvironment> {
    environment: Arc<E>,
    config: RecorderConfig,
    constraint: CaptureConstraint,
    state: RecordingState,
    stream: Option<Box<dyn MediaStream>>,
    recorder: Option<Box<dyn MediaRecorder>>,
    session: Option<RecordingSession>,
    elapsed: ElapsedCounter,
    artifacts: ArtifactRegistry,
    observer: Option<Arc<dyn SessionObserver>>,
    preview: Option<Arc<dyn PreviewSink>>,
}

impl<E: CaptureEnvironment> RecordingController<E> {
    pub fn new(
        environment: Arc<E>,
        config: RecorderConfig,
        constraint: CaptureConstraint,
    ) -> Result<Self, RecorderError> {
        config.validate()?;
        Ok(Self {
            environment,
            config,
            constraint,
            state: RecordingState::Idle,
            stream: None,
            recorder: None,
            session: None,
            elapsed: ElapsedCounter::new(),
            artifacts: ArtifactRegistry::new(),
            observer: None,
            preview: None,
        })
    }

    /// Build a controller allowed to request exactly the kinds negotiation
    /// found usable.
    pub fn from_negotiation(
        environment: Arc<E>,
        config: RecorderConfig,
        negotiated: &NegotiatedCapabilities,
    ) -> Result<Self, RecorderError> {
        let constraint = negotiated.constraint(&config.video)?;
        Self::new(environment, config, constraint)
    }

    pub fn set_observer(&mut self, observer: Arc<dyn SessionObserver>) {
        self.observer = Some(observer);
    }

    pub fn set_preview_sink(&mut self, preview: Arc<dyn PreviewSink>) {
        self.preview = Some(preview);
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn constraint(&self) -> &CaptureConstraint {
        &self.constraint
    }

    pub fn stream(&self) -> Option<&dyn MediaStream> {
        self.stream.as_deref()
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(RecordingSession::id)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.seconds()
    }

    /// Elapsed recording time as `MM:SS`.
    pub fn elapsed_display(&self) -> String {
        self.elapsed.display()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.state,
            self.elapsed.seconds(),
            self.artifacts.current_handle().cloned(),
        )
    }

    /// Resolve a handle previously handed out. Revoked handles resolve to `None`.
    pub fn artifact(&self, handle: &ArtifactHandle) -> Option<Arc<Artifact>> {
        self.artifacts.resolve(handle)
    }

    pub fn current_artifact(&self) -> Option<Arc<Artifact>> {
        self.artifacts.current()
    }

    /// Re-target a device selector. Takes effect on the next acquisition;
    /// a live stream keeps its device.
    pub fn update_device_selector(
        &mut self,
        kind: MediaKind,
        device_id: &str,
    ) -> Result<(), RecorderError> {
        let result = self.constraint.set_device_selector(kind, device_id);
        if result.is_ok() {
            log::info!("Selected {} device {}", kind, device_id);
        }
        self.report(result)
    }

    /// Request a live stream for the current constraint and route it to the
    /// preview. Returns the stream id.
    ///
    /// Legal from `Idle`, `Stopped` and `Streaming`; in the last case the
    /// previous stream is released once the new one has been obtained.
    pub async fn acquire_stream(&mut self) -> Result<String, RecorderError> {
        if self.state.has_live_session() {
            return self.fail(self.invalid_transition("acquire a stream"));
        }

        let constraint = self.constraint.clone();
        let stream = match self.environment.request_stream(&constraint).await {
            Ok(stream) => stream,
            Err(e) => return self.fail(RecorderError::StreamUnavailable(e)),
        };

        self.release_stream();
        if let Some(ref preview) = self.preview {
            preview.attach(&*stream);
        }
        let stream_id = stream.id().to_string();
        log::info!(
            "Acquired stream {} ({:?})",
            stream_id,
            constraint.enabled_kinds()
        );
        self.stream = Some(stream);
        self.transition(RecordingState::Streaming);
        Ok(stream_id)
    }

    /// Start a new session on the current stream. Transitions: streaming → recording.
    pub fn start_recording(&mut self) -> Result<(), RecorderError> {
        if self.state.has_live_session() {
            return self.fail(self.invalid_transition("start recording"));
        }
        if !self.state.is_streaming() {
            return self.fail(RecorderError::NoActiveStream);
        }

        let Some(stream) = self.stream.as_deref() else {
            return self.fail(RecorderError::NoActiveStream);
        };

        let mut recorder = match self
            .environment
            .open_recorder(stream, self.config.container)
        {
            Ok(recorder) => recorder,
            Err(e) => return self.fail(RecorderError::RecorderUnavailable(e)),
        };

        let session = RecordingSession::new();
        session.set_accepting(true);
        if let Err(e) = recorder.start(session.sink()) {
            return self.fail(RecorderError::RecorderUnavailable(e));
        }

        log::info!("Started recording session {}", session.id());
        // Replacing the session drops the previous one's segment storage.
        self.session = Some(session);
        self.recorder = Some(recorder);
        self.elapsed.restart();
        self.transition(RecordingState::Recording);
        Ok(())
    }

    /// Suspend accumulation and freeze the clock. Transitions: recording → paused.
    pub fn pause_recording(&mut self) -> Result<(), RecorderError> {
        if !self.state.is_recording() {
            return self.fail(self.invalid_transition("pause"));
        }

        if let Some(ref session) = self.session {
            session.set_accepting(false);
        }
        if let Some(ref mut recorder) = self.recorder {
            if let Err(e) = recorder.pause() {
                if let Some(ref session) = self.session {
                    session.set_accepting(true);
                }
                return self.fail(RecorderError::RecorderUnavailable(e));
            }
        }

        self.elapsed.freeze();
        self.transition(RecordingState::Paused);
        Ok(())
    }

    /// Resume accumulation and the clock. Transitions: paused → recording.
    pub fn resume_recording(&mut self) -> Result<(), RecorderError> {
        if !self.state.is_paused() {
            return self.fail(self.invalid_transition("resume"));
        }

        if let Some(ref mut recorder) = self.recorder {
            if let Err(e) = recorder.resume() {
                return self.fail(RecorderError::RecorderUnavailable(e));
            }
        }
        if let Some(ref session) = self.session {
            session.set_accepting(true);
        }

        self.elapsed.resume();
        self.transition(RecordingState::Recording);
        Ok(())
    }

    /// Presentation shortcut for a single pause/resume button.
    pub fn toggle_pause(&mut self) -> Result<RecordingState, RecorderError> {
        match self.state {
            RecordingState::Paused => self.resume_recording()?,
            _ => self.pause_recording()?,
        }
        Ok(self.state)
    }

    /// Finalize the session into an artifact and release the hardware.
    /// Transitions: recording/paused → stopped.
    pub fn stop_recording(&mut self) -> Result<ArtifactHandle, RecorderError> {
        if !self.state.has_live_session() {
            return self.fail(RecorderError::NoActiveSession);
        }
        let Some(session) = self.session.take() else {
            return self.fail(RecorderError::NoActiveSession);
        };

        self.elapsed.freeze();

        // The final flush carries data captured before the stop (or the
        // pause), so it is always accepted.
        session.set_accepting(true);
        let mut truncated = false;
        if let Some(mut recorder) = self.recorder.take() {
            if let Err(e) = recorder.stop() {
                // The stop still completes; the take is flagged instead.
                truncated = true;
                self.notify_error(&RecorderError::RecorderUnavailable(e));
            }
        }
        let segments = session.finish();
        if session.dropped_count() > 0 {
            log::debug!(
                "Session {} dropped {} segments while paused",
                session.id(),
                session.dropped_count()
            );
        }

        let mut artifact = Artifact::assemble(
            segments,
            self.config.container,
            self.config.suggested_filename(),
            self.elapsed.seconds(),
        )
        .with_session_start(session.started_at());
        if truncated {
            log::warn!("Session {} may be missing its final segment", session.id());
            artifact = artifact.mark_truncated();
        }
        if artifact.is_empty() {
            log::warn!("Session {} produced an empty artifact", session.id());
        }
        log::info!(
            "Stopped session {}: {} bytes in {} segments, {}",
            session.id(),
            artifact.len(),
            artifact.metadata().segment_count,
            self.elapsed.display()
        );

        let handle = self.artifacts.register(artifact);
        self.session = Some(session);
        self.release_stream();
        self.transition(RecordingState::Stopped);

        if let Some(ref observer) = self.observer {
            if let Some(artifact) = self.artifacts.resolve(&handle) {
                observer.on_artifact_ready(&self.snapshot(), &artifact);
            }
        }
        Ok(handle)
    }

    /// Flip the enabled flag of one track on the live stream. Returns the
    /// new flag. Recorder state and elapsed time are unaffected.
    pub fn toggle_track_enabled(&mut self, kind: MediaKind) -> Result<bool, RecorderError> {
        let result = if !self.constraint.is_enabled(kind) {
            Err(RecorderError::TrackUnavailable(kind))
        } else {
            match self.stream.as_deref_mut() {
                Some(stream) => match stream.is_track_enabled(kind) {
                    Some(enabled) => stream
                        .set_track_enabled(kind, !enabled)
                        .map(|_| !enabled)
                        .map_err(|_| RecorderError::TrackUnavailable(kind)),
                    None => Err(RecorderError::TrackUnavailable(kind)),
                },
                None => Err(RecorderError::TrackUnavailable(kind)),
            }
        };
        if let Ok(enabled) = result {
            log::info!("{} track {}", kind, if enabled { "enabled" } else { "disabled" });
        }
        self.report(result)
    }

    /// One-second timer event. Advances the clock while recording and stops
    /// the session once the configured maximum duration is reached.
    /// Returns the elapsed seconds after the tick.
    pub fn tick(&mut self) -> u64 {
        if !self.state.is_recording() || !self.elapsed.tick() {
            return self.elapsed.seconds();
        }

        let seconds = self.elapsed.seconds();
        log::debug!(
            "Elapsed {} ({} segments)",
            self.elapsed.display(),
            self.session.as_ref().map_or(0, RecordingSession::segment_count)
        );
        if let Some(ref observer) = self.observer {
            observer.on_elapsed_updated(&self.snapshot());
        }

        if let Some(max) = self.config.max_duration_secs {
            if seconds >= max {
                log::info!("Maximum duration of {}s reached, stopping", max);
                // Failures are already logged and reported by stop_recording.
                let _ = self.stop_recording();
            }
        }
        seconds
    }

    // --- Internal helpers ---

    fn transition(&mut self, next: RecordingState) {
        log::info!("Recording state: {} -> {}", self.state, next);
        self.state = next;
        if let Some(ref observer) = self.observer {
            observer.on_state_changed(&self.snapshot());
        }
    }

    fn invalid_transition(&self, operation: &'static str) -> RecorderError {
        RecorderError::InvalidTransition {
            state: self.state,
            operation,
        }
    }

    fn fail<T>(&self, error: RecorderError) -> Result<T, RecorderError> {
        self.notify_error(&error);
        Err(error)
    }

    fn notify_error(&self, error: &RecorderError) {
        log::warn!("{}", error);
        if let Some(ref observer) = self.observer {
            observer.on_error(error);
        }
    }

    fn report<T>(&self, result: Result<T, RecorderError>) -> Result<T, RecorderError> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => self.fail(error),
        }
    }

    /// Disable and stop every track, then detach the preview.
    fn release_stream(&mut self) {
        let Some(mut stream) = self.stream.take() else {
            return;
        };
        for kind in MediaKind::ALL {
            if stream.has_track(kind) {
                if let Err(e) = stream.set_track_enabled(kind, false) {
                    log::warn!("Failed to disable {} track: {}", kind, e);
                }
            }
        }
        stream.stop();
        if let Some(ref preview) = self.preview {
            preview.detach();
        }
        log::debug!("Released stream {}", stream.id());
    }
}

impl<E: CaptureEnvironment> Drop for RecordingController<E> {
    fn drop(&mut self) {
        if let Some(mut recorder) = self.recorder.take() {
            if let Err(e) = recorder.stop() {
                log::warn!("Recorder failed to stop on drop: {}", e);
            }
        }
        self.release_stream();
    }
}
