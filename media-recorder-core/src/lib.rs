//! # media-recorder-core
//!
//! Platform-agnostic media recording core.
//!
//! Negotiates which capture devices exist and are permitted, owns the live
//! capture stream, and drives the start/pause/resume/stop state machine
//! that turns recorder segments into a downloadable artifact. Platform
//! backends implement `CaptureEnvironment` and plug into the generic
//! `RecordingController`.
//!
//! ## Architecture
//!
//! ```text
//! media-recorder-core (this crate)
//! ├── traits/       ← CaptureEnvironment, MediaStream, MediaRecorder, PreviewSink, SessionObserver
//! ├── models/       ← RecorderError, RecordingState, CaptureConstraint, Artifact, RecorderConfig, etc.
//! ├── session/      ← CapabilityNegotiator, RecordingController, RecordingSession
//! └── storage/      ← ArtifactRegistry (handle issue / revoke)
//! ```

pub mod models;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::artifact::{Artifact, ArtifactMetadata, ContainerType};
pub use models::capability::{
    DeviceCapability, DeviceCapabilityPair, DeviceInfo, MediaKind, PermissionOutcome,
    SelectableDevice,
};
pub use models::config::RecorderConfig;
pub use models::constraint::{
    AudioSpec, CaptureConstraint, FacingMode, FrameRate, TrackRequest, VideoSpec,
};
pub use models::elapsed::{format_elapsed, ElapsedCounter};
pub use models::error::{CaptureError, RecorderError};
pub use models::snapshot::SessionSnapshot;
pub use models::state::RecordingState;
pub use session::controller::RecordingController;
pub use session::negotiator::{classify, CapabilityNegotiator, NegotiatedCapabilities};
pub use session::recording_session::RecordingSession;
pub use storage::artifact_registry::{ArtifactHandle, ArtifactRegistry};
pub use traits::capture_environment::{CaptureEnvironment, SegmentSink};
pub use traits::media_recorder::MediaRecorder;
pub use traits::media_stream::MediaStream;
pub use traits::preview_sink::PreviewSink;
pub use traits::session_observer::SessionObserver;
