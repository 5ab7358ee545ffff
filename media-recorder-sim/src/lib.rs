//! # media-recorder-sim
//!
//! In-memory capture environment for media-recorder-core.
//!
//! Provides:
//! - `SimulatedEnvironment`: scripted devices and consent, implements `CaptureEnvironment`
//! - `SimulatedStream` / `StreamProbe`: streams whose track state can be inspected
//! - `SimulatedRecorder` / `RecorderProbe`: a recorder whose segments are emitted on demand
//! - `SimulatedPreview`: a preview sink that remembers what it shows
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use media_recorder_core::{CapabilityNegotiator, RecorderConfig, RecordingController};
//! use media_recorder_sim::SimulatedEnvironment;
//!
//! let env = Arc::new(SimulatedEnvironment::with_default_devices());
//! let negotiated = CapabilityNegotiator::new(Arc::clone(&env)).negotiate_and_classify().await?;
//! let mut controller = RecordingController::from_negotiation(env, RecorderConfig::default(), &negotiated)?;
//! ```

pub mod environment;
pub mod preview;
pub mod recorder;
pub mod stream;

pub use environment::{Consent, SimulatedEnvironment};
pub use preview::SimulatedPreview;
pub use recorder::{container_header, RecorderPhase, RecorderProbe, SimulatedRecorder};
pub use stream::{SimulatedStream, StreamProbe};
