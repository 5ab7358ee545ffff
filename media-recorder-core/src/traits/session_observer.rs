use crate::models::artifact::Artifact;
use crate::models::error::RecorderError;
use crate::models::snapshot::SessionSnapshot;

/// Outward notifications from a recording controller.
///
/// Called synchronously from the operation that caused the change.
/// All methods default to no-ops.
pub trait SessionObserver: Send + Sync {
    /// Called after every state transition.
    fn on_state_changed(&self, _snapshot: &SessionSnapshot) {}

    /// Called on every timer tick that advanced the elapsed counter.
    fn on_elapsed_updated(&self, _snapshot: &SessionSnapshot) {}

    /// Called when an operation is refused or the environment fails.
    fn on_error(&self, _error: &RecorderError) {}

    /// Called once per stop, after the artifact was registered.
    fn on_artifact_ready(&self, _snapshot: &SessionSnapshot, _artifact: &Artifact) {}
}
