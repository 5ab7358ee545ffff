use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::artifact::Artifact;

/// Downloadable reference to an [`Artifact`], handed to the presentation layer.
///
/// A handle stays resolvable until the next artifact is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactHandle {
    pub id: Uuid,
    pub url: String,
    pub filename: String,
    pub mime_type: String,
    pub byte_len: usize,
    /// Mirrors [`Artifact::is_truncated`].
    pub truncated: bool,
}

impl ArtifactHandle {
    fn for_artifact(artifact: &Artifact) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            url: format!("artifact:{}", id),
            filename: artifact.filename().to_string(),
            mime_type: artifact.container().mime_type().to_string(),
            byte_len: artifact.len(),
            truncated: artifact.is_truncated(),
        }
    }
}

/// Single-slot store for the most recent artifact.
///
/// Registering a new artifact revokes the previous handle first and drops
/// its bytes, so repeated record/stop cycles never accumulate buffers.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    current: Option<(ArtifactHandle, Arc<Artifact>)>,
    revoked: u64,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, artifact: Artifact) -> ArtifactHandle {
        self.revoke_current();
        let handle = ArtifactHandle::for_artifact(&artifact);
        log::debug!("Registered artifact {} as {}", artifact.id(), handle.url);
        self.current = Some((handle.clone(), Arc::new(artifact)));
        handle
    }

    /// Revokes the live handle, if any. Returns whether one was revoked.
    pub fn revoke_current(&mut self) -> bool {
        match self.current.take() {
            Some((handle, _)) => {
                log::debug!("Revoked artifact handle {}", handle.url);
                self.revoked += 1;
                true
            }
            None => false,
        }
    }

    pub fn resolve(&self, handle: &ArtifactHandle) -> Option<Arc<Artifact>> {
        self.current
            .as_ref()
            .filter(|(live, _)| live.id == handle.id)
            .map(|(_, artifact)| Arc::clone(artifact))
    }

    pub fn current_handle(&self) -> Option<&ArtifactHandle> {
        self.current.as_ref().map(|(handle, _)| handle)
    }

    pub fn current(&self) -> Option<Arc<Artifact>> {
        self.current.as_ref().map(|(_, artifact)| Arc::clone(artifact))
    }

    /// Number of handles revoked over this registry's lifetime.
    pub fn revoked_count(&self) -> u64 {
        self.revoked
    }
}
