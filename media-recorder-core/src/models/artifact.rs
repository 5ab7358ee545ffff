use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Media container the recorder encodes into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    #[default]
    Webm,
    Mp4,
    Ogg,
}

impl ContainerType {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Webm => "video/webm",
            Self::Mp4 => "video/mp4",
            Self::Ogg => "video/ogg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
            Self::Ogg => "ogg",
        }
    }
}

/// Finalized recording: every accepted segment concatenated in arrival order.
///
/// Built once when a session stops and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
    metadata: ArtifactMetadata,
}

/// Descriptive data for an [`Artifact`], serializable for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    pub id: Uuid,
    pub container: ContainerType,
    pub mime_type: String,
    pub filename: String,
    pub duration_secs: u64,
    pub segment_count: usize,
    pub byte_len: usize,
    pub checksum: String,
    pub created_at: String,
    #[serde(default)]
    pub session_started_at: Option<String>,
    /// The recorder failed to finalize, so the last segment may be missing.
    #[serde(default)]
    pub truncated: bool,
}

impl Artifact {
    pub fn assemble(
        segments: Vec<Vec<u8>>,
        container: ContainerType,
        filename: impl Into<String>,
        duration_secs: u64,
    ) -> Self {
        let segment_count = segments.len();
        let bytes = segments.concat();
        let metadata = ArtifactMetadata {
            id: Uuid::new_v4(),
            container,
            mime_type: container.mime_type().to_string(),
            filename: filename.into(),
            duration_secs,
            segment_count,
            byte_len: bytes.len(),
            checksum: sha256_hex(&bytes),
            created_at: Utc::now().to_rfc3339(),
            session_started_at: None,
            truncated: false,
        };
        Self { bytes, metadata }
    }

    pub fn with_session_start(mut self, started_at: DateTime<Utc>) -> Self {
        self.metadata.session_started_at = Some(started_at.to_rfc3339());
        self
    }

    pub fn mark_truncated(mut self) -> Self {
        self.metadata.truncated = true;
        self
    }

    pub fn is_truncated(&self) -> bool {
        self.metadata.truncated
    }

    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn container(&self) -> ContainerType {
        self.metadata.container
    }

    pub fn filename(&self) -> &str {
        &self.metadata.filename
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    pub fn metadata_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.metadata)
    }
}

fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_segments_in_order() {
        let artifact = Artifact::assemble(
            vec![b"ab".to_vec(), b"cd".to_vec(), b"e".to_vec()],
            ContainerType::Webm,
            "RecordedVideo.webm",
            3,
        );

        assert_eq!(artifact.bytes(), b"abcde");
        assert_eq!(artifact.metadata().segment_count, 3);
        assert_eq!(artifact.metadata().byte_len, 5);
        assert_eq!(artifact.metadata().mime_type, "video/webm");
    }

    #[test]
    fn checksum_is_sha256_of_content() {
        let artifact = Artifact::assemble(vec![b"abc".to_vec()], ContainerType::Mp4, "x.mp4", 0);
        assert_eq!(
            artifact.metadata().checksum,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn metadata_exports_as_json() {
        let artifact = Artifact::assemble(vec![vec![1, 2]], ContainerType::Ogg, "RecordedVideo.ogg", 9);
        let json: serde_json::Value = serde_json::from_str(&artifact.metadata_json().unwrap()).unwrap();
        assert_eq!(json["container"], "ogg");
        assert_eq!(json["durationSecs"], 9);
        assert_eq!(json["filename"], "RecordedVideo.ogg");
        assert_eq!(json["truncated"], false);
        assert!(json["sessionStartedAt"].is_null());
    }

    #[test]
    fn truncation_and_session_start_are_recorded() {
        let started = chrono::DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let artifact = Artifact::assemble(vec![vec![7]], ContainerType::Webm, "a.webm", 1)
            .with_session_start(started)
            .mark_truncated();

        assert!(artifact.is_truncated());
        assert_eq!(
            artifact.metadata().session_started_at.as_deref(),
            Some("2024-03-01T10:00:00+00:00")
        );
        // Flags do not touch the content.
        assert_eq!(artifact.bytes(), &[7]);
    }
}
