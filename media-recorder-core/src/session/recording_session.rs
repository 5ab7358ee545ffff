use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::traits::capture_environment::SegmentSink;

/// Segment accumulator shared between the recorder's sink and the session.
#[derive(Debug, Default)]
struct SegmentBuffer {
    segments: Vec<Vec<u8>>,
    accepting: bool,
    dropped: u64,
}

/// One start→stop unit of work.
///
/// Segments are appended in the order the recorder emits them, but only
/// while the session is accepting: a paused session drops whatever
/// arrives until it is resumed.
#[derive(Debug)]
pub struct RecordingSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    buffer: Arc<Mutex<SegmentBuffer>>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            buffer: Arc::new(Mutex::new(SegmentBuffer::default())),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Sink to hand to the recorder.
    pub fn sink(&self) -> SegmentSink {
        let buffer = Arc::clone(&self.buffer);
        let session_id = self.id;
        Arc::new(move |segment: &[u8]| {
            let mut buffer = buffer.lock();
            if buffer.accepting {
                buffer.segments.push(segment.to_vec());
                log::debug!(
                    "Session {}: segment #{} ({} bytes)",
                    session_id,
                    buffer.segments.len(),
                    segment.len()
                );
            } else {
                buffer.dropped += 1;
                log::debug!(
                    "Session {}: dropped {} byte segment while not accepting",
                    session_id,
                    segment.len()
                );
            }
        })
    }

    pub fn set_accepting(&self, accepting: bool) {
        self.buffer.lock().accepting = accepting;
    }

    pub fn is_accepting(&self) -> bool {
        self.buffer.lock().accepting
    }

    /// Close the session for good and hand over the accumulated segments.
    pub fn finish(&self) -> Vec<Vec<u8>> {
        let mut buffer = self.buffer.lock();
        buffer.accepting = false;
        std::mem::take(&mut buffer.segments)
    }

    pub fn segment_count(&self) -> usize {
        self.buffer.lock().segments.len()
    }

    /// Segments that arrived while the session was not accepting.
    pub fn dropped_count(&self) -> u64 {
        self.buffer.lock().dropped
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_appends_in_emission_order() {
        let session = RecordingSession::new();
        session.set_accepting(true);
        let sink = session.sink();

        sink(b"one");
        sink(b"two");
        sink(b"three");

        assert_eq!(
            session.finish(),
            vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()]
        );
    }

    #[test]
    fn segments_outside_accepting_window_are_dropped() {
        let session = RecordingSession::new();
        let sink = session.sink();

        sink(b"early");
        session.set_accepting(true);
        sink(b"kept");
        session.set_accepting(false);
        sink(b"paused");

        assert_eq!(session.dropped_count(), 2);
        assert_eq!(session.finish(), vec![b"kept".to_vec()]);
    }

    #[test]
    fn finish_closes_the_session() {
        let session = RecordingSession::new();
        session.set_accepting(true);
        let sink = session.sink();
        sink(b"a");

        assert_eq!(session.finish().len(), 1);
        sink(b"late");
        assert!(!session.is_accepting());
        assert_eq!(session.segment_count(), 0);
        assert!(session.finish().is_empty());
    }
}
