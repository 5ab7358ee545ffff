use crate::traits::media_stream::MediaStream;

/// Live preview target (a video element, a window surface).
pub trait PreviewSink: Send + Sync {
    fn attach(&self, stream: &dyn MediaStream);

    fn detach(&self);
}
