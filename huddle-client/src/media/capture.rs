use crate::error::CaptureError;
use crate::media::stream::LocalStream;
use async_trait::async_trait;

/// Platform hook that asks for microphone access.
#[async_trait]
pub trait AudioCapture: Send + Sync + 'static {
    async fn request(&self) -> Result<LocalStream, CaptureError>;
}

/// Grants immediately with an Opus track the application feeds itself
/// through [`LocalStream::write_sample`].
pub struct OpusTrackCapture {
    stream_id: String,
}

impl OpusTrackCapture {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
        }
    }
}

impl Default for OpusTrackCapture {
    fn default() -> Self {
        Self::new("huddle-local-audio")
    }
}

#[async_trait]
impl AudioCapture for OpusTrackCapture {
    async fn request(&self) -> Result<LocalStream, CaptureError> {
        Ok(LocalStream::opus(self.stream_id.clone()))
    }
}
