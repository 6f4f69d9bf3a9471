use crate::error::CaptureError;
use crate::media::capture::AudioCapture;
use crate::media::stream::LocalStream;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub type CaptureOutcome = Result<LocalStream, CaptureError>;

enum MediaState {
    Idle,
    Acquiring,
    Ready(LocalStream),
}

/// What a call to [`LocalMedia::acquire`] did.
#[derive(Debug)]
pub enum Acquire {
    /// Already captured.
    Ready(LocalStream),
    /// A capture request is now in flight; its outcome arrives on the channel.
    Started,
    /// An earlier request is still in flight.
    Pending,
}

/// Owns the single microphone stream shared by every peer session.
///
/// Capture runs on a separate task so the caller keeps processing events
/// while the platform prompt is open.
pub struct LocalMedia {
    capture: Arc<dyn AudioCapture>,
    state: MediaState,
}

impl LocalMedia {
    pub fn new(capture: Arc<dyn AudioCapture>) -> Self {
        Self {
            capture,
            state: MediaState::Idle,
        }
    }

    pub fn stream(&self) -> Option<&LocalStream> {
        match &self.state {
            MediaState::Ready(stream) => Some(stream),
            MediaState::Idle | MediaState::Acquiring => None,
        }
    }

    pub fn is_acquiring(&self) -> bool {
        matches!(self.state, MediaState::Acquiring)
    }

    pub fn acquire(&mut self, done: mpsc::Sender<CaptureOutcome>) -> Acquire {
        match &self.state {
            MediaState::Ready(stream) => Acquire::Ready(stream.clone()),
            MediaState::Acquiring => Acquire::Pending,
            MediaState::Idle => {
                info!("Requesting access to local audio input");
                self.state = MediaState::Acquiring;

                let capture = self.capture.clone();
                tokio::spawn(async move {
                    let outcome = capture.request().await;
                    let _ = done.send(outcome).await;
                });

                Acquire::Started
            }
        }
    }

    /// Records the result of the in-flight request.
    ///
    /// Returns `None` when no request was outstanding (media was released
    /// while the prompt was open); the late stream is discarded.
    pub fn complete(&mut self, outcome: CaptureOutcome) -> Option<CaptureOutcome> {
        if !self.is_acquiring() {
            debug!("Discarding capture result that arrived after release");
            return None;
        }

        self.state = match &outcome {
            Ok(stream) => MediaState::Ready(stream.clone()),
            Err(_) => MediaState::Idle,
        };
        Some(outcome)
    }

    /// Drops the stream. The next `acquire` asks the platform again.
    pub fn release(&mut self) -> Option<LocalStream> {
        match std::mem::replace(&mut self.state, MediaState::Idle) {
            MediaState::Ready(stream) => Some(stream),
            MediaState::Idle | MediaState::Acquiring => None,
        }
    }
}
