use std::time::Duration;
use thiserror::Error;

/// Why the platform refused to hand out a microphone stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("access to the microphone was denied")]
    Denied,

    #[error("audio capture unavailable: {0}")]
    Unavailable(String),
}

/// A failed step of the offer/answer exchange for a single peer.
///
/// Carries the rendered cause rather than the source error so it can cross
/// task boundaries and be shown to the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NegotiationError {
    #[error("failed to set up peer connection: {0}")]
    Setup(String),

    #[error("failed to create offer: {0}")]
    CreateOffer(String),

    #[error("failed to create answer: {0}")]
    CreateAnswer(String),

    #[error("setLocalDescription failed: {0}")]
    SetLocalDescription(String),

    #[error("setRemoteDescription failed: {0}")]
    SetRemoteDescription(String),

    #[error("no connection established within {0:?}")]
    TimedOut(Duration),
}

impl NegotiationError {
    pub(crate) fn from_anyhow(wrap: fn(String) -> Self, err: anyhow::Error) -> Self {
        wrap(format!("{:#}", err))
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("client engine has shut down")]
    EngineClosed,
}
