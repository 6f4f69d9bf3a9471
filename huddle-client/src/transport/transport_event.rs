use crate::error::NegotiationError;
use crate::media::RemoteStream;
use crate::peer::SessionKey;
use huddle_core::{IceCandidate, SessionDescription};

/// Events that session workers and connections generate for the engine.
///
/// Every event names the session it belongs to; the engine drops events
/// whose session is no longer registered.
#[derive(Debug)]
pub enum TransportEvent {
    /// Connection built and local audio attached.
    Prepared(SessionKey),

    /// A local offer or answer was set and must be relayed.
    LocalDescription(SessionKey, SessionDescription),

    /// A local ICE candidate was discovered and must be relayed.
    CandidateGenerated(SessionKey, IceCandidate),

    RemoteStream(SessionKey, RemoteStream),

    NegotiationFailed(SessionKey, NegotiationError),

    NegotiationTimeout(SessionKey),

    /// Transport reported the connection as failed or disconnected.
    Disconnected(SessionKey),
}

impl TransportEvent {
    pub fn key(&self) -> &SessionKey {
        match self {
            TransportEvent::Prepared(key)
            | TransportEvent::LocalDescription(key, _)
            | TransportEvent::CandidateGenerated(key, _)
            | TransportEvent::RemoteStream(key, _)
            | TransportEvent::NegotiationFailed(key, _)
            | TransportEvent::NegotiationTimeout(key)
            | TransportEvent::Disconnected(key) => key,
        }
    }
}
