use crate::media::{LocalStream, RemoteStream};
use crate::error::NegotiationError;
use huddle_core::PeerId;

/// Something the user should be told about. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    MediaAccessDenied,
    NegotiationFailed {
        peer_id: PeerId,
        error: NegotiationError,
    },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::MediaAccessDenied => "You chose not to provide access to your microphone, \
                 so real-time voice chat is unavailable."
                .to_owned(),
            Notice::NegotiationFailed { peer_id, error } => {
                format!("Voice connection to {} failed: {}", peer_id, error)
            }
        }
    }
}

/// The presentation layer the client reports to.
///
/// Sinks are identified by peer id; the presenter renders and positions them
/// but the client decides when they exist.
pub trait Presenter: Send + Sync {
    /// Bind the captured stream to a muted local monitor.
    fn show_local_monitor(&self, stream: &LocalStream);

    fn attach_sink(&self, peer_id: &PeerId, stream: RemoteStream);

    fn detach_sink(&self, peer_id: &PeerId);

    fn notify(&self, notice: Notice);
}
