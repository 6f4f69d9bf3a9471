use crate::peer::SessionSnapshot;
use huddle_core::{RoomName, ServerSignal};
use tokio::sync::oneshot;

/// Invoked once when the user refuses microphone access for a join.
pub type OnDenied = Box<dyn FnOnce() + Send + 'static>;

pub(crate) struct PendingJoin {
    pub room: RoomName,
    pub on_denied: Option<OnDenied>,
}

/// Requests the [`Client`](crate::Client) handle sends to the engine.
pub(crate) enum EngineCommand {
    Join {
        room: RoomName,
        on_denied: Option<OnDenied>,
    },
    Leave {
        room: RoomName,
    },
    ReleaseAll,
    Signal(ServerSignal),
    Sessions(oneshot::Sender<Vec<SessionSnapshot>>),
    HasLocalMedia(oneshot::Sender<bool>),
}
