use crate::peer::worker::{SessionHandle, SessionOp};
use huddle_core::PeerId;
use std::fmt;
use thiserror::Error;

/// Distinguishes sessions that reuse the same peer id over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub peer_id: PeerId,
    pub id: SessionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Init,
    Negotiating,
    Connected,
    Closed,
}

impl SessionState {
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        match (self, next) {
            (Init, Negotiating) | (Negotiating, Connected) => true,
            (Closed, _) => false,
            (_, Closed) => true,
            _ => false,
        }
    }
}

/// Which side produces the offer. Chosen by the relay, never by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Offerer,
    Answerer,
}

impl Role {
    pub fn from_should_create_offer(should_create_offer: bool) -> Self {
        if should_create_offer {
            Role::Offerer
        } else {
            Role::Answerer
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal session transition {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: SessionState,
    pub to: SessionState,
}

/// Point-in-time view of a session for callers outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub peer_id: PeerId,
    pub id: SessionId,
    pub state: SessionState,
    pub role: Role,
    pub has_sink: bool,
}

/// Engine-side record of one remote peer.
///
/// The connection itself lives in the session's worker task; dropping the
/// session cancels the worker, which closes the connection.
pub struct PeerSession {
    key: SessionKey,
    state: SessionState,
    role: Role,
    handle: SessionHandle,
    has_sink: bool,
}

impl PeerSession {
    pub(crate) fn new(key: SessionKey, role: Role, handle: SessionHandle) -> Self {
        Self {
            key,
            state: SessionState::Init,
            role,
            handle,
            has_sink: false,
        }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn peer_id(&self) -> &PeerId {
        &self.key.peer_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn has_sink(&self) -> bool {
        self.has_sink
    }

    pub(crate) fn set_sink_attached(&mut self) {
        self.has_sink = true;
    }

    pub fn transition(&mut self, next: SessionState) -> Result<(), InvalidTransition> {
        if !self.state.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Queues work for the worker. Returns false if the worker is gone.
    pub(crate) fn submit(&self, op: SessionOp) -> bool {
        self.handle.submit(op)
    }

    /// Marks the session closed and stops its worker.
    pub(crate) fn close(mut self) -> SessionState {
        self.state = SessionState::Closed;
        self.handle.cancel();
        self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            peer_id: self.key.peer_id.clone(),
            id: self.key.id,
            state: self.state,
            role: self.role,
            has_sink: self.has_sink,
        }
    }
}
