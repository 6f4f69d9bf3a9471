use crate::peer::{PeerSession, SessionId, SessionKey, SessionSnapshot};
use huddle_core::PeerId;
use std::collections::HashMap;

/// At most one session per peer id.
///
/// Lookups by [`SessionKey`] also match the session id, so an event from a
/// session that was removed (and possibly replaced) finds nothing.
#[derive(Default)]
pub struct PeerRegistry {
    sessions: HashMap<PeerId, PeerSession>,
    next_id: u64,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.sessions.contains_key(peer_id)
    }

    pub fn next_key(&mut self, peer_id: PeerId) -> SessionKey {
        self.next_id += 1;
        SessionKey {
            peer_id,
            id: SessionId(self.next_id),
        }
    }

    /// Adds the session unless its peer already has one. The existing
    /// session is kept and the new one handed back.
    pub fn insert(&mut self, session: PeerSession) -> Result<(), PeerSession> {
        if self.contains(session.peer_id()) {
            return Err(session);
        }
        self.sessions.insert(session.peer_id().clone(), session);
        Ok(())
    }

    pub fn get(&self, peer_id: &PeerId) -> Option<&PeerSession> {
        self.sessions.get(peer_id)
    }

    /// The live session for `key`, if it has not been removed.
    pub fn live(&self, key: &SessionKey) -> Option<&PeerSession> {
        self.sessions
            .get(&key.peer_id)
            .filter(|session| session.key().id == key.id)
    }

    pub fn live_mut(&mut self, key: &SessionKey) -> Option<&mut PeerSession> {
        self.sessions
            .get_mut(&key.peer_id)
            .filter(|session| session.key().id == key.id)
    }

    pub fn remove(&mut self, peer_id: &PeerId) -> Option<PeerSession> {
        self.sessions.remove(peer_id)
    }

    pub fn drain(&mut self) -> Vec<PeerSession> {
        self.sessions.drain().map(|(_, session)| session).collect()
    }

    pub fn snapshot(&self) -> Vec<SessionSnapshot> {
        let mut sessions: Vec<SessionSnapshot> =
            self.sessions.values().map(PeerSession::snapshot).collect();
        sessions.sort_by(|a, b| a.peer_id.cmp(&b.peer_id));
        sessions
    }
}
