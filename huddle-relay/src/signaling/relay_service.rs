use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use huddle_core::{ClientSignal, PeerId, RoomName, ServerSignal};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

struct RelayInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<ServerSignal>>,
    rooms: DashMap<RoomName, HashSet<PeerId>>,
    memberships: DashMap<PeerId, HashSet<RoomName>>,
}

/// Room bookkeeping and message forwarding for connected peers.
///
/// Lock order is rooms before memberships; no method holds a membership
/// entry while touching a room.
#[derive(Clone)]
pub struct RelayService {
    inner: Arc<RelayInner>,
}

impl Default for RelayService {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RelayInner {
                peers: DashMap::new(),
                rooms: DashMap::new(),
                memberships: DashMap::new(),
            }),
        }
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<ServerSignal>) {
        self.inner.peers.insert(peer_id, tx);
    }

    /// Drops the peer's socket and takes it out of every room it was in.
    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.inner.peers.remove(peer_id);

        let rooms = self
            .inner
            .memberships
            .remove(peer_id)
            .map(|(_, rooms)| rooms)
            .unwrap_or_default();
        for room in rooms {
            self.leave(peer_id, &room);
        }
    }

    pub fn handle(&self, from: &PeerId, signal: ClientSignal) {
        debug!("IN {} from {:?}", signal.event_name(), from);

        match signal {
            ClientSignal::JoinChatRoom(room) => {
                self.join(from, room);
            }
            ClientSignal::LeaveChatRoom(room) => {
                self.leave(from, &room);
            }
            ClientSignal::RelayIceCandidate {
                peer_id,
                ice_candidate,
            } => self.send_signal(
                &peer_id,
                ServerSignal::IceCandidate {
                    peer_id: from.clone(),
                    ice_candidate,
                },
            ),
            ClientSignal::RelaySessionDescription {
                peer_id,
                session_description,
            } => self.send_signal(
                &peer_id,
                ServerSignal::SessionDescription {
                    peer_id: from.clone(),
                    session_description,
                },
            ),
        }
    }

    /// The newcomer offers to every existing member.
    pub fn join(&self, peer_id: &PeerId, room: RoomName) -> bool {
        if room.is_empty() {
            warn!("Peer {:?} tried to join an unnamed room", peer_id);
            return false;
        }

        {
            let mut members = self.inner.rooms.entry(room.clone()).or_default();
            if members.contains(peer_id) {
                debug!("Peer {:?} already in room '{}'", peer_id, room);
                return false;
            }

            for member in members.iter() {
                self.send_signal(
                    member,
                    ServerSignal::AddPeerConn {
                        peer_id: peer_id.clone(),
                        should_create_offer: false,
                    },
                );
                self.send_signal(
                    peer_id,
                    ServerSignal::AddPeerConn {
                        peer_id: member.clone(),
                        should_create_offer: true,
                    },
                );
            }
            members.insert(peer_id.clone());
        }

        self.inner
            .memberships
            .entry(peer_id.clone())
            .or_default()
            .insert(room.clone());
        info!("Peer {:?} joined room '{}'", peer_id, room);
        true
    }

    pub fn leave(&self, peer_id: &PeerId, room: &RoomName) -> bool {
        let remaining = match self.inner.rooms.entry(room.clone()) {
            Entry::Occupied(mut entry) => {
                if !entry.get_mut().remove(peer_id) {
                    debug!("Peer {:?} is not in room '{}'", peer_id, room);
                    return false;
                }
                let remaining: Vec<PeerId> = entry.get().iter().cloned().collect();
                if remaining.is_empty() {
                    entry.remove();
                    debug!("Room '{}' is empty, dropping it", room);
                }
                remaining
            }
            Entry::Vacant(_) => {
                debug!("Peer {:?} left unknown room '{}'", peer_id, room);
                return false;
            }
        };

        for member in &remaining {
            self.send_signal(
                member,
                ServerSignal::RemovePeerConn {
                    peer_id: peer_id.clone(),
                },
            );
            self.send_signal(
                peer_id,
                ServerSignal::RemovePeerConn {
                    peer_id: member.clone(),
                },
            );
        }

        if let Some(mut rooms) = self.inner.memberships.get_mut(peer_id) {
            rooms.remove(room);
        }
        info!("Peer {:?} left room '{}'", peer_id, room);
        true
    }

    pub fn send_signal(&self, peer_id: &PeerId, signal: ServerSignal) {
        if let Some(peer) = self.inner.peers.get(peer_id) {
            if let Err(e) = peer.send(signal) {
                warn!("Failed to queue signal for {:?}: {}", peer_id, e);
            }
        } else {
            warn!(
                "Attempted to send {} to disconnected peer {:?}",
                signal.event_name(),
                peer_id
            );
        }
    }

    /// Members of `room`, sorted. Empty if the room does not exist.
    pub fn room_members(&self, room: &RoomName) -> Vec<PeerId> {
        let mut members: Vec<PeerId> = self
            .inner
            .rooms
            .get(room)
            .map(|m| m.iter().cloned().collect())
            .unwrap_or_default();
        members.sort();
        members
    }

    pub fn room_count(&self) -> usize {
        self.inner.rooms.len()
    }

    pub fn is_connected(&self, peer_id: &PeerId) -> bool {
        self.inner.peers.contains_key(peer_id)
    }
}
