use crate::engine::ClientEngine;
use crate::error::NegotiationError;
use crate::peer::{PeerSession, Role, SessionKey, SessionOp, SessionState, SessionWorker};
use crate::presenter::Notice;
use crate::transport::TransportEvent;
use huddle_core::{IceCandidate, PeerId, ServerSignal, SessionDescription};
use tracing::{debug, error, info, warn};

impl ClientEngine {
    pub(super) fn handle_signal(&mut self, signal: ServerSignal) {
        debug!("IN {} for {:?}", signal.event_name(), signal.peer_id());

        match signal {
            ServerSignal::AddPeerConn {
                peer_id,
                should_create_offer,
            } => self.peer_added(peer_id, Role::from_should_create_offer(should_create_offer)),
            ServerSignal::RemovePeerConn { peer_id } => {
                self.peer_removed(&peer_id);
            }
            ServerSignal::SessionDescription {
                peer_id,
                session_description,
            } => self.remote_description(&peer_id, session_description),
            ServerSignal::IceCandidate {
                peer_id,
                ice_candidate,
            } => self.remote_candidate(&peer_id, ice_candidate),
        }
    }

    fn peer_added(&mut self, peer_id: PeerId, role: Role) {
        if self.registry.contains(&peer_id) {
            info!("Already connected to peer {:?}", peer_id);
            return;
        }
        let Some(stream) = self.media.stream().cloned() else {
            warn!("Ignoring addPeerConn for {:?}: local audio not captured", peer_id);
            return;
        };

        info!("Adding peer {:?} as {:?}", peer_id, role);
        let key = self.registry.next_key(peer_id);
        let handle = SessionWorker::spawn(
            key.clone(),
            role,
            self.connector.clone(),
            stream,
            self.transport_tx.clone(),
        );
        if self.registry.insert(PeerSession::new(key.clone(), role, handle)).is_err() {
            return;
        }

        if let Some(timeout) = self.config.negotiation_timeout {
            let tx = self.transport_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                let _ = tx.send(TransportEvent::NegotiationTimeout(key)).await;
            });
        }
    }

    /// Tears the session down whatever state it is in. Unknown peers are a no-op.
    pub(super) fn peer_removed(&mut self, peer_id: &PeerId) -> bool {
        let Some(session) = self.registry.remove(peer_id) else {
            debug!("removePeerConn for unknown peer {:?}", peer_id);
            return false;
        };

        if session.has_sink() {
            self.presenter.detach_sink(peer_id);
        }
        let from = session.state();
        session.close();
        info!("Removed peer {:?} (was {:?})", peer_id, from);
        true
    }

    fn remote_description(&mut self, peer_id: &PeerId, desc: SessionDescription) {
        let Some(session) = self.registry.get(peer_id) else {
            debug!("Ignoring sessionDescription for unknown peer {:?}", peer_id);
            return;
        };
        info!("Remote {:?} received from {:?}", desc.sdp_type, peer_id);
        if !session.submit(SessionOp::ApplyRemote(desc)) {
            debug!("Worker for {:?} already stopped", peer_id);
        }
    }

    fn remote_candidate(&mut self, peer_id: &PeerId, candidate: IceCandidate) {
        let Some(session) = self.registry.get(peer_id) else {
            debug!("Ignoring iceCandidate for unknown peer {:?}", peer_id);
            return;
        };
        if !session.submit(SessionOp::AddCandidate(candidate)) {
            debug!("Worker for {:?} already stopped", peer_id);
        }
    }

    pub(super) async fn handle_transport_event(&mut self, event: TransportEvent) {
        let Some(session) = self.registry.live_mut(event.key()) else {
            debug!("Dropping event for closed session {:?}", event.key());
            return;
        };

        match event {
            TransportEvent::Prepared(key) => {
                if let Err(e) = session.transition(SessionState::Negotiating) {
                    warn!("Session for {:?}: {}", key.peer_id, e);
                }
            }

            TransportEvent::LocalDescription(key, desc) => {
                debug!("Relaying {:?} to {:?}", desc.sdp_type, key.peer_id);
                self.signaling
                    .relay_session_description(key.peer_id, desc)
                    .await;
            }

            TransportEvent::CandidateGenerated(key, candidate) => {
                self.signaling
                    .relay_ice_candidate(key.peer_id, candidate)
                    .await;
            }

            TransportEvent::RemoteStream(key, stream) => {
                if session.has_sink() {
                    debug!("Ignoring extra remote stream from {:?}", key.peer_id);
                    return;
                }
                if session.state() == SessionState::Init {
                    let _ = session.transition(SessionState::Negotiating);
                }
                if let Err(e) = session.transition(SessionState::Connected) {
                    warn!("Session for {:?}: {}", key.peer_id, e);
                    return;
                }
                session.set_sink_attached();
                info!("Connected to {:?}, attaching audio sink", key.peer_id);
                self.presenter.attach_sink(&key.peer_id, stream);
            }

            TransportEvent::NegotiationFailed(key, error) => {
                self.abort_session(key, error);
            }

            TransportEvent::NegotiationTimeout(key) => {
                if session.state() != SessionState::Negotiating
                    && session.state() != SessionState::Init
                {
                    return;
                }
                let timeout = self.config.negotiation_timeout.unwrap_or_default();
                self.abort_session(key, NegotiationError::TimedOut(timeout));
            }

            TransportEvent::Disconnected(key) => {
                warn!(
                    "Transport for {:?} reports disconnect; waiting for relay to remove it",
                    key.peer_id
                );
            }
        }
    }

    fn abort_session(&mut self, key: SessionKey, error: NegotiationError) {
        error!("Negotiation with {:?} failed: {}", key.peer_id, error);
        self.peer_removed(&key.peer_id);
        self.presenter.notify(Notice::NegotiationFailed {
            peer_id: key.peer_id,
            error,
        });
    }
}
