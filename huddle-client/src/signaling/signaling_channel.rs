use crate::signaling::SignalingOutput;
use huddle_core::{ClientSignal, IceCandidate, PeerId, RoomName, SessionDescription};
use std::sync::Arc;
use tracing::debug;

/// Named outbound events over a transport supplied by the caller.
#[derive(Clone)]
pub struct SignalingChannel {
    output: Arc<dyn SignalingOutput>,
}

impl SignalingChannel {
    pub fn new(output: Arc<dyn SignalingOutput>) -> Self {
        Self { output }
    }

    pub async fn emit(&self, signal: ClientSignal) {
        debug!("OUT {}", signal.event_name());
        self.output.emit(signal).await;
    }

    pub async fn join_room(&self, room: RoomName) {
        self.emit(ClientSignal::JoinChatRoom(room)).await;
    }

    pub async fn leave_room(&self, room: RoomName) {
        self.emit(ClientSignal::LeaveChatRoom(room)).await;
    }

    pub async fn relay_ice_candidate(&self, peer_id: PeerId, ice_candidate: IceCandidate) {
        self.emit(ClientSignal::RelayIceCandidate {
            peer_id,
            ice_candidate,
        })
        .await;
    }

    pub async fn relay_session_description(
        &self,
        peer_id: PeerId,
        session_description: SessionDescription,
    ) {
        self.emit(ClientSignal::RelaySessionDescription {
            peer_id,
            session_description,
        })
        .await;
    }
}
