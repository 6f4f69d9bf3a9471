use crate::model::peer::PeerId;
use crate::model::room::RoomName;
use crate::model::session::{IceCandidate, SessionDescription};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// Messages a client sends to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientSignal {
    #[serde(rename = "joinChatRoom")]
    JoinChatRoom(RoomName),

    #[serde(rename = "leaveChatRoom")]
    LeaveChatRoom(RoomName),

    #[serde(rename = "relayICECandidate")]
    RelayIceCandidate {
        peer_id: PeerId,
        ice_candidate: IceCandidate,
    },

    #[serde(rename = "relaySessionDescription")]
    RelaySessionDescription {
        peer_id: PeerId,
        session_description: SessionDescription,
    },
}

impl ClientSignal {
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientSignal::JoinChatRoom(_) => "joinChatRoom",
            ClientSignal::LeaveChatRoom(_) => "leaveChatRoom",
            ClientSignal::RelayIceCandidate { .. } => "relayICECandidate",
            ClientSignal::RelaySessionDescription { .. } => "relaySessionDescription",
        }
    }
}

/// Messages the relay sends to a client.
///
/// `SessionDescription` carries offers as well as answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerSignal {
    #[serde(rename = "addPeerConn")]
    AddPeerConn {
        peer_id: PeerId,
        should_create_offer: bool,
    },

    #[serde(rename = "removePeerConn")]
    RemovePeerConn { peer_id: PeerId },

    #[serde(rename = "sessionDescription")]
    SessionDescription {
        peer_id: PeerId,
        session_description: SessionDescription,
    },

    #[serde(rename = "iceCandidate")]
    IceCandidate {
        peer_id: PeerId,
        ice_candidate: IceCandidate,
    },
}

impl ServerSignal {
    pub fn peer_id(&self) -> &PeerId {
        match self {
            ServerSignal::AddPeerConn { peer_id, .. }
            | ServerSignal::RemovePeerConn { peer_id }
            | ServerSignal::SessionDescription { peer_id, .. }
            | ServerSignal::IceCandidate { peer_id, .. } => peer_id,
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            ServerSignal::AddPeerConn { .. } => "addPeerConn",
            ServerSignal::RemovePeerConn { .. } => "removePeerConn",
            ServerSignal::SessionDescription { .. } => "sessionDescription",
            ServerSignal::IceCandidate { .. } => "iceCandidate",
        }
    }
}
