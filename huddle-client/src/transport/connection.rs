use crate::media::LocalStream;
use crate::peer::SessionKey;
use crate::transport::TransportEvent;
use anyhow::Result;
use async_trait::async_trait;
use huddle_core::{IceCandidate, SessionDescription};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One negotiated connection to a remote peer.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn add_local_stream(&self, stream: &LocalStream) -> Result<()>;

    async fn create_offer(&self) -> Result<SessionDescription>;

    async fn create_answer(&self) -> Result<SessionDescription>;

    async fn set_local_description(&self, desc: SessionDescription) -> Result<()>;

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Builds connections. Discovered local candidates, incoming remote streams
/// and connection-state changes are reported on `events`, tagged with `key`.
#[async_trait]
pub trait PeerConnector: Send + Sync + 'static {
    async fn connect(
        &self,
        key: SessionKey,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Arc<dyn PeerConnection>>;
}
