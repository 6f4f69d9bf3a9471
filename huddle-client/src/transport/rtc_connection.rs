use crate::config::ClientConfig;
use crate::media::{LocalStream, RemoteStream};
use crate::peer::SessionKey;
use crate::transport::{PeerConnection, PeerConnector, TransportEvent};
use anyhow::{Context, Result};
use async_trait::async_trait;
use huddle_core::{IceCandidate, SdpType, SessionDescription};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::API;
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::rtp_transceiver::RTCRtpTransceiver;
use webrtc::track::track_remote::TrackRemote;

/// Builds webrtc-rs peer connections sharing one configured API.
pub struct RtcConnector {
    api: API,
    ice_servers: Vec<RTCIceServer>,
}

impl RtcConnector {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let ice_servers = config
            .ice_servers
            .iter()
            .map(|server| RTCIceServer {
                urls: server.urls.clone(),
                username: server.username.clone().unwrap_or_default(),
                credential: server.credential.clone().unwrap_or_default(),
            })
            .collect();

        Ok(Self { api, ice_servers })
    }
}

#[async_trait]
impl PeerConnector for RtcConnector {
    async fn connect(
        &self,
        key: SessionKey,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Arc<dyn PeerConnection>> {
        let rtc_config = RTCConfiguration {
            ice_servers: self.ice_servers.clone(),
            ..Default::default()
        };

        let peer_connection = Arc::new(
            self.api
                .new_peer_connection(rtc_config)
                .await
                .context("Failed to create peer connection")?,
        );

        let state_tx = events.clone();
        let state_key = key.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                let key = state_key.clone();

                Box::pin(async move {
                    info!("Peer Connection State changed for {:?}: {:?}", key.peer_id, s);
                    if matches!(
                        s,
                        RTCPeerConnectionState::Failed | RTCPeerConnectionState::Disconnected
                    ) {
                        let _ = tx.send(TransportEvent::Disconnected(key)).await;
                    }
                })
            },
        ));

        let ice_tx = events.clone();
        let ice_key = key.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            let key = ice_key.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let candidate = IceCandidate {
                    candidate: init.candidate,
                    sdp_m_line_index: init.sdp_mline_index,
                    sdp_mid: init.sdp_mid,
                };
                let _ = tx
                    .send(TransportEvent::CandidateGenerated(key, candidate))
                    .await;
            })
        }));

        let track_tx = events;
        let track_key = key;
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();
                let key = track_key.clone();

                Box::pin(async move {
                    debug!(
                        "Remote track {} ({}) for {:?}",
                        track.id(),
                        track.codec().capability.mime_type,
                        key.peer_id
                    );
                    let stream = RemoteStream::from_track(track);
                    let _ = tx.send(TransportEvent::RemoteStream(key, stream)).await;
                })
            },
        ));

        Ok(Arc::new(RtcPeerConnection { peer_connection }))
    }
}

pub struct RtcPeerConnection {
    peer_connection: Arc<RTCPeerConnection>,
}

impl RtcPeerConnection {
    fn to_rtc(desc: SessionDescription) -> Result<RTCSessionDescription> {
        let rtc = match desc.sdp_type {
            SdpType::Offer => RTCSessionDescription::offer(desc.sdp)?,
            SdpType::Answer => RTCSessionDescription::answer(desc.sdp)?,
        };
        Ok(rtc)
    }
}

#[async_trait]
impl PeerConnection for RtcPeerConnection {
    async fn add_local_stream(&self, stream: &LocalStream) -> Result<()> {
        let rtp_sender = self
            .peer_connection
            .add_track(stream.track())
            .await
            .context("Failed to add local audio track")?;

        // RTCP has to be drained for interceptors to work.
        tokio::spawn(async move {
            let mut rtcp_buf = vec![0u8; 1500];
            while rtp_sender.read(&mut rtcp_buf).await.is_ok() {}
        });

        Ok(())
    }

    async fn create_offer(&self) -> Result<SessionDescription> {
        let offer = self.peer_connection.create_offer(None).await?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription> {
        let answer = self.peer_connection.create_answer(None).await?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_local_description(&self, desc: SessionDescription) -> Result<()> {
        self.peer_connection
            .set_local_description(Self::to_rtc(desc)?)
            .await?;
        Ok(())
    }

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<()> {
        self.peer_connection
            .set_remote_description(Self::to_rtc(desc)?)
            .await?;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: None,
        };
        self.peer_connection.add_ice_candidate(init).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}
