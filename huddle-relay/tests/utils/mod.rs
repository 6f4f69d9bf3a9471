use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use huddle_client::model::{PeerId, ServerSignal};
use huddle_client::{
    Client, ClientConfig, LocalStream, Notice, OpusTrackCapture, Presenter, RemoteStream,
    RtcConnector, WsSignaling,
};
use huddle_relay::{RelayService, router};
use tokio::sync::mpsc;

/// Serves a relay on an ephemeral local port.
pub async fn spawn_relay() -> (SocketAddr, RelayService) {
    let service = RelayService::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test relay");
    let addr = listener.local_addr().unwrap();

    let app = router(service.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, service)
}

pub async fn connect(addr: SocketAddr) -> (WsSignaling, mpsc::Receiver<ServerSignal>) {
    WsSignaling::connect(&format!("ws://{}/ws", addr))
        .await
        .expect("Failed to connect to test relay")
}

pub async fn next_signal(rx: &mut mpsc::Receiver<ServerSignal>, timeout_ms: u64) -> Option<ServerSignal> {
    tokio::time::timeout(Duration::from_millis(timeout_ms), rx.recv())
        .await
        .ok()
        .flatten()
}

/// Polls until the room has `count` members.
pub async fn wait_for_members(
    service: &RelayService,
    room: &str,
    count: usize,
    timeout_ms: u64,
) -> bool {
    let start = std::time::Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let room = room.into();

    loop {
        if service.room_members(&room).len() == count {
            return true;
        }
        if start.elapsed() > timeout {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Presenter for clients that only need to negotiate.
pub struct SilentPresenter;

impl Presenter for SilentPresenter {
    fn show_local_monitor(&self, _stream: &LocalStream) {}

    fn attach_sink(&self, _peer_id: &PeerId, _stream: RemoteStream) {}

    fn detach_sink(&self, _peer_id: &PeerId) {}

    fn notify(&self, notice: Notice) {
        tracing::warn!("[SilentPresenter] {}", notice.message());
    }
}

/// A full client on webrtc-rs, talking to the relay at `addr`.
pub async fn spawn_client(addr: SocketAddr) -> Client {
    let (signaling, inbound) = connect(addr).await;
    let config = ClientConfig {
        ice_servers: Vec::new(),
        ..ClientConfig::default()
    };
    let connector = RtcConnector::new(&config).expect("Failed to build connector");

    let (client, _task) = Client::spawn(
        config,
        Arc::new(OpusTrackCapture::default()),
        Arc::new(connector),
        Arc::new(signaling),
        Arc::new(SilentPresenter),
    );
    client.forward_inbound(inbound);
    client
}

pub async fn wait_for_sessions(client: &Client, count: usize, timeout_ms: u64) -> bool {
    let start = std::time::Instant::now();
    let timeout = Duration::from_millis(timeout_ms);

    loop {
        if client.sessions().await.map(|s| s.len()).unwrap_or(0) == count {
            return true;
        }
        if start.elapsed() > timeout {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
