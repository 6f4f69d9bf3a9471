use crate::RelayService;
use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientSignal, PeerId};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub fn router(service: RelayService) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(service)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<RelayService>,
) -> impl IntoResponse {
    let peer_id = PeerId::generate();

    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, service))
}

async fn handle_socket(socket: WebSocket, peer_id: PeerId, service: RelayService) {
    info!("New WebSocket connection: {:?}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_peer(peer_id.clone(), tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(signal) = rx.recv().await {
            let json = match serde_json::to_string(&signal) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize signal message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let peer_id = peer_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientSignal>(&text) {
                        Ok(signal) => service.handle(&peer_id, signal),
                        Err(e) => warn!("Invalid ClientSignal from {:?}: {:?}", peer_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.remove_peer(&peer_id);
    info!("WebSocket disconnected: {:?}", peer_id);
}
