use crate::signaling::SignalingOutput;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientSignal, ServerSignal};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info, warn};

/// WebSocket connection to a relay, one JSON text frame per signal.
///
/// Inbound signals are forwarded in arrival order on the receiver returned by
/// [`WsSignaling::connect`]; the receiver ends when the socket closes.
#[derive(Clone)]
pub struct WsSignaling {
    tx: mpsc::UnboundedSender<ClientSignal>,
}

impl WsSignaling {
    pub async fn connect(url: &str) -> Result<(Self, mpsc::Receiver<ServerSignal>)> {
        let (ws, _) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to relay at {}", url))?;
        info!("Connected to relay at {}", url);

        let (mut sink, mut stream) = ws.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<ClientSignal>();
        let (inbound_tx, inbound_rx) = mpsc::channel(256);

        tokio::spawn(async move {
            while let Some(signal) = rx.recv().await {
                let json = match serde_json::to_string(&signal) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize signal message: {}", e);
                        continue;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            let _ = sink.close().await;
        });

        tokio::spawn(async move {
            while let Some(Ok(msg)) = stream.next().await {
                match msg {
                    Message::Text(text) => {
                        let Some(signal) = decode_server_frame(&text) else {
                            continue;
                        };
                        if inbound_tx.send(signal).await.is_err() {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            info!("Relay connection closed");
        });

        Ok((Self { tx }, inbound_rx))
    }
}

#[async_trait]
impl SignalingOutput for WsSignaling {
    async fn emit(&self, signal: ClientSignal) {
        if self.tx.send(signal).is_err() {
            warn!("Attempted to emit signal after relay connection closed");
        }
    }
}

/// Parses one text frame from the relay. Malformed frames are logged and dropped.
pub fn decode_server_frame(text: &str) -> Option<ServerSignal> {
    match serde_json::from_str::<ServerSignal>(text) {
        Ok(signal) => Some(signal),
        Err(e) => {
            warn!("Invalid signal from relay: {}. Text: {}", e, text);
            None
        }
    }
}
