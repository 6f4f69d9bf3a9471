mod client;
mod engine_command;
mod membership;
mod negotiation;

pub use client::*;
pub(crate) use engine_command::*;

use crate::config::ClientConfig;
use crate::media::{AudioCapture, CaptureOutcome, LocalMedia};
use crate::peer::PeerRegistry;
use crate::presenter::Presenter;
use crate::signaling::{SignalingChannel, SignalingOutput};
use crate::transport::{PeerConnector, TransportEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// The actor that owns all room and peer state.
///
/// Commands from the [`Client`] handle, events from session workers and
/// capture results are processed one at a time, so no state here is shared
/// or locked.
pub(crate) struct ClientEngine {
    config: ClientConfig,
    media: LocalMedia,
    registry: PeerRegistry,
    pending_joins: Vec<PendingJoin>,
    signaling: SignalingChannel,
    presenter: Arc<dyn Presenter>,
    connector: Arc<dyn PeerConnector>,

    command_rx: mpsc::Receiver<EngineCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
    capture_rx: mpsc::Receiver<CaptureOutcome>,
    capture_tx: mpsc::Sender<CaptureOutcome>,
}

impl ClientEngine {
    pub(crate) fn new(
        config: ClientConfig,
        capture: Arc<dyn AudioCapture>,
        connector: Arc<dyn PeerConnector>,
        signaling: Arc<dyn SignalingOutput>,
        presenter: Arc<dyn Presenter>,
        command_rx: mpsc::Receiver<EngineCommand>,
    ) -> Self {
        let (transport_tx, transport_rx) = mpsc::channel(256);
        let (capture_tx, capture_rx) = mpsc::channel(4);

        Self {
            config,
            media: LocalMedia::new(capture),
            registry: PeerRegistry::new(),
            pending_joins: Vec::new(),
            signaling: SignalingChannel::new(signaling),
            presenter,
            connector,
            command_rx,
            transport_rx,
            transport_tx,
            capture_rx,
            capture_tx,
        }
    }

    pub(crate) async fn run(mut self) {
        info!("Client engine started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down client engine.");
                            break;
                        }
                    }
                }

                Some(evt) = self.transport_rx.recv() => {
                    self.handle_transport_event(evt).await;
                }

                Some(outcome) = self.capture_rx.recv() => {
                    self.finish_capture(outcome).await;
                }
            }
        }

        self.close_all_sessions();
        info!("Client engine finished");
    }

    async fn handle_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Join { room, on_denied } => self.join(room, on_denied).await,
            EngineCommand::Leave { room } => self.leave(room).await,
            EngineCommand::ReleaseAll => self.release_all(),
            EngineCommand::Signal(signal) => self.handle_signal(signal),
            EngineCommand::Sessions(reply) => {
                let _ = reply.send(self.registry.snapshot());
            }
            EngineCommand::HasLocalMedia(reply) => {
                let _ = reply.send(self.media.stream().is_some());
            }
        }
    }
}
