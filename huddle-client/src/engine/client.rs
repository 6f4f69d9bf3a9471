use crate::config::ClientConfig;
use crate::engine::{ClientEngine, EngineCommand};
use crate::error::ClientError;
use crate::media::AudioCapture;
use crate::peer::SessionSnapshot;
use crate::presenter::Presenter;
use crate::signaling::SignalingOutput;
use crate::transport::PeerConnector;
use huddle_core::{RoomName, ServerSignal};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::info;

/// Cheap, cloneable handle to a running client engine.
///
/// This is what the presentation layer holds: it enters and leaves rooms and
/// feeds in whatever the relay sends.
#[derive(Clone)]
pub struct Client {
    command_tx: mpsc::Sender<EngineCommand>,
}

impl Client {
    /// Starts the engine on the current tokio runtime.
    pub fn spawn(
        config: ClientConfig,
        capture: Arc<dyn AudioCapture>,
        connector: Arc<dyn PeerConnector>,
        signaling: Arc<dyn SignalingOutput>,
        presenter: Arc<dyn Presenter>,
    ) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer);
        let engine = ClientEngine::new(
            config, capture, connector, signaling, presenter, command_rx,
        );
        let task = tokio::spawn(engine.run());

        (Self { command_tx }, task)
    }

    /// Enters `room`. `on_denied` runs if the microphone prompt is refused,
    /// in which case the relay is never told about the join.
    pub async fn join<F>(&self, room: impl Into<RoomName>, on_denied: F) -> Result<(), ClientError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.send(EngineCommand::Join {
            room: room.into(),
            on_denied: Some(Box::new(on_denied)),
        })
        .await
    }

    pub async fn leave(&self, room: impl Into<RoomName>) -> Result<(), ClientError> {
        self.send(EngineCommand::Leave { room: room.into() }).await
    }

    /// Closes every peer session and releases the microphone. For logout.
    pub async fn release_all(&self) -> Result<(), ClientError> {
        self.send(EngineCommand::ReleaseAll).await
    }

    /// Hands one message from the relay to the engine.
    pub async fn dispatch(&self, signal: ServerSignal) -> Result<(), ClientError> {
        self.send(EngineCommand::Signal(signal)).await
    }

    /// Forwards everything arriving on `inbound` to the engine, in order,
    /// until either side goes away.
    pub fn forward_inbound(&self, mut inbound: mpsc::Receiver<ServerSignal>) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            while let Some(signal) = inbound.recv().await {
                if client.dispatch(signal).await.is_err() {
                    break;
                }
            }
            info!("Inbound signal stream ended");
        })
    }

    pub async fn sessions(&self) -> Result<Vec<SessionSnapshot>, ClientError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::Sessions(tx)).await?;
        rx.await.map_err(|_| ClientError::EngineClosed)
    }

    pub async fn has_local_media(&self) -> Result<bool, ClientError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::HasLocalMedia(tx)).await?;
        rx.await.map_err(|_| ClientError::EngineClosed)
    }

    async fn send(&self, cmd: EngineCommand) -> Result<(), ClientError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| ClientError::EngineClosed)
    }
}
