use crate::error::NegotiationError;
use crate::media::LocalStream;
use crate::peer::{Role, SessionKey};
use crate::transport::{PeerConnection, PeerConnector, TransportEvent};
use huddle_core::{IceCandidate, SessionDescription};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Inbound negotiation work for one session, executed in arrival order.
#[derive(Debug)]
pub(crate) enum SessionOp {
    ApplyRemote(SessionDescription),
    AddCandidate(IceCandidate),
}

/// Engine's end of a session worker. Dropping it cancels the worker.
pub(crate) struct SessionHandle {
    ops_tx: mpsc::UnboundedSender<SessionOp>,
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl SessionHandle {
    pub(crate) fn submit(&self, op: SessionOp) -> bool {
        self.ops_tx.send(op).is_ok()
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }

    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        let (ops_tx, _ops_rx) = mpsc::unbounded_channel();
        Self {
            ops_tx,
            cancel_tx: None,
        }
    }
}

/// Drives one peer connection through setup and the offer/answer exchange.
///
/// Results go back to the engine as [`TransportEvent`]s; the worker never
/// touches engine state. Whatever step is outstanding when the handle is
/// cancelled is dropped, then the connection (if one was built) is closed.
pub(crate) struct SessionWorker {
    key: SessionKey,
    role: Role,
    connector: Arc<dyn PeerConnector>,
    stream: LocalStream,
    ops_rx: mpsc::UnboundedReceiver<SessionOp>,
    events: mpsc::Sender<TransportEvent>,
}

impl SessionWorker {
    pub(crate) fn spawn(
        key: SessionKey,
        role: Role,
        connector: Arc<dyn PeerConnector>,
        stream: LocalStream,
        events: mpsc::Sender<TransportEvent>,
    ) -> SessionHandle {
        let (ops_tx, ops_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let worker = Self {
            key,
            role,
            connector,
            stream,
            ops_rx,
            events,
        };
        tokio::spawn(worker.run(cancel_rx));

        SessionHandle {
            ops_tx,
            cancel_tx: Some(cancel_tx),
        }
    }

    async fn run(mut self, mut cancel: oneshot::Receiver<()>) {
        let key = self.key.clone();
        let mut connection: Option<Arc<dyn PeerConnection>> = None;

        tokio::select! {
            _ = &mut cancel => {
                debug!("Session {} for {:?} cancelled", key.id, key.peer_id);
            }
            _ = self.process(&mut connection) => {}
        }

        let Some(connection) = connection else {
            return;
        };
        match connection.close().await {
            Ok(()) => debug!("Closed connection for {:?}", key.peer_id),
            Err(e) => warn!("Failed to close connection for {:?}: {:?}", key.peer_id, e),
        }
    }

    async fn process(&mut self, slot: &mut Option<Arc<dyn PeerConnection>>) {
        let connection = match self
            .connector
            .connect(self.key.clone(), self.events.clone())
            .await
        {
            Ok(connection) => connection,
            Err(e) => {
                self.fail(NegotiationError::from_anyhow(NegotiationError::Setup, e))
                    .await;
                return;
            }
        };
        *slot = Some(connection.clone());

        if let Err(e) = connection.add_local_stream(&self.stream).await {
            self.fail(NegotiationError::from_anyhow(NegotiationError::Setup, e))
                .await;
            return;
        }
        self.report(TransportEvent::Prepared(self.key.clone())).await;

        if self.role == Role::Offerer {
            if let Err(e) = self.offer(connection.as_ref()).await {
                self.fail(e).await;
                return;
            }
        }

        while let Some(op) = self.ops_rx.recv().await {
            match op {
                SessionOp::ApplyRemote(desc) => {
                    if let Err(e) = self.apply_remote(connection.as_ref(), desc).await {
                        self.fail(e).await;
                        return;
                    }
                }
                SessionOp::AddCandidate(candidate) => {
                    if let Err(e) = connection.add_ice_candidate(candidate).await {
                        warn!("Failed to add ICE candidate for {:?}: {:?}", self.key.peer_id, e);
                    }
                }
            }
        }
    }

    async fn offer(&self, connection: &dyn PeerConnection) -> Result<(), NegotiationError> {
        info!("Creating RTC offer to {:?}", self.key.peer_id);

        let offer = connection
            .create_offer()
            .await
            .map_err(|e| NegotiationError::from_anyhow(NegotiationError::CreateOffer, e))?;
        connection
            .set_local_description(offer.clone())
            .await
            .map_err(|e| NegotiationError::from_anyhow(NegotiationError::SetLocalDescription, e))?;

        self.report(TransportEvent::LocalDescription(self.key.clone(), offer))
            .await;
        Ok(())
    }

    async fn apply_remote(
        &self,
        connection: &dyn PeerConnection,
        desc: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let is_offer = desc.is_offer();
        connection
            .set_remote_description(desc)
            .await
            .map_err(|e| NegotiationError::from_anyhow(NegotiationError::SetRemoteDescription, e))?;
        debug!("setRemoteDescription succeeded for {:?}", self.key.peer_id);

        if !is_offer {
            return Ok(());
        }

        info!("Creating answer for {:?}", self.key.peer_id);
        let answer = connection
            .create_answer()
            .await
            .map_err(|e| NegotiationError::from_anyhow(NegotiationError::CreateAnswer, e))?;
        connection
            .set_local_description(answer.clone())
            .await
            .map_err(|e| NegotiationError::from_anyhow(NegotiationError::SetLocalDescription, e))?;

        self.report(TransportEvent::LocalDescription(self.key.clone(), answer))
            .await;
        Ok(())
    }

    async fn fail(&self, error: NegotiationError) {
        self.report(TransportEvent::NegotiationFailed(self.key.clone(), error))
            .await;
    }

    async fn report(&self, event: TransportEvent) {
        let _ = self.events.send(event).await;
    }
}
