use crate::engine::{ClientEngine, OnDenied, PendingJoin};
use crate::media::{Acquire, CaptureOutcome};
use crate::presenter::Notice;
use huddle_core::RoomName;
use tracing::{debug, info, warn};

impl ClientEngine {
    /// Joins once local audio is available. Membership is advisory: joining a
    /// second room, or the same room twice, just tells the relay again.
    pub(super) async fn join(&mut self, room: RoomName, on_denied: Option<OnDenied>) {
        if room.is_empty() {
            warn!("No room was provided");
            return;
        }

        match self.media.acquire(self.capture_tx.clone()) {
            Acquire::Ready(_) => {
                self.signaling.join_room(room).await;
            }
            Acquire::Started => {
                self.pending_joins.push(PendingJoin { room, on_denied });
            }
            Acquire::Pending => {
                debug!("Capture already requested; queueing join for '{}'", room);
                self.pending_joins.push(PendingJoin { room, on_denied });
            }
        }
    }

    /// Only tells the relay. Sessions are torn down by the `removePeerConn`
    /// events that follow, and local audio stays captured for the next room.
    pub(super) async fn leave(&mut self, room: RoomName) {
        info!("Leaving room '{}'", room);
        self.signaling.leave_room(room).await;
    }

    pub(super) async fn finish_capture(&mut self, outcome: CaptureOutcome) {
        let Some(outcome) = self.media.complete(outcome) else {
            return;
        };
        let pending = std::mem::take(&mut self.pending_joins);

        match outcome {
            Ok(stream) => {
                info!("Access granted to audio");
                self.presenter.show_local_monitor(&stream);
                for join in pending {
                    self.signaling.join_room(join.room).await;
                }
            }
            Err(e) => {
                warn!("Access denied for audio: {}", e);
                self.presenter.notify(Notice::MediaAccessDenied);
                for join in pending {
                    if let Some(on_denied) = join.on_denied {
                        on_denied();
                    }
                }
            }
        }
    }

    /// Logout: every session closed, every sink gone, microphone released.
    pub(super) fn release_all(&mut self) {
        let closed = self.close_all_sessions();
        self.pending_joins.clear();
        if self.media.release().is_some() {
            info!("Released local audio");
        }
        info!("Disconnected from {} peers", closed);
    }

    pub(super) fn close_all_sessions(&mut self) -> usize {
        let sessions = self.registry.drain();
        let count = sessions.len();
        for session in sessions {
            if session.has_sink() {
                self.presenter.detach_sink(session.peer_id());
            }
            session.close();
        }
        count
    }
}
