use huddle_client::model::PeerId;
use huddle_client::{LocalStream, Notice, Presenter, RemoteStream};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct PresenterLog {
    monitors: usize,
    sinks: HashMap<PeerId, RemoteStream>,
    attached: Vec<PeerId>,
    detached: Vec<PeerId>,
    notices: Vec<Notice>,
}

/// Presenter that keeps the sinks it was asked to create and every notice.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    log: Arc<Mutex<PresenterLog>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn monitors(&self) -> usize {
        self.log.lock().unwrap().monitors
    }

    pub fn sink_count(&self) -> usize {
        self.log.lock().unwrap().sinks.len()
    }

    pub fn has_sink(&self, peer_id: &PeerId) -> bool {
        self.log.lock().unwrap().sinks.contains_key(peer_id)
    }

    pub fn attach_count(&self, peer_id: &PeerId) -> usize {
        self.log
            .lock()
            .unwrap()
            .attached
            .iter()
            .filter(|id| *id == peer_id)
            .count()
    }

    pub fn detached(&self) -> Vec<PeerId> {
        self.log.lock().unwrap().detached.clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.log.lock().unwrap().notices.clone()
    }

    pub async fn wait_for_notices(&self, count: usize, timeout_ms: u64) -> bool {
        let start = std::time::Instant::now();
        let timeout = std::time::Duration::from_millis(timeout_ms);

        loop {
            if self.notices().len() >= count {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}

impl Presenter for RecordingPresenter {
    fn show_local_monitor(&self, stream: &LocalStream) {
        tracing::debug!("[RecordingPresenter] local monitor {}", stream.id());
        self.log.lock().unwrap().monitors += 1;
    }

    fn attach_sink(&self, peer_id: &PeerId, stream: RemoteStream) {
        let mut log = self.log.lock().unwrap();
        log.attached.push(peer_id.clone());
        log.sinks.insert(peer_id.clone(), stream);
    }

    fn detach_sink(&self, peer_id: &PeerId) {
        let mut log = self.log.lock().unwrap();
        log.detached.push(peer_id.clone());
        log.sinks.remove(peer_id);
    }

    fn notify(&self, notice: Notice) {
        tracing::debug!("[RecordingPresenter] notice: {}", notice.message());
        self.log.lock().unwrap().notices.push(notice);
    }
}
