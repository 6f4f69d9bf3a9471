use std::time::Duration;

use huddle_client::model::PeerId;
use huddle_client::{ClientConfig, NegotiationError, Notice, SessionState};

use crate::integration::{
    add_peer, init_tracing, joined_client_with, session_for, wait_for_no_session, wait_for_state,
};

fn with_timeout(ms: u64) -> ClientConfig {
    ClientConfig {
        negotiation_timeout: Some(Duration::from_millis(ms)),
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn test_stalled_negotiation_times_out() {
    init_tracing();

    let test = joined_client_with(with_timeout(150)).await;
    let peer = PeerId::from("peer-silent");

    // Answerer that never receives an offer.
    test.client.dispatch(add_peer(&peer, false)).await.unwrap();

    assert!(wait_for_no_session(&test.client, &peer, 2000).await);
    assert_eq!(
        test.presenter.notices(),
        vec![Notice::NegotiationFailed {
            peer_id: peer.clone(),
            error: NegotiationError::TimedOut(Duration::from_millis(150)),
        }]
    );
}

#[tokio::test]
async fn test_timeout_spares_connected_session() {
    init_tracing();

    let test = joined_client_with(with_timeout(200)).await;
    let peer = PeerId::from("peer-a");

    test.client.dispatch(add_peer(&peer, true)).await.unwrap();
    assert!(wait_for_state(&test.client, &peer, SessionState::Negotiating, 2000).await);
    assert!(test.connector.emit_remote_stream(&peer).await);
    assert!(wait_for_state(&test.client, &peer, SessionState::Connected, 2000).await);

    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(
        session_for(&test.client, &peer).await.map(|s| s.state),
        Some(SessionState::Connected)
    );
    assert!(test.presenter.notices().is_empty());
}

#[tokio::test]
async fn test_no_timeout_by_default() {
    init_tracing();

    let test = crate::integration::joined_client().await;
    let peer = PeerId::from("peer-silent");

    test.client.dispatch(add_peer(&peer, false)).await.unwrap();
    assert!(wait_for_state(&test.client, &peer, SessionState::Negotiating, 2000).await);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(session_for(&test.client, &peer).await.is_some());
}
