use huddle_client::model::{IceCandidate, PeerId, ServerSignal, SessionDescription};
use huddle_client::{ClientConfig, SessionState};

use crate::integration::{
    add_peer, create_test_client, init_tracing, joined_client, wait_for_state,
};
use crate::utils::MockCapture;

#[tokio::test]
async fn test_duplicate_add_is_ignored() {
    init_tracing();

    let test = joined_client().await;
    let peer = PeerId::from("peer-a");

    test.client.dispatch(add_peer(&peer, true)).await.unwrap();
    assert!(wait_for_state(&test.client, &peer, SessionState::Negotiating, 2000).await);
    let first = test.client.sessions().await.unwrap();

    test.client.dispatch(add_peer(&peer, false)).await.unwrap();
    let second = test.client.sessions().await.unwrap();

    assert_eq!(first, second, "existing session must be left untouched");
    assert_eq!(test.connector.connects(), 1);
}

#[tokio::test]
async fn test_add_without_local_audio_is_ignored() {
    init_tracing();

    let test = create_test_client(MockCapture::granting(), ClientConfig::default());
    let peer = PeerId::from("peer-a");

    test.client.dispatch(add_peer(&peer, true)).await.unwrap();

    assert!(test.client.sessions().await.unwrap().is_empty());
    assert_eq!(test.connector.connects(), 0);
}

#[tokio::test]
async fn test_signals_for_unknown_peer_are_ignored() {
    init_tracing();

    let test = joined_client().await;
    let stranger = PeerId::from("stranger");

    test.client
        .dispatch(ServerSignal::SessionDescription {
            peer_id: stranger.clone(),
            session_description: SessionDescription::offer("unsolicited"),
        })
        .await
        .unwrap();
    test.client
        .dispatch(ServerSignal::IceCandidate {
            peer_id: stranger.clone(),
            ice_candidate: IceCandidate::new("candidate:x", Some(0)),
        })
        .await
        .unwrap();
    test.client
        .dispatch(ServerSignal::RemovePeerConn { peer_id: stranger })
        .await
        .unwrap();

    assert!(test.client.sessions().await.unwrap().is_empty());
    assert_eq!(test.connector.connects(), 0);
    assert_eq!(test.signaling.signals().await.len(), 1, "only the join");
}

#[tokio::test]
async fn test_one_sink_per_peer() {
    init_tracing();

    let test = joined_client().await;
    let peer = PeerId::from("peer-a");

    test.client.dispatch(add_peer(&peer, true)).await.unwrap();
    assert!(wait_for_state(&test.client, &peer, SessionState::Negotiating, 2000).await);

    assert!(test.connector.emit_remote_stream(&peer).await);
    assert!(test.connector.emit_remote_stream(&peer).await);
    assert!(wait_for_state(&test.client, &peer, SessionState::Connected, 2000).await);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert_eq!(test.presenter.attach_count(&peer), 1);
    assert_eq!(test.presenter.sink_count(), 1);
}
