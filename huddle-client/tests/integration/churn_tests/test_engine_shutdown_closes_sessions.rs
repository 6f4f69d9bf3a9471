use huddle_client::SessionState;
use huddle_client::model::PeerId;

use crate::integration::{TestClient, add_peer, init_tracing, joined_client, wait_for_state};
use crate::utils::ConnCall;

#[tokio::test]
async fn test_engine_shutdown_closes_sessions() {
    init_tracing();

    let test = joined_client().await;
    let peer = PeerId::from("peer-a");

    test.client.dispatch(add_peer(&peer, true)).await.unwrap();
    assert!(wait_for_state(&test.client, &peer, SessionState::Negotiating, 2000).await);

    let TestClient {
        client,
        connector,
        task,
        ..
    } = test;
    drop(client);

    tokio::time::timeout(std::time::Duration::from_secs(2), task)
        .await
        .expect("engine did not stop")
        .expect("engine panicked");

    assert!(connector.wait_for_call(&peer, ConnCall::Close, 2000).await);
}
