use huddle_client::model::{PeerId, SdpType, ServerSignal, SessionDescription};
use huddle_client::{Role, SessionState};

use crate::integration::{add_peer, init_tracing, joined_client, session_for, wait_for_state};
use crate::utils::ConnCall;

#[tokio::test]
async fn test_offerer_connects() {
    init_tracing();

    let test = joined_client().await;
    let peer = PeerId::from("peer-b");

    test.client.dispatch(add_peer(&peer, true)).await.unwrap();

    assert!(
        test.signaling
            .wait_for_description(&peer, SdpType::Offer, 2000)
            .await,
        "offer should be relayed to the new peer"
    );
    let session = session_for(&test.client, &peer).await.expect("session missing");
    assert_eq!(session.role, Role::Offerer);
    assert_eq!(session.state, SessionState::Negotiating);

    let conn = test.connector.connection(&peer).unwrap();
    assert_eq!(
        conn.calls(),
        vec![
            ConnCall::AddStream("test-mic".to_owned()),
            ConnCall::CreateOffer,
            ConnCall::SetLocal(SdpType::Offer),
        ]
    );

    test.client
        .dispatch(ServerSignal::SessionDescription {
            peer_id: peer.clone(),
            session_description: SessionDescription::answer("remote-answer"),
        })
        .await
        .unwrap();
    assert!(
        test.connector
            .wait_for_call(&peer, ConnCall::SetRemote(SdpType::Answer), 2000)
            .await
    );
    // An answer never triggers a reply.
    assert_eq!(test.signaling.descriptions_for(&peer, SdpType::Answer).await, 0);

    assert!(test.connector.emit_remote_stream(&peer).await);
    assert!(wait_for_state(&test.client, &peer, SessionState::Connected, 2000).await);
    assert!(test.presenter.has_sink(&peer));
    assert!(test.presenter.notices().is_empty());
}
