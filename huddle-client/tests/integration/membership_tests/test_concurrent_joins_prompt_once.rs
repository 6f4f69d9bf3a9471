use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use huddle_client::model::RoomName;
use huddle_client::{ClientConfig, Notice};

use crate::integration::{create_test_client, init_tracing};
use crate::utils::MockCapture;

#[tokio::test]
async fn test_concurrent_joins_prompt_once() {
    init_tracing();

    let capture = MockCapture::granting().with_delay(100);
    let test = create_test_client(capture, ClientConfig::default());

    test.client.join("first", || {}).await.unwrap();
    test.client.join("second", || {}).await.unwrap();

    assert!(test.signaling.wait_for_signals(2, 2000).await);

    assert_eq!(test.capture.calls(), 1);
    assert_eq!(
        test.signaling.joins().await,
        vec![RoomName::from("first"), RoomName::from("second")],
        "queued joins are released in order"
    );
    assert_eq!(test.presenter.monitors(), 1);
}

#[tokio::test]
async fn test_pending_joins_all_denied() {
    init_tracing();

    let capture = MockCapture::denying().with_delay(100);
    let test = create_test_client(capture, ClientConfig::default());
    let denied = Arc::new(AtomicUsize::new(0));

    for room in ["first", "second"] {
        let counter = denied.clone();
        test.client
            .join(room, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();
    }

    assert!(test.presenter.wait_for_notices(1, 2000).await);
    // Give a stray second notice the chance to show up.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert_eq!(test.capture.calls(), 1);
    assert_eq!(test.presenter.notices(), vec![Notice::MediaAccessDenied]);
    assert_eq!(denied.load(Ordering::SeqCst), 2);
    assert!(test.signaling.signals().await.is_empty());
}
