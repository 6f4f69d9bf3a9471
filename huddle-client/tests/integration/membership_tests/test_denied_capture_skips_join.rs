use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use huddle_client::{ClientConfig, Notice};

use crate::integration::{ROOM, create_test_client, init_tracing};
use crate::utils::MockCapture;

#[tokio::test]
async fn test_denied_capture_skips_join() {
    init_tracing();

    let test = create_test_client(MockCapture::denying(), ClientConfig::default());
    let denied = Arc::new(AtomicUsize::new(0));

    let counter = denied.clone();
    test.client
        .join(ROOM, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert!(test.presenter.wait_for_notices(1, 2000).await);
    assert_eq!(test.presenter.notices(), vec![Notice::MediaAccessDenied]);
    assert_eq!(
        Notice::MediaAccessDenied.message(),
        "You chose not to provide access to your microphone, so real-time voice chat is unavailable."
    );
    assert_eq!(denied.load(Ordering::SeqCst), 1, "on_denied should run once");

    assert!(test.signaling.signals().await.is_empty(), "relay must not hear about the join");
    assert!(!test.client.has_local_media().await.unwrap());
    assert_eq!(test.presenter.monitors(), 0);
}

#[tokio::test]
async fn test_join_retried_after_denial() {
    init_tracing();

    let test = create_test_client(MockCapture::denying(), ClientConfig::default());

    test.client.join(ROOM, || {}).await.unwrap();
    assert!(test.presenter.wait_for_notices(1, 2000).await);

    test.capture.set_grant(true);
    test.client.join(ROOM, || {}).await.unwrap();
    assert!(test.signaling.wait_for_signals(1, 2000).await);

    assert_eq!(test.capture.calls(), 2, "a refused prompt may be asked again");
    assert_eq!(test.signaling.joins().await.len(), 1);
    assert!(test.client.has_local_media().await.unwrap());
}
