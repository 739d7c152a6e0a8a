use super::*;
use tokio::time::{Duration, timeout};

fn ping() -> ServerEvent {
    ServerEvent::UsersUpdate(Vec::new())
}

async fn assert_channel_has_event(rx: &mut mpsc::Receiver<ServerEvent>) -> ServerEvent {
    timeout(Duration::from_millis(200), rx.recv())
        .await
        .expect("event receive timed out")
        .expect("channel closed")
}

async fn assert_channel_empty(rx: &mut mpsc::Receiver<ServerEvent>) {
    assert!(
        timeout(Duration::from_millis(80), rx.recv()).await.is_err(),
        "expected channel to remain empty"
    );
}

#[test]
fn audience_predicate() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    assert!(Audience::All.includes(a));
    assert!(!Audience::AllExcept(a).includes(a));
    assert!(Audience::AllExcept(a).includes(b));
}

#[tokio::test]
async fn send_all_reaches_every_connection() {
    let mut hub = Hub::new();
    let (tx_a, mut rx_a) = mpsc::channel(8);
    let (tx_b, mut rx_b) = mpsc::channel(8);
    hub.register(Uuid::new_v4(), tx_a);
    hub.register(Uuid::new_v4(), tx_b);

    hub.send(Audience::All, &ping());

    assert_eq!(assert_channel_has_event(&mut rx_a).await, ping());
    assert_eq!(assert_channel_has_event(&mut rx_b).await, ping());
}

#[tokio::test]
async fn send_all_except_skips_excluded_connection() {
    let mut hub = Hub::new();
    let client_a = Uuid::new_v4();
    let client_b = Uuid::new_v4();
    let client_c = Uuid::new_v4();
    let (tx_a, mut rx_a) = mpsc::channel(8);
    let (tx_b, mut rx_b) = mpsc::channel(8);
    let (tx_c, mut rx_c) = mpsc::channel(8);
    hub.register(client_a, tx_a);
    hub.register(client_b, tx_b);
    hub.register(client_c, tx_c);

    hub.send(Audience::AllExcept(client_b), &ping());

    assert_channel_has_event(&mut rx_a).await;
    assert_channel_has_event(&mut rx_c).await;
    assert_channel_empty(&mut rx_b).await;
}

#[tokio::test]
async fn send_to_targets_one_connection() {
    let mut hub = Hub::new();
    let client_a = Uuid::new_v4();
    let (tx_a, mut rx_a) = mpsc::channel(8);
    let (tx_b, mut rx_b) = mpsc::channel(8);
    hub.register(client_a, tx_a);
    hub.register(Uuid::new_v4(), tx_b);

    hub.send_to(client_a, ping());

    assert_channel_has_event(&mut rx_a).await;
    assert_channel_empty(&mut rx_b).await;
}

#[tokio::test]
async fn full_queue_drops_frame_for_that_recipient_only() {
    let mut hub = Hub::new();
    let (tx_slow, mut rx_slow) = mpsc::channel(1);
    let (tx_fast, mut rx_fast) = mpsc::channel(8);
    hub.register(Uuid::new_v4(), tx_slow);
    hub.register(Uuid::new_v4(), tx_fast);

    hub.send(Audience::All, &ping());
    hub.send(Audience::All, &ping());

    assert_channel_has_event(&mut rx_slow).await;
    assert_channel_empty(&mut rx_slow).await;
    assert_channel_has_event(&mut rx_fast).await;
    assert_channel_has_event(&mut rx_fast).await;
}

#[test]
fn closed_receiver_is_ignored() {
    let mut hub = Hub::new();
    let (tx, rx) = mpsc::channel(8);
    let conn_id = Uuid::new_v4();
    hub.register(conn_id, tx);
    drop(rx);

    hub.send(Audience::All, &ping());
    hub.send_to(conn_id, ping());
}

#[test]
fn unregister_forgets_connection() {
    let mut hub = Hub::new();
    let (tx, _rx) = mpsc::channel(8);
    let conn_id = Uuid::new_v4();
    hub.register(conn_id, tx);

    assert!(hub.is_connected(conn_id));
    assert!(hub.unregister(conn_id));
    assert!(!hub.unregister(conn_id));
    assert_eq!(hub.connection_count(), 0);
}
