//! End-to-end relay scenarios against the public API, using
//! channel-backed connections in place of live sockets.

use std::sync::Arc;

use courier_core::UserId;
use courier_relay::connection::{Connection, ConnectionManager, SessionState};
use courier_relay::handlers::EventDispatcher;
use courier_relay::protocol::{EventKind, Frame};
use serde_json::json;
use tokio::sync::mpsc;

struct Client {
    conn: Arc<Connection>,
    rx: mpsc::Receiver<Frame>,
    user: UserId,
}

impl Client {
    /// Open a connection and leave it anonymous
    fn connect(manager: &Arc<ConnectionManager>, session_id: &str) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let conn = Arc::new(Connection::new(session_id.into(), tx));
        manager.add_connection(Arc::clone(&conn));
        Self {
            conn,
            rx,
            user: UserId::new(),
        }
    }

    /// Open a connection and bind it through the dispatcher
    async fn join(
        manager: &Arc<ConnectionManager>,
        dispatcher: &EventDispatcher,
        session_id: &str,
    ) -> Self {
        let client = Self::connect(manager, session_id);
        dispatcher
            .dispatch(&client.conn, bind_frame(client.user))
            .await
            .unwrap();
        client
    }

    async fn next_frame(&mut self) -> Frame {
        self.rx.recv().await.unwrap()
    }

    fn no_pending_frames(&mut self) -> bool {
        self.rx.try_recv().is_err()
    }
}

fn bind_frame(user: UserId) -> Frame {
    Frame {
        event: EventKind::Bind,
        data: Some(json!({ "userId": user })),
    }
}

fn relay_frame(to: UserId, message: &str) -> Frame {
    Frame {
        event: EventKind::RelayMessage,
        data: Some(json!({ "to": to, "message": message })),
    }
}

fn setup() -> (Arc<ConnectionManager>, EventDispatcher) {
    let manager = Arc::new(ConnectionManager::new());
    let dispatcher = EventDispatcher::new(Arc::clone(&manager));
    (manager, dispatcher)
}

#[tokio::test]
async fn two_clients_exchange_a_message() {
    let (manager, dispatcher) = setup();
    let mut alice = Client::join(&manager, &dispatcher, "s-alice").await;
    let mut bob = Client::join(&manager, &dispatcher, "s-bob").await;

    dispatcher
        .dispatch(&alice.conn, relay_frame(bob.user, "hi bob"))
        .await
        .unwrap();

    let received = bob.next_frame().await;
    assert_eq!(received.event, EventKind::ReceiveMessage);
    let data = received.data.unwrap();
    assert_eq!(data["message"], "hi bob");
    assert_eq!(data["from"], alice.user.to_string());

    let ack = alice.next_frame().await;
    assert_eq!(ack.event, EventKind::Ack);
    assert_eq!(ack.data.unwrap()["status"], "delivered");
}

#[tokio::test]
async fn message_to_offline_user_reports_recipient_offline() {
    let (manager, dispatcher) = setup();
    let mut alice = Client::join(&manager, &dispatcher, "s-alice").await;

    dispatcher
        .dispatch(&alice.conn, relay_frame(UserId::new(), "hello?"))
        .await
        .unwrap();

    let ack = alice.next_frame().await;
    assert_eq!(ack.event, EventKind::Ack);
    assert_eq!(ack.data.unwrap()["status"], "recipient-offline");
}

#[tokio::test]
async fn disconnect_makes_user_unreachable() {
    let (manager, dispatcher) = setup();
    let mut alice = Client::join(&manager, &dispatcher, "s-alice").await;
    let bob = Client::join(&manager, &dispatcher, "s-bob").await;

    manager.remove_connection("s-bob").await;
    assert_eq!(bob.conn.state().await, SessionState::Closed);

    dispatcher
        .dispatch(&alice.conn, relay_frame(bob.user, "still there?"))
        .await
        .unwrap();

    let ack = alice.next_frame().await;
    assert_eq!(ack.data.unwrap()["status"], "recipient-offline");
}

#[tokio::test]
async fn reconnect_routes_to_the_newest_session() {
    let (manager, dispatcher) = setup();
    let mut alice = Client::join(&manager, &dispatcher, "s-alice").await;

    // Bob connects, then reconnects under a new session before the old
    // one is cleaned up
    let mut bob_old = Client::join(&manager, &dispatcher, "s-bob-1").await;
    let bob_user = bob_old.user;
    let (tx, mut bob_new_rx) = mpsc::channel(16);
    let bob_new = Arc::new(Connection::new("s-bob-2".into(), tx));
    manager.add_connection(Arc::clone(&bob_new));
    dispatcher
        .dispatch(&bob_new, bind_frame(bob_user))
        .await
        .unwrap();

    dispatcher
        .dispatch(&alice.conn, relay_frame(bob_user, "which one?"))
        .await
        .unwrap();

    let received = bob_new_rx.recv().await.unwrap();
    assert_eq!(received.data.unwrap()["message"], "which one?");
    assert!(bob_old.no_pending_frames());

    // The stale session closing does not take the new binding with it
    manager.remove_connection("s-bob-1").await;
    let _ack = alice.next_frame().await;

    dispatcher
        .dispatch(&alice.conn, relay_frame(bob_user, "again"))
        .await
        .unwrap();
    let received = bob_new_rx.recv().await.unwrap();
    assert_eq!(received.data.unwrap()["message"], "again");
}

#[tokio::test]
async fn anonymous_sender_is_ignored() {
    let (manager, dispatcher) = setup();
    let mut anon = Client::connect(&manager, "s-anon");
    let mut bob = Client::join(&manager, &dispatcher, "s-bob").await;

    dispatcher
        .dispatch(&anon.conn, relay_frame(bob.user, "no identity"))
        .await
        .unwrap();

    assert!(anon.no_pending_frames());
    assert!(bob.no_pending_frames());
}

#[tokio::test]
async fn server_only_events_from_client_are_dropped() {
    let (manager, dispatcher) = setup();
    let mut alice = Client::join(&manager, &dispatcher, "s-alice").await;

    let forged = Frame {
        event: EventKind::ReceiveMessage,
        data: Some(json!({ "message": "spoofed", "from": UserId::new() })),
    };
    dispatcher.dispatch(&alice.conn, forged).await.unwrap();
    assert!(alice.no_pending_frames());

    let forged_ack = Frame {
        event: EventKind::Ack,
        data: Some(json!({ "status": "delivered" })),
    };
    dispatcher.dispatch(&alice.conn, forged_ack).await.unwrap();
    assert!(alice.no_pending_frames());
}

#[tokio::test]
async fn malformed_frames_do_not_kill_the_session() {
    let (manager, dispatcher) = setup();
    let mut alice = Client::join(&manager, &dispatcher, "s-alice").await;
    let mut bob = Client::join(&manager, &dispatcher, "s-bob").await;

    // Wire-level garbage never reaches the dispatcher
    assert!(Frame::from_json("{{not json").is_err());

    // A parseable frame with a bad payload is a handler error, not a
    // session error
    let bad = Frame {
        event: EventKind::RelayMessage,
        data: Some(json!({ "to": 42 })),
    };
    assert!(dispatcher.dispatch(&alice.conn, bad).await.is_err());

    // The session still relays afterwards
    dispatcher
        .dispatch(&alice.conn, relay_frame(bob.user, "still alive"))
        .await
        .unwrap();
    let received = bob.next_frame().await;
    assert_eq!(received.data.unwrap()["message"], "still alive");
    let ack = alice.next_frame().await;
    assert_eq!(ack.data.unwrap()["status"], "delivered");
}

#[tokio::test]
async fn presence_counts_track_joins_and_leaves() {
    let (manager, dispatcher) = setup();
    let _alice = Client::join(&manager, &dispatcher, "s-alice").await;
    let _bob = Client::join(&manager, &dispatcher, "s-bob").await;

    assert_eq!(manager.registry().online_count(), 2);
    assert_eq!(manager.connection_count(), 2);

    manager.remove_connection("s-alice").await;
    assert_eq!(manager.registry().online_count(), 1);
    assert_eq!(manager.connection_count(), 1);
}
