//! WebSocket round trips against a live server

use std::net::SocketAddr;
use std::time::Duration;

use desksos_server::{create_router, AppState, Config};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(AppState::shared(Config::default()).unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn connect(addr: SocketAddr) -> Socket {
    let (socket, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    socket
}

async fn send(socket: &mut Socket, frame: Value) {
    socket.send(Message::Text(frame.to_string().into())).await.unwrap();
}

/// Next text frame as JSON, failing after a second of silence
async fn recv(socket: &mut Socket) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(1), socket.next())
            .await
            .expect("timed out waiting for frame")
            .expect("socket closed")
            .unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

#[tokio::test]
async fn test_join_message_and_disconnect_over_socket() {
    let addr = spawn_server().await;
    let mut alice = connect(addr).await;

    send(&mut alice, json!({"event": "user:join", "data": {"id": "u1", "name": "Alice"}})).await;
    let update = recv(&mut alice).await;
    assert_eq!(update["event"], "presence:update");
    assert_eq!(update["data"]["onlineUsers"], json!([{"id": "u1", "name": "Alice"}]));

    // Bob's channel is registered once the server has read his join
    let mut bob = connect(addr).await;
    send(&mut bob, json!({"event": "user:join", "data": {"id": "u2", "name": "Bob"}})).await;
    let both = json!([{"id": "u1", "name": "Alice"}, {"id": "u2", "name": "Bob"}]);
    assert_eq!(recv(&mut alice).await["data"]["onlineUsers"], both);
    assert_eq!(recv(&mut bob).await["data"]["onlineUsers"], both);

    send(
        &mut alice,
        json!({
            "event": "message:send",
            "data": {"userId": "u1", "content": "hi", "channel": "general"},
            "ack": 1
        }),
    )
    .await;

    let relayed = recv(&mut alice).await;
    assert_eq!(relayed["event"], "message:new");
    assert_eq!(relayed["data"]["content"], "hi");
    let ack = recv(&mut alice).await;
    assert_eq!(ack["event"], "ack");
    assert_eq!(ack["data"]["ack"], 1);
    assert_eq!(ack["data"]["success"], true);
    assert_eq!(ack["data"]["id"], relayed["data"]["id"]);
    assert_eq!(recv(&mut bob).await, relayed);

    alice.close(None).await.unwrap();
    let update = recv(&mut bob).await;
    assert_eq!(update["event"], "presence:update");
    assert_eq!(update["data"]["onlineUsers"], json!([{"id": "u2", "name": "Bob"}]));
}

#[tokio::test]
async fn test_garbage_frames_keep_connection_open() {
    let addr = spawn_server().await;
    let mut socket = connect(addr).await;

    socket.send(Message::Text("not json".into())).await.unwrap();
    send(&mut socket, json!({"event": "user:wave", "data": {}})).await;
    send(&mut socket, json!({"event": "join", "data": {"id": "u1", "name": "Alice"}})).await;

    let update = recv(&mut socket).await;
    assert_eq!(update["data"]["onlineUsers"], json!([{"id": "u1", "name": "Alice"}]));
}
