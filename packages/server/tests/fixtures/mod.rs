//! Test fixtures: an in-process relay on an ephemeral port and a small
//! WebSocket client.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use kyoyu_server::{
    domain::{RoomId, RoomRepository},
    ui::{build_router, state::AppState},
};
use serde_json::Value;
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Percent-encode a query value so non-ASCII names survive the handshake URI
fn encode_query_value(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

/// Relay running on 127.0.0.1 with its own in-memory registry
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let state = Arc::new(AppState::in_memory());
        let app = build_router(state.clone(), &["http://localhost:3000".to_string()]);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, room_id: &str, user_name: &str) -> String {
        format!(
            "ws://{}/ws?roomId={}&userName={}",
            self.addr,
            encode_query_value(room_id),
            encode_query_value(user_name)
        )
    }

    pub async fn room_exists(&self, room_id: &str) -> bool {
        let room_id = RoomId::new(room_id.to_string()).expect("valid room id");
        self.state.repository.get_room(&room_id).await.is_ok()
    }

    /// Wait until the room disappears from the registry (disconnects are async)
    pub async fn wait_for_room_removed(&self, room_id: &str) -> bool {
        for _ in 0..100 {
            if !self.room_exists(room_id).await {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// WebSocket client that has completed the join handshake
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    /// Connection id assigned by the relay
    pub id: String,
}

impl TestClient {
    /// Connect and consume the `connected` frame
    pub async fn connect(server: &TestServer, room_id: &str, user_name: &str) -> Self {
        let (stream, _) = connect_async(server.ws_url(room_id, user_name))
            .await
            .expect("Failed to connect");
        let mut client = Self {
            stream,
            id: String::new(),
        };

        let welcome = client.recv().await;
        assert_eq!(welcome["type"], "connected");
        assert_eq!(welcome["roomId"], room_id);
        client.id = welcome["id"].as_str().expect("id").to_string();
        client
    }

    /// Next JSON frame from the relay
    pub async fn recv(&mut self) -> Value {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for frame")
                .expect("Stream ended")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
            }
        }
    }

    /// Next frame, asserting its type
    pub async fn recv_type(&mut self, expected: &str) -> Value {
        let frame = self.recv().await;
        assert_eq!(frame["type"], expected, "unexpected frame: {frame}");
        frame
    }

    /// Consume the member list and snapshot every joiner receives after `connected`
    pub async fn recv_join_snapshot(&mut self) -> (Value, Value, Value) {
        let users = self.recv_type("user-list-update").await;
        let code = self.recv_type("code-change").await;
        let language = self.recv_type("language-change").await;
        (users, code, language)
    }

    pub async fn send(&mut self, frame: Value) {
        self.stream
            .send(Message::text(frame.to_string()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_code(&mut self, room_id: &str, code: &str) {
        self.send(serde_json::json!({"type": "code-change", "roomId": room_id, "code": code}))
            .await;
    }

    pub async fn send_language(&mut self, room_id: &str, language: &str) {
        self.send(
            serde_json::json!({"type": "language-change", "roomId": room_id, "language": language}),
        )
        .await;
    }

    pub async fn send_chat(&mut self, room_id: &str, text: &str) {
        self.send(serde_json::json!({
            "type": "chat-message",
            "roomId": room_id,
            "message": {"userId": self.id, "userName": "ignored", "text": text}
        }))
        .await;
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
