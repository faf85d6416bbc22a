//! WebSocket fan-out of admitted fields
//!
//! Every admitted field becomes one text frame `"<key> <value>"` sent to all
//! connected clients. A client whose write fails is closed and dropped from
//! the set. Clients never send anything meaningful; their read side only
//! tells us when they leave.

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{BridgeError, Result};

/// Path the upgrade endpoint is served on.
pub const WS_PATH: &str = "/ws";

/// Identifier handed out by [`Broadcaster::add`].
pub type ClientId = u64;

/// Write half of one connected client.
#[async_trait]
pub trait ClientConnection: Send {
    async fn send_text(&mut self, text: &str) -> Result<()>;

    async fn close(&mut self);
}

/// The set of connected clients.
#[derive(Default)]
pub struct Broadcaster {
    clients: Mutex<HashMap<ClientId, Box<dyn ClientConnection>>>,
    next_id: AtomicU64,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, client: Box<dyn ClientConnection>) -> ClientId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut clients = self.clients.lock().await;
        clients.insert(id, client);
        info!(client = id, total = clients.len(), "WebSocket client connected");
        id
    }

    /// Close and forget a client. Unknown ids are ignored.
    pub async fn remove(&self, id: ClientId) {
        let mut clients = self.clients.lock().await;
        if let Some(mut client) = clients.remove(&id) {
            client.close().await;
            info!(client = id, total = clients.len(), "WebSocket client disconnected");
        }
    }

    /// Number of connected clients.
    pub async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.lock().await.is_empty()
    }

    /// Send one text frame to every client.
    pub async fn broadcast(&self, text: &str) {
        self.broadcast_all(std::slice::from_ref(&text)).await;
    }

    /// Send each message, in order, to every client.
    ///
    /// Returns the number of clients still connected afterwards.
    pub async fn broadcast_all<S: AsRef<str>>(&self, messages: &[S]) -> usize {
        if messages.is_empty() {
            return self.len().await;
        }

        let mut clients = self.clients.lock().await;
        let mut failed = Vec::new();
        for (id, client) in clients.iter_mut() {
            for message in messages {
                if let Err(e) = client.send_text(message.as_ref()).await {
                    warn!(client = *id, error = %e, "WebSocket write failed, dropping client");
                    failed.push(*id);
                    break;
                }
            }
        }

        for id in failed {
            if let Some(mut client) = clients.remove(&id) {
                client.close().await;
            }
        }
        clients.len()
    }
}

/// [`ClientConnection`] over the write half of an axum WebSocket.
pub struct AxumClient {
    sink: SplitSink<WebSocket, Message>,
}

#[async_trait]
impl ClientConnection for AxumClient {
    async fn send_text(&mut self, text: &str) -> Result<()> {
        self.sink
            .send(Message::Text(text.to_string()))
            .await
            .map_err(|e| BridgeError::WebSocket { details: e.to_string() })
    }

    async fn close(&mut self) {
        let _ = self.sink.send(Message::Close(None)).await;
        let _ = self.sink.close().await;
    }
}

/// Register an upgraded socket and watch its read side until it closes.
pub async fn serve_socket(socket: WebSocket, broadcaster: Arc<Broadcaster>) {
    let (sink, mut stream) = socket.split();
    let id = broadcaster.add(Box::new(AxumClient { sink })).await;

    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(client = id, error = %e, "WebSocket read failed");
                break;
            }
        }
    }

    broadcaster.remove(id).await;
}

async fn upgrade(ws: WebSocketUpgrade, State(broadcaster): State<Arc<Broadcaster>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_socket(socket, broadcaster))
}

/// Router serving the upgrade endpoint at [`WS_PATH`].
pub fn router(broadcaster: Arc<Broadcaster>) -> Router {
    Router::new().route(WS_PATH, get(upgrade)).with_state(broadcaster)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;
    use tokio_tungstenite::tungstenite::Message as ClientMessage;

    /// Records every frame; fails writes once `fail` is set.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingClient {
        pub sent: Arc<StdMutex<Vec<String>>>,
        pub closed: Arc<StdMutex<bool>>,
        pub fail: bool,
    }

    #[async_trait]
    impl ClientConnection for RecordingClient {
        async fn send_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                return Err(BridgeError::WebSocket { details: "broken pipe".into() });
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn close(&mut self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_every_client_in_order() {
        let broadcaster = Broadcaster::new();
        let a = RecordingClient::default();
        let b = RecordingClient::default();
        broadcaster.add(Box::new(a.clone())).await;
        broadcaster.add(Box::new(b.clone())).await;

        let remaining = broadcaster.broadcast_all(&["CarStatus/FuelMix 2", "CarStatus/MaxGears 8"]).await;
        assert_eq!(remaining, 2);
        for client in [&a, &b] {
            assert_eq!(*client.sent.lock().unwrap(), vec!["CarStatus/FuelMix 2", "CarStatus/MaxGears 8"]);
        }
    }

    #[tokio::test]
    async fn failing_client_is_closed_and_removed() {
        let broadcaster = Broadcaster::new();
        let healthy = RecordingClient::default();
        let broken = RecordingClient { fail: true, ..Default::default() };
        broadcaster.add(Box::new(healthy.clone())).await;
        broadcaster.add(Box::new(broken.clone())).await;

        broadcaster.broadcast("Event/EventStringCode SSTA").await;

        assert_eq!(broadcaster.len().await, 1);
        assert!(*broken.closed.lock().unwrap());
        assert!(!*healthy.closed.lock().unwrap());
        assert_eq!(healthy.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_closes_the_connection() {
        let broadcaster = Broadcaster::new();
        let client = RecordingClient::default();
        let id = broadcaster.add(Box::new(client.clone())).await;

        broadcaster.remove(id).await;
        broadcaster.remove(id).await;
        assert!(broadcaster.is_empty().await);
        assert!(*client.closed.lock().unwrap());
    }

    async fn wait_for_clients(broadcaster: &Broadcaster, expected: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while broadcaster.len().await != expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("client count never reached {expected}"));
    }

    #[tokio::test]
    async fn upgraded_client_receives_broadcasts_and_is_removed_on_close() {
        let broadcaster = Arc::new(Broadcaster::new());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(broadcaster.clone());
        let server = tokio::spawn(async move { axum::serve(listener, app).await });

        let (mut client, _) =
            tokio_tungstenite::connect_async(format!("ws://{addr}{WS_PATH}")).await.unwrap();
        wait_for_clients(&broadcaster, 1).await;

        broadcaster.broadcast("CarTelemetry/Speed 287").await;
        let received = tokio::time::timeout(Duration::from_secs(2), client.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(received, ClientMessage::Text("CarTelemetry/Speed 287".into()));

        client.close(None).await.unwrap();
        wait_for_clients(&broadcaster, 0).await;
        server.abort();
    }
}
