//! Test helpers for integration tests
//!
//! Provides a gateway bound to an ephemeral port over the in-memory user
//! store, plus a thin WebSocket client for reading pushed events.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use family_common::CorsConfig;
use family_db::InMemoryUserRepository;
use family_gateway::protocol::GatewayMessage;
use family_gateway::{create_app, serve, GatewayState};
use futures_util::{SinkExt, StreamExt};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// How long to wait for an expected event before failing
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long to listen when asserting that nothing arrives
pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub repo: Arc<InMemoryUserRepository>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with an empty user store
    pub async fn start() -> Result<Self> {
        Self::start_with_repo(Arc::new(InMemoryUserRepository::new())).await
    }

    /// Start a test server over an existing user store
    pub async fn start_with_repo(repo: Arc<InMemoryUserRepository>) -> Result<Self> {
        let app = create_app(GatewayState::new(repo.clone()), &CorsConfig::default());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            repo,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Open a socket, optionally identifying as a user
    pub async fn connect(&self, user_id: Option<&str>) -> Result<TestSocket> {
        let url = match user_id {
            Some(id) => format!("ws://{}/socket?userId={id}", self.addr),
            None => format!("ws://{}/socket", self.addr),
        };
        let (stream, _) = connect_async(url).await.context("WebSocket handshake failed")?;
        Ok(TestSocket { stream })
    }

    /// Open a socket as `user_id` and wait for its own online event
    ///
    /// Once that event arrives the server has registered the socket and
    /// persisted the online status.
    pub async fn connect_user(&self, user_id: &str) -> Result<TestSocket> {
        let mut socket = self.connect(Some(user_id)).await?;
        socket.expect_status(user_id, true).await?;
        Ok(socket)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Client side of one gateway socket
pub struct TestSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestSocket {
    /// Next gateway event, or `None` if nothing arrives within `wait`
    pub async fn next_event(&mut self, wait: Duration) -> Result<Option<GatewayMessage>> {
        match tokio::time::timeout(wait, self.read_event()).await {
            Ok(result) => result,
            Err(_) => Ok(None),
        }
    }

    async fn read_event(&mut self) -> Result<Option<GatewayMessage>> {
        while let Some(frame) = self.stream.next().await {
            match frame? {
                Message::Text(text) => return Ok(Some(GatewayMessage::from_json(&text)?)),
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Wait for the next event and check it is a status update for `user_id`
    pub async fn expect_status(&mut self, user_id: &str, online: bool) -> Result<()> {
        let event = self
            .next_event(EVENT_TIMEOUT)
            .await?
            .context("No event received")?;
        let payload = event
            .as_user_status()
            .with_context(|| format!("Unexpected event: {event:?}"))?;

        anyhow::ensure!(
            payload.user_id.as_str() == user_id && payload.online_status == online,
            "Expected {user_id} online={online}, got {} online={}",
            payload.user_id,
            payload.online_status
        );
        Ok(())
    }

    /// Assert that no event arrives during the quiet period
    pub async fn expect_silence(&mut self) -> Result<()> {
        if let Some(event) = self.next_event(QUIET_PERIOD).await? {
            anyhow::bail!("Expected no event, got {event:?}");
        }
        Ok(())
    }

    /// Close the socket with a normal close frame
    pub async fn close(mut self) -> Result<()> {
        self.stream.send(Message::Close(None)).await?;
        // Drain until the server drops its side
        let drain = async {
            while let Some(frame) = self.stream.next().await {
                if frame.is_err() {
                    break;
                }
            }
        };
        let _ = tokio::time::timeout(EVENT_TIMEOUT, drain).await;
        Ok(())
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}
