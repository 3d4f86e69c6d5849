//! Test helpers for integration tests
//!
//! Provides utilities for spawning a relay on an ephemeral port with a pinned
//! clock, making HTTP requests and driving WebSocket clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use futures_util::{SinkExt, StreamExt};
use relay_common::AppConfig;
use relay_core::ManualClock;
use relay_gateway::{create_app, GatewayState};
use reqwest::{Client, Response};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// How long to wait for a frame that is expected to arrive
pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to listen before concluding nothing will arrive
pub const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub clock: Arc<ManualClock>,
    pub state: GatewayState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a relay whose clock reads `hour:minute`
    pub async fn start_at(hour: u32, minute: u32) -> Result<Self> {
        Self::start_with_config(AppConfig::default(), hour, minute).await
    }

    /// Start a relay with custom config
    pub async fn start_with_config(config: AppConfig, hour: u32, minute: u32) -> Result<Self> {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 16, hour, minute, 0)
            .single()
            .context("invalid start time")?;
        let clock = ManualClock::shared(now);

        // Create app state
        let state = GatewayState::new(config, clock.clone());

        // Build application
        let app = create_app(state.clone());

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Create HTTP client
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            clock,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the WebSocket URL (served on the root path)
    pub fn ws_url(&self) -> String {
        format!("ws://{}/", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// POST a JSON alert body
    pub async fn post_alert(&self, body: &Value) -> Result<Response> {
        let url = format!("{}/alert", self.base_url());
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// POST a raw alert body
    pub async fn post_alert_raw(&self, body: &'static str) -> Result<Response> {
        let url = format!("{}/alert", self.base_url());
        Ok(self.client.post(&url).body(body).send().await?)
    }

    /// Connect a WebSocket client and wait until the relay has registered it
    pub async fn connect(&self) -> Result<WsClient> {
        let expected = self.connection_count() + 1;
        let (stream, _response) = connect_async(self.ws_url()).await?;
        self.wait_for_connections(expected).await?;
        Ok(WsClient { stream })
    }

    /// Number of connections the relay currently tracks
    pub fn connection_count(&self) -> usize {
        self.state.relay().registry().connection_count()
    }

    /// Wait until the relay tracks exactly `count` connections
    pub async fn wait_for_connections(&self, count: usize) -> Result<()> {
        eventually(|| self.connection_count() == count)
            .await
            .with_context(|| {
                format!(
                    "expected {count} connections, relay has {}",
                    self.connection_count()
                )
            })
    }
}

/// Poll `condition` until it holds or `RECV_TIMEOUT` passes
pub async fn eventually<F>(mut condition: F) -> Result<()>
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    while !condition() {
        if tokio::time::Instant::now() > deadline {
            anyhow::bail!("condition not met within {RECV_TIMEOUT:?}");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    Ok(())
}

/// A WebSocket client connected to the relay
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Send a JSON message as a text frame
    pub async fn send_json(&mut self, message: &Value) -> Result<()> {
        self.send_text(&message.to_string()).await
    }

    /// Send an arbitrary text frame
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Send an arbitrary binary frame
    pub async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.stream.send(Message::Binary(bytes)).await?;
        Ok(())
    }

    /// Receive the next JSON text frame
    pub async fn recv_json(&mut self) -> Result<Value> {
        self.next_json(RECV_TIMEOUT)
            .await?
            .context("no message received before timeout")
    }

    /// Check that no text frame arrives within `SILENCE_WINDOW`
    pub async fn expect_silence(&mut self) -> Result<()> {
        if let Some(value) = self.next_json(SILENCE_WINDOW).await? {
            anyhow::bail!("expected no message, got {value}");
        }
        Ok(())
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }

    async fn next_json(&mut self, wait: Duration) -> Result<Option<Value>> {
        let deadline = tokio::time::Instant::now() + wait;
        loop {
            let next = match tokio::time::timeout_at(deadline, self.stream.next()).await {
                Ok(next) => next,
                Err(_) => return Ok(None),
            };
            match next {
                Some(Ok(Message::Text(text))) => return Ok(Some(serde_json::from_str(&text)?)),
                Some(Ok(Message::Close(_))) | None => anyhow::bail!("connection closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }
}
