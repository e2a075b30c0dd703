//! ActionCable wire surface for the GeckoTerminal realtime cable.
//!
//! The cable speaks plain ActionCable: a `welcome` frame on connect,
//! periodic `ping` frames, `subscribe` commands whose channel identifier
//! is itself a JSON-encoded string, and data frames carrying the channel
//! payload under `message`.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Cable endpoint the site uses today (the `www` host also answers).
pub const CABLE_URL: &str = "wss://cables.geckoterminal.com/cable";

/// Origin header the cable server checks before accepting a connection.
pub const ORIGIN: &str = "https://www.geckoterminal.com";

#[derive(Error, Debug)]
pub enum CableError {
    #[error("invalid endpoint: {0}")]
    BadEndpoint(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("stream closed by remote")]
    Closed,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),
}

/// One ActionCable frame, inbound or outbound. Unused fields stay `None`
/// and are left off the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CableMessage {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<serde_json::Value>,
}

/// Channel identifier, double-encoded as a JSON string on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelIdentifier {
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
}

impl ChannelIdentifier {
    /// `PoolChannel` is keyed by the human-facing contract address.
    pub fn pool_channel(pool_address: &str) -> Self {
        Self {
            channel: "PoolChannel".to_string(),
            pool_address: Some(pool_address.to_string()),
            ..Default::default()
        }
    }

    /// `SwapChannel` is keyed by the internal numeric pool id.
    pub fn swap_channel(pool_id: &str) -> Self {
        Self {
            channel: "SwapChannel".to_string(),
            pool_id: Some(pool_id.to_string()),
            ..Default::default()
        }
    }
}

/// Swap payload delivered on `SwapChannel` data frames.
#[derive(Debug, Clone, Deserialize)]
pub struct SwapEvent {
    pub data: SwapData,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwapData {
    /// On-chain timestamp in milliseconds.
    pub block_timestamp: i64,
    pub tx_hash: String,
    pub from_token_amount: String,
    pub to_token_amount: String,
    pub price_from_in_usd: String,
    pub price_to_in_usd: String,
    pub from_token_total_in_usd: String,
    pub to_token_total_in_usd: String,
    pub tx_from_address: String,
    pub from_token_id: i64,
    pub to_token_id: i64,
}

/// Serialize a subscribe command for the given channel.
pub fn subscribe_frame(identifier: &ChannelIdentifier) -> Result<String, serde_json::Error> {
    let message = CableMessage {
        command: Some("subscribe".to_string()),
        identifier: Some(serde_json::to_string(identifier)?),
        ..Default::default()
    };
    serde_json::to_string(&message)
}

/// Best-effort parse of an inbound frame.
pub fn parse_message(raw: &str) -> Option<CableMessage> {
    serde_json::from_str(raw).ok()
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One live connection to an ActionCable endpoint.
pub struct CableSession {
    stream: WsStream,
}

impl CableSession {
    /// Connect with the Origin and User-Agent headers the cable expects.
    pub async fn connect(url: &str, origin: &str, user_agent: &str) -> Result<Self, CableError> {
        let mut request = url
            .into_client_request()
            .map_err(|e| CableError::BadEndpoint(e.to_string()))?;
        let headers = request.headers_mut();
        headers.insert(
            "Origin",
            HeaderValue::from_str(origin).map_err(|e| CableError::BadEndpoint(e.to_string()))?,
        );
        headers.insert(
            "User-Agent",
            HeaderValue::from_str(user_agent)
                .map_err(|e| CableError::BadEndpoint(e.to_string()))?,
        );
        let (stream, _) = connect_async(request)
            .await
            .map_err(|e| CableError::Connect(e.to_string()))?;
        Ok(Self { stream })
    }

    /// Next text frame, answering transport-level pings along the way.
    pub async fn next_text(&mut self, timeout: Duration) -> Result<String, CableError> {
        loop {
            let frame = tokio::time::timeout(timeout, self.stream.next())
                .await
                .map_err(|_| CableError::Timeout(timeout))?;
            match frame {
                Some(Ok(Message::Text(text))) => return Ok(text),
                Some(Ok(Message::Ping(payload))) => {
                    self.stream
                        .send(Message::Pong(payload))
                        .await
                        .map_err(|e| CableError::Transport(e.to_string()))?;
                }
                Some(Ok(Message::Close(_))) | None => return Err(CableError::Closed),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(CableError::Transport(e.to_string())),
            }
        }
    }

    pub async fn send_text(&mut self, payload: String) -> Result<(), CableError> {
        self.stream
            .send(Message::Text(payload))
            .await
            .map_err(|e| CableError::Transport(e.to_string()))
    }

    pub async fn subscribe(&mut self, identifier: &ChannelIdentifier) -> Result<(), CableError> {
        let frame = subscribe_frame(identifier).map_err(|e| CableError::Transport(e.to_string()))?;
        self.send_text(frame).await
    }

    /// Application-level reply to an ActionCable `ping` frame.
    pub async fn pong(&mut self) -> Result<(), CableError> {
        self.send_text(r#"{"type":"pong"}"#.to_string()).await
    }

    pub async fn close(&mut self) -> Result<(), CableError> {
        self.stream
            .close(None)
            .await
            .map_err(|e| CableError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_frame_for_pool_channel() {
        let frame = subscribe_frame(&ChannelIdentifier::pool_channel("0xabc")).unwrap();
        assert_eq!(
            frame,
            r#"{"command":"subscribe","identifier":"{\"channel\":\"PoolChannel\",\"pool_address\":\"0xabc\"}"}"#
        );
    }

    #[test]
    fn test_subscribe_frame_for_swap_channel() {
        let frame = subscribe_frame(&ChannelIdentifier::swap_channel("147971598")).unwrap();
        assert_eq!(
            frame,
            r#"{"command":"subscribe","identifier":"{\"channel\":\"SwapChannel\",\"pool_id\":\"147971598\"}"}"#
        );
    }

    #[test]
    fn test_parse_welcome_and_ping() {
        let msg = parse_message(r#"{"type":"welcome"}"#).unwrap();
        assert_eq!(msg.kind.as_deref(), Some("welcome"));

        let msg = parse_message(r#"{"type":"ping","message":1754300000}"#).unwrap();
        assert_eq!(msg.kind.as_deref(), Some("ping"));
    }

    #[test]
    fn test_parse_confirmation_keeps_identifier() {
        let msg = parse_message(
            r#"{"type":"confirm_subscription","identifier":"{\"channel\":\"SwapChannel\",\"pool_id\":\"9\"}"}"#,
        )
        .unwrap();
        assert_eq!(msg.kind.as_deref(), Some("confirm_subscription"));
        let ident: ChannelIdentifier =
            serde_json::from_str(msg.identifier.as_deref().unwrap()).unwrap();
        assert_eq!(ident.channel, "SwapChannel");
        assert_eq!(ident.pool_id.as_deref(), Some("9"));
    }

    #[test]
    fn test_parse_swap_event_payload() {
        let raw = r#"{
            "identifier": "{\"channel\":\"SwapChannel\",\"pool_id\":\"147971598\"}",
            "message": {
                "data": {
                    "block_timestamp": 1754300000123,
                    "tx_hash": "0xdeadbeefdeadbeefdeadbeef",
                    "from_token_amount": "1.5",
                    "to_token_amount": "5000.0",
                    "price_from_in_usd": "3333.33",
                    "price_to_in_usd": "1.0",
                    "from_token_total_in_usd": "5000.00",
                    "to_token_total_in_usd": "5000.00",
                    "tx_from_address": "0xfeed",
                    "from_token_id": 1,
                    "to_token_id": 2
                },
                "type": "newSwap"
            }
        }"#;
        let msg = parse_message(raw).unwrap();
        let event: SwapEvent = serde_json::from_value(msg.message.unwrap()).unwrap();
        assert_eq!(event.kind, "newSwap");
        assert_eq!(event.data.block_timestamp, 1754300000123);
        assert_eq!(event.data.from_token_id, 1);
    }

    #[test]
    fn test_parse_swap_event_tolerates_missing_fields() {
        let event: SwapEvent =
            serde_json::from_str(r#"{"data":{"block_timestamp":1},"type":"newSwap"}"#).unwrap();
        assert_eq!(event.data.block_timestamp, 1);
        assert_eq!(event.data.tx_hash, "");
    }

    #[test]
    fn test_garbage_frame_parses_to_none() {
        assert!(parse_message("not json").is_none());
    }
}
