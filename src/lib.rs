//! Telemetry bridge for the F1 25 UDP format.
//!
//! Frames arrive on a UDP socket, are decoded into typed records, flattened
//! into `(key, value)` fields, filtered by a per-sink throttle gate, and sent
//! to WebSocket clients as `"<key> <value>"` text frames and, optionally, to
//! an OSC receiver as single-argument messages.
//!
//! # Pipeline
//!
//! - [`listener::FrameListener`] owns the socket and read loop
//! - [`dispatch::Forwarder`] runs decode, flatten, gate and fan-out per frame
//! - [`packets`] holds one fixed-layout decoder per [`PacketKind`]
//! - [`walker`] flattens records under two key schemes
//! - [`gate::ThrottleGate`] rate limits and dedups per key
//! - [`sinks`] holds the WebSocket broadcaster and the OSC client
//! - [`Bridge`] owns all of the above and handles restarts
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use f1_telem_bridge::{Bridge, config::BridgeConfig};
//!
//! #[tokio::main]
//! async fn main() -> f1_telem_bridge::Result<()> {
//!     let bridge = Bridge::start(BridgeConfig::default()).await?;
//!     let app = f1_telem_bridge::sinks::websocket::router(bridge.broadcaster());
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:1337").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Decoding without the runtime
//!
//! ```rust
//! use f1_telem_bridge::packets::Packet;
//! use f1_telem_bridge::walker::{KeyScheme, collect};
//!
//! fn fields(frame: &[u8]) -> f1_telem_bridge::Result<Vec<String>> {
//!     let packet = Packet::decode(frame)?;
//!     Ok(collect(&packet, KeyScheme::Path(packet.kind().name()))
//!         .into_iter()
//!         .map(|(key, value)| format!("{key} {value}"))
//!         .collect())
//! }
//! # assert!(fields(&[0u8; 10]).is_err());
//! ```

// Core types and error handling
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Wire layouts and flattening
pub mod packets;
pub mod walker;

// Pipeline
pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod gate;
pub mod listener;
pub mod sinks;

pub use bridge::Bridge;
pub use error::*;
pub use types::*;
