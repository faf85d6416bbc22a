//! OSC forwarding over UDP
//!
//! One long-lived UDP client sits behind a lock and is only rebuilt when the
//! target address changes. Each admitted field is sent as a single OSC
//! message with one argument, coerced from its wire width:
//!
//! | wire type                 | OSC argument |
//! |---------------------------|--------------|
//! | u8 i8 u16 i16 u32 i32     | int32        |
//! | f32 f64                   | float32      |
//! | text                      | string       |
//! | u64                       | unsupported  |

use rosc::{OscMessage, OscPacket, OscType};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tracing::{info, trace};

use crate::{BridgeError, Result, Value};

/// Coerce a field value to its OSC argument.
pub fn to_osc_arg(value: &Value) -> Result<OscType> {
    let arg = match value {
        Value::UInt8(v) => OscType::Int(i32::from(*v)),
        Value::Int8(v) => OscType::Int(i32::from(*v)),
        Value::UInt16(v) => OscType::Int(i32::from(*v)),
        Value::Int16(v) => OscType::Int(i32::from(*v)),
        // wraps above i32::MAX, as the int32 wire type requires
        Value::UInt32(v) => OscType::Int(*v as i32),
        Value::Int32(v) => OscType::Int(*v),
        Value::Float32(v) => OscType::Float(*v),
        Value::Float64(v) => OscType::Float(*v as f32),
        Value::Text(s) => OscType::String(s.clone()),
        Value::UInt64(_) => {
            return Err(BridgeError::UnsupportedOscType { value_type: value.type_name() });
        }
    };
    Ok(arg)
}

/// Encode a single-argument OSC message.
pub fn encode(address: &str, value: &Value) -> Result<Vec<u8>> {
    let packet = OscPacket::Message(OscMessage {
        addr: address.to_string(),
        args: vec![to_osc_arg(value)?],
    });
    Ok(rosc::encoder::encode(&packet)?)
}

/// Whether [`OscSink::send`] put a datagram on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No client is running; the message was dropped.
    NoClient,
}

struct OscClient {
    socket: UdpSocket,
    target: SocketAddr,
}

/// Lock-guarded OSC client; idle until [`OscSink::restart`] is called.
#[derive(Default)]
pub struct OscSink {
    client: Mutex<Option<OscClient>>,
}

impl OscSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the client with one sending to `target`.
    pub async fn restart(&self, target: SocketAddr) -> Result<()> {
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket =
            UdpSocket::bind(local).await.map_err(|source| BridgeError::Bind { addr: local, source })?;

        *self.client.lock().await = Some(OscClient { socket, target });
        info!(%target, "OSC client started");
        Ok(())
    }

    /// Current destination, if a client exists.
    pub async fn target(&self) -> Option<SocketAddr> {
        self.client.lock().await.as_ref().map(|c| c.target)
    }

    /// Encode and send one message. Without a client the message is dropped.
    pub async fn send(&self, address: &str, value: &Value) -> Result<Delivery> {
        let bytes = encode(address, value)?;
        let guard = self.client.lock().await;
        let Some(client) = guard.as_ref() else {
            trace!(address, "OSC client not running, message dropped");
            return Ok(Delivery::NoClient);
        };
        client
            .socket
            .send_to(&bytes, client.target)
            .await
            .map_err(|e| BridgeError::socket(format!("OSC send to {}", client.target), e))?;
        Ok(Delivery::Sent)
    }
}
