//! Output sinks: WebSocket broadcast and OSC over UDP

pub mod osc;
pub mod websocket;

pub use osc::{Delivery, OscSink};
pub use websocket::{Broadcaster, ClientConnection, ClientId};
