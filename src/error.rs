//! Error types for the telemetry bridge.
//!
//! All errors implement `std::error::Error` and carry enough structured context
//! to be logged once and dropped by the ingestion loop without aborting it.
//!
//! ## Error Categories
//!
//! - **Frame Errors**: A datagram is shorter than its packet kind requires, or
//!   carries an unknown discriminant or car index
//! - **Socket Errors**: Binding or using the UDP listener and OSC client sockets
//! - **Sink Errors**: OSC encoding failures and WebSocket write failures
//! - **Config Errors**: Reading or parsing configuration documents, or
//!   addresses that do not parse
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use f1_telem_bridge::BridgeError;
//!
//! let error = BridgeError::frame_too_short("Event", 45, 44);
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T, E = BridgeError> = std::result::Result<T, E>;

/// Main error type for bridge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("{kind} frame too short: expected {expected} bytes, got {actual}")]
    FrameTooShort { kind: &'static str, expected: usize, actual: usize },

    #[error("Unknown packet kind {id}")]
    UnknownPacketKind { id: u8 },

    #[error("Player car index {index} out of range (max {max})")]
    InvalidCarIndex { index: u8, max: usize },

    #[error("Failed to bind UDP socket on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Socket error: {context}")]
    Socket {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OSC does not support {value_type} arguments")]
    UnsupportedOscType { value_type: &'static str },

    #[error("OSC encode failed: {details}")]
    OscEncode { details: String },

    #[error("Invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("Config error in {path}: {details}")]
    Config { path: PathBuf, details: String },

    #[error("WebSocket error: {details}")]
    WebSocket { details: String },
}

impl BridgeError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            BridgeError::Bind { .. } => true,
            BridgeError::Socket { .. } => true,
            BridgeError::WebSocket { .. } => false,
            BridgeError::FrameTooShort { .. } => false,
            BridgeError::UnknownPacketKind { .. } => false,
            BridgeError::InvalidCarIndex { .. } => false,
            BridgeError::UnsupportedOscType { .. } => false,
            BridgeError::OscEncode { .. } => false,
            BridgeError::InvalidAddress { .. } => false,
            BridgeError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            BridgeError::FrameTooShort { .. } => vec![
                "Check the game's UDP format setting matches the 2025 layout",
                "Verify nothing between the game and the bridge truncates datagrams",
            ],
            BridgeError::UnknownPacketKind { .. } => {
                vec!["Check the game's UDP format setting", "Update the bridge for newer formats"]
            }
            BridgeError::InvalidCarIndex { .. } => vec![
                "Wait for the game to assign a player car",
                "Check the sender is a supported game version",
            ],
            BridgeError::Bind { .. } => vec![
                "Check no other program is listening on the configured UDP port",
                "Verify the configured bind address belongs to this host",
                "Retry the listener restart",
            ],
            BridgeError::Socket { .. } => {
                vec!["Check network interface status", "Restart the affected service"]
            }
            BridgeError::UnsupportedOscType { .. } => vec![
                "Remove the field from the OSC address table",
                "Map a narrower field instead",
            ],
            BridgeError::OscEncode { .. } => {
                vec!["Check the OSC address starts with '/'", "Verify the address table entry"]
            }
            BridgeError::InvalidAddress { .. } => {
                vec!["Use a literal IPv4 or IPv6 address such as 127.0.0.1"]
            }
            BridgeError::Config { .. } => vec![
                "Check the file exists and is readable",
                "Validate the document syntax",
                "Delete the file to fall back to defaults",
            ],
            BridgeError::WebSocket { .. } => vec!["Reconnect the client"],
        }
    }

    /// Helper constructor for short frame errors.
    pub fn frame_too_short(kind: &'static str, expected: usize, actual: usize) -> Self {
        BridgeError::FrameTooShort { kind, expected, actual }
    }

    /// Helper constructor for socket errors.
    pub fn socket(context: impl Into<String>, source: std::io::Error) -> Self {
        BridgeError::Socket { context: context.into(), source }
    }

    /// Helper constructor for config errors.
    pub fn config(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        BridgeError::Config { path: path.into(), details: details.into() }
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Socket { context: "I/O".to_string(), source: err }
    }
}

impl From<rosc::OscError> for BridgeError {
    fn from(err: rosc::OscError) -> Self {
        BridgeError::OscEncode { details: format!("{:?}", err) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn error_messages_carry_their_context(
            expected in 24usize..2048,
            actual in 0usize..24,
            index in 22u8..=255u8,
            details in ".*",
        ) {
            let short = BridgeError::frame_too_short("Session", expected, actual);
            let msg = short.to_string();
            prop_assert!(msg.contains("Session"));
            prop_assert!(msg.contains(&expected.to_string()));
            prop_assert!(msg.contains(&actual.to_string()));

            let car = BridgeError::InvalidCarIndex { index, max: 22 };
            prop_assert!(car.to_string().contains(&index.to_string()));

            let osc = BridgeError::OscEncode { details: details.clone() };
            prop_assert!(osc.to_string().contains(&details));
        }
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<BridgeError>();

        let error = BridgeError::UnknownPacketKind { id: 42 };
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn recovery_methods_work() {
        let bind = BridgeError::Bind {
            addr: "127.0.0.1:20777".parse().unwrap(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        let short = BridgeError::frame_too_short("Event", 45, 44);

        assert!(bind.is_retryable());
        assert!(!short.is_retryable());

        for suggestion in bind.recovery_suggestions() {
            assert!(suggestion.len() > 5);
        }
        assert!(!short.recovery_suggestions().is_empty());
    }

    #[test]
    fn io_errors_convert_to_socket_errors() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: BridgeError = io_err.into();

        match err {
            BridgeError::Socket { source, .. } => assert_eq!(source.to_string(), "refused"),
            other => panic!("Expected Socket error, got {other:?}"),
        }
    }
}
