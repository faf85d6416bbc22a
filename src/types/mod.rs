//! Core types shared across the pipeline.
//!
//! - [`PacketKind`] is the closed set of telemetry categories with their wire
//!   discriminants, names and required frame lengths
//! - [`Value`] holds one decoded leaf field at its wire width
//! - [`BroadcastRate`] turns the configured rate into a gate interval

mod broadcast_rate;
mod packet_kind;
mod value;

pub use broadcast_rate::BroadcastRate;
pub use packet_kind::PacketKind;
pub use value::{F32_TOLERANCE, F64_TOLERANCE, Value};
