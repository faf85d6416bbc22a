//! Packet kind discriminant

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::BridgeError;

/// Telemetry category carried in byte 6 of every frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PacketKind {
    Motion = 0,
    Session = 1,
    LapData = 2,
    Event = 3,
    Participants = 4,
    CarSetups = 5,
    CarTelemetry = 6,
    CarStatus = 7,
    FinalClassification = 8,
    LobbyInfo = 9,
    CarDamage = 10,
    SessionHistory = 11,
    TyreSets = 12,
    MotionEx = 13,
    TimeTrial = 14,
    LapPositions = 15,
}

impl PacketKind {
    /// Every kind, in discriminant order.
    pub const ALL: [PacketKind; 16] = [
        PacketKind::Motion,
        PacketKind::Session,
        PacketKind::LapData,
        PacketKind::Event,
        PacketKind::Participants,
        PacketKind::CarSetups,
        PacketKind::CarTelemetry,
        PacketKind::CarStatus,
        PacketKind::FinalClassification,
        PacketKind::LobbyInfo,
        PacketKind::CarDamage,
        PacketKind::SessionHistory,
        PacketKind::TyreSets,
        PacketKind::MotionEx,
        PacketKind::TimeTrial,
        PacketKind::LapPositions,
    ];

    /// Wire discriminant.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Display name, also the first segment of WebSocket keys.
    pub const fn name(self) -> &'static str {
        match self {
            PacketKind::Motion => "Motion",
            PacketKind::Session => "Session",
            PacketKind::LapData => "LapData",
            PacketKind::Event => "Event",
            PacketKind::Participants => "Participants",
            PacketKind::CarSetups => "CarSetups",
            PacketKind::CarTelemetry => "CarTelemetry",
            PacketKind::CarStatus => "CarStatus",
            PacketKind::FinalClassification => "FinalClassification",
            PacketKind::LobbyInfo => "LobbyInfo",
            PacketKind::CarDamage => "CarDamage",
            PacketKind::SessionHistory => "SessionHistory",
            PacketKind::TyreSets => "TyreSets",
            PacketKind::MotionEx => "MotionEx",
            PacketKind::TimeTrial => "TimeTrial",
            PacketKind::LapPositions => "LapPositions",
        }
    }

    /// Minimum frame length in bytes for this kind to decode.
    pub const fn expected_len(self) -> usize {
        match self {
            PacketKind::Motion => 1349,
            PacketKind::Session => 753,
            PacketKind::LapData => 1285,
            PacketKind::Event => 45,
            PacketKind::Participants => 1284,
            PacketKind::CarSetups => 1133,
            PacketKind::CarTelemetry => 1381,
            PacketKind::CarStatus => 1239,
            PacketKind::FinalClassification => 1042,
            PacketKind::LobbyInfo => 954,
            PacketKind::CarDamage => 1041,
            PacketKind::SessionHistory => 1460,
            PacketKind::TyreSets => 231,
            PacketKind::MotionEx => 273,
            PacketKind::TimeTrial => 101,
            PacketKind::LapPositions => 1131,
        }
    }
}

impl TryFrom<u8> for PacketKind {
    type Error = BridgeError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PacketKind::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(BridgeError::UnknownPacketKind { id })
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
