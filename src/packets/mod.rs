//! Fixed-layout decoders for the sixteen telemetry packet kinds
//!
//! Every decoder checks the frame against its kind's required length before
//! reading any field, then extracts each field at its little-endian offset.
//! [`Packet`] closes over all kinds so dispatch is an exhaustive match.

pub mod car_damage;
pub mod car_setups;
pub mod car_status;
pub mod car_telemetry;
pub mod event;
pub mod final_classification;
pub mod header;
pub mod lap_data;
pub mod lap_positions;
pub mod lobby_info;
pub mod motion;
pub mod motion_ex;
pub mod participants;
pub mod reader;
pub mod session;
pub mod session_history;
pub mod time_trial;
pub mod tyre_sets;

pub use car_damage::CarDamagePacket;
pub use car_setups::CarSetupsPacket;
pub use car_status::CarStatusPacket;
pub use car_telemetry::CarTelemetryPacket;
pub use event::EventPacket;
pub use final_classification::FinalClassificationPacket;
pub use header::PacketHeader;
pub use lap_data::LapDataPacket;
pub use lap_positions::LapPositionsPacket;
pub use lobby_info::LobbyInfoPacket;
pub use motion::MotionPacket;
pub use motion_ex::MotionExPacket;
pub use participants::ParticipantsPacket;
pub use session::SessionPacket;
pub use session_history::SessionHistoryPacket;
pub use time_trial::TimeTrialPacket;
pub use tyre_sets::TyreSetsPacket;

use crate::walker::{Walk, Walker};
use crate::{BridgeError, PacketKind, Result};

/// Car-indexed arrays always hold this many slots.
pub const MAX_CARS: usize = 22;

/// Length of the NUL-padded driver name fields.
pub const NAME_LEN: usize = 32;

/// One decoded frame of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Motion(Box<MotionPacket>),
    Session(Box<SessionPacket>),
    LapData(Box<LapDataPacket>),
    Event(Box<EventPacket>),
    Participants(Box<ParticipantsPacket>),
    CarSetups(Box<CarSetupsPacket>),
    CarTelemetry(Box<CarTelemetryPacket>),
    CarStatus(Box<CarStatusPacket>),
    FinalClassification(Box<FinalClassificationPacket>),
    LobbyInfo(Box<LobbyInfoPacket>),
    CarDamage(Box<CarDamagePacket>),
    SessionHistory(Box<SessionHistoryPacket>),
    TyreSets(Box<TyreSetsPacket>),
    MotionEx(Box<MotionExPacket>),
    TimeTrial(Box<TimeTrialPacket>),
    LapPositions(Box<LapPositionsPacket>),
}

/// Read the packet kind discriminant without decoding anything else.
pub fn peek_kind(data: &[u8]) -> Result<PacketKind> {
    let id = data.get(PacketHeader::PACKET_ID_OFFSET).copied().ok_or_else(|| {
        BridgeError::frame_too_short("header", PacketHeader::PACKET_ID_OFFSET + 1, data.len())
    })?;
    PacketKind::try_from(id)
}

impl Packet {
    /// Decode a frame, reading the kind discriminant first.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let kind = peek_kind(data)?;
        Self::decode_as(kind, data)
    }

    /// Decode `data` as `kind` regardless of its discriminant byte.
    pub fn decode_as(kind: PacketKind, data: &[u8]) -> Result<Self> {
        let packet = match kind {
            PacketKind::Motion => Self::Motion(Box::new(MotionPacket::decode(data)?)),
            PacketKind::Session => Self::Session(Box::new(SessionPacket::decode(data)?)),
            PacketKind::LapData => Self::LapData(Box::new(LapDataPacket::decode(data)?)),
            PacketKind::Event => Self::Event(Box::new(EventPacket::decode(data)?)),
            PacketKind::Participants => {
                Self::Participants(Box::new(ParticipantsPacket::decode(data)?))
            }
            PacketKind::CarSetups => Self::CarSetups(Box::new(CarSetupsPacket::decode(data)?)),
            PacketKind::CarTelemetry => {
                Self::CarTelemetry(Box::new(CarTelemetryPacket::decode(data)?))
            }
            PacketKind::CarStatus => Self::CarStatus(Box::new(CarStatusPacket::decode(data)?)),
            PacketKind::FinalClassification => {
                Self::FinalClassification(Box::new(FinalClassificationPacket::decode(data)?))
            }
            PacketKind::LobbyInfo => Self::LobbyInfo(Box::new(LobbyInfoPacket::decode(data)?)),
            PacketKind::CarDamage => Self::CarDamage(Box::new(CarDamagePacket::decode(data)?)),
            PacketKind::SessionHistory => {
                Self::SessionHistory(Box::new(SessionHistoryPacket::decode(data)?))
            }
            PacketKind::TyreSets => Self::TyreSets(Box::new(TyreSetsPacket::decode(data)?)),
            PacketKind::MotionEx => Self::MotionEx(Box::new(MotionExPacket::decode(data)?)),
            PacketKind::TimeTrial => Self::TimeTrial(Box::new(TimeTrialPacket::decode(data)?)),
            PacketKind::LapPositions => {
                Self::LapPositions(Box::new(LapPositionsPacket::decode(data)?))
            }
        };
        Ok(packet)
    }

    pub fn kind(&self) -> PacketKind {
        match self {
            Self::Motion(_) => PacketKind::Motion,
            Self::Session(_) => PacketKind::Session,
            Self::LapData(_) => PacketKind::LapData,
            Self::Event(_) => PacketKind::Event,
            Self::Participants(_) => PacketKind::Participants,
            Self::CarSetups(_) => PacketKind::CarSetups,
            Self::CarTelemetry(_) => PacketKind::CarTelemetry,
            Self::CarStatus(_) => PacketKind::CarStatus,
            Self::FinalClassification(_) => PacketKind::FinalClassification,
            Self::LobbyInfo(_) => PacketKind::LobbyInfo,
            Self::CarDamage(_) => PacketKind::CarDamage,
            Self::SessionHistory(_) => PacketKind::SessionHistory,
            Self::TyreSets(_) => PacketKind::TyreSets,
            Self::MotionEx(_) => PacketKind::MotionEx,
            Self::TimeTrial(_) => PacketKind::TimeTrial,
            Self::LapPositions(_) => PacketKind::LapPositions,
        }
    }

    fn record(&self) -> &dyn Walk {
        match self {
            Self::Motion(p) => p.as_ref(),
            Self::Session(p) => p.as_ref(),
            Self::LapData(p) => p.as_ref(),
            Self::Event(p) => p.as_ref(),
            Self::Participants(p) => p.as_ref(),
            Self::CarSetups(p) => p.as_ref(),
            Self::CarTelemetry(p) => p.as_ref(),
            Self::CarStatus(p) => p.as_ref(),
            Self::FinalClassification(p) => p.as_ref(),
            Self::LobbyInfo(p) => p.as_ref(),
            Self::CarDamage(p) => p.as_ref(),
            Self::SessionHistory(p) => p.as_ref(),
            Self::TyreSets(p) => p.as_ref(),
            Self::MotionEx(p) => p.as_ref(),
            Self::TimeTrial(p) => p.as_ref(),
            Self::LapPositions(p) => p.as_ref(),
        }
    }

    pub fn header(&self) -> &PacketHeader {
        match self {
            Self::Motion(p) => &p.header,
            Self::Session(p) => &p.header,
            Self::LapData(p) => &p.header,
            Self::Event(p) => &p.header,
            Self::Participants(p) => &p.header,
            Self::CarSetups(p) => &p.header,
            Self::CarTelemetry(p) => &p.header,
            Self::CarStatus(p) => &p.header,
            Self::FinalClassification(p) => &p.header,
            Self::LobbyInfo(p) => &p.header,
            Self::CarDamage(p) => &p.header,
            Self::SessionHistory(p) => &p.header,
            Self::TyreSets(p) => &p.header,
            Self::MotionEx(p) => &p.header,
            Self::TimeTrial(p) => &p.header,
            Self::LapPositions(p) => &p.header,
        }
    }
}

impl Walk for Packet {
    fn walk(&self, w: &mut Walker<'_>) {
        self.record().walk(w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FrameBuilder;
    use crate::walker::{KeyScheme, collect};
    use proptest::prelude::*;

    #[test]
    fn exact_length_decodes_for_every_kind() {
        for kind in PacketKind::ALL {
            let frame = FrameBuilder::new(kind).build();
            let packet = Packet::decode(&frame)
                .unwrap_or_else(|e| panic!("{kind} failed at exact length: {e}"));
            assert_eq!(packet.kind(), kind);
            assert_eq!(packet.header().packet_id, kind.id());
            assert_eq!(packet.header().packet_format, 2025);
        }
    }

    #[test]
    fn one_byte_short_fails_for_every_kind() {
        for kind in PacketKind::ALL {
            let frame = FrameBuilder::with_len(kind, kind.expected_len() - 1).build();
            match Packet::decode(&frame) {
                Err(BridgeError::FrameTooShort { expected, actual, .. }) => {
                    assert_eq!(expected, kind.expected_len());
                    assert_eq!(actual, kind.expected_len() - 1);
                }
                other => panic!("{kind}: expected FrameTooShort, got {other:?}"),
            }
        }
    }

    #[test]
    fn longer_frames_decode() {
        let mut frame = FrameBuilder::new(PacketKind::TimeTrial).build();
        frame.extend_from_slice(&[0xAA; 16]);
        assert!(Packet::decode(&frame).is_ok());
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        let mut frame = FrameBuilder::new(PacketKind::Motion).build();
        frame[PacketHeader::PACKET_ID_OFFSET] = 16;
        assert!(matches!(Packet::decode(&frame), Err(BridgeError::UnknownPacketKind { id: 16 })));
    }

    #[test]
    fn walk_starts_with_the_header() {
        let frame = FrameBuilder::new(PacketKind::Session).build();
        let packet = Packet::decode(&frame).unwrap();
        let fields = collect(&packet, KeyScheme::Path(packet.kind().name()));
        assert_eq!(fields[0].0, "Session/Header/PacketFormat");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn decoding_is_deterministic(
            kind_index in 0usize..16,
            fill in proptest::collection::vec(any::<u8>(), 1460),
            player in 0u8..22,
        ) {
            let kind = PacketKind::ALL[kind_index];
            let mut frame = fill[..kind.expected_len()].to_vec();
            frame[PacketHeader::PACKET_ID_OFFSET] = kind.id();
            frame[PacketHeader::PLAYER_CAR_INDEX_OFFSET] = player;

            let first = Packet::decode(&frame).unwrap();
            let second = Packet::decode(&frame).unwrap();
            prop_assert_eq!(first.kind(), kind);
            // NaN payloads break PartialEq, so compare the flattened text form
            let a: Vec<String> = collect(&first, KeyScheme::Mnemonic)
                .into_iter()
                .map(|(k, v)| format!("{k} {v}"))
                .collect();
            let b: Vec<String> = collect(&second, KeyScheme::Mnemonic)
                .into_iter()
                .map(|(k, v)| format!("{k} {v}"))
                .collect();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn truncated_frames_never_decode(kind_index in 0usize..16, cut in 1usize..24) {
            let kind = PacketKind::ALL[kind_index];
            let frame = FrameBuilder::with_len(kind, kind.expected_len() - cut).build();
            prop_assert!(Packet::decode(&frame).is_err());
        }
    }
}
