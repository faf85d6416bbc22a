//! Common 29-byte packet header

use super::reader::WireReader;
use crate::Result;
use crate::walker::{Walk, Walker};

/// Header present at the start of every packet kind.
///
/// ```text
/// offset  size  field
///      0     2  packet format (2025)
///      2     1  game year
///      3     1  game major version
///      4     1  game minor version
///      5     1  packet version
///      6     1  packet id (kind discriminant)
///      7     8  session uid
///     15     4  session time
///     19     4  frame identifier
///     23     4  overall frame identifier
///     27     1  player car index
///     28     1  secondary player car index
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PacketHeader {
    pub packet_format: u16,
    pub game_year: u8,
    pub game_major_version: u8,
    pub game_minor_version: u8,
    pub packet_version: u8,
    pub packet_id: u8,
    pub session_uid: u64,
    pub session_time: f32,
    pub frame_identifier: u32,
    pub overall_frame_identifier: u32,
    pub player_car_index: u8,
    pub secondary_player_car_index: u8,
}

impl PacketHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = 29;

    /// Frames shorter than this are dropped before the kind is read.
    pub const MIN_FRAME_LEN: usize = 24;

    /// Offset of the packet kind discriminant.
    pub const PACKET_ID_OFFSET: usize = 6;

    /// Offset of the player car index.
    pub const PLAYER_CAR_INDEX_OFFSET: usize = 27;

    pub(crate) fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            packet_format: r.u16()?,
            game_year: r.u8()?,
            game_major_version: r.u8()?,
            game_minor_version: r.u8()?,
            packet_version: r.u8()?,
            packet_id: r.u8()?,
            session_uid: r.u64()?,
            session_time: r.f32()?,
            frame_identifier: r.u32()?,
            overall_frame_identifier: r.u32()?,
            player_car_index: r.u8()?,
            secondary_player_car_index: r.u8()?,
        })
    }
}

impl Walk for PacketHeader {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("PacketFormat", self.packet_format);
        w.scalar("GameYear", self.game_year);
        w.scalar("GameMajorVersion", self.game_major_version);
        w.scalar("GameMinorVersion", self.game_minor_version);
        w.scalar("PacketVersion", self.packet_version);
        w.scalar("PacketId", self.packet_id);
        w.scalar("SessionUID", self.session_uid);
        w.scalar("SessionTime", self.session_time);
        w.scalar("FrameIdentifier", self.frame_identifier);
        w.scalar("OverallFrameIdentifier", self.overall_frame_identifier);
        w.scalar("PlayerCarIndex", self.player_car_index);
        w.scalar("SecondaryPlayerCarIndex", self.secondary_player_car_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PacketKind;
    use crate::test_utils::FrameBuilder;

    #[test]
    fn header_fields_sit_at_documented_offsets() {
        let frame = FrameBuilder::new(PacketKind::CarStatus)
            .player_car_index(7)
            .put_u64(7, 0xDEAD_BEEF_0000_0001)
            .put_f32(15, 123.25)
            .put_u32(19, 4242)
            .build();

        let mut r = WireReader::new(PacketKind::CarStatus, &frame);
        let header = PacketHeader::read(&mut r).unwrap();

        assert_eq!(r.position(), PacketHeader::SIZE);
        assert_eq!(header.packet_format, 2025);
        assert_eq!(header.packet_id, PacketKind::CarStatus.id());
        assert_eq!(header.session_uid, 0xDEAD_BEEF_0000_0001);
        assert_eq!(header.session_time, 123.25);
        assert_eq!(header.frame_identifier, 4242);
        assert_eq!(header.player_car_index, 7);
    }
}
