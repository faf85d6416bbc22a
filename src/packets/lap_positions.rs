//! Lap positions packet: running order per lap for up to 50 laps

use super::{MAX_CARS, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

pub const MAX_LAPS_IN_LAP_POSITIONS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct LapPositionsPacket {
    pub header: PacketHeader,
    pub num_laps: u8,
    /// First lap held in this packet, zero based
    pub lap_start: u8,
    /// `[lap][car]`, 0 when the car was not classified on that lap
    pub position_for_vehicle_idx: [[u8; MAX_CARS]; MAX_LAPS_IN_LAP_POSITIONS],
}

impl LapPositionsPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::LapPositions, data)?;
        let mut r = WireReader::new(PacketKind::LapPositions, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            num_laps: r.u8()?,
            lap_start: r.u8()?,
            position_for_vehicle_idx: r.array(|r| r.bytes())?,
        })
    }
}

impl Walk for LapPositionsPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.scalar("NumLaps", self.num_laps);
        w.scalar("LapStart", self.lap_start);
        w.grid("PositionForVehicleIdx", &self.position_for_vehicle_idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FrameBuilder;
    use crate::walker::{KeyScheme, collect};

    #[test]
    fn grid_is_lap_major() {
        let grid = PacketHeader::SIZE + 2;
        let frame = FrameBuilder::new(PacketKind::LapPositions)
            .put_u8(PacketHeader::SIZE, 3)
            .put_u8(grid + 2 * MAX_CARS + 5, 1)
            .put_u8(1130, 22)
            .build();

        let packet = LapPositionsPacket::decode(&frame).unwrap();
        assert_eq!(packet.num_laps, 3);
        assert_eq!(packet.position_for_vehicle_idx[2][5], 1);
        assert_eq!(packet.position_for_vehicle_idx[49][21], 22);

        let paths = collect(&packet, KeyScheme::Path("LapPositions"));
        assert_eq!(paths.last().map(|(k, _)| k.as_str()), Some("LapPositions/PositionForVehicleIdx[49][21]"));
        let mnemonic = collect(&packet, KeyScheme::Mnemonic);
        assert_eq!(mnemonic.last().map(|(k, _)| k.as_str()), Some("PositionForVehicleIdx49_21"));
    }
}
