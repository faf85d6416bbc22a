//! Tyre sets packet: allocation of sets for one car

use super::{PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

/// 13 dry plus 7 wet sets.
pub const MAX_TYRE_SETS: usize = 20;

/// One tyre set (10 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TyreSetData {
    pub actual_tyre_compound: u8,
    pub visual_tyre_compound: u8,
    pub wear: u8,
    pub available: u8,
    pub recommended_session: u8,
    pub life_span: u8,
    pub usable_life: u8,
    /// Milliseconds relative to the fitted set
    pub lap_delta_time: i16,
    pub fitted: u8,
}

impl TyreSetData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            actual_tyre_compound: r.u8()?,
            visual_tyre_compound: r.u8()?,
            wear: r.u8()?,
            available: r.u8()?,
            recommended_session: r.u8()?,
            life_span: r.u8()?,
            usable_life: r.u8()?,
            lap_delta_time: r.i16()?,
            fitted: r.u8()?,
        })
    }
}

impl Walk for TyreSetData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("ActualTyreCompound", self.actual_tyre_compound);
        w.scalar("VisualTyreCompound", self.visual_tyre_compound);
        w.scalar("Wear", self.wear);
        w.scalar("Available", self.available);
        w.scalar("RecommendedSession", self.recommended_session);
        w.scalar("LifeSpan", self.life_span);
        w.scalar("UsableLife", self.usable_life);
        w.scalar("LapDeltaTime", self.lap_delta_time);
        w.scalar("Fitted", self.fitted);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TyreSetsPacket {
    pub header: PacketHeader,
    pub car_idx: u8,
    pub tyre_set_data: [TyreSetData; MAX_TYRE_SETS],
    pub fitted_idx: u8,
}

impl TyreSetsPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::TyreSets, data)?;
        let mut r = WireReader::new(PacketKind::TyreSets, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            car_idx: r.u8()?,
            tyre_set_data: r.array(TyreSetData::read)?,
            fitted_idx: r.u8()?,
        })
    }
}

impl Walk for TyreSetsPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.scalar("CarIdx", self.car_idx);
        w.records("TyreSetData", &self.tyre_set_data);
        w.scalar("FittedIdx", self.fitted_idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FrameBuilder;

    #[test]
    fn decodes_signed_lap_delta() {
        let set = PacketHeader::SIZE + 1 + 4 * 10;
        let frame = FrameBuilder::new(PacketKind::TyreSets)
            .put_i16(set + 7, -350)
            .put_u8(set + 9, 1)
            .put_u8(230, 4)
            .build();

        let packet = TyreSetsPacket::decode(&frame).unwrap();
        assert_eq!(packet.tyre_set_data[4].lap_delta_time, -350);
        assert_eq!(packet.tyre_set_data[4].fitted, 1);
        assert_eq!(packet.fitted_idx, 4);
    }
}
