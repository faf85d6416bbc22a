//! Final classification packet, sent once at the end of a session

use super::{MAX_CARS, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

pub const MAX_TYRE_STINTS: usize = 8;

/// Per-car classification record (46 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinalClassificationData {
    pub position: u8,
    pub num_laps: u8,
    pub grid_position: u8,
    pub points: u8,
    pub num_pit_stops: u8,
    pub result_status: u8,
    pub result_reason: u8,
    pub best_lap_time_in_ms: u32,
    /// Seconds, without penalties
    pub total_race_time: f64,
    pub penalties_time: u8,
    pub num_penalties: u8,
    pub num_tyre_stints: u8,
    pub tyre_stints_actual: [u8; MAX_TYRE_STINTS],
    pub tyre_stints_visual: [u8; MAX_TYRE_STINTS],
    pub tyre_stints_end_laps: [u8; MAX_TYRE_STINTS],
}

impl FinalClassificationData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            position: r.u8()?,
            num_laps: r.u8()?,
            grid_position: r.u8()?,
            points: r.u8()?,
            num_pit_stops: r.u8()?,
            result_status: r.u8()?,
            result_reason: r.u8()?,
            best_lap_time_in_ms: r.u32()?,
            total_race_time: r.f64()?,
            penalties_time: r.u8()?,
            num_penalties: r.u8()?,
            num_tyre_stints: r.u8()?,
            tyre_stints_actual: r.bytes()?,
            tyre_stints_visual: r.bytes()?,
            tyre_stints_end_laps: r.bytes()?,
        })
    }
}

impl Walk for FinalClassificationData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("Position", self.position);
        w.scalar("NumLaps", self.num_laps);
        w.scalar("GridPosition", self.grid_position);
        w.scalar("Points", self.points);
        w.scalar("NumPitStops", self.num_pit_stops);
        w.scalar("ResultStatus", self.result_status);
        w.scalar("ResultReason", self.result_reason);
        w.scalar("BestLapTimeInMS", self.best_lap_time_in_ms);
        w.scalar("TotalRaceTime", self.total_race_time);
        w.scalar("PenaltiesTime", self.penalties_time);
        w.scalar("NumPenalties", self.num_penalties);
        w.scalar("NumTyreStints", self.num_tyre_stints);
        w.scalars("TyreStintsActual", &self.tyre_stints_actual);
        w.scalars("TyreStintsVisual", &self.tyre_stints_visual);
        w.scalars("TyreStintsEndLaps", &self.tyre_stints_end_laps);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalClassificationPacket {
    pub header: PacketHeader,
    pub num_cars: u8,
    pub classification_data: [FinalClassificationData; MAX_CARS],
}

impl FinalClassificationPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::FinalClassification, data)?;
        let mut r = WireReader::new(PacketKind::FinalClassification, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            num_cars: r.u8()?,
            classification_data: r.array(FinalClassificationData::read)?,
        })
    }
}

impl Walk for FinalClassificationPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.scalar("NumCars", self.num_cars);
        w.records("ClassificationData", &self.classification_data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FrameBuilder;
    use crate::walker::{KeyScheme, collect};
    use crate::Value;

    #[test]
    fn decodes_race_time_as_f64() {
        let car = PacketHeader::SIZE + 1;
        let frame = FrameBuilder::new(PacketKind::FinalClassification)
            .put_u8(PacketHeader::SIZE, 20)
            .put_u8(car, 1)
            .put_f64(car + 11, 5_412.125)
            .put_u8(car + 22 + 7, 3)
            .build();

        let packet = FinalClassificationPacket::decode(&frame).unwrap();
        let winner = packet.classification_data[0];
        assert_eq!(packet.num_cars, 20);
        assert_eq!(winner.position, 1);
        assert_eq!(winner.total_race_time, 5_412.125);
        assert_eq!(winner.tyre_stints_actual[7], 3);

        let fields = collect(&packet, KeyScheme::Mnemonic);
        assert!(fields.contains(&("TotalRaceTime".to_string(), Value::Float64(5_412.125))));
        assert!(fields.iter().any(|(k, _)| k == "TyreStintsEndLaps7"));
    }
}
