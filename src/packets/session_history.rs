//! Session history packet: lap and tyre stint history for one car

use super::{PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

pub const MAX_LAP_HISTORY: usize = 100;
pub const MAX_TYRE_STINT_HISTORY: usize = 8;

/// One completed lap (14 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LapHistoryData {
    pub lap_time_in_ms: u32,
    pub sector1_time_ms_part: u16,
    pub sector1_time_minutes_part: u8,
    pub sector2_time_ms_part: u16,
    pub sector2_time_minutes_part: u8,
    pub sector3_time_ms_part: u16,
    pub sector3_time_minutes_part: u8,
    /// bit 0 lap, bits 1-3 sectors 1-3
    pub lap_valid_bit_flags: u8,
}

impl LapHistoryData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            lap_time_in_ms: r.u32()?,
            sector1_time_ms_part: r.u16()?,
            sector1_time_minutes_part: r.u8()?,
            sector2_time_ms_part: r.u16()?,
            sector2_time_minutes_part: r.u8()?,
            sector3_time_ms_part: r.u16()?,
            sector3_time_minutes_part: r.u8()?,
            lap_valid_bit_flags: r.u8()?,
        })
    }
}

impl Walk for LapHistoryData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("LapTimeInMS", self.lap_time_in_ms);
        w.scalar("Sector1TimeMSPart", self.sector1_time_ms_part);
        w.scalar("Sector1TimeMinutesPart", self.sector1_time_minutes_part);
        w.scalar("Sector2TimeMSPart", self.sector2_time_ms_part);
        w.scalar("Sector2TimeMinutesPart", self.sector2_time_minutes_part);
        w.scalar("Sector3TimeMSPart", self.sector3_time_ms_part);
        w.scalar("Sector3TimeMinutesPart", self.sector3_time_minutes_part);
        w.scalar("LapValidBitFlags", self.lap_valid_bit_flags);
    }
}

/// One tyre stint (3 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TyreStintHistoryData {
    /// 255 for the current stint
    pub end_lap: u8,
    pub tyre_actual_compound: u8,
    pub tyre_visual_compound: u8,
}

impl TyreStintHistoryData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self { end_lap: r.u8()?, tyre_actual_compound: r.u8()?, tyre_visual_compound: r.u8()? })
    }
}

impl Walk for TyreStintHistoryData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("EndLap", self.end_lap);
        w.scalar("TyreActualCompound", self.tyre_actual_compound);
        w.scalar("TyreVisualCompound", self.tyre_visual_compound);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionHistoryPacket {
    pub header: PacketHeader,
    pub car_idx: u8,
    pub num_laps: u8,
    pub num_tyre_stints: u8,
    pub best_lap_time_lap_num: u8,
    pub best_sector1_lap_num: u8,
    pub best_sector2_lap_num: u8,
    pub best_sector3_lap_num: u8,
    pub lap_history_data: [LapHistoryData; MAX_LAP_HISTORY],
    pub tyre_stints_history_data: [TyreStintHistoryData; MAX_TYRE_STINT_HISTORY],
}

impl SessionHistoryPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::SessionHistory, data)?;
        let mut r = WireReader::new(PacketKind::SessionHistory, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            car_idx: r.u8()?,
            num_laps: r.u8()?,
            num_tyre_stints: r.u8()?,
            best_lap_time_lap_num: r.u8()?,
            best_sector1_lap_num: r.u8()?,
            best_sector2_lap_num: r.u8()?,
            best_sector3_lap_num: r.u8()?,
            lap_history_data: r.array(LapHistoryData::read)?,
            tyre_stints_history_data: r.array(TyreStintHistoryData::read)?,
        })
    }
}

impl Walk for SessionHistoryPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.scalar("CarIdx", self.car_idx);
        w.scalar("NumLaps", self.num_laps);
        w.scalar("NumTyreStints", self.num_tyre_stints);
        w.scalar("BestLapTimeLapNum", self.best_lap_time_lap_num);
        w.scalar("BestSector1LapNum", self.best_sector1_lap_num);
        w.scalar("BestSector2LapNum", self.best_sector2_lap_num);
        w.scalar("BestSector3LapNum", self.best_sector3_lap_num);
        w.records("LapHistoryData", &self.lap_history_data);
        w.records("TyreStintsHistoryData", &self.tyre_stints_history_data);
    }
}
