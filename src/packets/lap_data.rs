//! Lap data packet: timing and race state for every car

use super::{MAX_CARS, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

/// Per-car lap record (57 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LapData {
    pub last_lap_time_in_ms: u32,
    pub current_lap_time_in_ms: u32,
    pub sector1_time_ms_part: u16,
    pub sector1_time_minutes_part: u8,
    pub sector2_time_ms_part: u16,
    pub sector2_time_minutes_part: u8,
    pub delta_to_car_in_front_ms_part: u16,
    pub delta_to_car_in_front_minutes_part: u8,
    pub delta_to_race_leader_ms_part: u16,
    pub delta_to_race_leader_minutes_part: u8,
    pub lap_distance: f32,
    pub total_distance: f32,
    pub safety_car_delta: f32,
    pub car_position: u8,
    pub current_lap_num: u8,
    pub pit_status: u8,
    pub num_pit_stops: u8,
    pub sector: u8,
    pub current_lap_invalid: u8,
    pub penalties: u8,
    pub total_warnings: u8,
    pub corner_cutting_warnings: u8,
    pub num_unserved_drive_through_pens: u8,
    pub num_unserved_stop_go_pens: u8,
    pub grid_position: u8,
    pub driver_status: u8,
    pub result_status: u8,
    pub pit_lane_timer_active: u8,
    pub pit_lane_time_in_lane_in_ms: u16,
    pub pit_stop_timer_in_ms: u16,
    pub pit_stop_should_serve_pen: u8,
    pub speed_trap_fastest_speed: f32,
    pub speed_trap_fastest_lap: u8,
}

impl LapData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            last_lap_time_in_ms: r.u32()?,
            current_lap_time_in_ms: r.u32()?,
            sector1_time_ms_part: r.u16()?,
            sector1_time_minutes_part: r.u8()?,
            sector2_time_ms_part: r.u16()?,
            sector2_time_minutes_part: r.u8()?,
            delta_to_car_in_front_ms_part: r.u16()?,
            delta_to_car_in_front_minutes_part: r.u8()?,
            delta_to_race_leader_ms_part: r.u16()?,
            delta_to_race_leader_minutes_part: r.u8()?,
            lap_distance: r.f32()?,
            total_distance: r.f32()?,
            safety_car_delta: r.f32()?,
            car_position: r.u8()?,
            current_lap_num: r.u8()?,
            pit_status: r.u8()?,
            num_pit_stops: r.u8()?,
            sector: r.u8()?,
            current_lap_invalid: r.u8()?,
            penalties: r.u8()?,
            total_warnings: r.u8()?,
            corner_cutting_warnings: r.u8()?,
            num_unserved_drive_through_pens: r.u8()?,
            num_unserved_stop_go_pens: r.u8()?,
            grid_position: r.u8()?,
            driver_status: r.u8()?,
            result_status: r.u8()?,
            pit_lane_timer_active: r.u8()?,
            pit_lane_time_in_lane_in_ms: r.u16()?,
            pit_stop_timer_in_ms: r.u16()?,
            pit_stop_should_serve_pen: r.u8()?,
            speed_trap_fastest_speed: r.f32()?,
            speed_trap_fastest_lap: r.u8()?,
        })
    }
}

impl Walk for LapData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("LastLapTimeInMS", self.last_lap_time_in_ms);
        w.scalar("CurrentLapTimeInMS", self.current_lap_time_in_ms);
        w.scalar("Sector1TimeMSPart", self.sector1_time_ms_part);
        w.scalar("Sector1TimeMinutesPart", self.sector1_time_minutes_part);
        w.scalar("Sector2TimeMSPart", self.sector2_time_ms_part);
        w.scalar("Sector2TimeMinutesPart", self.sector2_time_minutes_part);
        w.scalar("DeltaToCarInFrontMSPart", self.delta_to_car_in_front_ms_part);
        w.scalar("DeltaToCarInFrontMinutesPart", self.delta_to_car_in_front_minutes_part);
        w.scalar("DeltaToRaceLeaderMSPart", self.delta_to_race_leader_ms_part);
        w.scalar("DeltaToRaceLeaderMinutesPart", self.delta_to_race_leader_minutes_part);
        w.scalar("LapDistance", self.lap_distance);
        w.scalar("TotalDistance", self.total_distance);
        w.scalar("SafetyCarDelta", self.safety_car_delta);
        w.scalar("CarPosition", self.car_position);
        w.scalar("CurrentLapNum", self.current_lap_num);
        w.scalar("PitStatus", self.pit_status);
        w.scalar("NumPitStops", self.num_pit_stops);
        w.scalar("Sector", self.sector);
        w.scalar("CurrentLapInvalid", self.current_lap_invalid);
        w.scalar("Penalties", self.penalties);
        w.scalar("TotalWarnings", self.total_warnings);
        w.scalar("CornerCuttingWarnings", self.corner_cutting_warnings);
        w.scalar("NumUnservedDriveThroughPens", self.num_unserved_drive_through_pens);
        w.scalar("NumUnservedStopGoPens", self.num_unserved_stop_go_pens);
        w.scalar("GridPosition", self.grid_position);
        w.scalar("DriverStatus", self.driver_status);
        w.scalar("ResultStatus", self.result_status);
        w.scalar("PitLaneTimerActive", self.pit_lane_timer_active);
        w.scalar("PitLaneTimeInLaneInMS", self.pit_lane_time_in_lane_in_ms);
        w.scalar("PitStopTimerInMS", self.pit_stop_timer_in_ms);
        w.scalar("PitStopShouldServePen", self.pit_stop_should_serve_pen);
        w.scalar("SpeedTrapFastestSpeed", self.speed_trap_fastest_speed);
        w.scalar("SpeedTrapFastestLap", self.speed_trap_fastest_lap);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LapDataPacket {
    pub header: PacketHeader,
    pub lap_data: [LapData; MAX_CARS],
    /// 255 when no personal best exists
    pub time_trial_pb_car_idx: u8,
    pub time_trial_rival_car_idx: u8,
}

impl LapDataPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::LapData, data)?;
        let mut r = WireReader::new(PacketKind::LapData, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            lap_data: r.array(LapData::read)?,
            time_trial_pb_car_idx: r.u8()?,
            time_trial_rival_car_idx: r.u8()?,
        })
    }
}

impl Walk for LapDataPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.records("LapData", &self.lap_data);
        w.scalar("TimeTrialPBCarIdx", self.time_trial_pb_car_idx);
        w.scalar("TimeTrialRivalCarIdx", self.time_trial_rival_car_idx);
    }
}
