//! Time trial packet: session best, personal best and rival laps

use super::{PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

/// One reference lap with the assists it was driven with (24 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeTrialDataSet {
    pub car_idx: u8,
    pub team_id: u8,
    pub lap_time_in_ms: u32,
    pub sector1_time_in_ms: u32,
    pub sector2_time_in_ms: u32,
    pub sector3_time_in_ms: u32,
    pub traction_control: u8,
    pub gearbox_assist: u8,
    pub anti_lock_brakes: u8,
    pub equal_car_performance: u8,
    pub custom_setup: u8,
    pub valid: u8,
}

impl TimeTrialDataSet {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            car_idx: r.u8()?,
            team_id: r.u8()?,
            lap_time_in_ms: r.u32()?,
            sector1_time_in_ms: r.u32()?,
            sector2_time_in_ms: r.u32()?,
            sector3_time_in_ms: r.u32()?,
            traction_control: r.u8()?,
            gearbox_assist: r.u8()?,
            anti_lock_brakes: r.u8()?,
            equal_car_performance: r.u8()?,
            custom_setup: r.u8()?,
            valid: r.u8()?,
        })
    }
}

impl Walk for TimeTrialDataSet {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("CarIdx", self.car_idx);
        w.scalar("TeamId", self.team_id);
        w.scalar("LapTimeInMS", self.lap_time_in_ms);
        w.scalar("Sector1TimeInMS", self.sector1_time_in_ms);
        w.scalar("Sector2TimeInMS", self.sector2_time_in_ms);
        w.scalar("Sector3TimeInMS", self.sector3_time_in_ms);
        w.scalar("TractionControl", self.traction_control);
        w.scalar("GearboxAssist", self.gearbox_assist);
        w.scalar("AntiLockBrakes", self.anti_lock_brakes);
        w.scalar("EqualCarPerformance", self.equal_car_performance);
        w.scalar("CustomSetup", self.custom_setup);
        w.scalar("Valid", self.valid);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeTrialPacket {
    pub header: PacketHeader,
    pub player_session_best_data_set: TimeTrialDataSet,
    pub personal_best_data_set: TimeTrialDataSet,
    pub rival_data_set: TimeTrialDataSet,
}

impl TimeTrialPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::TimeTrial, data)?;
        let mut r = WireReader::new(PacketKind::TimeTrial, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            player_session_best_data_set: TimeTrialDataSet::read(&mut r)?,
            personal_best_data_set: TimeTrialDataSet::read(&mut r)?,
            rival_data_set: TimeTrialDataSet::read(&mut r)?,
        })
    }
}

impl Walk for TimeTrialPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.record("PlayerSessionBestDataSet", &self.player_session_best_data_set);
        w.record("PersonalBestDataSet", &self.personal_best_data_set);
        w.record("RivalDataSet", &self.rival_data_set);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use crate::test_utils::FrameBuilder;
    use crate::walker::{KeyScheme, collect};

    #[test]
    fn rival_set_is_last() {
        let rival = PacketHeader::SIZE + 2 * 24;
        let frame = FrameBuilder::new(PacketKind::TimeTrial)
            .put_u32(rival + 2, 78_901)
            .put_u8(rival + 23, 1)
            .build();

        let packet = TimeTrialPacket::decode(&frame).unwrap();
        assert_eq!(packet.rival_data_set.lap_time_in_ms, 78_901);
        assert_eq!(packet.rival_data_set.valid, 1);
        assert_eq!(packet.personal_best_data_set, TimeTrialDataSet::default());

        let fields = collect(&packet, KeyScheme::Path("TimeTrial"));
        assert!(fields.contains(&(
            "TimeTrial/RivalDataSet/LapTimeInMS".to_string(),
            Value::UInt32(78_901)
        )));
    }
}
