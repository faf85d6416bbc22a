//! Car status packet: fuel, ERS and tyre state per car

use super::{MAX_CARS, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

/// Per-car status record (55 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarStatusData {
    pub traction_control: u8,
    pub anti_lock_brakes: u8,
    pub fuel_mix: u8,
    pub front_brake_bias: u8,
    pub pit_limiter_status: u8,
    pub fuel_in_tank: f32,
    pub fuel_capacity: f32,
    pub fuel_remaining_laps: f32,
    pub max_rpm: u16,
    pub idle_rpm: u16,
    pub max_gears: u8,
    pub drs_allowed: u8,
    /// 0 when DRS is not available
    pub drs_activation_distance: u16,
    pub actual_tyre_compound: u8,
    pub visual_tyre_compound: u8,
    pub tyres_age_laps: u8,
    /// -1 invalid/unknown, 0 none, 1 green, 2 blue, 3 yellow
    pub vehicle_fia_flags: i8,
    pub engine_power_ice: f32,
    pub engine_power_mguk: f32,
    pub ers_store_energy: f32,
    pub ers_deploy_mode: u8,
    pub ers_harvested_this_lap_mguk: f32,
    pub ers_harvested_this_lap_mguh: f32,
    pub ers_deployed_this_lap: f32,
    pub network_paused: u8,
}

impl CarStatusData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            traction_control: r.u8()?,
            anti_lock_brakes: r.u8()?,
            fuel_mix: r.u8()?,
            front_brake_bias: r.u8()?,
            pit_limiter_status: r.u8()?,
            fuel_in_tank: r.f32()?,
            fuel_capacity: r.f32()?,
            fuel_remaining_laps: r.f32()?,
            max_rpm: r.u16()?,
            idle_rpm: r.u16()?,
            max_gears: r.u8()?,
            drs_allowed: r.u8()?,
            drs_activation_distance: r.u16()?,
            actual_tyre_compound: r.u8()?,
            visual_tyre_compound: r.u8()?,
            tyres_age_laps: r.u8()?,
            vehicle_fia_flags: r.i8()?,
            engine_power_ice: r.f32()?,
            engine_power_mguk: r.f32()?,
            ers_store_energy: r.f32()?,
            ers_deploy_mode: r.u8()?,
            ers_harvested_this_lap_mguk: r.f32()?,
            ers_harvested_this_lap_mguh: r.f32()?,
            ers_deployed_this_lap: r.f32()?,
            network_paused: r.u8()?,
        })
    }
}

impl Walk for CarStatusData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("TractionControl", self.traction_control);
        w.scalar("AntiLockBrakes", self.anti_lock_brakes);
        w.scalar("FuelMix", self.fuel_mix);
        w.scalar("FrontBrakeBias", self.front_brake_bias);
        w.scalar("PitLimiterStatus", self.pit_limiter_status);
        w.scalar("FuelInTank", self.fuel_in_tank);
        w.scalar("FuelCapacity", self.fuel_capacity);
        w.scalar("FuelRemainingLaps", self.fuel_remaining_laps);
        w.scalar("MaxRPM", self.max_rpm);
        w.scalar("IdleRPM", self.idle_rpm);
        w.scalar("MaxGears", self.max_gears);
        w.scalar("DRSAllowed", self.drs_allowed);
        w.scalar("DRSActivationDistance", self.drs_activation_distance);
        w.scalar("ActualTyreCompound", self.actual_tyre_compound);
        w.scalar("VisualTyreCompound", self.visual_tyre_compound);
        w.scalar("TyresAgeLaps", self.tyres_age_laps);
        w.scalar("VehicleFIAFlags", self.vehicle_fia_flags);
        w.scalar("EnginePowerICE", self.engine_power_ice);
        w.scalar("EnginePowerMGUK", self.engine_power_mguk);
        w.scalar("ERSStoreEnergy", self.ers_store_energy);
        w.scalar("ERSDeployMode", self.ers_deploy_mode);
        w.scalar("ERSHarvestedThisLapMGUK", self.ers_harvested_this_lap_mguk);
        w.scalar("ERSHarvestedThisLapMGUH", self.ers_harvested_this_lap_mguh);
        w.scalar("ERSDeployedThisLap", self.ers_deployed_this_lap);
        w.scalar("NetworkPaused", self.network_paused);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarStatusPacket {
    pub header: PacketHeader,
    pub car_status_data: [CarStatusData; MAX_CARS],
}

impl CarStatusPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::CarStatus, data)?;
        let mut r = WireReader::new(PacketKind::CarStatus, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            car_status_data: r.array(CarStatusData::read)?,
        })
    }
}

impl Walk for CarStatusPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.records("CarStatusData", &self.car_status_data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FrameBuilder;

    #[test]
    fn decodes_fuel_and_flags() {
        let car = PacketHeader::SIZE + 2 * 55;
        let frame = FrameBuilder::new(PacketKind::CarStatus)
            .put_f32(car + 5, 42.25)
            .put_i8(car + 28, -1)
            .put_u8(car + 54, 1)
            .build();

        let packet = CarStatusPacket::decode(&frame).unwrap();
        let status = packet.car_status_data[2];
        assert_eq!(status.fuel_in_tank, 42.25);
        assert_eq!(status.vehicle_fia_flags, -1);
        assert_eq!(status.network_paused, 1);
        assert_eq!(packet.car_status_data[1], CarStatusData::default());
    }
}
