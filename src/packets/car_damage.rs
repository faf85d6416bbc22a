//! Car damage packet

use super::{MAX_CARS, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

/// Per-car damage record (46 bytes). Wear and damage are percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarDamageData {
    pub tyres_wear: [f32; 4],
    pub tyres_damage: [u8; 4],
    pub brakes_damage: [u8; 4],
    pub tyre_blisters: [u8; 4],
    pub front_left_wing_damage: u8,
    pub front_right_wing_damage: u8,
    pub rear_wing_damage: u8,
    pub floor_damage: u8,
    pub diffuser_damage: u8,
    pub sidepod_damage: u8,
    pub drs_fault: u8,
    pub ers_fault: u8,
    pub gear_box_damage: u8,
    pub engine_damage: u8,
    pub engine_mguh_wear: u8,
    pub engine_es_wear: u8,
    pub engine_ce_wear: u8,
    pub engine_ice_wear: u8,
    pub engine_mguk_wear: u8,
    pub engine_tc_wear: u8,
    pub engine_blown: u8,
    pub engine_seized: u8,
}

impl CarDamageData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            tyres_wear: r.array(|r| r.f32())?,
            tyres_damage: r.bytes()?,
            brakes_damage: r.bytes()?,
            tyre_blisters: r.bytes()?,
            front_left_wing_damage: r.u8()?,
            front_right_wing_damage: r.u8()?,
            rear_wing_damage: r.u8()?,
            floor_damage: r.u8()?,
            diffuser_damage: r.u8()?,
            sidepod_damage: r.u8()?,
            drs_fault: r.u8()?,
            ers_fault: r.u8()?,
            gear_box_damage: r.u8()?,
            engine_damage: r.u8()?,
            engine_mguh_wear: r.u8()?,
            engine_es_wear: r.u8()?,
            engine_ce_wear: r.u8()?,
            engine_ice_wear: r.u8()?,
            engine_mguk_wear: r.u8()?,
            engine_tc_wear: r.u8()?,
            engine_blown: r.u8()?,
            engine_seized: r.u8()?,
        })
    }
}

impl Walk for CarDamageData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalars("TyresWear", &self.tyres_wear);
        w.scalars("TyresDamage", &self.tyres_damage);
        w.scalars("BrakesDamage", &self.brakes_damage);
        w.scalars("TyreBlisters", &self.tyre_blisters);
        w.scalar("FrontLeftWingDamage", self.front_left_wing_damage);
        w.scalar("FrontRightWingDamage", self.front_right_wing_damage);
        w.scalar("RearWingDamage", self.rear_wing_damage);
        w.scalar("FloorDamage", self.floor_damage);
        w.scalar("DiffuserDamage", self.diffuser_damage);
        w.scalar("SidepodDamage", self.sidepod_damage);
        w.scalar("DRSFault", self.drs_fault);
        w.scalar("ERSFault", self.ers_fault);
        w.scalar("GearBoxDamage", self.gear_box_damage);
        w.scalar("EngineDamage", self.engine_damage);
        w.scalar("EngineMGUHWear", self.engine_mguh_wear);
        w.scalar("EngineESWear", self.engine_es_wear);
        w.scalar("EngineCEWear", self.engine_ce_wear);
        w.scalar("EngineICEWear", self.engine_ice_wear);
        w.scalar("EngineMGUKWear", self.engine_mguk_wear);
        w.scalar("EngineTCWear", self.engine_tc_wear);
        w.scalar("EngineBlown", self.engine_blown);
        w.scalar("EngineSeized", self.engine_seized);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarDamagePacket {
    pub header: PacketHeader,
    pub car_damage_data: [CarDamageData; MAX_CARS],
}

impl CarDamagePacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::CarDamage, data)?;
        let mut r = WireReader::new(PacketKind::CarDamage, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            car_damage_data: r.array(CarDamageData::read)?,
        })
    }
}

impl Walk for CarDamagePacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.records("CarDamageData", &self.car_damage_data);
    }
}
