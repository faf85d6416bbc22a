//! Car setups packet

use super::{MAX_CARS, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

/// Per-car setup record (50 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarSetupData {
    pub front_wing: u8,
    pub rear_wing: u8,
    pub on_throttle: u8,
    pub off_throttle: u8,
    pub front_camber: f32,
    pub rear_camber: f32,
    pub front_toe: f32,
    pub rear_toe: f32,
    pub front_suspension: u8,
    pub rear_suspension: u8,
    pub front_anti_roll_bar: u8,
    pub rear_anti_roll_bar: u8,
    pub front_suspension_height: u8,
    pub rear_suspension_height: u8,
    pub brake_pressure: u8,
    pub brake_bias: u8,
    pub engine_braking: u8,
    pub rear_left_tyre_pressure: f32,
    pub rear_right_tyre_pressure: f32,
    pub front_left_tyre_pressure: f32,
    pub front_right_tyre_pressure: f32,
    pub ballast: u8,
    pub fuel_load: f32,
}

impl CarSetupData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            front_wing: r.u8()?,
            rear_wing: r.u8()?,
            on_throttle: r.u8()?,
            off_throttle: r.u8()?,
            front_camber: r.f32()?,
            rear_camber: r.f32()?,
            front_toe: r.f32()?,
            rear_toe: r.f32()?,
            front_suspension: r.u8()?,
            rear_suspension: r.u8()?,
            front_anti_roll_bar: r.u8()?,
            rear_anti_roll_bar: r.u8()?,
            front_suspension_height: r.u8()?,
            rear_suspension_height: r.u8()?,
            brake_pressure: r.u8()?,
            brake_bias: r.u8()?,
            engine_braking: r.u8()?,
            rear_left_tyre_pressure: r.f32()?,
            rear_right_tyre_pressure: r.f32()?,
            front_left_tyre_pressure: r.f32()?,
            front_right_tyre_pressure: r.f32()?,
            ballast: r.u8()?,
            fuel_load: r.f32()?,
        })
    }
}

impl Walk for CarSetupData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("FrontWing", self.front_wing);
        w.scalar("RearWing", self.rear_wing);
        w.scalar("OnThrottle", self.on_throttle);
        w.scalar("OffThrottle", self.off_throttle);
        w.scalar("FrontCamber", self.front_camber);
        w.scalar("RearCamber", self.rear_camber);
        w.scalar("FrontToe", self.front_toe);
        w.scalar("RearToe", self.rear_toe);
        w.scalar("FrontSuspension", self.front_suspension);
        w.scalar("RearSuspension", self.rear_suspension);
        w.scalar("FrontAntiRollBar", self.front_anti_roll_bar);
        w.scalar("RearAntiRollBar", self.rear_anti_roll_bar);
        w.scalar("FrontSuspensionHeight", self.front_suspension_height);
        w.scalar("RearSuspensionHeight", self.rear_suspension_height);
        w.scalar("BrakePressure", self.brake_pressure);
        w.scalar("BrakeBias", self.brake_bias);
        w.scalar("EngineBraking", self.engine_braking);
        w.scalar("RearLeftTyrePressure", self.rear_left_tyre_pressure);
        w.scalar("RearRightTyrePressure", self.rear_right_tyre_pressure);
        w.scalar("FrontLeftTyrePressure", self.front_left_tyre_pressure);
        w.scalar("FrontRightTyrePressure", self.front_right_tyre_pressure);
        w.scalar("Ballast", self.ballast);
        w.scalar("FuelLoad", self.fuel_load);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarSetupsPacket {
    pub header: PacketHeader,
    pub car_setup_data: [CarSetupData; MAX_CARS],
    pub next_front_wing_value: f32,
}

impl CarSetupsPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::CarSetups, data)?;
        let mut r = WireReader::new(PacketKind::CarSetups, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            car_setup_data: r.array(CarSetupData::read)?,
            next_front_wing_value: r.f32()?,
        })
    }
}

impl Walk for CarSetupsPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.records("CarSetupData", &self.car_setup_data);
        w.scalar("NextFrontWingValue", self.next_front_wing_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FrameBuilder;

    #[test]
    fn decodes_fuel_load_and_trailer() {
        let frame = FrameBuilder::new(PacketKind::CarSetups)
            .put_f32(PacketHeader::SIZE + 46, 12.5)
            .put_f32(1129, 31.0)
            .build();

        let packet = CarSetupsPacket::decode(&frame).unwrap();
        assert_eq!(packet.car_setup_data[0].fuel_load, 12.5);
        assert_eq!(packet.next_front_wing_value, 31.0);
    }
}
