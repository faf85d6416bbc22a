//! Car telemetry packet, narrowed to the player's car
//!
//! The wire frame carries a slot for every car; decoding reads the header's
//! player car index and extracts that single slot.

use super::{MAX_CARS, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{BridgeError, PacketKind, Result};

/// Per-car telemetry record (60 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarTelemetryData {
    /// km/h
    pub speed: u16,
    pub throttle: f32,
    pub steer: f32,
    pub brake: f32,
    pub clutch: u8,
    /// -1 reverse, 0 neutral
    pub gear: i8,
    pub engine_rpm: u16,
    pub drs: u8,
    pub rev_lights_percent: u8,
    pub rev_lights_bit_value: u16,
    pub brakes_temperature: [u16; 4],
    pub tyres_surface_temperature: [u8; 4],
    pub tyres_inner_temperature: [u8; 4],
    pub engine_temperature: u16,
    pub tyres_pressure: [f32; 4],
    pub surface_type: [u8; 4],
}

impl CarTelemetryData {
    pub const SIZE: usize = 60;

    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            speed: r.u16()?,
            throttle: r.f32()?,
            steer: r.f32()?,
            brake: r.f32()?,
            clutch: r.u8()?,
            gear: r.i8()?,
            engine_rpm: r.u16()?,
            drs: r.u8()?,
            rev_lights_percent: r.u8()?,
            rev_lights_bit_value: r.u16()?,
            brakes_temperature: r.array(|r| r.u16())?,
            tyres_surface_temperature: r.array(|r| r.u8())?,
            tyres_inner_temperature: r.array(|r| r.u8())?,
            engine_temperature: r.u16()?,
            tyres_pressure: r.array(|r| r.f32())?,
            surface_type: r.array(|r| r.u8())?,
        })
    }
}

impl Walk for CarTelemetryData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("Speed", self.speed);
        w.scalar("Throttle", self.throttle);
        w.scalar("Steer", self.steer);
        w.scalar("Brake", self.brake);
        w.scalar("Clutch", self.clutch);
        w.scalar("Gear", self.gear);
        w.scalar("EngineRPM", self.engine_rpm);
        w.scalar("DRS", self.drs);
        w.scalar("RevLightsPercent", self.rev_lights_percent);
        w.scalar("RevLightsBitValue", self.rev_lights_bit_value);
        w.scalars("BrakesTemperature", &self.brakes_temperature);
        w.scalars("TyresSurfaceTemperature", &self.tyres_surface_temperature);
        w.scalars("TyresInnerTemperature", &self.tyres_inner_temperature);
        w.scalar("EngineTemperature", self.engine_temperature);
        w.scalars("TyresPressure", &self.tyres_pressure);
        w.scalars("SurfaceType", &self.surface_type);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarTelemetryPacket {
    pub header: PacketHeader,
    /// The player's slot only
    pub player_car: CarTelemetryData,
}

impl CarTelemetryPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::CarTelemetry, data)?;
        let mut r = WireReader::new(PacketKind::CarTelemetry, data);
        let header = PacketHeader::read(&mut r)?;

        let index = header.player_car_index;
        if usize::from(index) >= MAX_CARS {
            return Err(BridgeError::InvalidCarIndex { index, max: MAX_CARS });
        }

        let offset = PacketHeader::SIZE + usize::from(index) * CarTelemetryData::SIZE;
        let mut slot = WireReader::at(PacketKind::CarTelemetry, data, offset);
        let player_car = CarTelemetryData::read(&mut slot)?;
        Ok(Self { header, player_car })
    }
}

impl Walk for CarTelemetryPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        self.player_car.walk(w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use crate::test_utils::FrameBuilder;
    use crate::walker::{KeyScheme, collect};

    fn slot(car: usize) -> usize {
        PacketHeader::SIZE + car * CarTelemetryData::SIZE
    }

    #[test]
    fn extracts_only_the_player_slot() {
        let frame = FrameBuilder::new(PacketKind::CarTelemetry)
            .player_car_index(3)
            .put_u16(slot(0), 111)
            .put_u16(slot(3), 287)
            .put_f32(slot(3) + 2, 0.75)
            .put_i8(slot(3) + 15, 6)
            .put_f32(slot(3) + 40 + 8, 23.5)
            .build();
        assert_eq!(frame.len(), 1381);

        let packet = CarTelemetryPacket::decode(&frame).unwrap();
        assert_eq!(packet.header.player_car_index, 3);
        assert_eq!(packet.player_car.speed, 287);
        assert_eq!(packet.player_car.throttle, 0.75);
        assert_eq!(packet.player_car.gear, 6);
        assert_eq!(packet.player_car.tyres_pressure[2], 23.5);
    }

    #[test]
    fn out_of_range_player_index_is_rejected() {
        let frame = FrameBuilder::new(PacketKind::CarTelemetry).player_car_index(22).build();
        assert!(matches!(
            CarTelemetryPacket::decode(&frame),
            Err(BridgeError::InvalidCarIndex { index: 22, max: 22 })
        ));
    }

    #[test]
    fn car_fields_sit_directly_under_the_kind() {
        let frame = FrameBuilder::new(PacketKind::CarTelemetry).put_u16(slot(0), 300).build();
        let packet = CarTelemetryPacket::decode(&frame).unwrap();

        let path = collect(&packet, KeyScheme::Path("CarTelemetry"));
        assert!(path.contains(&("CarTelemetry/Speed".to_string(), Value::UInt16(300))));
        assert!(path.iter().any(|(k, _)| k == "CarTelemetry/Header/PlayerCarIndex"));

        let mnemonic = collect(&packet, KeyScheme::Mnemonic);
        assert!(mnemonic.iter().any(|(k, _)| k == "TyresPressureRL"));
        assert!(mnemonic.iter().any(|(k, _)| k == "Gear"));
    }
}
