//! Motion packet: world-space physics for every car

use super::{MAX_CARS, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

/// Per-car motion record (60 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarMotionData {
    pub world_position_x: f32,
    pub world_position_y: f32,
    pub world_position_z: f32,
    pub world_velocity_x: f32,
    pub world_velocity_y: f32,
    pub world_velocity_z: f32,
    /// Normalised to 32767 = 1.0
    pub world_forward_dir_x: i16,
    pub world_forward_dir_y: i16,
    pub world_forward_dir_z: i16,
    pub world_right_dir_x: i16,
    pub world_right_dir_y: i16,
    pub world_right_dir_z: i16,
    pub g_force_lateral: f32,
    pub g_force_longitudinal: f32,
    pub g_force_vertical: f32,
    /// Radians
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl CarMotionData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            world_position_x: r.f32()?,
            world_position_y: r.f32()?,
            world_position_z: r.f32()?,
            world_velocity_x: r.f32()?,
            world_velocity_y: r.f32()?,
            world_velocity_z: r.f32()?,
            world_forward_dir_x: r.i16()?,
            world_forward_dir_y: r.i16()?,
            world_forward_dir_z: r.i16()?,
            world_right_dir_x: r.i16()?,
            world_right_dir_y: r.i16()?,
            world_right_dir_z: r.i16()?,
            g_force_lateral: r.f32()?,
            g_force_longitudinal: r.f32()?,
            g_force_vertical: r.f32()?,
            yaw: r.f32()?,
            pitch: r.f32()?,
            roll: r.f32()?,
        })
    }
}

impl Walk for CarMotionData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("WorldPositionX", self.world_position_x);
        w.scalar("WorldPositionY", self.world_position_y);
        w.scalar("WorldPositionZ", self.world_position_z);
        w.scalar("WorldVelocityX", self.world_velocity_x);
        w.scalar("WorldVelocityY", self.world_velocity_y);
        w.scalar("WorldVelocityZ", self.world_velocity_z);
        w.scalar("WorldForwardDirX", self.world_forward_dir_x);
        w.scalar("WorldForwardDirY", self.world_forward_dir_y);
        w.scalar("WorldForwardDirZ", self.world_forward_dir_z);
        w.scalar("WorldRightDirX", self.world_right_dir_x);
        w.scalar("WorldRightDirY", self.world_right_dir_y);
        w.scalar("WorldRightDirZ", self.world_right_dir_z);
        w.scalar("GForceLateral", self.g_force_lateral);
        w.scalar("GForceLongitudinal", self.g_force_longitudinal);
        w.scalar("GForceVertical", self.g_force_vertical);
        w.scalar("Yaw", self.yaw);
        w.scalar("Pitch", self.pitch);
        w.scalar("Roll", self.roll);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotionPacket {
    pub header: PacketHeader,
    pub car_motion_data: [CarMotionData; MAX_CARS],
}

impl MotionPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::Motion, data)?;
        let mut r = WireReader::new(PacketKind::Motion, data);
        Ok(Self { header: PacketHeader::read(&mut r)?, car_motion_data: r.array(CarMotionData::read)? })
    }
}

impl Walk for MotionPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.records("CarMotionData", &self.car_motion_data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FrameBuilder;

    #[test]
    fn reads_each_car_slot() {
        let car = 5;
        let base = PacketHeader::SIZE + car * 60;
        let frame = FrameBuilder::new(PacketKind::Motion)
            .put_f32(base, 101.5)
            .put_i16(base + 24, -32767)
            .put_f32(base + 56, 0.25)
            .build();

        let packet = MotionPacket::decode(&frame).unwrap();
        assert_eq!(packet.car_motion_data[car].world_position_x, 101.5);
        assert_eq!(packet.car_motion_data[car].world_forward_dir_x, -32767);
        assert_eq!(packet.car_motion_data[car].roll, 0.25);
        assert_eq!(packet.car_motion_data[0], CarMotionData::default());
    }
}
