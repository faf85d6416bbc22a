//! Extended motion packet: player car only, wheel arrays in RL, RR, FL, FR order

use super::{PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct MotionExPacket {
    pub header: PacketHeader,
    pub suspension_position: [f32; 4],
    pub suspension_velocity: [f32; 4],
    pub suspension_acceleration: [f32; 4],
    pub wheel_speed: [f32; 4],
    pub wheel_slip_ratio: [f32; 4],
    pub wheel_slip_angle: [f32; 4],
    pub wheel_lat_force: [f32; 4],
    pub wheel_long_force: [f32; 4],
    pub height_of_cog_above_ground: f32,
    pub local_velocity_x: f32,
    pub local_velocity_y: f32,
    pub local_velocity_z: f32,
    pub angular_velocity_x: f32,
    pub angular_velocity_y: f32,
    pub angular_velocity_z: f32,
    pub angular_acceleration_x: f32,
    pub angular_acceleration_y: f32,
    pub angular_acceleration_z: f32,
    /// Radians
    pub front_wheels_angle: f32,
    pub wheel_vert_force: [f32; 4],
    pub front_aero_height: f32,
    pub rear_aero_height: f32,
    pub front_roll_angle: f32,
    pub rear_roll_angle: f32,
    pub chassis_yaw: f32,
    pub chassis_pitch: f32,
    pub wheel_camber: [f32; 4],
    pub wheel_camber_gain: [f32; 4],
}

impl MotionExPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::MotionEx, data)?;
        let mut r = WireReader::new(PacketKind::MotionEx, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            suspension_position: r.array(|r| r.f32())?,
            suspension_velocity: r.array(|r| r.f32())?,
            suspension_acceleration: r.array(|r| r.f32())?,
            wheel_speed: r.array(|r| r.f32())?,
            wheel_slip_ratio: r.array(|r| r.f32())?,
            wheel_slip_angle: r.array(|r| r.f32())?,
            wheel_lat_force: r.array(|r| r.f32())?,
            wheel_long_force: r.array(|r| r.f32())?,
            height_of_cog_above_ground: r.f32()?,
            local_velocity_x: r.f32()?,
            local_velocity_y: r.f32()?,
            local_velocity_z: r.f32()?,
            angular_velocity_x: r.f32()?,
            angular_velocity_y: r.f32()?,
            angular_velocity_z: r.f32()?,
            angular_acceleration_x: r.f32()?,
            angular_acceleration_y: r.f32()?,
            angular_acceleration_z: r.f32()?,
            front_wheels_angle: r.f32()?,
            wheel_vert_force: r.array(|r| r.f32())?,
            front_aero_height: r.f32()?,
            rear_aero_height: r.f32()?,
            front_roll_angle: r.f32()?,
            rear_roll_angle: r.f32()?,
            chassis_yaw: r.f32()?,
            chassis_pitch: r.f32()?,
            wheel_camber: r.array(|r| r.f32())?,
            wheel_camber_gain: r.array(|r| r.f32())?,
        })
    }
}

impl Walk for MotionExPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.scalars("SuspensionPosition", &self.suspension_position);
        w.scalars("SuspensionVelocity", &self.suspension_velocity);
        w.scalars("SuspensionAcceleration", &self.suspension_acceleration);
        w.scalars("WheelSpeed", &self.wheel_speed);
        w.scalars("WheelSlipRatio", &self.wheel_slip_ratio);
        w.scalars("WheelSlipAngle", &self.wheel_slip_angle);
        w.scalars("WheelLatForce", &self.wheel_lat_force);
        w.scalars("WheelLongForce", &self.wheel_long_force);
        w.scalar("HeightOfCOGAboveGround", self.height_of_cog_above_ground);
        w.scalar("LocalVelocityX", self.local_velocity_x);
        w.scalar("LocalVelocityY", self.local_velocity_y);
        w.scalar("LocalVelocityZ", self.local_velocity_z);
        w.scalar("AngularVelocityX", self.angular_velocity_x);
        w.scalar("AngularVelocityY", self.angular_velocity_y);
        w.scalar("AngularVelocityZ", self.angular_velocity_z);
        w.scalar("AngularAccelerationX", self.angular_acceleration_x);
        w.scalar("AngularAccelerationY", self.angular_acceleration_y);
        w.scalar("AngularAccelerationZ", self.angular_acceleration_z);
        w.scalar("FrontWheelsAngle", self.front_wheels_angle);
        w.scalars("WheelVertForce", &self.wheel_vert_force);
        w.scalar("FrontAeroHeight", self.front_aero_height);
        w.scalar("RearAeroHeight", self.rear_aero_height);
        w.scalar("FrontRollAngle", self.front_roll_angle);
        w.scalar("RearRollAngle", self.rear_roll_angle);
        w.scalar("ChassisYaw", self.chassis_yaw);
        w.scalar("ChassisPitch", self.chassis_pitch);
        w.scalars("WheelCamber", &self.wheel_camber);
        w.scalars("WheelCamberGain", &self.wheel_camber_gain);
    }
}
