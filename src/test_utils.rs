//! Test utilities for building synthetic telemetry frames
//!
//! Frames start zero-filled at the kind's required length with a valid header
//! (format 2025, game year 25, packet id set), and individual fields are then
//! patched at absolute byte offsets.

#![cfg(any(test, feature = "benchmark"))]

use crate::PacketKind;
use crate::packets::PacketHeader;

/// Builder for a raw frame of one packet kind.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    data: Vec<u8>,
}

impl FrameBuilder {
    /// Zero-filled frame of exactly `kind.expected_len()` bytes.
    pub fn new(kind: PacketKind) -> Self {
        Self::with_len(kind, kind.expected_len())
    }

    /// Zero-filled frame of `len` bytes carrying `kind`'s header.
    ///
    /// Header fields that do not fit in `len` are skipped.
    pub fn with_len(kind: PacketKind, len: usize) -> Self {
        let mut data = vec![0u8; len.max(PacketHeader::SIZE)];
        data[0..2].copy_from_slice(&2025u16.to_le_bytes());
        data[2] = 25;
        data[3] = 1;
        data[5] = 1;
        data[PacketHeader::PACKET_ID_OFFSET] = kind.id();
        data.truncate(len);
        Self { data }
    }

    pub fn player_car_index(self, index: u8) -> Self {
        self.put_u8(PacketHeader::PLAYER_CAR_INDEX_OFFSET, index)
    }

    pub fn put_u8(mut self, offset: usize, value: u8) -> Self {
        self.data[offset] = value;
        self
    }

    pub fn put_i8(self, offset: usize, value: i8) -> Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_u16(self, offset: usize, value: u16) -> Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_i16(self, offset: usize, value: i16) -> Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_u32(self, offset: usize, value: u32) -> Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_u64(self, offset: usize, value: u64) -> Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_f32(self, offset: usize, value: f32) -> Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_f64(self, offset: usize, value: f64) -> Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}
