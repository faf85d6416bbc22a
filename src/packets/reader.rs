//! Little-endian cursor over a received frame
//!
//! Every read is bounds checked; decoders still validate the whole frame
//! length up front so a short frame never yields a partially filled record.

use crate::{BridgeError, PacketKind, Result};

/// Sequential little-endian reader over one frame.
pub struct WireReader<'a> {
    kind: PacketKind,
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Start reading `data` at offset zero.
    pub fn new(kind: PacketKind, data: &'a [u8]) -> Self {
        Self { kind, data, pos: 0 }
    }

    /// Start reading `data` at `offset`.
    pub fn at(kind: PacketKind, data: &'a [u8], offset: usize) -> Self {
        Self { kind, data, pos: offset }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.pos + N;
        let bytes = self.data.get(self.pos..end).ok_or_else(|| {
            BridgeError::frame_too_short(self.kind.name(), end, self.data.len())
        })?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.pos = end;
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take::<1>()?[0])
    }

    pub fn i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.take()?))
    }

    pub fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    pub fn i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.take()?))
    }

    pub fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    pub fn u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take()?))
    }

    pub fn f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    pub fn f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.take()?))
    }

    /// Raw fixed-length byte run (names, codes, unions).
    pub fn bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.take()
    }

    /// Fixed-length array, each element produced by `read`.
    pub fn array<T, const N: usize>(
        &mut self,
        mut read: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<[T; N]>
    where
        T: Default + Copy,
    {
        let mut out = [T::default(); N];
        for slot in out.iter_mut() {
            *slot = read(self)?;
        }
        Ok(out)
    }
}

/// Fail with [`BridgeError::FrameTooShort`] unless `data` holds a full `kind` frame.
pub fn require_len(kind: PacketKind, data: &[u8]) -> Result<()> {
    let expected = kind.expected_len();
    if data.len() < expected {
        return Err(BridgeError::frame_too_short(kind.name(), expected, data.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_scalars_in_sequence() {
        let mut data = Vec::new();
        data.extend_from_slice(&0x1234u16.to_le_bytes());
        data.push(0xFF);
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.extend_from_slice(&(-2i16).to_le_bytes());

        let mut r = WireReader::new(PacketKind::Event, &data);
        assert_eq!(r.u16().unwrap(), 0x1234);
        assert_eq!(r.i8().unwrap(), -1);
        assert_eq!(r.f32().unwrap(), 1.5);
        assert_eq!(r.i16().unwrap(), -2);
        assert_eq!(r.position(), 9);
    }

    #[test]
    fn reading_past_end_reports_short_frame() {
        let data = [1u8, 2, 3];
        let mut r = WireReader::at(PacketKind::Session, &data, 1);
        match r.u32() {
            Err(BridgeError::FrameTooShort { kind, expected, actual }) => {
                assert_eq!(kind, "Session");
                assert_eq!(expected, 5);
                assert_eq!(actual, 3);
            }
            other => panic!("Expected FrameTooShort, got {other:?}"),
        }
    }

    #[test]
    fn arrays_fill_in_order() {
        let data = [1u8, 2, 3, 4];
        let mut r = WireReader::new(PacketKind::Event, &data);
        let arr: [u8; 4] = r.array(|r| r.u8()).unwrap();
        assert_eq!(arr, [1, 2, 3, 4]);
    }

    #[test]
    fn require_len_rejects_one_byte_short() {
        let data = vec![0u8; 44];
        assert!(require_len(PacketKind::Event, &data).is_err());
        assert!(require_len(PacketKind::Event, &[0u8; 45]).is_ok());
    }
}
