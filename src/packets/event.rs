//! Event packet: four-letter event code plus a detail union

use super::{PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

/// Size of the event detail union.
pub const EVENT_DETAILS_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct EventPacket {
    pub header: PacketHeader,
    /// e.g. `SSTA`, `FTLP`, `BUTN`
    pub event_string_code: [u8; 4],
    /// Raw union; layout depends on the event code
    pub event_details: [u8; EVENT_DETAILS_SIZE],
}

impl EventPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::Event, data)?;
        let mut r = WireReader::new(PacketKind::Event, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            event_string_code: r.bytes()?,
            event_details: r.bytes()?,
        })
    }

    /// Event code as text.
    pub fn code(&self) -> String {
        String::from_utf8_lossy(&self.event_string_code).into_owned()
    }
}

impl Walk for EventPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.text("EventStringCode", &self.event_string_code);
        w.scalars("EventDetails", &self.event_details);
    }
}
