//! Participants packet: driver identities for every car slot

use super::{MAX_CARS, NAME_LEN, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveryColour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl LiveryColour {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self { red: r.u8()?, green: r.u8()?, blue: r.u8()? })
    }
}

impl Walk for LiveryColour {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("Red", self.red);
        w.scalar("Green", self.green);
        w.scalar("Blue", self.blue);
    }
}

/// Per-car participant record (57 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParticipantData {
    pub ai_controlled: u8,
    pub driver_id: u8,
    pub network_id: u8,
    pub team_id: u8,
    pub my_team: u8,
    pub race_number: u8,
    pub nationality: u8,
    /// UTF-8, NUL terminated
    pub name: [u8; NAME_LEN],
    pub your_telemetry: u8,
    pub show_online_names: u8,
    pub tech_level: u16,
    pub platform: u8,
    pub num_colours: u8,
    pub livery_colours: [LiveryColour; 4],
}

impl ParticipantData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            ai_controlled: r.u8()?,
            driver_id: r.u8()?,
            network_id: r.u8()?,
            team_id: r.u8()?,
            my_team: r.u8()?,
            race_number: r.u8()?,
            nationality: r.u8()?,
            name: r.bytes()?,
            your_telemetry: r.u8()?,
            show_online_names: r.u8()?,
            tech_level: r.u16()?,
            platform: r.u8()?,
            num_colours: r.u8()?,
            livery_colours: r.array(LiveryColour::read)?,
        })
    }
}

impl Walk for ParticipantData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("AIControlled", self.ai_controlled);
        w.scalar("DriverId", self.driver_id);
        w.scalar("NetworkId", self.network_id);
        w.scalar("TeamId", self.team_id);
        w.scalar("MyTeam", self.my_team);
        w.scalar("RaceNumber", self.race_number);
        w.scalar("Nationality", self.nationality);
        w.text("Name", &self.name);
        w.scalar("YourTelemetry", self.your_telemetry);
        w.scalar("ShowOnlineNames", self.show_online_names);
        w.scalar("TechLevel", self.tech_level);
        w.scalar("Platform", self.platform);
        w.scalar("NumColours", self.num_colours);
        w.records("LiveryColours", &self.livery_colours);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantsPacket {
    pub header: PacketHeader,
    pub num_active_cars: u8,
    pub participants: [ParticipantData; MAX_CARS],
}

impl ParticipantsPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::Participants, data)?;
        let mut r = WireReader::new(PacketKind::Participants, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            num_active_cars: r.u8()?,
            participants: r.array(ParticipantData::read)?,
        })
    }
}

impl Walk for ParticipantsPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.scalar("NumActiveCars", self.num_active_cars);
        w.records("Participants", &self.participants);
    }
}
