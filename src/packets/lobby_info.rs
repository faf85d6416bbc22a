//! Lobby info packet: players waiting in a multiplayer lobby

use super::{MAX_CARS, NAME_LEN, PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

/// Per-player lobby record (42 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LobbyInfoData {
    pub ai_controlled: u8,
    pub team_id: u8,
    pub nationality: u8,
    pub platform: u8,
    pub name: [u8; NAME_LEN],
    pub car_number: u8,
    pub your_telemetry: u8,
    pub show_online_names: u8,
    pub tech_level: u16,
    /// 0 not ready, 1 ready, 2 spectating
    pub ready_status: u8,
}

impl LobbyInfoData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            ai_controlled: r.u8()?,
            team_id: r.u8()?,
            nationality: r.u8()?,
            platform: r.u8()?,
            name: r.bytes()?,
            car_number: r.u8()?,
            your_telemetry: r.u8()?,
            show_online_names: r.u8()?,
            tech_level: r.u16()?,
            ready_status: r.u8()?,
        })
    }
}

impl Walk for LobbyInfoData {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("AIControlled", self.ai_controlled);
        w.scalar("TeamId", self.team_id);
        w.scalar("Nationality", self.nationality);
        w.scalar("Platform", self.platform);
        w.text("Name", &self.name);
        w.scalar("CarNumber", self.car_number);
        w.scalar("YourTelemetry", self.your_telemetry);
        w.scalar("ShowOnlineNames", self.show_online_names);
        w.scalar("TechLevel", self.tech_level);
        w.scalar("ReadyStatus", self.ready_status);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LobbyInfoPacket {
    pub header: PacketHeader,
    pub num_players: u8,
    pub lobby_players: [LobbyInfoData; MAX_CARS],
}

impl LobbyInfoPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::LobbyInfo, data)?;
        let mut r = WireReader::new(PacketKind::LobbyInfo, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            num_players: r.u8()?,
            lobby_players: r.array(LobbyInfoData::read)?,
        })
    }
}

impl Walk for LobbyInfoPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.scalar("NumPlayers", self.num_players);
        w.records("LobbyPlayers", &self.lobby_players);
    }
}
