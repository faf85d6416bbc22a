//! Bridge configuration
//!
//! A configuration document holds the flat application settings plus two
//! tables: per-kind forwarding switches and the OSC address table. Documents
//! are JSON or YAML, picked by file extension; every section falls back to
//! its defaults when absent.
//!
//! ```yaml
//! udp_addr: 0.0.0.0
//! udp_port: 20777
//! enable_osc: true
//! broadcast_rate_hz: 10
//! packet_forwarding:
//!   Motion: false
//! osc_addresses:
//!   Gear: { address: /car/gear, type: int, enabled: true, allowZero: true }
//! ```
//!
//! At runtime the active configuration is published through a
//! `tokio::sync::watch` channel of `Arc<BridgeConfig>`; the dispatcher borrows
//! the latest snapshot for each frame.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use crate::{BridgeError, BroadcastRate, PacketKind, Result};

/// Flat application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the telemetry listener binds
    pub udp_addr: String,
    pub udp_port: u16,
    /// OSC receiver host name or address
    pub osc_addr: String,
    pub osc_port: u16,
    pub enable_osc: bool,
    pub broadcast_rate_hz: BroadcastRate,
    /// Log raw frames and every emitted field
    pub debug_output: bool,
    /// Address the WebSocket server binds
    pub http_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            udp_addr: "127.0.0.1".to_string(),
            udp_port: 20777,
            osc_addr: "127.0.0.1".to_string(),
            osc_port: 9000,
            enable_osc: false,
            broadcast_rate_hz: BroadcastRate::default(),
            debug_output: false,
            http_addr: "127.0.0.1:1337".to_string(),
        }
    }
}

impl Settings {
    /// Socket address for the telemetry listener.
    pub fn udp_endpoint(&self) -> Result<SocketAddr> {
        endpoint("udp_addr", &self.udp_addr, self.udp_port)
    }

    /// Resolve the OSC receiver. Host names are looked up and the first
    /// address wins.
    pub async fn osc_target(&self) -> Result<SocketAddr> {
        let invalid = || BridgeError::InvalidAddress { field: "osc_addr", value: self.osc_addr.clone() };
        let mut addrs = tokio::net::lookup_host((self.osc_addr.as_str(), self.osc_port))
            .await
            .map_err(|_| invalid())?;
        addrs.next().ok_or_else(invalid)
    }

    /// Socket address for the WebSocket server.
    pub fn http_endpoint(&self) -> Result<SocketAddr> {
        self.http_addr.parse().map_err(|_| BridgeError::InvalidAddress {
            field: "http_addr",
            value: self.http_addr.clone(),
        })
    }
}

fn endpoint(field: &'static str, addr: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = addr
        .parse()
        .map_err(|_| BridgeError::InvalidAddress { field, value: addr.to_string() })?;
    Ok(SocketAddr::new(ip, port))
}

/// Per-kind forwarding switches, keyed by kind name.
///
/// Kinds missing from the table are forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PacketForwarding(pub BTreeMap<PacketKind, bool>);

impl PacketForwarding {
    pub fn is_enabled(&self, kind: PacketKind) -> bool {
        self.0.get(&kind).copied().unwrap_or(true)
    }

    pub fn set(&mut self, kind: PacketKind, enabled: bool) {
        self.0.insert(kind, enabled);
    }
}

/// Declared argument type of an OSC address.
///
/// Values are coerced from their wire width, so this is informational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscValueType {
    #[default]
    Float,
    Int,
    String,
}

/// One OSC address table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OscAddressEntry {
    pub address: String,
    #[serde(rename = "type", default)]
    pub value_type: OscValueType,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Forward numeric zeros for this address
    #[serde(rename = "allowZero", default)]
    pub allow_zero: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl OscAddressEntry {
    pub fn new(address: impl Into<String>, value_type: OscValueType) -> Self {
        Self { address: address.into(), value_type, enabled: true, allow_zero: false }
    }

    pub fn allow_zero(mut self, allow: bool) -> Self {
        self.allow_zero = allow;
        self
    }
}

/// Mnemonic field key to OSC address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OscAddressTable(pub HashMap<String, OscAddressEntry>);

impl OscAddressTable {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Enabled entry for `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<&OscAddressEntry> {
        self.0.get(key).filter(|entry| entry.enabled)
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: OscAddressEntry) {
        self.0.insert(key.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for OscAddressTable {
    fn default() -> Self {
        let table = DEFAULT_OSC_ADDRESSES
            .iter()
            .map(|&(key, address, value_type)| {
                (key.to_string(), OscAddressEntry::new(address, value_type))
            })
            .collect();
        Self(table)
    }
}

/// Complete configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    #[serde(flatten)]
    pub settings: Settings,
    pub packet_forwarding: PacketForwarding,
    pub osc_addresses: OscAddressTable,
}

impl BridgeConfig {
    /// Load a JSON (`.json`) or YAML (`.yaml`, `.yml`) document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::config(path, format!("read failed: {e}")))?;

        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&text),
            Some("yaml") | Some("yml") => Self::from_yaml(&text),
            _ => Err(BridgeError::config(path, "expected a .json, .yaml or .yml file")),
        };
        parsed.map_err(|e| match e {
            BridgeError::Config { details, .. } => BridgeError::config(path, details),
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| BridgeError::config("<json>", e.to_string()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml_ng::from_str(text).map_err(|e| BridgeError::config("<yaml>", e.to_string()))
    }

    /// Write the snapshot back out, format picked by extension like [`Self::from_path`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| BridgeError::config(path, e.to_string()))?,
            Some("yaml") | Some("yml") => serde_yaml_ng::to_string(self)
                .map_err(|e| BridgeError::config(path, e.to_string()))?,
            _ => return Err(BridgeError::config(path, "expected a .json, .yaml or .yml file")),
        };
        std::fs::write(path, text).map_err(|e| BridgeError::config(path, format!("write failed: {e}")))
    }
}

/// Car telemetry, motion, motion-ex, lap, status and damage mnemonics.
#[rustfmt::skip]
const DEFAULT_OSC_ADDRESSES: &[(&str, &str, OscValueType)] = &[
    ("Speed", "/car/speed", OscValueType::Float),
    ("Throttle", "/car/throttle", OscValueType::Float),
    ("Steer", "/car/steer", OscValueType::Float),
    ("Brake", "/car/brake", OscValueType::Float),
    ("Clutch", "/car/clutch", OscValueType::Int),
    ("Gear", "/car/gear", OscValueType::Int),
    ("EngineRPM", "/car/engine_rpm", OscValueType::Int),
    ("DRS", "/car/drs", OscValueType::Int),
    ("RevLightsPercent", "/car/rev_lights_percent", OscValueType::Int),
    ("RevLightsBitValue", "/car/rev_lights_bits", OscValueType::Int),
    ("BrakesTemperatureRL", "/car/brakes_temp/rl", OscValueType::Int),
    ("BrakesTemperatureRR", "/car/brakes_temp/rr", OscValueType::Int),
    ("BrakesTemperatureFL", "/car/brakes_temp/fl", OscValueType::Int),
    ("BrakesTemperatureFR", "/car/brakes_temp/fr", OscValueType::Int),
    ("TyresSurfaceTemperatureRL", "/car/tyres_surface_temp/rl", OscValueType::Int),
    ("TyresSurfaceTemperatureRR", "/car/tyres_surface_temp/rr", OscValueType::Int),
    ("TyresSurfaceTemperatureFL", "/car/tyres_surface_temp/fl", OscValueType::Int),
    ("TyresSurfaceTemperatureFR", "/car/tyres_surface_temp/fr", OscValueType::Int),
    ("TyresInnerTemperatureRL", "/car/tyres_inner_temp/rl", OscValueType::Int),
    ("TyresInnerTemperatureRR", "/car/tyres_inner_temp/rr", OscValueType::Int),
    ("TyresInnerTemperatureFL", "/car/tyres_inner_temp/fl", OscValueType::Int),
    ("TyresInnerTemperatureFR", "/car/tyres_inner_temp/fr", OscValueType::Int),
    ("EngineTemperature", "/car/engine_temp", OscValueType::Int),
    ("TyresPressureRL", "/car/tyres_pressure/rl", OscValueType::Float),
    ("TyresPressureRR", "/car/tyres_pressure/rr", OscValueType::Float),
    ("TyresPressureFL", "/car/tyres_pressure/fl", OscValueType::Float),
    ("TyresPressureFR", "/car/tyres_pressure/fr", OscValueType::Float),
    ("SurfaceTypeRL", "/car/surface_type/rl", OscValueType::Int),
    ("SurfaceTypeRR", "/car/surface_type/rr", OscValueType::Int),
    ("SurfaceTypeFL", "/car/surface_type/fl", OscValueType::Int),
    ("SurfaceTypeFR", "/car/surface_type/fr", OscValueType::Int),
    ("WorldPositionX", "/motion/world_pos/x", OscValueType::Float),
    ("WorldPositionY", "/motion/world_pos/y", OscValueType::Float),
    ("WorldPositionZ", "/motion/world_pos/z", OscValueType::Float),
    ("WorldVelocityX", "/motion/world_vel/x", OscValueType::Float),
    ("WorldVelocityY", "/motion/world_vel/y", OscValueType::Float),
    ("WorldVelocityZ", "/motion/world_vel/z", OscValueType::Float),
    ("Yaw", "/motion/yaw", OscValueType::Float),
    ("Pitch", "/motion/pitch", OscValueType::Float),
    ("Roll", "/motion/roll", OscValueType::Float),
    ("GForceLateral", "/motion/gforce/lateral", OscValueType::Float),
    ("GForceLongitudinal", "/motion/gforce/longitudinal", OscValueType::Float),
    ("GForceVertical", "/motion/gforce/vertical", OscValueType::Float),
    ("WheelSpeedRL", "/motion_ex/wheel_speed/rl", OscValueType::Float),
    ("WheelSpeedRR", "/motion_ex/wheel_speed/rr", OscValueType::Float),
    ("WheelSpeedFL", "/motion_ex/wheel_speed/fl", OscValueType::Float),
    ("WheelSpeedFR", "/motion_ex/wheel_speed/fr", OscValueType::Float),
    ("WheelSlipRatioRL", "/motion_ex/wheel_slip_ratio/rl", OscValueType::Float),
    ("WheelSlipRatioRR", "/motion_ex/wheel_slip_ratio/rr", OscValueType::Float),
    ("WheelSlipRatioFL", "/motion_ex/wheel_slip_ratio/fl", OscValueType::Float),
    ("WheelSlipRatioFR", "/motion_ex/wheel_slip_ratio/fr", OscValueType::Float),
    ("WheelSlipAngleRL", "/motion_ex/wheel_slip_angle/rl", OscValueType::Float),
    ("WheelSlipAngleRR", "/motion_ex/wheel_slip_angle/rr", OscValueType::Float),
    ("WheelSlipAngleFL", "/motion_ex/wheel_slip_angle/fl", OscValueType::Float),
    ("WheelSlipAngleFR", "/motion_ex/wheel_slip_angle/fr", OscValueType::Float),
    ("WheelLatForceRL", "/motion_ex/wheel_lat_force/rl", OscValueType::Float),
    ("WheelLatForceRR", "/motion_ex/wheel_lat_force/rr", OscValueType::Float),
    ("WheelLatForceFL", "/motion_ex/wheel_lat_force/fl", OscValueType::Float),
    ("WheelLatForceFR", "/motion_ex/wheel_lat_force/fr", OscValueType::Float),
    ("WheelLongForceRL", "/motion_ex/wheel_long_force/rl", OscValueType::Float),
    ("WheelLongForceRR", "/motion_ex/wheel_long_force/rr", OscValueType::Float),
    ("WheelLongForceFL", "/motion_ex/wheel_long_force/fl", OscValueType::Float),
    ("WheelLongForceFR", "/motion_ex/wheel_long_force/fr", OscValueType::Float),
    ("WheelVertForceRL", "/motion_ex/wheel_vert_force/rl", OscValueType::Float),
    ("WheelVertForceRR", "/motion_ex/wheel_vert_force/rr", OscValueType::Float),
    ("WheelVertForceFL", "/motion_ex/wheel_vert_force/fl", OscValueType::Float),
    ("WheelVertForceFR", "/motion_ex/wheel_vert_force/fr", OscValueType::Float),
    ("WheelCamberRL", "/motion_ex/wheel_camber/rl", OscValueType::Float),
    ("WheelCamberRR", "/motion_ex/wheel_camber/rr", OscValueType::Float),
    ("WheelCamberFL", "/motion_ex/wheel_camber/fl", OscValueType::Float),
    ("WheelCamberFR", "/motion_ex/wheel_camber/fr", OscValueType::Float),
    ("WheelCamberGainRL", "/motion_ex/wheel_camber_gain/rl", OscValueType::Float),
    ("WheelCamberGainRR", "/motion_ex/wheel_camber_gain/rr", OscValueType::Float),
    ("WheelCamberGainFL", "/motion_ex/wheel_camber_gain/fl", OscValueType::Float),
    ("WheelCamberGainFR", "/motion_ex/wheel_camber_gain/fr", OscValueType::Float),
    ("LastLapTimeInMS", "/lap/last_lap_time_ms", OscValueType::Int),
    ("CurrentLapTimeInMS", "/lap/current_lap_time_ms", OscValueType::Int),
    ("LapDistance", "/lap/lap_distance", OscValueType::Float),
    ("TotalDistance", "/lap/total_distance", OscValueType::Float),
    ("CarPosition", "/lap/car_position", OscValueType::Int),
    ("CurrentLapNum", "/lap/current_lap_num", OscValueType::Int),
    ("PitStatus", "/lap/pit_status", OscValueType::Int),
    ("NumPitStops", "/lap/num_pit_stops", OscValueType::Int),
    ("Sector", "/lap/sector", OscValueType::Int),
    ("CurrentLapInvalid", "/lap/current_lap_invalid", OscValueType::Int),
    ("Penalties", "/lap/penalties", OscValueType::Int),
    ("TotalWarnings", "/lap/total_warnings", OscValueType::Int),
    ("CornerCuttingWarnings", "/lap/corner_cutting_warnings", OscValueType::Int),
    ("GridPosition", "/lap/grid_position", OscValueType::Int),
    ("TractionControl", "/status/traction_control", OscValueType::Int),
    ("AntiLockBrakes", "/status/anti_lock_brakes", OscValueType::Int),
    ("FuelMix", "/status/fuel_mix", OscValueType::Int),
    ("FrontBrakeBias", "/status/front_brake_bias", OscValueType::Int),
    ("PitLimiterStatus", "/status/pit_limiter", OscValueType::Int),
    ("FuelInTank", "/status/fuel_in_tank", OscValueType::Float),
    ("FuelCapacity", "/status/fuel_capacity", OscValueType::Float),
    ("FuelRemainingLaps", "/status/fuel_remaining_laps", OscValueType::Float),
    ("MaxRPM", "/status/max_rpm", OscValueType::Int),
    ("IdleRPM", "/status/idle_rpm", OscValueType::Int),
    ("MaxGears", "/status/max_gears", OscValueType::Int),
    ("DRSAllowed", "/status/drs_allowed", OscValueType::Int),
    ("DRSActivationDistance", "/status/drs_activation_distance", OscValueType::Int),
    ("ActualTyreCompound", "/status/actual_tyre_compound", OscValueType::Int),
    ("VisualTyreCompound", "/status/visual_tyre_compound", OscValueType::Int),
    ("TyresAgeLaps", "/status/tyres_age_laps", OscValueType::Int),
    ("VehicleFIAFlags", "/status/vehicle_fia_flags", OscValueType::Int),
    ("EnginePowerICE", "/status/engine_power_ice", OscValueType::Float),
    ("EnginePowerMGUK", "/status/engine_power_mguk", OscValueType::Float),
    ("ERSStoreEnergy", "/status/ers_store_energy", OscValueType::Float),
    ("ERSDeployMode", "/status/ers_deploy_mode", OscValueType::Int),
    ("ERSHarvestedThisLapMGUK", "/status/ers_harvested_mguk", OscValueType::Float),
    ("ERSHarvestedThisLapMGUH", "/status/ers_harvested_mguh", OscValueType::Float),
    ("ERSDeployedThisLap", "/status/ers_deployed", OscValueType::Float),
    ("NetworkPaused", "/status/network_paused", OscValueType::Int),
    ("TyresWearRL", "/damage/tyres_wear/rl", OscValueType::Float),
    ("TyresWearRR", "/damage/tyres_wear/rr", OscValueType::Float),
    ("TyresWearFL", "/damage/tyres_wear/fl", OscValueType::Float),
    ("TyresWearFR", "/damage/tyres_wear/fr", OscValueType::Float),
    ("TyresDamageRL", "/damage/tyres_damage/rl", OscValueType::Int),
    ("TyresDamageRR", "/damage/tyres_damage/rr", OscValueType::Int),
    ("TyresDamageFL", "/damage/tyres_damage/fl", OscValueType::Int),
    ("TyresDamageFR", "/damage/tyres_damage/fr", OscValueType::Int),
    ("BrakesDamageRL", "/damage/brakes_damage/rl", OscValueType::Int),
    ("BrakesDamageRR", "/damage/brakes_damage/rr", OscValueType::Int),
    ("BrakesDamageFL", "/damage/brakes_damage/fl", OscValueType::Int),
    ("BrakesDamageFR", "/damage/brakes_damage/fr", OscValueType::Int),
    ("FrontLeftWingDamage", "/damage/front_left_wing", OscValueType::Int),
    ("FrontRightWingDamage", "/damage/front_right_wing", OscValueType::Int),
    ("RearWingDamage", "/damage/rear_wing", OscValueType::Int),
    ("FloorDamage", "/damage/floor", OscValueType::Int),
    ("DiffuserDamage", "/damage/diffuser", OscValueType::Int),
    ("SidepodDamage", "/damage/sidepod", OscValueType::Int),
    ("DRSFault", "/damage/drs_fault", OscValueType::Int),
    ("ERSFault", "/damage/ers_fault", OscValueType::Int),
    ("GearBoxDamage", "/damage/gearbox", OscValueType::Int),
    ("EngineDamage", "/damage/engine", OscValueType::Int),
    ("EngineMGUHWear", "/damage/engine_mguh_wear", OscValueType::Int),
    ("EngineESWear", "/damage/engine_es_wear", OscValueType::Int),
    ("EngineCEWear", "/damage/engine_ce_wear", OscValueType::Int),
    ("EngineICEWear", "/damage/engine_ice_wear", OscValueType::Int),
    ("EngineMGUKWear", "/damage/engine_mguk_wear", OscValueType::Int),
    ("EngineTCWear", "/damage/engine_tc_wear", OscValueType::Int),
    ("EngineBlown", "/damage/engine_blown", OscValueType::Int),
    ("EngineSeized", "/damage/engine_seized", OscValueType::Int),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn defaults_match_the_shipped_application() {
        let config = BridgeConfig::default();
        let settings = &config.settings;
        assert_eq!(settings.udp_endpoint().unwrap(), "127.0.0.1:20777".parse().unwrap());
        assert_eq!(settings.osc_target().await.unwrap(), "127.0.0.1:9000".parse().unwrap());
        assert!(!settings.enable_osc);
        assert_eq!(settings.broadcast_rate_hz, BroadcastRate(2));
        assert!(!settings.debug_output);

        for kind in PacketKind::ALL {
            assert!(config.packet_forwarding.is_enabled(kind));
        }

        let gear = config.osc_addresses.lookup("Gear").unwrap();
        assert_eq!(gear.address, "/car/gear");
        assert_eq!(gear.value_type, OscValueType::Int);
        assert!(!gear.allow_zero);
        assert_eq!(config.osc_addresses.lookup("TyresWearRL").unwrap().address, "/damage/tyres_wear/rl");
        assert_eq!(config.osc_addresses.len(), DEFAULT_OSC_ADDRESSES.len());
    }

    #[test]
    fn legacy_flat_json_document_loads() {
        let json = r#"{
            "udp_addr": "0.0.0.0",
            "udp_port": 20778,
            "osc_addr": "192.168.1.20",
            "osc_port": 9001,
            "enable_osc": true,
            "broadcast_rate_hz": 10,
            "debug_output": true
        }"#;
        let config = BridgeConfig::from_json(json).unwrap();
        assert_eq!(config.settings.udp_endpoint().unwrap(), "0.0.0.0:20778".parse().unwrap());
        assert!(config.settings.enable_osc);
        assert_eq!(config.settings.broadcast_rate_hz, BroadcastRate(10));
        assert_eq!(config.settings.http_addr, "127.0.0.1:1337");
        assert_eq!(config.osc_addresses, OscAddressTable::default());
    }

    #[test]
    fn yaml_tables_override_defaults() {
        let yaml = r#"
broadcast_rate_hz: 0
packet_forwarding:
  Motion: false
  CarTelemetry: true
osc_addresses:
  Gear: { address: /car/gear, type: int, allowZero: true }
  Speed: { address: /car/speed, enabled: false }
"#;
        let config = BridgeConfig::from_yaml(yaml).unwrap();
        assert!(!config.packet_forwarding.is_enabled(PacketKind::Motion));
        assert!(config.packet_forwarding.is_enabled(PacketKind::CarTelemetry));
        assert!(config.packet_forwarding.is_enabled(PacketKind::Event));

        let gear = config.osc_addresses.lookup("Gear").unwrap();
        assert!(gear.allow_zero && gear.enabled);
        assert!(config.osc_addresses.lookup("Speed").is_none());
        assert!(config.osc_addresses.lookup("Throttle").is_none());
        assert_eq!(config.osc_addresses.len(), 2);
    }

    #[test]
    fn from_path_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        writeln!(file, r#"{{"udp_port": 30000}}"#).unwrap();
        assert_eq!(BridgeConfig::from_path(&json_path).unwrap().settings.udp_port, 30000);

        let yaml_path = dir.path().join("config.yml");
        std::fs::write(&yaml_path, "osc_port: 9100\n").unwrap();
        assert_eq!(BridgeConfig::from_path(&yaml_path).unwrap().settings.osc_port, 9100);

        let toml_path = dir.path().join("config.toml");
        std::fs::write(&toml_path, "").unwrap();
        match BridgeConfig::from_path(&toml_path) {
            Err(BridgeError::Config { path, .. }) => assert_eq!(path, toml_path),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        match BridgeConfig::from_path(&path) {
            Err(BridgeError::Config { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn saved_documents_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BridgeConfig::default();
        config.settings.enable_osc = true;
        config.packet_forwarding.set(PacketKind::LapPositions, false);
        config.osc_addresses.insert("Gear", OscAddressEntry::new("/g", OscValueType::Int).allow_zero(true));

        for name in ["out.json", "out.yaml"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(BridgeConfig::from_path(&path).unwrap(), config);
        }
    }

    #[tokio::test]
    async fn osc_host_names_resolve() {
        let settings = Settings { osc_addr: "localhost".into(), osc_port: 9001, ..Settings::default() };
        let target = settings.osc_target().await.unwrap();
        assert!(target.ip().is_loopback());
        assert_eq!(target.port(), 9001);
    }

    #[test]
    fn listener_address_must_be_an_ip_literal() {
        let settings = Settings { udp_addr: "localhost".into(), ..Settings::default() };
        assert!(matches!(
            settings.udp_endpoint(),
            Err(BridgeError::InvalidAddress { field: "udp_addr", .. })
        ));
    }
}
