//! Session packet: track, weather, rules and assists

use super::{PacketHeader, reader::WireReader, reader::require_len};
use crate::walker::{Walk, Walker};
use crate::{PacketKind, Result};

pub const MAX_MARSHAL_ZONES: usize = 21;
pub const MAX_WEATHER_FORECAST_SAMPLES: usize = 64;
pub const MAX_SESSIONS_IN_WEEKEND: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarshalZone {
    /// Fraction (0..1) of the way through the lap the zone starts
    pub zone_start: f32,
    /// -1 invalid, 0 none, 1 green, 2 blue, 3 yellow
    pub zone_flag: i8,
}

impl MarshalZone {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self { zone_start: r.f32()?, zone_flag: r.i8()? })
    }
}

impl Walk for MarshalZone {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("ZoneStart", self.zone_start);
        w.scalar("ZoneFlag", self.zone_flag);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeatherForecastSample {
    pub session_type: u8,
    pub time_offset: u8,
    pub weather: u8,
    pub track_temperature: i8,
    pub track_temperature_change: i8,
    pub air_temperature: i8,
    pub air_temperature_change: i8,
    pub rain_percentage: u8,
}

impl WeatherForecastSample {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            session_type: r.u8()?,
            time_offset: r.u8()?,
            weather: r.u8()?,
            track_temperature: r.i8()?,
            track_temperature_change: r.i8()?,
            air_temperature: r.i8()?,
            air_temperature_change: r.i8()?,
            rain_percentage: r.u8()?,
        })
    }
}

impl Walk for WeatherForecastSample {
    fn walk(&self, w: &mut Walker<'_>) {
        w.scalar("SessionType", self.session_type);
        w.scalar("TimeOffset", self.time_offset);
        w.scalar("Weather", self.weather);
        w.scalar("TrackTemperature", self.track_temperature);
        w.scalar("TrackTemperatureChange", self.track_temperature_change);
        w.scalar("AirTemperature", self.air_temperature);
        w.scalar("AirTemperatureChange", self.air_temperature_change);
        w.scalar("RainPercentage", self.rain_percentage);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionPacket {
    pub header: PacketHeader,
    pub weather: u8,
    pub track_temperature: i8,
    pub air_temperature: i8,
    pub total_laps: u8,
    pub track_length: u16,
    pub session_type: u8,
    pub track_id: i8,
    pub formula: u8,
    pub session_time_left: u16,
    pub session_duration: u16,
    pub pit_speed_limit: u8,
    pub game_paused: u8,
    pub is_spectating: u8,
    pub spectator_car_index: u8,
    pub sli_pro_native_support: u8,
    pub num_marshal_zones: u8,
    pub marshal_zones: [MarshalZone; MAX_MARSHAL_ZONES],
    pub safety_car_status: u8,
    pub network_game: u8,
    pub num_weather_forecast_samples: u8,
    pub weather_forecast_samples: [WeatherForecastSample; MAX_WEATHER_FORECAST_SAMPLES],
    pub forecast_accuracy: u8,
    pub ai_difficulty: u8,
    pub season_link_identifier: u32,
    pub weekend_link_identifier: u32,
    pub session_link_identifier: u32,
    pub pit_stop_window_ideal_lap: u8,
    pub pit_stop_window_latest_lap: u8,
    pub pit_stop_rejoin_position: u8,
    pub steering_assist: u8,
    pub braking_assist: u8,
    pub gearbox_assist: u8,
    pub pit_assist: u8,
    pub pit_release_assist: u8,
    pub ers_assist: u8,
    pub drs_assist: u8,
    pub dynamic_racing_line: u8,
    pub dynamic_racing_line_type: u8,
    pub game_mode: u8,
    pub rule_set: u8,
    pub time_of_day: u32,
    pub session_length: u8,
    pub speed_units_lead_player: u8,
    pub temperature_units_lead_player: u8,
    pub speed_units_secondary_player: u8,
    pub temperature_units_secondary_player: u8,
    pub num_safety_car_periods: u8,
    pub num_virtual_safety_car_periods: u8,
    pub num_red_flag_periods: u8,
    pub equal_car_performance: u8,
    pub recovery_mode: u8,
    pub flashback_limit: u8,
    pub surface_type: u8,
    pub low_fuel_mode: u8,
    pub race_starts: u8,
    pub tyre_temperature: u8,
    pub pit_lane_tyre_sim: u8,
    pub car_damage: u8,
    pub car_damage_rate: u8,
    pub collisions: u8,
    pub collisions_off_for_first_lap_only: u8,
    pub mp_unsafe_pit_release: u8,
    pub mp_off_for_griefing: u8,
    pub corner_cutting_stringency: u8,
    pub parc_ferme_rules: u8,
    pub pit_stop_experience: u8,
    pub safety_car: u8,
    pub safety_car_experience: u8,
    pub formation_lap: u8,
    pub formation_lap_experience: u8,
    pub red_flags: u8,
    pub affects_licence_level_solo: u8,
    pub affects_licence_level_mp: u8,
    pub num_sessions_in_weekend: u8,
    pub weekend_structure: [u8; MAX_SESSIONS_IN_WEEKEND],
    pub sector2_lap_distance_start: f32,
    pub sector3_lap_distance_start: f32,
}

impl SessionPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        require_len(PacketKind::Session, data)?;
        let mut r = WireReader::new(PacketKind::Session, data);
        Ok(Self {
            header: PacketHeader::read(&mut r)?,
            weather: r.u8()?,
            track_temperature: r.i8()?,
            air_temperature: r.i8()?,
            total_laps: r.u8()?,
            track_length: r.u16()?,
            session_type: r.u8()?,
            track_id: r.i8()?,
            formula: r.u8()?,
            session_time_left: r.u16()?,
            session_duration: r.u16()?,
            pit_speed_limit: r.u8()?,
            game_paused: r.u8()?,
            is_spectating: r.u8()?,
            spectator_car_index: r.u8()?,
            sli_pro_native_support: r.u8()?,
            num_marshal_zones: r.u8()?,
            marshal_zones: r.array(MarshalZone::read)?,
            safety_car_status: r.u8()?,
            network_game: r.u8()?,
            num_weather_forecast_samples: r.u8()?,
            weather_forecast_samples: r.array(WeatherForecastSample::read)?,
            forecast_accuracy: r.u8()?,
            ai_difficulty: r.u8()?,
            season_link_identifier: r.u32()?,
            weekend_link_identifier: r.u32()?,
            session_link_identifier: r.u32()?,
            pit_stop_window_ideal_lap: r.u8()?,
            pit_stop_window_latest_lap: r.u8()?,
            pit_stop_rejoin_position: r.u8()?,
            steering_assist: r.u8()?,
            braking_assist: r.u8()?,
            gearbox_assist: r.u8()?,
            pit_assist: r.u8()?,
            pit_release_assist: r.u8()?,
            ers_assist: r.u8()?,
            drs_assist: r.u8()?,
            dynamic_racing_line: r.u8()?,
            dynamic_racing_line_type: r.u8()?,
            game_mode: r.u8()?,
            rule_set: r.u8()?,
            time_of_day: r.u32()?,
            session_length: r.u8()?,
            speed_units_lead_player: r.u8()?,
            temperature_units_lead_player: r.u8()?,
            speed_units_secondary_player: r.u8()?,
            temperature_units_secondary_player: r.u8()?,
            num_safety_car_periods: r.u8()?,
            num_virtual_safety_car_periods: r.u8()?,
            num_red_flag_periods: r.u8()?,
            equal_car_performance: r.u8()?,
            recovery_mode: r.u8()?,
            flashback_limit: r.u8()?,
            surface_type: r.u8()?,
            low_fuel_mode: r.u8()?,
            race_starts: r.u8()?,
            tyre_temperature: r.u8()?,
            pit_lane_tyre_sim: r.u8()?,
            car_damage: r.u8()?,
            car_damage_rate: r.u8()?,
            collisions: r.u8()?,
            collisions_off_for_first_lap_only: r.u8()?,
            mp_unsafe_pit_release: r.u8()?,
            mp_off_for_griefing: r.u8()?,
            corner_cutting_stringency: r.u8()?,
            parc_ferme_rules: r.u8()?,
            pit_stop_experience: r.u8()?,
            safety_car: r.u8()?,
            safety_car_experience: r.u8()?,
            formation_lap: r.u8()?,
            formation_lap_experience: r.u8()?,
            red_flags: r.u8()?,
            affects_licence_level_solo: r.u8()?,
            affects_licence_level_mp: r.u8()?,
            num_sessions_in_weekend: r.u8()?,
            weekend_structure: r.array(|r| r.u8())?,
            sector2_lap_distance_start: r.f32()?,
            sector3_lap_distance_start: r.f32()?,
        })
    }
}

impl Walk for SessionPacket {
    fn walk(&self, w: &mut Walker<'_>) {
        w.record("Header", &self.header);
        w.scalar("Weather", self.weather);
        w.scalar("TrackTemperature", self.track_temperature);
        w.scalar("AirTemperature", self.air_temperature);
        w.scalar("TotalLaps", self.total_laps);
        w.scalar("TrackLength", self.track_length);
        w.scalar("SessionType", self.session_type);
        w.scalar("TrackId", self.track_id);
        w.scalar("Formula", self.formula);
        w.scalar("SessionTimeLeft", self.session_time_left);
        w.scalar("SessionDuration", self.session_duration);
        w.scalar("PitSpeedLimit", self.pit_speed_limit);
        w.scalar("GamePaused", self.game_paused);
        w.scalar("IsSpectating", self.is_spectating);
        w.scalar("SpectatorCarIndex", self.spectator_car_index);
        w.scalar("SliProNativeSupport", self.sli_pro_native_support);
        w.scalar("NumMarshalZones", self.num_marshal_zones);
        w.records("MarshalZones", &self.marshal_zones);
        w.scalar("SafetyCarStatus", self.safety_car_status);
        w.scalar("NetworkGame", self.network_game);
        w.scalar("NumWeatherForecastSamples", self.num_weather_forecast_samples);
        w.records("WeatherForecastSamples", &self.weather_forecast_samples);
        w.scalar("ForecastAccuracy", self.forecast_accuracy);
        w.scalar("AIDifficulty", self.ai_difficulty);
        w.scalar("SeasonLinkIdentifier", self.season_link_identifier);
        w.scalar("WeekendLinkIdentifier", self.weekend_link_identifier);
        w.scalar("SessionLinkIdentifier", self.session_link_identifier);
        w.scalar("PitStopWindowIdealLap", self.pit_stop_window_ideal_lap);
        w.scalar("PitStopWindowLatestLap", self.pit_stop_window_latest_lap);
        w.scalar("PitStopRejoinPosition", self.pit_stop_rejoin_position);
        w.scalar("SteeringAssist", self.steering_assist);
        w.scalar("BrakingAssist", self.braking_assist);
        w.scalar("GearboxAssist", self.gearbox_assist);
        w.scalar("PitAssist", self.pit_assist);
        w.scalar("PitReleaseAssist", self.pit_release_assist);
        w.scalar("ERSAssist", self.ers_assist);
        w.scalar("DRSAssist", self.drs_assist);
        w.scalar("DynamicRacingLine", self.dynamic_racing_line);
        w.scalar("DynamicRacingLineType", self.dynamic_racing_line_type);
        w.scalar("GameMode", self.game_mode);
        w.scalar("RuleSet", self.rule_set);
        w.scalar("TimeOfDay", self.time_of_day);
        w.scalar("SessionLength", self.session_length);
        w.scalar("SpeedUnitsLeadPlayer", self.speed_units_lead_player);
        w.scalar("TemperatureUnitsLeadPlayer", self.temperature_units_lead_player);
        w.scalar("SpeedUnitsSecondaryPlayer", self.speed_units_secondary_player);
        w.scalar("TemperatureUnitsSecondaryPlayer", self.temperature_units_secondary_player);
        w.scalar("NumSafetyCarPeriods", self.num_safety_car_periods);
        w.scalar("NumVirtualSafetyCarPeriods", self.num_virtual_safety_car_periods);
        w.scalar("NumRedFlagPeriods", self.num_red_flag_periods);
        w.scalar("EqualCarPerformance", self.equal_car_performance);
        w.scalar("RecoveryMode", self.recovery_mode);
        w.scalar("FlashbackLimit", self.flashback_limit);
        w.scalar("SurfaceType", self.surface_type);
        w.scalar("LowFuelMode", self.low_fuel_mode);
        w.scalar("RaceStarts", self.race_starts);
        w.scalar("TyreTemperature", self.tyre_temperature);
        w.scalar("PitLaneTyreSim", self.pit_lane_tyre_sim);
        w.scalar("CarDamage", self.car_damage);
        w.scalar("CarDamageRate", self.car_damage_rate);
        w.scalar("Collisions", self.collisions);
        w.scalar("CollisionsOffForFirstLapOnly", self.collisions_off_for_first_lap_only);
        w.scalar("MpUnsafePitRelease", self.mp_unsafe_pit_release);
        w.scalar("MpOffForGriefing", self.mp_off_for_griefing);
        w.scalar("CornerCuttingStringency", self.corner_cutting_stringency);
        w.scalar("ParcFermeRules", self.parc_ferme_rules);
        w.scalar("PitStopExperience", self.pit_stop_experience);
        w.scalar("SafetyCar", self.safety_car);
        w.scalar("SafetyCarExperience", self.safety_car_experience);
        w.scalar("FormationLap", self.formation_lap);
        w.scalar("FormationLapExperience", self.formation_lap_experience);
        w.scalar("RedFlags", self.red_flags);
        w.scalar("AffectsLicenceLevelSolo", self.affects_licence_level_solo);
        w.scalar("AffectsLicenceLevelMP", self.affects_licence_level_mp);
        w.scalar("NumSessionsInWeekend", self.num_sessions_in_weekend);
        w.scalars("WeekendStructure", &self.weekend_structure);
        w.scalar("Sector2LapDistanceStart", self.sector2_lap_distance_start);
        w.scalar("Sector3LapDistanceStart", self.sector3_lap_distance_start);
    }
}
