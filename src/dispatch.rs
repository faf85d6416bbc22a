//! Frame dispatch: decode, flatten, gate and fan out
//!
//! [`Forwarder::ingest`] runs the whole per-frame pipeline on the caller's
//! task. Nothing is queued between the socket read and the sinks, so a slow
//! sink delays the next read.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, error, trace, warn};

use crate::config::BridgeConfig;
use crate::gate::{ThrottleGate, ZeroPolicy};
use crate::packets::{Packet, PacketHeader, peek_kind};
use crate::sinks::{Broadcaster, Delivery, OscSink};
use crate::walker::{KeyScheme, collect};
use crate::{BridgeError, PacketKind, Value};

/// Quiet period between two logged Event decode failures.
pub const EVENT_ERROR_LOG_PERIOD: Duration = Duration::from_secs(10);

/// What happened to one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    TooShort,
    UnknownKind,
    Disabled(PacketKind),
    DecodeFailed(PacketKind),
    /// Decoded and offered to the sinks. `websocket` counts admitted fields,
    /// `osc` counts datagrams actually sent.
    Forwarded { kind: PacketKind, websocket: usize, osc: usize },
}

/// Lets one log line through per period.
#[derive(Debug)]
pub struct LogLimiter {
    period: Duration,
    last: Mutex<Option<Instant>>,
}

impl LogLimiter {
    pub fn new(period: Duration) -> Self {
        Self { period, last: Mutex::new(None) }
    }

    pub fn allow(&self, now: Instant) -> bool {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        match *last {
            Some(at) if now.saturating_duration_since(at) < self.period => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

/// Owns both sink gates and feeds admitted fields to the sinks.
pub struct Forwarder {
    config: watch::Receiver<Arc<BridgeConfig>>,
    broadcaster: Arc<Broadcaster>,
    osc: Arc<OscSink>,
    ws_gate: Mutex<ThrottleGate>,
    osc_gate: Mutex<ThrottleGate>,
    event_errors: LogLimiter,
}

impl Forwarder {
    pub fn new(
        config: watch::Receiver<Arc<BridgeConfig>>,
        broadcaster: Arc<Broadcaster>,
        osc: Arc<OscSink>,
    ) -> Self {
        Self {
            config,
            broadcaster,
            osc,
            ws_gate: Mutex::new(ThrottleGate::new()),
            osc_gate: Mutex::new(ThrottleGate::new()),
            event_errors: LogLimiter::new(EVENT_ERROR_LOG_PERIOD),
        }
    }

    /// Latest configuration snapshot.
    pub fn config(&self) -> Arc<BridgeConfig> {
        self.config.borrow().clone()
    }

    /// Forget all gate state, so every key is admitted again on its next value.
    pub fn reset_gates(&self) {
        self.ws_gate.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.osc_gate.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Run one datagram through the pipeline.
    pub async fn ingest(&self, data: &[u8]) -> Disposition {
        if data.len() < PacketHeader::MIN_FRAME_LEN {
            return Disposition::TooShort;
        }
        let kind = match peek_kind(data) {
            Ok(kind) => kind,
            Err(_) => {
                trace!(id = data[PacketHeader::PACKET_ID_OFFSET], "Unknown packet kind dropped");
                return Disposition::UnknownKind;
            }
        };

        let config = self.config();
        if !config.packet_forwarding.is_enabled(kind) {
            return Disposition::Disabled(kind);
        }

        let packet = match Packet::decode_as(kind, data) {
            Ok(packet) => packet,
            Err(e) => {
                self.log_decode_error(kind, data, &e);
                return Disposition::DecodeFailed(kind);
            }
        };

        let now = tokio::time::Instant::now().into_std();
        let websocket = self.forward_websocket(&packet, &config, now).await;
        let osc = if config.settings.enable_osc {
            self.forward_osc(&packet, &config, now).await
        } else {
            0
        };

        Disposition::Forwarded { kind, websocket, osc }
    }

    fn log_decode_error(&self, kind: PacketKind, data: &[u8], error: &BridgeError) {
        if kind != PacketKind::Event {
            error!(kind = %kind, error = %error, "Failed to decode packet");
            return;
        }
        if self.event_errors.allow(Instant::now()) {
            let code = event_code(data).unwrap_or_default();
            error!(kind = %kind, code = %code, error = %error, "Failed to decode packet");
        }
    }

    async fn forward_websocket(&self, packet: &Packet, config: &BridgeConfig, now: Instant) -> usize {
        let interval = config.settings.broadcast_rate_hz.interval();
        let fields = collect(packet, KeyScheme::Path(packet.kind().name()));

        let messages: Vec<String> = {
            let mut gate = self.ws_gate.lock().unwrap_or_else(PoisonError::into_inner);
            fields
                .into_iter()
                .filter(|(key, value)| {
                    gate.admit(key, value, ZeroPolicy::Forward, interval, now).is_admitted()
                })
                .map(|(key, value)| format!("{key} {value}"))
                .collect()
        };

        if config.settings.debug_output {
            for message in &messages {
                debug!(message = %message, "WebSocket emission");
            }
        }
        if !messages.is_empty() {
            self.broadcaster.broadcast_all(&messages).await;
        }
        messages.len()
    }

    async fn forward_osc(&self, packet: &Packet, config: &BridgeConfig, now: Instant) -> usize {
        let interval = config.settings.broadcast_rate_hz.interval();
        let fields = collect(packet, KeyScheme::Mnemonic);

        let admitted: Vec<(&str, String, Value)> = {
            let mut gate = self.osc_gate.lock().unwrap_or_else(PoisonError::into_inner);
            fields
                .into_iter()
                .filter_map(|(key, value)| {
                    let entry = config.osc_addresses.lookup(&key)?;
                    let zeros = ZeroPolicy::from_allow_zero(entry.allow_zero);
                    gate.admit(&key, &value, zeros, interval, now)
                        .is_admitted()
                        .then(|| (entry.address.as_str(), key, value))
                })
                .collect()
        };

        let mut sent = 0;
        for (address, key, value) in admitted {
            if config.settings.debug_output {
                debug!(key = %key, address, value = %value, "OSC emission");
            }
            match self.osc.send(address, &value).await {
                Ok(Delivery::Sent) => sent += 1,
                Ok(Delivery::NoClient) => {}
                Err(e) => warn!(key = %key, address, error = %e, "OSC send failed"),
            }
        }
        sent
    }
}

/// Four-character event code of an Event frame, if the frame reaches it.
fn event_code(data: &[u8]) -> Option<String> {
    let code = data.get(PacketHeader::SIZE..PacketHeader::SIZE + 4)?;
    Some(String::from_utf8_lossy(code).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OscAddressEntry, OscAddressTable, OscValueType};
    use crate::sinks::websocket::tests::RecordingClient;
    use crate::test_utils::FrameBuilder;
    use crate::BroadcastRate;

    struct Harness {
        forwarder: Forwarder,
        client: RecordingClient,
        osc: Arc<OscSink>,
        _config: watch::Sender<Arc<BridgeConfig>>,
    }

    async fn harness(config: BridgeConfig) -> Harness {
        let (tx, rx) = watch::channel(Arc::new(config));
        let broadcaster = Arc::new(Broadcaster::new());
        let client = RecordingClient::default();
        broadcaster.add(Box::new(client.clone())).await;
        let osc = Arc::new(OscSink::new());
        let forwarder = Forwarder::new(rx, broadcaster, osc.clone());
        Harness { forwarder, client, osc, _config: tx }
    }

    #[tokio::test]
    async fn short_frames_are_dropped_before_anything_else() {
        let h = harness(BridgeConfig::default()).await;
        assert_eq!(h.forwarder.ingest(&[0u8; 23]).await, Disposition::TooShort);
        assert!(h.client.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_and_disabled_kinds_are_dropped() {
        let mut config = BridgeConfig::default();
        config.packet_forwarding.set(PacketKind::Motion, false);
        let h = harness(config).await;

        let mut unknown = vec![0u8; 64];
        unknown[PacketHeader::PACKET_ID_OFFSET] = 200;
        assert_eq!(h.forwarder.ingest(&unknown).await, Disposition::UnknownKind);

        let motion = FrameBuilder::new(PacketKind::Motion).build();
        assert_eq!(h.forwarder.ingest(&motion).await, Disposition::Disabled(PacketKind::Motion));
        assert!(h.client.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn truncated_event_emits_nothing() {
        let h = harness(BridgeConfig::default()).await;
        let frame = FrameBuilder::with_len(PacketKind::Event, 44).build();
        assert_eq!(h.forwarder.ingest(&frame).await, Disposition::DecodeFailed(PacketKind::Event));
        assert!(h.client.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_frame_inside_interval_emits_nothing() {
        let mut config = BridgeConfig::default();
        config.settings.broadcast_rate_hz = BroadcastRate(2);
        let h = harness(config).await;
        let frame = FrameBuilder::new(PacketKind::CarStatus).put_u8(29 + 2, 2).build();

        let first = h.forwarder.ingest(&frame).await;
        let Disposition::Forwarded { websocket, osc, .. } = first else {
            panic!("expected Forwarded, got {first:?}");
        };
        assert!(websocket > 0);
        assert_eq!(osc, 0);
        let sent = h.client.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), websocket);
        assert!(sent.contains(&"CarStatus/CarStatusData[0]/FuelMix 2".to_string()));

        let second = h.forwarder.ingest(&frame).await;
        assert_eq!(
            second,
            Disposition::Forwarded { kind: PacketKind::CarStatus, websocket: 0, osc: 0 }
        );
        assert_eq!(h.client.sent.lock().unwrap().len(), websocket);
    }

    #[tokio::test]
    async fn osc_only_sees_table_entries_and_respects_allow_zero() {
        let receiver = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let mut table = OscAddressTable::empty();
        table.insert("FuelMix", OscAddressEntry::new("/status/fuel_mix", OscValueType::Int));
        table.insert(
            "TractionControl",
            OscAddressEntry::new("/status/tc", OscValueType::Int).allow_zero(true),
        );
        let mut config = BridgeConfig::default();
        config.settings.enable_osc = true;
        config.osc_addresses = table;
        let h = harness(config).await;
        h.osc.restart(receiver.local_addr().unwrap()).await.unwrap();

        // every car has TractionControl 0 and FuelMix 0
        let frame = FrameBuilder::new(PacketKind::CarStatus).build();
        let disposition = h.forwarder.ingest(&frame).await;
        // TractionControl admitted once, later cars share the key and are too soon
        assert!(matches!(disposition, Disposition::Forwarded { osc: 1, .. }));
        let gate = h.forwarder.osc_gate.lock().unwrap();
        assert_eq!(gate.last("TractionControl").map(|e| &e.value), Some(&Value::UInt8(0)));
        assert!(gate.last("FuelMix").is_none());
    }

    #[tokio::test]
    async fn osc_without_a_client_counts_nothing_but_still_gates() {
        let mut table = OscAddressTable::empty();
        table.insert("FuelMix", OscAddressEntry::new("/status/fuel_mix", OscValueType::Int));
        let mut config = BridgeConfig::default();
        config.settings.enable_osc = true;
        config.osc_addresses = table;
        let h = harness(config).await;

        let frame = FrameBuilder::new(PacketKind::CarStatus).put_u8(29 + 2, 1).build();
        let disposition = h.forwarder.ingest(&frame).await;
        assert!(matches!(disposition, Disposition::Forwarded { osc: 0, .. }));
        let gate = h.forwarder.osc_gate.lock().unwrap();
        assert_eq!(gate.last("FuelMix").map(|e| &e.value), Some(&Value::UInt8(1)));
    }

    #[test]
    fn event_code_is_read_from_truncated_frames() {
        let frame = FrameBuilder::with_len(PacketKind::Event, 44).put_bytes(29, b"SSTA").build();
        assert_eq!(event_code(&frame).as_deref(), Some("SSTA"));
        assert_eq!(event_code(&frame[..31]), None);
    }

    #[test]
    fn log_limiter_allows_one_line_per_period() {
        let limiter = LogLimiter::new(Duration::from_secs(10));
        let t0 = Instant::now();
        assert!(limiter.allow(t0));
        assert!(!limiter.allow(t0 + Duration::from_secs(9)));
        assert!(limiter.allow(t0 + Duration::from_secs(10)));
    }
}
