//! Bridge supervisor
//!
//! [`Bridge`] owns the configuration channel, both sinks, the forwarder and
//! the running listener, and is the only place that restarts them. Listener
//! restarts are serialized by a lock so the gates and sockets are never
//! rebuilt concurrently.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{error, info, warn};

use crate::config::BridgeConfig;
use crate::dispatch::Forwarder;
use crate::listener::FrameListener;
use crate::sinks::{Broadcaster, OscSink};
use crate::Result;

pub struct Bridge {
    config_tx: watch::Sender<Arc<BridgeConfig>>,
    broadcaster: Arc<Broadcaster>,
    osc: Arc<OscSink>,
    forwarder: Arc<Forwarder>,
    listener: Mutex<Option<FrameListener>>,
}

impl Bridge {
    /// Bind the listener and, when enabled, start the OSC client.
    ///
    /// Failing to bind the listener here is fatal.
    pub async fn start(config: BridgeConfig) -> Result<Self> {
        let udp = config.settings.udp_endpoint()?;
        let (config_tx, config_rx) = watch::channel(Arc::new(config));

        let broadcaster = Arc::new(Broadcaster::new());
        let osc = Arc::new(OscSink::new());
        let forwarder = Arc::new(Forwarder::new(config_rx, broadcaster.clone(), osc.clone()));

        let listener = FrameListener::bind(udp, forwarder.clone()).await?;
        let bridge = Self { config_tx, broadcaster, osc, forwarder, listener: Mutex::new(Some(listener)) };

        if bridge.config().settings.enable_osc {
            bridge.restart_osc().await?;
        }
        Ok(bridge)
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<BridgeConfig> {
        self.config_tx.borrow().clone()
    }

    pub fn subscribe_config(&self) -> watch::Receiver<Arc<BridgeConfig>> {
        self.config_tx.subscribe()
    }

    pub fn broadcaster(&self) -> Arc<Broadcaster> {
        self.broadcaster.clone()
    }

    pub fn forwarder(&self) -> Arc<Forwarder> {
        self.forwarder.clone()
    }

    pub fn osc(&self) -> Arc<OscSink> {
        self.osc.clone()
    }

    /// Address of the running listener, if any.
    pub async fn listener_addr(&self) -> Option<SocketAddr> {
        self.listener.lock().await.as_ref().map(FrameListener::local_addr)
    }

    /// Validate and publish a new configuration, then restart what it affects.
    ///
    /// An invalid listener address, or an OSC target that does not resolve
    /// while OSC is enabled, is rejected with the previous snapshot left in
    /// place. The OSC client is restarted when its target changed or OSC was
    /// just enabled; the listener is always restarted.
    pub async fn reconfigure(&self, config: BridgeConfig) -> Result<()> {
        config.settings.udp_endpoint()?;
        let osc_target = if config.settings.enable_osc {
            Some(config.settings.osc_target().await?)
        } else {
            None
        };
        self.config_tx.send_replace(Arc::new(config));

        let running = self.osc.target().await;
        if let Some(target) = osc_target.filter(|t| running != Some(*t)) {
            self.osc.restart(target).await?;
        }
        self.restart_listener().await
    }

    /// Tear down the listener and bind the configured address.
    ///
    /// When the new bind fails the previous address is bound again before
    /// the error is returned.
    pub async fn restart_listener(&self) -> Result<()> {
        let addr = self.config().settings.udp_endpoint()?;
        let mut slot = self.listener.lock().await;

        let previous = match slot.take() {
            Some(old) => {
                let previous = old.local_addr();
                old.shutdown().await;
                Some(previous)
            }
            None => None,
        };
        self.forwarder.reset_gates();

        match FrameListener::bind(addr, self.forwarder.clone()).await {
            Ok(listener) => {
                *slot = Some(listener);
                Ok(())
            }
            Err(e) => {
                warn!(%addr, error = %e, "Listener restart failed");
                if let Some(previous) = previous {
                    match FrameListener::bind(previous, self.forwarder.clone()).await {
                        Ok(listener) => {
                            info!(%previous, "Fell back to previous listener address");
                            *slot = Some(listener);
                        }
                        Err(fallback) => {
                            error!(%previous, error = %fallback, "No telemetry listener running");
                        }
                    }
                }
                Err(e)
            }
        }
    }

    /// Rebuild the OSC client for the configured target.
    pub async fn restart_osc(&self) -> Result<()> {
        let target = self.config().settings.osc_target().await?;
        self.osc.restart(target).await
    }

    /// Restart the OSC client (when enabled) and the listener.
    pub async fn restart_all(&self) -> Result<()> {
        if self.config().settings.enable_osc {
            self.restart_osc().await?;
        }
        self.restart_listener().await
    }

    /// Stop the listener. Sinks are left to their owners.
    pub async fn shutdown(&self) {
        if let Some(listener) = self.listener.lock().await.take() {
            listener.shutdown().await;
        }
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge").field("config", &self.config()).finish_non_exhaustive()
    }
}
