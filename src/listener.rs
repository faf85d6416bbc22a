//! UDP frame listener
//!
//! One task owns the socket and reads datagrams into a reusable buffer,
//! handing each one to the [`Forwarder`] before issuing the next receive.
//! Shutdown cancels the task through a [`CancellationToken`] and waits for it
//! to exit, which releases the socket.

use std::fmt::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::dispatch::Forwarder;
use crate::packets::{PacketHeader, peek_kind};
use crate::{BridgeError, Result};

/// Receive buffer capacity; the largest frame is well below this.
pub const RECV_BUFFER_LEN: usize = 2048;

/// A running listener task.
pub struct FrameListener {
    local_addr: SocketAddr,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl FrameListener {
    /// Bind `addr` and start reading.
    pub async fn bind(addr: SocketAddr, forwarder: Arc<Forwarder>) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await.map_err(|source| BridgeError::Bind { addr, source })?;
        let local_addr = socket
            .local_addr()
            .map_err(|e| BridgeError::socket("reading listener address", e))?;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(read_loop(socket, forwarder, cancel.clone()));
        info!(%local_addr, "Telemetry listener started");

        Ok(Self { local_addr, cancel, task })
    }

    /// Address the socket is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop the read loop and wait until the socket is released.
    ///
    /// Datagrams still queued in the OS buffer are lost.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Listener task ended abnormally");
        }
        info!(local_addr = %self.local_addr, "Telemetry listener stopped");
    }
}

async fn read_loop(socket: UdpSocket, forwarder: Arc<Forwarder>, cancel: CancellationToken) {
    let mut buf = [0u8; RECV_BUFFER_LEN];
    let mut frame_count = 0u64;

    loop {
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(frames = frame_count, "Listener cancelled");
                break;
            }
            result = socket.recv_from(&mut buf) => result,
        };

        let (len, peer) = match result {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "UDP read failed");
                continue;
            }
        };
        frame_count += 1;
        let frame = &buf[..len];

        if forwarder.config().settings.debug_output {
            log_raw_frame(frame, peer);
        }
        let disposition = forwarder.ingest(frame).await;
        trace!(len, ?disposition, "Frame processed");
    }
}

fn log_raw_frame(frame: &[u8], peer: SocketAddr) {
    let kind = if frame.len() > PacketHeader::PACKET_ID_OFFSET {
        peek_kind(frame).map(|k| k.name()).unwrap_or("Unknown")
    } else {
        "Unknown"
    };
    debug!(kind, %peer, len = frame.len(), bytes = %hex(frame), "Raw frame");
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
