// src/shutdown.rs
// One shutdown source fed by OS signals and the /end route

use crate::error::ServeError;
use actix_web::dev::ServerHandle;
use futures_util::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::{Handle, Signals};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Signal(i32),
    Endpoint,
}

/// Cloneable sender half handed to request handlers.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    tx: mpsc::Sender<ShutdownReason>,
}

impl ShutdownTrigger {
    /// Returns false when a shutdown is already pending.
    pub fn trigger(&self, reason: ShutdownReason) -> bool {
        self.tx.try_send(reason).is_ok()
    }
}

pub struct ShutdownManager {
    tx: mpsc::Sender<ShutdownReason>,
    rx: mpsc::Receiver<ShutdownReason>,
    signal_handle: Option<Handle>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            tx,
            rx,
            signal_handle: None,
        }
    }

    pub fn trigger(&self) -> ShutdownTrigger {
        ShutdownTrigger {
            tx: self.tx.clone(),
        }
    }

    /// Forward SIGINT and SIGTERM into the shutdown channel.
    ///
    /// Must be called from within a tokio runtime.
    pub fn listen_for_signals(&mut self) -> Result<(), ServeError> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(ServeError::Signal)?;
        self.signal_handle = Some(signals.handle());

        let trigger = self.trigger();
        tokio::spawn(async move {
            while let Some(signal) = signals.next().await {
                log::debug!("Received signal {}", signal);
                trigger.trigger(ShutdownReason::Signal(signal));
            }
        });

        Ok(())
    }

    /// Wait for the first shutdown request.
    pub async fn wait(&mut self) -> Option<ShutdownReason> {
        self.rx.recv().await
    }

    /// Stop `server` gracefully once a shutdown is requested.
    pub fn watch(mut self, server: ServerHandle) -> JoinHandle<Option<ShutdownReason>> {
        tokio::spawn(async move {
            let reason = self.wait().await;
            log::debug!("Shutdown requested: {:?}", reason);

            crate::logger::get_logger().shutdown_message();
            server.stop(true).await;
            reason
        })
    }

    fn close_signals(&mut self) {
        if let Some(handle) = self.signal_handle.take() {
            handle.close();
        }
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ShutdownManager {
    fn drop(&mut self) {
        self.close_signals();
    }
}
