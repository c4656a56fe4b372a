// ABOUTME: Shutdown coordination for the receiver session
// ABOUTME: Waits for remote closure or Ctrl-C and performs the close handshake

use crate::error::Error;
use crate::protocol::client::WsSender;
use std::future::Future;
use tokio::sync::{mpsc, watch};

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// The server closed the connection before any interrupt
    RemoteClosed,
    /// Interrupted; close frame sent and the server closed in response
    CloseAcknowledged,
    /// Interrupted; close frame sent, then interrupted again before the server closed
    ForcedBySecondInterrupt,
    /// Interrupted; the close frame could not be sent
    CloseFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownState {
    Running,
    Closing,
}

/// Anything that can start a WebSocket close handshake
pub trait CloseHandshake {
    /// Send a normal-closure close frame with an empty reason
    fn send_close(&mut self) -> impl Future<Output = Result<(), Error>> + Send;
}

impl CloseHandshake for WsSender {
    fn send_close(&mut self) -> impl Future<Output = Result<(), Error>> + Send {
        self.close()
    }
}

/// Stream of interrupt requests
pub struct Interrupts {
    rx: mpsc::Receiver<()>,
}

impl Interrupts {
    /// Wrap a channel whose every message is one interrupt
    pub fn new(rx: mpsc::Receiver<()>) -> Self {
        Self { rx }
    }

    /// Create a sender/interrupts pair, for callers that raise interrupts themselves
    pub fn channel() -> (mpsc::Sender<()>, Self) {
        let (tx, rx) = mpsc::channel(4);
        (tx, Self::new(rx))
    }

    /// Wait for the next interrupt. Never returns once every sender is gone.
    pub async fn next(&mut self) {
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

/// Forward every Ctrl-C into an [`Interrupts`] stream.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_ctrl_c_forwarder() -> Interrupts {
    let (tx, interrupts) = Interrupts::channel();

    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {}", e);
                break;
            }
            if tx.send(()).await.is_err() {
                break;
            }
        }
    });

    interrupts
}

/// Wait until the dispatcher has signalled closure.
///
/// A dropped signal sender counts as closure.
pub async fn wait_closed(closed: &mut watch::Receiver<bool>) {
    let _ = closed.wait_for(|closed| *closed).await;
}

/// Block until the session ends, running the close handshake on interrupt
pub async fn wait_for_shutdown<S: CloseHandshake>(
    sender: &mut S,
    interrupts: &mut Interrupts,
    closed: &mut watch::Receiver<bool>,
) -> ShutdownOutcome {
    let mut state = ShutdownState::Running;

    loop {
        match state {
            ShutdownState::Running => {
                tokio::select! {
                    _ = wait_closed(closed) => {
                        log::info!("Connection closed");
                        return ShutdownOutcome::RemoteClosed;
                    }
                    _ = interrupts.next() => {
                        log::info!("Interrupt received, closing connection");
                        if let Err(e) = sender.send_close().await {
                            log::warn!("Error during close: {}", e);
                            return ShutdownOutcome::CloseFailed;
                        }
                        state = ShutdownState::Closing;
                    }
                }
            }
            ShutdownState::Closing => {
                tokio::select! {
                    _ = wait_closed(closed) => {
                        log::info!("Connection closed by remote after close frame");
                        return ShutdownOutcome::CloseAcknowledged;
                    }
                    _ = interrupts.next() => {
                        log::info!("Second interrupt received, not waiting for the remote");
                        return ShutdownOutcome::ForcedBySecondInterrupt;
                    }
                }
            }
        }
    }
}
