// ABOUTME: Receiver session runner
// ABOUTME: Connects, spawns the dispatcher, runs the handshake and waits for shutdown

use crate::protocol::client::ProtocolClient;
use crate::protocol::dispatch::dispatch;
use crate::session::config::ReceiverConfig;
use crate::session::handshake::{initialize, start_audio};
use crate::session::shutdown::{wait_for_shutdown, Interrupts, ShutdownOutcome};
use tokio::sync::watch;

/// One receiver session against one OpenWebRX server
pub struct ReceiverClient {
    /// Session configuration
    config: ReceiverConfig,
}

impl ReceiverClient {
    /// Create a client for the given configuration
    pub fn new(config: ReceiverConfig) -> Self {
        Self { config }
    }

    /// Run the session to completion.
    ///
    /// Only the initial connect can fail; everything after it is logged and
    /// the session ends with a [`ShutdownOutcome`].
    pub async fn run(self, mut interrupts: Interrupts) -> crate::Result<ShutdownOutcome> {
        let url = self.config.endpoint_url();
        log::info!("Connecting to {}", url);

        let client = ProtocolClient::connect(&url).await?;
        let (mut sender, reader) = client.split();

        let (closed_tx, mut closed_rx) = watch::channel(false);
        let dispatcher = tokio::spawn(dispatch(reader, closed_tx));

        initialize(&mut sender, &self.config).await;
        start_audio(&mut sender).await;

        let outcome = wait_for_shutdown(&mut sender, &mut interrupts, &mut closed_rx).await;

        // Still running when a second interrupt cut the close handshake short
        dispatcher.abort();

        Ok(outcome)
    }
}
