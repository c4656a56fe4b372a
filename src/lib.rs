// ABOUTME: Main library entry point for openwebrx-client
// ABOUTME: Exports public API for the OpenWebRX receiver session protocol

//! # openwebrx-client
//!
//! Minimal client for an OpenWebRX software-defined-radio service.
//!
//! The client opens a single WebSocket to the receiver, performs the receiver
//! handshake, configures the demodulator, asks for audio and then relays status
//! updates (signal meter readings, handshake echoes, binary frame arrivals) to
//! the log until the remote closes or the process is interrupted.
//!
//! ## Example: Running a session
//!
//! ```no_run
//! use openwebrx_client::session::{spawn_ctrl_c_forwarder, ReceiverClient, ReceiverConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ReceiverConfig::new("localhost:8073").squelch_level(-110);
//!     let interrupts = spawn_ctrl_c_forwarder();
//!
//!     let outcome = ReceiverClient::new(config).run(interrupts).await.unwrap();
//!     println!("session ended: {outcome:?}");
//! }
//! ```

#![warn(missing_docs)]

/// Protocol implementation for WebSocket communication
pub mod protocol;
/// Receiver session: configuration, handshake and shutdown
pub mod session;

pub use protocol::client::ProtocolClient;
pub use protocol::messages::{ControlMessage, Outbound};
pub use session::{ReceiverClient, ReceiverConfig, ShutdownOutcome};

/// Result type for openwebrx-client operations
pub type Result<T> = std::result::Result<T, error::Error>;

/// Error types for openwebrx-client
pub mod error {
    use thiserror::Error;

    /// Error types for openwebrx-client operations
    #[derive(Error, Debug)]
    pub enum Error {
        /// WebSocket-related error
        #[error("WebSocket error: {0}")]
        WebSocket(String),

        /// Connection-related error
        #[error("Connection error: {0}")]
        Connection(String),

        /// Outbound document could not be encoded
        #[error("Serialization error: {0}")]
        Serialization(#[from] serde_json::Error),
    }

    impl From<tokio_tungstenite::tungstenite::Error> for Error {
        fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
            Error::WebSocket(err.to_string())
        }
    }
}
