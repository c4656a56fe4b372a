// ABOUTME: Session module for the OpenWebRX receiver client
// ABOUTME: Provides configuration, CLI args, handshake, shutdown and the session runner

mod cli;
mod config;
mod handshake;
mod receiver;
mod shutdown;

pub use cli::ClientArgs;
pub use config::{ReceiverConfig, DEFAULT_ADDR, DEFAULT_SQUELCH_LEVEL, WS_PATH};
pub use handshake::{handshake_messages, initialize, start_audio};
pub use receiver::ReceiverClient;
pub use shutdown::{
    spawn_ctrl_c_forwarder, wait_closed, wait_for_shutdown, CloseHandshake, Interrupts,
    ShutdownOutcome,
};
