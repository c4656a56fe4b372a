// ABOUTME: Protocol module for the OpenWebRX receiver WebSocket
// ABOUTME: Provides the transport, message types and inbound dispatch

/// WebSocket transport
pub mod client;
/// Inbound frame classification and dispatcher loop
pub mod dispatch;
/// Outbound and inbound message types
pub mod messages;

pub use client::{Frame, FrameReader, ProtocolClient, WsSender};
pub use dispatch::{classify, dispatch, Inbound};
pub use messages::{ControlMessage, Outbound, StatusDocument};
