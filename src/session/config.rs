// ABOUTME: Receiver session configuration
// ABOUTME: Immutable parameters fixed at process start and passed into the session

/// WebSocket path of the receiver endpoint
pub const WS_PATH: &str = "/ws/";

/// Default OpenWebRX address
pub const DEFAULT_ADDR: &str = "localhost:8073";

/// Default squelch level (dB); low enough to keep squelch open
pub const DEFAULT_SQUELCH_LEVEL: i32 = -120;

/// Receiver session configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceiverConfig {
    /// Server address as `host:port`
    pub addr: String,
    /// Squelch threshold sent with the demodulator parameters
    pub squelch_level: i32,
    /// Frequency offset in Hz sent with the demodulator parameters
    pub offset_freq: i64,
}

impl ReceiverConfig {
    /// Create a configuration for the server at `addr`
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    /// Set the squelch level
    pub fn squelch_level(mut self, level: i32) -> Self {
        self.squelch_level = level;
        self
    }

    /// Set the frequency offset in Hz
    pub fn offset_freq(mut self, offset: i64) -> Self {
        self.offset_freq = offset;
        self
    }

    /// Endpoint URL: plain `ws` scheme, configured address, fixed path
    pub fn endpoint_url(&self) -> String {
        format!("ws://{}{}", self.addr, WS_PATH)
    }
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            squelch_level: DEFAULT_SQUELCH_LEVEL,
            offset_freq: 0,
        }
    }
}
