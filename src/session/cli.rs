// ABOUTME: CLI argument parsing for the receiver client binary
// ABOUTME: Builds the immutable ReceiverConfig and sets up tracing

use crate::session::config::{ReceiverConfig, DEFAULT_ADDR, DEFAULT_SQUELCH_LEVEL};
use clap::Args;

/// Receiver client arguments
///
/// Use with `#[command(flatten)]` in the binary's Parser struct.
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// OpenWebRX service address (host:port)
    #[arg(long, default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Squelch level in dB
    #[arg(long = "sq", default_value_t = DEFAULT_SQUELCH_LEVEL, allow_negative_numbers = true)]
    pub squelch: i32,

    /// Frequency offset in Hz
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ClientArgs {
    /// Initialize tracing based on verbosity flag
    pub fn init_tracing(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let filter = if self.verbose {
            "openwebrx_client=debug"
        } else {
            "openwebrx_client=info"
        };

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| filter.into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Log startup information
    pub fn log_startup_info(&self) {
        tracing::info!("OpenWebRX client v{}", env!("CARGO_PKG_VERSION"));
        tracing::info!(
            "Squelch: {} dB, offset: {} Hz",
            self.squelch,
            self.offset
        );
    }

    /// Build the session configuration from these args
    pub fn build_config(&self) -> ReceiverConfig {
        ReceiverConfig::new(&self.addr)
            .squelch_level(self.squelch)
            .offset_freq(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        client: ClientArgs,
    }

    #[test]
    fn test_default_args() {
        let cli = TestCli::try_parse_from(["openwebrx-client"]).unwrap();
        assert_eq!(cli.client.addr, "localhost:8073");
        assert_eq!(cli.client.squelch, -120);
        assert_eq!(cli.client.offset, 0);
        assert!(!cli.client.verbose);
    }

    #[test]
    fn test_negative_values() {
        let cli = TestCli::try_parse_from([
            "openwebrx-client",
            "--addr",
            "10.0.0.5:8073",
            "--sq",
            "-95",
            "--offset",
            "-12500",
        ])
        .unwrap();

        let config = cli.client.build_config();
        assert_eq!(config.addr, "10.0.0.5:8073");
        assert_eq!(config.squelch_level, -95);
        assert_eq!(config.offset_freq, -12500);
    }
}
