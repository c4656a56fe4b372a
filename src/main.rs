// ABOUTME: OpenWebRX receiver client binary
// ABOUTME: Opens a receiver session, starts audio and logs status until Ctrl+C

use clap::Parser;
use openwebrx_client::session::{spawn_ctrl_c_forwarder, ClientArgs, ReceiverClient};

#[derive(Parser, Debug)]
#[command(name = "openwebrx-client")]
#[command(author, version, about = "Minimal OpenWebRX receiver client", long_about = None)]
struct Args {
    #[command(flatten)]
    client: ClientArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    args.client.init_tracing();
    args.client.log_startup_info();

    // Listen before connecting so an early Ctrl+C is not lost
    let interrupts = spawn_ctrl_c_forwarder();

    let client = ReceiverClient::new(args.client.build_config());

    match client.run(interrupts).await {
        Ok(outcome) => {
            tracing::info!("Session ended: {:?}", outcome);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to connect: {}", e);
            Err(e.into())
        }
    }
}
