// ABOUTME: Receiver session handshake and audio start
// ABOUTME: Sends identification, connection properties, DSP setup, then the start action

use crate::error::Error;
use crate::protocol::client::WsSender;
use crate::protocol::messages::{
    ConnectionProperties, ControlMessage, DspParams, Outbound, CLIENT_IDENTIFICATION,
};
use crate::session::config::ReceiverConfig;

/// The opening sequence, in the order the server expects it
pub fn handshake_messages(config: &ReceiverConfig) -> [Outbound; 3] {
    [
        Outbound::from(CLIENT_IDENTIFICATION),
        ControlMessage::connection_properties(ConnectionProperties::default()).into(),
        ControlMessage::configure_dsp(DspParams::narrowband_fm(
            config.squelch_level,
            config.offset_freq,
        ))
        .into(),
    ]
}

/// Send the opening sequence. Nothing is acknowledged; failed sends are
/// logged and skipped.
pub async fn initialize(sender: &mut WsSender, config: &ReceiverConfig) {
    for message in handshake_messages(config) {
        send_logged(sender, &message).await;
    }
}

/// Ask the server to start the demodulator and stream audio
pub async fn start_audio(sender: &mut WsSender) {
    send_logged(sender, &Outbound::from(ControlMessage::start_dsp())).await;
}

async fn send_logged(sender: &mut WsSender, message: &Outbound) {
    match sender.send(message).await {
        Ok(()) => log::debug!("Sent {:?}", message),
        Err(Error::Serialization(e)) => log::warn!("Error marshalling JSON: {}", e),
        Err(e) => log::warn!("Error sending message: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::{DspAction, DspControl};

    #[test]
    fn test_handshake_order() {
        let config = ReceiverConfig::default().squelch_level(-80).offset_freq(300);
        let [first, second, third] = handshake_messages(&config);

        assert_eq!(first, Outbound::Line(CLIENT_IDENTIFICATION.to_string()));
        assert!(matches!(
            second,
            Outbound::Document(ControlMessage::ConnectionProperties { .. })
        ));
        match third {
            Outbound::Document(ControlMessage::DspControl(DspControl {
                params: Some(params),
                action: None,
            })) => {
                assert_eq!(params.squelch_level, -80);
                assert_eq!(params.offset_freq, 300);
            }
            other => panic!("expected dsp params, got {other:?}"),
        }
    }

    #[test]
    fn test_start_is_an_action_only() {
        match ControlMessage::start_dsp() {
            ControlMessage::DspControl(DspControl { params, action }) => {
                assert!(params.is_none());
                assert_eq!(action, Some(DspAction::Start));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
