// ABOUTME: Inbound frame classification and the dispatcher read loop
// ABOUTME: Routes binary frames by tag byte and text frames by document type

use crate::protocol::client::{Frame, FrameReader};
use crate::protocol::messages::{StatusDocument, SERVER_HANDSHAKE_PREFIX};
use serde_json::Value;
use std::borrow::Cow;
use tokio::sync::watch;

/// Binary frame tag for FFT data
pub const TAG_FFT: u8 = 1;
/// Binary frame tag for audio samples
pub const TAG_AUDIO: u8 = 2;
/// Binary frame tag for high-definition audio samples
pub const TAG_HD_AUDIO: u8 = 4;

/// What an inbound frame turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Nothing to act on (empty binary frame, or a document nobody handles)
    Ignored,
    /// FFT data; payload length excludes the tag byte
    Fft {
        /// Payload length in bytes
        len: usize,
    },
    /// Audio samples
    Audio {
        /// Payload length in bytes
        len: usize,
    },
    /// High-definition audio samples
    HdAudio {
        /// Payload length in bytes
        len: usize,
    },
    /// Binary frame with a tag this client does not know
    UnhandledBinary {
        /// Leading tag byte
        tag: u8,
        /// Payload length in bytes
        len: usize,
    },
    /// Signal meter reading
    SMeter(Value),
    /// Plain-text handshake echo from the server
    ServerHandshake(String),
    /// Text frame that is neither a document nor a handshake echo
    ParseError {
        /// Decoder message
        error: String,
        /// Frame text as received
        raw: String,
    },
    /// Frame kind other than text or binary
    UnknownFrame(&'static str),
}

impl Inbound {
    /// Emit the log line for this classification, if it has one
    pub fn log(&self) {
        match self {
            Inbound::Ignored | Inbound::Fft { .. } => {}
            Inbound::Audio { len } => log::info!("Audio data received ({len} bytes)"),
            Inbound::HdAudio { len } => log::info!("HD audio data received ({len} bytes)"),
            Inbound::UnhandledBinary { tag, len } => {
                log::info!("Unhandled binary message type {tag} ({len} bytes)")
            }
            Inbound::SMeter(value) => log::info!("Smeter [absolute]: {}", reading(value)),
            Inbound::ServerHandshake(line) => log::info!("{line}"),
            Inbound::ParseError { error, raw } => {
                log::warn!("Error parsing text message: {error}");
                log::warn!("Raw message: {raw}");
            }
            Inbound::UnknownFrame(kind) => log::info!("Received unknown message type ({kind})"),
        }
    }
}

/// Meter reading as printed in the log; strings are shown without JSON quotes
fn reading(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Classify one frame
pub fn classify(frame: Frame) -> Inbound {
    match frame {
        Frame::Binary(data) => classify_binary(&data),
        Frame::Text(text) => classify_text(text),
        Frame::Other(kind) => Inbound::UnknownFrame(kind),
    }
}

/// Classify a binary frame by its leading tag byte. Payloads are not decoded.
pub fn classify_binary(data: &[u8]) -> Inbound {
    let Some((&tag, payload)) = data.split_first() else {
        return Inbound::Ignored;
    };
    let len = payload.len();

    match tag {
        TAG_FFT => Inbound::Fft { len },
        TAG_AUDIO => Inbound::Audio { len },
        TAG_HD_AUDIO => Inbound::HdAudio { len },
        tag => Inbound::UnhandledBinary { tag, len },
    }
}

/// Classify a text frame as a status document or a handshake echo
pub fn classify_text(text: String) -> Inbound {
    match StatusDocument::parse(&text) {
        Ok(doc) => {
            if doc.kind() != Some("smeter") {
                return Inbound::Ignored;
            }
            doc.value.map_or(Inbound::Ignored, Inbound::SMeter)
        }
        Err(_) if text.starts_with(SERVER_HANDSHAKE_PREFIX) => Inbound::ServerHandshake(text),
        Err(e) => Inbound::ParseError {
            error: e.to_string(),
            raw: text,
        },
    }
}

/// Read frames until the connection fails, then fire `closed`.
///
/// `closed` is set exactly once, on the way out, and never reset.
pub async fn dispatch(mut reader: FrameReader, closed: watch::Sender<bool>) {
    loop {
        match reader.recv().await {
            Ok(frame) => classify(frame).log(),
            Err(e) => {
                log::info!("Error reading message: {e}");
                break;
            }
        }
    }

    closed.send_replace(true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_binary_is_ignored() {
        assert_eq!(classify_binary(&[]), Inbound::Ignored);
        assert_eq!(classify(Frame::Binary(Vec::new())), Inbound::Ignored);
    }

    #[test]
    fn test_known_tags() {
        assert_eq!(classify_binary(&[1, 0, 0, 0]), Inbound::Fft { len: 3 });
        assert_eq!(classify_binary(&[2, 9, 9]), Inbound::Audio { len: 2 });
        assert_eq!(classify_binary(&[4]), Inbound::HdAudio { len: 0 });
    }

    #[test]
    fn test_every_tag_is_classified_once() {
        for tag in 0..=u8::MAX {
            let class = classify_binary(&[tag, 0xAA]);
            match tag {
                1 => assert_eq!(class, Inbound::Fft { len: 1 }),
                2 => assert_eq!(class, Inbound::Audio { len: 1 }),
                4 => assert_eq!(class, Inbound::HdAudio { len: 1 }),
                _ => assert_eq!(class, Inbound::UnhandledBinary { tag, len: 1 }),
            }
        }
    }

    #[test]
    fn test_smeter_value() {
        let class = classify_text(r#"{"type":"smeter","value":-73}"#.to_string());
        assert_eq!(class, Inbound::SMeter(json!(-73)));

        let class = classify_text(r#"{"value":-12.5,"type":"smeter"}"#.to_string());
        assert_eq!(class, Inbound::SMeter(json!(-12.5)));
    }

    #[test]
    fn test_documents_without_a_reading_log_nothing() {
        for text in [
            r#"{"type":"smeter"}"#,
            r#"{"type":"config","value":-73}"#,
            r#"{"type":5,"value":-73}"#,
            r#"{"value":-73}"#,
            r#"{}"#,
        ] {
            assert_eq!(classify_text(text.to_string()), Inbound::Ignored, "{text}");
        }
    }

    #[test]
    fn test_server_handshake_is_not_a_parse_error() {
        let line = "CLIENT DE SERVER server=openwebrx version=v1.2.2";
        assert_eq!(
            classify_text(line.to_string()),
            Inbound::ServerHandshake(line.to_string())
        );

        let line = r#"CLIENT DE SERVER {"type":"smeter","value":1}"#;
        assert_eq!(
            classify_text(line.to_string()),
            Inbound::ServerHandshake(line.to_string())
        );
    }

    #[test]
    fn test_garbage_text_is_a_parse_error() {
        match classify_text("hello there".to_string()) {
            Inbound::ParseError { raw, error } => {
                assert_eq!(raw, "hello there");
                assert!(!error.is_empty());
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        // Prefix match is case sensitive
        assert!(matches!(
            classify_text("client de server".to_string()),
            Inbound::ParseError { .. }
        ));
    }

    #[test]
    fn test_null_frame_is_ignored() {
        assert_eq!(classify_text("null".to_string()), Inbound::Ignored);
        assert_eq!(classify_text(" null \n".to_string()), Inbound::Ignored);
    }

    #[test]
    fn test_reading_format() {
        assert_eq!(reading(&json!("S9")), "S9");
        assert_eq!(reading(&json!(-73)), "-73");
        assert_eq!(reading(&json!(-12.5)), "-12.5");
        assert_eq!(reading(&Value::Null), "null");
    }

    #[test]
    fn test_other_frames() {
        assert_eq!(classify(Frame::Other("ping")), Inbound::UnknownFrame("ping"));
    }
}
