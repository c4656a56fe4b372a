// ABOUTME: Protocol message type definitions and serialization
// ABOUTME: Supports the receiver handshake line, connectionproperties, dspcontrol and smeter

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identification line sent as the first frame of every receiver session
pub const CLIENT_IDENTIFICATION: &str = "SERVER DE CLIENT client=openwebrx.js type=receiver";

/// Prefix of the server's plain-text handshake echo
pub const SERVER_HANDSHAKE_PREFIX: &str = "CLIENT DE SERVER";

/// Standard-definition audio output rate requested from the server (Hz)
pub const OUTPUT_RATE: u32 = 11_025;

/// High-definition audio output rate requested from the server (Hz)
pub const HD_OUTPUT_RATE: u32 = 44_100;

/// Structured control document, routed by the server on its `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlMessage {
    /// Connection-wide properties such as output sample rates
    #[serde(rename = "connectionproperties")]
    ConnectionProperties {
        /// Requested properties
        params: ConnectionProperties,
    },

    /// Demodulator configuration or control action
    #[serde(rename = "dspcontrol")]
    DspControl(DspControl),
}

impl ControlMessage {
    /// `connectionproperties` document with the given properties
    pub fn connection_properties(params: ConnectionProperties) -> Self {
        ControlMessage::ConnectionProperties { params }
    }

    /// `dspcontrol` document carrying demodulator parameters
    pub fn configure_dsp(params: DspParams) -> Self {
        ControlMessage::DspControl(DspControl {
            params: Some(params),
            action: None,
        })
    }

    /// `dspcontrol` document asking the server to start streaming
    pub fn start_dsp() -> Self {
        ControlMessage::DspControl(DspControl {
            params: None,
            action: Some(DspAction::Start),
        })
    }
}

/// Output sample rates for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProperties {
    /// Standard-definition audio rate in Hz
    pub output_rate: u32,
    /// High-definition audio rate in Hz
    pub hd_output_rate: u32,
}

impl Default for ConnectionProperties {
    fn default() -> Self {
        Self {
            output_rate: OUTPUT_RATE,
            hd_output_rate: HD_OUTPUT_RATE,
        }
    }
}

/// Body of a `dspcontrol` document: either parameters or an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DspControl {
    /// Demodulator parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<DspParams>,
    /// Control action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<DspAction>,
}

/// Actions understood by the server's DSP chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DspAction {
    /// Start the demodulator and the audio stream
    Start,
}

/// Demodulation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modulation {
    /// Narrowband FM
    Nfm,
}

/// Demodulator parameters sent in a `dspcontrol` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DspParams {
    /// Lower passband edge relative to the tuned frequency (Hz)
    pub low_cut: i32,
    /// Upper passband edge relative to the tuned frequency (Hz)
    pub high_cut: i32,
    /// Offset from the center frequency (Hz)
    pub offset_freq: i64,
    /// Demodulation mode
    #[serde(rename = "mod")]
    pub modulation: Modulation,
    /// DMR timeslot filter selection
    pub dmr_filter: u8,
    /// Digital audio service id
    pub audio_service_id: u32,
    /// Squelch threshold (dB)
    pub squelch_level: i32,
    /// Secondary demodulator; `false` disables it
    pub secondary_mod: bool,
}

impl DspParams {
    /// Narrowband FM with a +/-4 kHz passband
    pub fn narrowband_fm(squelch_level: i32, offset_freq: i64) -> Self {
        Self {
            low_cut: -4000,
            high_cut: 4000,
            offset_freq,
            modulation: Modulation::Nfm,
            dmr_filter: 3,
            audio_service_id: 0,
            squelch_level,
            secondary_mod: false,
        }
    }
}

/// A text frame to be sent to the server
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Literal protocol line, sent verbatim
    Line(String),
    /// Structured document, encoded as JSON before sending
    Document(ControlMessage),
}

impl Outbound {
    /// Encode into the text payload that goes on the wire
    pub fn encode(&self) -> crate::Result<String> {
        match self {
            Outbound::Line(line) => Ok(line.clone()),
            Outbound::Document(doc) => Ok(serde_json::to_string(doc)?),
        }
    }
}

impl From<ControlMessage> for Outbound {
    fn from(doc: ControlMessage) -> Self {
        Outbound::Document(doc)
    }
}

impl From<&str> for Outbound {
    fn from(line: &str) -> Self {
        Outbound::Line(line.to_string())
    }
}

/// Status document pushed by the server.
///
/// Only the fields needed for routing are decoded; everything else the server
/// sends alongside them is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusDocument {
    /// Routing discriminator; not necessarily a string
    #[serde(rename = "type", default)]
    pub kind: Value,
    /// Reading carried by `smeter` documents. `Some(Value::Null)` when the
    /// key is present with a null value.
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
}

impl StatusDocument {
    /// Decode a text frame. Only JSON objects are status documents; a bare
    /// `null` decodes as an empty one.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let fields: Option<serde_json::Map<String, Value>> = serde_json::from_str(text)?;
        serde_json::from_value(Value::Object(fields.unwrap_or_default()))
    }

    /// Document type, if it is a string
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_str()
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
