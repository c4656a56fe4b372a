// ABOUTME: WebSocket protocol client
// ABOUTME: Dials the receiver endpoint and splits it into a sender and a frame reader

use crate::error::Error;
use crate::protocol::messages::Outbound;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A frame received from the server
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// UTF-8 text frame
    Text(String),
    /// Binary frame: tag byte followed by payload
    Binary(Vec<u8>),
    /// Any other frame kind (ping, pong, raw frame), by name
    Other(&'static str),
}

/// WebSocket client for an OpenWebRX receiver endpoint
#[derive(Debug)]
pub struct ProtocolClient {
    sender: WsSender,
    reader: FrameReader,
}

impl ProtocolClient {
    /// Dial `url` once. There is no retry; a failure is returned to the caller.
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let (ws_stream, _response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| Error::Connection(format!("{url}: {e}")))?;

        let (sink, stream) = ws_stream.split();

        Ok(Self {
            sender: WsSender { sink },
            reader: FrameReader { stream },
        })
    }

    /// Split into the write half (main flow) and the read half (dispatcher)
    pub fn split(self) -> (WsSender, FrameReader) {
        (self.sender, self.reader)
    }
}

/// Write half of the connection
#[derive(Debug)]
pub struct WsSender {
    sink: SplitSink<WsStream, Message>,
}

impl WsSender {
    /// Encode and send one text frame
    pub async fn send(&mut self, outbound: &Outbound) -> Result<(), Error> {
        let text = outbound.encode()?;
        self.sink.send(Message::Text(text)).await?;
        Ok(())
    }

    /// Send a close frame with normal-closure code and empty reason
    pub async fn close(&mut self) -> Result<(), Error> {
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: "".into(),
        };
        self.sink.send(Message::Close(Some(frame))).await?;
        Ok(())
    }
}

/// Read half of the connection
#[derive(Debug)]
pub struct FrameReader {
    stream: SplitStream<WsStream>,
}

impl FrameReader {
    /// Receive the next frame.
    ///
    /// A close frame from the server, the end of the stream and any transport
    /// error all come back as `Err`; the connection is unusable afterwards.
    pub async fn recv(&mut self) -> Result<Frame, Error> {
        match self.stream.next().await {
            Some(Ok(Message::Text(text))) => Ok(Frame::Text(text)),
            Some(Ok(Message::Binary(data))) => Ok(Frame::Binary(data)),
            Some(Ok(Message::Ping(_))) => Ok(Frame::Other("ping")),
            Some(Ok(Message::Pong(_))) => Ok(Frame::Other("pong")),
            Some(Ok(Message::Frame(_))) => Ok(Frame::Other("raw frame")),
            Some(Ok(Message::Close(frame))) => Err(Error::Connection(match frame {
                Some(cf) => format!("closed by remote ({}) {}", u16::from(cf.code), cf.reason),
                None => "closed by remote".to_string(),
            })),
            Some(Err(e)) => Err(e.into()),
            None => Err(Error::Connection("connection closed".to_string())),
        }
    }
}
