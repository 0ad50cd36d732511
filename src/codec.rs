use bytes::{ BytesMut, BufMut };
use tokio::io::AsyncWrite;
use tokio_util::codec::{ Encoder, FramedWrite };
use tracing::trace;

use crate::{
    Frame,
    Header,
    WebsocketError,
    WebsocketResult,
};

/// Encoding side only, frames coming from the peer are parsed elsewhere.
#[derive(Debug, Default)]
pub struct WebsocketCodec;

impl Encoder<Frame> for WebsocketCodec {
    type Error = WebsocketError;

    fn encode(&mut self, frame: Frame, buf: &mut BytesMut) -> WebsocketResult<()> {
        let header = frame.header.encode()?;

        trace!(header = header.len(), payload = frame.payload.len(), "encoding frame");

        buf.reserve(header.len() + frame.payload.len());
        buf.put_slice(&header);
        buf.put(frame.payload);

        Ok(())
    }
}

/// Header alone, for callers that stream the payload themselves.
impl Encoder<Header> for WebsocketCodec {
    type Error = WebsocketError;

    fn encode(&mut self, header: Header, buf: &mut BytesMut) -> WebsocketResult<()> {
        let header = header.encode()?;
        buf.put_slice(&header);

        Ok(())
    }
}

/// Wrap `writer` so whole frames can be pushed through `futures::SinkExt`.
pub fn frame_sink<W: AsyncWrite>(writer: W) -> FramedWrite<W, WebsocketCodec> {
    FramedWrite::new(writer, WebsocketCodec::default())
}
