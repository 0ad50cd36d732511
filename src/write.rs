//! Putting headers and frames on a sink.
//!
//! A header always leaves in a single `write` call, and a sink that takes
//! only part of it fails the call with `WriteZero` instead of being asked
//! again. The payload follows in its own `write_all`. Nothing is written when
//! the header can not be encoded.
//!
//! The slices handed to the sink live on the stack of the call and are only
//! valid for the duration of that write; sinks must copy what they want to
//! keep.
use std::io::{ self, Write };

use tokio::io::{ AsyncWrite, AsyncWriteExt };
use tracing::{ trace, trace_span };
use tracing_futures::Instrument;

use crate::{ Frame, Header, WebsocketError, WebsocketResult };

pub fn write_header<W: Write>(writer: &mut W, header: &Header) -> WebsocketResult<()> {
    let bytes = header.encode()?;
    trace!(size = bytes.len(), "writing header");
    let n = writer.write(&bytes)?;

    check_header_written(n, bytes.len())
}

/// Write the header, then the payload. Empty payloads skip the second write.
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> WebsocketResult<()> {
    write_header(writer, &frame.header)?;

    if !frame.payload.is_empty() {
        trace!(size = frame.payload.len(), "writing payload");
        writer.write_all(&frame.payload)?;
    }

    Ok(())
}

pub async fn write_header_async<W>(writer: &mut W, header: &Header) -> WebsocketResult<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = header.encode()?;
    trace!(size = bytes.len(), "writing header");
    let n = writer.write(&bytes).await?;

    check_header_written(n, bytes.len())
}

fn check_header_written(written: usize, expected: usize) -> WebsocketResult<()> {
    if written != expected {
        trace!(written, expected, "short header write");
        return Err(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("header write took {} of {} bytes", written, expected),
        ).into())
    }

    Ok(())
}

/// Async version of `write_frame`.
pub async fn write_frame_async<W>(writer: &mut W, frame: &Frame) -> WebsocketResult<()>
where
    W: AsyncWrite + Unpin,
{
    let span = trace_span!(
        "write_frame",
        opcode = frame.header.opcode.as_u8(),
        length = frame.header.length
    );

    async move {
        write_header_async(writer, &frame.header).await?;

        if !frame.payload.is_empty() {
            trace!(size = frame.payload.len(), "writing payload");
            writer.write_all(&frame.payload).await?;
        }

        Ok::<_, WebsocketError>(())
    }
    .instrument(span)
    .await
}
