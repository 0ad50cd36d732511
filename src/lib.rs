//! Websocket frame writing.
//!
//! `Header` describes one frame header and encodes into at most
//! `MAX_HEADER_SIZE` bytes without allocating. `write_frame` (or its async
//! twin) puts a header and its payload on any `std::io::Write` or
//! `tokio::io::AsyncWrite`, and `WebsocketCodec` does the same for
//! `tokio_util::codec::FramedWrite`.
//!
//! ```
//! use websocket_frame::{ write_frame, Frame };
//!
//! let mut out = Vec::new();
//! write_frame(&mut out, &Frame::text("hi")).unwrap();
//! assert_eq!(out, [0x81, 0x02, b'h', b'i']);
//! ```

pub mod error;
pub mod codec;
pub mod frame;
pub mod write;

pub use error::{ WebsocketError, WebsocketResult };
pub use codec::{ frame_sink, WebsocketCodec };
pub use frame::{
    header_size,
    rsv,
    EncodedHeader,
    Frame,
    Header,
    Opcode,
    MASK_KEY_SIZE,
    MAX_HEADER_SIZE,
    MIN_HEADER_SIZE,
};
pub use write::{
    write_frame,
    write_frame_async,
    write_header,
    write_header_async,
};
