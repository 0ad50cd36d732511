use bytes::{ Bytes, BytesMut, BufMut };

pub mod header;
pub mod opcode;

pub use header::{
    header_size,
    rsv,
    EncodedHeader,
    Header,
    MASK_KEY_SIZE,
    MAX_HEADER_SIZE,
    MIN_HEADER_SIZE,
};
pub use opcode::Opcode;

/// A header plus the payload that goes right after it.
///
/// `header.length` is expected to match `payload.len()`; the constructors
/// keep them in sync but nothing checks it when fields are set by hand.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frame {
    pub header: Header,
    pub payload: Bytes,
}

impl Frame {
    /// Single, unmasked frame.
    pub fn new(opcode: Opcode, payload: impl Into<Bytes>) -> Self {
        let payload = payload.into();

        Self {
            header: Header {
                fin: true,
                opcode,
                length: payload.len() as i64,
                ..Default::default()
            },
            payload,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Opcode::Text, Bytes::from(text.into()))
    }

    pub fn binary(buf: impl Into<Bytes>) -> Self {
        Self::new(Opcode::Binary, buf)
    }

    pub fn ping(buf: impl Into<Bytes>) -> Self {
        Self::new(Opcode::Ping, buf)
    }

    pub fn pong(buf: impl Into<Bytes>) -> Self {
        Self::new(Opcode::Pong, buf)
    }

    /// Close frame whose body is the status code followed by `reason`.
    pub fn close(code: u16, reason: &str) -> Self {
        let mut buf = BytesMut::with_capacity(2 + reason.len());
        buf.put_u16(code);
        buf.put_slice(reason.as_bytes());

        Self::new(Opcode::Close, buf.freeze())
    }

    pub fn close_with_code(code: u16) -> Self {
        Self::close(code, "")
    }

    /// Put `key` in the header. The payload is sent as is, so it has to be
    /// masked beforehand.
    pub fn with_mask(mut self, key: [u8; 4]) -> Self {
        self.header.masked = true;
        self.header.mask = key;
        self
    }

    pub fn with_fin(mut self, fin: bool) -> Self {
        self.header.fin = fin;
        self
    }

    pub fn with_rsv(mut self, rsv: u8) -> Self {
        self.header.rsv = rsv;
        self
    }

    pub fn is_last(&self) -> bool {
        self.header.fin
    }

    pub fn is_control(&self) -> bool {
        self.header.opcode.is_control()
    }

    pub fn is_non_control(&self) -> bool {
        !self.is_control()
    }
}
