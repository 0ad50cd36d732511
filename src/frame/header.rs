//! REFERENCE
//! =========
//! [RFC 6455 5.2](https://tools.ietf.org/html/rfc6455#section-5.2)
//!
//!  ```ignore
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
//! |I|S|S|S|  (4)  |A|     (7)     |             (16/64)           |
//! |N|V|V|V|       |S|             |   (if payload len==126/127)   |
//! | |1|2|3|       |K|             |                               |
//! +-+-+-+-+-------+-+-------------+ - - - - - - - - - - - - - - - +
//! |     Extended payload length continued, if payload len == 127  |
//! + - - - - - - - - - - - - - - - +-------------------------------+
//! |                               |Masking-key, if MASK set to 1  |
//! +-------------------------------+-------------------------------+
//! ```
//!
//! What gets written:
//!
//! ```ignore
//! byte 0: FIN (bit 7) | RSV1-3 (bits 6-4) | opcode (bits 3-0)
//! byte 1: MASK (bit 7) | length control (bits 6-0)
//!   - 0-125 -> thats the payload length, no extended field
//!   - 126   -> 2 bytes big endian length follow
//!   - 127   -> 8 bytes big endian length follow
//! then the 4 bytes masking key, only when MASK is set
//! ```
//!
//! The payload itself is never touched here, masking it is up to the caller.
use std::ops::Deref;

use tracing::debug;

use crate::{ Opcode, WebsocketError, WebsocketResult };

/// Largest possible header: 2 + 8 extended length + 4 masking key.
pub const MAX_HEADER_SIZE: usize = 14;
/// Unmasked header with a 7 bit length.
pub const MIN_HEADER_SIZE: usize = 2;
pub const MASK_KEY_SIZE: usize = 4;

const FIN_BIT: u8 = 0x80;
const RSV_SHIFT: u8 = 4;
const RSV_BITS: u8 = 0x07;
const OPCODE_BITS: u8 = 0x0F;
const MASK_BIT: u8 = 0x80;

const LEN_7_MAX: i64 = 125;
const LEN_16_MIN: i64 = LEN_7_MAX + 1;
const LEN_16_MAX: i64 = u16::MAX as i64;
const LEN_64_MIN: i64 = LEN_16_MAX + 1;
const LEN_64_MAX: i64 = i64::MAX;

const LEN_16_MARKER: u8 = 126;
const LEN_64_MARKER: u8 = 127;

/// Pack the three reserved flags into the value stored in `Header::rsv`.
pub fn rsv(rsv1: bool, rsv2: bool, rsv3: bool) -> u8 {
    ((rsv1 as u8) << 2) | ((rsv2 as u8) << 1) | (rsv3 as u8)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub fin: bool,              // 1 bit
    pub rsv: u8,                // 3 bits
    pub opcode: Opcode,         // 4 bits
    pub masked: bool,           // 1 bit
    pub mask: [u8; 4],          // only read when `masked`
    pub length: i64,            // payload length, never negative
}

/// How the payload length is spelled on the wire. `size` and `encode` both
/// go through `classify`, so they can not disagree on a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthTier {
    Short(u8),
    Medium(u16),
    Long(u64),
}

impl LengthTier {
    fn classify(length: i64) -> WebsocketResult<Self> {
        match length {
            0..=LEN_7_MAX => Ok(LengthTier::Short(length as u8)),
            LEN_16_MIN..=LEN_16_MAX => Ok(LengthTier::Medium(length as u16)),
            LEN_64_MIN..=LEN_64_MAX => Ok(LengthTier::Long(length as u64)),
            _ => {
                debug!(length, "rejecting header with negative payload length");
                Err(WebsocketError::InvalidLength(length))
            },
        }
    }

    /// Length control byte plus the extended length field.
    fn size(&self) -> usize {
        match *self {
            LengthTier::Short(_) => 2,
            LengthTier::Medium(_) => 4,
            LengthTier::Long(_) => 10,
        }
    }
}

impl Header {
    pub fn rsv1(&self) -> bool { self.rsv & 0b100 != 0 }
    pub fn rsv2(&self) -> bool { self.rsv & 0b010 != 0 }
    pub fn rsv3(&self) -> bool { self.rsv & 0b001 != 0 }

    /// Number of bytes `encode` produces for this header.
    pub fn size(&self) -> WebsocketResult<usize> {
        let mut n = LengthTier::classify(self.length)?.size();

        if self.masked {
            n += MASK_KEY_SIZE;
        }

        Ok(n)
    }

    /// Serialize the header into a stack buffer. Fails with
    /// `InvalidLength` for a negative length, before anything is produced.
    pub fn encode(&self) -> WebsocketResult<EncodedHeader> {
        let tier = LengthTier::classify(self.length)?;
        let mut buf = [0u8; MAX_HEADER_SIZE];

        if self.fin {
            buf[0] |= FIN_BIT;
        }
        buf[0] |= (RSV_BITS & self.rsv) << RSV_SHIFT;
        buf[0] |= OPCODE_BITS & self.opcode.as_u8();

        match tier {
            LengthTier::Short(len) => buf[1] = len,
            LengthTier::Medium(len) => {
                buf[1] = LEN_16_MARKER;
                buf[2..4].copy_from_slice(&len.to_be_bytes());
            },
            LengthTier::Long(len) => {
                buf[1] = LEN_64_MARKER;
                buf[2..10].copy_from_slice(&len.to_be_bytes());
            },
        }

        let mut len = tier.size();

        if self.masked {
            buf[1] |= MASK_BIT;
            buf[len..len + MASK_KEY_SIZE].copy_from_slice(&self.mask);
            len += MASK_KEY_SIZE;
        }

        Ok(EncodedHeader { buf, len })
    }
}

/// Same as `Header::size`.
pub fn header_size(header: &Header) -> WebsocketResult<usize> {
    header.size()
}

/// Wire form of a `Header`. Derefs to exactly the encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedHeader {
    buf: [u8; MAX_HEADER_SIZE],
    len: usize,
}

impl Deref for EncodedHeader {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl AsRef<[u8]> for EncodedHeader {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(length: i64) -> Header {
        Header {
            fin: true,
            opcode: Opcode::Binary,
            length,
            ..Default::default()
        }
    }

    #[test]
    fn scenario_short_text() {
        let h = Header { fin: true, opcode: Opcode::Text, length: 10, ..Default::default() };
        assert_eq!(&h.encode().unwrap()[..], &[0x81, 0x0A]);
        assert_eq!(h.size().unwrap(), 2);
    }

    #[test]
    fn scenario_medium_binary() {
        let h = Header { opcode: Opcode::Binary, length: 200, ..Default::default() };
        assert_eq!(&h.encode().unwrap()[..], &[0x02, 0x7E, 0x00, 0xC8]);
    }

    #[test]
    fn scenario_medium_binary_masked() {
        let h = Header {
            opcode: Opcode::Binary,
            length: 200,
            masked: true,
            mask: [0x01, 0x02, 0x03, 0x04],
            ..Default::default()
        };
        assert_eq!(
            &h.encode().unwrap()[..],
            &[0x02, 0xFE, 0x00, 0xC8, 0x01, 0x02, 0x03, 0x04]
        );
        assert_eq!(h.size().unwrap(), 8);
    }

    #[test]
    fn scenario_long() {
        let bytes = header(70_000).encode().unwrap();
        assert_eq!(bytes.len(), 10);
        assert_eq!(bytes[1], 0x7F);
        assert_eq!(&bytes[2..10], &70_000u64.to_be_bytes());
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(header(0).size().unwrap(), 2);
        assert_eq!(header(125).size().unwrap(), 2);
        assert_eq!(header(126).size().unwrap(), 4);
        assert_eq!(header(65_535).size().unwrap(), 4);
        assert_eq!(header(65_536).size().unwrap(), 10);
        assert_eq!(header(i64::MAX).size().unwrap(), 10);

        assert_eq!(header(125).encode().unwrap()[1], 125);
        assert_eq!(&header(126).encode().unwrap()[1..], &[126, 0x00, 0x7E]);
        assert_eq!(&header(65_535).encode().unwrap()[1..], &[126, 0xFF, 0xFF]);
        assert_eq!(
            &header(65_536).encode().unwrap()[1..],
            &[127, 0, 0, 0, 0, 0, 0x01, 0x00, 0x00]
        );
        assert_eq!(
            &header(i64::MAX).encode().unwrap()[2..],
            &[0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn size_matches_encoded_len() {
        let lengths = [0, 1, 125, 126, 127, 1_000, 65_535, 65_536, 1 << 40, i64::MAX];

        for &length in lengths.iter() {
            for &masked in [false, true].iter() {
                let h = Header { masked, mask: [9, 8, 7, 6], ..header(length) };
                assert_eq!(h.size().unwrap(), h.encode().unwrap().len(), "length {}", length);
            }
        }
    }

    #[test]
    fn mask_adds_four_bytes_and_keeps_length_bits() {
        for &length in [5, 300, 100_000].iter() {
            let plain = header(length).encode().unwrap();
            let masked = Header { masked: true, mask: [0xA, 0xB, 0xC, 0xD], ..header(length) }
                .encode()
                .unwrap();

            assert_eq!(masked.len(), plain.len() + MASK_KEY_SIZE);
            assert_eq!(masked[1], plain[1] | 0x80);
            assert_eq!(&masked[..plain.len()][2..], &plain[2..]);
            assert_eq!(&masked[plain.len()..], &[0xA, 0xB, 0xC, 0xD]);
        }
    }

    #[test]
    fn unmasked_header_ignores_key() {
        let h = Header { mask: [1, 2, 3, 4], ..header(3) };
        assert_eq!(&h.encode().unwrap()[..], &[0x82, 0x03]);
    }

    #[test]
    fn negative_length_is_invalid() {
        for &length in [-1, -126, i64::MIN].iter() {
            let h = header(length);
            assert!(matches!(h.size(), Err(WebsocketError::InvalidLength(l)) if l == length));
            assert!(matches!(h.encode(), Err(WebsocketError::InvalidLength(l)) if l == length));
            assert!(header_size(&h).is_err());
        }
    }

    #[test]
    fn first_byte_packs_all_fields() {
        let h = Header {
            fin: true,
            rsv: rsv(true, false, true),
            opcode: Opcode::Pong,
            ..Default::default()
        };
        assert_eq!(h.encode().unwrap()[0], 0b1101_1010);
        assert!(h.rsv1());
        assert!(!h.rsv2());
        assert!(h.rsv3());
    }

    #[test]
    fn oversized_rsv_does_not_touch_fin() {
        let h = Header { rsv: 0xFF, opcode: Opcode::Text, ..Default::default() };
        assert_eq!(h.encode().unwrap()[0], 0x71);
    }

    #[test]
    fn bounds() {
        assert_eq!(header(0).encode().unwrap().len(), MIN_HEADER_SIZE);
        let h = Header { masked: true, ..header(i64::MAX) };
        assert_eq!(h.encode().unwrap().len(), MAX_HEADER_SIZE);
    }
}
