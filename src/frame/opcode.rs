/// Frame opcode.
///
/// The reserved variants carry the raw nibble and are meant to come out of
/// `From<u8>`, which keeps it inside the range noted next to each variant.
/// The control/data split follows the variant, and `as_u8` writes whatever
/// nibble the variant holds.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Opcode {
    Continuation,           // 0x0
    Text,                   // 0x1
    Binary,                 // 0x2
    RsvNonControl(u8),      // 0x3..=0x7
    Close,                  // 0x8
    Ping,                   // 0x9
    Pong,                   // 0xA
    RsvControl(u8),         // 0xB..=0xF
}

impl Default for Opcode {
    fn default() -> Self { Opcode::Continuation }
}

impl From<u8> for Opcode {
    /// Only the low nibble is looked at, the rest of the byte is dropped.
    fn from(byte: u8) -> Self {
        match 0x0F & byte {
            0x0 => Opcode::Continuation,
            0x1 => Opcode::Text,
            0x2 => Opcode::Binary,
            0x8 => Opcode::Close,
            0x9 => Opcode::Ping,
            0xA => Opcode::Pong,
            op @ 0x3..=0x7 => Opcode::RsvNonControl(op),
            op => Opcode::RsvControl(op),
        }
    }
}

impl Opcode {
    /// Value of the 4 bit opcode field.
    pub fn as_u8(&self) -> u8 {
        match *self {
            Opcode::Continuation => 0x0,
            Opcode::Text => 0x1,
            Opcode::Binary => 0x2,
            Opcode::Close => 0x8,
            Opcode::Ping => 0x9,
            Opcode::Pong => 0xA,
            Opcode::RsvNonControl(op) | Opcode::RsvControl(op) => 0x0F & op,
        }
    }

    pub fn is_continuation(&self) -> bool { *self == Opcode::Continuation }
    pub fn is_text(&self) -> bool { *self == Opcode::Text }
    pub fn is_binary(&self) -> bool { *self == Opcode::Binary }
    pub fn is_close(&self) -> bool { *self == Opcode::Close }
    pub fn is_ping(&self) -> bool { *self == Opcode::Ping }
    pub fn is_pong(&self) -> bool { *self == Opcode::Pong }

    pub fn is_control(&self) -> bool {
        matches!(*self,
            Opcode::Close
            | Opcode::Ping
            | Opcode::Pong
            | Opcode::RsvControl(_)
        )
    }

    pub fn is_data(&self) -> bool {
        !self.is_control()
    }
}
