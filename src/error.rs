use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type WebsocketResult<T> = Result<T, WebsocketError>;

#[derive(Debug)]
pub enum WebsocketError {
    /// The sink refused the bytes, passed through untouched.
    IoError(io::Error),
    /// Payload length that none of the length encodings can carry.
    InvalidLength(i64),
}

impl WebsocketError {
    pub fn is_invalid_length(&self) -> bool {
        matches!(*self, WebsocketError::InvalidLength(_))
    }
}

impl fmt::Display for WebsocketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WebsocketError::IoError(ref err) => write!(f, "{}", err),
            WebsocketError::InvalidLength(len) => {
                write!(f, "unexpected frame payload length: {}", len)
            },
        }
    }
}

impl error::Error for WebsocketError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            WebsocketError::IoError(ref err) => Some(err),
            WebsocketError::InvalidLength(_) => None,
        }
    }
}

impl From<io::Error> for WebsocketError {
    fn from(err: io::Error) -> Self {
        WebsocketError::IoError(err)
    }
}
