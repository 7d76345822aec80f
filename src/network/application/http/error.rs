//! Error type for the HTTP helpers.

use crate::network::error::Error as NetworkError;
use core::fmt;

/// Errors returned by the HTTP client and the URL codec.
///
/// Truncation of oversized responses is not an error; it is reported through
/// [`Truncation`](super::response::Truncation) on a successful
/// [`Response`](super::response::Response).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// No response arrived before the timeout expired.
    ReadTimeout,
    /// The received data does not start with an `HTTP/x.y NNN` status line.
    MalformedResponse,
    /// The request line and headers do not fit in the staging buffer.
    RequestTooLarge,
    /// A destination buffer is smaller than the data it must hold.
    BufferTooSmall,
    /// A `%` escape is not followed by two hexadecimal digits.
    InvalidEscape,
    /// A JSON body could not be serialized.
    Serialize,
    /// The underlying connection failed.
    Network(NetworkError),
}

impl From<NetworkError> for Error {
    fn from(err: NetworkError) -> Self {
        Error::Network(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ReadTimeout => f.write_str("no response before timeout"),
            Error::MalformedResponse => f.write_str("malformed response status line"),
            Error::RequestTooLarge => f.write_str("request head exceeds staging buffer"),
            Error::BufferTooSmall => f.write_str("destination buffer too small"),
            Error::InvalidEscape => f.write_str("invalid percent escape"),
            Error::Serialize => f.write_str("body serialization failed"),
            Error::Network(err) => write!(f, "network: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::ReadTimeout => defmt::write!(f, "ReadTimeout"),
            Error::MalformedResponse => defmt::write!(f, "MalformedResponse"),
            Error::RequestTooLarge => defmt::write!(f, "RequestTooLarge"),
            Error::BufferTooSmall => defmt::write!(f, "BufferTooSmall"),
            Error::InvalidEscape => defmt::write!(f, "InvalidEscape"),
            Error::Serialize => defmt::write!(f, "Serialize"),
            Error::Network(err) => defmt::write!(f, "Network({})", err),
        }
    }
}
